//! Background jobs run alongside the HTTP server.

mod scheduler;

pub use scheduler::{SchedulerConfig, spawn_maintenance};
