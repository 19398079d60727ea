//! Domain entities - the core business objects.

mod credentials;
mod page;
mod post;
mod post_id;

pub use credentials::{AdminCredentials, mask_email};
pub use page::{Page, PostPage};
pub use post::{NewPost, Post, PostChanges, PostInput, PostStatus, reading_time, slugify};
pub use post_id::PostId;
