//! Password hash generator.
//!
//! Prints the Argon2 PHC string for the given password, ready to paste into
//! `ADMIN_PASSWORD_HASH`.

use anyhow::{Context, bail};

use mindblog_core::ports::PasswordService;
use mindblog_infra::Argon2PasswordService;

fn hash_from_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<String> {
    let Some(password) = args.nth(1) else {
        bail!("usage: genhash <password>");
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }

    Argon2PasswordService::new()
        .hash(&password)
        .context("failed to hash password")
}

fn main() {
    match hash_from_args(std::env::args()) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    }
}
