//! Atelier desk
//!
//! The back-office shell: session and navigation in [`core`], one controller
//! per page in [`screens`], and the `atelier` command line in [`commands`].

pub mod commands;
pub mod core;
pub mod screens;

pub use self::core::{AppConfig, SessionContext};
