pub mod auth;
pub mod cli;
pub mod config;
pub mod sync;

mod api;

pub use api::{Svnsync, SvnsyncBuilder};
