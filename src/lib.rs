pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod processors;
pub mod readers;
pub mod report;
pub mod revision;
pub mod utils;

pub use error::{DriftError, Result};
