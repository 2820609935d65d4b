pub mod bot;
pub mod cli;
pub mod error;
pub mod game;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use error::{ErrorKind, ProcessingError, Result};
