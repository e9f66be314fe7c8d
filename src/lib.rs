pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod guard;
pub mod manifest;
pub mod publish;
pub mod ui;

pub use error::{ExpoBumpError, Result};
