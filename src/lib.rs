pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod git;
pub mod grouper;
pub mod remote;
pub mod ui;
pub mod walker;

pub use error::{ChangelogError, Result};
pub use generator::{ChangelogGenerator, GenerationReport};
