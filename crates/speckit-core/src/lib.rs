pub mod alignment;
pub mod artifact;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod lister;
pub mod locator;
pub mod paths;
pub mod types;
pub mod updater;

pub use error::{Result, SpecKitError};
