pub use crate::errors::EchoError;

pub mod cli;
pub mod env;
pub mod errors;
pub mod glob;
pub mod path;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod value;
pub mod version;
