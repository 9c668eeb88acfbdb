//! Small helpers shared by configuration loading.
//!
//! [`env::EnvUtils`] reads environment variables with trimming and
//! non-empty validation, used as the fallback when a setting is missing
//! from the configuration sources.

pub mod env;

pub use env::{EnvUtils, EnvVarError};
