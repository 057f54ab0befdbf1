#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod manifest;
pub mod serve;

pub use builder::{Manifest, ManifestBuilder};
pub use config::{ConfigError, FallbackRule, ManifestConfig};
