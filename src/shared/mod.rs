// Shared kernel: cross-module types, configuration and logging

pub mod config;
pub mod domain;
pub mod errors;
pub mod utils;

pub use domain::value_objects::ProviderId;
