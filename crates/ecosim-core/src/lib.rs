//! Core types and configuration for the ecosim turn-based ecosystem.

pub mod config;
pub mod error;
pub mod kind;
pub mod types;

pub use config::*;
pub use error::{Error, Result};
pub use kind::{Class, Kind, Profile};
pub use types::*;
