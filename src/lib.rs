//! Self-organizing maps on a hexagonal lattice for flocculation experiments,
//! with a least-squares side-channel predicting settling speed for single samples.

pub mod calc;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod map;
pub mod proc;
pub mod regress;

pub use error::{Error, Result};

use core::fmt;

/// Error type for failed parsing of `String`s to `enum`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError(String);

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ParseEnumError {}
