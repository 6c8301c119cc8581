//! # pid-core
//!
//! Shared types for the particle-species cut engine: the error type, field
//! polarity and strictness levels, species constants, and the [`Bank`]
//! interface through which reconstruction output is read.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::Bank;
pub use types::{LorentzVector, Polarity, Species, Strictness};
