//! # cabal-core
//! Foundation types and traits for the Cabal exposure model.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
