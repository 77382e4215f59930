//! Cross-crate test suite for the Cabal exposure model.
//!
//! The integration tests in `tests/` check model invariants under randomized
//! parameters and pin the reference scenario results.

pub mod helpers;
