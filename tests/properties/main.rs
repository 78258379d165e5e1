//! Property test suite entry point.

mod determinism_tests;
mod parity_tests;
