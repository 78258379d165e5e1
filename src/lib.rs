//! fillrank: domain-aware ranking of stored form snippets.
//!
//! The pieces compose as: [`rules::resolve`] turns a host into a
//! [`model::ResolvedPolicy`], [`ranking::rank`] filters and scores library
//! items under that policy through a [`scoring::ScoringEngine`], and
//! [`library`] keeps the snapshot free of duplicates.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod library;
pub mod model;
pub mod ranking;
pub mod rules;
pub mod scoring;

#[doc(hidden)]
pub mod test_utils;

pub use error::{FillError, Result};
