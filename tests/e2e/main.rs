//! E2E test suite entry point.

mod fixture;
mod import_workflow;
mod ranking_workflow;
