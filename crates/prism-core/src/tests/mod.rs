//! Test module for prism-core
//!
//! This module contains tests for:
//! - Workflow state machine (select/submit/response/reset transitions)
//! - Request-generation token handling (stale response discard)
//! - Style catalog and fuzzy filtering
//! - Service client wire behavior against a canned-response server
//! - Configuration loading and defaults

// Test modules use exact float comparisons
#![allow(clippy::float_cmp)]

mod client_tests;
mod fixtures;
