// src/engine/mod.rs

//! Submission engine.
//!
//! This module ties together:
//! - the status resolver (lazily cached status catalogs)
//! - the submission state machine
//! - the orchestrator that drives the remote calls for one job
//!
//! The state machine in [`state`] is pure and tested without a backend; the
//! IO-heavy part lives in [`submitter`].

pub mod state;
pub mod statuses;
pub mod submitter;

pub use state::SubmissionState;
pub use statuses::StatusResolver;
pub use submitter::Submitter;
