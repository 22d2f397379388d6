//! Retry and backoff policy.
//!
//! This module encapsulates exponential backoff decisions so that the tool
//! wrappers (skopeo, oras) can share a consistent policy. Classification of
//! failures stays with the caller: [`run_with_retry`] takes a pure
//! predicate that decides whether a given failure is transient.

mod policy;
mod run;

pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
