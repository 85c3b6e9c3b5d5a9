//! Testshot Core
//!
//! Core types and pure logic for the testshot pipeline task.
//!
//! This crate contains:
//! - Domain types: execution context, test runs, failed case results
//! - Screenshot path derivation and file-name sanitization
//! - The verdict reduction that turns per-case upload outcomes into a
//!   single task result
//!
//! Everything in here is synchronous and side-effect free; network and
//! file-system access live in `testshot-client` and the task binary.

pub mod domain;
pub mod screenshot;
pub mod verdict;
