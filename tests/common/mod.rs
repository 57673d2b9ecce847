//! Common test utilities for CloudSync CLI tests.
//!
//! - `TestEnv`: isolated config directory plus a folder to sync
//! - `TestResult`: captured output of one CLI run

#![allow(dead_code)]

pub mod env;

pub use env::*;
