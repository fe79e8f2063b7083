//! pixkit-test - Regression test framework for pixkit
//!
//! Provides a lightweight regression ledger in the style of the classic
//! `regutils` harness together with deterministic input generators:
//!
//! - [`RegParams`] records numbered comparisons and reports every failure
//!   at [`RegParams::cleanup`]
//! - [`patterns`] builds gradient, checkerboard, noise and pitch-padded
//!   frames for any packed format
//!
//! # Usage
//!
//! ```ignore
//! use pixkit_test::RegParams;
//!
//! let mut rp = RegParams::new("scale_identity");
//! rp.compare_bytes(expected, actual);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod patterns;

pub use error::{TestError, TestResult};
pub use params::RegParams;
pub use patterns::{checker, gradient, noise, with_pitch};
