//! MFCC computation over a 48-band mel filter bank.
//!
//! Every function here is pure: no shared state, no I/O. Coefficients for
//! different indices can be computed concurrently against the same frame.

pub mod filter;
pub mod mel;
pub mod mfcc;
pub mod normalizer;

pub use crate::mfcc::{checked_coefficient, coefficients, compute_coefficient, par_coefficients};
