#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// morphological operations module.
pub mod morphology;

/// border padding module.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;
