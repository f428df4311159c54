#![deny(missing_docs)]
//! Low-level grayscale morphology library in Rust
//!
//! Re-exports the member crates under a single root.

#[doc(inline)]
pub use morpho_image as image;

#[doc(inline)]
pub use morpho_imgproc as imgproc;

#[doc(inline)]
pub use morpho_io as io;
