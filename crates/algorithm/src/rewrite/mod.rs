//! Built-in rewrite algorithms.

mod pii_mask;

pub use pii_mask::PiiMaskRewrite;
