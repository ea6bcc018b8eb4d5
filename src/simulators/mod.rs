// src/simulators/mod.rs

// The `gbm` module does the numerical work; `normal_source` is the seam the
// randomness comes in through.
pub mod gbm;
pub mod normal_source;

pub use normal_source::{NormalSource, SeededNormal, ThreadRngNormal};
