//! Quantized output stage of a two-perspective NNUE evaluator.
//!
//! The hot path is [`fused_screlu_sum`], which applies the squared clipped
//! ReLU activation and the output-layer dot product in one pass over both
//! perspective accumulators. [`Network`] and [`Accumulator`] supply the
//! surrounding parameter storage and incremental hidden-layer state.

mod accumulator;
mod constants;
mod network;
mod screlu;
mod simd;
mod util;

pub use accumulator::{Accumulator, AccumulatorPair};
pub use constants::{HIDDEN_SIZE, INPUT_SIZE, QA, QB, SCALE};
pub use network::Network;
pub use screlu::fused_screlu_sum;
