//! Quantization and architecture constants.

/// Fixed-point value representing an activation of "1.0"; the SCReLU clamp
/// ceiling.
pub const QA: i16 = 255;

/// Quantization factor of the output weights.
pub const QB: i16 = 64;

/// Centipawn scaling applied to the dequantized network output.
pub const SCALE: i32 = 400;

/// Number of input features (12 piece planes x 64 squares).
pub const INPUT_SIZE: usize = 768;

/// Width of one hidden-layer perspective.
pub const HIDDEN_SIZE: usize = 128;

/// Size of a CPU cache line in bytes.
pub const CACHE_LINE_SIZE: usize = 64;
