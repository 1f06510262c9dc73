//! Network parameters, weight loading, and the forward pass.
//!
//! Architecture: 768 -> (128)x2 -> 1. Two perspective accumulators share one
//! set of input weights; the output layer sees the side-to-move accumulator
//! in its first half and the not-to-move accumulator in its second half.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use aligned_vec::{AVec, ConstAlign, avec};
use byteorder::{LittleEndian, ReadBytesExt};
use rand::Rng;
use rand::RngExt;

use crate::accumulator::Accumulator;
use crate::constants::{CACHE_LINE_SIZE, HIDDEN_SIZE, INPUT_SIZE, QA, QB, SCALE};
use crate::screlu::fused_screlu_sum;
use crate::util::Align64;

/// Quantized network parameters.
#[derive(Debug)]
pub struct Network {
    /// Input weights, row-major `[INPUT_SIZE][HIDDEN_SIZE]`.
    input_weights: AVec<i16, ConstAlign<CACHE_LINE_SIZE>>,
    /// Hidden-layer biases, shared by both perspectives.
    hidden_biases: Align64<[i16; HIDDEN_SIZE]>,
    /// Output weights, side-to-move half then not-to-move half.
    output_weights: AVec<i16, ConstAlign<CACHE_LINE_SIZE>>,
    /// Output bias, in `QA * QB` fixed point.
    output_bias: i16,
}

impl Network {
    /// Loads the network from a little-endian binary stream.
    ///
    /// Layout: input weights row-major, hidden biases, output weights,
    /// output bias, all `i16`.
    pub fn load<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut input_weights = avec![[CACHE_LINE_SIZE]|0i16; INPUT_SIZE * HIDDEN_SIZE];
        reader.read_i16_into::<LittleEndian>(&mut input_weights)?;

        let mut hidden_biases = Align64([0i16; HIDDEN_SIZE]);
        reader.read_i16_into::<LittleEndian>(&mut *hidden_biases)?;

        let mut output_weights = avec![[CACHE_LINE_SIZE]|0i16; 2 * HIDDEN_SIZE];
        reader.read_i16_into::<LittleEndian>(&mut output_weights)?;

        let output_bias = reader.read_i16::<LittleEndian>()?;

        Ok(Self {
            input_weights,
            hidden_biases,
            output_weights,
            output_bias,
        })
    }

    /// Loads the network from an in-memory weight image.
    pub fn from_bytes(bytes: &[u8]) -> io::Result<Self> {
        Self::load(&mut &bytes[..])
    }

    /// Loads the network from a weight file.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::load(&mut BufReader::new(file))
    }

    /// Builds a network with uniformly random parameters, for tests and
    /// benchmarks. Input parameters fall in `[-128, 127]`, output parameters
    /// in `[-64, 63]`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut input_weights = avec![[CACHE_LINE_SIZE]|0i16; INPUT_SIZE * HIDDEN_SIZE];
        for weight in input_weights.iter_mut() {
            *weight = rng.random_range(-128..=127);
        }

        let mut hidden_biases = Align64([0i16; HIDDEN_SIZE]);
        for bias in hidden_biases.iter_mut() {
            *bias = rng.random_range(-128..=127);
        }

        let mut output_weights = avec![[CACHE_LINE_SIZE]|0i16; 2 * HIDDEN_SIZE];
        for weight in output_weights.iter_mut() {
            *weight = rng.random_range(-64..=63);
        }

        Self {
            input_weights,
            hidden_biases,
            output_weights,
            output_bias: rng.random_range(-64..=63),
        }
    }

    /// The input-weight row of one feature.
    pub fn feature_weights(&self, feature: usize) -> &[i16] {
        &self.input_weights[feature * HIDDEN_SIZE..][..HIDDEN_SIZE]
    }

    /// The hidden-layer biases.
    pub fn hidden_biases(&self) -> &[i16; HIDDEN_SIZE] {
        &self.hidden_biases
    }

    /// The output weights, both perspective halves.
    pub fn output_weights(&self) -> &[i16] {
        &self.output_weights
    }

    /// The output bias.
    pub fn output_bias(&self) -> i16 {
        self.output_bias
    }

    /// Evaluates the position from the side to move, in centipawns.
    ///
    /// Runs the fused SCReLU reduction over both accumulators, then
    /// dequantizes: the squared activation leaves the sum in `QA * QA * QB`
    /// fixed point, so one factor of `QA` divides out before the bias is
    /// added and the rest comes out with the final `QA * QB` division.
    pub fn forward(&self, stm: &Accumulator, ntm: &Accumulator) -> i32 {
        let mut eval = fused_screlu_sum(stm.values(), ntm.values(), &self.output_weights);

        eval /= i32::from(QA);
        eval += i32::from(self.output_bias);
        eval *= SCALE;
        eval / (i32::from(QA) * i32::from(QB))
    }
}
