//! Incrementally maintained hidden-layer accumulators.
//!
//! Each perspective keeps the pre-activation hidden state `Hx + b` as `i16`
//! values. Upstream move-making code adds and removes feature rows as pieces
//! move; a full refresh rebuilds the state from a feature list and is the
//! correctness anchor for the incremental path.

use crate::constants::HIDDEN_SIZE;
use crate::network::Network;
use crate::util::Align64;

/// Hidden-layer state for one perspective, before activation.
#[derive(Clone, Debug)]
pub struct Accumulator {
    values: Align64<[i16; HIDDEN_SIZE]>,
}

impl Accumulator {
    /// Creates an accumulator holding only the hidden biases, the state of
    /// an empty feature set.
    pub fn new(network: &Network) -> Self {
        Self {
            values: Align64(*network.hidden_biases()),
        }
    }

    /// Adds the input-weight row of `feature`.
    pub fn add_feature(&mut self, network: &Network, feature: usize) {
        for (value, &weight) in self.values.iter_mut().zip(network.feature_weights(feature)) {
            *value += weight;
        }
    }

    /// Subtracts the input-weight row of `feature`.
    pub fn sub_feature(&mut self, network: &Network, feature: usize) {
        for (value, &weight) in self.values.iter_mut().zip(network.feature_weights(feature)) {
            *value -= weight;
        }
    }

    /// Replaces the row of `removed` with the row of `added` in one pass,
    /// the common case of a piece moving between squares.
    pub fn move_feature(&mut self, network: &Network, added: usize, removed: usize) {
        let added_row = network.feature_weights(added);
        let removed_row = network.feature_weights(removed);
        for i in 0..HIDDEN_SIZE {
            self.values[i] += added_row[i] - removed_row[i];
        }
    }

    /// The raw pre-activation values fed to the output reduction.
    pub fn values(&self) -> &[i16; HIDDEN_SIZE] {
        &self.values
    }
}

/// The two perspectives of one position.
#[derive(Clone, Debug)]
pub struct AccumulatorPair {
    pub white: Accumulator,
    pub black: Accumulator,
}

impl AccumulatorPair {
    /// Rebuilds both perspectives from scratch given each side's active
    /// feature indices.
    pub fn refresh(network: &Network, white_features: &[usize], black_features: &[usize]) -> Self {
        let mut white = Accumulator::new(network);
        for &feature in white_features {
            white.add_feature(network, feature);
        }

        let mut black = Accumulator::new(network);
        for &feature in black_features {
            black.add_feature(network, feature);
        }

        Self { white, black }
    }
}
