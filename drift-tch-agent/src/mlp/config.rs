use crate::util::OutDim;
use serde::{Deserialize, Serialize};

/// Configuration of [`Mlp`](super::Mlp).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct MlpConfig {
    pub(super) in_dim: i64,
    pub(super) units: Vec<i64>,
    pub(super) out_dim: i64,
    /// Saturate the output with `tanh`, bounding it to `[-1, 1]`.
    pub(super) tanh_output: bool,
}

impl MlpConfig {
    /// Constructs a configuration of a multilayer perceptron.
    ///
    /// Policy heads pass `tanh_output = true` to bound actions; value heads
    /// keep the output linear.
    pub fn new(in_dim: i64, units: Vec<i64>, out_dim: i64, tanh_output: bool) -> Self {
        Self {
            in_dim,
            units,
            out_dim,
            tanh_output,
        }
    }
}

impl OutDim for MlpConfig {
    fn get_out_dim(&self) -> i64 {
        self.out_dim
    }
}
