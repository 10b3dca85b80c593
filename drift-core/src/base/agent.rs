//! Agent.
use super::{Env, Policy, ReplayBufferBase};
use crate::record::Record;
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy on an environment.
pub trait Agent<E: Env, R: ReplayBufferBase>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs an optimization step with a batch sampled from `buffer`.
    ///
    /// Returns `None` when the step is skipped because the buffer has not
    /// reached the agent's warmup threshold yet.
    fn opt(&mut self, buffer: &mut R) -> Result<Option<Record>>;

    /// Save the parameters of the current (trained) networks in the given
    /// directory. Target networks are not persisted.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Load the parameters of the current networks from the given directory.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
