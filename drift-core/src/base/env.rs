//! Environment.
use super::Step;
use anyhow::Result;

/// Represents a simulated environment, typically an MDP with continuous
/// observation and action spaces.
///
/// The training loop consumes only this narrow contract and is otherwise
/// agnostic to how the simulator is launched, shaped, or shut down.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Clone;

    /// Action of the environment.
    type Act: Clone;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Dimension of the observation vector.
    fn state_size(&self) -> usize;

    /// Dimension of the action vector.
    fn action_size(&self) -> usize;

    /// Resets the environment and returns the initial observation.
    ///
    /// `train_mode` lets backends run faster or with visualization disabled
    /// while training.
    fn reset(&mut self, train_mode: bool) -> Result<Self::Obs>;

    /// Performs an environment step.
    ///
    /// Failures of the backend propagate to the caller and abort the run.
    fn step(&mut self, act: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Shuts down the simulator.
    fn close(&mut self);
}
