//! Interfaces of neural networks.
use anyhow::Result;
use std::path::Path;
use tch::{nn::VarStore, Tensor};

/// Base interface of a trainable network with its optimizer.
pub trait ModelBase {
    /// Trains the network given a loss: zeroes accumulated gradients,
    /// backpropagates `loss` and applies one optimizer step.
    fn backward_step(&mut self, loss: &Tensor);

    /// Returns the variable store holding the network parameters.
    fn get_var_store(&self) -> &VarStore;

    /// Save parameters of the neural network.
    fn save<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    /// Load parameters of the neural network.
    fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()>;
}

/// Neural network module with a single input and a single output, built
/// over a shared [`VarStore`].
///
/// Structs implementing this trait can be initialized with a given
/// [`VarStore`] and cloned into another one, which is how target networks
/// are created.
pub trait SubModel {
    /// Configuration from which [`SubModel`] is constructed.
    type Config;

    /// Input of the [`SubModel`].
    type Input;

    /// Output of the [`SubModel`].
    type Output;

    /// Builds [`SubModel`] with [`VarStore`] and [`SubModel::Config`].
    fn build(var_store: &VarStore, config: Self::Config) -> Self;

    /// Clones [`SubModel`] with [`VarStore`].
    fn clone_with_var_store(&self, var_store: &VarStore) -> Self;

    /// A generalized forward function.
    fn forward(&self, input: &Self::Input) -> Self::Output;
}

/// Neural network module with two inputs and a single output.
///
/// The difference from [`SubModel`] is that this trait takes two inputs,
/// e.g. an observation and an action for an action-value function.
pub trait SubModel2 {
    /// Configuration from which [`SubModel2`] is constructed.
    type Config;

    /// First input of the [`SubModel2`].
    type Input1;

    /// Second input of the [`SubModel2`].
    type Input2;

    /// Output of the [`SubModel2`].
    type Output;

    /// Builds [`SubModel2`] with [`VarStore`] and [`SubModel2::Config`].
    fn build(var_store: &VarStore, config: Self::Config) -> Self;

    /// Clones [`SubModel2`] with [`VarStore`].
    fn clone_with_var_store(&self, var_store: &VarStore) -> Self;

    /// A generalized forward function.
    fn forward(&self, input1: &Self::Input1, input2: &Self::Input2) -> Self::Output;
}
