//! Evaluate a trained [`Policy`](crate::Policy).
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

use crate::{Env, Policy};
use anyhow::Result;

/// Evaluates a policy by letting it act greedily.
pub trait Evaluator<E: Env> {
    /// Runs evaluation episodes and returns the mean episode return.
    ///
    /// The caller is responsible for putting a trainable policy into
    /// evaluation mode beforehand.
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<f32>;
}
