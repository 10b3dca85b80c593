//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{Env, Policy};
use anyhow::Result;

/// Runs a fixed number of greedy episodes and averages their returns.
///
/// Actions are requested with `epsilon = 0`, so no exploration noise is
/// applied regardless of the policy's training state.
pub struct DefaultEvaluator<E: Env> {
    n_episodes: usize,
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<f32> {
        let mut r_total = 0f32;

        for _ in 0..self.n_episodes {
            let mut prev_obs = self.env.reset(false)?;

            loop {
                let act = policy.compute_action(&prev_obs, 0.0);
                let step = self.env.step(&act)?;
                r_total += step.reward;
                if step.is_done {
                    break;
                }
                prev_obs = step.obs;
            }
        }

        Ok(r_total / self.n_episodes as f32)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs an evaluator running `n_episodes` episodes on a fresh
    /// environment instance.
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        assert!(n_episodes > 0, "evaluator needs at least one episode");
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }

    /// Shuts down the evaluation environment.
    pub fn close(&mut self) {
        self.env.close();
    }
}
