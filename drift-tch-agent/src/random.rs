//! Random baseline policy.
use drift_core::{Env, Policy};
use std::marker::PhantomData;
use tch::Tensor;

/// A policy that samples Gaussian actions without looking at observations.
///
/// Serves as the untrained baseline for a continuous-control task; actions
/// are drawn as `randn * scale` and clipped to `[-1, 1]`. The exploration
/// scale passed by the caller is ignored.
pub struct RandomPolicy<E> {
    action_size: i64,
    scale: f64,
    phantom: PhantomData<E>,
}

impl<E> RandomPolicy<E> {
    /// Creates a random policy for an action space of the given dimension.
    pub fn new(action_size: i64) -> Self {
        Self {
            action_size,
            scale: 0.2,
            phantom: PhantomData,
        }
    }

    /// Sets the standard deviation of the sampled actions.
    pub fn scale(mut self, v: f64) -> Self {
        self.scale = v;
        self
    }
}

impl<E> Policy<E> for RandomPolicy<E>
where
    E: Env,
    E::Act: From<Tensor>,
{
    fn compute_action(&mut self, _obs: &E::Obs, _epsilon: f64) -> E::Act {
        let act = Tensor::randn(&[1, self.action_size], tch::kind::FLOAT_CPU) * self.scale;
        act.clamp(-1.0, 1.0).into()
    }
}
