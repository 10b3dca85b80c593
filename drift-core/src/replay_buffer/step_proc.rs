//! Converts environment steps into transitions.
use super::{BatchBase, GenericTransitionBatch};
use crate::{Env, Step, StepProcessor};
use std::marker::PhantomData;

/// Configuration of [`SimpleStepProcessor`].
#[derive(Clone, Debug, Default)]
pub struct SimpleStepProcessorConfig {}

/// A [`StepProcessor`] performing a 1-step backup.
///
/// The processor retains the previous observation `o_t`; a [`Step`] carrying
/// `(a_t, o_t+1, r_t, done_t)` is paired with it to produce the transition
/// `(o_t, a_t, o_t+1, r_t, done_t)`. It must be reset with the initial
/// observation of every episode before processing its steps.
pub struct SimpleStepProcessor<E, O, A> {
    prev_obs: Option<O>,
    phantom: PhantomData<(E, A)>,
}

impl<E, O, A> StepProcessor<E> for SimpleStepProcessor<E, O, A>
where
    E: Env,
    O: BatchBase + From<E::Obs>,
    A: BatchBase + From<E::Act>,
{
    type Config = SimpleStepProcessorConfig;
    type Output = GenericTransitionBatch<O, A>;

    fn build(_config: &Self::Config) -> Self {
        Self {
            prev_obs: None,
            phantom: PhantomData,
        }
    }

    fn reset(&mut self, init_obs: E::Obs) {
        self.prev_obs = Some(init_obs.into());
    }

    fn process(&mut self, step: Step<E>) -> Self::Output {
        let next_obs: O = step.obs.clone().into();
        let obs = self
            .prev_obs
            .replace(step.obs.into())
            .expect("prev_obs is not set. Forgot to call reset()?");

        GenericTransitionBatch {
            obs,
            act: step.act.into(),
            next_obs,
            reward: vec![step.reward],
            is_done: vec![step.is_done as i8],
        }
    }
}
