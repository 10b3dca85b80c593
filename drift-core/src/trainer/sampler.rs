//! Environment interaction and experience collection.
use crate::{Env, ExperienceBufferBase, Policy, StepProcessor};
use anyhow::Result;

/// Couples an environment with a step processor.
///
/// The sampler owns the interaction side of the training loop: it asks the
/// policy for an action, steps the environment, routes the resulting
/// [`Step`](crate::Step) through the processor and pushes the produced
/// transition into the experience buffer. Episode boundaries are handled
/// here as well; the environment is reset transparently whenever a step
/// reports `is_done`.
pub struct Sampler<E, P>
where
    E: Env,
    P: StepProcessor<E>,
{
    env: E,
    prev_obs: Option<E::Obs>,
    step_processor: P,
}

impl<E, P> Sampler<E, P>
where
    E: Env,
    P: StepProcessor<E>,
{
    /// Creates a sampler over the given environment and step processor.
    pub fn new(env: E, step_processor: P) -> Self {
        Self {
            env,
            prev_obs: None,
            step_processor,
        }
    }

    /// Resets the environment and the step processor.
    pub fn reset(&mut self, train_mode: bool) -> Result<()> {
        let obs = self.env.reset(train_mode)?;
        self.step_processor.reset(obs.clone());
        self.prev_obs = Some(obs);
        Ok(())
    }

    /// Performs one environment step and pushes the resulting transition
    /// into `buffer`.
    ///
    /// Returns the reward and the done flag of the step for metrics
    /// tracking. Environment failures propagate to the caller.
    pub fn sample_and_push<A, R>(
        &mut self,
        policy: &mut A,
        buffer: &mut R,
        epsilon: f64,
    ) -> Result<(f32, bool)>
    where
        A: Policy<E>,
        R: ExperienceBufferBase<Item = P::Output>,
    {
        if self.prev_obs.is_none() {
            self.reset(true)?;
        }

        let act = policy.compute_action(self.prev_obs.as_ref().unwrap(), epsilon);
        let step = self.env.step(&act)?;
        let reward = step.reward;
        let is_done = step.is_done;
        let next_obs = step.obs.clone();

        let transition = self.step_processor.process(step);
        buffer.push(transition)?;

        if is_done {
            self.reset(true)?;
        } else {
            self.prev_obs = Some(next_obs);
        }

        Ok((reward, is_done))
    }

    /// Shuts down the environment.
    pub fn close(&mut self) {
        self.env.close();
    }
}
