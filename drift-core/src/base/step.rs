//! Environment step.
use super::Env;

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// emitted by [`Env::step`] at every interaction step.
///
/// [`StepProcessor`] pairs it with the retained previous observation to
/// create a transition `(o_t, a_t, o_t+1, r_t, done_t)`.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation after taking the action.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode ended at this step.
    pub is_done: bool,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(act: E::Act, obs: E::Obs, reward: f32, is_done: bool) -> Self {
        Step {
            act,
            obs,
            reward,
            is_done,
        }
    }
}

/// Processes [`Step`] objects into items for an experience buffer.
///
/// The output type should be the same as
/// [`ExperienceBufferBase::Item`](super::ExperienceBufferBase::Item) of the
/// buffer the items are pushed into.
pub trait StepProcessor<E: Env> {
    /// Configuration.
    type Config: Clone;

    /// The type of transitions produced by this processor.
    type Output;

    /// Builds a processor.
    fn build(config: &Self::Config) -> Self;

    /// Resets the processor with the initial observation of an episode.
    fn reset(&mut self, init_obs: E::Obs);

    /// Processes a [`Step`] object into a transition.
    fn process(&mut self, step: Step<E>) -> Self::Output;
}
