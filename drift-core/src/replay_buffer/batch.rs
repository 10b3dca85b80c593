//! Field-batched storage of transitions.
use crate::TransitionBatch;

/// Basic operations of a batch of observations or actions.
///
/// Implementations own the per-field storage of the replay buffer: a
/// preallocated region of `capacity` slots written at explicit indices and
/// read back by index lists.
pub trait BatchBase {
    /// Creates a new batch with the specified capacity.
    fn new(capacity: usize) -> Self;

    /// Writes `data` starting at slot `ix`, wrapping at the capacity.
    fn push(&mut self, ix: usize, data: Self);

    /// Retrieves the entries at the specified indices as a new batch.
    fn sample(&self, ixs: &[usize]) -> Self;
}

/// A generic transition batch.
///
/// Holds observations, actions, next observations, rewards and done flags,
/// all aligned by index. It doubles as the item pushed into
/// [`SimpleReplayBuffer`](super::SimpleReplayBuffer) (with one entry) and as
/// the batch sampled from it (with `batch_size` entries).
#[derive(Debug)]
pub struct GenericTransitionBatch<O, A>
where
    O: BatchBase,
    A: BatchBase,
{
    /// Observations.
    pub obs: O,

    /// Actions.
    pub act: A,

    /// Next observations.
    pub next_obs: O,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Episode termination flags.
    pub is_done: Vec<i8>,
}

impl<O, A> TransitionBatch for GenericTransitionBatch<O, A>
where
    O: BatchBase,
    A: BatchBase,
{
    type ObsBatch = O;
    type ActBatch = A;

    fn unpack(self) -> (O, A, O, Vec<f32>, Vec<i8>) {
        (self.obs, self.act, self.next_obs, self.reward, self.is_done)
    }

    fn len(&self) -> usize {
        self.reward.len()
    }
}
