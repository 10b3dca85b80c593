//! Transition batch.

/// A batch of transitions `(o_t, a_t, o_t+1, r_t, done_t)`, field-batched
/// and aligned by index.
pub trait TransitionBatch {
    /// A batch of observations.
    type ObsBatch;

    /// A batch of actions.
    type ActBatch;

    /// Decomposes the batch into
    /// `(obs, act, next_obs, reward, is_done)`.
    fn unpack(
        self,
    ) -> (
        Self::ObsBatch,
        Self::ActBatch,
        Self::ObsBatch,
        Vec<f32>,
        Vec<i8>,
    );

    /// Returns the number of transitions in the batch.
    fn len(&self) -> usize;

    /// Returns `true` if the batch holds no transitions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
