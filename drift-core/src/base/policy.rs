//! Policy.
use super::Env;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action. The training loop
/// and the evaluator depend only on this capability; a learned actor and a
/// random baseline are independent implementations.
pub trait Policy<E: Env> {
    /// Computes an action given an observation.
    ///
    /// `epsilon` scales exploration noise and gates whether it is applied at
    /// all; it is owned and decayed by the caller. `epsilon == 0.0` yields
    /// the deterministic greedy action.
    fn compute_action(&mut self, obs: &E::Obs, epsilon: f64) -> E::Act;
}
