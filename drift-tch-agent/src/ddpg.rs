//! Deep deterministic policy gradient (DDPG) agent.
//!
//! The agent holds a `{current, target}` pair for both the actor and the
//! critic. Per optimization step it samples one batch from the replay
//! buffer, regresses the critic onto the 1-step temporal-difference target
//! `r + gamma * Q_tgt(s', mu_tgt(s')) * (1 - done)`, then ascends the
//! current critic's value of the current actor's action. Each target
//! network tracks its current network through
//! [`track`](crate::util::track) right after the corresponding optimizer
//! step.
mod actor;
mod base;
mod config;
mod critic;

pub use actor::{Actor, ActorConfig};
pub use base::Ddpg;
pub use config::DdpgConfig;
pub use critic::{Critic, CriticConfig};
