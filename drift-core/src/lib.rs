#![warn(missing_docs)]
//! Core components for off-policy reinforcement learning on continuous
//! control tasks.
//!
//! This crate holds everything that does not depend on a tensor backend:
//! the environment, policy and agent interfaces, the experience replay
//! buffer, episode metrics, progress records, the evaluator and the
//! training orchestrator. Concrete agents live in backend crates such as
//! `drift-tch-agent`.
pub mod error;
pub mod record;
pub mod replay_buffer;

mod base;
pub use base::{
    Agent, Env, ExperienceBufferBase, Policy, ReplayBufferBase, Step, StepProcessor,
    TransitionBatch,
};

mod metrics;
pub use metrics::Metrics;

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{Sampler, Trainer, TrainerConfig};
