//! A generic implementation of an experience replay buffer.
//!
//! [`SimpleReplayBuffer`] stores transitions of arbitrary observation and
//! action batch types in a fixed-capacity ring and samples them uniformly at
//! random, which breaks the temporal correlation of consecutive environment
//! steps. Prioritized sampling is deliberately not part of this module.
mod base;
mod batch;
mod config;
mod step_proc;
mod vec_batch;

pub use base::SimpleReplayBuffer;
pub use batch::{BatchBase, GenericTransitionBatch};
pub use config::SimpleReplayBufferConfig;
pub use step_proc::{SimpleStepProcessor, SimpleStepProcessorConfig};
pub use vec_batch::VecBatch;
