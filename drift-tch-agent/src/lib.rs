#![warn(missing_docs)]
//! RL agents implemented with [tch](https://crates.io/crates/tch).
pub mod ddpg;
pub mod mlp;
pub mod model;
pub mod opt;
mod random;
mod tensor_batch;
pub mod util;

use serde::{Deserialize, Serialize};

pub use random::RandomPolicy;
pub use tensor_batch::TensorBatch;

/// Device on which networks and tensors are allocated.
///
/// This enum exists because [`tch::Device`] does not support serialization.
/// It is injected into agent construction through the agent configuration;
/// there is no process-wide device state in this crate.
#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
pub enum Device {
    /// The main CPU device.
    Cpu,

    /// A CUDA device with the given ordinal.
    Cuda(usize),
}

impl From<tch::Device> for Device {
    fn from(device: tch::Device) -> Self {
        match device {
            tch::Device::Cpu => Self::Cpu,
            tch::Device::Cuda(n) => Self::Cuda(n),
            _ => unimplemented!(),
        }
    }
}

impl From<Device> for tch::Device {
    fn from(device: Device) -> Self {
        match device {
            Device::Cpu => tch::Device::Cpu,
            Device::Cuda(n) => tch::Device::Cuda(n),
        }
    }
}
