//! Types for recording training progress.
mod base;
mod console_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use console_recorder::ConsoleRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
