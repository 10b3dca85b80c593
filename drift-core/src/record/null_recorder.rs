use super::{Record, Recorder};

/// A recorder that ignores any record. Useful in tests.
pub struct NullRecorder {}

impl Recorder for NullRecorder {
    /// Discard the given record.
    fn write(&mut self, _record: Record) {}
}
