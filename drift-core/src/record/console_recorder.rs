use super::{Record, RecordValue, Recorder};
use log::info;

/// A recorder that writes records through the [`log`] facade.
///
/// Entries are emitted as one `info` line per record, keys sorted for a
/// stable layout. Intended for human eyes, not machine parsing.
pub struct ConsoleRecorder {}

impl Recorder for ConsoleRecorder {
    fn write(&mut self, record: Record) {
        let mut entries = record
            .iter()
            .map(|(k, v)| match v {
                RecordValue::Scalar(v) => format!("{}: {:.3}", k, v),
                RecordValue::String(s) => format!("{}: {}", k, s),
            })
            .collect::<Vec<_>>();
        entries.sort();
        info!("{}", entries.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_mixed_records() {
        let mut recorder = ConsoleRecorder {};
        let mut record = Record::from_scalar("loss", 0.25);
        record.insert("phase", RecordValue::String("warmup".to_string()));
        // formatting must not panic on mixed value types
        recorder.write(record);
    }
}
