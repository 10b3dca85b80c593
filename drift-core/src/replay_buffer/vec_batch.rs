//! Plain-vector batch storage.
use super::BatchBase;

/// A [`BatchBase`] backed by rows of `f32` vectors.
///
/// This is the backend-free storage used where no tensor library is
/// involved, e.g. in tests of the core components.
#[derive(Clone, Debug, PartialEq)]
pub struct VecBatch {
    buf: Vec<Vec<f32>>,
    capacity: usize,
}

impl VecBatch {
    /// Returns the stored rows.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.buf
    }
}

impl BatchBase for VecBatch {
    fn new(capacity: usize) -> Self {
        Self {
            buf: vec![Vec::new(); capacity],
            capacity,
        }
    }

    fn push(&mut self, ix: usize, data: Self) {
        for (i, row) in data.buf.into_iter().enumerate() {
            self.buf[(ix + i) % self.capacity] = row;
        }
    }

    fn sample(&self, ixs: &[usize]) -> Self {
        Self {
            buf: ixs.iter().map(|&ix| self.buf[ix].clone()).collect(),
            capacity: ixs.len(),
        }
    }
}

impl From<Vec<f32>> for VecBatch {
    fn from(row: Vec<f32>) -> Self {
        Self {
            buf: vec![row],
            capacity: 1,
        }
    }
}
