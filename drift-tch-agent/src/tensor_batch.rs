//! Tensor-backed replay storage.
use drift_core::replay_buffer::BatchBase;
use tch::Tensor;

/// A [`BatchBase`] backed by a [`Tensor`].
///
/// The internal buffer has the shape `[capacity, shape[1..]]`, where `shape`
/// is taken from the data pushed the first time; the first axis of pushed
/// data is the batch size. Pushes wrap at the capacity, matching the ring
/// semantics of the replay buffer. The buffer always lives on the CPU; the
/// agent moves sampled batches to its own device.
pub struct TensorBatch {
    buf: Option<Tensor>,
    capacity: i64,
}

impl Clone for TensorBatch {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.as_ref().map(|t| t.copy()),
            capacity: self.capacity,
        }
    }
}

impl BatchBase for TensorBatch {
    fn new(capacity: usize) -> Self {
        Self {
            buf: None,
            capacity: capacity as _,
        }
    }

    fn push(&mut self, ix: usize, data: Self) {
        let data = match data.buf {
            Some(data) => data,
            None => return,
        };
        let batch_size = data.size()[0];
        if batch_size == 0 {
            return;
        }

        if self.buf.is_none() {
            let mut shape = data.size();
            shape[0] = self.capacity;
            self.buf = Some(Tensor::zeros(
                shape.as_slice(),
                (data.kind(), tch::Device::Cpu),
            ));
        }

        let ix = ix as i64;
        let buf = self.buf.as_ref().unwrap();
        for i in 0..batch_size {
            buf.get((ix + i) % self.capacity).copy_(&data.get(i));
        }
    }

    fn sample(&self, ixs: &[usize]) -> Self {
        let ixs = ixs.iter().map(|&ix| ix as i64).collect::<Vec<_>>();
        let batch_indexes = Tensor::from_slice(&ixs);
        let buf = self
            .buf
            .as_ref()
            .expect("cannot sample from an empty TensorBatch")
            .index_select(0, &batch_indexes);
        Self {
            buf: Some(buf),
            capacity: ixs.len() as i64,
        }
    }
}

impl From<Tensor> for TensorBatch {
    fn from(t: Tensor) -> Self {
        let capacity = t.size()[0];
        Self {
            buf: Some(t),
            capacity,
        }
    }
}

impl From<TensorBatch> for Tensor {
    fn from(b: TensorBatch) -> Self {
        b.buf.expect("TensorBatch holds no data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: f32) -> TensorBatch {
        TensorBatch::from(Tensor::from_slice(&[v, v + 0.5]).unsqueeze(0))
    }

    #[test]
    fn push_wraps_at_capacity() {
        let mut batch = TensorBatch::new(3);
        for i in 0..5 {
            batch.push(i, row(i as f32));
        }

        let buf: Tensor = batch.into();
        assert_eq!(buf.size(), vec![3, 2]);
        // slot 0 was overwritten by the fourth push
        let first: Vec<f32> = Vec::try_from(&buf.get(0)).unwrap();
        assert_eq!(first, vec![3.0, 3.5]);
    }

    #[test]
    fn sample_gathers_by_index() {
        let mut batch = TensorBatch::new(4);
        for i in 0..4 {
            batch.push(i, row(i as f32));
        }

        let picked: Tensor = batch.sample(&[2, 0, 2]).into();
        assert_eq!(picked.size(), vec![3, 2]);
        let values: Vec<f32> = Vec::try_from(&picked.select(1, 0)).unwrap();
        assert_eq!(values, vec![2.0, 0.0, 2.0]);
    }
}
