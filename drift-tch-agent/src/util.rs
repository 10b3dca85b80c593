//! Utilities.
use crate::model::ModelBase;
use log::trace;

/// Apply soft update on variables.
///
/// Variables are identified by their names:
///
/// `dest = tau * src + (1.0 - tau) * dest`
///
/// elementwise over all parameter tensors, under `no_grad`. This function is
/// the only place where target-network parameters are written; optimizers
/// never touch them. `tau = 0` leaves `dest` unchanged and `tau = 1` makes
/// it an exact copy of `src`.
pub fn track<M: ModelBase>(dest: &mut M, src: &M, tau: f64) {
    let src = src.get_var_store().variables();
    let mut dest = dest.get_var_store().variables();
    debug_assert_eq!(src.len(), dest.len());

    tch::no_grad(|| {
        for (name, src) in src.iter() {
            let dest = dest.get_mut(name).unwrap();
            dest.copy_(&(tau * src + (1.0 - tau) * &*dest));
        }
    });
    trace!("soft update");
}

/// Interface for handling output dimensions.
pub trait OutDim {
    /// Returns the output dimension.
    fn get_out_dim(&self) -> i64;
}
