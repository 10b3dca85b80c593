//! DDPG agent implemented with tch-rs.
use super::{Actor, Critic, DdpgConfig};
use crate::{
    model::{ModelBase, SubModel, SubModel2},
    util::{track, OutDim},
};
use anyhow::Result;
use drift_core::{
    error::DriftError,
    record::{Record, RecordValue},
    Agent, Env, ExperienceBufferBase, Policy, ReplayBufferBase, TransitionBatch,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, fs, marker::PhantomData, path::Path};
use tch::{no_grad, Kind, Tensor};

type ActionValue = Tensor;

/// DDPG agent implemented with tch-rs.
///
/// Holds the `{current, target}` pairs of the actor and the critic. The
/// target networks start as copies of their current networks and are only
/// ever written by the soft update after an optimizer step.
pub struct Ddpg<E, Q, P, R>
where
    E: Env,
    Q: SubModel2<Output = ActionValue>,
    P: SubModel<Output = Tensor>,
    R: ExperienceBufferBase + ReplayBufferBase,
    E::Obs: Into<P::Input> + Into<Q::Input1>,
    E::Act: From<Tensor>,
    Q::Input2: From<Tensor>,
    Q::Config: DeserializeOwned + Serialize + Debug + PartialEq + Clone,
    P::Config: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
    R::Batch: TransitionBatch,
    <R::Batch as TransitionBatch>::ObsBatch: Into<Q::Input1> + Into<P::Input> + Clone,
    <R::Batch as TransitionBatch>::ActBatch: Into<Q::Input2>,
{
    pub(super) actor: Actor<P>,
    pub(super) actor_tgt: Actor<P>,
    pub(super) critic: Critic<Q>,
    pub(super) critic_tgt: Critic<Q>,
    pub(super) gamma: f64,
    pub(super) tau: f64,
    pub(super) batch_size: usize,
    pub(super) min_transitions_warmup: usize,
    pub(super) train: bool,
    pub(super) n_opts: usize,
    pub(super) device: tch::Device,
    pub(super) phantom: PhantomData<(E, R)>,
}

impl<E, Q, P, R> Ddpg<E, Q, P, R>
where
    E: Env,
    Q: SubModel2<Output = ActionValue>,
    P: SubModel<Output = Tensor>,
    R: ExperienceBufferBase + ReplayBufferBase,
    E::Obs: Into<P::Input> + Into<Q::Input1>,
    E::Act: From<Tensor>,
    Q::Input2: From<Tensor>,
    Q::Config: DeserializeOwned + Serialize + Debug + PartialEq + Clone,
    P::Config: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
    R::Batch: TransitionBatch,
    <R::Batch as TransitionBatch>::ObsBatch: Into<Q::Input1> + Into<P::Input> + Clone,
    <R::Batch as TransitionBatch>::ActBatch: Into<Q::Input2>,
{
    /// Constructs a DDPG agent.
    ///
    /// The configuration is validated here, once; invalid values are
    /// programming errors and panic.
    pub fn build(config: DdpgConfig<Q, P>) -> Self {
        assert!(config.batch_size > 0, "batch_size must be positive");
        assert!(
            config.tau > 0.0 && config.tau <= 1.0,
            "tau must lie in (0, 1]"
        );
        assert!(
            config.gamma >= 0.0 && config.gamma <= 1.0,
            "gamma must lie in [0, 1]"
        );

        let device: tch::Device = config
            .device
            .expect("No device is given for the DDPG agent")
            .into();

        if let Some(seed) = config.seed {
            tch::manual_seed(seed);
            fastrand::seed(seed as u64);
        }

        let actor = Actor::build(config.actor_config, device).unwrap();
        let actor_tgt = actor.clone();
        let critic = Critic::build(config.critic_config, device).unwrap();
        let critic_tgt = critic.clone();

        Ddpg {
            actor,
            actor_tgt,
            critic,
            critic_tgt,
            gamma: config.gamma,
            tau: config.tau,
            batch_size: config.batch_size,
            min_transitions_warmup: config.min_transitions_warmup,
            train: config.train,
            n_opts: 0,
            device,
            phantom: PhantomData,
        }
    }

    /// Performs one batched update of the critic, then the actor.
    ///
    /// The ordering is significant: the actor loss is taken on the critic
    /// that has just been updated.
    fn opt_(&mut self, buffer: &mut R) -> Result<Record> {
        let batch = buffer.batch(self.batch_size)?;
        let (obs, act, next_obs, reward, is_done) = batch.unpack();
        let reward = Tensor::from_slice(&reward[..]).to(self.device);
        let not_done = (Tensor::from(1f32)
            - Tensor::from_slice(&is_done[..]).to_kind(Kind::Float))
        .to(self.device);

        // Critic regression onto the temporal-difference target. The
        // target value is a constant w.r.t. the current networks.
        let loss_critic = {
            let pred = self
                .critic
                .forward(&obs.clone().into(), &act.into())
                .squeeze();
            let tgt = no_grad(|| {
                let next_act = self.actor_tgt.forward(&next_obs.clone().into());
                let next_q = self
                    .critic_tgt
                    .forward(&next_obs.into(), &next_act.into())
                    .squeeze();
                reward + not_done * self.gamma * next_q
            });

            debug_assert_eq!(pred.size().as_slice(), [self.batch_size as i64]);
            debug_assert_eq!(tgt.size().as_slice(), [self.batch_size as i64]);

            let loss = pred.mse_loss(&tgt, tch::Reduction::Mean);
            self.critic.backward_step(&loss);
            f32::try_from(loss)?
        };
        track(&mut self.critic_tgt, &self.critic, self.tau);

        // Policy gradient through the critic's action sensitivity. Only the
        // actor's optimizer steps here, so the critic stays fixed.
        let loss_actor = {
            let act = self.actor.forward(&obs.clone().into());
            let qval = self.critic.forward(&obs.into(), &act.into()).squeeze();
            let loss = -qval.mean(Kind::Float);
            self.actor.backward_step(&loss);
            f32::try_from(loss)?
        };
        track(&mut self.actor_tgt, &self.actor, self.tau);

        self.n_opts += 1;

        Ok(Record::from_slice(&[
            ("loss_critic", RecordValue::Scalar(loss_critic)),
            ("loss_actor", RecordValue::Scalar(loss_actor)),
        ]))
    }
}

impl<E, Q, P, R> Policy<E> for Ddpg<E, Q, P, R>
where
    E: Env,
    Q: SubModel2<Output = ActionValue>,
    P: SubModel<Output = Tensor>,
    R: ExperienceBufferBase + ReplayBufferBase,
    E::Obs: Into<P::Input> + Into<Q::Input1>,
    E::Act: From<Tensor>,
    Q::Input2: From<Tensor>,
    Q::Config: DeserializeOwned + Serialize + Debug + PartialEq + Clone,
    P::Config: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
    R::Batch: TransitionBatch,
    <R::Batch as TransitionBatch>::ObsBatch: Into<Q::Input1> + Into<P::Input> + Clone,
    <R::Batch as TransitionBatch>::ActBatch: Into<Q::Input2>,
{
    /// Evaluates the current actor, optionally perturbed by exploration
    /// noise.
    ///
    /// A single uniform draw below `epsilon` gates the whole noise vector;
    /// when it fires, elementwise Gaussian noise scaled by `epsilon` is
    /// added and the action clipped back into `[-1, 1]`.
    fn compute_action(&mut self, obs: &E::Obs, epsilon: f64) -> E::Act {
        no_grad(|| {
            let obs: P::Input = obs.clone().into();
            let act = self.actor.forward(&obs);
            let act = if fastrand::f64() < epsilon {
                let noise =
                    Tensor::randn(act.size().as_slice(), tch::kind::FLOAT_CPU).to(self.device);
                (act + noise * epsilon).clamp(-1.0, 1.0)
            } else {
                act
            };
            act.into()
        })
    }
}

impl<E, Q, P, R> Agent<E, R> for Ddpg<E, Q, P, R>
where
    E: Env,
    Q: SubModel2<Output = ActionValue>,
    P: SubModel<Output = Tensor>,
    R: ExperienceBufferBase + ReplayBufferBase,
    E::Obs: Into<P::Input> + Into<Q::Input1>,
    E::Act: From<Tensor>,
    Q::Input2: From<Tensor>,
    Q::Config: DeserializeOwned + Serialize + Debug + PartialEq + Clone,
    P::Config: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
    R::Batch: TransitionBatch,
    <R::Batch as TransitionBatch>::ObsBatch: Into<Q::Input1> + Into<P::Input> + Clone,
    <R::Batch as TransitionBatch>::ActBatch: Into<Q::Input2>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt(&mut self, buffer: &mut R) -> Result<Option<Record>> {
        if buffer.len() >= self.min_transitions_warmup.max(self.batch_size) {
            Ok(Some(self.opt_(buffer)?))
        } else {
            Ok(None)
        }
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        // Only the current networks are persisted; targets are re-derived
        // on restore.
        fs::create_dir_all(path)?;
        self.actor.save(path.join("actor.pt").as_path())?;
        self.critic.save(path.join("critic.pt").as_path())?;
        Ok(())
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        self.actor
            .load(path.join("actor.pt").as_path())
            .map_err(|e| DriftError::Restore(format!("actor: {}", e)))?;
        self.critic
            .load(path.join("critic.pt").as_path())
            .map_err(|e| DriftError::Restore(format!("critic: {}", e)))?;

        // Targets restart as exact copies of the restored networks.
        self.actor_tgt = self.actor.clone();
        self.critic_tgt = self.critic.clone();
        Ok(())
    }
}
