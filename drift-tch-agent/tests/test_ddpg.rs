//! Tests of the DDPG agent on a small point-mass environment.
use anyhow::Result;
use drift_core::{
    error::DriftError,
    record::NullRecorder,
    replay_buffer::{
        GenericTransitionBatch, SimpleReplayBuffer, SimpleReplayBufferConfig,
        SimpleStepProcessor, SimpleStepProcessorConfig,
    },
    Agent, DefaultEvaluator, Env, Evaluator, ExperienceBufferBase, Policy, ReplayBufferBase,
    Step, Trainer, TrainerConfig,
};
use drift_tch_agent::{
    ddpg::{ActorConfig, CriticConfig, Ddpg, DdpgConfig},
    mlp::{Mlp, MlpConfig},
    opt::OptimizerConfig,
    RandomPolicy, TensorBatch,
};
use tempdir::TempDir;
use tch::Tensor;

const STATE_DIM: i64 = 2;
const ACTION_DIM: i64 = 2;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug)]
struct PointObs(Vec<f32>);

impl From<PointObs> for Tensor {
    fn from(obs: PointObs) -> Tensor {
        Tensor::from_slice(&obs.0).unsqueeze(0)
    }
}

impl From<PointObs> for TensorBatch {
    fn from(obs: PointObs) -> TensorBatch {
        TensorBatch::from(Tensor::from(obs))
    }
}

#[derive(Clone, Debug)]
struct PointAct(Vec<f32>);

impl From<Tensor> for PointAct {
    fn from(t: Tensor) -> PointAct {
        let t = t.squeeze().to(tch::Device::Cpu);
        PointAct(Vec::try_from(&t).unwrap())
    }
}

impl From<PointAct> for Tensor {
    fn from(act: PointAct) -> Tensor {
        Tensor::from_slice(&act.0).unsqueeze(0)
    }
}

impl From<PointAct> for TensorBatch {
    fn from(act: PointAct) -> TensorBatch {
        TensorBatch::from(Tensor::from(act))
    }
}

/// A point mass nudged around the plane; every step pays a unit reward and
/// episodes end after a fixed number of steps.
#[derive(Clone)]
struct PointEnvConfig {
    episode_len: usize,
}

struct PointEnv {
    config: PointEnvConfig,
    pos: Vec<f32>,
    steps: usize,
}

impl Env for PointEnv {
    type Config = PointEnvConfig;
    type Obs = PointObs;
    type Act = PointAct;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            pos: vec![0.0; STATE_DIM as usize],
            steps: 0,
        })
    }

    fn state_size(&self) -> usize {
        STATE_DIM as usize
    }

    fn action_size(&self) -> usize {
        ACTION_DIM as usize
    }

    fn reset(&mut self, _train_mode: bool) -> Result<Self::Obs> {
        self.pos = vec![0.0; STATE_DIM as usize];
        self.steps = 0;
        Ok(PointObs(self.pos.clone()))
    }

    fn step(&mut self, act: &Self::Act) -> Result<Step<Self>> {
        for (p, a) in self.pos.iter_mut().zip(act.0.iter()) {
            *p += 0.1 * a;
        }
        self.steps += 1;
        let is_done = self.steps == self.config.episode_len;
        Ok(Step::new(
            act.clone(),
            PointObs(self.pos.clone()),
            1.0,
            is_done,
        ))
    }

    fn close(&mut self) {}
}

type PointBuffer = SimpleReplayBuffer<TensorBatch, TensorBatch>;
type PointStepProcessor = SimpleStepProcessor<PointEnv, TensorBatch, TensorBatch>;
type PointDdpg = Ddpg<PointEnv, Mlp, Mlp, PointBuffer>;

fn agent_config(seed: i64, batch_size: usize) -> DdpgConfig<Mlp, Mlp> {
    DdpgConfig::default()
        .actor_config(
            ActorConfig::default()
                .pi_config(MlpConfig::new(STATE_DIM, vec![16, 16], ACTION_DIM, true))
                .opt_config(OptimizerConfig::Adam { lr: 1e-3 }),
        )
        .critic_config(
            CriticConfig::default()
                .q_config(MlpConfig::new(STATE_DIM + ACTION_DIM, vec![16, 16], 1, false))
                .opt_config(OptimizerConfig::Adam { lr: 1e-3 }),
        )
        .batch_size(batch_size)
        .min_transitions_warmup(batch_size)
        .seed(seed)
        .device(tch::Device::Cpu)
}

fn greedy_action(agent: &mut PointDdpg, obs: &PointObs) -> Vec<f32> {
    agent.compute_action(obs, 0.0).0
}

#[test]
fn save_and_load_roundtrip() -> Result<()> {
    let dir = TempDir::new("ddpg_roundtrip")?;
    let obs = PointObs(vec![0.3, -0.7]);

    let mut agent = PointDdpg::build(agent_config(7, 8));
    agent.save_params(dir.path())?;
    let expected = greedy_action(&mut agent, &obs);

    let mut restored = PointDdpg::build(agent_config(8, 8));
    let before = greedy_action(&mut restored, &obs);
    assert!(
        expected
            .iter()
            .zip(before.iter())
            .any(|(a, b)| (a - b).abs() > 1e-6),
        "freshly initialized agents should disagree"
    );

    restored.load_params(dir.path())?;
    let after = greedy_action(&mut restored, &obs);
    for (a, b) in expected.iter().zip(after.iter()) {
        assert!((a - b).abs() < 1e-6);
    }
    Ok(())
}

#[test]
fn restore_from_missing_files_fails() {
    let dir = TempDir::new("ddpg_missing").unwrap();
    let mut agent = PointDdpg::build(agent_config(0, 8));

    let err = agent
        .load_params(&dir.path().join("nowhere"))
        .expect_err("restore must fail without checkpoint files");
    match err.downcast_ref::<DriftError>() {
        Some(DriftError::Restore(_)) => {}
        _ => panic!("unexpected error: {}", err),
    }
}

#[test]
fn actions_stay_bounded_under_noise() {
    let mut agent = PointDdpg::build(agent_config(1, 8));
    let obs = PointObs(vec![5.0, -5.0]);

    for _ in 0..100 {
        // epsilon = 1 always takes the noise branch
        let act = agent.compute_action(&obs, 1.0);
        for a in act.0 {
            assert!((-1.0..=1.0).contains(&a), "action component {} escaped", a);
        }
    }
}

#[test]
fn random_policy_stays_bounded_and_rolls_out() -> Result<()> {
    let mut policy = RandomPolicy::<PointEnv>::new(ACTION_DIM).scale(0.5);
    let obs = PointObs(vec![0.0, 0.0]);
    for _ in 0..50 {
        let act: PointAct = policy.compute_action(&obs, 0.0);
        for a in act.0 {
            assert!((-1.0..=1.0).contains(&a));
        }
    }

    // The untrained baseline still collects the per-step rewards.
    let mut evaluator: DefaultEvaluator<PointEnv> =
        DefaultEvaluator::new(&PointEnvConfig { episode_len: 5 }, 0, 2)?;
    let score = evaluator.evaluate(&mut policy)?;
    assert_eq!(score, 5.0);
    Ok(())
}

#[test]
fn opt_reports_finite_losses() -> Result<()> {
    let mut agent = PointDdpg::build(agent_config(2, 8));
    agent.train();
    assert!(agent.is_train());

    let mut buffer =
        PointBuffer::build(&SimpleReplayBufferConfig::default().capacity(64).seed(3));
    for i in 0..16 {
        let v = i as f32 / 16.0;
        buffer.push(GenericTransitionBatch {
            obs: PointObs(vec![v, -v]).into(),
            act: PointAct(vec![0.1, -0.1]).into(),
            next_obs: PointObs(vec![v + 0.1, -v]).into(),
            reward: vec![1.0],
            is_done: vec![(i % 8 == 7) as i8],
        })?;
    }

    let record = agent.opt(&mut buffer)?.expect("buffer is warmed up");
    assert!(record.get_scalar("loss_critic")?.is_finite());
    assert!(record.get_scalar("loss_actor")?.is_finite());
    Ok(())
}

#[test]
fn opt_skips_before_warmup() -> Result<()> {
    let mut agent = PointDdpg::build(agent_config(4, 8));
    let mut buffer =
        PointBuffer::build(&SimpleReplayBufferConfig::default().capacity(64).seed(3));
    for _ in 0..4 {
        buffer.push(GenericTransitionBatch {
            obs: PointObs(vec![0.0, 0.0]).into(),
            act: PointAct(vec![0.0, 0.0]).into(),
            next_obs: PointObs(vec![0.1, 0.0]).into(),
            reward: vec![0.0],
            is_done: vec![0],
        })?;
    }

    assert!(agent.opt(&mut buffer)?.is_none());
    Ok(())
}

#[test]
fn short_training_run_solves_and_saves() -> Result<()> {
    init();
    // Five steps of unit reward per episode; the threshold of 4.9 is met as
    // soon as the first episodes complete.
    let dir = TempDir::new("ddpg_train")?;
    let model_dir = dir.path().join("model");
    let trainer_config = TrainerConfig::default()
        .n_steps(40)
        .update_every(10)
        .print_every(10)
        .warmup_period(8)
        .solved_threshold(4.9)
        .model_dir(model_dir.to_str().unwrap());

    let mut trainer: Trainer<PointEnv, PointStepProcessor, PointBuffer> = Trainer::build(
        trainer_config,
        PointEnvConfig { episode_len: 5 },
        SimpleStepProcessorConfig::default(),
        SimpleReplayBufferConfig::default().capacity(256).seed(5),
    );
    let mut agent = PointDdpg::build(agent_config(6, 8));

    trainer.train(&mut agent, &mut NullRecorder {})?;

    assert!(model_dir.join("actor.pt").exists());
    assert!(model_dir.join("critic.pt").exists());
    Ok(())
}
