//! End-to-end tests of the training loop on a deterministic toy
//! environment with a stub agent.
use anyhow::Result;
use drift_core::{
    error::DriftError,
    record::{NullRecorder, Record},
    replay_buffer::{
        SimpleReplayBuffer, SimpleReplayBufferConfig, SimpleStepProcessor,
        SimpleStepProcessorConfig, VecBatch,
    },
    Agent, DefaultEvaluator, Env, Evaluator, ExperienceBufferBase, Policy, Step, Trainer,
    TrainerConfig,
};
use std::{
    cell::RefCell,
    fs,
    path::Path,
    rc::Rc,
};
use tempdir::TempDir;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type LineBuffer = SimpleReplayBuffer<VecBatch, VecBatch>;
type LineStepProcessor = SimpleStepProcessor<LineEnv, VecBatch, VecBatch>;
type LineTrainer = Trainer<LineEnv, LineStepProcessor, LineBuffer>;

/// A one-dimensional environment that walks `episode_len` steps per episode
/// and pays a fixed reward per step.
#[derive(Clone)]
struct LineEnvConfig {
    episode_len: usize,
    reward: f32,
    /// Total step index (over the whole run) at which the backend fails.
    fail_at_step: Option<usize>,
}

struct LineEnv {
    config: LineEnvConfig,
    pos: usize,
    total_steps: usize,
}

impl Env for LineEnv {
    type Config = LineEnvConfig;
    type Obs = Vec<f32>;
    type Act = Vec<f32>;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            pos: 0,
            total_steps: 0,
        })
    }

    fn state_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        1
    }

    fn reset(&mut self, _train_mode: bool) -> Result<Self::Obs> {
        self.pos = 0;
        Ok(vec![0.0])
    }

    fn step(&mut self, act: &Self::Act) -> Result<Step<Self>> {
        self.total_steps += 1;
        if let Some(fail_at) = self.config.fail_at_step {
            if self.total_steps == fail_at {
                return Err(DriftError::Environment("backend crashed".to_string()).into());
            }
        }

        self.pos += 1;
        let is_done = self.pos == self.config.episode_len;
        Ok(Step::new(
            act.clone(),
            vec![self.pos as f32],
            self.config.reward,
            is_done,
        ))
    }

    fn close(&mut self) {}
}

/// Shared observations of the stub agent, inspected by the tests.
#[derive(Default)]
struct StubLog {
    epsilons: Vec<f64>,
    opt_calls: usize,
    buffer_len_at_first_opt: Option<usize>,
}

/// An agent that acts with a constant action and learns nothing.
struct StubAgent {
    log: Rc<RefCell<StubLog>>,
    train: bool,
}

impl StubAgent {
    fn new() -> (Self, Rc<RefCell<StubLog>>) {
        let log = Rc::new(RefCell::new(StubLog::default()));
        (
            Self {
                log: log.clone(),
                train: false,
            },
            log,
        )
    }
}

impl Policy<LineEnv> for StubAgent {
    fn compute_action(&mut self, _obs: &Vec<f32>, epsilon: f64) -> Vec<f32> {
        self.log.borrow_mut().epsilons.push(epsilon);
        vec![0.0]
    }
}

impl Agent<LineEnv, LineBuffer> for StubAgent {
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt(&mut self, buffer: &mut LineBuffer) -> Result<Option<Record>> {
        let mut log = self.log.borrow_mut();
        if log.buffer_len_at_first_opt.is_none() {
            log.buffer_len_at_first_opt = Some(buffer.len());
        }
        log.opt_calls += 1;
        Ok(Some(Record::from_scalar("loss", 0.0)))
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        fs::write(path.join("actor.pt"), b"actor")?;
        fs::write(path.join("critic.pt"), b"critic")?;
        Ok(())
    }

    fn load_params(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

fn env_config(episode_len: usize, reward: f32) -> LineEnvConfig {
    LineEnvConfig {
        episode_len,
        reward,
        fail_at_step: None,
    }
}

fn build_trainer(config: TrainerConfig, env_config: LineEnvConfig) -> LineTrainer {
    Trainer::build(
        config,
        env_config,
        SimpleStepProcessorConfig::default(),
        SimpleReplayBufferConfig::default().capacity(1000),
    )
}

#[test]
fn warmup_fills_buffer_before_first_opt() -> Result<()> {
    init();
    let config = TrainerConfig::default()
        .n_steps(1)
        .update_every(1)
        .warmup_period(8);
    let mut trainer = build_trainer(config, env_config(5, 1.0));
    let (mut agent, log) = StubAgent::new();

    trainer.train(&mut agent, &mut NullRecorder {})?;

    let log = log.borrow();
    assert_eq!(log.opt_calls, 1);
    // 8 warmup transitions plus the single main-loop step
    assert_eq!(log.buffer_len_at_first_opt, Some(9));
    Ok(())
}

#[test]
fn epsilon_follows_decay_schedule() -> Result<()> {
    let n_steps = 10;
    let config = TrainerConfig::default()
        .n_steps(n_steps)
        .update_every(1000)
        .warmup_period(4);
    let mut trainer = build_trainer(config, env_config(5, 0.0));
    let (mut agent, log) = StubAgent::new();

    trainer.train(&mut agent, &mut NullRecorder {})?;

    let log = log.borrow();
    assert_eq!(log.epsilons.len(), 4 + n_steps);
    // Warmup steps use the initial epsilon, undecayed.
    for eps in &log.epsilons[..4] {
        assert_eq!(*eps, 1.0);
    }
    // Main-loop step k observes 0.995^k before its own decay.
    let mut prev = f64::MAX;
    for (k, eps) in log.epsilons[4..].iter().enumerate() {
        let expected = 0.01f64.max(0.995f64.powi(k as i32));
        assert!((eps - expected).abs() < 1e-12);
        assert!(*eps <= prev);
        prev = *eps;
    }
    Ok(())
}

#[test]
fn epsilon_never_drops_below_floor() -> Result<()> {
    let config = TrainerConfig::default()
        .n_steps(20)
        .update_every(1000)
        .warmup_period(0)
        .epsilon_decay(0.5)
        .epsilon_min(0.2);
    let mut trainer = build_trainer(config, env_config(5, 0.0));
    let (mut agent, log) = StubAgent::new();

    trainer.train(&mut agent, &mut NullRecorder {})?;

    let last = *log.borrow().epsilons.last().unwrap();
    assert_eq!(last, 0.2);
    Ok(())
}

#[test]
fn solved_run_saves_model_and_stops() -> Result<()> {
    init();
    // Ten steps of reward 3.0 give an episode return of exactly 30.
    let dir = TempDir::new("solved_run")?;
    let model_dir = dir.path().join("model");
    let config = TrainerConfig::default()
        .n_steps(100)
        .update_every(5)
        .warmup_period(4)
        .solved_threshold(30.0)
        .model_dir(model_dir.to_str().unwrap());
    let mut trainer = build_trainer(config, env_config(10, 3.0));
    let (mut agent, log) = StubAgent::new();

    trainer.train(&mut agent, &mut NullRecorder {})?;

    assert!(model_dir.join("actor.pt").exists());
    assert!(model_dir.join("critic.pt").exists());
    // The first episode completes at main-loop step 6 (4 warmup steps
    // counted into it); the solved check at step 10 stops the run early.
    let steps_seen = log.borrow().epsilons.len();
    assert!(steps_seen < 4 + 100, "run did not stop early: {}", steps_seen);
    Ok(())
}

#[test]
fn run_below_threshold_is_not_solved() -> Result<()> {
    // Episode return 29.99 stays just below the threshold of 30.
    let dir = TempDir::new("unsolved_run")?;
    let model_dir = dir.path().join("model");
    let n_steps = 40;
    let config = TrainerConfig::default()
        .n_steps(n_steps)
        .update_every(5)
        .warmup_period(4)
        .solved_threshold(30.0)
        .model_dir(model_dir.to_str().unwrap());
    let mut trainer = build_trainer(config, env_config(10, 2.999));
    let (mut agent, log) = StubAgent::new();

    trainer.train(&mut agent, &mut NullRecorder {})?;

    assert!(!model_dir.exists());
    assert_eq!(log.borrow().epsilons.len(), 4 + n_steps);
    Ok(())
}

#[test]
fn evaluator_averages_greedy_episode_returns() -> Result<()> {
    let mut evaluator: DefaultEvaluator<LineEnv> =
        DefaultEvaluator::new(&env_config(10, 1.5), 0, 3)?;
    let (mut agent, log) = StubAgent::new();

    let score = evaluator.evaluate(&mut agent)?;
    assert_eq!(score, 15.0);
    // greedy rollouts request actions with epsilon = 0
    assert!(log.borrow().epsilons.iter().all(|eps| *eps == 0.0));

    evaluator.close();
    Ok(())
}

#[test]
fn environment_errors_abort_the_run() {
    let config = TrainerConfig::default()
        .n_steps(50)
        .update_every(5)
        .warmup_period(4);
    let mut env_config = env_config(10, 1.0);
    env_config.fail_at_step = Some(7);
    let mut trainer = build_trainer(config, env_config);
    let (mut agent, _log) = StubAgent::new();

    let err = trainer
        .train(&mut agent, &mut NullRecorder {})
        .expect_err("environment failure must propagate");
    match err.downcast_ref::<DriftError>() {
        Some(DriftError::Environment(_)) => {}
        _ => panic!("unexpected error: {}", err),
    }
}
