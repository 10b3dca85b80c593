//! Configuration of [`Trainer`](super::Trainer).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of environment steps of the main loop.
    pub n_steps: usize,

    /// Interval of optimization (and of the solved check) in environment
    /// steps.
    pub update_every: usize,

    /// Interval of progress reporting in environment steps.
    pub print_every: usize,

    /// Number of transitions collected before the main loop starts.
    ///
    /// Callers set this to the agent's batch size so that batch sampling
    /// can never fail once optimization begins.
    pub warmup_period: usize,

    /// Initial exploration scale.
    pub epsilon_init: f64,

    /// Multiplicative decay applied to epsilon after every main-loop step.
    pub epsilon_decay: f64,

    /// Lower bound of epsilon.
    pub epsilon_min: f64,

    /// Running score at which the task counts as solved.
    pub solved_threshold: f32,

    /// Size of the rolling window of episode returns.
    pub score_window: usize,

    /// Where to save the trained model on solve. `None` disables saving.
    pub model_dir: Option<String>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_steps: 100_000,
            update_every: 20,
            print_every: 1000,
            warmup_period: 0,
            epsilon_init: 1.0,
            epsilon_decay: 0.995,
            epsilon_min: 0.01,
            solved_threshold: 30.0,
            score_window: 100,
            model_dir: None,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of environment steps.
    pub fn n_steps(mut self, v: usize) -> Self {
        self.n_steps = v;
        self
    }

    /// Sets the optimization interval in environment steps.
    pub fn update_every(mut self, v: usize) -> Self {
        self.update_every = v;
        self
    }

    /// Sets the reporting interval in environment steps.
    pub fn print_every(mut self, v: usize) -> Self {
        self.print_every = v;
        self
    }

    /// Sets the warmup period in transitions.
    pub fn warmup_period(mut self, v: usize) -> Self {
        self.warmup_period = v;
        self
    }

    /// Sets the initial epsilon.
    pub fn epsilon_init(mut self, v: f64) -> Self {
        self.epsilon_init = v;
        self
    }

    /// Sets the epsilon decay factor.
    pub fn epsilon_decay(mut self, v: f64) -> Self {
        self.epsilon_decay = v;
        self
    }

    /// Sets the epsilon floor.
    pub fn epsilon_min(mut self, v: f64) -> Self {
        self.epsilon_min = v;
        self
    }

    /// Sets the solved threshold.
    pub fn solved_threshold(mut self, v: f32) -> Self {
        self.solved_threshold = v;
        self
    }

    /// Sets the size of the rolling score window.
    pub fn score_window(mut self, v: usize) -> Self {
        self.score_window = v;
        self
    }

    /// Sets the directory where the model is saved on solve.
    pub fn model_dir(mut self, v: impl Into<String>) -> Self {
        self.model_dir = Some(v.into());
        self
    }

    /// Constructs [`TrainerConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`] to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
