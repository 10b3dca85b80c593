//! Train an [`Agent`].
mod config;
mod sampler;

use crate::{
    record::{Record, RecordValue::Scalar, Recorder},
    Agent, Env, ExperienceBufferBase, Metrics, ReplayBufferBase, StepProcessor,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::info;
pub use sampler::Sampler;
use std::path::Path;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop and the objects participating in it.
///
/// # Training loop
///
/// Given an agent implementing [`Agent`] and a recorder implementing
/// [`Recorder`], [`Trainer::train`] proceeds as follows:
///
/// 1. Build the environment, the step processor and the replay buffer from
///    their configurations; reset the environment in train mode.
/// 2. *Warmup*: collect transitions with the initial epsilon (no decay)
///    until the buffer holds `warmup_period` of them, so that batch
///    sampling cannot fail afterwards.
/// 3. For `t_step` in `1..=n_steps`:
///     1. Compute an action, step the environment, push the transition,
///        update the episode metrics, and decay epsilon:
///        `epsilon <- max(epsilon_min, epsilon * epsilon_decay)`.
///     2. Every `update_every` steps, run one optimization step of the
///        agent and then the solved check: if the running score reached
///        `solved_threshold`, save the agent's current networks into
///        `model_dir` and stop.
///     3. Every `print_every` steps, report the step index, running score
///        and episode count.
///
/// Environment failures abort the loop and propagate to the caller.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|"Step&lt;E: Env&gt;"|C[StepProcessor]
///     C -->|transition|D[ReplayBufferBase]
///     D -->|batch|A
/// ```
pub struct Trainer<E, P, R>
where
    E: Env,
    P: StepProcessor<E>,
    R: ExperienceBufferBase<Item = P::Output> + ReplayBufferBase,
{
    /// Configuration of the environment for training.
    env_config: E::Config,

    /// Configuration of the transition producer.
    step_proc_config: P::Config,

    /// Configuration of the replay buffer.
    replay_buffer_config: R::Config,

    /// Where to save the trained model on solve.
    model_dir: Option<String>,

    /// The number of environment steps of the main loop.
    n_steps: usize,

    /// Interval of optimization in environment steps.
    update_every: usize,

    /// Interval of reporting in environment steps.
    print_every: usize,

    /// Warmup period, for filling the replay buffer, in transitions.
    warmup_period: usize,

    /// Exploration schedule.
    epsilon_init: f64,
    epsilon_decay: f64,
    epsilon_min: f64,

    /// Solved condition on the running score.
    solved_threshold: f32,

    /// Size of the rolling window of episode returns.
    score_window: usize,
}

impl<E, P, R> Trainer<E, P, R>
where
    E: Env,
    P: StepProcessor<E>,
    R: ExperienceBufferBase<Item = P::Output> + ReplayBufferBase,
{
    /// Constructs a trainer.
    ///
    /// The configuration is validated here, once; invalid values are
    /// programming errors and panic.
    pub fn build(
        config: TrainerConfig,
        env_config: E::Config,
        step_proc_config: P::Config,
        replay_buffer_config: R::Config,
    ) -> Self {
        assert!(config.update_every > 0, "update_every must be positive");
        assert!(config.print_every > 0, "print_every must be positive");
        assert!(
            config.epsilon_decay > 0.0 && config.epsilon_decay <= 1.0,
            "epsilon_decay must lie in (0, 1]"
        );
        assert!(config.epsilon_min >= 0.0, "epsilon_min must be non-negative");
        assert!(config.score_window > 0, "score_window must be positive");

        Self {
            env_config,
            step_proc_config,
            replay_buffer_config,
            model_dir: config.model_dir,
            n_steps: config.n_steps,
            update_every: config.update_every,
            print_every: config.print_every,
            warmup_period: config.warmup_period,
            epsilon_init: config.epsilon_init,
            epsilon_decay: config.epsilon_decay,
            epsilon_min: config.epsilon_min,
            solved_threshold: config.solved_threshold,
            score_window: config.score_window,
        }
    }

    /// Train the agent until `n_steps` environment steps have been taken or
    /// the solved condition is met.
    pub fn train<A>(&mut self, agent: &mut A, recorder: &mut dyn Recorder) -> Result<()>
    where
        A: Agent<E, R>,
    {
        let env = E::build(&self.env_config, 0)?;
        let step_processor = P::build(&self.step_proc_config);
        let mut buffer = R::build(&self.replay_buffer_config);
        let mut sampler = Sampler::new(env, step_processor);
        let mut metrics = Metrics::new(self.score_window);
        let mut epsilon = self.epsilon_init;

        agent.train();
        sampler.reset(true)?;

        // Warmup: epsilon stays at its initial value here.
        while buffer.len() < self.warmup_period {
            let (reward, is_done) = sampler.sample_and_push(agent, &mut buffer, epsilon)?;
            metrics.on_step(reward, is_done);
        }

        for t_step in 1..=self.n_steps {
            let (reward, is_done) = sampler.sample_and_push(agent, &mut buffer, epsilon)?;
            metrics.on_step(reward, is_done);
            epsilon = (epsilon * self.epsilon_decay).max(self.epsilon_min);

            if t_step % self.update_every == 0 {
                if let Some(record) = agent.opt(&mut buffer)? {
                    recorder.write(record);
                }

                if metrics.running_score() >= self.solved_threshold {
                    info!(
                        "Environment solved in {} episodes! Average score: {:.2}",
                        metrics.episode_count(),
                        metrics.running_score()
                    );
                    if let Some(model_dir) = self.model_dir.as_ref() {
                        agent.save_params(Path::new(model_dir))?;
                        info!("Saved the model in {:?}", model_dir);
                    }
                    break;
                }
            }

            if t_step % self.print_every == 0 {
                info!(
                    "Step #{}, Running score {:.2}, Total episodes {}",
                    t_step,
                    metrics.running_score(),
                    metrics.episode_count()
                );
                recorder.write(Record::from_slice(&[
                    ("step", Scalar(t_step as f32)),
                    ("running_score", Scalar(metrics.running_score())),
                    ("episodes", Scalar(metrics.episode_count() as f32)),
                ]));
            }
        }

        sampler.close();
        Ok(())
    }
}
