//! Rolling per-episode return aggregation.
use std::collections::VecDeque;

/// Tracks episode returns over a training run.
///
/// Rewards are accumulated into the in-progress episode; when a step carries
/// the done flag, the episode total is pushed into a rolling window of the
/// most recent returns and the accumulator starts over. The window mean is
/// the convergence signal used by the solved check.
pub struct Metrics {
    episode_count: usize,
    current_return: f32,
    window: VecDeque<f32>,
    window_size: usize,
}

impl Metrics {
    /// Creates a tracker with the given rolling-window capacity.
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "metrics window size must be positive");
        Self {
            episode_count: 0,
            current_return: 0.0,
            window: VecDeque::with_capacity(window_size),
            window_size,
        }
    }

    /// Accounts for one environment step.
    pub fn on_step(&mut self, reward: f32, is_done: bool) {
        self.current_return += reward;
        if is_done {
            if self.window.len() == self.window_size {
                self.window.pop_front();
            }
            self.window.push_back(self.current_return);
            self.episode_count += 1;
            self.current_return = 0.0;
        }
    }

    /// Mean return over the rolling window, `0.0` before the first episode
    /// completes.
    pub fn running_score(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.iter().sum::<f32>() / self.window.len() as f32
    }

    /// Number of completed episodes. Never resets.
    pub fn episode_count(&self) -> usize {
        self.episode_count
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(100)
    }
}
