use std::time::{Duration, Instant};

use crate::game::GameState;

/// Per-session statistics shown in the header
pub struct GameMetrics {
    round_start: Instant,
    /// Time spent in the current round; frozen once the round ends
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub longest_snake: usize,
    pub games_played: u32,
    round_live: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            longest_snake: 0,
            games_played: 0,
            round_live: false,
        }
    }

    /// Refresh the round clock
    pub fn update(&mut self) {
        if self.round_live {
            self.elapsed_time = self.round_start.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.round_live = true;
    }

    pub fn on_game_over(&mut self, state: &GameState) {
        self.update();
        self.round_live = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(state.score);
        self.longest_snake = self.longest_snake.max(state.snake.len());
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
