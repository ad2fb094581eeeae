use std::time::{Duration, Instant};

use crate::game::GameEvent;

/// HUD figures, fed from the controller's events
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub score: u32,
    pub tick_rate: u32,
    pub paused: bool,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            score: 0,
            tick_rate: 0,
            paused: false,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::ScoreChanged(score) => {
                self.score = score;
                self.high_score = self.high_score.max(score);
            }
            GameEvent::SpeedChanged(tick_rate) => self.tick_rate = tick_rate,
            GameEvent::PauseToggled(paused) => self.paused = paused,
            GameEvent::GameOver { score, .. } => self.on_game_over(score),
            GameEvent::Reset { tick_rate } => {
                self.on_game_start();
                self.score = 0;
                self.tick_rate = tick_rate;
                self.paused = false;
            }
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
