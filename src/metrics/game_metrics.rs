use std::time::Duration;

use crate::game::GameEvent;

/// Statistics shown next to the board; kept in memory for the life of the process
pub struct GameMetrics {
    /// Time spent running in the current game (pauses excluded)
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub fruit_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            fruit_eaten: 0,
        }
    }

    /// Add a frame's worth of play time
    pub fn update(&mut self, delta: Duration) {
        self.elapsed_time += delta;
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started => self.on_game_start(),
            GameEvent::FruitEaten { .. } => self.fruit_eaten += 1,
            GameEvent::GameOver { final_score } => self.on_game_over(*final_score),
            GameEvent::ScoreChanged(_) | GameEvent::FruitRespawned { .. } => {}
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
