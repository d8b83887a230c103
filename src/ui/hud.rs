//! Score counter and game-over banner

use crate::sim::ease::{Ease, lerp};

/// Score text pulse: peak scale and duration of each half
pub const SCORE_PULSE_SCALE: f32 = 1.1;
pub const SCORE_PULSE_HALF_MS: f64 = 100.0;

/// Last line of the game-over banner
pub const RESTART_PROMPT: &str = "Click or Press Any Key to Restart";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    score: u32,
    score_changed_at_ms: Option<f64>,
    game_over: Option<String>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Show a new score and kick off the pulse
    pub fn update_score(&mut self, score: u32, now_ms: f64) {
        self.score = score;
        self.score_changed_at_ms = Some(now_ms);
    }

    /// Visual scale of the score text (1.0 at rest)
    pub fn score_scale(&self, now_ms: f64) -> f32 {
        match self.score_changed_at_ms {
            Some(at) => lerp(
                1.0,
                SCORE_PULSE_SCALE,
                Ease::Linear.yoyo(now_ms - at, SCORE_PULSE_HALF_MS),
            ),
            None => 1.0,
        }
    }

    /// Replace any previous banner with the final score and restart prompt
    pub fn show_game_over(&mut self, score: u32) {
        self.game_over = Some(format!("Game Over\nScore: {score}\n{RESTART_PROMPT}"));
    }

    pub fn game_over_text(&self) -> Option<&str> {
        self.game_over.as_deref()
    }

    #[inline]
    pub fn is_restart_prompt_visible(&self) -> bool {
        self.game_over.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_text_and_pulse() {
        let mut hud = Hud::new();
        assert_eq!(hud.score_text(), "Score: 0");
        assert_eq!(hud.score_scale(0.0), 1.0);

        hud.update_score(4, 1000.0);
        assert_eq!(hud.score_text(), "Score: 4");
        assert!((hud.score_scale(1100.0) - SCORE_PULSE_SCALE).abs() < 1e-6);
        assert!((hud.score_scale(1050.0) - 1.05).abs() < 1e-5);
        assert_eq!(hud.score_scale(1200.0), 1.0);
    }

    #[test]
    fn test_game_over_banner() {
        let mut hud = Hud::new();
        assert!(!hud.is_restart_prompt_visible());
        hud.show_game_over(12);
        assert_eq!(
            hud.game_over_text(),
            Some("Game Over\nScore: 12\nClick or Press Any Key to Restart")
        );
        hud.show_game_over(13);
        assert!(hud.game_over_text().unwrap().contains("Score: 13"));
    }
}
