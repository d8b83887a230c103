//! Score, misses and the Playing -> GameOver state machine

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// What a ring expiry did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryOutcome {
    /// Ring had been collected, nothing changes
    Ignored,
    /// Run already over, nothing changes
    Inert,
    /// Miss recorded, run continues
    Missed { misses: u32 },
    /// Miss recorded and it ended the run
    GameOver { misses: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    score: u32,
    misses: u32,
    max_misses: u32,
    phase: GamePhase,
}

impl Session {
    pub fn new(max_misses: u32) -> Self {
        Self {
            score: 0,
            misses: 0,
            max_misses,
            phase: GamePhase::Playing,
        }
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn misses(&self) -> u32 {
        self.misses
    }

    #[inline]
    pub fn max_misses(&self) -> u32 {
        self.max_misses
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Count a collected ring. Returns the new score, or None once the run
    /// is over.
    pub fn record_collect(&mut self) -> Option<u32> {
        if self.is_game_over() {
            return None;
        }
        self.score += 1;
        Some(self.score)
    }

    /// Count a ring expiry
    pub fn record_expiry(&mut self, collected: bool) -> ExpiryOutcome {
        if collected {
            return ExpiryOutcome::Ignored;
        }
        if self.is_game_over() {
            return ExpiryOutcome::Inert;
        }
        self.misses += 1;
        if self.misses >= self.max_misses && self.enter_game_over() {
            ExpiryOutcome::GameOver {
                misses: self.misses,
            }
        } else {
            ExpiryOutcome::Missed {
                misses: self.misses,
            }
        }
    }

    /// Returns false if the run was already over
    pub fn enter_game_over(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session() {
        let session = Session::new(3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.misses(), 0);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_collected_expiry_is_not_a_miss() {
        let mut session = Session::new(3);
        assert_eq!(session.record_expiry(true), ExpiryOutcome::Ignored);
        assert_eq!(session.misses(), 0);
    }

    #[test]
    fn test_game_over_exactly_at_max() {
        let mut session = Session::new(3);
        assert_eq!(session.record_expiry(false), ExpiryOutcome::Missed { misses: 1 });
        assert_eq!(session.record_expiry(false), ExpiryOutcome::Missed { misses: 2 });
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.record_expiry(false), ExpiryOutcome::GameOver { misses: 3 });
        assert!(session.is_game_over());

        // Later misses are inert
        assert_eq!(session.record_expiry(false), ExpiryOutcome::Inert);
        assert_eq!(session.misses(), 3);
    }

    #[test]
    fn test_double_game_over_is_noop() {
        let mut session = Session::new(3);
        assert!(session.enter_game_over());
        assert!(!session.enter_game_over());
    }

    #[test]
    fn test_no_scoring_after_game_over() {
        let mut session = Session::new(1);
        assert_eq!(session.record_collect(), Some(1));
        session.record_expiry(false);
        assert_eq!(session.record_collect(), None);
        assert_eq!(session.score(), 1);
    }
}
