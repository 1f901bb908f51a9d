/// Progression counters for a run of consecutive encounters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    pub defeated_enemies: u32,
    pub current_win_streak: u32,
    /// Survives [`RunStats::reset`]; only ever grows.
    pub best_win_streak: u32,
}

impl RunStats {
    pub fn record_enemy_defeat(&mut self) {
        self.defeated_enemies += 1;
        self.current_win_streak += 1;
        self.best_win_streak = self.best_win_streak.max(self.current_win_streak);
    }

    pub fn record_team_loss(&mut self) {
        self.current_win_streak = 0;
    }

    /// Starts a new game, keeping the best streak on record.
    pub fn reset(&mut self) {
        *self = Self {
            best_win_streak: self.best_win_streak,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defeats_raise_streak_and_best() {
        let mut run = RunStats::default();
        run.record_enemy_defeat();
        run.record_enemy_defeat();
        assert_eq!(run.defeated_enemies, 2);
        assert_eq!(run.current_win_streak, 2);
        assert_eq!(run.best_win_streak, 2);
    }

    #[test]
    fn team_loss_resets_streak_only() {
        let mut run = RunStats::default();
        run.record_enemy_defeat();
        run.record_enemy_defeat();
        run.record_team_loss();
        run.record_enemy_defeat();
        assert_eq!(run.current_win_streak, 1);
        assert_eq!(run.best_win_streak, 2);
        assert_eq!(run.defeated_enemies, 3);
    }

    #[test]
    fn reset_keeps_best_streak() {
        let mut run = RunStats {
            defeated_enemies: 5,
            current_win_streak: 3,
            best_win_streak: 4,
        };
        run.reset();
        assert_eq!(
            run,
            RunStats {
                defeated_enemies: 0,
                current_win_streak: 0,
                best_win_streak: 4,
            }
        );
    }
}
