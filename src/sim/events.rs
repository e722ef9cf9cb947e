//! Events a stage hands to the session after a tick

use serde::{Deserialize, Serialize};

/// Stage outcome or notification. Stages queue these during `tick` and the
/// owner drains them with `take_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StageEvent {
    /// Flight stage ran out of lives
    GameOver { score: u64 },
    /// Classic mode cleared its last level
    Victory { score: u64 },
    /// Flight stage reached its distance; the boss of `level` is next
    BossReached { level: usize, score: u64 },
    /// Boss stage won, after the victory banner delay
    BossDefeated { score: u64 },
    /// Boss stage ran out of lives
    PlayerDied { score: u64 },
    /// Points to credit to the upgrade balance
    PointsEarned { amount: u64 },
    /// Classic mode moved on to `level` without a boss fight
    LevelAdvanced { level: usize, score: u64 },
}

impl StageEvent {
    /// True for events that end the stage
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StageEvent::GameOver { .. }
                | StageEvent::Victory { .. }
                | StageEvent::BossReached { .. }
                | StageEvent::BossDefeated { .. }
                | StageEvent::PlayerDied { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_events() {
        assert!(StageEvent::GameOver { score: 0 }.is_terminal());
        assert!(
            StageEvent::BossReached {
                level: 2,
                score: 10
            }
            .is_terminal()
        );
        assert!(!StageEvent::PointsEarned { amount: 100 }.is_terminal());
        assert!(!StageEvent::LevelAdvanced { level: 1, score: 0 }.is_terminal());
    }

    #[test]
    fn test_wire_shape() {
        let event = StageEvent::BossReached {
            level: 3,
            score: 1200,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"bossReached","level":3,"score":1200}"#);
    }
}
