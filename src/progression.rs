//! Screen state machine across stages
//!
//! ```text
//! Start ─▶ Flight(n) ─▶ Boss(n) ─▶ GalaxyMap ─▶ Flight(n+1) ─▶ … ─▶ Victory
//!              │            │
//!              └────────────┴──▶ GameOver ─▶ Flight(n) (continue) | Start (menu)
//! ```
//!
//! Holds the scalars that survive stage transitions. Stage outcomes arrive as
//! [`StageEvent`]s and carry scores by value.

use serde::{Deserialize, Serialize};

use crate::sim::{FlightMode, StageEvent};
use crate::tables::{FINAL_LEVEL, LEVEL_COUNT};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Screen {
    Start,
    Flight { level: usize },
    Boss { level: usize },
    GalaxyMap,
    GameOver { score: u64 },
    Victory { score: u64 },
}

impl Screen {
    /// Level of the stage on screen, if any
    pub fn stage_level(&self) -> Option<usize> {
        match self {
            Screen::Flight { level } | Screen::Boss { level } => Some(*level),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    screen: Screen,
    mode: FlightMode,
    /// Cumulative score banked at the last stage handoff
    score: u64,
    completed_levels: Vec<usize>,
    /// Furthest level unlocked on the galaxy map
    current_level: usize,
    /// Level of the most recent flight or boss stage, for "continue"
    last_level: usize,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            screen: Screen::Start,
            mode: FlightMode::Campaign,
            score: 0,
            completed_levels: Vec::new(),
            current_level: 0,
            last_level: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn completed_levels(&self) -> &[usize] {
        &self.completed_levels
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn is_completed(&self, level: usize) -> bool {
        self.completed_levels.contains(&level)
    }

    /// Galaxy map rule: reached or already cleared
    pub fn is_selectable(&self, level: usize) -> bool {
        level < LEVEL_COUNT && (level <= self.current_level || self.is_completed(level))
    }

    /// Leave the start screen for the first flight stage
    pub fn start(&mut self, mode: FlightMode) -> bool {
        if self.screen != Screen::Start {
            log::warn!("Ignoring start from {:?}", self.screen);
            return false;
        }
        self.mode = mode;
        self.enter(Screen::Flight { level: 0 });
        true
    }

    /// Apply a stage event. Returns true if the screen changed.
    pub fn handle(&mut self, event: &StageEvent) -> bool {
        match (self.screen, *event) {
            (_, StageEvent::PointsEarned { .. }) => false,

            (Screen::Flight { .. }, StageEvent::BossReached { level, score }) => {
                self.score = score;
                self.enter(Screen::Boss { level });
                true
            }
            (Screen::Flight { .. }, StageEvent::GameOver { score }) => {
                self.enter(Screen::GameOver { score });
                true
            }
            (Screen::Flight { level }, StageEvent::LevelAdvanced { level: next, score }) => {
                self.complete(level);
                self.score = score;
                self.current_level = self.current_level.max(next);
                self.enter(Screen::Flight { level: next });
                true
            }
            (Screen::Flight { level }, StageEvent::Victory { score }) => {
                self.complete(level);
                self.score = score;
                self.enter(Screen::Victory { score });
                true
            }

            (Screen::Boss { level }, StageEvent::BossDefeated { score }) => {
                self.complete(level);
                self.score = score;
                if level >= FINAL_LEVEL {
                    self.enter(Screen::Victory { score });
                } else {
                    self.current_level = self.current_level.max(level + 1);
                    self.enter(Screen::GalaxyMap);
                }
                true
            }
            (Screen::Boss { .. }, StageEvent::PlayerDied { score }) => {
                self.enter(Screen::GameOver { score });
                true
            }

            (screen, event) => {
                log::warn!("Ignoring {:?} on {:?}", event, screen);
                false
            }
        }
    }

    /// Game over: fly the same level again with the banked score
    pub fn continue_from_here(&mut self) -> bool {
        if !matches!(self.screen, Screen::GameOver { .. }) {
            return false;
        }
        self.enter(Screen::Flight {
            level: self.last_level,
        });
        true
    }

    /// Back to the start screen, forgetting the whole run
    pub fn main_menu(&mut self) {
        log::info!("Returning to main menu");
        *self = Self::new();
    }

    /// Galaxy map: replay a reached or cleared level
    pub fn select_level(&mut self, level: usize) -> bool {
        if self.screen != Screen::GalaxyMap {
            return false;
        }
        if !self.is_selectable(level) {
            log::warn!("Level {} is locked", level);
            return false;
        }
        self.enter(Screen::Flight { level });
        true
    }

    /// Galaxy map: fly the furthest unlocked level
    pub fn continue_journey(&mut self) -> bool {
        if self.screen != Screen::GalaxyMap {
            return false;
        }
        self.enter(Screen::Flight {
            level: self.current_level,
        });
        true
    }

    fn complete(&mut self, level: usize) {
        if !self.completed_levels.contains(&level) {
            self.completed_levels.push(level);
            self.completed_levels.sort_unstable();
        }
    }

    fn enter(&mut self, screen: Screen) {
        if let Some(level) = screen.stage_level() {
            self.last_level = level;
        }
        log::info!("Screen: {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }
}
