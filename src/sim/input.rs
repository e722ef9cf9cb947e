//! Abstract control signals
//!
//! Keyboard and touch collaborators flip these on and off; the stages sample the
//! current state once per tick rather than consuming discrete events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One held control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Boost,
    Shoot,
}

/// Level-triggered control state for a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSignals {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub boost: bool,
    pub shoot: bool,
}

impl ControlSignals {
    /// Record an on/off edge for a signal
    pub fn set(&mut self, signal: Signal, active: bool) {
        match signal {
            Signal::MoveUp => self.move_up = active,
            Signal::MoveDown => self.move_down = active,
            Signal::MoveLeft => self.move_left = active,
            Signal::MoveRight => self.move_right = active,
            Signal::Boost => self.boost = active,
            Signal::Shoot => self.shoot = active,
        }
    }

    pub fn is_active(&self, signal: Signal) -> bool {
        match signal {
            Signal::MoveUp => self.move_up,
            Signal::MoveDown => self.move_down,
            Signal::MoveLeft => self.move_left,
            Signal::MoveRight => self.move_right,
            Signal::Boost => self.boost,
            Signal::Shoot => self.shoot,
        }
    }

    /// Release everything (focus loss, touch end)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Unit-per-axis thrust direction; opposite signals cancel
    pub fn thrust(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.move_up {
            dir.y -= 1.0;
        }
        if self.move_down {
            dir.y += 1.0;
        }
        if self.move_left {
            dir.x -= 1.0;
        }
        if self.move_right {
            dir.x += 1.0;
        }
        dir
    }
}
