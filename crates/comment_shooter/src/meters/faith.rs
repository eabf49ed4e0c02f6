use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{crossed_down, crossed_up};

/// Faith granted or taken per comment outcome.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaithRewards {
    pub holy: i32,
    pub ohoe: i32,
    pub ohoe_penalty: i32,
    pub troll: i32,
    pub troll_penalty: i32,
    pub super_chat_common: i32,
    pub super_chat_rare: i32,
    pub super_chat_epic: i32,
    pub super_chat_legendary: i32,
}

impl Default for FaithRewards {
    fn default() -> Self {
        Self {
            holy: 8,
            ohoe: 12,
            ohoe_penalty: 15,
            troll: 15,
            troll_penalty: 25,
            super_chat_common: 20,
            super_chat_rare: 35,
            super_chat_epic: 60,
            super_chat_legendary: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaithConfig {
    pub initial: i32,
    pub min: i32,
    pub max: i32,
    /// Reaching this wins the round.
    pub target: i32,
    /// Falling to this loses the round.
    pub floor: i32,
}

impl FaithConfig {
    /// Swaps an inverted `min`/`max` so clamping stays valid.
    pub fn normalized(self) -> Self {
        Self {
            min: self.min.min(self.max),
            max: self.max.max(self.min),
            ..self
        }
    }
}

impl Default for FaithConfig {
    fn default() -> Self {
        Self {
            initial: 0,
            min: -100,
            max: 9999,
            target: 200,
            floor: -100,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaithEvent {
    Changed { previous: i32, current: i32 },
    Gained(i32),
    Lost(i32),
    TargetReached,
    Depleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaithSnapshot {
    pub current: i32,
    pub config: FaithConfig,
}

/// The main score. Clamped to `[min, max]`.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Faith {
    config: FaithConfig,
    current: i32,
}

impl Default for Faith {
    fn default() -> Self {
        Self::new(FaithConfig::default())
    }
}

impl Faith {
    pub fn new(config: FaithConfig) -> Self {
        let config = config.normalized();
        Self {
            current: config.initial.clamp(config.min, config.max),
            config,
        }
    }

    pub const fn config(&self) -> &FaithConfig {
        &self.config
    }

    pub const fn current(&self) -> i32 {
        self.current
    }

    /// Non-positive amounts are ignored.
    pub fn add(&mut self, amount: i32) -> Vec<FaithEvent> {
        if amount <= 0 {
            return Vec::new();
        }
        self.set(self.current.saturating_add(amount))
    }

    /// Non-positive amounts are ignored.
    pub fn subtract(&mut self, amount: i32) -> Vec<FaithEvent> {
        if amount <= 0 {
            return Vec::new();
        }
        self.set(self.current.saturating_sub(amount))
    }

    /// Adds a signed delta through `add` or `subtract`.
    pub fn apply(&mut self, delta: i32) -> Vec<FaithEvent> {
        if delta >= 0 {
            self.add(delta)
        } else {
            self.subtract(delta.saturating_neg())
        }
    }

    pub const fn has_reached_target(&self) -> bool {
        self.current >= self.config.target
    }

    pub const fn is_depleted(&self) -> bool {
        self.current <= self.config.floor
    }

    /// Share of the target reached, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.config.target <= 0 {
            return 1.0;
        }
        (self.current as f32 / self.config.target as f32).clamp(0.0, 1.0)
    }

    /// Faith still missing to reach the target.
    pub fn deficit(&self) -> i32 {
        (self.config.target - self.current).max(0)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub const fn snapshot(&self) -> FaithSnapshot {
        FaithSnapshot {
            current: self.current,
            config: self.config,
        }
    }

    pub fn restore(&mut self, snapshot: &FaithSnapshot) {
        self.config = snapshot.config.normalized();
        self.current = snapshot.current.clamp(self.config.min, self.config.max);
    }

    fn set(&mut self, value: i32) -> Vec<FaithEvent> {
        let previous = self.current;
        let current = value.clamp(self.config.min, self.config.max);
        if current == previous {
            return Vec::new();
        }
        self.current = current;

        let mut events = vec![FaithEvent::Changed { previous, current }];
        if current > previous {
            events.push(FaithEvent::Gained(current - previous));
        } else {
            events.push(FaithEvent::Lost(previous - current));
        }
        if crossed_up(previous, current, self.config.target) {
            events.push(FaithEvent::TargetReached);
        }
        if crossed_down(previous, current, self.config.floor) {
            events.push(FaithEvent::Depleted);
        }
        events
    }
}
