use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{crossed_down, crossed_up};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    pub max: i32,
    pub initial: i32,
    /// Seconds during which damage is ignored after a hit.
    pub invulnerability: f32,
    pub auto_recovery: bool,
    pub recovery_interval: f32,
    pub recovery_amount: i32,
}

impl HealthConfig {
    /// Floors `max` and the timers at zero. NaN timers become zero.
    pub fn normalized(self) -> Self {
        Self {
            max: self.max.max(0),
            invulnerability: self.invulnerability.max(0.0),
            recovery_interval: self.recovery_interval.max(0.0),
            ..self
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max: 5,
            initial: 5,
            invulnerability: 1.0,
            auto_recovery: false,
            recovery_interval: 30.0,
            recovery_amount: 1,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthEvent {
    Changed { previous: i32, current: i32 },
    Lost(i32),
    Recovered(i32),
    Zero,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub current: i32,
    pub config: HealthConfig,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Health {
    config: HealthConfig,
    current: i32,
    invulnerable_for: f32,
    recovery_elapsed: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(HealthConfig::default())
    }
}

impl Health {
    pub fn new(config: HealthConfig) -> Self {
        let config = config.normalized();
        Self {
            current: config.initial.clamp(0, config.max),
            config,
            invulnerable_for: 0.0,
            recovery_elapsed: 0.0,
        }
    }

    pub const fn config(&self) -> &HealthConfig {
        &self.config
    }

    pub const fn current(&self) -> i32 {
        self.current
    }

    pub fn fraction(&self) -> f32 {
        if self.config.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.config.max as f32
    }

    pub const fn is_zero(&self) -> bool {
        self.current <= 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }

    /// Heals. Non-positive amounts are ignored.
    pub fn add(&mut self, amount: i32) -> Vec<HealthEvent> {
        if amount <= 0 {
            return Vec::new();
        }
        self.set(self.current.saturating_add(amount))
    }

    /// Damages, unless still invulnerable from the last hit.
    pub fn subtract(&mut self, amount: i32) -> Vec<HealthEvent> {
        if amount <= 0 || self.is_invulnerable() {
            return Vec::new();
        }
        let events = self.set(self.current.saturating_sub(amount));
        if !events.is_empty() {
            self.invulnerable_for = self.config.invulnerability;
        }
        events
    }

    /// Runs down invulnerability and, if enabled, regenerates.
    pub fn tick(&mut self, delta_secs: f32) -> Vec<HealthEvent> {
        self.invulnerable_for = (self.invulnerable_for - delta_secs).max(0.0);

        if !self.config.auto_recovery || self.is_zero() || self.current >= self.config.max {
            self.recovery_elapsed = 0.0;
            return Vec::new();
        }

        self.recovery_elapsed += delta_secs;
        if self.recovery_elapsed < self.config.recovery_interval {
            return Vec::new();
        }
        self.recovery_elapsed -= self.config.recovery_interval;
        self.add(self.config.recovery_amount)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub const fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            current: self.current,
            config: self.config,
        }
    }

    pub fn restore(&mut self, snapshot: &HealthSnapshot) {
        self.config = snapshot.config.normalized();
        self.current = snapshot.current.clamp(0, self.config.max);
        self.invulnerable_for = 0.0;
        self.recovery_elapsed = 0.0;
    }

    fn set(&mut self, value: i32) -> Vec<HealthEvent> {
        let previous = self.current;
        let current = value.clamp(0, self.config.max);
        if current == previous {
            return Vec::new();
        }
        self.current = current;

        let mut events = vec![HealthEvent::Changed { previous, current }];
        if current < previous {
            events.push(HealthEvent::Lost(previous - current));
        } else {
            events.push(HealthEvent::Recovered(current - previous));
        }
        if crossed_down(previous, current, 0) {
            events.push(HealthEvent::Zero);
        }
        if crossed_up(previous, current, self.config.max) {
            events.push(HealthEvent::Full);
        }
        events
    }
}
