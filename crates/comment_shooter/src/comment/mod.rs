//! A single comment and its interaction state machine.
//!
//! `Comment` never touches the world. Every operation returns the signals it
//! produced and the systems in this crate turn those into [`CommentEvent`]s.
//!
//! [`CommentEvent`]: crate::events::CommentEvent

pub mod behavior;
pub mod superchat;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::config::{CONFUSION_JITTER, CONFUSION_SHAKE, TROLL_TAP_DISTANCE};
use crate::events::CommentEvent;
use crate::spawner::pool::ActiveComment;
use superchat::{SuperChatTier, parse_amount};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumCount,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum CommentKind {
    Holy,
    Ohoe,
    Troll,
    SuperChat,
}

/// One value per comment kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerKind<T> {
    pub holy: T,
    pub ohoe: T,
    pub troll: T,
    pub super_chat: T,
}

impl<T> PerKind<T> {
    pub const fn get(&self, kind: CommentKind) -> &T {
        match kind {
            CommentKind::Holy => &self.holy,
            CommentKind::Ohoe => &self.ohoe,
            CommentKind::Troll => &self.troll,
            CommentKind::SuperChat => &self.super_chat,
        }
    }

    pub fn get_mut(&mut self, kind: CommentKind) -> &mut T {
        match kind {
            CommentKind::Holy => &mut self.holy,
            CommentKind::Ohoe => &mut self.ohoe,
            CommentKind::Troll => &mut self.troll,
            CommentKind::SuperChat => &mut self.super_chat,
        }
    }

    /// In the fixed order Holy, Ohoe, Troll, SuperChat.
    pub fn iter(&self) -> impl Iterator<Item = (CommentKind, &T)> {
        CommentKind::iter().map(move |kind| (kind, self.get(kind)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum CommentState {
    #[default]
    Normal,
    Moving,
    Cracked,
    Destroyed,
}

/// What a comment reports back after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CommentSignal {
    /// Took non-lethal damage.
    Damaged,
    /// Success behaviour ran. Fired at most once per lifetime.
    Processed,
    /// Health reached zero.
    Destroyed,
    /// Crossed the left bound, or a troll crack expired with no health left.
    Missed,
    /// Finished lingering after being processed.
    Retired,
    /// A troll crack expired and health was restored.
    CrackReverted,
}

impl CommentSignal {
    /// Signals after which the comment belongs back in the pool.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Destroyed | Self::Missed | Self::Retired)
    }
}

/// Per-type tuning shared by every comment.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CommentSettings {
    pub holy_auto_process_delay: f32,
    pub super_chat_auto_process_delay: f32,
    pub super_chat_default_amount: u32,
    pub ohoe_confusion_duration: f32,
    /// Camera shake amplitude while confusion is active, in world units.
    pub confusion_shake: f32,
    /// Maximum tap offset while confusion is active, in world units.
    pub confusion_jitter: f32,
    pub troll_max_health: u32,
    pub troll_double_tap_window: f32,
    pub troll_double_tap_distance: f32,
    pub troll_inflammation: f32,
    pub troll_miss_damage: i32,
}

impl Default for CommentSettings {
    fn default() -> Self {
        Self {
            holy_auto_process_delay: 0.5,
            super_chat_auto_process_delay: 0.3,
            super_chat_default_amount: 100,
            ohoe_confusion_duration: 2.0,
            confusion_shake: CONFUSION_SHAKE,
            confusion_jitter: CONFUSION_JITTER,
            troll_max_health: 2,
            troll_double_tap_window: 0.5,
            troll_double_tap_distance: TROLL_TAP_DISTANCE,
            troll_inflammation: 25.0,
            troll_miss_damage: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleTapRule {
    pub window: f32,
    pub max_distance: f32,
}

/// The parameters a comment needs from [`CommentSettings`], resolved for its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindRules {
    pub max_health: u32,
    pub auto_process_delay: Option<f32>,
    pub linger: f32,
    pub damageable: bool,
    pub double_tap: Option<DoubleTapRule>,
}

impl CommentSettings {
    pub fn rules(&self, kind: CommentKind) -> KindRules {
        match kind {
            CommentKind::Holy => KindRules {
                max_health: 1,
                auto_process_delay: Some(self.holy_auto_process_delay),
                linger: 0.0,
                damageable: false,
                double_tap: None,
            },
            CommentKind::Ohoe => KindRules {
                max_health: 1,
                auto_process_delay: None,
                linger: self.ohoe_confusion_duration,
                damageable: true,
                double_tap: None,
            },
            CommentKind::Troll => KindRules {
                max_health: self.troll_max_health.max(1),
                auto_process_delay: None,
                linger: 0.0,
                damageable: true,
                double_tap: Some(DoubleTapRule {
                    window: self.troll_double_tap_window,
                    max_distance: self.troll_double_tap_distance,
                }),
            },
            CommentKind::SuperChat => KindRules {
                max_health: 1,
                auto_process_delay: Some(self.super_chat_auto_process_delay),
                linger: 0.0,
                damageable: false,
                double_tap: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Crack {
    elapsed: f32,
    origin: Vec2,
}

#[derive(Component, Debug, Clone)]
pub struct Comment {
    kind: CommentKind,
    text: String,
    state: CommentState,
    health: u32,
    rules: KindRules,
    auto_process_in: Option<f32>,
    crack: Option<Crack>,
    linger_for: Option<f32>,
    processed: bool,
    released: bool,
    amount: Option<u32>,
}

impl Comment {
    pub fn new(kind: CommentKind, text: impl Into<String>, settings: &CommentSettings) -> Self {
        let text = text.into();
        let rules = settings.rules(kind);
        let amount = (kind == CommentKind::SuperChat)
            .then(|| parse_amount(&text).unwrap_or(settings.super_chat_default_amount));

        Self {
            kind,
            text,
            state: CommentState::Normal,
            health: rules.max_health,
            rules,
            auto_process_in: rules.auto_process_delay,
            crack: None,
            linger_for: None,
            processed: false,
            released: false,
            amount,
        }
    }

    pub const fn kind(&self) -> CommentKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn state(&self) -> CommentState {
        self.state
    }

    pub const fn health(&self) -> u32 {
        self.health
    }

    pub const fn max_health(&self) -> u32 {
        self.rules.max_health
    }

    pub const fn is_processed(&self) -> bool {
        self.processed
    }

    /// True once a terminal signal fired. Every operation is a no-op afterwards.
    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Lingering after processing, still on screen but done.
    pub const fn is_lingering(&self) -> bool {
        self.linger_for.is_some()
    }

    /// Whether a tap can still change this comment.
    pub fn is_interactive(&self) -> bool {
        !self.released && !self.processed && self.state != CommentState::Destroyed
    }

    /// Super chat amount, `None` for other kinds.
    pub const fn amount(&self) -> Option<u32> {
        self.amount
    }

    pub fn tier(&self) -> Option<SuperChatTier> {
        self.amount.map(SuperChatTier::from_amount)
    }

    /// Seconds left to land the second troll tap.
    pub fn remaining_double_tap_time(&self) -> Option<f32> {
        let rule = self.rules.double_tap?;
        self.crack.map(|crack| (rule.window - crack.elapsed).max(0.0))
    }

    /// Taps registered in the current troll sequence.
    pub fn tap_count(&self) -> u8 {
        u8::from(self.crack.is_some())
    }

    /// `Normal` becomes `Moving`. Returns whether movement is allowed.
    pub fn start_moving(&mut self) -> bool {
        if self.released {
            return false;
        }
        if self.state == CommentState::Normal {
            self.state = CommentState::Moving;
        }
        self.state == CommentState::Moving
    }

    pub fn take_damage(&mut self, amount: u32) -> Vec<CommentSignal> {
        if !self.is_interactive() || !self.rules.damageable || amount == 0 {
            return Vec::new();
        }

        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.crack = None;
            return vec![self.finish(CommentSignal::Destroyed)];
        }

        self.state = CommentState::Cracked;
        vec![CommentSignal::Damaged]
    }

    /// Runs the success path once. Kinds with no linger time retire right away.
    pub fn process(&mut self) -> Vec<CommentSignal> {
        if !self.is_interactive() {
            return Vec::new();
        }

        self.mark_processed();
        let mut signals = vec![CommentSignal::Processed];
        if self.rules.linger > 0.0 {
            self.linger_for = Some(self.rules.linger);
        } else {
            signals.push(self.finish(CommentSignal::Retired));
        }
        signals
    }

    /// Left the screen. A processed comment leaves quietly.
    pub fn miss(&mut self) -> Vec<CommentSignal> {
        if self.released {
            return Vec::new();
        }
        if self.processed {
            return vec![self.finish(CommentSignal::Retired)];
        }
        vec![self.finish(CommentSignal::Missed)]
    }

    /// A single tap at `position` in world space.
    pub fn tap(&mut self, position: Vec2) -> Vec<CommentSignal> {
        if !self.is_interactive() {
            return Vec::new();
        }

        match self.kind {
            // Holy and super chats also resolve on their own if left alone.
            CommentKind::Holy | CommentKind::Ohoe | CommentKind::SuperChat => self.process(),
            CommentKind::Troll => self.troll_tap(position),
        }
    }

    /// A disambiguated double tap. Only trolls treat it differently from a tap.
    pub fn double_tap(&mut self, position: Vec2) -> Vec<CommentSignal> {
        let mut signals = self.tap(position);
        if self.kind == CommentKind::Troll {
            signals.extend(self.tap(position));
        }
        signals
    }

    /// Advances auto-process, crack and linger countdowns.
    pub fn tick(&mut self, delta_secs: f32) -> Vec<CommentSignal> {
        let mut signals = Vec::new();
        if self.released {
            return signals;
        }

        if let Some(remaining) = self.auto_process_in.as_mut() {
            *remaining -= delta_secs;
            if *remaining <= 0.0 {
                self.auto_process_in = None;
                signals.extend(self.process());
            }
        }

        if let (Some(crack), Some(rule)) = (self.crack.as_mut(), self.rules.double_tap) {
            crack.elapsed += delta_secs;
            if crack.elapsed > rule.window {
                signals.extend(self.expire_crack());
            }
        }

        if let Some(remaining) = self.linger_for.as_mut() {
            *remaining -= delta_secs;
            if *remaining <= 0.0 {
                signals.push(self.finish(CommentSignal::Retired));
            }
        }

        signals
    }

    fn troll_tap(&mut self, position: Vec2) -> Vec<CommentSignal> {
        let Some(rule) = self.rules.double_tap else {
            return self.process();
        };

        let Some(crack) = self.crack else {
            self.crack = Some(Crack {
                elapsed: 0.0,
                origin: position,
            });
            return self.take_damage(1);
        };

        if crack.elapsed <= rule.window && crack.origin.distance(position) <= rule.max_distance {
            self.crack = None;
            self.health = 0;
            self.mark_processed();
            return vec![
                CommentSignal::Processed,
                self.finish(CommentSignal::Destroyed),
            ];
        }

        self.expire_crack()
    }

    fn expire_crack(&mut self) -> Vec<CommentSignal> {
        self.crack = None;
        if self.health == 0 {
            return self.miss();
        }

        self.health = self.rules.max_health;
        self.state = CommentState::Normal;
        vec![CommentSignal::CrackReverted]
    }

    const fn mark_processed(&mut self) {
        self.processed = true;
        self.auto_process_in = None;
    }

    fn finish(&mut self, signal: CommentSignal) -> CommentSignal {
        self.state = CommentState::Destroyed;
        self.released = true;
        self.crack = None;
        self.auto_process_in = None;
        self.linger_for = None;
        signal
    }
}

/// Advances every active comment's countdowns.
pub(crate) fn tick_comments(
    time: Res<Time>,
    mut comments: Query<(Entity, &mut Comment, &Transform), With<ActiveComment>>,
    mut events: EventWriter<CommentEvent>,
) {
    let delta_secs = time.delta_secs();

    for (entity, mut comment, transform) in &mut comments {
        for signal in comment.tick(delta_secs) {
            debug!("{} {signal} on its own", comment.kind());
            events.send(CommentEvent::new(
                entity,
                &comment,
                signal,
                transform.translation.truncate(),
            ));
        }
    }
}
