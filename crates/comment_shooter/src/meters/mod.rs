//! Faith, health and inflammation, plus the step that feeds comment outcomes into them.
//!
//! Each meter is a plain struct whose mutators return the events they caused.
//! The systems here forward those to Bevy events.

pub mod faith;
pub mod health;
pub mod inflammation;

use bevy::prelude::*;

use crate::comment::CommentSettings;
use crate::comment::behavior::{BehaviorContext, behavior};
use crate::effects::{Confusion, FxSignal};
use crate::events::CommentEvent;
use faith::{Faith, FaithEvent, FaithRewards};
use health::{Health, HealthEvent};
use inflammation::{Inflammation, InflammationEvent};

/// `previous` below `level`, `current` at or above it.
pub(crate) fn crossed_up<T: PartialOrd>(previous: T, current: T, level: T) -> bool {
    previous < level && current >= level
}

/// `previous` above `level`, `current` at or below it.
pub(crate) fn crossed_down<T: PartialOrd>(previous: T, current: T, level: T) -> bool {
    previous > level && current <= level
}

pub(crate) fn apply_comment_effects(
    mut comment_events: EventReader<CommentEvent>,
    rewards: Res<FaithRewards>,
    settings: Res<CommentSettings>,
    mut faith: ResMut<Faith>,
    mut health: ResMut<Health>,
    mut inflammation: ResMut<Inflammation>,
    mut confusion: ResMut<Confusion>,
    mut faith_events: EventWriter<FaithEvent>,
    mut health_events: EventWriter<HealthEvent>,
    mut inflammation_events: EventWriter<InflammationEvent>,
    mut fx: EventWriter<FxSignal>,
) {
    for event in comment_events.read() {
        let context = BehaviorContext {
            rewards: &rewards,
            settings: &settings,
            amount: event.amount,
            processed: event.processed,
        };
        let effects = behavior(event.kind).effects(event.signal, &context);

        let faith_before = faith.current();
        faith_events.send_batch(faith.apply(effects.faith));
        let faith_delta = faith.current() - faith_before;

        if effects.inflammation > 0.0 {
            inflammation_events.send_batch(inflammation.add(effects.inflammation));
        }
        if effects.health_damage > 0 {
            health_events.send_batch(health.subtract(effects.health_damage));
        }
        if let Some(duration) = effects.confusion {
            confusion.apply(duration);
            debug!("Confused for {duration:.1}s");
        }
        if let Some(kind) = effects.fx {
            fx.send(FxSignal {
                kind,
                position: event.position,
                faith_delta,
            });
        }

        debug!(
            "{} {}: faith {faith_before} -> {}",
            event.kind,
            event.signal,
            faith.current()
        );
    }
}

pub(crate) fn tick_meters(
    time: Res<Time>,
    mut health: ResMut<Health>,
    mut inflammation: ResMut<Inflammation>,
    mut health_events: EventWriter<HealthEvent>,
    mut inflammation_events: EventWriter<InflammationEvent>,
) {
    let delta_secs = time.delta_secs();
    health_events.send_batch(health.tick(delta_secs));
    inflammation_events.send_batch(inflammation.tick(delta_secs));
}
