//! Maps world-space taps to the comment under them.

use bevy::prelude::*;

use crate::comment::{Comment, CommentSettings};
use crate::config::TAP_RADIUS;
use crate::effects::Confusion;
use crate::events::{CommentEvent, EmptyAreaTapped, WorldTap};
use crate::rng::GameRng;
use crate::spawner::pool::ActiveComment;

/// Axis-aligned tap target centred on the entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    half_extents: Vec2,
}

impl HitBox {
    pub fn new(size: Vec2) -> Self {
        Self {
            half_extents: size.abs() / 2.0,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let offset = (point - center).abs();
        offset.x <= self.half_extents.x && offset.y <= self.half_extents.y
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HitTestSettings {
    /// Fallback search radius when no box contains the tap.
    pub tap_radius: f32,
}

impl Default for HitTestSettings {
    fn default() -> Self {
        Self {
            tap_radius: TAP_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HitCandidate {
    pub entity: Entity,
    pub center: Vec2,
    pub hit_box: HitBox,
}

fn nearest<'a>(candidates: impl Iterator<Item = &'a HitCandidate>, point: Vec2) -> Option<Entity> {
    candidates
        .min_by(|a, b| {
            a.center
                .distance_squared(point)
                .total_cmp(&b.center.distance_squared(point))
        })
        .map(|candidate| candidate.entity)
}

/// Containing boxes win, nearest centre first. Otherwise the nearest centre
/// within `radius`.
pub fn find_target(candidates: &[HitCandidate], point: Vec2, radius: f32) -> Option<Entity> {
    let inside = candidates
        .iter()
        .filter(|candidate| candidate.hit_box.contains(candidate.center, point));

    nearest(inside, point).or_else(|| {
        let near = candidates
            .iter()
            .filter(|candidate| candidate.center.distance(point) <= radius);
        nearest(near, point)
    })
}

pub(crate) fn route_taps(
    mut taps: EventReader<WorldTap>,
    settings: Res<HitTestSettings>,
    comment_settings: Res<CommentSettings>,
    confusion: Res<Confusion>,
    mut rng: ResMut<GameRng>,
    mut comments: Query<(Entity, &mut Comment, &Transform, &HitBox), With<ActiveComment>>,
    mut comment_events: EventWriter<CommentEvent>,
    mut empty_taps: EventWriter<EmptyAreaTapped>,
) {
    for &tap in taps.read() {
        let point = confusion.jitter(tap.position(), comment_settings.confusion_jitter, &mut rng);

        let candidates: Vec<HitCandidate> = comments
            .iter()
            .filter(|(_, comment, _, _)| comment.is_interactive())
            .map(|(entity, _, transform, &hit_box)| HitCandidate {
                entity,
                center: transform.translation.truncate(),
                hit_box,
            })
            .collect();

        let Some(target) = find_target(&candidates, point, settings.tap_radius) else {
            empty_taps.send(EmptyAreaTapped { position: point });
            continue;
        };

        // The target may have been recycled by an earlier tap this frame.
        let Ok((entity, mut comment, transform, _)) = comments.get_mut(target) else {
            continue;
        };

        let signals = match tap {
            WorldTap::Single(_) => comment.tap(point),
            WorldTap::Double(_) => comment.double_tap(point),
        };
        let position = transform.translation.truncate();
        for signal in signals {
            debug!("Tap on {} {entity}: {signal}", comment.kind());
            comment_events.send(CommentEvent::new(entity, &comment, signal, position));
        }
    }
}
