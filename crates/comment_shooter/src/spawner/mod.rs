//! Spawn cadence, type selection and pool bookkeeping.

pub mod distribution;
pub mod pool;

use bevy::prelude::*;
use strum::{EnumCount, IntoEnumIterator};

use crate::comment::{Comment, CommentKind, CommentSettings};
use crate::config::{
    COMMENT_SIZE, MAX_ACTIVE_COMMENTS, MIN_SPAWN_INTERVAL, POOL_SIZE, SPAWN_BAND, SPAWN_INTERVAL,
    SPAWN_INTERVAL_VARIATION, SPAWN_OFFSET,
};
use crate::events::{CommentEvent, CommentSpawned};
use crate::hit_test::HitBox;
use crate::meters::inflammation::Inflammation;
use crate::mover::{CommentMover, MoverSettings, ViewportBounds};
use crate::rng::GameRng;
use distribution::Distribution;
use pool::{ActiveComment, CommentPool, PooledComment};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnSettings {
    pub interval: f32,
    pub interval_variation: f32,
    pub min_interval: f32,
    /// Spawn attempts are skipped while this many comments are active.
    pub max_active: usize,
    pub pool_size: usize,
    /// Distance right of the visible area where comments appear.
    pub spawn_offset: f32,
    /// Half height of the band spawn heights are drawn from.
    pub spawn_band: f32,
    pub hit_box: Vec2,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            interval: SPAWN_INTERVAL,
            interval_variation: SPAWN_INTERVAL_VARIATION,
            min_interval: MIN_SPAWN_INTERVAL,
            max_active: MAX_ACTIVE_COMMENTS,
            pool_size: POOL_SIZE,
            spawn_offset: SPAWN_OFFSET,
            spawn_band: SPAWN_BAND,
            hit_box: COMMENT_SIZE,
        }
    }
}

impl SpawnSettings {
    pub fn roll_interval(&self, rng: &mut GameRng) -> f32 {
        self.interval_variation
            .mul_add(rng.signed_unit(), self.interval)
            .max(self.min_interval)
    }

    /// Instances pre-allocated per kind when play starts.
    pub const fn initial_per_kind(&self) -> usize {
        self.pool_size / CommentKind::COUNT
    }

    pub fn spawn_position(&self, bounds: &ViewportBounds, rng: &mut GameRng) -> Vec2 {
        Vec2::new(
            bounds.right + self.spawn_offset,
            rng.range(-self.spawn_band, self.spawn_band),
        )
    }
}

/// Seconds until the next spawn attempt.
#[derive(Resource, Debug, Default, Clone)]
pub struct SpawnTimer {
    remaining: f32,
}

impl SpawnTimer {
    pub const fn new(remaining: f32) -> Self {
        Self { remaining }
    }

    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    /// True when the countdown ran out. The caller re-arms it.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        self.remaining -= delta_secs;
        self.remaining <= 0.0
    }
}

/// Puts a comment into play, reusing a pooled entity of the same kind if one
/// is free.
pub fn spawn_comment(
    commands: &mut Commands,
    pool: &mut CommentPool,
    comment: Comment,
    mover: CommentMover,
    position: Vec2,
    hit_box: Vec2,
) -> Entity {
    let kind = comment.kind();
    let in_play = (
        comment,
        mover,
        Transform::from_translation(position.extend(0.0)),
        Visibility::Visible,
        ActiveComment,
    );

    if let Some(entity) = pool.acquire(kind) {
        commands.entity(entity).insert(in_play);
        return entity;
    }

    let entity = commands
        .spawn((PooledComment { kind }, HitBox::new(hit_box), in_play))
        .id();
    pool.adopt(kind, entity);
    debug!("Pool for {kind} ran dry, allocated {entity}");
    entity
}

/// Tops every kind's free list up to its initial size.
pub fn prewarm_pool(commands: &mut Commands, pool: &mut CommentPool, settings: &SpawnSettings) {
    let per_kind = settings.initial_per_kind();

    for kind in CommentKind::iter() {
        for _ in pool.allocated(kind)..per_kind {
            let entity = commands
                .spawn((
                    PooledComment { kind },
                    HitBox::new(settings.hit_box),
                    Transform::default(),
                    Visibility::Hidden,
                ))
                .id();
            pool.stock(kind, entity);
        }
    }
}

/// Hands every active comment back to the pool.
pub fn clear_all(commands: &mut Commands, pool: &mut CommentPool) {
    for entity in pool.release_all() {
        retire_entity(commands, entity);
    }
}

fn retire_entity(commands: &mut Commands, entity: Entity) {
    if let Some(mut entity_commands) = commands.get_entity(entity) {
        entity_commands
            .remove::<ActiveComment>()
            .insert(Visibility::Hidden);
    }
}

pub(crate) fn tick_spawner(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<SpawnSettings>,
    mover_settings: Res<MoverSettings>,
    comment_settings: Res<CommentSettings>,
    distribution: Res<Distribution>,
    inflammation: Res<Inflammation>,
    bounds: Res<ViewportBounds>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<GameRng>,
    mut pool: ResMut<CommentPool>,
    mut spawned: EventWriter<CommentSpawned>,
) {
    if !timer.tick(time.delta_secs()) {
        return;
    }
    *timer = SpawnTimer::new(settings.roll_interval(&mut rng));

    if pool.active_count() >= settings.max_active {
        debug!("{} comments active, skipping spawn", pool.active_count());
        return;
    }

    let kind = distribution.pick_kind(rng.unit(), inflammation.spawn_multiplier());
    let text = distribution.pick_text(kind, &mut rng);
    let position = settings.spawn_position(&bounds, &mut rng);
    let speed = mover_settings.roll_speed(&mut rng);
    let mover = mover_settings.build(speed, position, &mut rng);
    let comment = Comment::new(kind, text, &comment_settings);

    let entity = spawn_comment(
        &mut commands,
        &mut pool,
        comment,
        mover,
        position,
        settings.hit_box,
    );
    debug!("Spawned {kind} {entity} at {position} moving {speed:.0}/s");
    spawned.send(CommentSpawned { entity, kind });
}

/// Returns comments to the pool on the tick they finish.
pub(crate) fn recycle_comments(
    mut commands: Commands,
    mut events: EventReader<CommentEvent>,
    mut pool: ResMut<CommentPool>,
) {
    for event in events.read() {
        if !event.signal.is_terminal() {
            continue;
        }
        if pool.release(event.entity).is_some() {
            debug!("Recycled {} {}", event.kind, event.entity);
            retire_entity(&mut commands, event.entity);
        }
    }
}
