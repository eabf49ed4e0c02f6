use core::time::Duration;

use bevy::prelude::*;

const RISE_DISTANCE: f32 = 40.0;

#[derive(Component)]
pub struct FloatingText {
    timer: Timer,
    origin: Vec2,
}

/// Spawns a short-lived world-space label that rises and shrinks away.
pub fn spawn_floating_text(commands: &mut Commands, position: Vec2, text: &str, color: Color) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(color),
        Transform::from_translation(position.extend(10.0)),
        FloatingText {
            timer: Timer::new(Duration::from_millis(900), TimerMode::Once),
            origin: position,
        },
    ));
}

pub fn animate_floating_text(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut FloatingText)>,
) {
    for (entity, mut transform, mut floating) in &mut query {
        floating.timer.tick(time.delta());
        let progress = floating.timer.fraction();

        transform.translation.y = RISE_DISTANCE.mul_add(progress, floating.origin.y);
        transform.scale = Vec3::splat(1.0 - progress * 0.5);

        if floating.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}

pub struct FloatingTextPlugin;

impl Plugin for FloatingTextPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, animate_floating_text);
    }
}
