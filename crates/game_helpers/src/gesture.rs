//! Single/double tap disambiguation.
//!
//! A release is held back for `window` seconds. A second release inside the
//! window and within `max_distance` of the first becomes a double tap; anything
//! else flushes the held tap as a single tap. Positions are in screen space.

use bevy::prelude::*;

use crate::input::released_screen_positions;

pub const DEFAULT_DOUBLE_TAP_WINDOW: f32 = 0.3;
pub const DEFAULT_DOUBLE_TAP_DISTANCE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tap {
    Single(Vec2),
    Double(Vec2),
}

impl Tap {
    pub const fn position(self) -> Vec2 {
        match self {
            Self::Single(position) | Self::Double(position) => position,
        }
    }
}

/// Emitted once per disambiguated tap.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TapEvent(pub Tap);

#[derive(Debug, Clone, Copy)]
struct HeldTap {
    position: Vec2,
    age: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct TapDetector {
    window: f32,
    max_distance: f32,
    held: Option<HeldTap>,
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_WINDOW, DEFAULT_DOUBLE_TAP_DISTANCE)
    }
}

impl TapDetector {
    pub const fn new(window: f32, max_distance: f32) -> Self {
        Self {
            window,
            max_distance,
            held: None,
        }
    }

    /// Feeds a pointer release.
    ///
    /// Returns a double tap when it pairs with the held release, or the
    /// previously held release as a single tap when it does not.
    pub fn release(&mut self, position: Vec2) -> Option<Tap> {
        match self.held.take() {
            Some(held)
                if held.age <= self.window
                    && held.position.distance(position) <= self.max_distance =>
            {
                Some(Tap::Double(position))
            }
            previous => {
                self.held = Some(HeldTap {
                    position,
                    age: 0.0,
                });
                previous.map(|held| Tap::Single(held.position))
            }
        }
    }

    /// Ages the held release and flushes it as a single tap once the window is over.
    pub fn advance(&mut self, delta_secs: f32) -> Option<Tap> {
        let held = self.held.as_mut()?;
        held.age += delta_secs;
        if held.age > self.window {
            return self.held.take().map(|held| Tap::Single(held.position));
        }
        None
    }

    pub const fn window(&self) -> f32 {
        self.window
    }

    pub const fn is_waiting(&self) -> bool {
        self.held.is_some()
    }

    /// Drops a held release without emitting it.
    pub const fn cancel(&mut self) {
        self.held = None;
    }
}

/// Runs after Bevy has processed raw input so `just_released` is current.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub struct GestureSet;

pub struct GesturePlugin;

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TapDetector>()
            .add_event::<TapEvent>()
            .configure_sets(PreUpdate, GestureSet.after(bevy::input::InputSystem))
            .add_systems(PreUpdate, detect_taps.in_set(GestureSet));
    }
}

fn detect_taps(
    time: Res<Time>,
    button_input: Option<Res<ButtonInput<MouseButton>>>,
    touch_input: Option<Res<Touches>>,
    windows: Query<&Window>,
    mut detector: ResMut<TapDetector>,
    mut taps: EventWriter<TapEvent>,
) {
    if let Some(tap) = detector.advance(time.delta_secs()) {
        taps.send(TapEvent(tap));
    }

    let released =
        released_screen_positions(button_input.as_deref(), touch_input.as_deref(), &windows);

    for position in released {
        if let Some(tap) = detector.release(position) {
            taps.send(TapEvent(tap));
        }
    }
}
