//! Raw pointer sampling shared by mouse and touch.
//!
//! Every resource is optional so the same systems run in headless apps where
//! no input plugin or window exists; they just observe nothing.

use bevy::prelude::*;

/// Every pointer released this frame, mouse first, in screen space.
pub fn released_screen_positions(
    button_input: Option<&ButtonInput<MouseButton>>,
    touch_input: Option<&Touches>,
    windows: &Query<&Window>,
) -> Vec<Vec2> {
    let mut positions = Vec::new();

    if button_input.is_some_and(|buttons| buttons.just_released(MouseButton::Left)) {
        if let Some(cursor) = windows.get_single().ok().and_then(Window::cursor_position) {
            positions.push(cursor);
        }
    }

    if let Some(touches) = touch_input {
        positions.extend(touches.iter_just_released().map(|touch| touch.position()));
    }

    positions
}

/// Converts a screen position to world space through the first camera found.
///
/// Returns `None` when there is no camera or the position is outside its viewport.
pub fn screen_to_world(camera: &Query<(&Camera, &GlobalTransform)>, position: Vec2) -> Option<Vec2> {
    let (camera, camera_transform) = camera.iter().next()?;

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}
