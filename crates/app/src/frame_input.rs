//! Keyboard input collection for one rendered frame.

use app::app_loop::FrameKeys;
use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

const TRACKED_KEYS: [KeyCode; 16] = [
    KeyCode::Up,
    KeyCode::Left,
    KeyCode::Down,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::B,
    KeyCode::Space,
    KeyCode::LeftShift,
    KeyCode::RightShift,
    KeyCode::R,
    KeyCode::N,
    KeyCode::M,
    KeyCode::Escape,
];

pub fn capture_frame_input() -> FrameKeys {
    let mut keys = FrameKeys::default();
    for key in TRACKED_KEYS {
        if is_key_pressed(key) {
            keys.pressed.push(key);
        }
        if is_key_down(key) {
            keys.held.push(key);
        }
    }
    keys
}
