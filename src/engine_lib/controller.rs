// src/engine_lib/controller.rs

use glam::{vec2, Vec2};
use winit::{
    event::{ElementState, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::engine_lib::map::Map;
use crate::engine_lib::player::Player;
use crate::engine_lib::raycaster::TILE_SIZE;

/// Keyboard state for the demo: W/S walk, A/D strafe, arrows turn. Intents
/// are accumulated from events and applied once per frame with dt scaling.
pub struct PlayerController {
    /// x: strafe intent (-1..1), y: forward intent (-1..1).
    move_intent: Vec2,
    turn_intent: f32,
    pub move_speed: f32,
    pub turn_speed_deg: f32,
}

impl PlayerController {
    pub fn new(move_speed: f32, turn_speed_deg: f32) -> Self {
        Self {
            move_intent: Vec2::ZERO,
            turn_intent: 0.0,
            move_speed,
            turn_speed_deg,
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let pressed = key_event.state == ElementState::Pressed;
                let axis = if pressed { 1.0 } else { 0.0 };
                match key_event.physical_key {
                    PhysicalKey::Code(KeyCode::KeyW) => { self.move_intent.y = axis; true }
                    PhysicalKey::Code(KeyCode::KeyS) => { self.move_intent.y = -axis; true }
                    PhysicalKey::Code(KeyCode::KeyD) => { self.move_intent.x = axis; true }
                    PhysicalKey::Code(KeyCode::KeyA) => { self.move_intent.x = -axis; true }
                    PhysicalKey::Code(KeyCode::ArrowRight) => { self.turn_intent = axis; true }
                    PhysicalKey::Code(KeyCode::ArrowLeft) => { self.turn_intent = -axis; true }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    pub fn apply_to_player(&mut self, player: &mut Player, map: &Map, dt: f32) {
        player.turn(self.turn_intent * self.turn_speed_deg * dt);

        let forward = player.direction();
        // +90 degrees in the y-down map plane: the viewer's right hand.
        let right = vec2(-forward.y, forward.x);
        let step =
            (forward * self.move_intent.y + right * self.move_intent.x) * self.move_speed * dt;

        // Axis-separated collision so walls stop only the blocked component
        // and the player slides along them.
        let mut next = player.position;
        if !Self::blocked(map, vec2(next.x + step.x, next.y)) {
            next.x += step.x;
        }
        if !Self::blocked(map, vec2(next.x, next.y + step.y)) {
            next.y += step.y;
        }
        player.position = next;
    }

    fn blocked(map: &Map, pos: Vec2) -> bool {
        let col = (pos.x / TILE_SIZE).floor() as i32;
        let row = (pos.y / TILE_SIZE).floor() as i32;
        map.is_wall(row, col)
    }
}
