// src/engine_lib/player.rs

use glam::{vec2, Vec2};

/// Viewer pose in world pixels. Rotation 0 looks along +x and grows toward
/// +y (down-screen on the map grid), in degrees so turning math stays in the
/// units the tuning constants use.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub position: Vec2,
    pub rotation_deg: f32,
    /// Eye height above the floor in wall-space units; raises or lowers the
    /// horizon the raycaster projects around.
    pub eye_height: f32,
}

impl Player {
    pub fn new(position: Vec2, rotation_deg: f32, eye_height: f32) -> Self {
        let mut player = Self {
            position,
            rotation_deg: 0.0,
            eye_height,
        };
        player.turn(rotation_deg);
        player
    }

    /// Unit view direction for the current rotation.
    pub fn direction(&self) -> Vec2 {
        let r = self.rotation_deg.to_radians();
        vec2(r.cos(), r.sin())
    }

    /// Turn by `delta_deg`, keeping rotation wrapped to [0, 360).
    pub fn turn(&mut self, delta_deg: f32) {
        let raw = self.rotation_deg + delta_deg;
        self.rotation_deg = raw.rem_euclid(360.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_both_ways() {
        let mut p = Player::new(vec2(0.0, 0.0), 350.0, 32.0);
        p.turn(20.0);
        assert!((p.rotation_deg - 10.0).abs() < 1e-4);
        p.turn(-30.0);
        assert!((p.rotation_deg - 340.0).abs() < 1e-4);
    }

    #[test]
    fn direction_is_unit_length() {
        let p = Player::new(vec2(0.0, 0.0), 123.0, 32.0);
        assert!((p.direction().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rotation_zero_looks_along_x() {
        let p = Player::new(vec2(0.0, 0.0), 0.0, 32.0);
        assert!((p.direction() - vec2(1.0, 0.0)).length() < 1e-6);
    }
}
