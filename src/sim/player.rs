use bitflags::bitflags;
use glam::DVec2;

use crate::defs::{
    FOV, NEAR_CLIPPING_PLANE, PLAYER_SIZE, PLAYER_SPEED, PLAYER_TURN_SPEED,
};
use crate::world::Scene;

bitflags! {
    /// Held movement keys, sampled by the host once per frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InputState: u8 {
        const FORWARD    = 1 << 0;
        const BACKWARD   = 1 << 1;
        const TURN_LEFT  = 1 << 2;
        const TURN_RIGHT = 1 << 3;
    }
}

/// First-person viewpoint and its motion state.
///
/// `fov_left` / `fov_right` are the world-space endpoints of the
/// near-clip segment, refreshed at the end of every update so the
/// render passes can interpolate across them directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: DVec2,
    pub direction: f64,
    pub velocity: DVec2,
    pub fov_left: DVec2,
    pub fov_right: DVec2,
    pub input: InputState,
}

impl Player {
    pub fn new(position: DVec2, direction: f64) -> Self {
        let mut player = Self {
            position,
            direction,
            velocity: DVec2::ZERO,
            fov_left: DVec2::ZERO,
            fov_right: DVec2::ZERO,
            input: InputState::empty(),
        };
        player.update_fov();
        player
    }

    /// One kinematics step: turn, integrate velocity, move one axis at
    /// a time so a blocked axis still lets the other one slide.
    pub fn update(&mut self, scene: &Scene, dt: f64) {
        let mut angular = 0.0;
        if self.input.contains(InputState::TURN_RIGHT) {
            angular += PLAYER_TURN_SPEED;
        }
        if self.input.contains(InputState::TURN_LEFT) {
            angular -= PLAYER_TURN_SPEED;
        }
        self.direction += angular * dt;

        let dir = DVec2::from_angle(self.direction);
        self.velocity = DVec2::ZERO;
        if self.input.contains(InputState::FORWARD) {
            self.velocity += dir * PLAYER_SPEED;
        }
        if self.input.contains(InputState::BACKWARD) {
            self.velocity -= dir * PLAYER_SPEED;
        }

        let size = DVec2::splat(PLAYER_SIZE);
        let nx = self.position.x + self.velocity.x * dt;
        if scene.can_rectangle_fit(DVec2::new(nx, self.position.y), size) {
            self.position.x = nx;
        }
        let ny = self.position.y + self.velocity.y * dt;
        if scene.can_rectangle_fit(DVec2::new(self.position.x, ny), size) {
            self.position.y = ny;
        }

        self.update_fov();
    }

    fn update_fov(&mut self) {
        let half_fov = FOV * 0.5;
        let fov_len = NEAR_CLIPPING_PLANE / half_fov.cos();
        self.fov_left = self.position + polar(self.direction - half_fov, fov_len);
        self.fov_right = self.position + polar(self.direction + half_fov, fov_len);
    }
}

/// `(cos θ, sin θ) * len`.
#[inline]
fn polar(angle: f64, len: f64) -> DVec2 {
    DVec2::from_angle(angle) * len
}
