//! Shared kinematic state and the per-frame motion model.
//!
//! The jump is not a velocity integrator: an impulse counter starts at
//! [`JUMP_IMPULSE`] and decrements on a fixed schedule of rise frames,
//! giving the hand-tuned arc the game was built around. Falling is a plain
//! capped-acceleration drop reusing the same counter.

use crate::geometry::Point;
use crate::sim::{GRAVITY, GROUND_Y, LEVEL_WIDTH};

/// Initial value of the jump impulse counter.
pub const JUMP_IMPULSE: i16 = 6;
/// Rise frames on which the impulse counter loses one. The gaps widen, so
/// the ascent decelerates without ever looking like real gravity.
pub const RISE_CHECKPOINTS: [u8; 6] = [4, 6, 10, 18, 45, 50];

/// Walking speed, and the doubled speed while power mode is latched.
pub const BASE_SPEED: i16 = 3;
pub const POWER_SPEED: i16 = 6;

/// Crossing `LEVEL_WIDTH - RIGHT_EDGE_MARGIN` completes the level.
pub const RIGHT_EDGE_MARGIN: i16 = 150;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Plain kinematic/animation state shared by the player and the enemies.
/// Behavior lives in free functions; there are only two entity kinds and
/// neither needs dispatch.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Point,
    pub facing: Facing,
    pub speed: i16,
    pub moving: bool,
    pub grounded: bool,
    pub jumping: bool,
    pub dead: bool,
    /// Animation counter; wraps per state.
    pub frame: u8,
    /// Jump impulse while ascending, fall acceleration while dropping.
    pub impulse: i16,
    /// Frames since the current jump started.
    pub rise_frames: u8,
}

impl Body {
    pub fn at(position: Point, speed: i16) -> Self {
        Body {
            position,
            facing: Facing::Right,
            speed,
            moving: false,
            grounded: true,
            jumping: false,
            dead: false,
            frame: 0,
            impulse: 0,
            rise_frames: 0,
        }
    }
}

/// Start a jump. A no-op while airborne; the caller does not need to check.
pub fn begin_jump(body: &mut Body) {
    if body.grounded {
        body.jumping = true;
        body.grounded = false;
        body.impulse = JUMP_IMPULSE;
        body.rise_frames = 0;
    }
}

/// One frame of the vertical model: ascend on the impulse schedule, fall
/// under capped acceleration, snap to the ground line on landing.
pub fn step_vertical(body: &mut Body) {
    if body.jumping {
        body.rise_frames += 1;
        if RISE_CHECKPOINTS.contains(&body.rise_frames) {
            body.impulse -= 1;
        }
        if body.impulse <= 0 {
            body.jumping = false;
            body.impulse = 0;
            body.rise_frames = 0;
        }
        body.position.y -= body.impulse;
    }
    if !body.grounded && !body.jumping {
        if body.impulse < GRAVITY {
            body.impulse += 1;
        }
        body.position.y += body.impulse;
    }
    if body.position.y >= GROUND_Y {
        body.position.y = GROUND_Y;
        body.grounded = true;
        body.impulse = 0;
    }
}

/// One frame of horizontal motion. The left edge clamps by zeroing speed
/// for the frame; the right edge is only observed, never clamped, because
/// reaching it ends the level.
pub fn step_horizontal(body: &mut Body, powered: bool) {
    body.speed = if powered { POWER_SPEED } else { BASE_SPEED };
    if body.moving {
        match body.facing {
            Facing::Right => body.position.x += body.speed,
            Facing::Left => body.position.x -= body.speed,
        }
    }
    if body.position.x < 1 {
        body.speed = 0;
        body.position.x = 1;
    }
}

pub fn at_left_edge(body: &Body) -> bool {
    body.position.x <= 1
}

pub fn at_right_edge(body: &Body) -> bool {
    body.position.x >= LEVEL_WIDTH - RIGHT_EDGE_MARGIN
}
