//! Player clip tables and pose selection.
//!
//! The sheet coordinates mirror the player atlas layout row by row; the
//! left-facing rows run in reverse column order so the cycle reads the same
//! when mirrored.

use super::frame_index;
use crate::geometry::Rect;
use crate::sim::motion::Facing;

/// Ticks per step for the idle/run/jump/power cycles.
pub const FRAME_DIVISOR: u8 = 10;
/// The attack cycle steps three times slower than the run cycle.
pub const ATTACK_DIVISOR: u8 = 30;
/// The hurt cycle steps twice slower than the run cycle.
pub const HURT_DIVISOR: u8 = 20;

/// Length of the master animation counter; everything wraps inside it.
pub const MASTER_CYCLE: u8 = 40;
/// The tick of the master cycle on which an attack resolves and the
/// projectile leaves the hand.
pub const ATTACK_LATCH_TICK: u8 = 25;

const COLS: [i16; 4] = [0, 120, 240, 360];
const W: i16 = 115;
const H: i16 = 120;

const fn clip_at(x: i16, y: i16, w: i16, h: i16) -> Rect {
    Rect::from_parts(x, y, w, h)
}

const IDLE_RIGHT: [Rect; 4] = [
    clip_at(COLS[0], 0, W, H),
    clip_at(COLS[1], 0, W, H),
    clip_at(COLS[2], 0, W, H),
    clip_at(COLS[3], 0, W, H),
];
const IDLE_LEFT: [Rect; 4] = [
    clip_at(COLS[3], 117, W, H),
    clip_at(COLS[2], 117, W, H),
    clip_at(COLS[1], 117, W, H),
    clip_at(COLS[0], 117, W, H),
];
const RUN_RIGHT: [Rect; 4] = [
    clip_at(COLS[0], 234, W, H),
    clip_at(COLS[1], 234, W, H),
    clip_at(COLS[2], 234, W, H),
    clip_at(COLS[3], 234, W, H),
];
const RUN_LEFT: [Rect; 4] = [
    clip_at(COLS[3], 351, W, H),
    clip_at(COLS[2], 351, W, H),
    clip_at(COLS[1], 351, W, H),
    clip_at(COLS[0], 351, W, H),
];
const JUMP_RIGHT: [Rect; 4] = [
    clip_at(COLS[0], 470, W, H),
    clip_at(COLS[1], 470, W, H),
    clip_at(COLS[2], 470, W, H),
    clip_at(COLS[3], 470, W, H),
];
const JUMP_LEFT: [Rect; 4] = [
    clip_at(COLS[3], 590, W, H),
    clip_at(COLS[2], 590, W, H),
    clip_at(COLS[1], 590, W, H),
    clip_at(COLS[0], 590, W, H),
];
const POWER_RIGHT: [Rect; 4] = [
    clip_at(120, 712, W, H),
    clip_at(240, 712, W, H),
    clip_at(360, 712, W, H),
    clip_at(480, 712, W, H),
];
const POWER_LEFT: [Rect; 4] = [
    clip_at(482, 834, W, H),
    clip_at(362, 834, W, H),
    clip_at(242, 834, W, H),
    clip_at(122, 834, W, H),
];
const HURT_RIGHT: [Rect; 3] = [
    clip_at(0, 1192, 60, 123),
    clip_at(122, 1192, 60, 123),
    clip_at(244, 1192, 60, 123),
];
const HURT_LEFT: [Rect; 3] = [
    clip_at(244, 1316, 60, 123),
    clip_at(122, 1316, 60, 123),
    clip_at(0, 1316, 60, 123),
];
const ATTACK_RIGHT: [Rect; 2] = [clip_at(10, 965, 112, 100), clip_at(227, 1009, 74, 59)];
const ATTACK_LEFT: [Rect; 2] = [clip_at(7, 1082, 112, 100), clip_at(228, 1115, 74, 59)];

/// The projectile is drawn with the release frame of the attack cycle.
pub fn blast_clip(facing: Facing) -> Rect {
    match facing {
        Facing::Right => ATTACK_RIGHT[1],
        Facing::Left => ATTACK_LEFT[1],
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pose {
    Idle,
    Run,
    Jump,
    Power,
    Attack,
    Hurt,
}

/// Resolve the pose for the current motion flags.
///
/// Priority, highest first:
/// ┌─────────────────────────────────────────────┐
/// │ hurt ▸ overrides everything                 │
/// │ attack ▸ grounded, unresolved attacks only  │
/// │ power  ▸ overrides run/jump while moving    │
/// │ jump   ▸ overrides run/idle while airborne  │
/// │ run/idle ▸ base pose                        │
/// └─────────────────────────────────────────────┘
pub fn pose(
    dead: bool,
    moving: bool,
    airborne: bool,
    powered: bool,
    attacking: bool,
) -> Pose {
    if dead {
        return Pose::Hurt;
    }
    if attacking && !airborne {
        return Pose::Attack;
    }
    if moving && powered {
        return Pose::Power;
    }
    if airborne {
        return Pose::Jump;
    }
    if moving {
        Pose::Run
    } else {
        Pose::Idle
    }
}

/// Look up the sheet rectangle for a pose at a given counter value.
pub fn clip(pose: Pose, facing: Facing, counter: u8) -> Rect {
    let right = matches!(facing, Facing::Right);
    match pose {
        Pose::Idle => {
            let i = frame_index(counter, FRAME_DIVISOR, 4);
            if right { IDLE_RIGHT[i] } else { IDLE_LEFT[i] }
        }
        Pose::Run => {
            let i = frame_index(counter, FRAME_DIVISOR, 4);
            if right { RUN_RIGHT[i] } else { RUN_LEFT[i] }
        }
        Pose::Jump => {
            let i = frame_index(counter, FRAME_DIVISOR, 4);
            if right { JUMP_RIGHT[i] } else { JUMP_LEFT[i] }
        }
        Pose::Power => {
            let i = frame_index(counter, FRAME_DIVISOR, 4);
            if right { POWER_RIGHT[i] } else { POWER_LEFT[i] }
        }
        Pose::Attack => {
            let i = frame_index(counter, ATTACK_DIVISOR, 2);
            if right { ATTACK_RIGHT[i] } else { ATTACK_LEFT[i] }
        }
        Pose::Hurt => {
            let i = frame_index(counter, HURT_DIVISOR, 3);
            if right { HURT_RIGHT[i] } else { HURT_LEFT[i] }
        }
    }
}

/// Mid-cycle reset budget for the active pose; `None` means the pose rides
/// the full master cycle. Checked against the counter before it increments.
pub fn cycle_budget(pose: Pose) -> Option<u8> {
    match pose {
        Pose::Jump | Pose::Attack => Some(25),
        Pose::Power => Some(28),
        _ => None,
    }
}
