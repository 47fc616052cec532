//! The player: extended state on top of the shared motion model — attack,
//! power mode, the single projectile, and death.

use crate::geometry::{Point, Rect, Size};
use crate::sim::motion::{self, Body, Facing};
use crate::sim::{InputSnapshot, PLAYER_SPAWN};
use crate::sprite::player::{self as player_sprite, Pose, ATTACK_LATCH_TICK, MASTER_CYCLE};

/// Nominal sprite box; the rendered clip can be smaller.
pub const PLAYER_BOX: Size = Size { width: 115, height: 120 };

/// The hit-box is deliberately smaller than the sprite box: these insets
/// come off the width/height of whatever box is tested against an enemy.
pub const HIT_INSET_WIDTH: i16 = 65;
pub const HIT_INSET_HEIGHT: i16 = 16;

/// Projectile travel per frame and the range at which it expires.
pub const BLAST_STEP: i16 = 4;
pub const BLAST_RANGE: i16 = 600;
/// Vertical offset of the projectile below the player origin.
pub const BLAST_DROP: i16 = 45;
pub const BLAST_BOX: Size = Size { width: 74, height: 59 };

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// An attack animation is running.
    pub attacking: bool,
    /// The projectile is in flight; doubles as the "may not fire" latch.
    pub blast_in_flight: bool,
    /// Distance the projectile has travelled from the player.
    pub blast_offset: i16,
    /// Power mode latches on the first press and never releases.
    pub powered: bool,
    /// Sheet clip chosen for the current frame.
    pub clip: Rect,
}

impl Player {
    pub fn new() -> Self {
        let body = Body::at(PLAYER_SPAWN, motion::BASE_SPEED);
        let clip = player_sprite::clip(Pose::Idle, body.facing, 0);
        Player {
            body,
            attacking: false,
            blast_in_flight: false,
            blast_offset: 0,
            powered: false,
            clip,
        }
    }

    /// Apply one frame of input. `moving` is re-derived every call, so a
    /// released direction key stops the player on its own.
    pub fn handle_input(&mut self, input: &InputSnapshot) {
        self.body.moving = false;
        if input.jump && !self.body.jumping {
            motion::begin_jump(&mut self.body);
        }
        if input.left {
            self.body.facing = Facing::Left;
            self.body.moving = true;
        }
        if input.right {
            self.body.facing = Facing::Right;
            self.body.moving = true;
        }
        let airborne = self.body.jumping || !self.body.grounded;
        if input.attack && !self.attacking && !self.blast_in_flight && !airborne {
            self.attacking = true;
        }
        if input.power {
            self.powered = true;
        }
    }

    /// One simulation frame: motion, animation + attack latch, projectile.
    pub fn step(&mut self) {
        motion::step_vertical(&mut self.body);
        motion::step_horizontal(&mut self.body, self.powered);
        self.step_animation();
        if self.blast_in_flight {
            self.blast_offset += BLAST_STEP;
            if self.blast_offset > BLAST_RANGE {
                self.cancel_blast();
            }
        }
    }

    /// Advance the master animation counter. The active pose may reset the
    /// counter early (its cycle budget); on tick 25 of an attack cycle the
    /// projectile spawns; wrapping to zero ends the attack.
    fn step_animation(&mut self) {
        let airborne = self.body.jumping || !self.body.grounded;
        let pose = player_sprite::pose(
            self.body.dead,
            self.body.moving,
            airborne,
            self.powered,
            self.attacking && !self.blast_in_flight,
        );
        self.clip = player_sprite::clip(pose, self.body.facing, self.body.frame);

        if let Some(budget) = player_sprite::cycle_budget(pose) {
            if self.body.frame > budget {
                self.body.frame = 0;
            }
        }
        if pose == Pose::Attack && self.body.frame == ATTACK_LATCH_TICK {
            self.blast_in_flight = true;
            self.blast_offset = 0;
        }

        self.body.frame += 1;
        if self.body.frame >= MASTER_CYCLE {
            self.body.frame = 0;
        }
        if self.body.frame == 0 {
            self.attacking = false;
        }
    }

    /// Lethal collision: mark dead and let the hurt animation play. Motion
    /// is deliberately not halted.
    pub fn kill(&mut self) {
        self.body.dead = true;
    }

    pub fn is_dead(&self) -> bool {
        self.body.dead
    }

    pub fn at_left_edge(&self) -> bool {
        motion::at_left_edge(&self.body)
    }

    pub fn at_right_edge(&self) -> bool {
        motion::at_right_edge(&self.body)
    }

    /// Inset box used for enemy contact tests.
    pub fn hit_box(&self) -> Rect {
        Rect::new(self.body.position, PLAYER_BOX).inset(HIT_INSET_WIDTH, HIT_INSET_HEIGHT)
    }

    pub fn blast_position(&self) -> Point {
        let x = match self.body.facing {
            Facing::Right => self.body.position.x + self.blast_offset,
            Facing::Left => self.body.position.x - self.blast_offset,
        };
        Point {
            x,
            y: self.body.position.y + BLAST_DROP,
        }
    }

    /// Projectile box for enemy contact tests; runs through the same insets
    /// as the player box.
    pub fn blast_hit_box(&self) -> Rect {
        Rect::new(self.blast_position(), BLAST_BOX).inset(HIT_INSET_WIDTH, HIT_INSET_HEIGHT)
    }

    pub fn blast_clip(&self) -> Rect {
        player_sprite::blast_clip(self.body.facing)
    }

    pub fn cancel_blast(&mut self) {
        self.blast_in_flight = false;
        self.blast_offset = 0;
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}
