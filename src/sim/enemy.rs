//! The roaming enemy: walks left at a fixed speed until something kills it.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::sim::motion::{Body, Facing};
use crate::sprite;

/// Enemies move left two units per frame.
pub const ENEMY_SPEED: i16 = 2;

/// Collision box shared by both kinds, regardless of their sprite sizes.
pub const ENEMY_HIT_WIDTH: i16 = 47;
pub const ENEMY_HIT_HEIGHT: i16 = 62;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Dog,
    Mummy,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(position: Point, kind: EnemyKind) -> Self {
        let mut body = Body::at(position, ENEMY_SPEED);
        body.facing = Facing::Left;
        body.moving = true;
        Enemy { body, kind }
    }

    /// One simulation frame: march left and advance the animation counter.
    /// Dead enemies stay where they fell; only their death cycle plays on.
    pub fn step(&mut self) {
        if !self.body.dead {
            self.body.position.x -= self.body.speed;
        }
        self.body.frame += 1;
        if self.body.frame >= sprite::enemy::cycle(self.kind) {
            self.body.frame = 0;
        }
    }

    /// A single hit kills. Hitting a corpse changes nothing.
    pub fn on_hit(&mut self) {
        self.body.dead = true;
    }

    pub fn is_dead(&self) -> bool {
        self.body.dead
    }

    pub fn hit_box(&self) -> Rect {
        Rect::from_parts(
            self.body.position.x,
            self.body.position.y,
            ENEMY_HIT_WIDTH,
            ENEMY_HIT_HEIGHT,
        )
    }

    pub fn sprite_clip(&self) -> Rect {
        sprite::enemy::clip(self.kind, self.body.dead, self.body.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mummy() -> Enemy {
        Enemy::new(Point { x: 1700, y: 600 }, EnemyKind::Mummy)
    }

    #[test]
    fn steps_left_at_fixed_speed() {
        let mut enemy = mummy();
        enemy.step();
        enemy.step();
        assert_eq!(enemy.body.position.x, 1700 - 2 * ENEMY_SPEED);
    }

    #[test]
    fn dead_enemies_freeze_in_place() {
        let mut enemy = mummy();
        enemy.on_hit();
        let x = enemy.body.position.x;
        enemy.step();
        assert_eq!(enemy.body.position.x, x);
    }

    #[test]
    fn second_hit_is_a_no_op() {
        let mut enemy = mummy();
        enemy.on_hit();
        assert!(enemy.is_dead());
        enemy.on_hit();
        assert!(enemy.is_dead());
    }

    #[test]
    fn animation_counter_wraps_at_the_cycle() {
        let mut enemy = mummy();
        for _ in 0..sprite::enemy::MUMMY_CYCLE {
            enemy.step();
        }
        assert_eq!(enemy.body.frame, 0);
    }

    #[test]
    fn hit_box_uses_the_shared_size() {
        let enemy = mummy();
        assert_eq!(enemy.hit_box().size.width, ENEMY_HIT_WIDTH);
        assert_eq!(enemy.hit_box().size.height, ENEMY_HIT_HEIGHT);
    }
}
