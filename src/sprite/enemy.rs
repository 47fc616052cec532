//! Enemy clip tables: the dog runs a 6-frame cycle over 60 ticks, the mummy
//! a 5-frame cycle over 50 ticks. Dead enemies play their death row at the
//! same rate; the dog's sheet has no dedicated death row, so its second row
//! serves as the death set.

use super::frame_index;
use crate::geometry::Rect;
use crate::sim::enemy::EnemyKind;

const FRAME_DIVISOR: u8 = 10;

pub const DOG_CYCLE: u8 = 60;
pub const MUMMY_CYCLE: u8 = 50;

const DOG_COLS: [i16; 6] = [0, 118, 236, 354, 472, 590];
const DOG_W: i16 = 76;
const DOG_H: i16 = 45;

const MUMMY_COLS: [i16; 5] = [5, 124, 243, 0, 119];
const MUMMY_W: i16 = 47;
const MUMMY_H: i16 = 62;

const fn dog_row(y: i16) -> [Rect; 6] {
    [
        Rect::from_parts(DOG_COLS[0], y, DOG_W, DOG_H),
        Rect::from_parts(DOG_COLS[1], y, DOG_W, DOG_H),
        Rect::from_parts(DOG_COLS[2], y, DOG_W, DOG_H),
        Rect::from_parts(DOG_COLS[3], y, DOG_W, DOG_H),
        Rect::from_parts(DOG_COLS[4], y, DOG_W, DOG_H),
        Rect::from_parts(DOG_COLS[5], y, DOG_W, DOG_H),
    ]
}

const fn mummy_row(y: i16) -> [Rect; 5] {
    [
        Rect::from_parts(MUMMY_COLS[0], y, MUMMY_W, MUMMY_H),
        Rect::from_parts(MUMMY_COLS[1], y, MUMMY_W, MUMMY_H),
        Rect::from_parts(MUMMY_COLS[2], y, MUMMY_W, MUMMY_H),
        Rect::from_parts(MUMMY_COLS[3], y, MUMMY_W, MUMMY_H),
        Rect::from_parts(MUMMY_COLS[4], y, MUMMY_W, MUMMY_H),
    ]
}

const DOG_MOVE: [Rect; 6] = dog_row(70);
const DOG_DEATH: [Rect; 6] = dog_row(187);
const MUMMY_MOVE: [Rect; 5] = mummy_row(50);
const MUMMY_DEATH: [Rect; 5] = mummy_row(281);

/// Ticks after which an enemy's counter wraps back to zero.
pub fn cycle(kind: EnemyKind) -> u8 {
    match kind {
        EnemyKind::Dog => DOG_CYCLE,
        EnemyKind::Mummy => MUMMY_CYCLE,
    }
}

pub fn clip(kind: EnemyKind, dead: bool, counter: u8) -> Rect {
    match (kind, dead) {
        (EnemyKind::Dog, false) => DOG_MOVE[frame_index(counter, FRAME_DIVISOR, 6)],
        (EnemyKind::Dog, true) => DOG_DEATH[frame_index(counter, FRAME_DIVISOR, 6)],
        (EnemyKind::Mummy, false) => MUMMY_MOVE[frame_index(counter, FRAME_DIVISOR, 5)],
        (EnemyKind::Mummy, true) => MUMMY_DEATH[frame_index(counter, FRAME_DIVISOR, 5)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dog_cycle_steps_every_ten_ticks() {
        assert_eq!(clip(EnemyKind::Dog, false, 0), clip(EnemyKind::Dog, false, 9));
        assert_ne!(clip(EnemyKind::Dog, false, 9), clip(EnemyKind::Dog, false, 10));
        // last step of the cycle is still in bounds
        let _ = clip(EnemyKind::Dog, false, DOG_CYCLE - 1);
    }

    #[test]
    fn mummy_death_row_differs_from_move_row() {
        assert_ne!(
            clip(EnemyKind::Mummy, false, 0),
            clip(EnemyKind::Mummy, true, 0)
        );
    }

    #[test]
    fn counters_past_the_cycle_still_resolve() {
        let _ = clip(EnemyKind::Mummy, false, 255);
        let _ = clip(EnemyKind::Dog, true, 255);
    }
}
