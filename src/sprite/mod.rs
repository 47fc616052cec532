//! Sprite-sheet animation: fixed clip tables for every animated state and
//! pure selection from (state flags, frame counter) to a sheet rectangle.
//!
//! Counters are plain wrapping integers owned by the entities; this module
//! only derives indices from them. Every index goes through [`frame_index`]
//! so a miscomputed wrap condition can never over-read a clip table.

pub mod enemy;
pub mod player;

/// Derive the current clip index for a cycle of `len` clips that advances
/// one step every `divisor` ticks. The modulo is the point: the tables are
/// fixed-size and the counter wrap conditions live elsewhere.
pub fn frame_index(counter: u8, divisor: u8, len: usize) -> usize {
    (counter as usize / divisor as usize) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_frame_cycle_visits_each_index_ten_times() {
        // divisor 10, 4 clips, 40-tick master cycle
        let mut visits = [0u32; 4];
        for counter in 0..40u8 {
            visits[frame_index(counter, 10, 4)] += 1;
        }
        assert_eq!(visits, [10, 10, 10, 10]);
    }

    #[test]
    fn index_wraps_instead_of_overrunning() {
        // counters past the cycle budget still land inside the table
        assert_eq!(frame_index(40, 10, 4), 0);
        assert_eq!(frame_index(59, 10, 4), 1);
        assert_eq!(frame_index(255, 10, 4), 1);
    }

    #[test]
    fn uneven_divisors_stay_in_bounds() {
        for counter in 0..=255u8 {
            assert!(frame_index(counter, 30, 2) < 2);
            assert!(frame_index(counter, 20, 3) < 3);
        }
    }
}
