//! Cluster hits table for missile volleys

use crate::damage::dice::Dice;

/// Volley sizes the table covers
pub const CLUSTER_SIZES: [u32; 7] = [2, 4, 5, 6, 10, 15, 20];

/// Hits for a volley of `missiles` on a 2d6 `roll`. Unlisted volley sizes
/// and rolls outside 2..=12 score nothing.
pub fn missiles_hit_for_roll(missiles: u32, roll: u32) -> u32 {
    match (missiles, roll) {
        (2, 2..=7) => 1,
        (2, 8..=12) => 2,

        (4, 2) => 1,
        (4, 3..=6) => 2,
        (4, 7..=10) => 3,
        (4, 11..=12) => 4,

        (5, 2) => 1,
        (5, 3..=4) => 2,
        (5, 5..=8) => 3,
        (5, 9..=10) => 4,
        (5, 11..=12) => 5,

        (6, 2..=3) => 2,
        (6, 4..=5) => 3,
        (6, 6..=8) => 4,
        (6, 9..=10) => 5,
        (6, 11..=12) => 6,

        (10, 2..=3) => 3,
        (10, 4) => 4,
        (10, 5..=8) => 6,
        (10, 9..=10) => 8,
        (10, 11..=12) => 10,

        (15, 2..=3) => 5,
        (15, 4) => 6,
        (15, 5..=8) => 9,
        (15, 9..=10) => 12,
        (15, 11..=12) => 15,

        (20, 2..=3) => 6,
        (20, 4) => 9,
        (20, 5..=8) => 12,
        (20, 9..=10) => 16,
        (20, 11..=12) => 20,

        _ => 0,
    }
}

/// Roll on the cluster table. Unlisted sizes score 0 without rolling.
pub fn missiles_hit(missiles: u32, dice: &mut Dice) -> u32 {
    if !CLUSTER_SIZES.contains(&missiles) {
        return 0;
    }
    let roll = dice.roll_2d6();
    let hits = missiles_hit_for_roll(missiles, roll);
    tracing::debug!("Cluster roll {} for {} missiles: {} hit", roll, missiles, hits);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_entries() {
        assert_eq!(missiles_hit_for_roll(6, 7), 4);
        assert_eq!(missiles_hit_for_roll(10, 2), 3);
        assert_eq!(missiles_hit_for_roll(20, 12), 20);
        assert_eq!(missiles_hit_for_roll(4, 11), 4);
        assert_eq!(missiles_hit_for_roll(15, 4), 6);
        assert_eq!(missiles_hit_for_roll(5, 8), 3);
        assert_eq!(missiles_hit_for_roll(2, 7), 1);
    }

    #[test]
    fn test_never_more_than_fired() {
        for size in CLUSTER_SIZES {
            for roll in 2..=12 {
                let hits = missiles_hit_for_roll(size, roll);
                assert!((1..=size).contains(&hits), "{} on {}", size, roll);
            }
            assert_eq!(missiles_hit_for_roll(size, 12), size);
        }
    }

    #[test]
    fn test_table_is_monotonic() {
        for size in CLUSTER_SIZES {
            for roll in 3..=12 {
                assert!(missiles_hit_for_roll(size, roll) >= missiles_hit_for_roll(size, roll - 1));
            }
        }
    }

    #[test]
    fn test_unlisted_size_does_not_roll() {
        let mut dice = Dice::new(1);
        let mut control = Dice::new(1);
        assert_eq!(missiles_hit(3, &mut dice), 0);
        assert_eq!(dice.roll_2d6(), control.roll_2d6());
    }
}
