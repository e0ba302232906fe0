/// Championship points by finishing position (1st, 2nd, 3rd)
pub const POINTS_TABLE: [u32; 3] = [25, 18, 15];

/// Number of races in a season
pub const SEASON_LENGTH: usize = 3;

/// Lowest luck draw added to a race score
pub const MIN_LUCK: i32 = -9;

/// Highest luck draw added to a race score
pub const MAX_LUCK: i32 = 9;

/// Inclusive bounds for driver skill and consistency ratings
pub const DRIVER_ATTRIBUTE_RANGE: (u8, u8) = (1, 10);

/// Inclusive bounds for track difficulty and speed bias
pub const TRACK_ATTRIBUTE_RANGE: (f64, f64) = (0.0, 1.0);

/// Get the points awarded for a 1-indexed finishing position.
///
/// Positions outside the table score nothing.
pub fn points_for_position(position: usize) -> u32 {
    position
        .checked_sub(1)
        .and_then(|i| POINTS_TABLE.get(i))
        .copied()
        .unwrap_or(0)
}

/// Maximum points a single race can hand out across the whole field
pub fn max_points_per_race() -> u32 {
    POINTS_TABLE.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table_strictly_decreasing() {
        assert!(POINTS_TABLE.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_points_for_position() {
        assert_eq!(points_for_position(1), 25);
        assert_eq!(points_for_position(2), 18);
        assert_eq!(points_for_position(3), 15);
        assert_eq!(points_for_position(4), 0);
        assert_eq!(points_for_position(0), 0);
    }

    #[test]
    fn test_max_points_per_race() {
        assert_eq!(max_points_per_race(), 58);
    }
}
