//! Level arithmetic derived from experience points.
//!
//! Level `L` starts at `50 * L * (L + 1)` experience, so the curve is
//! quadratic and each level costs 100 more points than the previous one.

/// Level reached with the given experience
pub fn level_for(experience: i32) -> i32 {
    let exp = f64::from(experience);
    (((2500.0 + 200.0 * exp).sqrt() - 50.0) / 100.0).floor() as i32
}

/// Experience still missing before `level + 1` is reached
pub fn until_next_level(level: i32, experience: i32) -> i32 {
    50 * (level + 1) * (level + 2) - experience
}
