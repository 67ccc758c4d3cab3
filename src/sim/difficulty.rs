//! Difficulty progression

/// Level reached after `elapsed` seconds of play: one level per
/// `level_duration` seconds
pub fn level_for(elapsed: f32, level_duration: f32) -> u32 {
    if level_duration <= 0.0 || elapsed <= 0.0 {
        return 0;
    }
    (elapsed / level_duration).floor() as u32
}

/// Raise `current` to the level for `elapsed`; never lowers it
pub fn progress(current: u32, elapsed: f32, level_duration: f32) -> u32 {
    current.max(level_for(elapsed, level_duration))
}
