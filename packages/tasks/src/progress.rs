// ABOUTME: Progress percentage rules
// ABOUTME: Out-of-range progress is clamped rather than rejected

/// Upper bound of a progress percentage
pub const MAX_PROGRESS: u8 = 100;

/// Clamp a raw progress value to 0..=100
pub fn clamp_progress(value: i32) -> u8 {
    value.clamp(0, MAX_PROGRESS as i32) as u8
}
