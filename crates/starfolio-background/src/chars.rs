//! Glyphs used to draw streaks.

/// Head glyphs from thinnest to thickest.
pub const HEAD_CHARS: &[char] = &['·', '•', '●'];

/// Streak body glyphs by direction.
pub const HORIZONTAL: char = '─';
pub const VERTICAL: char = '│';
/// Down-right or up-left (screen y grows downward).
pub const FALLING: char = '╲';
/// Up-right or down-left.
pub const RISING: char = '╱';
