//! Deterministic batch coloring.
//!
//! Equal names always hash to the same palette entry, within a render
//! and across renders. Different names may collide on one of the 12
//! colors; that is acceptable for a visual grouping aid.

pub const BATCH_COLORS: [&str; 12] = [
    "#4285F4", // blue
    "#EA4335", // red
    "#FBBC05", // yellow
    "#34A853", // green
    "#3498db", // dodger blue
    "#e74c3c", // alizarin
    "#2ecc71", // emerald
    "#f39c12", // orange
    "#9b59b6", // amethyst
    "#1abc9c", // turquoise
    "#d35400", // pumpkin
    "#c0392b", // pomegranate
];

/// Sum of the name's char codes, wrapped, modulo the palette size.
pub fn color_for(name: &str) -> &'static str {
    let hash = name
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_add(c as u32));
    BATCH_COLORS[(hash % BATCH_COLORS.len() as u32) as usize]
}
