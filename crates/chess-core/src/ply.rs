//! Ply indices and move-tag notation ("12W", "12B").

use crate::error::ChessCoreError;

/// 1-based half-move index. Odd plies are White's moves, even plies Black's.
pub type Ply = u32;

/// Render a ply as a move tag: full-move number followed by the mover's color.
pub fn move_tag(ply: Ply) -> String {
    let full_move = ply.div_ceil(2);
    let side = if ply % 2 == 1 { 'W' } else { 'B' };
    format!("{full_move}{side}")
}

/// Parse a move tag back into a ply. Accepts either letter case ("15w").
pub fn parse_move_tag(tag: &str) -> Result<Ply, ChessCoreError> {
    let tag = tag.trim();
    let invalid = || ChessCoreError::InvalidTag(tag.to_string());

    let side = tag.chars().last().ok_or_else(invalid)?;
    let number = &tag[..tag.len() - side.len_utf8()];
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let full_move: Ply = number.parse().map_err(|_| invalid())?;
    if full_move == 0 {
        return Err(invalid());
    }

    match side.to_ascii_uppercase() {
        'W' => Ok(full_move * 2 - 1),
        'B' => Ok(full_move * 2),
        _ => Err(invalid()),
    }
}
