use rand::Rng;

/// Glyphs shown while a position is still spinning
pub const SLOT_GLYPHS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_-+=<>?/[]{}|~";

/// The glyph used for blank positions
pub const BLANK: char = ' ';

/// Draw a glyph uniformly from `SLOT_GLYPHS`
pub fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> char {
    let bytes = SLOT_GLYPHS.as_bytes();
    bytes[rng.random_range(0..bytes.len())] as char
}
