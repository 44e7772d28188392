//! Fallback font compiled into the binary.
//!
//! A 5x7 bitmap face covering ASCII letters, digits and space. It is drawn
//! as solid blocks scaled by a whole factor, so the requested size is only
//! approximated.

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Blank columns between glyphs, before scaling.
pub const GLYPH_SPACING: u32 = 1;

type Rows = [u8; GLYPH_HEIGHT as usize];

const UNKNOWN: Rows = [
    0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100,
];

const LETTERS: [Rows; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

const DIGITS: [Rows; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// Row bitmaps for `c`, most significant of the low five bits is the left
/// column. Lowercase letters use the uppercase shapes; anything else
/// renders as a question mark.
pub fn glyph(c: char) -> Rows {
    match c.to_ascii_uppercase() {
        ' ' => [0; GLYPH_HEIGHT as usize],
        c @ 'A'..='Z' => LETTERS[(c as u8 - b'A') as usize],
        c @ '0'..='9' => DIGITS[(c as u8 - b'0') as usize],
        _ => UNKNOWN,
    }
}

pub fn is_set(rows: &Rows, col: u32, row: u32) -> bool {
    col < GLYPH_WIDTH
        && row < GLYPH_HEIGHT
        && rows[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}

/// Whole-pixel block scale used for a requested font size.
pub fn scale_for(font_size: u32) -> u32 {
    (font_size / GLYPH_HEIGHT).max(1)
}

/// Unscaled pixel width of a run of `chars` glyphs.
pub fn text_width(chars: u32) -> u32 {
    match chars {
        0 => 0,
        n => n
            .saturating_mul(GLYPH_WIDTH)
            .saturating_add((n - 1).saturating_mul(GLYPH_SPACING)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_has_two_arms_and_a_stem() {
        let y = glyph('Y');
        assert!(is_set(&y, 0, 0) && is_set(&y, 4, 0));
        assert!(!is_set(&y, 2, 0));
        assert!((3..GLYPH_HEIGHT).all(|row| is_set(&y, 2, row)));
        assert_eq!(glyph('y'), y);
    }

    #[test]
    fn unknown_characters_fall_back_to_question_mark() {
        assert_eq!(glyph('~'), UNKNOWN);
        assert_eq!(glyph('é'), UNKNOWN);
        assert_eq!(glyph(' '), [0; 7]);
    }

    #[test]
    fn out_of_range_cells_are_clear() {
        let a = glyph('A');
        assert!(!is_set(&a, GLYPH_WIDTH, 0));
        assert!(!is_set(&a, 0, GLYPH_HEIGHT));
    }

    #[test]
    fn scale_approximates_the_requested_size() {
        assert_eq!(scale_for(24), 3);
        assert_eq!(scale_for(140), 20);
        assert_eq!(scale_for(3), 1);
        assert_eq!(text_width(1), 5);
        assert_eq!(text_width(3), 17);
        assert_eq!(text_width(0), 0);
        assert_eq!(text_width(u32::MAX), u32::MAX);
    }
}
