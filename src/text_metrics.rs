// Approximate label widths from per-character classes of a proportional
// sans-serif face. No font files are read.

/// Width of `text` in picas at a 1px font size.
///
/// Multiply by the font size (and any padding factor) to get pixels.
pub fn approximate_text_width(text: &str) -> f64 {
    let milli_inches: u32 = text.chars().map(char_width_milli_inches).sum();
    milli_inches as f64 * 6.0 / 1000.0
}

pub(crate) fn char_width_milli_inches(ch: char) -> u32 {
    match ch {
        'l' | 'i' | 'j' | '|' | '\'' | ' ' => 37,
        '!' | '[' | ']' | 'f' | 'I' | '.' | ',' | ':' | ';' | '/' | '\\' | 't' => 50,
        '`' | '-' | '(' | ')' | '{' | '}' | 'r' | '"' => 60,
        '*' | '^' | 'z' | 'c' | 's' | 'J' | 'k' | 'v' | 'x' | 'y' => 85,
        'a' | 'e' | 'b' | 'd' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' | 'g' | '#' | '$' | 'L'
        | '+' | '<' | '>' | '=' | '?' | '_' | '~' | 'F' | 'Z' | 'T' => 95,
        '0'..='9' => 95,
        'B' | 'S' | 'P' | 'E' | 'A' | 'K' | 'V' | 'X' | 'Y' | '&' | 'U' | 'w' | 'N' | 'R'
        | 'C' | 'H' | 'D' => 112,
        'Q' | 'G' | 'O' | 'M' | 'm' | '%' | 'W' | '@' => 135,
        _ => 50,
    }
}
