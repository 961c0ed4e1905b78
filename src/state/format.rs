//! Elapsed time formatting.

use serde::{Deserialize, Serialize};

const EASTERN_ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Digit glyphs used when displaying times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Numerals {
    /// 0-9
    Western,
    /// ٠-٩
    #[default]
    EasternArabic,
}

impl Numerals {
    /// Replace every ASCII digit in `text` with this numeral system's glyph.
    pub fn localize(&self, text: &str) -> String {
        match self {
            Numerals::Western => text.to_string(),
            Numerals::EasternArabic => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => EASTERN_ARABIC_DIGITS[d as usize],
                    None => c,
                })
                .collect(),
        }
    }
}

/// Format a number of seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so `3661` becomes `61:01`.
pub fn format_elapsed(seconds: u64, numerals: Numerals) -> String {
    let plain = format!("{:02}:{:02}", seconds / 60, seconds % 60);
    numerals.localize(&plain)
}
