//! Gradient palettes and random color assignment.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A two-stop gradient, stored as `#RRGGBB` strings.
///
/// Serialized as a two element array, `["#CBD5E1", "#1E293B"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ColorPair {
    pub from: String,
    pub to: String,
}

impl ColorPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<(String, String)> for ColorPair {
    fn from((from, to): (String, String)) -> Self {
        Self { from, to }
    }
}

impl From<ColorPair> for (String, String) {
    fn from(pair: ColorPair) -> Self {
        (pair.from, pair.to)
    }
}

/// Parse a `#RRGGBB` string into its channels.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

const BASIC: &[(&str, &str, &str)] = &[
    ("slate", "#CBD5E1", "#1E293B"),
    ("gray", "#D1D5DB", "#111827"),
    ("zinc", "#D4D4D8", "#27272A"),
    ("neutral", "#E5E5E5", "#171717"),
    ("stone", "#E7E5E4", "#1C1917"),
    ("red", "#FCA5A5", "#7F1D1D"),
    ("orange", "#FDBA74", "#9A3412"),
    ("amber", "#FCD34D", "#92400E"),
    ("yellow", "#FDE047", "#854D0E"),
    ("lime", "#BEF264", "#3F6212"),
    ("green", "#86EFAC", "#065F46"),
    ("emerald", "#6EE7B7", "#064E3B"),
    ("teal", "#5EEAD4", "#134E4A"),
    ("cyan", "#67E8F9", "#164E63"),
    ("sky", "#7DD3FC", "#075985"),
    ("blue", "#93C5FD", "#1E40AF"),
    ("indigo", "#A5B4FC", "#3730A3"),
    ("violet", "#C4B5FD", "#4C1D95"),
    ("purple", "#D8B4FE", "#581C87"),
    ("fuchsia", "#F0ABFC", "#701A75"),
    ("pink", "#F9A8D4", "#831843"),
    ("rose", "#FECDD3", "#881337"),
];

const EXTRA: &[(&str, &str, &str)] = &[
    ("gold", "#FFD700", "#B8860B"),
    ("silver", "#C0C0C0", "#A9A9A9"),
    ("bronze", "#CD7F32", "#8C7853"),
    ("coral", "#FF7F50", "#FF4040"),
    ("turquoise", "#40E0D0", "#008080"),
    ("magenta", "#FF00FF", "#8B008B"),
    ("lavender", "#E6E6FA", "#B57EDC"),
    ("mint", "#98FF98", "#32CD32"),
    ("peach", "#FFDAB9", "#FF6347"),
    ("plum", "#DDA0DD", "#8B008B"),
    ("salmon", "#FA8072", "#E9967A"),
    ("tan", "#D2B48C", "#A0522D"),
];

/// Which built-in palette to draw from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteSize {
    Basic,
    #[default]
    Extended,
}

/// Ordered mapping of color name to gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<(String, ColorPair)>,
}

impl Palette {
    /// Build a palette from `(name, pair)` entries. Returns `None` when empty.
    pub fn new(entries: Vec<(String, ColorPair)>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn basic() -> Self {
        Self::from_table(BASIC.iter())
    }

    pub fn extended() -> Self {
        Self::from_table(BASIC.iter().chain(EXTRA.iter()))
    }

    pub fn of_size(size: PaletteSize) -> Self {
        match size {
            PaletteSize::Basic => Self::basic(),
            PaletteSize::Extended => Self::extended(),
        }
    }

    fn from_table<'a>(rows: impl Iterator<Item = &'a (&'static str, &'static str, &'static str)>) -> Self {
        Self {
            entries: rows
                .map(|(name, from, to)| (name.to_string(), ColorPair::new(*from, *to)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(&str, &ColorPair)> {
        self.entries.get(index).map(|(name, pair)| (name.as_str(), pair))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorPair)> {
        self.entries.iter().map(|(name, pair)| (name.as_str(), pair))
    }
}

/// Source of uniformly distributed indices.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by any `rand` generator.
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Picks gradients from a palette and tracks the one shown while idle.
pub struct ColorAssigner {
    palette: Palette,
    rng: Box<dyn RandomSource>,
    next: usize,
}

impl ColorAssigner {
    /// Create an assigner and draw the first idle gradient.
    pub fn new(palette: Palette, rng: Box<dyn RandomSource>) -> Self {
        let mut assigner = Self { palette, rng, next: 0 };
        assigner.next = assigner.pick_index();
        assigner
    }

    fn pick_index(&mut self) -> usize {
        // Keep the index in range even if a source ignores `len`.
        self.rng.pick_index(self.palette.len()) % self.palette.len()
    }

    /// Draw a palette entry uniformly at random.
    pub fn pick_random(&mut self) -> (&str, &ColorPair) {
        let index = self.pick_index();
        self.entry(index)
    }

    /// Replace the idle gradient with a fresh random pick.
    pub fn advance(&mut self) -> &str {
        self.next = self.pick_index();
        self.entry(self.next).0
    }

    /// Gradient shown while no task is running.
    pub fn current_idle_gradient(&self) -> &ColorPair {
        self.entry(self.next).1
    }

    pub fn current_key(&self) -> &str {
        self.entry(self.next).0
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn entry(&self, index: usize) -> (&str, &ColorPair) {
        let (name, pair) = &self.palette.entries[index];
        (name.as_str(), pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn fixed(index: usize) -> Box<dyn RandomSource> {
        let mut rng = MockRandomSource::new();
        rng.expect_pick_index().return_const(index);
        Box::new(rng)
    }

    #[test]
    fn palette_sizes() {
        assert_eq!(Palette::basic().len(), 22);
        assert_eq!(Palette::extended().len(), 34);
        assert_eq!(Palette::of_size(PaletteSize::Basic), Palette::basic());
    }

    #[test]
    fn every_palette_entry_is_valid_hex() {
        for (name, pair) in Palette::extended().iter() {
            assert!(parse_hex(&pair.from).is_some(), "{name} from");
            assert!(parse_hex(&pair.to).is_some(), "{name} to");
        }
    }

    #[rstest]
    #[case("#CBD5E1", Some((0xCB, 0xD5, 0xE1)))]
    #[case("#000000", Some((0, 0, 0)))]
    #[case("CBD5E1", None)]
    #[case("#CBD5", None)]
    #[case("#GGGGGG", None)]
    fn parses_hex(#[case] hex: &str, #[case] expected: Option<(u8, u8, u8)>) {
        assert_eq!(parse_hex(hex), expected);
    }

    #[rstest]
    #[case(0, "slate")]
    #[case(5, "red")]
    #[case(21, "rose")]
    #[case(33, "tan")]
    fn pick_random_returns_indexed_entry(#[case] index: usize, #[case] name: &str) {
        let palette = Palette::extended();
        let expected = palette.get(index).map(|(_, pair)| pair.clone());
        let mut assigner = ColorAssigner::new(palette, fixed(index));

        let (picked, pair) = assigner.pick_random();
        assert_eq!(picked, name);
        assert_eq!(Some(pair.clone()), expected);
    }

    #[test]
    fn advance_changes_idle_gradient() {
        let mut rng = MockRandomSource::new();
        let mut seq = mockall::Sequence::new();
        rng.expect_pick_index()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(0usize);
        rng.expect_pick_index()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(1usize);

        let mut assigner = ColorAssigner::new(Palette::basic(), Box::new(rng));
        assert_eq!(assigner.current_key(), "slate");
        assert_eq!(assigner.current_idle_gradient(), &ColorPair::new("#CBD5E1", "#1E293B"));

        assert_eq!(assigner.advance(), "gray");
        assert_eq!(assigner.current_idle_gradient(), &ColorPair::new("#D1D5DB", "#111827"));
    }

    #[test]
    fn seeded_source_stays_in_bounds() {
        let mut source = RngSource::seeded(7);
        for len in 1..50 {
            assert!(source.pick_index(len) < len);
        }
    }

    #[test]
    fn color_pair_serializes_as_array() {
        let json = serde_json::to_string(&ColorPair::new("#FFD700", "#B8860B")).unwrap();
        assert_eq!(json, r##"["#FFD700","#B8860B"]"##);
    }
}
