/// Color utilities: the curated palette, HSL conversion and bag expansion.
use std::collections::HashSet;

use rand::{RngExt, SeedableRng, rngs::StdRng};

use crate::types::ColorMode;

/// Curated palette handed out before any generated color.
pub const BASE_PALETTE: [&str; 15] = [
    "#2563eb", "#a855f7", "#06b6d4", "#ef4444", "#10b981", "#f97316", "#84cc16", "#eab308",
    "#14b8a6", "#3b82f6", "#ec4899", "#22d3ee", "#f59e0b", "#34d399", "#9333ea",
];

/// Golden angle in degrees.
pub const GOLDEN_ANGLE: f64 = 137.508;

const BASE_HUE: f64 = 197.0;
const SATURATION: f64 = 0.70;
const LIGHTNESS_STEPS: [f64; 4] = [0.55, 0.50, 0.60, 0.45];

/// Validate if a string is a valid hex color (e.g., #RRGGBB).
pub fn is_valid_hex(s: &str) -> bool {
    s.starts_with('#') && s.len() == 7 && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse `#rrggbb` (leading `#` optional) into its channels.
pub fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to `#rrggbb`.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    debug_assert!(h.is_finite() && s.is_finite() && l.is_finite());
    let h = h.rem_euclid(360.0) / 360.0;
    let a = s * l.min(1.0 - l);
    let channel = |n: f64| -> u8 {
        let k = (n + 12.0 * h).rem_euclid(12.0);
        let c = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * c).round().clamp(0.0, 255.0) as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
}

/// Returns at least `min_size` distinct colors, starting with [`BASE_PALETTE`].
///
/// Extra colors walk the hue circle by the golden angle from a fixed start
/// hue, or from a hue drawn from the seed in randomized mode. Lightness
/// cycles through four steps so neighbouring hues stay apart. Candidates that
/// round to a color already in the bag are skipped, so the result only falls
/// short of `min_size` once the 8-bit hue ring is exhausted (a few thousand
/// colors).
pub fn expand_color_bag(min_size: usize, mode: ColorMode) -> Vec<String> {
    let mut bag: Vec<String> = BASE_PALETTE.iter().map(|c| c.to_string()).collect();
    if bag.len() >= min_size {
        return bag;
    }

    let start_hue = match mode {
        ColorMode::Randomized { seed: Some(seed) } => {
            StdRng::seed_from_u64(seed).random_range(0.0..360.0)
        }
        _ => BASE_HUE,
    };

    let needed = min_size - bag.len();
    let max_attempts = needed.saturating_mul(16).saturating_add(4096);
    let mut seen: HashSet<String> = bag.iter().cloned().collect();
    bag.reserve(needed);
    for i in 0..max_attempts {
        if bag.len() >= min_size {
            break;
        }
        let hue = (start_hue + GOLDEN_ANGLE * i as f64).rem_euclid(360.0);
        let lightness = LIGHTNESS_STEPS[i % LIGHTNESS_STEPS.len()];
        let color = hsl_to_hex(hue, SATURATION, lightness);
        if seen.insert(color.clone()) {
            bag.push(color);
        }
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0, 0.5, "#ff0000")]
    #[case(120.0, 1.0, 0.5, "#00ff00")]
    #[case(240.0, 1.0, 0.5, "#0000ff")]
    #[case(360.0, 1.0, 0.5, "#ff0000")]
    #[case(-120.0, 1.0, 0.5, "#0000ff")]
    #[case(0.0, 0.0, 1.0, "#ffffff")]
    #[case(0.0, 0.0, 0.0, "#000000")]
    fn hsl_conversion(#[case] h: f64, #[case] s: f64, #[case] l: f64, #[case] expected: &str) {
        assert_eq!(hsl_to_hex(h, s, l), expected);
    }

    #[test]
    fn small_requests_return_the_palette() {
        for n in [0, 1, 3, 15] {
            let bag = expand_color_bag(n, ColorMode::Deterministic);
            assert_eq!(bag, BASE_PALETTE.to_vec());
        }
        let bag = expand_color_bag(15, ColorMode::Randomized { seed: Some(9) });
        assert_eq!(bag, BASE_PALETTE.to_vec());
    }

    #[test]
    fn palette_is_valid_and_unique() {
        let unique: HashSet<_> = BASE_PALETTE.iter().collect();
        assert_eq!(unique.len(), BASE_PALETTE.len());
        assert!(BASE_PALETTE.iter().all(|c| is_valid_hex(c)));
    }

    #[test]
    fn expansion_keeps_palette_prefix_and_grows() {
        let bag = expand_color_bag(40, ColorMode::Deterministic);
        assert_eq!(bag.len(), 40);
        assert_eq!(&bag[..15], &BASE_PALETTE.map(String::from)[..]);
        assert_eq!(bag[15], hsl_to_hex(197.0, 0.70, 0.55));
        assert_eq!(bag[16], hsl_to_hex(197.0 + GOLDEN_ANGLE, 0.70, 0.50));
        assert!(bag.iter().all(|c| is_valid_hex(c)));
    }

    #[test]
    fn deterministic_expansion_is_prefix_stable() {
        let short = expand_color_bag(30, ColorMode::Deterministic);
        let long = expand_color_bag(300, ColorMode::Deterministic);
        assert_eq!(short[..], long[..30]);
    }

    #[test]
    fn seeded_expansion_is_reproducible() {
        let a = expand_color_bag(50, ColorMode::Randomized { seed: Some(123) });
        let b = expand_color_bag(50, ColorMode::Randomized { seed: Some(123) });
        let c = expand_color_bag(50, ColorMode::Randomized { seed: Some(124) });
        assert_eq!(a, b);
        assert_ne!(a[15..], c[15..]);
    }

    #[test]
    fn thousands_of_generated_colors_stay_distinct() {
        let bag = expand_color_bag(3000, ColorMode::Deterministic);
        assert_eq!(bag.len(), 3000);
        let unique: HashSet<_> = bag.iter().collect();
        assert_eq!(unique.len(), bag.len());
    }

    #[rstest]
    #[case("#2563eb", Some((0x25, 0x63, 0xeb)))]
    #[case("2563EB", Some((0x25, 0x63, 0xeb)))]
    #[case("#25g3eb", None)]
    #[case("#fff", None)]
    fn hex_parsing(#[case] input: &str, #[case] expected: Option<(u8, u8, u8)>) {
        assert_eq!(hex_to_rgb(input), expected);
    }

    #[test]
    fn hex_validation() {
        assert!(is_valid_hex("#9ca3af"));
        assert!(!is_valid_hex("9ca3af"));
        assert!(!is_valid_hex("#9ca3a"));
    }
}
