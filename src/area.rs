/// Area (category) normalization and color assignment for the planner legend.
use std::collections::{BTreeSet, HashSet};

use rand::{RngExt, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::color::expand_color_bag;
use crate::types::{AreaColor, ColorMode};

/// Area used for courses whose category cell is empty.
pub const FALLBACK_AREA: &str = "OTRO";

/// Prefix of every CSS variable that carries an area color.
pub const VAR_PREFIX: &str = "AREA-";

/// Trim and uppercase a raw label; empty labels become [`FALLBACK_AREA`].
pub fn normalize_area(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        FALLBACK_AREA.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

/// CSS variable name (without the leading `--`) for an area.
///
/// The planner page rebuilds this name in the browser with the same rule, so
/// the two must stay identical. Areas that differ only in punctuation map to
/// the same name and the later one wins in the stylesheet.
pub fn area_var_name(area: &str) -> String {
    let sanitized: String = area
        .to_uppercase()
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{VAR_PREFIX}{sanitized}")
}

/// Distinct normalized areas in canonical (sorted) order.
pub fn canonical_areas<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| normalize_area(label.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Give every distinct area its own color.
///
/// Deterministic mode hashes each area into the bag and probes forward for a
/// free slot, so the same set of areas always gets the same colors. Randomized
/// mode shuffles the bag with the seed and deals colors in canonical order.
pub fn assign_colors<I, S>(labels: I, mode: ColorMode) -> Vec<AreaColor>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let areas = canonical_areas(labels);
    if areas.is_empty() {
        return Vec::new();
    }

    let colors = match mode {
        ColorMode::Deterministic => assign_by_hash(&areas),
        ColorMode::Randomized { seed } => {
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            assign_shuffled(&areas, seed)
        }
    };

    areas
        .into_iter()
        .zip(colors)
        .map(|(area, color)| AreaColor {
            var_name: area_var_name(&area),
            area,
            color,
        })
        .collect()
}

fn assign_by_hash(areas: &[String]) -> Vec<String> {
    let bag = expand_color_bag(areas.len(), ColorMode::Deterministic);
    let mut used = HashSet::with_capacity(areas.len());
    areas
        .iter()
        .map(|area| {
            let start = (fxhash::hash64(area.as_str()) % bag.len() as u64) as usize;
            // Past the end of the hue ring every slot is taken; share the start slot.
            let slot = (0..bag.len())
                .map(|step| (start + step) % bag.len())
                .find(|idx| !used.contains(idx))
                .unwrap_or(start);
            used.insert(slot);
            bag[slot].clone()
        })
        .collect()
}

fn assign_shuffled(areas: &[String], seed: u64) -> Vec<String> {
    let mut bag = expand_color_bag(areas.len(), ColorMode::Randomized { seed: Some(seed) });
    let mut rng = StdRng::seed_from_u64(seed);
    bag.shuffle(&mut rng);
    (0..areas.len())
        .map(|i| bag[i % bag.len()].clone())
        .collect()
}
