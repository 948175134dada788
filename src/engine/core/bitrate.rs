//! Bitrate budget, two-pass eligibility and preset ranking.
//!
//! Everything here reads the configuration only; none of it depends on which
//! encoder backend ends up consuming the numbers.

use super::transcode_config::TranscodeConfig;
use super::types::{BitrateDistribution, VideoCodec};

/// x264 preset vocabulary, slowest (best quality) first
pub const PRESETS: &[&str] = &[
    "veryslow",
    "slower",
    "slow",
    "medium",
    "fast",
    "faster",
    "veryfast",
    "superfast",
    "ultrafast",
];

/// max / target ratio from Google's VP9 VOD guidance; keeps a two-pass
/// average comfortably under the cap
const MAX_TO_TARGET_RATIO: f64 = 1.45;

/// Split "4500k" into the digit run and whatever follows it
fn split_max_bitrate(raw: &str) -> (&str, &str) {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed.split_at(digits_end)
}

/// Leading integer of the configured max bitrate, 0 when absent or unparseable.
/// A digit run too long for `u64` saturates to `u64::MAX`.
pub fn max_bitrate_value(config: &TranscodeConfig) -> u64 {
    let (digits, _) = split_max_bitrate(&config.max_bitrate);
    if digits.is_empty() {
        return 0;
    }
    // only overflow can fail here, the run is all ASCII digits
    digits.parse().unwrap_or(u64::MAX)
}

/// Unit suffix typed after the number ("k", "M"), empty for plain bits per second.
///
/// Surrounding whitespace is trimmed, so `"10 M"` yields `"M"` and the
/// rendered rate stays a single argv token (`10M`).
pub fn bitrate_unit(config: &TranscodeConfig) -> String {
    let (digits, unit) = split_max_bitrate(&config.max_bitrate);
    if digits.is_empty() {
        return String::new();
    }
    unit.trim().to_string()
}

pub fn is_bitrate_constrained(config: &TranscodeConfig) -> bool {
    max_bitrate_value(config) > 0
}

/// Derive target and minimum bitrates from the configured maximum.
///
/// An unconstrained config yields all zeros, which callers treat as
/// "no explicit bitrate control".
pub fn bitrate_distribution(config: &TranscodeConfig) -> BitrateDistribution {
    let max = max_bitrate_value(config);
    let target = (max as f64 / MAX_TO_TARGET_RATIO).ceil() as u64;
    let min = target as f64 / 2.0;

    BitrateDistribution {
        max,
        target,
        min,
        unit: bitrate_unit(config),
    }
}

/// Two-pass only pays off with a bitrate cap, except for VP9 whose
/// constant-quality mode also benefits from it.
pub fn eligible_for_two_pass(config: &TranscodeConfig) -> bool {
    if !config.two_pass {
        return false;
    }

    is_bitrate_constrained(config) || config.target_video_codec == VideoCodec::Vp9
}

/// Rank of a preset name, 0 = veryslow .. 8 = ultrafast
pub fn preset_index(preset: &str) -> Option<usize> {
    PRESETS.iter().position(|p| *p == preset)
}
