use super::error::ConfigError;
use super::transcode_config::TranscodeConfig;
use super::types::StreamInfo;

fn configured_resolution(config: &TranscodeConfig) -> Result<u32, ConfigError> {
    config
        .target_resolution
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|px| *px > 0)
        .ok_or_else(|| ConfigError::InvalidTargetResolution(config.target_resolution.clone()))
}

/// Short-side pixel count the output should have
pub fn target_resolution(
    stream: &StreamInfo,
    config: &TranscodeConfig,
) -> Result<u32, ConfigError> {
    if config.keeps_original_resolution() {
        return Ok(stream.short_side());
    }

    configured_resolution(config)
}

/// Only ever downscale: true when the short side exceeds the configured target
pub fn should_scale(stream: &StreamInfo, config: &TranscodeConfig) -> Result<bool, ConfigError> {
    if config.keeps_original_resolution() {
        return Ok(false);
    }

    Ok(stream.short_side() > configured_resolution(config)?)
}

pub fn is_video_rotated(stream: &StreamInfo) -> bool {
    stream.rotation.unsigned_abs() == 90
}

/// Portrait as displayed; a landscape frame with 90° rotation metadata counts
pub fn is_video_vertical(stream: &StreamInfo) -> bool {
    stream.height > stream.width || is_video_rotated(stream)
}

/// `w:h` argument for a scale filter. The unconstrained edge is `-2` so
/// ffmpeg keeps the aspect ratio and rounds to an even size.
pub fn scaling(stream: &StreamInfo, config: &TranscodeConfig) -> Result<String, ConfigError> {
    let target = target_resolution(stream, config)?;
    if is_video_vertical(stream) {
        Ok(format!("{}:-2", target))
    } else {
        Ok(format!("-2:{}", target))
    }
}
