use super::error::ConfigError;
use super::scaling::should_scale;
use super::transcode_config::TranscodeConfig;
use super::types::{StreamInfo, TranscodePolicy};

/// ffprobe format names that browsers can play as mp4
const WEB_CONTAINERS: &[&str] = &["mov,mp4,m4a,3gp,3g2,mj2", "mp4", "mov"];

fn matches(probed: Option<&str>, wanted: &str) -> bool {
    probed.is_some_and(|name| name.eq_ignore_ascii_case(wanted))
}

/// Codecs and container already match the configured targets
fn targets_match(stream: &StreamInfo, config: &TranscodeConfig) -> bool {
    let video = matches(
        stream.video_codec.as_deref(),
        config.target_video_codec.as_str(),
    );
    let audio = matches(
        stream.audio_codec.as_deref(),
        config.target_audio_codec.probe_name(),
    );
    let container = stream
        .container
        .as_deref()
        .is_some_and(|c| WEB_CONTAINERS.contains(&c.to_ascii_lowercase().as_str()));

    video && audio && container
}

/// Whether the configured policy asks for this stream to be transcoded.
///
/// Stream fields that were not probed count as not matching the target.
pub fn should_transcode(
    stream: &StreamInfo,
    config: &TranscodeConfig,
) -> Result<bool, ConfigError> {
    let required = !targets_match(stream, config);

    Ok(match config.transcode {
        TranscodePolicy::Disabled => false,
        TranscodePolicy::All => true,
        TranscodePolicy::Required => required,
        TranscodePolicy::Optimal => required || should_scale(stream, config)?,
    })
}
