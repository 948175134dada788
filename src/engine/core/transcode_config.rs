use serde::{Deserialize, Serialize};

use super::types::{AudioCodec, TranscodeAccel, TranscodePolicy, VideoCodec};

/// Resolution token meaning "keep the source size"
pub const ORIGINAL_RESOLUTION: &str = "original";

fn default_preset() -> String {
    "ultrafast".to_string()
}
fn default_crf() -> u32 {
    23
}
fn default_max_bitrate() -> String {
    "0".to_string()
}
fn default_target_resolution() -> String {
    "720".to_string()
}

/// User-level transcoding settings, supplied whole for every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeConfig {
    #[serde(default)]
    pub target_video_codec: VideoCodec,
    #[serde(default)]
    pub target_audio_codec: AudioCodec,

    /// x264-style preset name (veryslow..ultrafast); mapped per backend
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Quality factor; also used as cq/global_quality/qp on hardware
    #[serde(default = "default_crf")]
    pub crf: u32,

    /// Number with optional unit suffix ("4500k", "10M"); "0" or empty means unconstrained
    #[serde(default = "default_max_bitrate")]
    pub max_bitrate: String,

    #[serde(default)]
    pub two_pass: bool,

    /// "original" or the short-side pixel count
    #[serde(default = "default_target_resolution")]
    pub target_resolution: String,

    #[serde(default)]
    pub threads: i32,

    #[serde(default)]
    pub accel: TranscodeAccel,

    #[serde(default)]
    pub transcode: TranscodePolicy,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            target_video_codec: VideoCodec::default(),
            target_audio_codec: AudioCodec::default(),
            preset: default_preset(),
            crf: default_crf(),
            max_bitrate: default_max_bitrate(),
            two_pass: false,
            target_resolution: default_target_resolution(),
            threads: 0,
            accel: TranscodeAccel::default(),
            transcode: TranscodePolicy::default(),
        }
    }
}

impl TranscodeConfig {
    pub fn keeps_original_resolution(&self) -> bool {
        self.target_resolution.trim() == ORIGINAL_RESOLUTION
    }
}
