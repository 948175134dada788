use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

/// Target video codec family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    #[default]
    H264,
    Hevc,
    Vp9,
}

impl VideoCodec {
    /// Name as understood by ffmpeg's `-vcodec`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H264 => "h264",
            Self::Hevc => "hevc",
            Self::Vp9 => "vp9",
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoCodec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h264" => Ok(Self::H264),
            "hevc" => Ok(Self::Hevc),
            "vp9" => Ok(Self::Vp9),
            _ => Err(ConfigError::UnknownName {
                kind: "video codec",
                name: s.to_string(),
                expected: "h264, hevc, vp9",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    #[default]
    Aac,
    Mp3,
    Libopus,
}

impl AudioCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Mp3 => "mp3",
            Self::Libopus => "libopus",
        }
    }

    /// Codec name ffprobe reports for streams of this codec
    pub fn probe_name(&self) -> &'static str {
        match self {
            Self::Libopus => "opus",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioCodec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aac" => Ok(Self::Aac),
            "mp3" => Ok(Self::Mp3),
            "libopus" => Ok(Self::Libopus),
            _ => Err(ConfigError::UnknownName {
                kind: "audio codec",
                name: s.to_string(),
                expected: "aac, mp3, libopus",
            }),
        }
    }
}

/// Encoder backend requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranscodeAccel {
    #[default]
    Disabled,
    Nvenc,
    Qsv,
    Vaapi,
}

impl fmt::Display for TranscodeAccel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disabled => "disabled",
            Self::Nvenc => "nvenc",
            Self::Qsv => "qsv",
            Self::Vaapi => "vaapi",
        };
        f.write_str(name)
    }
}

impl FromStr for TranscodeAccel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disabled" | "none" => Ok(Self::Disabled),
            "nvenc" => Ok(Self::Nvenc),
            "qsv" => Ok(Self::Qsv),
            "vaapi" => Ok(Self::Vaapi),
            _ => Err(ConfigError::UnknownName {
                kind: "acceleration backend",
                name: s.to_string(),
                expected: "disabled, nvenc, qsv, vaapi",
            }),
        }
    }
}

/// When a video should be transcoded at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranscodePolicy {
    /// Transcode every video
    All,
    /// Transcode when required, or when the video is above the target resolution
    Optimal,
    /// Transcode only when codec or container is not web compatible
    #[default]
    Required,
    /// Never transcode
    Disabled,
}

impl FromStr for TranscodePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "optimal" => Ok(Self::Optimal),
            "required" => Ok(Self::Required),
            "disabled" => Ok(Self::Disabled),
            _ => Err(ConfigError::UnknownName {
                kind: "transcode policy",
                name: s.to_string(),
                expected: "all, optimal, required, disabled",
            }),
        }
    }
}

/// Probed properties of the primary video stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub height: u32,
    pub width: u32,
    /// Display rotation in degrees (signed, from stream side data)
    #[serde(default)]
    pub rotation: i32,

    // Only consulted by the transcode policy
    #[serde(default)]
    pub video_codec: Option<String>,
    #[serde(default)]
    pub audio_codec: Option<String>,
    #[serde(default)]
    pub container: Option<String>,
}

impl StreamInfo {
    pub fn new(height: u32, width: u32, rotation: i32) -> Self {
        Self {
            height,
            width,
            rotation,
            ..Self::default()
        }
    }

    /// Length of the shorter edge in pixels
    pub fn short_side(&self) -> u32 {
        self.height.min(self.width)
    }
}

/// Bitrate budget derived from the configured maximum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitrateDistribution {
    pub max: u64,
    pub target: u64,
    /// Half of `target`; keeps the .5 when target is odd
    pub min: f64,
    pub unit: String,
}

impl BitrateDistribution {
    pub fn max_rate(&self) -> String {
        format!("{}{}", self.max, self.unit)
    }

    pub fn target_rate(&self) -> String {
        format!("{}{}", self.target, self.unit)
    }

    pub fn min_rate(&self) -> String {
        // f64 Display already drops the fraction for whole numbers
        format!("{}{}", self.min, self.unit)
    }
}

/// Options handed to the ffmpeg invocation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeOptions {
    /// Placed before `-i <input>`
    pub input_options: Vec<String>,
    /// Placed before the output path
    pub output_options: Vec<String>,
    /// The caller must run the encode twice with pass-specific flags
    pub two_pass: bool,
}
