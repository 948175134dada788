//! Hardware encoder backends: NVIDIA NVENC, Intel Quick Sync and VA-API.
//!
//! Compared to the software handlers these initialise a device context on the
//! input side, use `<codec>_<api>` encoder names, route frames through GPU
//! memory in the filter chain, remap the preset rank onto their own numeric
//! scale and expose no software thread controls.

use crate::engine::core::{
    CodecHandler, ConfigError, StreamInfo, TranscodeConfig, VideoCodec, base_output_options,
    bitrate_distribution, eligible_for_two_pass, preset_index, scaling, should_scale,
};

/// Highest preset rank the hardware scales distinguish (veryslow..veryfast)
const HW_MAX_PRESET_RANK: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardwareApi {
    Nvenc,
    Qsv,
    Vaapi,
}

impl HardwareApi {
    pub const ALL: [HardwareApi; 3] = [Self::Nvenc, Self::Qsv, Self::Vaapi];

    /// Suffix ffmpeg appends to the codec name for this API's encoders
    pub fn codec_tag(&self) -> &'static str {
        match self {
            Self::Nvenc => "nvenc",
            Self::Qsv => "qsv",
            Self::Vaapi => "vaapi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nvenc => "NVENC (NVIDIA)",
            Self::Qsv => "Quick Sync (Intel)",
            Self::Vaapi => "VA-API",
        }
    }

    /// Codecs this API can encode. Informational: nothing rejects other codecs.
    pub fn supported_codecs(&self) -> &'static [VideoCodec] {
        match self {
            Self::Nvenc => &[VideoCodec::H264, VideoCodec::Hevc],
            Self::Qsv | Self::Vaapi => &[VideoCodec::H264, VideoCodec::Hevc, VideoCodec::Vp9],
        }
    }

    pub fn supports(&self, codec: VideoCodec) -> bool {
        self.supported_codecs().contains(&codec)
    }

    /// ffmpeg encoder name, e.g. `hevc_vaapi`
    pub fn encoder_name(&self, codec: VideoCodec) -> String {
        format!("{}_{}", codec, self.codec_tag())
    }
}

/// Preset rank clamped to the hardware range, `None` for unknown presets
fn hw_preset_rank(config: &TranscodeConfig) -> Option<usize> {
    preset_index(&config.preset).map(|rank| rank.min(HW_MAX_PRESET_RANK))
}

fn hw_output_options(config: &TranscodeConfig, api: HardwareApi) -> Vec<String> {
    base_output_options(config, &api.encoder_name(config.target_video_codec))
}

/// Quality value plus an optional -maxrate, shared by QSV and capped VA-API
fn global_quality_options(config: &TranscodeConfig) -> Vec<String> {
    let bitrates = bitrate_distribution(config);
    let mut options = vec![format!("-global_quality {}", config.crf)];
    if bitrates.max > 0 {
        options.push(format!("-maxrate {}", bitrates.max_rate()));
    }
    options
}

#[derive(Debug, Clone, Copy)]
pub struct NvencHandler<'a> {
    config: &'a TranscodeConfig,
}

impl<'a> NvencHandler<'a> {
    pub fn new(config: &'a TranscodeConfig) -> Self {
        Self { config }
    }
}

impl CodecHandler for NvencHandler<'_> {
    fn config(&self) -> &TranscodeConfig {
        self.config
    }

    fn base_input_options(&self) -> Vec<String> {
        vec![
            "-init_hw_device cuda=cuda:0".to_string(),
            "-filter_hw_device cuda".to_string(),
        ]
    }

    fn base_output_options(&self) -> Vec<String> {
        // NVIDIA's latency-tolerant high quality transcoding settings
        let mut options: Vec<String> = [
            "-tune hq",
            "-qmin 0",
            "-g 250",
            "-bf 3",
            "-b_ref_mode middle",
            "-temporal-aq 1",
            "-rc-lookahead 20",
            "-i_qfactor 0.75",
            "-b_qfactor 1.1",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        options.extend(hw_output_options(self.config, HardwareApi::Nvenc));
        options
    }

    fn filter_options(&self, stream: &StreamInfo) -> Result<Vec<String>, ConfigError> {
        let mut filters = vec!["hwupload_cuda".to_string()];
        if should_scale(stream, self.config)? {
            filters.push(format!("scale_cuda={}", scaling(stream, self.config)?));
        }
        Ok(filters)
    }

    fn preset_options(&self) -> Vec<String> {
        // p7 is the slowest/best, so the rank runs backwards
        match hw_preset_rank(self.config) {
            Some(rank) => vec![format!("-preset p{}", 7 - rank)],
            None => Vec::new(),
        }
    }

    fn thread_options(&self) -> Vec<String> {
        Vec::new()
    }

    fn bitrate_options(&self) -> Vec<String> {
        let bitrates = bitrate_distribution(self.config);
        if eligible_for_two_pass(self.config) {
            vec![
                format!("-b:v {}", bitrates.target_rate()),
                format!("-maxrate {}", bitrates.max_rate()),
                format!("-bufsize {}", bitrates.target_rate()),
                "-multipass 2".to_string(),
            ]
        } else if bitrates.max > 0 {
            vec![
                format!("-cq:v {}", self.config.crf),
                format!("-maxrate {}", bitrates.max_rate()),
                format!("-bufsize {}", bitrates.target_rate()),
            ]
        } else {
            vec![format!("-cq:v {}", self.config.crf)]
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QsvHandler<'a> {
    config: &'a TranscodeConfig,
}

impl<'a> QsvHandler<'a> {
    pub fn new(config: &'a TranscodeConfig) -> Self {
        Self { config }
    }
}

impl CodecHandler for QsvHandler<'_> {
    fn config(&self) -> &TranscodeConfig {
        self.config
    }

    fn base_input_options(&self) -> Vec<String> {
        vec!["-hwaccel qsv".to_string()]
    }

    fn base_output_options(&self) -> Vec<String> {
        hw_output_options(self.config, HardwareApi::Qsv)
    }

    fn filter_options(&self, stream: &StreamInfo) -> Result<Vec<String>, ConfigError> {
        let mut filters = Vec::new();
        if should_scale(stream, self.config)? {
            filters.push(format!("scale_qsv={}", scaling(stream, self.config)?));
        }
        Ok(filters)
    }

    fn preset_options(&self) -> Vec<String> {
        match hw_preset_rank(self.config) {
            Some(rank) => vec![format!("-preset {}", rank + 1)],
            None => Vec::new(),
        }
    }

    fn thread_options(&self) -> Vec<String> {
        Vec::new()
    }

    fn bitrate_options(&self) -> Vec<String> {
        global_quality_options(self.config)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VaapiHandler<'a> {
    config: &'a TranscodeConfig,
}

impl<'a> VaapiHandler<'a> {
    pub fn new(config: &'a TranscodeConfig) -> Self {
        Self { config }
    }
}

impl CodecHandler for VaapiHandler<'_> {
    fn config(&self) -> &TranscodeConfig {
        self.config
    }

    fn base_input_options(&self) -> Vec<String> {
        vec![
            "-hwaccel vaapi".to_string(),
            "-hwaccel_output_format vaapi".to_string(),
        ]
    }

    fn base_output_options(&self) -> Vec<String> {
        hw_output_options(self.config, HardwareApi::Vaapi)
    }

    fn filter_options(&self, stream: &StreamInfo) -> Result<Vec<String>, ConfigError> {
        let mut filters = vec!["hwupload".to_string()];
        if should_scale(stream, self.config)? {
            filters.push(format!("scale_vaapi={}", scaling(stream, self.config)?));
        }
        Ok(filters)
    }

    fn preset_options(&self) -> Vec<String> {
        match hw_preset_rank(self.config) {
            Some(rank) => vec![format!("-compression_level {}", rank + 1)],
            None => Vec::new(),
        }
    }

    fn thread_options(&self) -> Vec<String> {
        Vec::new()
    }

    fn bitrate_options(&self) -> Vec<String> {
        if bitrate_distribution(self.config).max > 0 {
            return global_quality_options(self.config);
        }

        // VA-API does not default to constant QP, so select it explicitly
        vec![format!("-qp {} -rc_mode 1", self.config.crf)]
    }
}
