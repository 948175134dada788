use std::path::Path;

use tracing::{debug, warn};

use super::bitrate::eligible_for_two_pass;
use super::error::ConfigError;
use super::scaling::{scaling, should_scale};
use super::software::{H264Handler, HevcHandler, Vp9Handler};
use super::transcode_config::TranscodeConfig;
use super::types::{StreamInfo, TranscodeAccel, TranscodeOptions, VideoCodec};
use crate::engine::hardware::{HardwareApi, NvencHandler, QsvHandler, VaapiHandler};

/// One encoder backend's contribution to an ffmpeg command.
///
/// Every step returns complete option strings ("-crf 23"). The defaults are
/// the software behaviour; backends override only what differs.
pub trait CodecHandler {
    fn config(&self) -> &TranscodeConfig;

    /// Options placed before `-i`
    fn base_input_options(&self) -> Vec<String> {
        Vec::new()
    }

    fn base_output_options(&self) -> Vec<String> {
        let config = self.config();
        base_output_options(config, config.target_video_codec.as_str())
    }

    /// Individual filters, joined with ',' into a single `-vf`
    fn filter_options(&self, stream: &StreamInfo) -> Result<Vec<String>, ConfigError> {
        let mut filters = Vec::new();
        if should_scale(stream, self.config())? {
            filters.push(format!("scale={}", scaling(stream, self.config())?));
        }
        Ok(filters)
    }

    fn preset_options(&self) -> Vec<String> {
        vec![format!("-preset {}", self.config().preset)]
    }

    fn thread_options(&self) -> Vec<String> {
        thread_count_options(self.config())
    }

    fn bitrate_options(&self) -> Vec<String>;

    fn options(&self, stream: &StreamInfo) -> Result<TranscodeOptions, ConfigError>
    where
        Self: Sized,
    {
        build_transcode_options(self, stream)
    }
}

/// Codec, audio codec, faststart and passthrough frame timing
pub(crate) fn base_output_options(config: &TranscodeConfig, video_encoder: &str) -> Vec<String> {
    vec![
        format!("-vcodec {}", video_encoder),
        format!("-acodec {}", config.target_audio_codec),
        // moov atom up front so playback can start before the download finishes
        "-movflags faststart".to_string(),
        "-fps_mode passthrough".to_string(),
    ]
}

pub(crate) fn thread_count_options(config: &TranscodeConfig) -> Vec<String> {
    if config.threads <= 0 {
        return Vec::new();
    }
    vec![format!("-threads {}", config.threads)]
}

/// Run the handler's steps in their fixed order. Later output options may
/// deliberately override earlier ones, so the order is part of the contract.
pub fn build_transcode_options(
    handler: &dyn CodecHandler,
    stream: &StreamInfo,
) -> Result<TranscodeOptions, ConfigError> {
    let mut output_options = handler.base_output_options();

    let filters = handler.filter_options(stream)?;
    if !filters.is_empty() {
        output_options.push(format!("-vf {}", filters.join(",")));
    }

    output_options.extend(handler.preset_options());
    output_options.extend(handler.thread_options());
    output_options.extend(handler.bitrate_options());

    let options = TranscodeOptions {
        input_options: handler.base_input_options(),
        output_options,
        two_pass: eligible_for_two_pass(handler.config()),
    };
    debug!(
        input = ?options.input_options,
        output = ?options.output_options,
        two_pass = options.two_pass,
        "Assembled transcode options"
    );
    Ok(options)
}

/// The six backends as flat variants
#[derive(Debug, Clone, Copy)]
pub enum Handler<'a> {
    H264(H264Handler<'a>),
    Hevc(HevcHandler<'a>),
    Vp9(Vp9Handler<'a>),
    Nvenc(NvencHandler<'a>),
    Qsv(QsvHandler<'a>),
    Vaapi(VaapiHandler<'a>),
}

impl<'a> Handler<'a> {
    /// Pick the backend from `accel`, and for software encoding the codec.
    /// Hardware codec support is only reported, never enforced.
    pub fn for_config(config: &'a TranscodeConfig) -> Self {
        let handler = match config.accel {
            TranscodeAccel::Disabled => match config.target_video_codec {
                VideoCodec::H264 => Self::H264(H264Handler::new(config)),
                VideoCodec::Hevc => Self::Hevc(HevcHandler::new(config)),
                VideoCodec::Vp9 => Self::Vp9(Vp9Handler::new(config)),
            },
            TranscodeAccel::Nvenc => Self::Nvenc(NvencHandler::new(config)),
            TranscodeAccel::Qsv => Self::Qsv(QsvHandler::new(config)),
            TranscodeAccel::Vaapi => Self::Vaapi(VaapiHandler::new(config)),
        };

        if let Some(api) = handler.hardware_api() {
            if !api.supports(config.target_video_codec) {
                warn!(
                    backend = api.display_name(),
                    codec = %config.target_video_codec,
                    "Hardware backend does not list this codec as supported"
                );
            }
        }
        debug!(handler = handler.name(), "Selected codec handler");

        handler
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::H264(_) => "h264",
            Self::Hevc(_) => "hevc",
            Self::Vp9(_) => "vp9",
            Self::Nvenc(_) => "nvenc",
            Self::Qsv(_) => "qsv",
            Self::Vaapi(_) => "vaapi",
        }
    }

    pub fn hardware_api(&self) -> Option<HardwareApi> {
        match self {
            Self::Nvenc(_) => Some(HardwareApi::Nvenc),
            Self::Qsv(_) => Some(HardwareApi::Qsv),
            Self::Vaapi(_) => Some(HardwareApi::Vaapi),
            _ => None,
        }
    }

    pub fn as_codec_handler(&self) -> &dyn CodecHandler {
        match self {
            Self::H264(h) => h,
            Self::Hevc(h) => h,
            Self::Vp9(h) => h,
            Self::Nvenc(h) => h,
            Self::Qsv(h) => h,
            Self::Vaapi(h) => h,
        }
    }

    pub fn options(&self, stream: &StreamInfo) -> Result<TranscodeOptions, ConfigError> {
        build_transcode_options(self.as_codec_handler(), stream)
    }
}

/// Select the handler for `config` and assemble its options
pub fn transcode_options(
    config: &TranscodeConfig,
    stream: &StreamInfo,
) -> Result<TranscodeOptions, ConfigError> {
    Handler::for_config(config).options(stream)
}

/// Split one option string into argv entries, honouring shell quoting
fn split_option(option: &str) -> Vec<String> {
    // Unbalanced quotes fall back to plain whitespace splitting
    shlex::split(option)
        .unwrap_or_else(|| option.split_whitespace().map(str::to_string).collect())
}

impl TranscodeOptions {
    /// Full ffmpeg argv (without the program name)
    pub fn to_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args: Vec<String> = self
            .input_options
            .iter()
            .flat_map(|opt| split_option(opt))
            .collect();
        args.push("-i".to_string());
        args.push(input.to_string_lossy().to_string());
        args.extend(self.output_options.iter().flat_map(|opt| split_option(opt)));
        args.push(output.to_string_lossy().to_string());
        args
    }
}

/// Render the ffmpeg invocation on one line, quoting where a shell would need it
pub fn format_ffmpeg_cmd(options: &TranscodeOptions, input: &Path, output: &Path) -> String {
    let args = options.to_args(input, output);
    let quoted: Vec<String> = args
        .iter()
        .map(|arg| {
            shlex::try_quote(arg)
                .map(|q| q.into_owned())
                .unwrap_or_else(|_| arg.clone())
        })
        .collect();
    format!("ffmpeg {}", quoted.join(" "))
}
