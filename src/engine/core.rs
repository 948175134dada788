mod bitrate;
mod error;
mod ffmpeg_cmd;
mod policy;
mod scaling;
mod software;
mod transcode_config;
mod types;

pub use bitrate::{
    PRESETS, bitrate_distribution, bitrate_unit, eligible_for_two_pass, is_bitrate_constrained,
    max_bitrate_value, preset_index,
};
pub use error::ConfigError;
pub(crate) use ffmpeg_cmd::base_output_options;
pub use ffmpeg_cmd::{
    CodecHandler, Handler, build_transcode_options, format_ffmpeg_cmd, transcode_options,
};
pub use policy::should_transcode;
pub use scaling::{is_video_rotated, is_video_vertical, scaling, should_scale, target_resolution};
pub use software::{H264Handler, HevcHandler, Vp9Handler};
pub use transcode_config::{ORIGINAL_RESOLUTION, TranscodeConfig};
pub use types::{
    AudioCodec, BitrateDistribution, StreamInfo, TranscodeAccel, TranscodeOptions,
    TranscodePolicy, VideoCodec,
};
