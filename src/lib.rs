//! Turns a transcoding configuration and probed stream properties into the
//! ordered ffmpeg options for software (x264, x265, libvpx-vp9) and hardware
//! (NVENC, Quick Sync, VA-API) encoders.

pub mod config;
pub mod engine;
