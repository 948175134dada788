//! Software encoders: libx264, libx265 and libvpx-vp9.

use super::bitrate::{bitrate_distribution, eligible_for_two_pass, preset_index};
use super::ffmpeg_cmd::{CodecHandler, thread_count_options};
use super::transcode_config::TranscodeConfig;
use super::types::BitrateDistribution;

/// libvpx-vp9 switches to realtime mode above this speed, which overrides
/// both -crf and -threads
const VP9_MAX_SPEED: usize = 5;

/// `-b:v`/`-minrate`/`-maxrate` for a two-pass average bitrate encode
pub(crate) fn two_pass_bitrate_options(bitrates: &BitrateDistribution) -> Vec<String> {
    vec![
        format!("-b:v {}", bitrates.target_rate()),
        format!("-minrate {}", bitrates.min_rate()),
        format!("-maxrate {}", bitrates.max_rate()),
    ]
}

/// libx264. Also the base of [`HevcHandler`], which differs only in the
/// name of the private-params flag.
#[derive(Debug, Clone, Copy)]
pub struct H264Handler<'a> {
    config: &'a TranscodeConfig,
    params_flag: &'static str,
}

impl<'a> H264Handler<'a> {
    pub fn new(config: &'a TranscodeConfig) -> Self {
        Self {
            config,
            params_flag: "-x264-params",
        }
    }
}

impl CodecHandler for H264Handler<'_> {
    fn config(&self) -> &TranscodeConfig {
        self.config
    }

    fn thread_options(&self) -> Vec<String> {
        if self.config.threads <= 0 {
            return Vec::new();
        }

        // pools=none and frame-threads must be set together, otherwise the
        // encoder spins up its own thread pool regardless of -threads
        let mut options = thread_count_options(self.config);
        options.push(format!("{} \"pools=none\"", self.params_flag));
        options.push(format!(
            "{} \"frame-threads={}\"",
            self.params_flag, self.config.threads
        ));
        options
    }

    fn bitrate_options(&self) -> Vec<String> {
        let bitrates = bitrate_distribution(self.config);
        if eligible_for_two_pass(self.config) {
            two_pass_bitrate_options(&bitrates)
        } else if bitrates.max > 0 {
            // -maxrate is the rolling average cap, -bufsize the peak allowance
            vec![
                format!("-crf {}", self.config.crf),
                format!("-maxrate {}", bitrates.max_rate()),
                format!(
                    "-bufsize {}{}",
                    bitrates.max.saturating_mul(2),
                    bitrates.unit
                ),
            ]
        } else {
            vec![format!("-crf {}", self.config.crf)]
        }
    }
}

/// libx265: the H.264 handler with x265 thread parameters
#[derive(Debug, Clone, Copy)]
pub struct HevcHandler<'a> {
    inner: H264Handler<'a>,
}

impl<'a> HevcHandler<'a> {
    pub fn new(config: &'a TranscodeConfig) -> Self {
        Self {
            inner: H264Handler {
                params_flag: "-x265-params",
                ..H264Handler::new(config)
            },
        }
    }
}

impl CodecHandler for HevcHandler<'_> {
    fn config(&self) -> &TranscodeConfig {
        self.inner.config()
    }

    fn thread_options(&self) -> Vec<String> {
        self.inner.thread_options()
    }

    fn bitrate_options(&self) -> Vec<String> {
        self.inner.bitrate_options()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Vp9Handler<'a> {
    config: &'a TranscodeConfig,
}

impl<'a> Vp9Handler<'a> {
    pub fn new(config: &'a TranscodeConfig) -> Self {
        Self { config }
    }
}

impl CodecHandler for Vp9Handler<'_> {
    fn config(&self) -> &TranscodeConfig {
        self.config
    }

    fn preset_options(&self) -> Vec<String> {
        match preset_index(&self.config.preset) {
            Some(rank) => vec![format!("-cpu-used {}", rank.min(VP9_MAX_SPEED))],
            None => Vec::new(),
        }
    }

    fn thread_options(&self) -> Vec<String> {
        let mut options = vec!["-row-mt 1".to_string()];
        options.extend(thread_count_options(self.config));
        options
    }

    fn bitrate_options(&self) -> Vec<String> {
        let bitrates = bitrate_distribution(self.config);
        if eligible_for_two_pass(self.config) {
            return two_pass_bitrate_options(&bitrates);
        }

        // constant quality still wants a ceiling; -b:v 0 means none
        vec![
            format!("-crf {}", self.config.crf),
            format!("-b:v {}", bitrates.max_rate()),
        ]
    }
}
