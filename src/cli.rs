use clap::{Args, Parser, Subcommand};
use ffargs::engine::{AudioCodec, TranscodeAccel, TranscodePolicy, VideoCodec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffargs")]
#[command(about = "Plan ffmpeg transcode options for software and hardware encoders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the ffmpeg options for a video stream
    Plan {
        #[command(flatten)]
        stream: StreamArgs,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Print as JSON instead of one option per line
        #[arg(long, conflicts_with = "argv")]
        json: bool,

        /// Print the complete ffmpeg command line
        #[arg(long)]
        argv: bool,

        /// Input path used with --argv
        #[arg(long, default_value = "input.mp4")]
        input: PathBuf,

        /// Output path used with --argv
        #[arg(long, default_value = "output.mp4")]
        output: PathBuf,
    },

    /// Decide whether the configured policy would transcode a stream
    ShouldTranscode {
        #[command(flatten)]
        stream: StreamArgs,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Probed video codec (e.g. h264)
        #[arg(long)]
        video_codec: Option<String>,

        /// Probed audio codec (e.g. aac)
        #[arg(long)]
        audio_codec: Option<String>,

        /// Probed container format name (e.g. "mov,mp4,m4a,3gp,3g2,mj2")
        #[arg(long)]
        container: Option<String>,
    },

    /// List hardware backends and the codecs they can encode
    Encoders,

    /// Show config status and location, or create default config if missing
    InitConfig,
}

#[derive(Args)]
pub struct StreamArgs {
    /// Stream width in pixels
    #[arg(long)]
    pub width: u32,

    /// Stream height in pixels
    #[arg(long)]
    pub height: u32,

    /// Display rotation in degrees
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub rotation: i32,
}

/// Per-run overrides applied on top of the loaded config
#[derive(Args)]
pub struct ConfigOverrides {
    /// Read settings from this file instead of the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub codec: Option<VideoCodec>,

    #[arg(long)]
    pub audio: Option<AudioCodec>,

    #[arg(long)]
    pub accel: Option<TranscodeAccel>,

    #[arg(long)]
    pub preset: Option<String>,

    #[arg(long)]
    pub crf: Option<u32>,

    /// Maximum bitrate, e.g. 4500k; 0 for unconstrained
    #[arg(long)]
    pub max_bitrate: Option<String>,

    #[arg(long)]
    pub two_pass: bool,

    /// "original" or the short-side pixel count
    #[arg(long)]
    pub resolution: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub threads: Option<i32>,

    #[arg(long)]
    pub policy: Option<TranscodePolicy>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
