use crate::cli::{Cli, Commands, ConfigOverrides, StreamArgs};
use anyhow::{Context, Result};
use ffargs::config::Config;
use ffargs::engine::{
    Handler, HardwareApi, StreamInfo, TranscodeConfig, format_ffmpeg_cmd, should_transcode,
};
use std::path::Path;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Plan {
            stream,
            overrides,
            json,
            argv,
            input,
            output,
        } => handle_plan(&stream, &overrides, json, argv, &input, &output),
        Commands::ShouldTranscode {
            stream,
            overrides,
            video_codec,
            audio_codec,
            container,
        } => {
            let stream = StreamInfo {
                video_codec,
                audio_codec,
                container,
                ..stream_info(&stream)
            };
            handle_should_transcode(&stream, &overrides)
        }
        Commands::Encoders => {
            handle_encoders();
            Ok(())
        }
        Commands::InitConfig => handle_init_config(),
    }
}

fn stream_info(args: &StreamArgs) -> StreamInfo {
    StreamInfo::new(args.height, args.width, args.rotation)
}

fn resolve_config(overrides: &ConfigOverrides) -> Result<TranscodeConfig> {
    let loaded = match &overrides.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let config = apply_overrides(loaded.ffmpeg, overrides);
    debug!(?config, "Resolved transcode config");
    Ok(config)
}

/// Command-line values win over the file; unset flags leave it untouched
fn apply_overrides(
    mut config: TranscodeConfig,
    overrides: &ConfigOverrides,
) -> TranscodeConfig {
    if let Some(codec) = overrides.codec {
        config.target_video_codec = codec;
    }
    if let Some(audio) = overrides.audio {
        config.target_audio_codec = audio;
    }
    if let Some(accel) = overrides.accel {
        config.accel = accel;
    }
    if let Some(preset) = &overrides.preset {
        config.preset = preset.clone();
    }
    if let Some(crf) = overrides.crf {
        config.crf = crf;
    }
    if let Some(max_bitrate) = &overrides.max_bitrate {
        config.max_bitrate = max_bitrate.clone();
    }
    if overrides.two_pass {
        config.two_pass = true;
    }
    if let Some(resolution) = &overrides.resolution {
        config.target_resolution = resolution.clone();
    }
    if let Some(threads) = overrides.threads {
        config.threads = threads;
    }
    if let Some(policy) = overrides.policy {
        config.transcode = policy;
    }
    config
}

fn handle_plan(
    stream: &StreamArgs,
    overrides: &ConfigOverrides,
    json: bool,
    argv: bool,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let config = resolve_config(overrides)?;
    let handler = Handler::for_config(&config);
    let options = handler
        .options(&stream_info(stream))
        .context("Could not plan transcode options")?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&options).context("Failed to serialize options")?;
        println!("{}", rendered);
    } else if argv {
        println!("{}", format_ffmpeg_cmd(&options, input, output));
        if options.two_pass {
            println!("# two-pass encode: run twice with -pass 1 / -pass 2");
        }
    } else {
        println!("Handler:  {}", handler.name());
        println!("Two-pass: {}", options.two_pass);
        println!("Input options:");
        for opt in &options.input_options {
            println!("  {}", opt);
        }
        println!("Output options:");
        for opt in &options.output_options {
            println!("  {}", opt);
        }
    }

    Ok(())
}

fn handle_should_transcode(stream: &StreamInfo, overrides: &ConfigOverrides) -> Result<()> {
    let config = resolve_config(overrides)?;
    let transcode = should_transcode(stream, &config).context("Could not apply policy")?;
    println!("{}", if transcode { "yes" } else { "no" });
    Ok(())
}

fn handle_encoders() {
    println!("Software: h264 (libx264), hevc (libx265), vp9 (libvpx-vp9)");
    for api in HardwareApi::ALL {
        let encoders: Vec<String> = api
            .supported_codecs()
            .iter()
            .map(|codec| api.encoder_name(*codec))
            .collect();
        println!("{}: {}", api.display_name(), encoders.join(", "));
    }
}

fn handle_init_config() -> Result<()> {
    let config_path = Config::config_path()?;

    if Config::exists() {
        println!("Config file exists: {}", config_path.display());
    } else {
        Config::ensure_default()?;
        println!("Created default config: {}", config_path.display());
    }

    Ok(())
}
