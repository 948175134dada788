// Integration tests going from a config.toml on disk to ffmpeg options

use std::fs;

use ffargs::config::Config;
use ffargs::engine::{
    StreamInfo, TranscodeAccel, TranscodePolicy, VideoCodec, should_transcode, transcode_options,
};
use tempfile::TempDir;

use crate::common::assertions::*;
use crate::common::helpers::*;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn test_file_settings_reach_options() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        r#"
[ffmpeg]
target_video_codec = "hevc"
accel = "qsv"
preset = "slow"
crf = 28
max_bitrate = "6000k"
target_resolution = "1080"
"#,
    );

    let config = Config::load_from(&path)?;
    assert_eq!(config.ffmpeg.accel, TranscodeAccel::Qsv);
    assert_eq!(config.ffmpeg.target_video_codec, VideoCodec::Hevc);

    let options = transcode_options(&config.ffmpeg, &StreamInfo::new(2160, 3840, 0))?;
    assert_eq!(options.input_options, vec!["-hwaccel qsv"]);
    assert_has_option(&options.output_options, "-vcodec hevc_qsv");
    assert_has_option(&options.output_options, "-vf scale_qsv=-2:1080");
    assert_has_option(&options.output_options, "-preset 3");
    assert_has_option(&options.output_options, "-global_quality 28");
    assert_has_option(&options.output_options, "-maxrate 6000k");
    Ok(())
}

#[test]
fn test_missing_keys_fall_back_to_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, "[ffmpeg]\ncrf = 30\n");

    let config = Config::load_from(&path)?;
    let options = transcode_options(&config.ffmpeg, &landscape_1080p())?;

    // defaults: h264, ultrafast, 720, no cap
    assert_has_option(&options.output_options, "-vcodec h264");
    assert_has_option(&options.output_options, "-preset ultrafast");
    assert_has_option(&options.output_options, "-vf scale=-2:720");
    assert_eq!(options.output_options.last().map(String::as_str), Some("-crf 30"));
    Ok(())
}

#[test]
fn test_malformed_resolution_from_file_is_reported() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, "[ffmpeg]\ntarget_resolution = \"720p\"\n");

    let config = Config::load_from(&path)?;
    let err = transcode_options(&config.ffmpeg, &landscape_1080p()).unwrap_err();
    assert!(err.to_string().contains("720p"), "error was: {}", err);
    Ok(())
}

#[test]
fn test_policy_from_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(
        &dir,
        "[ffmpeg]\ntranscode = \"optimal\"\ntarget_resolution = \"720\"\n",
    );
    let config = Config::load_from(&path)?;
    assert_eq!(config.ffmpeg.transcode, TranscodePolicy::Optimal);

    let web_ready = StreamInfo {
        video_codec: Some("h264".to_string()),
        audio_codec: Some("aac".to_string()),
        container: Some("mov,mp4,m4a,3gp,3g2,mj2".to_string()),
        ..StreamInfo::new(1080, 1920, 0)
    };
    // codecs already match, but the stream is larger than the target
    assert!(should_transcode(&web_ready, &config.ffmpeg)?);

    let small = StreamInfo {
        height: 480,
        width: 854,
        ..web_ready
    };
    assert!(!should_transcode(&small, &config.ffmpeg)?);
    Ok(())
}

#[test]
fn test_saved_config_reloads_identically() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.ffmpeg = hw_config(TranscodeAccel::Vaapi, VideoCodec::Vp9);
    config.ffmpeg.max_bitrate = "2500k".to_string();
    config.save_to(&path)?;

    let reloaded = Config::load_from(&path)?;
    assert_eq!(reloaded, config);
    assert_eq!(
        transcode_options(&reloaded.ffmpeg, &landscape_1080p())?,
        transcode_options(&config.ffmpeg, &landscape_1080p())?
    );
    Ok(())
}
