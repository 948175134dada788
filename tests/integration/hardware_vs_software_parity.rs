// Properties that must hold for every backend, hardware or software

use ffargs::engine::{
    Handler, StreamInfo, TranscodeAccel, TranscodeConfig, bitrate_distribution,
    eligible_for_two_pass,
};
use proptest::prelude::*;

use crate::common::assertions::*;
use crate::common::helpers::*;

fn arb_config() -> impl Strategy<Value = TranscodeConfig> {
    (
        0usize..4,
        0usize..3,
        prop::sample::select(vec![
            "veryslow",
            "medium",
            "veryfast",
            "ultrafast",
            "custom",
        ]),
        0u32..=51,
        prop::sample::select(vec!["", "0", "1500k", "2000k", "8M", "abc"]),
        any::<bool>(),
        prop::sample::select(vec!["original", "480", "720", "1080"]),
        -2i32..=16,
    )
        .prop_map(
            |(accel, codec, preset, crf, max_bitrate, two_pass, resolution, threads)| {
                TranscodeConfig {
                    accel: ALL_ACCELS[accel],
                    target_video_codec: ALL_CODECS[codec],
                    preset: preset.to_string(),
                    crf,
                    max_bitrate: max_bitrate.to_string(),
                    two_pass,
                    target_resolution: resolution.to_string(),
                    threads,
                    ..default_config()
                }
            },
        )
}

fn arb_stream() -> impl Strategy<Value = StreamInfo> {
    (
        16u32..=4320,
        16u32..=7680,
        prop::sample::select(vec![0i32, 90, -90, 180]),
    )
        .prop_map(|(height, width, rotation)| StreamInfo::new(height, width, rotation))
}

#[test]
fn test_every_backend_names_its_encoder_and_audio() {
    for accel in ALL_ACCELS {
        for codec in ALL_CODECS {
            let config = hw_config(accel, codec);
            let options = build_options(&config, &landscape_1080p());
            let vcodec = flag_value(&options.output_options, "-vcodec").expect("-vcodec");

            match Handler::for_config(&config).hardware_api() {
                Some(api) => assert_eq!(vcodec, api.encoder_name(codec)),
                None => assert_eq!(vcodec, codec.as_str()),
            }
            assert_has_option(&options.output_options, "-acodec aac");
            assert_has_option(&options.output_options, "-movflags faststart");
        }
    }
}

proptest! {
    #[test]
    fn proptest_options_build_for_valid_configs(config in arb_config(), stream in arb_stream()) {
        let result = Handler::for_config(&config).options(&stream);
        prop_assert!(result.is_ok());
    }

    #[test]
    fn proptest_two_pass_flag_matches_eligibility(config in arb_config(), stream in arb_stream()) {
        let options = build_options(&config, &stream);
        prop_assert_eq!(options.two_pass, eligible_for_two_pass(&config));
        if !config.two_pass {
            prop_assert!(!options.two_pass);
        }
    }

    #[test]
    fn proptest_single_filter_argument(config in arb_config(), stream in arb_stream()) {
        let options = build_options(&config, &stream);
        let filters = options.output_options.iter().filter(|o| o.starts_with("-vf ")).count();
        prop_assert!(filters <= 1);
    }

    #[test]
    fn proptest_hardware_has_no_thread_options(config in arb_config(), stream in arb_stream()) {
        prop_assume!(config.accel != TranscodeAccel::Disabled);
        let options = build_options(&config, &stream);
        for option in &options.output_options {
            prop_assert!(!option.starts_with("-threads"), "{}", option);
            prop_assert!(!option.contains("-params"), "{}", option);
            prop_assert!(!option.starts_with("-row-mt"), "{}", option);
        }
        prop_assert!(!options.input_options.is_empty());
    }

    #[test]
    fn proptest_software_has_no_input_options(config in arb_config(), stream in arb_stream()) {
        prop_assume!(config.accel == TranscodeAccel::Disabled);
        let options = build_options(&config, &stream);
        prop_assert!(options.input_options.is_empty());
    }

    #[test]
    fn proptest_maxrate_echoes_configured_cap(config in arb_config(), stream in arb_stream()) {
        let expected = bitrate_distribution(&config).max_rate();
        let options = build_options(&config, &stream);
        if let Some(rate) = flag_value(&options.output_options, "-maxrate") {
            prop_assert_eq!(rate, expected.as_str());
        }
    }
}
