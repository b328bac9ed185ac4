use std::path::PathBuf;

use hueshift_common::config::ProcessingConfig;
use hueshift_expression_model::emotion::{EmotionDefinition, EmotionHueTable, NEUTRAL};
use hueshift_expression_model::event::{parse_events, ParameterEvent};
use hueshift_expression_model::parameter::{ParameterDescriptor, ParameterRegistry, PolarityRule};
use hueshift_expression_model::profile::ExpressionProfile;
use hueshift_processing_core::{
    blend_hue, score_emotions, EmotionPipeline, HueEmission, MatchStrategy, NameResolver,
    ParameterSnapshot, Smoother, SmoothingMethod,
};

fn load_fixture_events() -> Vec<ParameterEvent> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("events.jsonl");

    let content = std::fs::read_to_string(path).expect("fixture events should be readable");
    parse_events(&content).expect("fixture events should parse")
}

fn replay(pipeline: &mut EmotionPipeline, events: &[ParameterEvent]) -> Vec<HueEmission> {
    events
        .iter()
        .filter_map(|event| pipeline.process(event, event.timestamp_ms.unwrap_or(0)))
        .collect()
}

#[test]
fn happy_raw_score_above_one_is_clamped() {
    let happy = EmotionDefinition::new("happy")
        .with_weight("mouthSmile", 0.6)
        .with_weight("eyeLidLeft", -0.4)
        .with_weight("eyeLidRight", -0.4);
    let snapshot = ParameterSnapshot::from_values([
        ("mouthSmile", 1.0),
        ("eyeLidLeft", 0.0),
        ("eyeLidRight", 0.0),
    ]);

    let report = score_emotions(&snapshot, &[happy]);
    assert_eq!(report.scores.get("happy"), Some(1.0));
    assert_eq!(report.dominant, "happy");
}

#[test]
fn all_zero_snapshot_emits_neutral_hue() {
    let profile = ExpressionProfile::default();
    let snapshot = ParameterSnapshot::from_registry(&profile.build_registry().unwrap());
    let report = score_emotions(&snapshot, &profile.emotions);

    for emotion in &profile.emotions {
        assert_eq!(report.scores.get(&emotion.name), Some(0.0));
    }
    assert_eq!(report.scores.neutral(), 1.0);
    assert_eq!(report.dominant, NEUTRAL);
    assert_eq!(blend_hue(&report.scores, &profile.hues), profile.hues.neutral().unwrap());
}

#[test]
fn alias_and_case_insensitive_resolution() {
    let registry = ParameterRegistry::from_descriptors([ParameterDescriptor::new(
        "eyeBlinkLeft",
        ["EyeBlinkLeft", "LeftEyeBlink"],
    )])
    .unwrap();
    let resolver = NameResolver::new(registry, Vec::<PolarityRule>::new());
    let mut snapshot = ParameterSnapshot::from_registry(resolver.registry());

    let exact = resolver.resolve("LeftEyeBlink", 0.25, &mut snapshot);
    assert_eq!(exact.strategy(), Some(MatchStrategy::Exact));
    assert_eq!(snapshot.get("eyeBlinkLeft"), 0.25);

    let folded = resolver.resolve("leftEYEBLINK", 0.75, &mut snapshot);
    assert_eq!(folded.strategy(), Some(MatchStrategy::CaseInsensitive));
    assert_eq!(snapshot.get("eyeBlinkLeft"), 0.75);
}

#[test]
fn simple_average_window_of_three_ramps_up() {
    let mut smoother = Smoother::new(SmoothingMethod::SimpleAverage, 3).unwrap();
    let outputs: Vec<f64> = [0.9, 0.9, 0.9].iter().map(|&v| smoother.smooth(v)).collect();

    for (got, want) in outputs.iter().zip([0.3, 0.6, 0.9]) {
        assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
    }
}

#[test]
fn unknown_smoothing_method_refuses_to_start() {
    let config = ProcessingConfig {
        smoothing_method: "rolling_median".into(),
        ..Default::default()
    };
    let err = EmotionPipeline::new(&config, &ExpressionProfile::default()).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn duplicate_alias_refuses_to_start() {
    let mut profile = ExpressionProfile::default();
    profile
        .parameters
        .push(ParameterDescriptor::new("otherJaw", ["JawOpen"]));
    let err = EmotionPipeline::new(&ProcessingConfig::default(), &profile).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("JawOpen"));
}

#[test]
fn throttle_emits_once_per_interval() {
    let mut pipeline = EmotionPipeline::with_defaults().unwrap();
    let event = ParameterEvent::new("MouthSmile", 0.5);

    assert!(pipeline.process(&event, 0).is_some());
    assert!(pipeline.process(&event, 999).is_none());
    assert!(pipeline.process(&event, 1000).is_some());
    assert!(pipeline.process(&event, 2500).is_some());

    // Throttled events still update the snapshot
    pipeline.process(&ParameterEvent::new("MouthSmile", 0.1), 2600);
    assert_eq!(pipeline.snapshot().get("mouthSmile"), 0.1);
    assert_eq!(pipeline.diagnostics().emissions, 3);
}

#[test]
fn fixture_session_replays_deterministically() {
    let events = load_fixture_events();
    assert_eq!(events.len(), 9);

    let mut pipeline = EmotionPipeline::with_defaults().unwrap();
    let emissions = replay(&mut pipeline, &events);

    let times: Vec<u64> = emissions.iter().map(|e| e.timestamp_ms).collect();
    assert_eq!(times, vec![0, 1000, 2100, 3200]);

    let dominants: Vec<&str> = emissions.iter().map(|e| e.dominant.as_str()).collect();
    assert_eq!(dominants, vec![NEUTRAL, "happy", "sad", "sad"]);

    assert!((emissions[0].raw_hue - 0.02).abs() < 1e-12);
    assert!((emissions[1].raw_hue - 0.19).abs() < 1e-12);

    // Normalized: happy 0.2, sad 0.8
    let (pw, sw) = (0.8_f64.powi(3), 0.2_f64.powi(2));
    let expected = (0.58 * pw + 0.19 * sw) / (pw + sw);
    assert!((emissions[2].raw_hue - expected).abs() < 1e-9);

    for emission in &emissions {
        assert!((0.0..=1.0).contains(&emission.hue));
    }

    let diag = pipeline.diagnostics();
    assert_eq!(diag.total_events, 9);
    assert_eq!(diag.recognized_events, 8);
    assert_eq!(diag.unrecognized_events, 1);
    assert_eq!(diag.malformed_values, 1);
    assert_eq!(diag.emissions, 4);
    assert_eq!(diag.top_unrecognized(5), vec![("UnknownThing", 1)]);

    // Same input, same output
    let mut again = EmotionPipeline::with_defaults().unwrap();
    assert_eq!(replay(&mut again, &events), emissions);
}

#[test]
fn custom_profile_drives_hue() {
    let profile = ExpressionProfile {
        parameters: vec![ParameterDescriptor::new("grin", ["Grin"])],
        polarity: vec![],
        emotions: vec![EmotionDefinition::new("joy").with_weight("grin", 1.0)],
        hues: EmotionHueTable::new().with_hue("joy", 0.7).with_hue(NEUTRAL, 0.1),
        color_ranges: ExpressionProfile::default().color_ranges,
    };
    let config = ProcessingConfig {
        smoothing_window_size: 1,
        throttle_ms: 0,
        ..Default::default()
    };
    let mut pipeline = EmotionPipeline::new(&config, &profile).unwrap();

    let emission = pipeline.process(&ParameterEvent::new("Grin", 0.4), 0).unwrap();
    assert!((emission.hue - 0.7).abs() < 1e-12);
    assert_eq!(pipeline.color_label(emission.hue), Some("Purple"));
}
