//! Focused unit tests covering CLI configuration and the zones and score
//! commands.

use super::helpers::{HOTSPOT, QUIET, Workspace, parked_route, write_utf8};
use super::*;
use crate::score::{ScoreArgs, ScoreConfig, execute_score, run_score_with};
use crate::zones::{ZonesArgs, execute_zones};
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

#[rstest]
fn model_config_falls_back_to_defaults() {
    let config = ModelConfig::from(ZonesArgs::default());
    assert_eq!(config.dataset, Utf8PathBuf::from(DEFAULT_DATASET));
    assert_eq!(config.zones, 6);
    assert_eq!(config.seed, 42);
}

#[rstest]
fn init_config_requires_one_row_per_zone(workspace: Workspace) {
    let init = workspace.model().init_config();
    assert_eq!(init.dataset.min_rows, 2);
    assert_eq!(init.engine.zones.zones, 2);
}

#[rstest]
fn converting_score_without_candidates_errors() {
    let err = ScoreConfig::try_from(ScoreArgs::default()).expect_err("missing candidates");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_CANDIDATES);
            assert_eq!(env, ENV_SCORE_CANDIDATES);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_dataset(workspace: Workspace) {
    let config = ModelConfig::resolve(Some(workspace.path("absent.csv")), None, None);
    match config.validate_sources().expect_err("missing dataset") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_DATASET),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories(workspace: Workspace) {
    let dir = workspace.path("nested");
    std::fs::create_dir(&dir).expect("create directory");
    let config = ModelConfig::resolve(Some(dir), None, None);
    match config.validate_sources().expect_err("directory dataset") {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_DATASET),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn zones_report_covers_every_incident(workspace: Workspace) {
    let report = execute_zones(&workspace.model()).expect("zones report");
    assert_eq!(report.incidents, 12);
    assert_eq!(report.zones.len(), 2);
    assert_eq!(report.zones.iter().map(|row| row.incidents).sum::<usize>(), 12);
}

#[rstest]
fn score_prefers_the_quiet_route(workspace: Workspace) {
    let candidates = workspace.write_candidates(
        "candidates.json",
        &[parked_route(HOTSPOT, 10.0), parked_route(QUIET, 12.0)],
    );
    let config = ScoreConfig {
        candidates,
        model: workspace.model(),
    };

    let selection = execute_score(&config).expect("selection");

    assert_eq!(selection.all.len(), 2);
    assert!((selection.best.candidate.distance_km() - 12.0).abs() < f64::EPSILON);
    assert!(selection.best.safety_score() > selection.all[0].safety_score());
}

#[rstest]
fn score_writes_pretty_json(workspace: Workspace) {
    let candidates = workspace.write_candidates("candidates.json", &[parked_route(QUIET, 5.0)]);
    let config = ScoreConfig {
        candidates,
        model: workspace.model(),
    };
    let mut output = Vec::new();

    run_score_with(&config, &mut output).expect("score runs");

    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert!(value["best"]["assessment"]["safety_score"].is_number());
    assert!(output.ends_with(b"\n"));
}

#[rstest]
fn score_reports_malformed_candidates(workspace: Workspace) {
    let candidates = workspace.path("broken.json");
    write_utf8(&candidates, b"{\"not\": \"a list\"}");
    let config = ScoreConfig {
        candidates,
        model: workspace.model(),
    };
    match execute_score(&config).expect_err("malformed file") {
        CliError::ParseCandidates { .. } => {}
        other => panic!("expected ParseCandidates, found {other:?}"),
    }
}

#[rstest]
fn score_without_candidates_reports_no_route(workspace: Workspace) {
    let candidates = workspace.path("empty.json");
    write_utf8(&candidates, b"[]");
    let config = ScoreConfig {
        candidates,
        model: workspace.model(),
    };
    match execute_score(&config).expect_err("no candidates") {
        CliError::NoRoute(_) => {}
        other => panic!("expected NoRoute, found {other:?}"),
    }
}

#[rstest]
fn cli_parses_score_invocation() {
    let cli = Cli::try_parse_from(["safar", "score", "routes.json", "--zones", "3"]).expect("parses");
    match cli.command {
        Command::Score(args) => {
            assert_eq!(args.candidates, Some(Utf8PathBuf::from("routes.json")));
            assert_eq!(args.zones, Some(3));
        }
        other => panic!("expected score command, found {other:?}"),
    }
}
