use super::*;

const MINIMAL: &str = r#"
[baseline]
kind = "json"
tables = "tables.json"
positions = "positions.txt"
"#;

#[test]
fn test_minimal_config_uses_defaults() {
    let config = TunerConfig::parse(MINIMAL).unwrap();
    assert_eq!(config.optimizer, OptimizerSection::default());
    assert_eq!(config.hill_climb_config(), HillClimbConfig::default());
    assert_eq!(config.optimizer.seed, None);
    assert_eq!(config.self_play.ply_limit, 100);
    assert_eq!(config.backend, BackendSection::InProcess);
    assert_eq!(config.output.path, PathBuf::from("pcsq_tables.json"));
    assert_eq!(
        config.baseline,
        BaselineSection::Json {
            tables: "tables.json".into(),
            positions: "positions.txt".into(),
        }
    );
}

#[test]
fn test_baseline_is_required() {
    let err = TunerConfig::parse("[optimizer]\niterations = 3\n").unwrap_err();
    assert!(matches!(err, TunerError::Config { .. }));
}

#[test]
fn test_full_config() {
    let text = r#"
[optimizer]
iterations = 25
batch_size = 8
step = 3
seed = 42
sample_batch = true

[self_play]
ply_limit = 60

[backend]
kind = "external"
program = "./selfplay"

[baseline]
kind = "engine-source"
tables = "Chess Engine/engine2.cpp"
positions = "Chess Engine/Chess Engine.cpp"

[output]
path = "out/tuned.json"
"#;
    let config = TunerConfig::parse(text).unwrap();
    assert_eq!(
        config.hill_climb_config(),
        HillClimbConfig {
            iterations: 25,
            batch_size: 8,
            step: 3,
            sample_batch: true,
        }
    );
    assert_eq!(config.optimizer.seed, Some(42));
    assert_eq!(config.self_play.ply_limit, 60);
    assert_eq!(
        config.backend,
        BackendSection::External {
            program: "./selfplay".into(),
            timeout_ms: 5000,
            first_token: "engine1".into(),
            second_token: "engine2".into(),
        }
    );
    assert_eq!(
        config.baseline,
        BaselineSection::EngineSource {
            tables: "Chess Engine/engine2.cpp".into(),
            positions: "Chess Engine/Chess Engine.cpp".into(),
            positions_array: "fenArray".into(),
        }
    );
    assert_eq!(config.output.path, PathBuf::from("out/tuned.json"));
    assert_eq!(config.build_backend().name(), "external");
    assert!(config.build_provider().describe().contains("fenArray"));
}

#[test]
fn test_unknown_field_rejected() {
    let text = format!("{MINIMAL}\n[optimizer]\niteratons = 4\n");
    assert!(matches!(
        TunerConfig::parse(&text),
        Err(TunerError::Config { .. })
    ));
}

#[test]
fn test_unknown_backend_kind_rejected() {
    let text = format!("{MINIMAL}\n[backend]\nkind = \"remote\"\n");
    assert!(TunerConfig::parse(&text).is_err());
}

#[test]
fn test_zero_timeout_rejected() {
    let text = format!(
        "{MINIMAL}\n[backend]\nkind = \"external\"\nprogram = \"selfplay\"\ntimeout_ms = 0\n"
    );
    assert!(matches!(
        TunerConfig::parse(&text),
        Err(TunerError::InvalidSetting(_))
    ));
}

#[test]
fn test_identical_tokens_rejected() {
    let text = format!(
        "{MINIMAL}\n[backend]\nkind = \"external\"\nprogram = \"selfplay\"\nfirst_token = \"win\"\nsecond_token = \"win\"\n"
    );
    assert!(matches!(
        TunerConfig::parse(&text),
        Err(TunerError::InvalidSetting(_))
    ));
}

#[test]
fn test_zero_batch_rejected() {
    let text = format!("{MINIMAL}\n[optimizer]\nbatch_size = 0\n");
    assert!(matches!(
        TunerConfig::parse(&text),
        Err(TunerError::InvalidSetting(_))
    ));
}

#[test]
fn test_zero_iterations_allowed() {
    let text = format!("{MINIMAL}\n[optimizer]\niterations = 0\n");
    assert_eq!(TunerConfig::parse(&text).unwrap().optimizer.iterations, 0);
}

#[test]
fn test_negative_step_rejected() {
    let text = format!("{MINIMAL}\n[optimizer]\nstep = -2\n");
    assert!(TunerConfig::parse(&text).is_err());
}

#[test]
fn test_seeded_rng_is_reproducible() {
    use rand::Rng;

    let text = format!("{MINIMAL}\n[optimizer]\nseed = 7\n");
    let config = TunerConfig::parse(&text).unwrap();
    let mut a = config.rng();
    let mut b = config.rng();
    for _ in 0..4 {
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}

#[test]
fn test_in_process_backend_uses_ply_limit() {
    let text = format!("{MINIMAL}\n[self_play]\nply_limit = 1\n");
    let config = TunerConfig::parse(&text).unwrap();
    let backend = config.build_backend();
    assert_eq!(backend.name(), "in-process");

    // One ply is not enough to finish this game
    let batch = vec![
        crate::provider::StartingPosition::parse("8/8/8/8/8/8/8/K7 w - - 0 1").unwrap(),
    ];
    assert_eq!(backend.score(&chess_core::TableSet::zeroed(), &batch), 0);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tuner.toml");
    std::fs::write(&path, MINIMAL).unwrap();
    assert!(TunerConfig::load(&path).is_ok());

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        TunerConfig::load(&missing),
        Err(TunerError::Read { .. })
    ));
}
