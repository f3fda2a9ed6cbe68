use super::*;

fn c_array(ident: &str, values: &[i32]) -> String {
    let body: Vec<String> = values.iter().map(|v| format!("{v:4}")).collect();
    format!(
        "const int64_t {ident}[64] = {{\n    {}\n}};\n",
        body.join(",")
    )
}

fn engine_source(skip: Option<TableName>) -> String {
    let mut src = String::from("#include \"engine.h\"\n\n");
    for (i, name) in TableName::ALL.into_iter().enumerate() {
        if Some(name) == skip {
            continue;
        }
        let values: Vec<i32> = (0..64).map(|sq| sq - 32 + i as i32).collect();
        src.push_str(&c_array(name.ident(), &values));
        src.push('\n');
    }
    src.push_str("double_t evaluate(Board& board) { return 0; }\n");
    src
}

const POSITIONS_SOURCE: &str = r#"
const char* fenArrayShort[] = {
    "8/8/8/8/8/8/8/K6k w - - bm Kb1",
};

const char* fenArray[] = {
"r1bqk1r1/1p1p1n2/p1n2pN1/2p1b2Q/2P1Pp2/1PN5/PB4PP/R4RK1 w q - - bm Rxf4",
"r1n2N1k/2n2K1p/3pp3/5Pp1/b5R1/8/1PPP4/8 w - - bm Ng6",
"5rk1/pp1b4/4pqp1/2Ppb2p/1P2p3/4Q2P/P3BPP1/1R3R1K b - - bm d4" };
"#;

#[test]
fn test_extract_positions_picks_named_array() {
    let fens = extract_positions(POSITIONS_SOURCE, "fenArray").unwrap();
    assert_eq!(fens.len(), 3);
    assert!(fens[1].starts_with("r1n2N1k/"));

    let short = extract_positions(POSITIONS_SOURCE, "fenArrayShort").unwrap();
    assert_eq!(short, vec!["8/8/8/8/8/8/8/K6k w - - bm Kb1".to_string()]);

    assert!(extract_positions(POSITIONS_SOURCE, "fenArrayLong").is_none());
}

#[test]
fn test_extract_table_does_not_confuse_prefixes() {
    let src = engine_source(None);
    let white = extract_table(&src, "king_pcsq").unwrap();
    let black = extract_table(&src, "king_pcsq_black").unwrap();
    assert_eq!(white[0], -32 + 3);
    assert_eq!(black[0], -32 + 4);
    assert_eq!(white.len(), 64);
}

#[test]
fn test_tables_from_source() {
    let src = engine_source(None);
    let tables = tables_from_source(&src, Path::new("engine2.cpp")).unwrap();
    assert_eq!(tables.pawn.get(0), -32);
    assert_eq!(tables.pawn.get(63), 31);
    assert_eq!(tables.king_endgame.get(10), 10 - 32 + 5);
}

#[test]
fn test_tables_from_source_missing_table_fails() {
    let src = engine_source(Some(TableName::KingBlack));
    let err = tables_from_source(&src, Path::new("engine.cpp")).unwrap_err();
    assert!(matches!(
        err,
        TunerError::Tables(chess_core::TableError::Missing(TableName::KingBlack))
    ));
}

#[test]
fn test_tables_from_source_short_table_fails() {
    let mut src = engine_source(Some(TableName::Knight));
    src.push_str(&c_array("knight_pcsq", &[1, 2, 3]));
    let err = tables_from_source(&src, Path::new("engine.cpp")).unwrap_err();
    assert!(matches!(
        err,
        TunerError::Tables(chess_core::TableError::WrongLengthFor {
            name: TableName::Knight,
            len: 3
        })
    ));
}

#[test]
fn test_engine_source_provider_loads_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let tables_path = dir.path().join("engine2.cpp");
    let positions_path = dir.path().join("Chess Engine.cpp");
    std::fs::write(&tables_path, engine_source(None)).unwrap();
    std::fs::write(&positions_path, POSITIONS_SOURCE).unwrap();

    let baseline = EngineSourceProvider::new(&tables_path, &positions_path)
        .load()
        .unwrap();
    assert_eq!(baseline.corpus.len(), 3);
    assert_eq!(
        baseline.corpus[2].position.side_to_move,
        chess_core::Color::Black
    );
    // The raw string is kept verbatim for external programs
    assert!(baseline.corpus[0].fen.ends_with("bm Rxf4"));
}

#[test]
fn test_engine_source_provider_missing_positions_block() {
    let dir = tempfile::tempdir().unwrap();
    let tables_path = dir.path().join("engine2.cpp");
    std::fs::write(&tables_path, engine_source(None)).unwrap();

    // The table file has no position array
    let provider = EngineSourceProvider::new(&tables_path, &tables_path);
    assert!(matches!(
        provider.load(),
        Err(TunerError::MissingBlock { .. })
    ));
}

#[test]
fn test_malformed_corpus_entries_are_skipped() {
    let fens = [
        "r1n2N1k/2n2K1p/3pp3/5Pp1/b5R1/8/1PPP4/8 w - - bm Ng6",
        // Second rank only describes seven files
        "2b1r3/r2ppN2/8/1p1p1k2/pP1P4/2P3R1/4BP1/2K5 w - - bm Nd6",
        "5rk1/pp1b4/4pqp1/2Ppb2p/1P2p3/4Q2P/P3BPP1/1R3R1K b - - bm d4",
    ];
    let baseline = Baseline::from_parts(TableSet::zeroed(), &fens).unwrap();
    assert_eq!(baseline.corpus.len(), 2);
    assert_eq!(baseline.corpus[0].fen, fens[0]);
    assert_eq!(baseline.corpus[1].fen, fens[2]);
}

#[test]
fn test_corpus_without_valid_positions_fails() {
    let err =
        Baseline::from_parts(TableSet::zeroed(), &["8/8/8 w", "not a position"]).unwrap_err();
    assert!(matches!(err, TunerError::EmptyCorpus { entries: 2 }));

    let none: [&str; 0] = [];
    assert!(matches!(
        Baseline::from_parts(TableSet::zeroed(), &none),
        Err(TunerError::EmptyCorpus { entries: 0 })
    ));
}

#[test]
fn test_engine_source_provider_skips_defective_entry() {
    let dir = tempfile::tempdir().unwrap();
    let tables_path = dir.path().join("engine2.cpp");
    let positions_path = dir.path().join("Chess Engine.cpp");
    std::fs::write(&tables_path, engine_source(None)).unwrap();
    let positions = POSITIONS_SOURCE.replace(
        "\"r1n2N1k/",
        "\"2b1r3/r2ppN2/8/1p1p1k2/pP1P4/2P3R1/4BP1/2K5 w - - bm Nd6\",\n\"r1n2N1k/",
    );
    std::fs::write(&positions_path, positions).unwrap();

    let baseline = EngineSourceProvider::new(&tables_path, &positions_path)
        .load()
        .unwrap();
    assert_eq!(baseline.corpus.len(), 3);
    assert!(baseline.corpus.iter().all(|p| !p.fen.starts_with("2b1r3")));
}

#[test]
fn test_json_provider() {
    let dir = tempfile::tempdir().unwrap();
    let tables_path = dir.path().join("tables.json");
    let positions_path = dir.path().join("positions.txt");
    let tables = TableSet::zeroed().map_weights(|_, _| 4);
    crate::results::save_tables(&tables, &tables_path).unwrap();
    std::fs::write(
        &positions_path,
        "# opening corpus\n\n4k3/8/8/8/8/8/4P3/4K3 w - - 0 1\n  8/8/8/8/8/8/8/K6k b  \n",
    )
    .unwrap();

    let baseline = JsonFileProvider::new(&tables_path, &positions_path)
        .load()
        .unwrap();
    assert_eq!(baseline.tables, tables);
    assert_eq!(baseline.corpus.len(), 2);
    assert_eq!(baseline.corpus[1].fen, "8/8/8/8/8/8/8/K6k b");
}
