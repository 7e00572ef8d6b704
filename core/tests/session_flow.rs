use tongyin_core::{
    encode_alternatives, Classification, Config, Corpus, Engine, Segment, TableOracle,
};

/// Session-level tests: loading, configuration and threshold moves.

#[test]
fn json_corpus_drives_an_engine() {
    let corpus = Corpus::from_json_str(r#"["甲", null, "乙", "丙"]"#).unwrap();
    let mut oracle = TableOracle::new();
    oracle.insert('甲', ["he2"]);
    oracle.insert('乙', ["he2"]);
    oracle.insert('丙', ["he2"]);
    let engine = Engine::new(corpus, oracle, 1);
    assert_eq!(engine.transform_plain("乙丙", false), "甲甲");
}

#[test]
fn threshold_moves_apply_to_later_calls_only() {
    let mut engine = Engine::load_demo(29);
    assert_eq!(engine.transform_plain("河", false), "河");
    engine.set_threshold(28);
    let rewritten = engine.transform_plain("河", false);
    assert_ne!(rewritten, "河");
    engine.set_threshold(29);
    assert_eq!(engine.transform_plain("河", false), "河");
}

#[test]
fn corpus_chars_unknown_to_the_oracle_stay_put() {
    let corpus = Corpus::from_entries(["甲", "乙"]);
    let mut oracle = TableOracle::new();
    oracle.insert('甲', ["he2"]);
    let engine = Engine::new(corpus, oracle, 1);
    let replacement = engine.resolve('乙', false);
    assert_eq!(replacement.value, '乙');
    assert_eq!(replacement.classification, Classification::Unresolved);
    assert_eq!(engine.transform_plain("乙", false), "乙");
}

#[test]
fn config_policies_feed_a_session() {
    let config = Config {
        threshold: 28,
        fold_tones: true,
        highlight_ambiguous: true,
    };
    let engine = Engine::load_demo(config.threshold);
    let segments = engine.transform("河了", config.options());

    match &segments[0] {
        Segment::Replaced {
            original,
            value,
            classification,
        } => {
            assert_eq!(*original, '河');
            assert_eq!(*value, '盒');
            assert_eq!(*classification, Classification::OutOfVocabularyFallback);
        }
        other => panic!("expected replaced segment, got {:?}", other),
    }
    match &segments[1] {
        Segment::Ambiguous {
            value,
            rank,
            alternatives,
        } => {
            assert_eq!(*value, '了');
            assert_eq!(*rank, Some(4));
            assert_eq!(encode_alternatives(alternatives), "le5::|liao3::");
        }
        other => panic!("expected ambiguous segment, got {:?}", other),
    }
}

#[test]
fn wire_records_for_demo_heteronyms() {
    let engine = Engine::load_demo(30);
    let records = engine.alternatives('好', false);
    assert_eq!(encode_alternatives(&records), "hao3::号|hao4:号:");

    let records = engine.alternatives('和', false);
    assert_eq!(
        encode_alternatives(&records),
        "he2:河:贺|he4:贺:河|huo2::|huo4::|hu2::"
    );
}
