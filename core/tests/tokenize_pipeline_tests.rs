use textdiff::{diff, DiffConfig, TokenizeConfig, Tokenizer};

fn default_tokenizer() -> Tokenizer {
    Tokenizer::new(&TokenizeConfig::default()).expect("default config is valid")
}

#[test]
fn normalization_makes_formatting_variants_compare_equal() {
    let tokenizer = default_tokenizer();
    let ground_truth = tokenizer.tokenize("The Quick Brown Fox, jumps!");
    let extracted = tokenizer.tokenize("the quick brown fox jumps");
    let report = diff(&ground_truth, &extracted, &DiffConfig::exact()).expect("diff succeeds");
    assert!(report.is_identical());
}

#[test]
fn decimal_numbers_survive_the_pipeline() {
    let tokenizer = default_tokenizer();
    let tokens = tokenizer.tokenize("Table 2: error is 0.05 (5%).");
    assert_eq!(tokens, vec!["table", "2", "error", "is", "0.05", "5"]);
}

#[test]
fn accent_encoding_differences_do_not_show_up_as_diffs() {
    let tokenizer = default_tokenizer();
    // Same word, composed vs decomposed encoding.
    let composed = tokenizer.tokenize("r\u{00e9}sum\u{00e9}");
    let decomposed = tokenizer.tokenize("re\u{0301}sume\u{0301}");
    assert_eq!(composed, decomposed);
}

#[test]
fn protected_phrases_stay_verbatim_through_a_diff() {
    let config = TokenizeConfig {
        lowercase: true,
        protect: vec![r"\[formula-\d+\]".to_string()],
    };
    let tokenizer = Tokenizer::new(&config).expect("valid config");
    let old = tokenizer.tokenize("Equation [formula-12] Follows");
    let new = tokenizer.tokenize("equation [formula-12] follows");
    assert_eq!(old, vec!["equation", "[formula-12]", "follows"]);
    let report = diff(&old, &new, &DiffConfig::exact()).expect("diff succeeds");
    assert!(report.is_identical());
}

#[test]
fn paragraph_split_feeds_per_paragraph_diffs() {
    let tokenizer = default_tokenizer();
    let truth = "First paragraph here.\n\nSecond paragraph there.";
    let extracted = "First paragraph here.\n\nSecond paragraph missing.";
    let truth_paragraphs = tokenizer.tokenize_paragraphs(truth);
    let extracted_paragraphs = tokenizer.tokenize_paragraphs(extracted);
    assert_eq!(truth_paragraphs.len(), 2);
    assert_eq!(extracted_paragraphs.len(), 2);

    let first = diff(
        &truth_paragraphs[0],
        &extracted_paragraphs[0],
        &DiffConfig::exact(),
    )
    .expect("diff succeeds");
    assert!(first.is_identical());

    let second = diff(
        &truth_paragraphs[1],
        &extracted_paragraphs[1],
        &DiffConfig::exact(),
    )
    .expect("diff succeeds");
    assert_eq!(second.num_deletes(), 1);
    assert_eq!(second.num_inserts(), 1);
}
