use textdiff::{diff, DiffConfig, DiffReport};

fn resolved(report: &DiffReport, tokens: &[textdiff::TokenId]) -> Vec<String> {
    tokens
        .iter()
        .map(|&id| report.resolve(id).expect("token in table").to_string())
        .collect()
}

fn assert_reconstruction(old: &[&str], new: &[&str], config: &DiffConfig) {
    let report = diff(old, new, config).expect("diff succeeds");
    let old_side = resolved(&report, &report.old_tokens());
    let new_side = resolved(&report, &report.new_tokens());
    assert_eq!(old_side, old, "commons + deletes must reconstruct old");
    assert_eq!(new_side, new, "commons + inserts must reconstruct new");
}

#[test]
fn identical_sequences_are_all_commons() {
    let report = diff(
        &["Hello", "World"],
        &["Hello", "World"],
        &DiffConfig::exact(),
    )
    .expect("diff succeeds");
    assert!(report.is_identical());
    let positions: Vec<(u32, u32)> = report
        .commons
        .iter()
        .map(|c| (c.pos_old, c.pos_new))
        .collect();
    assert_eq!(positions, vec![(0, 0), (1, 1)]);
    assert_eq!(resolved(&report, &report.new_tokens()), ["Hello", "World"]);
}

#[test]
fn substitution_in_the_middle() {
    let report = diff(&["A", "B", "C"], &["A", "X", "C"], &DiffConfig::exact())
        .expect("diff succeeds");
    assert_eq!(report.num_commons(), 2);
    assert_eq!(report.replaces.len(), 1);

    let commons: Vec<(u32, u32, &str)> = report
        .commons
        .iter()
        .map(|c| (c.pos_old, c.pos_new, report.resolve(c.token).unwrap()))
        .collect();
    assert_eq!(commons, vec![(0, 0, "A"), (2, 2, "C")]);

    let group = &report.replaces[0];
    assert_eq!(report.resolve(group.deletes[0].token), Some("B"));
    assert_eq!((group.deletes[0].pos_old, group.deletes[0].pos_new), (1, 1));
    assert_eq!(report.resolve(group.inserts[0].token), Some("X"));
    assert_eq!(group.inserts[0].pos_new, 1);
}

#[test]
fn empty_old_against_two_inserts() {
    let report = diff(&[], &["A", "B"], &DiffConfig::exact()).expect("diff succeeds");
    assert!(report.commons.is_empty());
    assert_eq!(report.replaces.len(), 1);
    let group = &report.replaces[0];
    assert!(group.deletes.is_empty());
    let inserts: Vec<(u32, u32)> = group
        .inserts
        .iter()
        .map(|i| (i.pos_old, i.pos_new))
        .collect();
    assert_eq!(inserts, vec![(0, 0), (0, 1)]);
}

#[test]
fn empty_new_against_two_deletes() {
    let report = diff(&["A", "B"], &[], &DiffConfig::exact()).expect("diff succeeds");
    assert_eq!(report.replaces.len(), 1);
    assert_eq!(report.replaces[0].deletes.len(), 2);
    assert!(report.replaces[0].inserts.is_empty());
}

#[test]
fn both_empty_yields_empty_report() {
    let empty: [&str; 0] = [];
    let report = diff(&empty, &empty, &DiffConfig::exact()).expect("diff succeeds");
    assert!(report.commons.is_empty());
    assert!(report.replaces.is_empty());
}

#[test]
fn fuzzy_mode_treats_close_tokens_as_common() {
    let report = diff(&["color"], &["colour"], &DiffConfig::edit_distance(1))
        .expect("diff succeeds");
    assert!(report.is_identical());
    assert_eq!(report.num_commons(), 1);
    assert_eq!(report.resolve(report.commons[0].token), Some("colour"));
    assert_eq!(
        (report.commons[0].pos_old, report.commons[0].pos_new),
        (0, 0)
    );
}

#[test]
fn fuzzy_mode_via_similarity_threshold() {
    let report = diff(
        &["paragraph", "text"],
        &["paragraphs", "text"],
        &DiffConfig::similarity(0.85),
    )
    .expect("diff succeeds");
    assert!(report.is_identical());
    assert_eq!(report.num_commons(), 2);
}

#[test]
fn reconstruction_holds_across_shapes() {
    let cfg = DiffConfig::exact();
    assert_reconstruction(&["a", "b", "c"], &["a", "x", "c"], &cfg);
    assert_reconstruction(&["a", "b"], &["b", "a"], &cfg);
    assert_reconstruction(&[], &["a"], &cfg);
    assert_reconstruction(&["a"], &[], &cfg);
    assert_reconstruction(
        &["the", "quick", "brown", "fox", "jumps"],
        &["the", "slow", "brown", "dog", "jumps", "high"],
        &cfg,
    );
    assert_reconstruction(&["x", "x", "x"], &["x", "x"], &cfg);
}

#[test]
fn positions_are_monotonic_and_gap_free() {
    let report = diff(
        &["one", "two", "three", "four", "five"],
        &["one", "deux", "three", "quatre", "five", "six"],
        &DiffConfig::exact(),
    )
    .expect("diff succeeds");

    let mut old_positions: Vec<u32> = report
        .commons
        .iter()
        .map(|c| c.pos_old)
        .chain(
            report
                .replaces
                .iter()
                .flat_map(|r| r.deletes.iter().map(|d| d.pos_old)),
        )
        .collect();
    old_positions.sort_unstable();
    let expected: Vec<u32> = (0..old_positions.len() as u32).collect();
    assert_eq!(old_positions, expected, "old side has no gaps");

    let mut new_positions: Vec<u32> = report
        .commons
        .iter()
        .map(|c| c.pos_new)
        .chain(
            report
                .replaces
                .iter()
                .flat_map(|r| r.inserts.iter().map(|i| i.pos_new)),
        )
        .collect();
    new_positions.sort_unstable();
    let expected: Vec<u32> = (0..new_positions.len() as u32).collect();
    assert_eq!(new_positions, expected, "new side has no gaps");
}

#[test]
fn junk_only_mismatch_region_is_suppressed() {
    let cfg = DiffConfig::builder()
        .junk_pattern(r"^\[page\s*\d+\]$")
        .build()
        .expect("valid config");
    let report = diff(
        &["intro", "[page 3]", "outro"],
        &["intro", "outro"],
        &cfg,
    )
    .expect("diff succeeds");
    assert!(report.is_identical(), "junk-only region must be dropped");
    assert_eq!(report.num_commons(), 2);
}

#[test]
fn junk_only_old_side_suppresses_the_whole_group() {
    // Suppression drops the inserts of the region too: a boilerplate-only
    // mismatch is not worth reporting in either direction.
    let cfg = DiffConfig::builder()
        .junk_pattern(r"^\d+$")
        .build()
        .expect("valid config");
    let report = diff(&["a", "42", "b"], &["a", "noise", "b"], &cfg).expect("diff succeeds");
    assert!(report.is_identical());
    assert_eq!(report.num_commons(), 2);
}

#[test]
fn junk_mixed_with_real_tokens_is_kept() {
    let cfg = DiffConfig::builder()
        .junk_pattern(r"^\[page\s*\d+\]$")
        .build()
        .expect("valid config");
    let report = diff(
        &["intro", "[page 3]", "body", "outro"],
        &["intro", "outro"],
        &cfg,
    )
    .expect("diff succeeds");
    assert_eq!(report.replaces.len(), 1);
    assert_eq!(report.replaces[0].deletes.len(), 2);
}

#[test]
fn invalid_config_is_rejected_before_diffing() {
    let cfg = DiffConfig {
        min_sim: 2.0,
        ..DiffConfig::default()
    };
    let err = diff(&["a"], &["a"], &cfg).expect_err("min_sim 2.0 must be rejected");
    assert!(matches!(
        err,
        textdiff::DiffError::Config(textdiff::ConfigError::InvalidMinSimilarity { .. })
    ));
}

#[test]
fn report_round_trips_through_json() {
    let report = diff(
        &["alpha", "beta", "gamma"],
        &["alpha", "delta"],
        &DiffConfig::exact(),
    )
    .expect("diff succeeds");
    let json = textdiff::serialize_diff_report(&report).expect("serialize");
    let parsed: DiffReport = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(report, parsed);
    assert_eq!(parsed.version, DiffReport::SCHEMA_VERSION);
}

#[test]
fn session_reuses_token_ids_across_diffs() {
    let mut session = textdiff::DiffSession::new();
    let cfg = DiffConfig::exact();
    let first = session.diff(&["a", "b"], &["a"], &cfg).expect("diff succeeds");
    let second = session.diff(&["a"], &["a", "c"], &cfg).expect("diff succeeds");
    // "a" interned once: both reports agree on its id.
    assert_eq!(first.commons[0].token, second.commons[0].token);
    assert!(second.strings.len() >= first.strings.len());
}
