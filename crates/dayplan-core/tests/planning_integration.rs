//! End-to-end planning passes: detect, propose, apply.

use dayplan_core::{
    apply_operations, detect_conflicts, find_free_slot, find_gaps, generate_strategies,
    validate_blocks, Block, ChangeKind, ConflictKind, DetectorOptions, Operation, Severity,
    StrategyConfig, StrategyEngine, TimeOfDay, ValidationError,
};

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).unwrap()
}

fn load_day() -> Vec<Block> {
    serde_json::from_str(
        r#"[
            {"id": "standup", "title": "Standup", "kind": "meeting", "start": "09:00", "end": "09:15"},
            {"id": "write", "title": "Write proposal", "kind": "deep_focus", "start": "09:30", "end": "12:30",
             "energy": "high", "priority": "high"},
            {"id": "sync", "title": "Partner sync", "kind": "meeting", "start": "11:00", "end": "11:30",
             "priority": "medium"},
            {"id": "board", "title": "Board call", "kind": "calendar", "start": "14:00", "end": "15:00",
             "read_only": true},
            {"id": "inbox", "title": "Inbox", "kind": "admin", "start": "14:30", "end": "15:00"},
            {"id": "wrapup", "title": "Wrap-up", "kind": "meeting", "start": "17:30", "end": "18:30"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn test_day_file_validates() {
    let blocks = load_day();
    validate_blocks(&blocks).unwrap();
    assert!(blocks[3].read_only);
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let mut blocks = load_day();
    blocks[1].id = "standup".to_string();
    assert_eq!(
        validate_blocks(&blocks),
        Err(ValidationError::DuplicateId("standup".to_string()))
    );
}

#[test]
fn test_detection_over_a_busy_day() {
    let blocks = load_day();
    let conflicts = detect_conflicts(&blocks, &DetectorOptions::default());
    let kinds: Vec<ConflictKind> = conflicts.iter().map(|c| c.kind).collect();

    assert_eq!(
        kinds,
        vec![
            ConflictKind::Overlap,
            ConflictKind::Overlap,
            ConflictKind::WorkingHoursOverrun,
            ConflictKind::OversizedFocusBlock,
        ]
    );
    assert_eq!(conflicts[0].block_ids, vec!["write", "sync"]);
    assert_eq!(conflicts[0].estimated_delay, 30);
    assert_eq!(conflicts[1].block_ids, vec!["board", "inbox"]);
    assert_eq!(conflicts[2].block_ids, vec!["wrapup"]);
    assert_eq!(conflicts[2].estimated_delay, 30);
    assert_eq!(conflicts[3].estimated_delay, 60);
    assert_eq!(conflicts[3].severity, Severity::Medium);
}

#[test]
fn test_strategies_resolve_and_preserve_locked_blocks() {
    let blocks = load_day();
    let conflicts = detect_conflicts(&blocks, &DetectorOptions::default());
    let strategies = generate_strategies(&blocks, &conflicts);

    assert_eq!(strategies.len(), 3);
    assert_eq!(strategies[0].id, "protect_focus");
    // sync moves to 12:30; the board/inbox overlap, overrun and long focus block remain
    assert_eq!(strategies[0].residual_conflicts, 3);
    for pair in strategies.windows(2) {
        assert!(pair[0].residual_conflicts <= pair[1].residual_conflicts);
    }
    for strategy in &strategies {
        let board = strategy.blocks.iter().find(|b| b.id == "board").unwrap();
        assert_eq!(board.start, t("14:00"));
        assert_eq!(board.end, t("15:00"));
        validate_blocks(&strategy.blocks).unwrap();
    }
}

#[test]
fn test_applying_a_strategy_matches_its_preview() {
    let blocks = load_day();
    let conflicts = detect_conflicts(&blocks, &DetectorOptions::default());
    let engine = StrategyEngine::with_config(StrategyConfig::default());

    for strategy in engine.generate(&blocks, &conflicts) {
        let outcome = apply_operations(&blocks, &strategy.operations);
        assert_eq!(outcome.blocks, strategy.blocks);
        assert_eq!(outcome.changes, strategy.changes);
    }
}

#[test]
fn test_free_slot_and_gaps_agree() {
    let blocks = load_day();
    let slot = find_free_slot(&blocks, 60, t("09:00")).unwrap();
    assert_eq!(slot, t("12:30"));

    let gaps = find_gaps(&blocks, t("08:00"), t("18:00"));
    assert!(gaps.iter().any(|g| g.start == slot && g.can_fit(60)));
}

#[test]
fn test_stale_operation_becomes_pending() {
    let blocks = load_day();
    let outcome = apply_operations(
        &blocks,
        &[Operation::move_by("gone-42", 30).with_hints(
            "Dentist",
            Some(t("10:00")),
            Some(t("10:45")),
        )],
    );

    assert_eq!(outcome.blocks, blocks);
    assert_eq!(outcome.changes.len(), 1);
    assert_eq!(outcome.changes[0].kind, ChangeKind::Pending);
    assert_eq!(outcome.changes[0].title, "Dentist");
    assert!(outcome.changes[0].reason.contains("not found"));
}
