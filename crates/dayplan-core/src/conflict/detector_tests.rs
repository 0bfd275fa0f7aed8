//! Tests for the conflict detector passes.

use super::*;
use crate::block::{Block, BlockKind, EnergyLevel, TimeOfDay};

fn block(id: &str, kind: BlockKind, start: &str, end: &str) -> Block {
    Block::new(
        id,
        format!("Block {id}"),
        kind,
        TimeOfDay::parse(start).unwrap(),
        TimeOfDay::parse(end).unwrap(),
    )
    .unwrap()
}

fn quiet_options() -> DetectorOptions {
    DetectorOptions::default()
        .with_working_hours(TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY)
        .with_energy_checks(false)
        .with_min_meeting_buffer(0)
}

fn of_kind(conflicts: &[Conflict], kind: ConflictKind) -> Vec<&Conflict> {
    conflicts.iter().filter(|c| c.kind == kind).collect()
}

#[test]
fn test_overlapping_meetings_scenario() {
    let blocks = vec![
        block("a", BlockKind::Meeting, "09:00", "10:00"),
        block("b", BlockKind::Meeting, "09:30", "10:15"),
    ];
    let conflicts = detect_conflicts(&blocks, &DetectorOptions::default());

    assert_eq!(conflicts.len(), 1);
    let overlap = &conflicts[0];
    assert_eq!(overlap.kind, ConflictKind::Overlap);
    assert_eq!(overlap.estimated_delay, 30);
    assert_eq!(overlap.severity, Severity::Medium);
    assert_eq!(overlap.block_ids, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_meeting_buffer_scenario() {
    let blocks = vec![
        block("a", BlockKind::Meeting, "09:00", "10:00"),
        block("b", BlockKind::Meeting, "10:05", "11:00"),
    ];
    let options = DetectorOptions::default().with_min_meeting_buffer(15);
    let conflicts = detect_conflicts(&blocks, &options);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::BufferInsufficient);
    assert_eq!(conflicts[0].estimated_delay, 10);
    assert_eq!(conflicts[0].severity, Severity::Medium);
}

#[test]
fn test_buffer_ignores_non_meetings_and_back_to_back_gaps_count() {
    let blocks = vec![
        block("a", BlockKind::Meeting, "09:00", "10:00"),
        block("focus", BlockKind::DeepFocus, "10:00", "10:30"),
        block("b", BlockKind::Meeting, "10:30", "11:00"),
        block("c", BlockKind::Meeting, "11:00", "11:30"),
    ];
    let options = quiet_options().with_min_meeting_buffer(30);
    let conflicts = detect_conflicts(&blocks, &options);
    let buffers = of_kind(&conflicts, ConflictKind::BufferInsufficient);

    // a->b is 30 min apart (ok), b->c back to back (missing 30 min).
    assert_eq!(buffers.len(), 1);
    assert_eq!(buffers[0].block_ids, vec!["b".to_string(), "c".to_string()]);
    assert_eq!(buffers[0].estimated_delay, 30);
    assert_eq!(buffers[0].severity, Severity::High);
}

#[test]
fn test_overlap_severity_thresholds() {
    let cases = [
        ("09:10", Severity::Low),
        ("09:15", Severity::Low),
        ("09:16", Severity::Medium),
        ("09:31", Severity::High),
    ];
    for (end, expected) in cases {
        let blocks = vec![
            block("a", BlockKind::Admin, "09:00", end),
            block("b", BlockKind::Admin, "09:00", "12:00"),
        ];
        let conflicts = detect_conflicts(&blocks, &quiet_options());
        assert_eq!(conflicts.len(), 1, "end {end}");
        assert_eq!(conflicts[0].severity, expected, "end {end}");
    }
}

#[test]
fn test_adjacent_scan_misses_nested_block() {
    // long contains tiny, but mid sits between them in start order.
    let blocks = vec![
        block("long", BlockKind::Admin, "09:00", "12:00"),
        block("mid", BlockKind::Admin, "09:30", "09:45"),
        block("tiny", BlockKind::Admin, "11:00", "11:30"),
    ];

    let adjacent = quiet_options().with_overlap_scan(OverlapScan::Adjacent);
    let found = detect_conflicts(&blocks, &adjacent);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].block_ids, vec!["long".to_string(), "mid".to_string()]);

    let sweep = quiet_options().with_overlap_scan(OverlapScan::Sweep);
    let found = detect_conflicts(&blocks, &sweep);
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].block_ids, vec!["long".to_string(), "tiny".to_string()]);
    assert_eq!(found[1].estimated_delay, 30);
}

#[test]
fn test_working_hours_overrun_both_ends() {
    let blocks = vec![block("long", BlockKind::Errand, "07:00", "19:30")];
    let options = DetectorOptions::default()
        .with_working_hours(TimeOfDay::from_hm(8, 0), TimeOfDay::from_hm(18, 0))
        .with_energy_checks(false);
    let conflicts = detect_conflicts(&blocks, &options);
    let overruns = of_kind(&conflicts, ConflictKind::WorkingHoursOverrun);

    assert_eq!(overruns.len(), 2);
    assert_eq!(overruns[0].estimated_delay, 60);
    assert_eq!(overruns[0].severity, Severity::Medium);
    assert_eq!(overruns[1].estimated_delay, 90);
    assert_eq!(overruns[1].severity, Severity::High);
}

#[test]
fn test_energy_mismatches() {
    let blocks = vec![
        block("deep", BlockKind::DeepFocus, "13:30", "14:30").with_energy(EnergyLevel::High),
        block("calm", BlockKind::DeepFocus, "14:30", "15:00").with_energy(EnergyLevel::Low),
        block("inbox", BlockKind::Admin, "09:00", "09:30"),
        block("late-inbox", BlockKind::Admin, "11:00", "11:30"),
    ];
    let options = DetectorOptions::default().with_energy_checks(true);
    let conflicts = detect_conflicts(&blocks, &options);
    let energy = of_kind(&conflicts, ConflictKind::EnergyMismatch);

    assert_eq!(energy.len(), 2);
    assert_eq!(energy[0].block_ids, vec!["inbox".to_string()]);
    assert_eq!(energy[0].severity, Severity::Low);
    assert_eq!(energy[1].block_ids, vec!["deep".to_string()]);
    assert_eq!(energy[1].severity, Severity::Medium);
    assert!(energy.iter().all(|c| c.estimated_delay == 0));

    let disabled = detect_conflicts(&blocks, &options.with_energy_checks(false));
    assert!(of_kind(&disabled, ConflictKind::EnergyMismatch).is_empty());
}

#[test]
fn test_oversized_focus_block() {
    let blocks = vec![
        block("marathon", BlockKind::DeepFocus, "08:00", "11:30"),
        block("sprint", BlockKind::DeepFocus, "12:00", "14:30"),
        block("meeting", BlockKind::Meeting, "15:00", "18:00"),
    ];
    let options = quiet_options().with_max_focus(120);
    let conflicts = detect_conflicts(&blocks, &options);
    let oversized = of_kind(&conflicts, ConflictKind::OversizedFocusBlock);

    assert_eq!(oversized.len(), 2);
    assert_eq!(oversized[0].estimated_delay, 90);
    assert_eq!(oversized[0].severity, Severity::High);
    assert_eq!(oversized[1].estimated_delay, 30);
    assert_eq!(oversized[1].severity, Severity::Medium);
}

#[test]
fn test_detection_is_idempotent_and_order_independent() {
    let blocks = vec![
        block("c", BlockKind::Meeting, "10:00", "11:00"),
        block("a", BlockKind::Meeting, "09:00", "10:10"),
        block("b", BlockKind::Admin, "09:05", "09:20"),
    ];
    let options = DetectorOptions::default();
    let first = detect_conflicts(&blocks, &options);
    let second = detect_conflicts(&blocks, &options);
    assert_eq!(first, second);

    let mut reversed = blocks.clone();
    reversed.reverse();
    assert_eq!(detect_conflicts(&reversed, &options), first);
}

#[test]
fn test_degenerate_inputs_are_empty() {
    assert!(detect_conflicts(&[], &DetectorOptions::default()).is_empty());
    let single = vec![block("a", BlockKind::Meeting, "09:00", "10:00")];
    assert!(detect_conflicts(&single, &DetectorOptions::default()).is_empty());
}
