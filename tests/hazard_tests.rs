//! Tests for read-after-write hazard detection and operand normalization.

use pretty_assertions::assert_eq;

use pipesim::core::pipeline::hazards::{base_register, raw_dependency};
use pipesim::isa::Instruction;
use pipesim::sim::loader::parse_program;

/// Parses a source snippet and returns its instruction records.
fn records(source: &str) -> Vec<Instruction> {
    parse_program(source).expect("valid test program").records
}

/// Tests base-register extraction from operand tokens.
#[test]
fn test_base_register_extraction() {
    assert_eq!(base_register("x7"), "x7");
    assert_eq!(base_register("8(x2)"), "x2");
    assert_eq!(base_register("0x10(x9)"), "x9");
    assert_eq!(base_register("42"), "42");
}

/// Tests that an adjacent destination/operand overlap is detected.
#[test]
fn test_adjacent_raw_dependency() {
    let records = records("addi x1, x9, 1\naddi x2, x1, 1\n");
    assert!(raw_dependency(&records, 0, 1));
}

/// Tests that register names are compared whole: `x1` in flight must not
/// collide with an `x10` operand.
#[test]
fn test_no_substring_false_positive() {
    let records = records("addi x1, x9, 1\naddi x2, x10, 1\n");
    assert!(!raw_dependency(&records, 0, 1));
}

/// Tests that a memory operand depends on its base register.
#[test]
fn test_memory_operand_base_dependency() {
    let records = records("addi x5, x9, 1\nsw x2, 8(x5)\n");
    assert!(raw_dependency(&records, 0, 1));
}

/// Tests that the scan covers the whole in-flight window, not only the
/// immediately preceding instruction.
#[test]
fn test_window_spans_writeback_to_fetch() {
    let records = records("addi x1, x9, 1\naddi x2, x9, 1\naddi x3, x1, 1\n");
    assert!(raw_dependency(&records, 0, 2));
    assert!(!raw_dependency(&records, 1, 2));
}

/// Tests that counted branches in flight are skipped by the scan.
#[test]
fn test_counted_branch_skipped() {
    let source = "top: bge x1, 2, top\naddi x2, x1, 1\n";
    let records = records(source);
    assert!(!raw_dependency(&records, 0, 1));
}

/// Tests that a relocated fetch cursor behind write-back yields an empty
/// scan window.
#[test]
fn test_empty_window_after_backward_jump() {
    let records = records("addi x1, x9, 1\naddi x2, x1, 1\naddi x3, x1, 1\n");
    assert!(!raw_dependency(&records, 1, 1));
    assert!(!raw_dependency(&records, 2, 1));
}

/// Tests that a jump's target label participates as its index-2 token.
#[test]
fn test_jump_dest_token_matches_label_operand() {
    let source = "jal end\nbge x1, 2, end\nend: addi x3, x9, 1\n";
    let records = records(source);
    assert!(raw_dependency(&records, 0, 1));
}
