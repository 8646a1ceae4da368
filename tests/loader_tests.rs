//! Tests for the program loader: record layout, symbol and counter tables,
//! separator stripping, and the fail-fast validation pass.

use pretty_assertions::assert_eq;

use pipesim::common::SimError;
use pipesim::isa::OpClass;
use pipesim::sim::loader::{load_program, parse_program};

/// Tests the token layout of labeled and unlabeled records.
#[test]
fn test_record_layout() {
    let program = parse_program("addi x1, x9, 1\nloop: addi x2, x9, 1\n").expect("parse");

    let plain = &program.records[0];
    assert_eq!(plain.label(), None);
    assert_eq!(plain.mnemonic(), "addi");
    assert_eq!(plain.operands().collect::<Vec<_>>(), vec!["x1", "x9", "1"]);

    let labeled = &program.records[1];
    assert_eq!(labeled.label(), Some("loop"));
    assert_eq!(labeled.mnemonic(), "addi");
    assert_eq!(labeled.operands().collect::<Vec<_>>(), vec!["x2", "x9", "1"]);
}

/// Tests that labels map to the index of the line they precede.
#[test]
fn test_symbol_table() {
    let source = "addi x1, x9, 1\nloop: addi x2, x9, 1\njal end\nend: addi x3, x9, 1\n";
    let program = parse_program(source).expect("parse");

    assert_eq!(program.symbols.get("loop"), Some(&1));
    assert_eq!(program.symbols.get("end"), Some(&3));
    assert_eq!(program.symbols.len(), 2);
}

/// Tests the counter-table invariant: an entry exists exactly for counted
/// branches, initialized to zero, labeled lines included.
#[test]
fn test_counter_table_invariant() {
    let source = "addi x1, x9, 1\nbge x8, 2, top\ntop: ble x8, 1, top\naddi x2, x9, 1\n";
    let program = parse_program(source).expect("parse");

    assert_eq!(program.counters.get(&1), Some(&0));
    assert_eq!(program.counters.get(&2), Some(&0));
    assert_eq!(program.counters.len(), 2);
    for (&index, _) in &program.counters {
        assert!(program.records[index].kind().is_counted_branch());
    }
}

/// Tests that CRLF sources parse to the same clean tokens as LF sources.
#[test]
fn test_crlf_source() {
    let crlf = parse_program("addi x1, x9, 1\r\nsw x2, 8(x9)\r\n").expect("parse");
    let lf = parse_program("addi x1, x9, 1\nsw x2, 8(x9)\n").expect("parse");

    assert_eq!(crlf.records, lf.records);
    assert_eq!(crlf.records[0].last_token(), "1");
    assert_eq!(crlf.records[1].last_token(), "8(x9)");
}

/// Tests that operand tokens are truncated at the list-separator comma.
#[test]
fn test_comma_stripping() {
    let program = parse_program("lw x3, 8(x9)\n").expect("parse");
    let record = &program.records[0];

    assert_eq!(record.kind(), OpClass::Load);
    assert_eq!(record.dest(), Some("x3"));
    assert_eq!(record.operands().collect::<Vec<_>>(), vec!["x3", "8(x9)"]);
}

/// Tests the silent-degradation policy for an unreadable source path.
#[test]
fn test_missing_file_yields_empty_program() {
    let program = load_program("/no/such/path/program.s").expect("load");
    assert!(program.is_empty());
}

/// Tests that a forward jump reference resolves against the full symbol
/// table, not just the labels seen so far.
#[test]
fn test_forward_reference_resolves() {
    let program = parse_program("jal done\naddi x1, x9, 1\ndone: addi x2, x9, 1\n").expect("parse");
    assert_eq!(program.symbols.get("done"), Some(&2));
}

/// Tests that a label-only line is rejected.
#[test]
fn test_label_only_line_rejected() {
    let err = parse_program("start:\naddi x1, x9, 1\n").expect_err("must fail");
    assert_eq!(err, SimError::MissingMnemonic { line: 1 });
}

/// Tests that a blank interior line is rejected.
#[test]
fn test_blank_line_rejected() {
    let err = parse_program("addi x1, x9, 1\n\naddi x2, x9, 1\n").expect_err("must fail");
    assert_eq!(err, SimError::MissingMnemonic { line: 2 });
}

/// Tests that a non-integer branch threshold fails fast.
#[test]
fn test_bad_threshold_rejected() {
    let err = parse_program("top: bge x1, lots, top\n").expect_err("must fail");
    assert_eq!(
        err,
        SimError::BadThreshold {
            line: 1,
            token: "lots".to_string(),
        }
    );
}

/// Tests that an unresolvable jump target fails fast.
#[test]
fn test_unknown_target_rejected() {
    let err = parse_program("jal nowhere\n").expect_err("must fail");
    assert_eq!(
        err,
        SimError::UnknownLabel {
            line: 1,
            label: "nowhere".to_string(),
        }
    );
}

/// Tests that a jump with no operand at all is rejected.
#[test]
fn test_jump_missing_target_rejected() {
    let err = parse_program("jal\n").expect_err("must fail");
    assert_eq!(
        err,
        SimError::MissingOperand {
            line: 1,
            mnemonic: "jal".to_string(),
            what: "target label",
        }
    );
}

/// Tests that a branch missing its target operand is rejected.
#[test]
fn test_branch_missing_target_rejected() {
    let err = parse_program("top: bge x1, 2\n").expect_err("must fail");
    assert_eq!(
        err,
        SimError::MissingOperand {
            line: 1,
            mnemonic: "bge".to_string(),
            what: "target label",
        }
    );
}
