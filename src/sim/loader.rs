//! Program Loader.
//!
//! Converts assembly-like source text into the three tables the pipeline
//! engine consumes: the ordered instruction records, the label symbol table,
//! and the branch counter table. Parsing preserves source line order as the
//! instruction index.
//!
//! An unreadable source file is not an error: the loader logs a warning and
//! returns an empty program, and the engine then runs zero cycles. Malformed
//! source *content* fails fast with a [`SimError`] naming the offending
//! line.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::SimError;
use crate::isa::{fields, mnemonics, Instruction, OpClass};

/// A loaded program: instruction records plus the two lookup tables.
///
/// `records` and `symbols` are read-only after construction. `counters` is
/// handed to the engine, whose fetch unit is its sole mutator; an entry
/// exists if and only if the record at that index is a counted branch.
#[derive(Clone, Debug, Default)]
pub struct Program {
    /// Instruction records in source order.
    pub records: Vec<Instruction>,
    /// Label text to instruction index.
    pub symbols: HashMap<String, usize>,
    /// Instruction index to branch iteration counter, zero-initialized.
    pub counters: HashMap<usize, i64>,
}

impl Program {
    /// Whether the program holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Loads and parses the program at `path`.
///
/// # Returns
///
/// An empty program if the file cannot be read (silent-degradation policy),
/// the parsed program otherwise, or a [`SimError`] if the file is readable
/// but malformed.
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Program, SimError> {
    let path = path.as_ref();
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            warn!(path = %path.display(), %err, "source unreadable, running empty program");
            return Ok(Program::default());
        }
    };
    parse_program(&source)
}

/// Parses program source text.
///
/// One instruction per line. A line either starts with a `label:` token
/// followed by the mnemonic, or directly with the mnemonic. Operands are
/// space-separated and truncated at the first list-separator comma. A
/// `bge`/`ble` line additionally registers a zero branch counter for its
/// index.
pub fn parse_program(source: &str) -> Result<Program, SimError> {
    let mut records = Vec::new();
    let mut symbols = HashMap::new();
    let mut counters = HashMap::new();

    for (line_num, raw) in source.lines().enumerate() {
        // `str::lines` drops the newline; this drops the CR of CRLF sources
        // and stray trailing blanks so token comparisons are exact.
        let line = raw.trim_end();
        let mut parts = line.split(' ');
        let head = parts.next().unwrap_or_default();

        let mut tokens = Vec::new();
        let mnemonic = if let Some(label) = head.strip_suffix(':') {
            let _ = symbols.insert(label.to_string(), line_num);
            tokens.push(label.to_string());
            parts.next().unwrap_or_default()
        } else {
            tokens.push(String::new());
            head
        };

        if mnemonic.is_empty() {
            return Err(SimError::MissingMnemonic { line: line_num + 1 });
        }
        if mnemonic == mnemonics::BGE || mnemonic == mnemonics::BLE {
            let _ = counters.insert(line_num, 0);
        }
        tokens.push(mnemonic.to_string());

        for operand in parts {
            let operand = operand.split(',').next().unwrap_or_default();
            tokens.push(operand.to_string());
        }

        records.push(Instruction::new(tokens));
    }

    validate(&records, &symbols)?;
    debug!(
        instructions = records.len(),
        symbols = symbols.len(),
        branches = counters.len(),
        "program loaded"
    );

    Ok(Program {
        records,
        symbols,
        counters,
    })
}

/// Fail-fast validation over the parsed records.
///
/// Runs after the whole source is parsed so that forward references to
/// later labels resolve. Checks that every jump/branch target exists in the
/// symbol table and that every branch threshold is a decimal integer.
fn validate(records: &[Instruction], symbols: &HashMap<String, usize>) -> Result<(), SimError> {
    for (index, inst) in records.iter().enumerate() {
        let line = index + 1;
        match inst.kind() {
            OpClass::Jump => {
                if inst.len() <= fields::DEST {
                    return Err(SimError::MissingOperand {
                        line,
                        mnemonic: inst.mnemonic().to_string(),
                        what: "target label",
                    });
                }
                resolve_target(inst.last_token(), line, symbols)?;
            }
            OpClass::BranchGe | OpClass::BranchLe => {
                let threshold =
                    inst.token(fields::BRANCH_THRESHOLD)
                        .ok_or_else(|| SimError::MissingOperand {
                            line,
                            mnemonic: inst.mnemonic().to_string(),
                            what: "threshold",
                        })?;
                if threshold.parse::<i64>().is_err() {
                    return Err(SimError::BadThreshold {
                        line,
                        token: threshold.to_string(),
                    });
                }
                let target =
                    inst.token(fields::BRANCH_TARGET)
                        .ok_or_else(|| SimError::MissingOperand {
                            line,
                            mnemonic: inst.mnemonic().to_string(),
                            what: "target label",
                        })?;
                resolve_target(target, line, symbols)?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn resolve_target(
    label: &str,
    line: usize,
    symbols: &HashMap<String, usize>,
) -> Result<usize, SimError> {
    symbols
        .get(label)
        .copied()
        .ok_or_else(|| SimError::UnknownLabel {
            line,
            label: label.to_string(),
        })
}
