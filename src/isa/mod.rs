//! Instruction vocabulary and record definitions.
//!
//! The simulator recognizes a fixed, closed mnemonic set: one unconditional
//! jump (`jal`), two counted conditional branches (`bge`, `ble`), two memory
//! accesses (`lw`, `sw`), and an open set of generic mnemonics that only
//! participate in hazard checks. An [`Instruction`] is an immutable token
//! record parsed from one source line; the engine reads it by the field
//! indices in [`fields`].

/// Recognized mnemonic spellings.
pub mod mnemonics {
    /// Unconditional jump.
    pub const JAL: &str = "jal";
    /// Counted branch, taken once its counter reaches the threshold.
    pub const BGE: &str = "bge";
    /// Counted branch, taken until its counter exceeds the threshold.
    pub const BLE: &str = "ble";
    /// Load word.
    pub const LW: &str = "lw";
    /// Store word.
    pub const SW: &str = "sw";
}

/// Token indices within an instruction record.
///
/// Index 0 is the label slot (empty for unlabeled lines), index 1 the
/// mnemonic, indices 2 and up the operands. The layout is identical for
/// labeled and unlabeled lines.
pub mod fields {
    /// Label slot.
    pub const LABEL: usize = 0;
    /// Mnemonic.
    pub const MNEMONIC: usize = 1;
    /// Destination (or comparison) operand of a generic instruction.
    pub const DEST: usize = 2;
    /// Immediate threshold operand of a counted branch.
    pub const BRANCH_THRESHOLD: usize = 3;
    /// Target label operand of a counted branch.
    pub const BRANCH_TARGET: usize = 4;
}

/// Timing class of an instruction, derived from its mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpClass {
    /// Unconditional jump (`jal`).
    Jump,
    /// Counted branch taken on counter >= threshold (`bge`).
    BranchGe,
    /// Counted branch taken on counter <= threshold (`ble`).
    BranchLe,
    /// Memory load (`lw`).
    Load,
    /// Memory store (`sw`).
    Store,
    /// Any other mnemonic; generic single-cycle timing.
    Other,
}

impl OpClass {
    /// Classifies a mnemonic token.
    pub fn classify(mnemonic: &str) -> Self {
        match mnemonic {
            mnemonics::JAL => Self::Jump,
            mnemonics::BGE => Self::BranchGe,
            mnemonics::BLE => Self::BranchLe,
            mnemonics::LW => Self::Load,
            mnemonics::SW => Self::Store,
            _ => Self::Other,
        }
    }

    /// Whether this is one of the two counted-branch kinds.
    pub fn is_counted_branch(self) -> bool {
        matches!(self, Self::BranchGe | Self::BranchLe)
    }
}

/// One parsed source line.
///
/// Immutable once created. The token vector preserves the source order:
/// label slot, mnemonic, then operands with list separators and line-ending
/// artifacts already stripped by the loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    tokens: Vec<String>,
    kind: OpClass,
}

impl Instruction {
    /// Builds a record from its token vector.
    ///
    /// The vector must hold at least the label slot and the mnemonic; the
    /// loader guarantees this before construction.
    pub fn new(tokens: Vec<String>) -> Self {
        let kind = tokens
            .get(fields::MNEMONIC)
            .map_or(OpClass::Other, |m| OpClass::classify(m));
        Self { tokens, kind }
    }

    /// The label preceding this instruction, if the line carried one.
    pub fn label(&self) -> Option<&str> {
        match self.tokens.get(fields::LABEL) {
            Some(slot) if !slot.is_empty() => Some(slot.as_str()),
            _ => None,
        }
    }

    /// The mnemonic token.
    pub fn mnemonic(&self) -> &str {
        self.tokens
            .get(fields::MNEMONIC)
            .map_or("", String::as_str)
    }

    /// Timing class derived from the mnemonic.
    pub fn kind(&self) -> OpClass {
        self.kind
    }

    /// The token at an absolute record index, if present.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// The destination/comparison operand (record index 2), if present.
    pub fn dest(&self) -> Option<&str> {
        self.token(fields::DEST)
    }

    /// Iterates the operand tokens (record indices 2 and up).
    pub fn operands(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens
            .iter()
            .skip(fields::DEST)
            .map(String::as_str)
    }

    /// The final token of the record.
    ///
    /// For a jump this is the target label; the execute unit also inspects
    /// it for a hexadecimal immediate.
    pub fn last_token(&self) -> &str {
        self.tokens.last().map_or("", String::as_str)
    }

    /// Whether the final operand token denotes a hexadecimal immediate.
    pub fn has_hex_immediate(&self) -> bool {
        self.last_token().contains("0x")
    }

    /// Number of tokens in the record, label slot included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the record holds no tokens. Never true for loader output.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
