use crate::Word;

/// Per-parameter interpretation rule, decoded from the instruction digits
/// above the opcode. Missing leading digits default to [`Self::Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ParameterMode {
    /// Mode 0: the parameter cell holds an address; the operand is the value
    /// stored there.
    #[default]
    Position,
    /// Mode 1: the parameter cell is the operand itself. Never valid as a
    /// write destination.
    Immediate,
    /// Mode 2: the parameter cell holds an offset; the operand address is
    /// `relative_base + offset`.
    Relative,
}

impl ParameterMode {
    /// Maps a single mode digit to its variant, or `None` for digits the
    /// machine does not understand.
    #[must_use]
    pub const fn from_digit(digit: Word) -> Option<Self> {
        match digit {
            0 => Some(Self::Position),
            1 => Some(Self::Immediate),
            2 => Some(Self::Relative),
            _ => None,
        }
    }
}
