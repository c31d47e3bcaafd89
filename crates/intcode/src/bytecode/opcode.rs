use crate::Word;

/// The operation selector decoded from the low two digits of an instruction
/// cell.
///
/// The set is closed: anything outside these ten values routes to the
/// unknown-opcode fault at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
    /// `01`: `dst = a + b`.
    Add,
    /// `02`: `dst = a * b`.
    Multiply,
    /// `03`: `dst = next input value`; suspends when none is available.
    Input,
    /// `04`: emit `a` and suspend.
    Output,
    /// `05`: if `a != 0`, `ip = b`.
    JumpIfTrue,
    /// `06`: if `a == 0`, `ip = b`.
    JumpIfFalse,
    /// `07`: `dst = 1` if `a < b`, else `0`.
    LessThan,
    /// `08`: `dst = 1` if `a == b`, else `0`.
    Equals,
    /// `09`: `relative_base += a`.
    AdjustRelativeBase,
    /// `99`: execution terminates.
    Halt,
}

impl Opcode {
    /// Maps a two-digit opcode value to its variant, or `None` for anything
    /// the machine does not understand.
    #[must_use]
    pub const fn from_word(word: Word) -> Option<Self> {
        match word {
            1 => Some(Self::Add),
            2 => Some(Self::Multiply),
            3 => Some(Self::Input),
            4 => Some(Self::Output),
            5 => Some(Self::JumpIfTrue),
            6 => Some(Self::JumpIfFalse),
            7 => Some(Self::LessThan),
            8 => Some(Self::Equals),
            9 => Some(Self::AdjustRelativeBase),
            99 => Some(Self::Halt),
            _ => None,
        }
    }

    /// Number of parameter cells following the instruction cell. The
    /// instruction pointer advances by one more than this, unless the opcode
    /// itself sets it.
    #[must_use]
    pub const fn parameter_count(self) -> usize {
        match self {
            Self::Add | Self::Multiply | Self::LessThan | Self::Equals => 3,
            Self::JumpIfTrue | Self::JumpIfFalse => 2,
            Self::Input | Self::Output | Self::AdjustRelativeBase => 1,
            Self::Halt => 0,
        }
    }
}
