use thiserror::Error;

use crate::Word;

/// Fatal execution faults.
///
/// Every variant that can arise while stepping carries the instruction
/// pointer of the offending instruction and, where it helps pinpoint the
/// corruption, the raw instruction word. A machine that has returned one of
/// these is terminal: recovery means constructing a fresh machine from the
/// original program, never mutating the faulted one back to health.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum VirtualMachineError {
    /// The low two digits of the instruction word do not name an opcode.
    #[error("unknown opcode in instruction word {instruction} at address {ip}")]
    UnknownOpcode { ip: usize, instruction: Word },

    /// A parameter mode digit other than 0, 1 or 2.
    #[error("unknown parameter mode digit {digit} in instruction word {instruction} at address {ip}")]
    UnknownParameterMode {
        ip: usize,
        instruction: Word,
        digit: Word,
    },

    /// An immediate-mode parameter used as a write destination. Immediate
    /// operands have no address semantics, so this signals a corrupted
    /// program rather than a case to paper over.
    #[error("immediate-mode destination in instruction word {instruction} at address {ip}")]
    ImmediateDestination { ip: usize, instruction: Word },

    /// An effective address (position operand, relative-base sum, or jump
    /// target) resolved below zero. Never clamped.
    #[error("negative effective address {address} while executing the instruction at address {ip}")]
    NegativeEffectiveAddress { ip: usize, address: Word },

    /// `run` was called again after the machine reached opcode 99.
    #[error("the machine has halted and cannot be resumed")]
    ResumeAfterHalt,

    /// `run` was called again after a fatal fault.
    #[error("the machine has faulted and cannot be resumed")]
    ResumeAfterFault,

    /// The input feed handed to `run_to_completion` ran dry while the
    /// machine was still asking for input.
    #[error("input feed exhausted while the machine still needs input at address {ip}")]
    StarvedInput { ip: usize },
}
