use std::collections::VecDeque;

use super::{mode::ParameterMode, opcode::Opcode};
use crate::{
    Word, context::run_context::RunContext, core::Suspension, errors::vm::VirtualMachineError,
    memory::mem::Memory,
};

/// The largest parameter count across the instruction set.
pub(crate) const MAX_PARAMETERS: usize = 3;

/// A single instruction, decoded from one memory cell.
///
/// The raw word is kept around so that faults hit while executing the
/// instruction can report the exact cell contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    raw: Word,
    opcode: Opcode,
    modes: [ParameterMode; MAX_PARAMETERS],
}

impl Instruction {
    /// Decodes the cell at `ip`: the low two digits select the opcode, each
    /// digit above them gives the addressing mode of one parameter (least
    /// significant first), and missing digits default to position mode.
    pub fn decode(raw: Word, ip: usize) -> Result<Self, VirtualMachineError> {
        if raw < 0 {
            return Err(VirtualMachineError::UnknownOpcode {
                ip,
                instruction: raw,
            });
        }
        let opcode = Opcode::from_word(raw % 100).ok_or(VirtualMachineError::UnknownOpcode {
            ip,
            instruction: raw,
        })?;

        let mut digits = raw / 100;
        let mut modes = [ParameterMode::Position; MAX_PARAMETERS];
        for mode in &mut modes {
            *mode = ParameterMode::from_digit(digits % 10).ok_or(
                VirtualMachineError::UnknownParameterMode {
                    ip,
                    instruction: raw,
                    digit: digits % 10,
                },
            )?;
            digits /= 10;
        }
        // Digits beyond the supported parameter count signal a corrupted
        // instruction word just as an out-of-range mode digit does.
        if digits != 0 {
            return Err(VirtualMachineError::UnknownParameterMode {
                ip,
                instruction: raw,
                digit: digits,
            });
        }

        Ok(Self { raw, opcode, modes })
    }

    #[must_use]
    pub const fn raw(&self) -> Word {
        self.raw
    }

    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Addressing mode of the `parameter`-th operand (1-based).
    #[must_use]
    pub const fn mode(&self, parameter: usize) -> ParameterMode {
        self.modes[parameter - 1]
    }

    /// Executes this instruction against the machine state.
    ///
    /// Returns `Ok(None)` when execution can continue with the next
    /// instruction, and `Ok(Some(_))` at the three suspension points:
    /// an input request with an empty queue, an emitted output, and halt.
    /// A blocked input request leaves the instruction pointer in place so
    /// the instruction re-executes once the host supplies a value; every
    /// other non-jumping opcode advances it past its parameters.
    pub(crate) fn execute(
        &self,
        run_context: &mut RunContext,
        memory: &mut Memory,
        pending_inputs: &mut VecDeque<Word>,
    ) -> Result<Option<Suspension>, VirtualMachineError> {
        match self.opcode {
            Opcode::Add => {
                let a = run_context.operand_value(memory, self, 1)?;
                let b = run_context.operand_value(memory, self, 2)?;
                let dst = run_context.destination_address(memory, self, 3)?;
                memory.write(dst, a + b);
                run_context.advance(self.opcode);
                Ok(None)
            }
            Opcode::Multiply => {
                let a = run_context.operand_value(memory, self, 1)?;
                let b = run_context.operand_value(memory, self, 2)?;
                let dst = run_context.destination_address(memory, self, 3)?;
                memory.write(dst, a * b);
                run_context.advance(self.opcode);
                Ok(None)
            }
            Opcode::Input => match pending_inputs.pop_front() {
                None => Ok(Some(Suspension::NeedsInput)),
                Some(value) => {
                    let dst = run_context.destination_address(memory, self, 1)?;
                    memory.write(dst, value);
                    run_context.advance(self.opcode);
                    Ok(None)
                }
            },
            Opcode::Output => {
                let a = run_context.operand_value(memory, self, 1)?;
                run_context.advance(self.opcode);
                Ok(Some(Suspension::Output(a)))
            }
            Opcode::JumpIfTrue => {
                let a = run_context.operand_value(memory, self, 1)?;
                let b = run_context.operand_value(memory, self, 2)?;
                if a == 0 {
                    run_context.advance(self.opcode);
                } else {
                    run_context.jump_to(b)?;
                }
                Ok(None)
            }
            Opcode::JumpIfFalse => {
                let a = run_context.operand_value(memory, self, 1)?;
                let b = run_context.operand_value(memory, self, 2)?;
                if a == 0 {
                    run_context.jump_to(b)?;
                } else {
                    run_context.advance(self.opcode);
                }
                Ok(None)
            }
            Opcode::LessThan => {
                let a = run_context.operand_value(memory, self, 1)?;
                let b = run_context.operand_value(memory, self, 2)?;
                let dst = run_context.destination_address(memory, self, 3)?;
                memory.write(dst, Word::from(a < b));
                run_context.advance(self.opcode);
                Ok(None)
            }
            Opcode::Equals => {
                let a = run_context.operand_value(memory, self, 1)?;
                let b = run_context.operand_value(memory, self, 2)?;
                let dst = run_context.destination_address(memory, self, 3)?;
                memory.write(dst, Word::from(a == b));
                run_context.advance(self.opcode);
                Ok(None)
            }
            Opcode::AdjustRelativeBase => {
                let a = run_context.operand_value(memory, self, 1)?;
                run_context.relative_base += a;
                run_context.advance(self.opcode);
                Ok(None)
            }
            Opcode::Halt => Ok(Some(Suspension::Halted)),
        }
    }
}
