use crate::{
    Word,
    bytecode::{instruction::Instruction, mode::ParameterMode, opcode::Opcode},
    errors::vm::VirtualMachineError,
    memory::mem::Memory,
};

/// The execution cursor of one machine: instruction pointer plus relative
/// base. Operand and destination resolution live here because both are pure
/// functions of these two registers and memory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// The address of the next instruction cell to decode.
    pub(crate) ip: usize,
    /// The offset added to relative-mode parameters. Mutated only by the
    /// adjust-relative-base instruction.
    pub(crate) relative_base: Word,
}

impl RunContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ip: 0,
            relative_base: 0,
        }
    }

    #[must_use]
    pub const fn ip(&self) -> usize {
        self.ip
    }

    #[must_use]
    pub const fn relative_base(&self) -> Word {
        self.relative_base
    }

    /// Resolves the value of the `parameter`-th operand (1-based) of the
    /// instruction at `ip`, per its addressing mode.
    pub(crate) fn operand_value(
        &self,
        memory: &mut Memory,
        instruction: &Instruction,
        parameter: usize,
    ) -> Result<Word, VirtualMachineError> {
        let cell = memory.read(self.ip + parameter);
        match instruction.mode(parameter) {
            ParameterMode::Position => {
                let address = self.checked_address(cell)?;
                Ok(memory.read(address))
            }
            ParameterMode::Immediate => Ok(cell),
            ParameterMode::Relative => {
                let address = self.checked_address(self.relative_base + cell)?;
                Ok(memory.read(address))
            }
        }
    }

    /// Resolves the `parameter`-th operand (1-based) as a write destination.
    ///
    /// Unlike [`Self::operand_value`], position mode yields the address
    /// stored in the parameter cell directly, with no further dereference.
    /// Immediate mode has no address semantics and is a fatal decode fault.
    pub(crate) fn destination_address(
        &self,
        memory: &mut Memory,
        instruction: &Instruction,
        parameter: usize,
    ) -> Result<usize, VirtualMachineError> {
        let cell = memory.read(self.ip + parameter);
        match instruction.mode(parameter) {
            ParameterMode::Position => self.checked_address(cell),
            ParameterMode::Immediate => Err(VirtualMachineError::ImmediateDestination {
                ip: self.ip,
                instruction: instruction.raw(),
            }),
            ParameterMode::Relative => self.checked_address(self.relative_base + cell),
        }
    }

    /// Moves the instruction pointer past an instruction that did not jump.
    pub(crate) const fn advance(&mut self, opcode: Opcode) {
        self.ip += 1 + opcode.parameter_count();
    }

    /// Overwrites the instruction pointer with a jump target.
    pub(crate) fn jump_to(&mut self, target: Word) -> Result<(), VirtualMachineError> {
        self.ip = self.checked_address(target)?;
        Ok(())
    }

    /// Converts an effective address to `usize`, faulting on anything below
    /// zero (a corrupted relative base, typically).
    fn checked_address(&self, address: Word) -> Result<usize, VirtualMachineError> {
        usize::try_from(address).map_err(|_| VirtualMachineError::NegativeEffectiveAddress {
            ip: self.ip,
            address,
        })
    }
}
