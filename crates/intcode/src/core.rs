use std::collections::VecDeque;

use tracing::{debug, instrument, trace};

use crate::{
    Word,
    bytecode::{instruction::Instruction, program::Program},
    context::run_context::RunContext,
    errors::vm::VirtualMachineError,
    memory::mem::Memory,
};

/// Why the machine handed control back to its host.
///
/// These are the only three points at which execution pauses; everything
/// else either continues to the next instruction or faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    /// An input instruction found the queue empty. The instruction pointer
    /// has not moved; resume with `run(Some(value))`.
    NeedsInput,
    /// An output instruction emitted this value. The instruction pointer is
    /// already past the instruction; resume with `run(None)`.
    Output(Word),
    /// Opcode 99 was reached. Terminal: further `run` calls fault.
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MachineState {
    Running,
    Halted,
    Faulted,
}

/// One Intcode machine: a private memory space, an execution cursor, and a
/// queue of not-yet-consumed input values.
///
/// The machine never runs to completion on its own. Each [`Self::run`] call
/// executes instructions until the next suspension point and returns, which
/// is what lets a host single-step several machines and wire one machine's
/// [`Suspension::Output`] into another's next input — including cyclically.
/// No two machines ever share memory; cross-machine data flow is always an
/// explicit value hand-off by the host.
#[derive(Debug, Clone)]
pub struct VirtualMachine {
    run_context: RunContext,
    memory: Memory,
    pending_inputs: VecDeque<Word>,
    state: MachineState,
}

impl VirtualMachine {
    /// Builds a machine with `program` loaded at address 0, the instruction
    /// pointer at 0, the relative base at 0, and an empty input queue.
    #[must_use]
    pub fn new(program: &Program) -> Self {
        Self {
            run_context: RunContext::new(),
            memory: Memory::from_image(&program.words),
            pending_inputs: VecDeque::new(),
            state: MachineState::Running,
        }
    }

    /// Like [`Self::new`], but with a pre-supplied queue of input values
    /// consumed, in order, before any input passed to [`Self::run`].
    #[must_use]
    pub fn with_inputs(program: &Program, initial_inputs: impl IntoIterator<Item = Word>) -> Self {
        let mut machine = Self::new(program);
        machine.pending_inputs.extend(initial_inputs);
        machine
    }

    /// Executes instructions from the current instruction pointer until the
    /// next suspension point.
    ///
    /// `next_input`, when present, is appended to the input queue before
    /// execution resumes. Faults are terminal: the machine transitions to a
    /// dead state and every later call returns
    /// [`VirtualMachineError::ResumeAfterFault`]. Calling `run` again after
    /// [`Suspension::Halted`] is likewise a fault
    /// ([`VirtualMachineError::ResumeAfterHalt`]), so a host bug that keeps
    /// driving a finished machine surfaces instead of spinning.
    pub fn run(&mut self, next_input: Option<Word>) -> Result<Suspension, VirtualMachineError> {
        match self.state {
            MachineState::Halted => return Err(VirtualMachineError::ResumeAfterHalt),
            MachineState::Faulted => return Err(VirtualMachineError::ResumeAfterFault),
            MachineState::Running => {}
        }
        if let Some(value) = next_input {
            self.pending_inputs.push_back(value);
        }
        loop {
            match self.step() {
                Ok(None) => {}
                Ok(Some(suspension)) => {
                    if suspension == Suspension::Halted {
                        self.state = MachineState::Halted;
                    }
                    trace!(ip = self.run_context.ip(), ?suspension, "suspending");
                    return Ok(suspension);
                }
                Err(fault) => {
                    self.state = MachineState::Faulted;
                    debug!(ip = self.run_context.ip(), %fault, "machine faulted");
                    return Err(fault);
                }
            }
        }
    }

    /// Decodes and executes the single instruction at the current
    /// instruction pointer.
    fn step(&mut self) -> Result<Option<Suspension>, VirtualMachineError> {
        let ip = self.run_context.ip();
        let raw = self.memory.read(ip);
        let instruction = Instruction::decode(raw, ip)?;
        instruction.execute(&mut self.run_context, &mut self.memory, &mut self.pending_inputs)
    }

    /// Convenience wrapper over [`Self::run`]: feeds `input_feed` values in
    /// order whenever the machine asks, collects every output, and returns
    /// them all once the machine halts.
    ///
    /// Exhausting the feed while the machine still wants input is reported
    /// as [`VirtualMachineError::StarvedInput`]; the machine itself stays
    /// resumable in that case, since a blocked input request is not a fault.
    #[instrument(skip_all)]
    pub fn run_to_completion(
        &mut self,
        input_feed: impl IntoIterator<Item = Word>,
    ) -> Result<Vec<Word>, VirtualMachineError> {
        let mut feed = input_feed.into_iter();
        let mut outputs = Vec::new();
        let mut next_input = None;
        loop {
            match self.run(next_input.take())? {
                Suspension::NeedsInput => match feed.next() {
                    Some(value) => next_input = Some(value),
                    None => {
                        return Err(VirtualMachineError::StarvedInput {
                            ip: self.run_context.ip(),
                        });
                    }
                },
                Suspension::Output(value) => outputs.push(value),
                Suspension::Halted => return Ok(outputs),
            }
        }
    }

    /// Reads a memory cell without disturbing the machine. Unwritten
    /// addresses read as 0.
    #[must_use]
    pub fn peek(&self, address: usize) -> Word {
        self.memory.peek(address)
    }

    #[must_use]
    pub const fn run_context(&self) -> &RunContext {
        &self.run_context
    }

    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }
}
