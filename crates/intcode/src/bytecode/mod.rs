pub mod instruction;
pub mod mode;
pub mod opcode;
pub mod program;
