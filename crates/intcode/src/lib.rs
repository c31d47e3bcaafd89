pub mod bytecode;
pub mod context;
pub mod core;
pub mod errors;
pub mod memory;

/// The integer type stored in every memory cell.
pub type Word = i64;
