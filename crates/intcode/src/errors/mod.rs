pub mod program;
pub mod vm;
