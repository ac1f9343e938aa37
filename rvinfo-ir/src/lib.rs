//! Machine-instruction model for the rvinfo analyses.
//!
//! - [`Operand`]: register, immediate, frame slot or anything else
//! - [`MemAccess`]: width, direction and scalability of a memory access
//! - [`Instruction`]: immutable opcode + operands + memory descriptors
//! - [`parse_instruction`]: textual syntax for tests and tooling

pub mod instruction;
pub mod parse;
pub mod verify;

pub use instruction::{AccessKind, InstrBuilder, Instruction, MemAccess, Operand};
pub use parse::{ParseError, parse_instruction};
pub use verify::VerifyError;
