//! RISC-V instruction descriptor table, generated from `isa.yaml`.
//!
//! This crate provides the opcode-indexed table that classifies every
//! instruction shape the instruction-info queries understand: operand
//! formats, semantic flags and natural access widths, plus the register
//! file and subtarget register width.
//!
//! ```
//! use rvinfo_isa::{Opcode, OpcodeFlags, Xlen};
//!
//! let addiw = Opcode::ADDIW.info().unwrap();
//! assert!(addiw.flags().contains(OpcodeFlags::WORD));
//! assert!(!addiw.is_add_immediate());
//! assert!(!addiw.is_available(Xlen::Rv32));
//! assert!(rvinfo_isa::MEM_OFFSET_RANGE.contains(&-2048));
//! ```

// The bitflags crate is used by generated code
pub use bitflags;

mod reg;
mod table;
mod xlen;

pub use reg::{ParseRegError, REGS_PER_CLASS, Reg, RegClass};
pub use table::{
    Opcode, OpcodeFlags, OpcodeInfo, OperandInfo, OperandKind, OperandRole, lookup,
    lookup_mnemonic, opcode_count, opcode_table,
};
pub use xlen::{ParseXlenError, Xlen};

/// Known minimum bytes of one LMUL=1 vector register group; the effective
/// size is this value times the runtime `vscale`.
pub const VECTOR_BLOCK_BYTES: u32 = 8;

/// Offsets a scalar load or store can encode: a signed 12-bit immediate.
pub const MEM_OFFSET_RANGE: std::ops::RangeInclusive<i64> = -2048..=2047;
