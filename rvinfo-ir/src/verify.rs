use rvinfo_isa::{MEM_OFFSET_RANGE, OperandKind, OperandRole, RegClass, Xlen};

use crate::instruction::{AccessKind, Instruction, Operand};

/// Ways an [`Instruction`] can disagree with its descriptor table entry.
///
/// Only the pipeline's own verification reports these; the instruction-info
/// queries treat a malformed instruction as "not applicable".
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("unknown opcode {0:#x}")]
    UnknownOpcode(u16),

    #[error("{mnemonic}: not available on {xlen}")]
    Unavailable { mnemonic: &'static str, xlen: Xlen },

    #[error("{mnemonic}: expected {expected} operands, found {found}")]
    OperandCount {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{mnemonic}: operand {index} should be {expected:?}, found {found}")]
    OperandKind {
        mnemonic: &'static str,
        index: usize,
        expected: OperandKind,
        found: Operand,
    },

    #[error("{mnemonic}: operand {index} should be a {expected:?} register, found {found}")]
    RegClass {
        mnemonic: &'static str,
        index: usize,
        expected: RegClass,
        found: Operand,
    },

    #[error("{mnemonic}: offset {offset} at operand {index} is not a signed 12-bit immediate")]
    OffsetRange {
        mnemonic: &'static str,
        index: usize,
        offset: i64,
    },

    #[error("{mnemonic}: memory opcode carries {found} memory access descriptors, expected 1")]
    MemAccessCount { mnemonic: &'static str, found: usize },

    #[error("{mnemonic}: non-memory opcode carries a memory access descriptor")]
    UnexpectedMemAccess { mnemonic: &'static str },

    #[error("{mnemonic}: {found:?} descriptor on a {expected:?} opcode")]
    AccessKind {
        mnemonic: &'static str,
        expected: AccessKind,
        found: AccessKind,
    },
}

impl Instruction {
    /// Check the instruction against its descriptor table entry: operand
    /// count, kinds and register classes, encodable memory offsets, and the
    /// presence and direction of its memory access descriptor.
    pub fn verify(&self, xlen: Xlen) -> Result<(), VerifyError> {
        let info = self
            .info()
            .ok_or(VerifyError::UnknownOpcode(self.opcode().raw()))?;
        let mnemonic = info.mnemonic();

        if !info.is_available(xlen) {
            return Err(VerifyError::Unavailable { mnemonic, xlen });
        }

        let shape = info.operands();
        if shape.len() != self.operands().len() {
            return Err(VerifyError::OperandCount {
                mnemonic,
                expected: shape.len(),
                found: self.operands().len(),
            });
        }

        for (index, (slot, &op)) in shape.iter().zip(self.operands()).enumerate() {
            if !op.fits(slot.kind()) {
                return Err(VerifyError::OperandKind {
                    mnemonic,
                    index,
                    expected: slot.kind(),
                    found: op,
                });
            }
            if let (Some(expected), Operand::Reg(reg)) = (slot.reg_class(), op) {
                if reg.class() != expected {
                    return Err(VerifyError::RegClass {
                        mnemonic,
                        index,
                        expected,
                        found: op,
                    });
                }
            }
            if let (OperandRole::Offset, Operand::Imm(offset)) = (slot.role(), op) {
                if !MEM_OFFSET_RANGE.contains(&offset) {
                    return Err(VerifyError::OffsetRange {
                        mnemonic,
                        index,
                        offset,
                    });
                }
            }
        }

        if !info.is_memory() {
            if !self.mem_accesses().is_empty() {
                return Err(VerifyError::UnexpectedMemAccess { mnemonic });
            }
            return Ok(());
        }

        let Some(access) = self.single_mem_access() else {
            return Err(VerifyError::MemAccessCount {
                mnemonic,
                found: self.mem_accesses().len(),
            });
        };
        let expected = if info.may_load() {
            AccessKind::Load
        } else {
            AccessKind::Store
        };
        if access.kind() != expected {
            return Err(VerifyError::AccessKind {
                mnemonic,
                expected,
                found: access.kind(),
            });
        }
        Ok(())
    }
}
