//! Immediate-add and register-copy recognition.

use rvinfo_ir::{Instruction, Operand};
use rvinfo_isa::{Opcode, Reg};

/// Source register and addend of `dest = reg + imm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegImmPair {
    pub reg: Reg,
    pub imm: i64,
}

/// Destination and source of a register copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DestSourcePair {
    pub dest: Reg,
    pub source: Reg,
}

/// If `mi` computes `dest = reg + imm` at full register width, return
/// `reg` and `imm`.
///
/// Only opcodes tagged [`ADD_IMM`](rvinfo_isa::OpcodeFlags::ADD_IMM) qualify.
/// The 32-bit `addiw` has the same operand shape but sign-extends its result
/// from bit 31, so it is never an additive identity and is never tagged.
pub fn is_add_immediate(mi: &Instruction, dest: Reg) -> Option<RegImmPair> {
    let info = mi.info()?;
    if !info.is_add_immediate() {
        log::trace!("{}: not an add-immediate form", info.mnemonic());
        return None;
    }

    match *mi.operands() {
        [Operand::Reg(def), Operand::Reg(reg), Operand::Imm(imm)] => {
            if def != dest {
                log::trace!("{}: defines {def}, not {dest}", info.mnemonic());
                return None;
            }
            Some(RegImmPair { reg, imm })
        }
        _ => {
            log::trace!("{}: operands do not match the add-immediate shape", mi);
            None
        }
    }
}

/// If `mi` only copies one register to another, return both.
///
/// Recognises `addi rd, rs, 0` and `fsgnj.{s,d} rd, rs, rs`.
pub fn is_copy_instr(mi: &Instruction) -> Option<DestSourcePair> {
    match (mi.opcode(), mi.operands()) {
        (Opcode::ADDI, &[Operand::Reg(dest), Operand::Reg(source), Operand::Imm(0)]) => {
            Some(DestSourcePair { dest, source })
        }
        (
            Opcode::FSGNJ_S | Opcode::FSGNJ_D,
            &[Operand::Reg(dest), Operand::Reg(source), Operand::Reg(sign)],
        ) if source == sign => Some(DestSourcePair { dest, source }),
        _ => None,
    }
}
