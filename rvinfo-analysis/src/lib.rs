//! Instruction-semantics queries for RISC-V machine instructions.
//!
//! Generic optimisation passes hold an already-built [`Instruction`] and ask
//! [`InstrInfo`] targeted questions about it. Every query is a pure function
//! of one instruction (two for the disjointness check) and the static
//! descriptor table; "not applicable" is reported as `None` or `false`,
//! never as an error.
//!
//! ```
//! use rvinfo_analysis::{InstrInfo, RegImmPair, Subtarget};
//! use rvinfo_ir::{Instruction, MemAccess};
//! use rvinfo_isa::{Opcode, Reg, Xlen};
//!
//! let subtarget = Subtarget::new(Xlen::Rv64);
//! let tii = InstrInfo::new(subtarget);
//! let tri = subtarget.register_info();
//!
//! let addi = Instruction::build(Opcode::ADDI).def(Reg::X1).reg(Reg::X2).imm(-128).finish();
//! assert_eq!(tii.is_add_immediate(&addi, Reg::X1), Some(RegImmPair { reg: Reg::X2, imm: -128 }));
//!
//! let lb = Instruction::build(Opcode::LB)
//!     .def(Reg::X1)
//!     .reg(Reg::X2)
//!     .imm(-128)
//!     .mem(MemAccess::load(1))
//!     .finish();
//! let ops = tii.get_mem_operands_with_offset_width(&lb, &tri).unwrap();
//! assert_eq!((ops.offset, ops.width), (-128, 1));
//! ```

pub mod imm;
pub mod mem;
pub mod register_info;
pub mod subtarget;

pub use imm::{DestSourcePair, RegImmPair};
pub use mem::{MemOperand, MemOperands, StackSlotAccess};
pub use register_info::{RegisterInfo, RiscvRegisterInfo};
pub use subtarget::Subtarget;

use rvinfo_ir::Instruction;
use rvinfo_isa::{Opcode, OpcodeInfo, Reg};

/// Target instruction info for one subtarget.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrInfo {
    subtarget: Subtarget,
}

impl InstrInfo {
    pub const fn new(subtarget: Subtarget) -> Self {
        Self { subtarget }
    }

    #[inline]
    pub const fn subtarget(&self) -> Subtarget {
        self.subtarget
    }

    /// Descriptor for `opcode` if it exists on this subtarget.
    pub fn get(&self, opcode: Opcode) -> Option<&'static OpcodeInfo> {
        opcode
            .info()
            .filter(|info| info.is_available(self.subtarget.xlen()))
    }

    /// Opcodes outside this subtarget's instruction set get no answers.
    fn supports(&self, mi: &Instruction) -> bool {
        let supported = self.get(mi.opcode()).is_some();
        if !supported {
            log::trace!(
                "{:?} is not available on {}",
                mi.opcode(),
                self.subtarget.xlen()
            );
        }
        supported
    }

    /// See [`imm::is_add_immediate`].
    pub fn is_add_immediate(&self, mi: &Instruction, dest: Reg) -> Option<RegImmPair> {
        if !self.supports(mi) {
            return None;
        }
        imm::is_add_immediate(mi, dest)
    }

    /// See [`imm::is_copy_instr`].
    pub fn is_copy_instr(&self, mi: &Instruction) -> Option<DestSourcePair> {
        if !self.supports(mi) {
            return None;
        }
        imm::is_copy_instr(mi)
    }

    /// See [`mem::get_mem_operands_with_offset_width`].
    pub fn get_mem_operands_with_offset_width<'a>(
        &self,
        mi: &'a Instruction,
        tri: &dyn RegisterInfo,
    ) -> Option<MemOperands<'a>> {
        if !self.supports(mi) {
            return None;
        }
        mem::get_mem_operands_with_offset_width(mi, tri)
    }

    /// See [`mem::get_mem_operand_with_offset_width`].
    pub fn get_mem_operand_with_offset_width<'a>(
        &self,
        mi: &'a Instruction,
        tri: &dyn RegisterInfo,
    ) -> Option<MemOperand<'a>> {
        if !self.supports(mi) {
            return None;
        }
        mem::get_mem_operand_with_offset_width(mi, tri)
    }

    /// See [`mem::are_mem_accesses_trivially_disjoint`].
    pub fn are_mem_accesses_trivially_disjoint(
        &self,
        a: &Instruction,
        b: &Instruction,
        tri: &dyn RegisterInfo,
    ) -> bool {
        self.supports(a) && self.supports(b) && mem::are_mem_accesses_trivially_disjoint(a, b, tri)
    }

    /// See [`mem::is_load_from_stack_slot`].
    pub fn is_load_from_stack_slot(&self, mi: &Instruction) -> Option<StackSlotAccess> {
        if !self.supports(mi) {
            return None;
        }
        mem::is_load_from_stack_slot(mi)
    }

    /// See [`mem::is_store_to_stack_slot`].
    pub fn is_store_to_stack_slot(&self, mi: &Instruction) -> Option<StackSlotAccess> {
        if !self.supports(mi) {
            return None;
        }
        mem::is_store_to_stack_slot(mi)
    }
}
