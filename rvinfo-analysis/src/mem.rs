//! Base + offset + width decomposition of memory accesses.

use rvinfo_ir::{Instruction, Operand};
use rvinfo_isa::{MEM_OFFSET_RANGE, Reg, RegClass};

use crate::register_info::RegisterInfo;

/// Address decomposition of a memory access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemOperands<'a> {
    /// Base operands; always exactly one register operand.
    pub base_ops: Vec<&'a Operand>,
    pub offset: i64,
    /// Whether `offset` is scaled by the runtime vector length. Always false:
    /// scalable accesses are not decomposed.
    pub offset_is_scalable: bool,
    /// Access width in bytes, taken from the memory access descriptor.
    pub width: u32,
}

/// Single-base form of [`MemOperands`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemOperand<'a> {
    pub base: &'a Operand,
    pub offset: i64,
    pub width: u32,
}

/// A spill or reload: scalar access to a frame slot at offset zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StackSlotAccess {
    /// Register loaded (for a reload) or stored (for a spill).
    pub reg: Reg,
    pub slot: u32,
    /// Natural width of the opcode, in bytes.
    pub width: u32,
}

/// Decompose a load or store into base register, constant offset and width.
///
/// Returns `None` unless the opcode is a load or store, exactly one
/// fixed-size memory access descriptor is attached, and the address is a
/// register base plus an immediate offset within [`MEM_OFFSET_RANGE`].
/// Vector pseudos and scalable accesses are never decomposed.
pub fn get_mem_operands_with_offset_width<'a>(
    mi: &'a Instruction,
    tri: &dyn RegisterInfo,
) -> Option<MemOperands<'a>> {
    let op = get_mem_operand_with_offset_width(mi, tri)?;
    Some(MemOperands {
        base_ops: vec![op.base],
        offset: op.offset,
        offset_is_scalable: false,
        width: op.width,
    })
}

/// Like [`get_mem_operands_with_offset_width`], returning the single base
/// operand directly.
pub fn get_mem_operand_with_offset_width<'a>(
    mi: &'a Instruction,
    tri: &dyn RegisterInfo,
) -> Option<MemOperand<'a>> {
    let info = mi.info()?;
    let mnemonic = info.mnemonic();
    if !info.is_memory() {
        log::trace!("{mnemonic}: not a load or store");
        return None;
    }
    if info.is_vector_pseudo() {
        log::trace!("{mnemonic}: vector memory pseudos are not decomposed");
        return None;
    }
    let Some(access) = mi.single_mem_access() else {
        log::trace!(
            "{mnemonic}: {} memory access descriptors attached, need exactly one",
            mi.mem_accesses().len()
        );
        return None;
    };
    if access.is_scalable() {
        log::trace!("{mnemonic}: scalable access width is not representable");
        return None;
    }
    if mi.operands().len() != info.operands().len() {
        log::trace!("{mnemonic}: operand count does not match the table shape");
        return None;
    }

    let base = mi.operand(info.base_index()?)?;
    // TODO: accept frame slot bases once callers can take a non-register base operand.
    let Operand::Reg(reg) = *base else {
        log::trace!("{mnemonic}: base {base} is not a register");
        return None;
    };
    if tri.reg_class(reg) != Some(RegClass::Gpr) {
        log::trace!("{mnemonic}: base {reg} is not an integer register");
        return None;
    }
    let Operand::Imm(offset) = *mi.operand(info.offset_index()?)? else {
        log::trace!("{mnemonic}: offset is not an immediate");
        return None;
    };
    if !MEM_OFFSET_RANGE.contains(&offset) {
        log::trace!("{mnemonic}: offset {offset} is not encodable");
        return None;
    }

    Some(MemOperand {
        base,
        offset,
        width: access.width(),
    })
}

/// Whether `a` and `b` provably touch disjoint bytes: both decompose onto
/// the same base register and their `[offset, offset + width)` ranges do not
/// intersect.
///
/// Offsets are bounded by [`MEM_OFFSET_RANGE`], so the ranges never wrap
/// around the address space on either register width.
pub fn are_mem_accesses_trivially_disjoint(
    a: &Instruction,
    b: &Instruction,
    tri: &dyn RegisterInfo,
) -> bool {
    let (Some(op_a), Some(op_b)) = (
        get_mem_operand_with_offset_width(a, tri),
        get_mem_operand_with_offset_width(b, tri),
    ) else {
        return false;
    };
    let (Some(base_a), Some(base_b)) = (op_a.base.reg(), op_b.base.reg()) else {
        return false;
    };
    if !tri.regs_overlap(base_a, base_b) {
        return false;
    }

    let (low, high) = if op_a.offset <= op_b.offset {
        (op_a, op_b)
    } else {
        (op_b, op_a)
    };
    low.offset + i64::from(low.width) <= high.offset
}

/// Recognise a reload `ld rd, 0(%stack.N)` from a frame slot.
pub fn is_load_from_stack_slot(mi: &Instruction) -> Option<StackSlotAccess> {
    stack_slot_access(mi, true)
}

/// Recognise a spill `sd rs, 0(%stack.N)` to a frame slot.
pub fn is_store_to_stack_slot(mi: &Instruction) -> Option<StackSlotAccess> {
    stack_slot_access(mi, false)
}

fn stack_slot_access(mi: &Instruction, load: bool) -> Option<StackSlotAccess> {
    let info = mi.info()?;
    let matches_direction = if load { info.may_load() } else { info.may_store() };
    if !matches_direction || info.is_vector_pseudo() {
        return None;
    }
    let width = info.access_width()?;
    // The transferred register is the first operand for every scalar load/store format.
    match *mi.operands() {
        [Operand::Reg(reg), Operand::FrameSlot(slot), Operand::Imm(0)] => {
            Some(StackSlotAccess { reg, slot, width })
        }
        _ => None,
    }
}
