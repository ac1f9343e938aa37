use std::fmt;

use crate::{RegClass, Xlen};

bitflags::bitflags! {
    /// Semantic tags attached to every opcode in the descriptor table.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OpcodeFlags: u32 {
        /// Plain register-width `rd = rs + imm`.
        const ADD_IMM = 1 << 0;
        const LOAD = 1 << 1;
        const STORE = 1 << 2;
        /// Vector memory pseudo; access size depends on the runtime vector length.
        const VECTOR_PSEUDO = 1 << 3;
        /// Only defined on 64-bit subtargets.
        const RV64 = 1 << 4;
        /// Operates on the low 32 bits and sign-extends the result.
        const WORD = 1 << 5;
        const FLOAT = 1 << 6;
    }
}

/// What an operand slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// A register of the slot's register class.
    Reg,
    /// A signed immediate.
    Imm,
    /// An address base: either a register or a frame slot.
    Addr,
}

/// How an operand slot is used by the instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandRole {
    Def,
    Use,
    /// Address base of a memory access.
    Base,
    /// Constant displacement added to the base.
    Offset,
}

/// One slot of an opcode's operand shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandInfo {
    kind: OperandKind,
    role: OperandRole,
    class: Option<RegClass>,
}

impl OperandInfo {
    #[inline]
    pub const fn kind(&self) -> OperandKind {
        self.kind
    }

    #[inline]
    pub const fn role(&self) -> OperandRole {
        self.role
    }

    /// Register class required by a [`OperandKind::Reg`] slot.
    #[inline]
    pub const fn reg_class(&self) -> Option<RegClass> {
        self.class
    }
}

/// Opcode identifier: the index of the opcode's entry in the descriptor table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Descriptor table entry for this opcode, if it exists.
    #[inline]
    pub fn info(self) -> Option<&'static OpcodeInfo> {
        lookup(self.0)
    }

    /// Assembly mnemonic, or `"<unknown>"` for a raw value outside the table.
    pub fn mnemonic(self) -> &'static str {
        self.info().map_or("<unknown>", OpcodeInfo::mnemonic)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.info() {
            Some(info) => write!(f, "Opcode({})", info.name()),
            None => write!(f, "Opcode({:#x})", self.0),
        }
    }
}

/// A single descriptor table entry.
#[derive(Debug)]
pub struct OpcodeInfo {
    opcode: Opcode,
    name: &'static str,
    mnemonic: &'static str,
    format: &'static str,
    operands: &'static [OperandInfo],
    flags: OpcodeFlags,
    width: u32,
}

impl OpcodeInfo {
    #[inline]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Table name, e.g. `ADDIW` or `PseudoVLE32_V_M1`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    /// Name of the operand format in `isa.yaml`.
    #[inline]
    pub const fn format(&self) -> &'static str {
        self.format
    }

    #[inline]
    pub const fn flags(&self) -> OpcodeFlags {
        self.flags
    }

    /// Expected operand shape, in operand order.
    #[inline]
    pub const fn operands(&self) -> &'static [OperandInfo] {
        self.operands
    }

    /// Natural access width in bytes of a scalar load or store.
    ///
    /// `None` for non-memory opcodes and for vector pseudos, whose width is
    /// only known at run time.
    pub const fn access_width(&self) -> Option<u32> {
        if self.width == 0 { None } else { Some(self.width) }
    }

    pub fn def_index(&self) -> Option<usize> {
        self.role_index(OperandRole::Def)
    }

    pub fn base_index(&self) -> Option<usize> {
        self.role_index(OperandRole::Base)
    }

    pub fn offset_index(&self) -> Option<usize> {
        self.role_index(OperandRole::Offset)
    }

    fn role_index(&self, role: OperandRole) -> Option<usize> {
        self.operands.iter().position(|op| op.role == role)
    }

    /// Whether the opcode exists on a subtarget with the given register width.
    pub fn is_available(&self, xlen: Xlen) -> bool {
        !self.flags.contains(OpcodeFlags::RV64) || xlen == Xlen::Rv64
    }

    #[inline]
    pub fn is_add_immediate(&self) -> bool {
        self.flags.contains(OpcodeFlags::ADD_IMM)
    }

    #[inline]
    pub fn may_load(&self) -> bool {
        self.flags.contains(OpcodeFlags::LOAD)
    }

    #[inline]
    pub fn may_store(&self) -> bool {
        self.flags.contains(OpcodeFlags::STORE)
    }

    /// Loads and stores; exactly the opcodes that carry a memory access descriptor.
    #[inline]
    pub fn is_memory(&self) -> bool {
        self.flags.intersects(OpcodeFlags::LOAD.union(OpcodeFlags::STORE))
    }

    #[inline]
    pub fn is_vector_pseudo(&self) -> bool {
        self.flags.contains(OpcodeFlags::VECTOR_PSEUDO)
    }
}

/// Look up the descriptor for a raw opcode value.
#[inline]
pub fn lookup(raw: u16) -> Option<&'static OpcodeInfo> {
    OPCODE_TABLE.get(raw as usize)
}

/// Look up an opcode by assembly mnemonic (case-insensitive).
pub fn lookup_mnemonic(mnemonic: &str) -> Option<&'static OpcodeInfo> {
    OPCODE_TABLE
        .iter()
        .find(|info| info.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Iterate over every entry of the descriptor table in opcode order.
pub fn opcode_table() -> impl ExactSizeIterator<Item = &'static OpcodeInfo> {
    OPCODE_TABLE.iter()
}

#[inline]
pub fn opcode_count() -> usize {
    OPCODE_TABLE.len()
}

include!(concat!(env!("OUT_DIR"), "/generated.rs"));
