use std::fmt;
use std::num::NonZeroU32;

use rvinfo_isa::{Opcode, OpcodeInfo, OperandKind, OperandRole, Reg};

/// A machine operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Physical register.
    Reg(Reg),
    /// Signed immediate, sign-extended to 64 bits.
    Imm(i64),
    /// Stack frame slot index, resolved to `sp`/`fp` + offset after frame lowering.
    FrameSlot(u32),
    /// Anything else (symbols, block references); opaque to the analyses.
    Other,
}

impl Operand {
    #[inline]
    pub fn is_reg(&self) -> bool {
        matches!(self, Operand::Reg(_))
    }

    #[inline]
    pub fn is_imm(&self) -> bool {
        matches!(self, Operand::Imm(_))
    }

    #[inline]
    pub fn is_frame_slot(&self) -> bool {
        matches!(self, Operand::FrameSlot(_))
    }

    pub fn reg(&self) -> Option<Reg> {
        match *self {
            Operand::Reg(r) => Some(r),
            _ => None,
        }
    }

    pub fn imm(&self) -> Option<i64> {
        match *self {
            Operand::Imm(v) => Some(v),
            _ => None,
        }
    }

    pub fn frame_slot(&self) -> Option<u32> {
        match *self {
            Operand::FrameSlot(i) => Some(i),
            _ => None,
        }
    }

    /// Whether this operand may occupy a slot of the given kind.
    pub fn fits(&self, kind: OperandKind) -> bool {
        matches!(
            (kind, self),
            (OperandKind::Reg, Operand::Reg(_))
                | (OperandKind::Imm, Operand::Imm(_))
                | (OperandKind::Addr, Operand::Reg(_) | Operand::FrameSlot(_))
        )
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "{r}"),
            Operand::Imm(v) => write!(f, "{v}"),
            Operand::FrameSlot(i) => write!(f, "%stack.{i}"),
            Operand::Other => f.write_str("<other>"),
        }
    }
}

/// Direction of a memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    Load,
    Store,
}

/// Memory access descriptor attached to a load or store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemAccess {
    width: NonZeroU32,
    kind: AccessKind,
    scalable: bool,
}

impl MemAccess {
    pub const fn new(kind: AccessKind, width: NonZeroU32) -> Self {
        Self {
            width,
            kind,
            scalable: false,
        }
    }

    /// Fixed-size load of `width` bytes.
    ///
    /// Panics if `width` is zero.
    pub fn load(width: u32) -> Self {
        Self::new(AccessKind::Load, nonzero(width))
    }

    /// Fixed-size store of `width` bytes.
    ///
    /// Panics if `width` is zero.
    pub fn store(width: u32) -> Self {
        Self::new(AccessKind::Store, nonzero(width))
    }

    /// Mark the access as scaled by the runtime vector length; `width` then
    /// holds the known minimum size.
    pub const fn scalable(mut self) -> Self {
        self.scalable = true;
        self
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width.get()
    }

    #[inline]
    pub const fn kind(&self) -> AccessKind {
        self.kind
    }

    #[inline]
    pub const fn is_scalable(&self) -> bool {
        self.scalable
    }
}

fn nonzero(width: u32) -> NonZeroU32 {
    let Some(width) = NonZeroU32::new(width) else {
        panic!("memory access width must be positive");
    };
    width
}

/// An immutable machine instruction: an opcode, its operands in table
/// order, and any attached memory access descriptors.
///
/// Instructions are produced by the surrounding pipeline (or by
/// [`InstrBuilder`] / [`parse_instruction`](crate::parse_instruction)); the
/// analyses only borrow them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
    opcode: Opcode,
    operands: Vec<Operand>,
    mem: Vec<MemAccess>,
}

impl Instruction {
    /// Start building an instruction, in the style of `BuildMI`.
    ///
    /// ```
    /// use rvinfo_ir::{Instruction, MemAccess};
    /// use rvinfo_isa::{Opcode, Reg};
    ///
    /// let lb = Instruction::build(Opcode::LB)
    ///     .def(Reg::X1)
    ///     .reg(Reg::X2)
    ///     .imm(-128)
    ///     .mem(MemAccess::load(1))
    ///     .finish();
    /// assert_eq!(lb.to_string(), "lb x1, -128(x2)");
    /// ```
    pub fn build(opcode: Opcode) -> InstrBuilder {
        InstrBuilder {
            opcode,
            operands: Vec::new(),
            mem: Vec::new(),
        }
    }

    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Descriptor table entry, `None` for an opcode outside the table.
    #[inline]
    pub fn info(&self) -> Option<&'static OpcodeInfo> {
        self.opcode.info()
    }

    #[inline]
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    #[inline]
    pub fn operand(&self, index: usize) -> Option<&Operand> {
        self.operands.get(index)
    }

    /// All attached memory access descriptors.
    #[inline]
    pub fn mem_accesses(&self) -> &[MemAccess] {
        &self.mem
    }

    /// The memory access descriptor, if exactly one is attached.
    pub fn single_mem_access(&self) -> Option<&MemAccess> {
        match self.mem.as_slice() {
            [access] => Some(access),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(info) = self.info() else {
            write!(f, "{:?}", self.opcode)?;
            for (i, op) in self.operands.iter().enumerate() {
                f.write_str(if i == 0 { " " } else { ", " })?;
                write!(f, "{op}")?;
            }
            return Ok(());
        };

        f.write_str(info.mnemonic())?;
        let offset_index = info.offset_index();
        let mut first = true;
        for (i, op) in self.operands.iter().enumerate() {
            if Some(i) == offset_index {
                continue;
            }
            f.write_str(if first { " " } else { ", " })?;
            first = false;
            let is_base = info.operands().get(i).map(|slot| slot.role()) == Some(OperandRole::Base);
            if is_base {
                if let Some(offset) = offset_index.and_then(|j| self.operands.get(j)) {
                    write!(f, "{offset}")?;
                }
                write!(f, "({op})")?;
            } else {
                write!(f, "{op}")?;
            }
        }
        Ok(())
    }
}

/// Incremental [`Instruction`] constructor. Operands are appended in order;
/// nothing is validated until [`Instruction::verify`] is called.
#[derive(Debug, Clone)]
pub struct InstrBuilder {
    opcode: Opcode,
    operands: Vec<Operand>,
    mem: Vec<MemAccess>,
}

impl InstrBuilder {
    /// Append the destination register.
    pub fn def(self, reg: Reg) -> Self {
        self.operand(Operand::Reg(reg))
    }

    pub fn reg(self, reg: Reg) -> Self {
        self.operand(Operand::Reg(reg))
    }

    pub fn imm(self, value: i64) -> Self {
        self.operand(Operand::Imm(value))
    }

    pub fn frame_slot(self, index: u32) -> Self {
        self.operand(Operand::FrameSlot(index))
    }

    pub fn operand(mut self, op: Operand) -> Self {
        self.operands.push(op);
        self
    }

    /// Attach a memory access descriptor.
    pub fn mem(mut self, access: MemAccess) -> Self {
        self.mem.push(access);
        self
    }

    pub fn finish(self) -> Instruction {
        Instruction {
            opcode: self.opcode,
            operands: self.operands,
            mem: self.mem,
        }
    }
}

impl From<InstrBuilder> for Instruction {
    fn from(builder: InstrBuilder) -> Self {
        builder.finish()
    }
}
