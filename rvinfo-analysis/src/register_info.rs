use rvinfo_isa::{Reg, RegClass};

/// Register-file queries the analyses consult when comparing registers.
///
/// Implementations are read-only services owned by the target description.
pub trait RegisterInfo {
    /// Class the register belongs to, or `None` if the target does not know it.
    fn reg_class(&self, reg: Reg) -> Option<RegClass>;

    /// Whether writing `a` may change the value of `b`.
    fn regs_overlap(&self, a: Reg, b: Reg) -> bool {
        a == b
    }
}

/// Register info for the RISC-V register file.
///
/// There is no sub-register aliasing, so two registers overlap only when
/// they are the same register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RiscvRegisterInfo;

impl RegisterInfo for RiscvRegisterInfo {
    fn reg_class(&self, reg: Reg) -> Option<RegClass> {
        Some(reg.class())
    }
}
