use rvinfo_isa::Xlen;

use crate::register_info::RiscvRegisterInfo;

/// Subtarget features that change instruction semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subtarget {
    xlen: Xlen,
}

impl Subtarget {
    pub const fn new(xlen: Xlen) -> Self {
        Self { xlen }
    }

    #[inline]
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    #[inline]
    pub const fn is_64bit(&self) -> bool {
        matches!(self.xlen, Xlen::Rv64)
    }

    pub const fn register_info(&self) -> RiscvRegisterInfo {
        RiscvRegisterInfo
    }
}
