use rvinfo_analysis::{InstrInfo, RiscvRegisterInfo, Subtarget};
use rvinfo_isa::Xlen;

/// Run `f` once per subtarget, mirroring how a backend is instantiated for
/// both `riscv32` and `riscv64`.
pub fn for_each_subtarget(mut f: impl FnMut(&InstrInfo, &RiscvRegisterInfo)) {
    for xlen in [Xlen::Rv32, Xlen::Rv64] {
        let subtarget = Subtarget::new(xlen);
        f(&InstrInfo::new(subtarget), &subtarget.register_info());
    }
}
