use rvinfo_ir::{AccessKind, Instruction, MemAccess, Operand};
use rvinfo_isa::{OperandKind, Opcode, Reg};

#[test]
fn builder_keeps_operand_order() {
    let mi = Instruction::build(Opcode::FSW)
        .reg(Reg::F3)
        .reg(Reg::X3)
        .imm(36)
        .mem(MemAccess::store(4))
        .finish();
    assert_eq!(mi.opcode(), Opcode::FSW);
    assert_eq!(
        mi.operands(),
        &[Operand::Reg(Reg::F3), Operand::Reg(Reg::X3), Operand::Imm(36)]
    );
    assert_eq!(mi.operand(1).and_then(Operand::reg), Some(Reg::X3));
    assert_eq!(mi.operand(3), None);
    assert_eq!(mi.single_mem_access(), Some(&MemAccess::store(4)));
}

#[test]
fn single_mem_access_requires_exactly_one() {
    let none = Instruction::build(Opcode::LW).def(Reg::X1).reg(Reg::X2).imm(0).finish();
    assert_eq!(none.single_mem_access(), None);

    let two = Instruction::build(Opcode::LW)
        .def(Reg::X1)
        .reg(Reg::X2)
        .imm(0)
        .mem(MemAccess::load(4))
        .mem(MemAccess::load(4))
        .finish();
    assert_eq!(two.mem_accesses().len(), 2);
    assert_eq!(two.single_mem_access(), None);
}

#[test]
fn mem_access_fields() {
    let access = MemAccess::load(16).scalable();
    assert_eq!(access.width(), 16);
    assert_eq!(access.kind(), AccessKind::Load);
    assert!(access.is_scalable());
    assert!(!MemAccess::store(1).is_scalable());
}

#[test]
#[should_panic(expected = "must be positive")]
fn zero_width_access_panics() {
    let _ = MemAccess::load(0);
}

#[test]
fn operand_accessors() {
    assert_eq!(Operand::Imm(-1).imm(), Some(-1));
    assert_eq!(Operand::Imm(-1).reg(), None);
    assert_eq!(Operand::FrameSlot(2).frame_slot(), Some(2));
    assert!(Operand::FrameSlot(2).fits(OperandKind::Addr));
    assert!(Operand::Reg(Reg::X2).fits(OperandKind::Addr));
    assert!(!Operand::Imm(0).fits(OperandKind::Addr));
    assert!(!Operand::FrameSlot(0).fits(OperandKind::Reg));
    assert!(!Operand::Other.fits(OperandKind::Imm));
}

#[test]
fn display() {
    let addi = Instruction::build(Opcode::ADDI).def(Reg::X1).reg(Reg::X2).imm(-128).finish();
    assert_eq!(addi.to_string(), "addi x1, x2, -128");

    let sw = Instruction::build(Opcode::SW).reg(Reg::X3).frame_slot(2).imm(4).finish();
    assert_eq!(sw.to_string(), "sw x3, 4(%stack.2)");

    let vle = Instruction::build(Opcode::PseudoVLE32_V_M1).def(Reg::V8).reg(Reg::X3).finish();
    assert_eq!(vle.to_string(), "pseudovle32_v_m1 v8, (x3)");

    let lui = Instruction::build(Opcode::LUI).def(Reg::X1).imm(-128).finish();
    assert_eq!(lui.to_string(), "lui x1, -128");
}
