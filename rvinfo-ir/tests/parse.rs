use rvinfo_ir::{Instruction, MemAccess, Operand, ParseError, parse_instruction};
use rvinfo_isa::{Opcode, Reg, Xlen};

#[test]
fn parse_add_immediate() {
    let mi = parse_instruction("addi x1, x2, -128").unwrap();
    let expected = Instruction::build(Opcode::ADDI).def(Reg::X1).reg(Reg::X2).imm(-128).finish();
    assert_eq!(mi, expected);
    assert!(mi.mem_accesses().is_empty());
}

#[test]
fn parse_load_attaches_natural_width() {
    let mi = parse_instruction("lb ra, -128(sp)").unwrap();
    assert_eq!(
        mi.operands(),
        &[Operand::Reg(Reg::X1), Operand::Reg(Reg::X2), Operand::Imm(-128)]
    );
    assert_eq!(mi.mem_accesses(), &[MemAccess::load(1)]);
    assert_eq!(mi.verify(Xlen::Rv32), Ok(()));
}

#[test]
fn parse_fp_store() {
    let mi: Instruction = "FSW f3, 36(x3)".parse().unwrap();
    assert_eq!(mi.opcode(), Opcode::FSW);
    assert_eq!(mi.operand(1), Some(&Operand::Reg(Reg::X3)));
    assert_eq!(mi.operand(2), Some(&Operand::Imm(36)));
    assert_eq!(mi.mem_accesses(), &[MemAccess::store(4)]);
}

#[test]
fn parse_frame_slot_base() {
    let mi = parse_instruction("sw x3, 4(%stack.2)  # spill").unwrap();
    assert_eq!(
        mi.operands(),
        &[Operand::Reg(Reg::X3), Operand::FrameSlot(2), Operand::Imm(4)]
    );
}

#[test]
fn parse_missing_offset_defaults_to_zero() {
    let mi = parse_instruction("ld a0, (a1)").unwrap();
    assert_eq!(mi.operand(2), Some(&Operand::Imm(0)));
    assert_eq!(mi.mem_accesses(), &[MemAccess::load(8)]);
}

#[test]
fn parse_vector_pseudo_is_scalable() {
    let mi = parse_instruction("pseudovle32_v_m1 v8, (x3)").unwrap();
    assert_eq!(mi.operands(), &[Operand::Reg(Reg::V8), Operand::Reg(Reg::X3)]);
    let access = mi.single_mem_access().unwrap();
    assert!(access.is_scalable());
    assert_eq!(access.width(), rvinfo_isa::VECTOR_BLOCK_BYTES);
}

#[test]
fn parse_hex_immediates() {
    let mi = parse_instruction("andi x5, x6, 0xff").unwrap();
    assert_eq!(mi.operand(2), Some(&Operand::Imm(255)));
    let mi = parse_instruction("addi x5, x6, -0x800").unwrap();
    assert_eq!(mi.operand(2), Some(&Operand::Imm(-2048)));
}

#[test]
fn display_roundtrip() {
    for text in [
        "addi x1, x2, -128",
        "lui x1, 4096",
        "lb x1, -128(x2)",
        "fsw f3, 36(x3)",
        "sw x3, 4(%stack.2)",
        "fadd.d f1, f2, f3, 7",
        "pseudovse64_v_m1 v4, (x10)",
    ] {
        let mi = parse_instruction(text).unwrap();
        assert_eq!(mi.to_string(), text);
    }
}

#[test]
fn parse_errors() {
    assert_eq!(parse_instruction("   # nothing"), Err(ParseError::Empty));
    assert_eq!(
        parse_instruction("nop"),
        Err(ParseError::UnknownMnemonic("nop".to_string()))
    );
    assert!(matches!(
        parse_instruction("addi x1, x2"),
        Err(ParseError::OperandCount { expected: 3, found: 2, .. })
    ));
    assert!(matches!(parse_instruction("addi x1, x99, 0"), Err(ParseError::Reg(_))));
    assert_eq!(
        parse_instruction("addi x1, x2, 1-2"),
        Err(ParseError::InvalidImmediate("1-2".to_string()))
    );
    assert_eq!(
        parse_instruction("addi x1, x2, --2"),
        Err(ParseError::InvalidImmediate("--2".to_string()))
    );
    assert_eq!(
        parse_instruction("lw x1, 4"),
        Err(ParseError::MalformedAddress("4".to_string()))
    );
    assert_eq!(
        parse_instruction("lw x1, 4(%stack.x)"),
        Err(ParseError::InvalidFrameSlot("%stack.x".to_string()))
    );
    assert_eq!(
        parse_instruction("pseudovle8_v_m1 v1, 8(x2)"),
        Err(ParseError::MalformedAddress("8(x2)".to_string()))
    );
}
