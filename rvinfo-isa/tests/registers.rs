use rvinfo_isa::{ParseRegError, ParseXlenError, REGS_PER_CLASS, Reg, RegClass, Xlen};

#[test]
fn classes_and_indices() {
    assert_eq!(Reg::X2.class(), RegClass::Gpr);
    assert_eq!(Reg::F3.class(), RegClass::Fpr);
    assert_eq!(Reg::V8.class(), RegClass::Vr);
    assert_eq!(Reg::F3.index(), 3);
    assert_eq!(Reg::V31.index(), 31);
    assert_ne!(Reg::X3, Reg::F3);
}

#[test]
fn raw_roundtrip() {
    for raw in 0..Reg::COUNT {
        let reg = Reg::from_raw(raw).unwrap();
        assert_eq!(reg.raw(), raw);
        assert_eq!(Reg::new(reg.class(), reg.index()), reg);
    }
    assert_eq!(Reg::from_raw(Reg::COUNT), None);
    assert_eq!(Reg::COUNT, 3 * REGS_PER_CLASS);
}

#[test]
fn display_and_parse() {
    assert_eq!(Reg::X1.to_string(), "x1");
    assert_eq!(Reg::F3.to_string(), "f3");
    assert_eq!(format!("{:?}", Reg::V8), "Reg(v8)");
    for raw in 0..Reg::COUNT {
        let reg = Reg::from_raw(raw).unwrap();
        assert_eq!(reg.to_string().parse::<Reg>(), Ok(reg));
    }
}

#[test]
fn parse_abi_names() {
    assert_eq!("zero".parse(), Ok(Reg::X0));
    assert_eq!("sp".parse(), Ok(Reg::X2));
    assert_eq!("fp".parse(), Ok(Reg::X8));
    assert_eq!("s0".parse(), Ok(Reg::X8));
    assert_eq!("a0".parse(), Ok(Reg::X10));
    assert_eq!("T6".parse(), Ok(Reg::X31));
    assert_eq!("fa0".parse(), Ok(Reg::F10));
    assert_eq!("ft11".parse(), Ok(Reg::F31));
    assert_eq!(Reg::X2.abi_name(), Some("sp"));
    assert_eq!(Reg::V0.abi_name(), None);
}

#[test]
fn parse_rejects_bad_names() {
    for bad in ["", "x", "x32", "x01", "x-1", "q1", "f+1", "v100"] {
        assert_eq!(bad.parse::<Reg>(), Err(ParseRegError(bad.to_string())), "{bad:?}");
    }
}

#[test]
fn xlen_parse_and_display() {
    assert_eq!("32".parse(), Ok(Xlen::Rv32));
    assert_eq!("riscv64".parse(), Ok(Xlen::Rv64));
    assert_eq!("RV64".parse(), Ok(Xlen::Rv64));
    assert_eq!("128".parse::<Xlen>(), Err(ParseXlenError("128".to_string())));
    assert_eq!(Xlen::Rv32.to_string(), "rv32");
    assert_eq!(Xlen::Rv64.bytes(), 8);
}
