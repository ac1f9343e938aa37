// Build script for rvinfo-isa.
//
// Two phases:
//   1. Load and validate `isa.yaml`: every opcode must name a known format,
//      and its flags must agree with that format (see the header of isa.yaml).
//   2. Emit `generated.rs` into OUT_DIR: the operand formats, the `Opcode`
//      constants and the static `OPCODE_TABLE` included by `src/table.rs`.

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Isa {
    formats: BTreeMap<String, Vec<OperandSpec>>,
    opcodes: Vec<OpcodeSpec>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Kind {
    Reg,
    Imm,
    Addr,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Role {
    Def,
    Use,
    Base,
    Offset,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Class {
    Gpr,
    Fpr,
    Vr,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Flag {
    AddImm,
    Load,
    Store,
    VectorPseudo,
    Rv64,
    Word,
    Float,
}

impl Flag {
    fn const_name(self) -> &'static str {
        match self {
            Flag::AddImm => "ADD_IMM",
            Flag::Load => "LOAD",
            Flag::Store => "STORE",
            Flag::VectorPseudo => "VECTOR_PSEUDO",
            Flag::Rv64 => "RV64",
            Flag::Word => "WORD",
            Flag::Float => "FLOAT",
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OperandSpec {
    kind: Kind,
    role: Role,
    #[serde(default)]
    class: Option<Class>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OpcodeSpec {
    name: String,
    mnemonic: String,
    format: String,
    #[serde(default)]
    flags: Vec<Flag>,
    #[serde(default)]
    width: Option<u32>,
}

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir = env::var("OUT_DIR").unwrap();
    let isa_yaml = format!("{manifest}/isa.yaml");

    println!("cargo:rerun-if-changed={isa_yaml}");
    println!("cargo:rerun-if-changed={manifest}/build.rs");

    // Phase 1: load and validate
    let text = fs::read_to_string(&isa_yaml)
        .unwrap_or_else(|e| panic!("failed to read {isa_yaml}: {e}"));
    let isa: Isa =
        serde_yaml::from_str(&text).unwrap_or_else(|e| panic!("invalid isa.yaml: {e}"));

    for (name, format) in &isa.formats {
        validate_format(name, format);
    }

    let mut names = BTreeSet::new();
    let mut mnemonics = BTreeSet::new();
    for op in &isa.opcodes {
        assert!(names.insert(op.name.as_str()), "duplicate opcode name {}", op.name);
        assert!(
            mnemonics.insert(op.mnemonic.as_str()),
            "duplicate mnemonic {}",
            op.mnemonic
        );
        validate_opcode(&isa, op);
    }
    assert!(
        isa.opcodes.len() <= u16::MAX as usize,
        "too many opcodes for a u16 raw value"
    );

    // Phase 2: emit
    let out_path = PathBuf::from(&out_dir).join("generated.rs");
    fs::write(&out_path, generate(&isa)).expect("failed to write generated.rs");
}

fn validate_format(name: &str, format: &[OperandSpec]) {
    for (i, op) in format.iter().enumerate() {
        match op.kind {
            Kind::Reg => assert!(
                op.class.is_some(),
                "format {name}: register operand {i} has no class"
            ),
            Kind::Imm | Kind::Addr => assert!(
                op.class.is_none(),
                "format {name}: operand {i} is not a register but has a class"
            ),
        }
        match op.role {
            Role::Base => assert_eq!(
                op.kind,
                Kind::Addr,
                "format {name}: base operand {i} must be an addr"
            ),
            Role::Offset => assert_eq!(
                op.kind,
                Kind::Imm,
                "format {name}: offset operand {i} must be an imm"
            ),
            Role::Def | Role::Use => assert_ne!(
                op.kind,
                Kind::Addr,
                "format {name}: addr operand {i} must be a base"
            ),
        }
    }
    let offsets = format.iter().filter(|op| op.role == Role::Offset).count();
    assert!(offsets <= 1, "format {name}: more than one offset operand");
}

fn validate_opcode(isa: &Isa, op: &OpcodeSpec) {
    let name = &op.name;
    let Some(format) = isa.formats.get(&op.format) else {
        panic!("{name}: unknown format '{}'", op.format);
    };
    let has = |flag: Flag| op.flags.contains(&flag);

    assert!(
        op.mnemonic
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'_'),
        "{name}: mnemonic '{}' contains unexpected characters",
        op.mnemonic
    );

    if has(Flag::AddImm) {
        let plain = matches!(
            format.as_slice(),
            [
                OperandSpec { kind: Kind::Reg, role: Role::Def, class: Some(Class::Gpr) },
                OperandSpec { kind: Kind::Reg, role: Role::Use, class: Some(Class::Gpr) },
                OperandSpec { kind: Kind::Imm, role: Role::Use, .. },
            ]
        );
        assert!(plain, "{name}: add_imm requires the [def gpr, use gpr, imm] shape");
        assert!(
            !has(Flag::Word),
            "{name}: word-narrowing adds must not be tagged add_imm"
        );
    }

    let bases = format.iter().filter(|o| o.role == Role::Base).count();
    if has(Flag::Load) || has(Flag::Store) {
        assert!(
            !(has(Flag::Load) && has(Flag::Store)),
            "{name}: tagged both load and store"
        );
        assert_eq!(bases, 1, "{name}: memory opcode needs exactly one base operand");
        if has(Flag::VectorPseudo) {
            assert!(op.width.is_none(), "{name}: vector pseudos have no fixed width");
        } else {
            assert!(
                matches!(op.width, Some(1 | 2 | 4 | 8)),
                "{name}: scalar memory opcode needs a width of 1, 2, 4 or 8"
            );
        }
    } else {
        assert_eq!(bases, 0, "{name}: base operand on a non-memory opcode");
        assert!(op.width.is_none(), "{name}: width on a non-memory opcode");
        assert!(
            !has(Flag::VectorPseudo),
            "{name}: vector pseudo must be a load or a store"
        );
    }
}

fn format_ident(name: &str) -> String {
    format!("FMT_{}", name.to_ascii_uppercase())
}

fn generate(isa: &Isa) -> String {
    let mut out = String::new();
    writeln!(out, "// @generated by rvinfo-isa/build.rs from isa.yaml. Do not edit.").unwrap();
    writeln!(out).unwrap();

    for (name, format) in &isa.formats {
        writeln!(
            out,
            "static {}: [OperandInfo; {}] = [",
            format_ident(name),
            format.len()
        )
        .unwrap();
        for op in format {
            let class = match op.class {
                Some(c) => format!("Some(RegClass::{c:?})"),
                None => "None".to_string(),
            };
            writeln!(
                out,
                "    OperandInfo {{ kind: OperandKind::{:?}, role: OperandRole::{:?}, class: {class} }},",
                op.kind, op.role
            )
            .unwrap();
        }
        writeln!(out, "];").unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "#[allow(non_upper_case_globals)]").unwrap();
    writeln!(out, "impl Opcode {{").unwrap();
    for (i, op) in isa.opcodes.iter().enumerate() {
        writeln!(out, "    pub const {}: Opcode = Opcode({i});", op.name).unwrap();
    }
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(
        out,
        "static OPCODE_TABLE: [OpcodeInfo; {}] = [",
        isa.opcodes.len()
    )
    .unwrap();
    for (i, op) in isa.opcodes.iter().enumerate() {
        let mut flags = String::from("OpcodeFlags::empty()");
        for flag in &op.flags {
            write!(flags, ".union(OpcodeFlags::{})", flag.const_name()).unwrap();
        }
        writeln!(out, "    OpcodeInfo {{").unwrap();
        writeln!(out, "        opcode: Opcode({i}),").unwrap();
        writeln!(out, "        name: {:?},", op.name).unwrap();
        writeln!(out, "        mnemonic: {:?},", op.mnemonic).unwrap();
        writeln!(out, "        format: {:?},", op.format).unwrap();
        writeln!(out, "        operands: &{},", format_ident(&op.format)).unwrap();
        writeln!(out, "        flags: {flags},").unwrap();
        writeln!(out, "        width: {},", op.width.unwrap_or(0)).unwrap();
        writeln!(out, "    }},").unwrap();
    }
    writeln!(out, "];").unwrap();

    out
}
