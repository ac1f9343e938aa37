use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use rvinfo_analysis::{InstrInfo, RiscvRegisterInfo, Subtarget};
use rvinfo_ir::{Instruction, Operand, ParseError, parse_instruction};
use rvinfo_isa::{Reg, Xlen, opcode_table};

#[derive(Parser)]
#[command(name = "rvinfo", about = "RISC-V instruction-info queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the instruction descriptor table
    Table {
        /// Subtarget register width (32, 64, rv32, rv64)
        #[arg(long, default_value = "rv64")]
        xlen: Xlen,
    },
    /// Run the instruction-info queries on textual instructions
    Query {
        /// Subtarget register width (32, 64, rv32, rv64)
        #[arg(long, default_value = "rv64")]
        xlen: Xlen,
        /// Destination register for the add-immediate query
        /// (default: the instruction's own destination)
        #[arg(long)]
        reg: Option<Reg>,
        /// Read one instruction per line from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Instructions, e.g. "lb x1, -128(x2)"
        insns: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Table { xlen } => cmd_table(xlen),
        Commands::Query {
            xlen,
            reg,
            file,
            insns,
        } => cmd_query(xlen, reg, file.as_deref(), &insns),
    }
}

fn cmd_table(xlen: Xlen) {
    println!("# Instruction descriptor table ({xlen})");
    println!(
        "{:<6} {:<18} {:<12} {:>5}  flags",
        "raw", "mnemonic", "format", "width"
    );
    for info in opcode_table().filter(|info| info.is_available(xlen)) {
        let width = info
            .access_width()
            .map_or_else(|| "-".to_string(), |w| w.to_string());
        let flags: Vec<&str> = info.flags().iter_names().map(|(name, _)| name).collect();
        println!(
            "{:<6} {:<18} {:<12} {:>5}  {}",
            info.opcode().raw(),
            info.mnemonic(),
            info.format(),
            width,
            flags.join("|")
        );
    }
}

fn cmd_query(xlen: Xlen, reg: Option<Reg>, file: Option<&Path>, insns: &[String]) {
    let mut lines: Vec<String> = Vec::new();
    if let Some(path) = file {
        match fs::read_to_string(path) {
            Ok(text) => lines.extend(text.lines().map(str::to_string)),
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }
    lines.extend(insns.iter().cloned());

    let subtarget = Subtarget::new(xlen);
    let tii = InstrInfo::new(subtarget);
    let tri = subtarget.register_info();

    let mut failed = false;
    for (lineno, line) in lines.iter().enumerate() {
        let mi = match parse_instruction(line) {
            Ok(mi) => mi,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                eprintln!("# Error on line {}: {e}", lineno + 1);
                failed = true;
                continue;
            }
        };
        if let Err(e) = mi.verify(xlen) {
            log::warn!("{mi}: {e}");
        }
        report(&tii, &tri, &mi, reg);
    }

    if failed {
        std::process::exit(1);
    }
}

fn report(tii: &InstrInfo, tri: &RiscvRegisterInfo, mi: &Instruction, reg: Option<Reg>) {
    println!("{mi}");

    let dest = reg.or_else(|| {
        let index = mi.info()?.def_index()?;
        mi.operand(index).and_then(Operand::reg)
    });
    match dest.and_then(|dest| tii.is_add_immediate(mi, dest).map(|r| (dest, r))) {
        Some((dest, r)) => println!("    add-immediate:  {dest} = {} + {}", r.reg, r.imm),
        None => println!("    add-immediate:  -"),
    }

    match tii.get_mem_operands_with_offset_width(mi, tri) {
        Some(ops) => {
            let bases: Vec<String> = ops.base_ops.iter().map(|op| op.to_string()).collect();
            println!(
                "    mem-operands:   base=[{}] offset={} scalable={} width={}",
                bases.join(", "),
                ops.offset,
                ops.offset_is_scalable,
                ops.width
            );
        }
        None => println!("    mem-operands:   -"),
    }

    if let Some(copy) = tii.is_copy_instr(mi) {
        println!("    copy:           {} <- {}", copy.dest, copy.source);
    }
    if let Some(slot) = tii.is_load_from_stack_slot(mi) {
        println!(
            "    reload:         {} <- %stack.{} ({} bytes)",
            slot.reg, slot.slot, slot.width
        );
    }
    if let Some(slot) = tii.is_store_to_stack_slot(mi) {
        println!(
            "    spill:          {} -> %stack.{} ({} bytes)",
            slot.reg, slot.slot, slot.width
        );
    }
}
