//! Textual instruction syntax.
//!
//! One instruction per line, operands in table order, addresses written as
//! `offset(base)`:
//!
//! ```text
//! addi x1, x2, -128
//! lb   a0, -128(sp)
//! fsw  f3, 36(x3)
//! sw   x3, 4(%stack.2)       # frame slot base
//! pseudovle32_v_m1 v8, (x3)  # no offset slot
//! ```
//!
//! Memory opcodes get the descriptor implied by the table: the natural width
//! and direction, or a scalable [`VECTOR_BLOCK_BYTES`] access for vector
//! pseudos.

use std::str::FromStr;

use rvinfo_isa::{
    OpcodeInfo, OperandKind, OperandRole, ParseRegError, Reg, VECTOR_BLOCK_BYTES, lookup_mnemonic,
};

use crate::instruction::{Instruction, MemAccess, Operand};

/// Errors from [`parse_instruction`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty instruction")]
    Empty,

    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    #[error(transparent)]
    Reg(#[from] ParseRegError),

    #[error("invalid immediate '{0}'")]
    InvalidImmediate(String),

    #[error("invalid frame slot '{0}'")]
    InvalidFrameSlot(String),

    #[error("malformed address '{0}'")]
    MalformedAddress(String),

    #[error("{mnemonic}: expected {expected} operands, found {found}")]
    OperandCount {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Parse a single instruction. Anything after `#` is a comment.
pub fn parse_instruction(text: &str) -> Result<Instruction, ParseError> {
    let text = text.split('#').next().unwrap_or_default().trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let (mnemonic, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let info = lookup_mnemonic(mnemonic)
        .ok_or_else(|| ParseError::UnknownMnemonic(mnemonic.to_string()))?;

    let tokens: Vec<&str> = if rest.trim().is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };
    let expected = info
        .operands()
        .iter()
        .filter(|slot| slot.role() != OperandRole::Offset)
        .count();
    if tokens.len() != expected {
        return Err(ParseError::OperandCount {
            mnemonic: info.mnemonic(),
            expected,
            found: tokens.len(),
        });
    }

    let mut tokens = tokens.into_iter();
    let mut builder = Instruction::build(info.opcode());
    let mut pending_offset = None;
    for slot in info.operands() {
        match (slot.kind(), slot.role()) {
            (OperandKind::Imm, OperandRole::Offset) => {
                builder = builder.imm(pending_offset.take().unwrap_or(0));
            }
            (kind, _) => {
                // Count was checked above.
                let Some(token) = tokens.next() else {
                    return Err(ParseError::Empty);
                };
                match kind {
                    OperandKind::Reg => builder = builder.reg(token.parse()?),
                    OperandKind::Imm => builder = builder.imm(parse_imm(token)?),
                    OperandKind::Addr => {
                        let (offset, base) = parse_address(token)?;
                        if offset.is_some() && info.offset_index().is_none() {
                            return Err(ParseError::MalformedAddress(token.to_string()));
                        }
                        pending_offset = offset;
                        builder = builder.operand(base);
                    }
                }
            }
        }
    }

    if let Some(access) = implied_access(info) {
        builder = builder.mem(access);
    }
    Ok(builder.finish())
}

impl FromStr for Instruction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_instruction(s)
    }
}

/// Descriptor the table implies for a memory opcode.
fn implied_access(info: &OpcodeInfo) -> Option<MemAccess> {
    if !info.is_memory() {
        return None;
    }
    let width = if info.is_vector_pseudo() {
        VECTOR_BLOCK_BYTES
    } else {
        info.access_width()?
    };
    let access = if info.may_load() {
        MemAccess::load(width)
    } else {
        MemAccess::store(width)
    };
    Some(if info.is_vector_pseudo() {
        access.scalable()
    } else {
        access
    })
}

fn parse_imm(token: &str) -> Result<i64, ParseError> {
    let err = || ParseError::InvalidImmediate(token.to_string());
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let (radix, body) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    // from_str_radix would accept a second sign; only digits may follow.
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return Err(err());
    }
    let magnitude = i128::from_str_radix(body, radix).map_err(|_| err())?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| err())
}

/// `offset(base)` or `(base)`; the base is a register or `%stack.N`.
fn parse_address(token: &str) -> Result<(Option<i64>, Operand), ParseError> {
    let malformed = || ParseError::MalformedAddress(token.to_string());
    let (offset, rest) = token.split_once('(').ok_or_else(malformed)?;
    let base = rest.strip_suffix(')').ok_or_else(malformed)?.trim();
    let offset = offset.trim();

    let offset = if offset.is_empty() {
        None
    } else {
        Some(parse_imm(offset)?)
    };
    let base = match base.strip_prefix("%stack.") {
        Some(index) => Operand::FrameSlot(
            index
                .parse()
                .map_err(|_| ParseError::InvalidFrameSlot(base.to_string()))?,
        ),
        None => Operand::Reg(base.parse::<Reg>()?),
    };
    Ok((offset, base))
}
