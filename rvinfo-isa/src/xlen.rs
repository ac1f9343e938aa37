use std::fmt;
use std::str::FromStr;

/// Native integer register width of a subtarget.
///
/// ```
/// use rvinfo_isa::Xlen;
///
/// let xlen: Xlen = "riscv64".parse()?;
/// assert_eq!(xlen.bits(), 64);
/// assert_eq!(xlen.to_string(), "rv64");
/// # Ok::<(), rvinfo_isa::ParseXlenError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Xlen {
    Rv32,
    Rv64,
}

impl Xlen {
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Xlen::Rv32 => 32,
            Xlen::Rv64 => 64,
        }
    }

    /// Register width in bytes.
    #[inline]
    pub const fn bytes(self) -> u32 {
        self.bits() / 8
    }
}

impl fmt::Display for Xlen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rv{}", self.bits())
    }
}

/// Error from parsing an [`Xlen`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown register width '{0}' (expected 32, 64, rv32, rv64, riscv32 or riscv64)")]
pub struct ParseXlenError(pub String);

impl FromStr for Xlen {
    type Err = ParseXlenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "32" | "rv32" | "riscv32" => Ok(Xlen::Rv32),
            "64" | "rv64" | "riscv64" => Ok(Xlen::Rv64),
            _ => Err(ParseXlenError(s.to_string())),
        }
    }
}
