use std::fmt;
use std::str::FromStr;

/// Register classes of the RISC-V register file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegClass {
    /// Integer registers `x0`-`x31`.
    Gpr,
    /// Floating-point registers `f0`-`f31`.
    Fpr,
    /// Vector registers `v0`-`v31`.
    Vr,
}

impl RegClass {
    const fn base(self) -> u16 {
        match self {
            RegClass::Gpr => 0,
            RegClass::Fpr => REGS_PER_CLASS,
            RegClass::Vr => 2 * REGS_PER_CLASS,
        }
    }

    const fn prefix(self) -> char {
        match self {
            RegClass::Gpr => 'x',
            RegClass::Fpr => 'f',
            RegClass::Vr => 'v',
        }
    }
}

/// Number of architectural registers in each class.
pub const REGS_PER_CLASS: u16 = 32;

/// A physical register, numbered across classes: GPRs first, then FPRs, then
/// vector registers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reg(u16);

impl Reg {
    /// Total number of registers.
    pub const COUNT: u16 = 3 * REGS_PER_CLASS;

    /// Register `n` of class `class`.
    ///
    /// Panics if `n` is not below [`REGS_PER_CLASS`].
    pub const fn new(class: RegClass, n: u16) -> Reg {
        assert!(n < REGS_PER_CLASS, "register index out of range");
        Reg(class.base() + n)
    }

    pub const fn gpr(n: u16) -> Reg {
        Reg::new(RegClass::Gpr, n)
    }

    pub const fn fpr(n: u16) -> Reg {
        Reg::new(RegClass::Fpr, n)
    }

    pub const fn vr(n: u16) -> Reg {
        Reg::new(RegClass::Vr, n)
    }

    /// Inverse of [`Reg::raw`]; `None` outside the register file.
    pub const fn from_raw(raw: u16) -> Option<Reg> {
        if raw < Reg::COUNT { Some(Reg(raw)) } else { None }
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn class(self) -> RegClass {
        match self.0 / REGS_PER_CLASS {
            0 => RegClass::Gpr,
            1 => RegClass::Fpr,
            _ => RegClass::Vr,
        }
    }

    /// Index within the register's class.
    #[inline]
    pub const fn index(self) -> u16 {
        self.0 % REGS_PER_CLASS
    }

    /// ABI name (`sp`, `a0`, `fa0`, ...); vector registers have none.
    pub fn abi_name(self) -> Option<&'static str> {
        match self.class() {
            RegClass::Gpr => Some(GPR_ABI_NAMES[self.index() as usize]),
            RegClass::Fpr => Some(FPR_ABI_NAMES[self.index() as usize]),
            RegClass::Vr => None,
        }
    }
}

macro_rules! define_regs {
    ($ctor:ident: $($name:ident = $n:literal),* $(,)?) => {
        impl Reg {
            $(pub const $name: Reg = Reg::$ctor($n);)*
        }
    };
}

define_regs!(gpr:
    X0 = 0, X1 = 1, X2 = 2, X3 = 3, X4 = 4, X5 = 5, X6 = 6, X7 = 7,
    X8 = 8, X9 = 9, X10 = 10, X11 = 11, X12 = 12, X13 = 13, X14 = 14, X15 = 15,
    X16 = 16, X17 = 17, X18 = 18, X19 = 19, X20 = 20, X21 = 21, X22 = 22, X23 = 23,
    X24 = 24, X25 = 25, X26 = 26, X27 = 27, X28 = 28, X29 = 29, X30 = 30, X31 = 31,
);

define_regs!(fpr:
    F0 = 0, F1 = 1, F2 = 2, F3 = 3, F4 = 4, F5 = 5, F6 = 6, F7 = 7,
    F8 = 8, F9 = 9, F10 = 10, F11 = 11, F12 = 12, F13 = 13, F14 = 14, F15 = 15,
    F16 = 16, F17 = 17, F18 = 18, F19 = 19, F20 = 20, F21 = 21, F22 = 22, F23 = 23,
    F24 = 24, F25 = 25, F26 = 26, F27 = 27, F28 = 28, F29 = 29, F30 = 30, F31 = 31,
);

define_regs!(vr:
    V0 = 0, V1 = 1, V2 = 2, V3 = 3, V4 = 4, V5 = 5, V6 = 6, V7 = 7,
    V8 = 8, V9 = 9, V10 = 10, V11 = 11, V12 = 12, V13 = 13, V14 = 14, V15 = 15,
    V16 = 16, V17 = 17, V18 = 18, V19 = 19, V20 = 20, V21 = 21, V22 = 22, V23 = 23,
    V24 = 24, V25 = 25, V26 = 26, V27 = 27, V28 = 28, V29 = 29, V30 = 30, V31 = 31,
);

const GPR_ABI_NAMES: [&str; REGS_PER_CLASS as usize] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

const FPR_ABI_NAMES: [&str; REGS_PER_CLASS as usize] = [
    "ft0", "ft1", "ft2", "ft3", "ft4", "ft5", "ft6", "ft7", "fs0", "fs1", "fa0", "fa1", "fa2",
    "fa3", "fa4", "fa5", "fa6", "fa7", "fs2", "fs3", "fs4", "fs5", "fs6", "fs7", "fs8", "fs9",
    "fs10", "fs11", "ft8", "ft9", "ft10", "ft11",
];

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class().prefix(), self.index())
    }
}

impl fmt::Debug for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reg({self})")
    }
}

/// Error from parsing a register name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown register name '{0}'")]
pub struct ParseRegError(pub String);

impl FromStr for Reg {
    type Err = ParseRegError;

    /// Accepts architectural names (`x5`, `f3`, `v8`) and ABI names
    /// (`t0`, `fp`, `fa0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let err = || ParseRegError(s.to_string());

        if name == "fp" {
            return Ok(Reg::X8);
        }
        if let Some(i) = GPR_ABI_NAMES.iter().position(|&n| n == name) {
            return Ok(Reg::gpr(i as u16));
        }
        if let Some(i) = FPR_ABI_NAMES.iter().position(|&n| n == name) {
            return Ok(Reg::fpr(i as u16));
        }

        let mut chars = name.chars();
        let class = match chars.next() {
            Some('x') => RegClass::Gpr,
            Some('f') => RegClass::Fpr,
            Some('v') => RegClass::Vr,
            _ => return Err(err()),
        };
        let digits = chars.as_str();
        // Reject leading zeros and signs so the parse round-trips with Display.
        if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
            return Err(err());
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        match digits.parse::<u16>() {
            Ok(n) if n < REGS_PER_CLASS => Ok(Reg::new(class, n)),
            _ => Err(err()),
        }
    }
}
