// Element kinds stored in vectors, their NA sentinels and the NA-preserving
// conversions used by coercion views.

use std::fmt;

/// Bit pattern of the double NA: a NaN carrying payload 1954.
pub const DOUBLE_NA_BITS: u64 = 0x7FF0_0000_0000_07A2;

/// Integer NA sentinel.
pub const INT_NA: i32 = i32::MIN;

/// A primitive element kind with a reserved NA value.
pub trait Element: Copy + fmt::Debug + 'static {
    /// Name used in diagnostics (`integer`, `double`, `logical`).
    const TYPE_NAME: &'static str;

    fn na() -> Self;

    fn is_na(self) -> bool;

    /// Fill value for uninitialized buffers.
    fn zero() -> Self;

    /// Bitwise identity, so that NA compares equal to NA.
    fn identical(self, other: Self) -> bool;

    /// Deparsed form of a single element.
    fn deparse(self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Element for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn na() -> Self {
        INT_NA
    }

    fn is_na(self) -> bool {
        self == INT_NA
    }

    fn zero() -> Self {
        0
    }

    fn identical(self, other: Self) -> bool {
        self == other
    }

    fn deparse(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_na() {
            f.write_str("NA")
        } else {
            write!(f, "{}L", self)
        }
    }
}

impl Element for f64 {
    const TYPE_NAME: &'static str = "double";

    fn na() -> Self {
        f64::from_bits(DOUBLE_NA_BITS)
    }

    // NaN counts as missing, same as is.na()
    fn is_na(self) -> bool {
        self.is_nan()
    }

    fn zero() -> Self {
        0.0
    }

    fn identical(self, other: Self) -> bool {
        self.to_bits() == other.to_bits() || (self == other)
    }

    fn deparse(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.to_bits() == DOUBLE_NA_BITS {
            f.write_str("NA")
        } else if self.is_nan() {
            f.write_str("NaN")
        } else if self.is_infinite() {
            f.write_str(if self > 0.0 { "Inf" } else { "-Inf" })
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Three-valued logical element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Logical {
    False,
    True,
    Na,
}

impl From<bool> for Logical {
    fn from(b: bool) -> Self {
        if b {
            Logical::True
        } else {
            Logical::False
        }
    }
}

impl Element for Logical {
    const TYPE_NAME: &'static str = "logical";

    fn na() -> Self {
        Logical::Na
    }

    fn is_na(self) -> bool {
        self == Logical::Na
    }

    fn zero() -> Self {
        Logical::False
    }

    fn identical(self, other: Self) -> bool {
        self == other
    }

    fn deparse(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Logical::False => "FALSE",
            Logical::True => "TRUE",
            Logical::Na => "NA",
        })
    }
}

/// NA-preserving conversion from another element kind.
pub trait CoerceFrom<S: Element>: Element {
    fn coerce_from(source: S) -> Self;
}

impl CoerceFrom<i32> for f64 {
    fn coerce_from(source: i32) -> Self {
        if source.is_na() {
            f64::na()
        } else {
            source as f64
        }
    }
}

impl CoerceFrom<i32> for Logical {
    fn coerce_from(source: i32) -> Self {
        if source.is_na() {
            Logical::Na
        } else {
            Logical::from(source != 0)
        }
    }
}

impl CoerceFrom<f64> for i32 {
    fn coerce_from(source: f64) -> Self {
        if source.is_nan() {
            return INT_NA;
        }
        let truncated = source.trunc();
        // INT_NA itself is not a representable integer
        if truncated > i32::MAX as f64 || truncated <= INT_NA as f64 {
            INT_NA
        } else {
            truncated as i32
        }
    }
}

impl CoerceFrom<f64> for Logical {
    fn coerce_from(source: f64) -> Self {
        if source.is_nan() {
            Logical::Na
        } else {
            Logical::from(source != 0.0)
        }
    }
}

impl CoerceFrom<Logical> for i32 {
    fn coerce_from(source: Logical) -> Self {
        match source {
            Logical::False => 0,
            Logical::True => 1,
            Logical::Na => INT_NA,
        }
    }
}

impl CoerceFrom<Logical> for f64 {
    fn coerce_from(source: Logical) -> Self {
        match source {
            Logical::False => 0.0,
            Logical::True => 1.0,
            Logical::Na => f64::na(),
        }
    }
}

/// Element kinds that can form arithmetic progressions.
pub trait Arith: Element {
    /// `from + i * step`
    fn offset(from: Self, step: Self, i: usize) -> Self;

    /// Number of elements of `from, from + step, ...` not passing `to`,
    /// or an explanation of why the progression is malformed.
    fn progression_len(from: Self, to: Self, step: Self) -> Result<usize, String>;
}

impl Arith for i32 {
    fn offset(from: Self, step: Self, i: usize) -> Self {
        (from as i64 + i as i64 * step as i64) as i32
    }

    fn progression_len(from: Self, to: Self, step: Self) -> Result<usize, String> {
        if from.is_na() || to.is_na() || step.is_na() {
            return Err("missing value in sequence bounds".to_string());
        }
        let span = to as i64 - from as i64;
        if step == 0 {
            return if span == 0 {
                Ok(1)
            } else {
                Err("invalid '(to - from)/by' in seq(.)".to_string())
            };
        }
        if span != 0 && span.signum() != (step as i64).signum() {
            return Err("wrong sign in 'by' argument".to_string());
        }
        Ok((span / step as i64) as usize + 1)
    }
}

impl Arith for f64 {
    fn offset(from: Self, step: Self, i: usize) -> Self {
        from + i as f64 * step
    }

    fn progression_len(from: Self, to: Self, step: Self) -> Result<usize, String> {
        if !from.is_finite() || !to.is_finite() || !step.is_finite() {
            return Err("'from', 'to' and 'by' must be finite numbers".to_string());
        }
        let span = to - from;
        if step == 0.0 {
            return if span == 0.0 {
                Ok(1)
            } else {
                Err("invalid '(to - from)/by' in seq(.)".to_string())
            };
        }
        let steps = span / step;
        if steps < 0.0 {
            return Err("wrong sign in 'by' argument".to_string());
        }
        if steps > i32::MAX as f64 {
            return Err("'by' argument is much too small".to_string());
        }
        Ok((steps + 1e-10).floor() as usize + 1)
    }
}
