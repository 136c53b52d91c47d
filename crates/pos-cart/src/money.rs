//! Fixed-point money type.
//!
//! All money amounts in the engine use a 1e-2 (satang) fixed-point
//! representation stored as `i64`. Using raw `i64` for money is
//! error-prone: it allows accidental arithmetic with unrelated integers
//! (quantities, item ids) without any compile-time signal.
//!
//! `Satang` wraps the raw `i64` so the type system prevents:
//! - Implicit construction from raw `i64` (no `From<i64>` impl).
//! - Mixing `Satang` with unrelated `i64` values in arithmetic.
//!
//! Catalog documents carry decimal baht as floats; [`Satang::from_baht_f64`]
//! converts once at that boundary with half-away-from-zero rounding, after
//! which every sum and product is exact. Displayed totals therefore never
//! accumulate float drift across line items.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Satang per baht.
pub const SATANG_SCALE: i64 = 100;

/// A fixed-point monetary amount at 1e-2 scale (satang).
///
/// 1 baht = `Satang(100)`.
///
/// # Construction
///
/// Use [`Satang::new`] for explicit construction from a raw satang count,
/// or [`Satang::from_baht_f64`] at the catalog/wire float boundary. There
/// is intentionally no `From<i64>` implementation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Satang(i64);

impl Satang {
    /// Zero monetary amount.
    pub const ZERO: Satang = Satang(0);

    /// Maximum representable value.
    pub const MAX: Satang = Satang(i64::MAX);

    /// Minimum representable value.
    pub const MIN: Satang = Satang(i64::MIN);

    /// Construct a `Satang` from a raw `i64` satang count.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Satang(raw)
    }

    /// Extract the underlying raw `i64`.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Convert a decimal-baht float to satang, rounding half away from
    /// zero. Non-finite inputs read as zero, matching the catalog
    /// leniency policy (JSON itself cannot carry them).
    pub fn from_baht_f64(baht: f64) -> Satang {
        if !baht.is_finite() {
            return Satang::ZERO;
        }
        Satang((baht * SATANG_SCALE as f64).round() as i64)
    }

    /// Convert back to decimal baht for wire payloads and display math.
    /// Exact for any realistic menu amount (|satang| < 2^52).
    pub fn to_baht_f64(self) -> f64 {
        self.0 as f64 / SATANG_SCALE as f64
    }

    /// Saturating addition — clamps at [`Satang::MAX`] on overflow.
    #[inline]
    pub fn saturating_add(self, rhs: Satang) -> Satang {
        Satang(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction — clamps at [`Satang::MIN`] on underflow.
    #[inline]
    pub fn saturating_sub(self, rhs: Satang) -> Satang {
        Satang(self.0.saturating_sub(rhs.0))
    }

    /// Multiply a per-unit price by a line quantity with overflow
    /// detection. Returns `None` on overflow; callers must handle this
    /// explicitly.
    #[inline]
    pub fn checked_mul_qty(self, qty: u32) -> Option<Satang> {
        self.0.checked_mul(i64::from(qty)).map(Satang)
    }

    /// Multiply a per-unit price by a line quantity, clamping at the
    /// `i64` extremes instead of failing.
    #[inline]
    pub fn saturating_mul_qty(self, qty: u32) -> Satang {
        Satang(self.0.saturating_mul(i64::from(qty)))
    }

    /// `true` if this amount is non-negative.
    #[inline]
    pub fn is_non_negative(self) -> bool {
        self.0 >= 0
    }
}

impl Add for Satang {
    type Output = Satang;
    #[inline]
    fn add(self, rhs: Satang) -> Satang {
        Satang(self.0 + rhs.0)
    }
}

impl AddAssign for Satang {
    #[inline]
    fn add_assign(&mut self, rhs: Satang) {
        self.0 += rhs.0;
    }
}

impl Sub for Satang {
    type Output = Satang;
    #[inline]
    fn sub(self, rhs: Satang) -> Satang {
        Satang(self.0 - rhs.0)
    }
}

impl SubAssign for Satang {
    #[inline]
    fn sub_assign(&mut self, rhs: Satang) {
        self.0 -= rhs.0;
    }
}

impl Neg for Satang {
    type Output = Satang;
    #[inline]
    fn neg(self) -> Satang {
        Satang(-self.0)
    }
}

impl fmt::Display for Satang {
    /// Formats as decimal baht with two places: `45.00`, `-0.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:02}",
            abs / SATANG_SCALE as u64,
            abs % SATANG_SCALE as u64
        )
    }
}
