//! Canonical hash codes.
//!
//! Every scalar hashes to the 32-bit code a JVM-hosted schema layer would
//! compute for the same boxed value, sign-extended to `i64`. Hashes therefore
//! agree across runtimes that share a column.

use rust_decimal::Decimal;

/// Canonical quiet-NaN bit pattern for `f32`.
pub const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;

/// Canonical quiet-NaN bit pattern for `f64`.
pub const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

///
/// HashCode
///

pub trait HashCode {
    fn hash_code(&self) -> i64;
}

impl HashCode for bool {
    fn hash_code(&self) -> i64 {
        if *self { 1231 } else { 1237 }
    }
}

impl HashCode for i8 {
    fn hash_code(&self) -> i64 {
        i64::from(*self)
    }
}

impl HashCode for i16 {
    fn hash_code(&self) -> i64 {
        i64::from(*self)
    }
}

impl HashCode for i32 {
    fn hash_code(&self) -> i64 {
        i64::from(*self)
    }
}

impl HashCode for char {
    fn hash_code(&self) -> i64 {
        i64::from(u32::from(*self))
    }
}

impl HashCode for i64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn hash_code(&self) -> i64 {
        i64::from(fold_u64(*self as u64))
    }
}

impl HashCode for f32 {
    #[allow(clippy::cast_possible_wrap)]
    fn hash_code(&self) -> i64 {
        i64::from(f32_bits(*self) as i32)
    }
}

impl HashCode for f64 {
    fn hash_code(&self) -> i64 {
        i64::from(fold_u64(f64_bits(*self)))
    }
}

impl HashCode for str {
    fn hash_code(&self) -> i64 {
        let hash = self.encode_utf16().fold(0_i32, |acc, unit| {
            acc.wrapping_mul(31).wrapping_add(i32::from(unit))
        });

        i64::from(hash)
    }
}

impl HashCode for String {
    fn hash_code(&self) -> i64 {
        self.as_str().hash_code()
    }
}

impl HashCode for Decimal {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    fn hash_code(&self) -> i64 {
        let normalized = self.normalize();
        let mantissa = normalized.mantissa() as u128;

        // xor the four 32-bit words of the two's-complement mantissa
        let words = (mantissa as u32)
            ^ ((mantissa >> 32) as u32)
            ^ ((mantissa >> 64) as u32)
            ^ ((mantissa >> 96) as u32);
        let scale = normalized.scale() as i32;

        i64::from((words as i32).wrapping_mul(31).wrapping_add(scale))
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    fn hash_code(&self) -> i64 {
        (**self).hash_code()
    }
}

/// Raw `f32` bits with every NaN collapsed to the canonical quiet NaN.
#[must_use]
pub fn f32_bits(value: f32) -> u32 {
    if value.is_nan() {
        CANONICAL_NAN_F32
    } else {
        value.to_bits()
    }
}

/// Raw `f64` bits with every NaN collapsed to the canonical quiet NaN.
#[must_use]
pub fn f64_bits(value: f64) -> u64 {
    if value.is_nan() {
        CANONICAL_NAN_F64
    } else {
        value.to_bits()
    }
}

// High word xor low word, reinterpreted as a signed 32-bit code.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn fold_u64(bits: u64) -> i32 {
    (bits ^ (bits >> 32)) as u32 as i32
}
