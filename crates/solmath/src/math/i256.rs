// SPDX-License-Identifier: MIT

use core::cmp::Ordering;
use core::fmt;

use primitive_types::U256;

use crate::error::{require, MathError, Result};

/**
 * @dev A 256-bit signed integer using U256 as underlying storage.
 * Uses two's complement representation, same as Solidity's int256.
 *
 * Range: -2^255 to 2^255 - 1
 *
 * Only checked arithmetic is exposed: every operation that would leave the range
 * returns an error instead of wrapping.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I256 {
    value: U256,
}

const SIGN_BIT: U256 = U256([0, 0, 0, 0x8000000000000000]);

impl I256 {
    pub const ZERO: I256 = I256::from_i128(0);

    pub const ONE: I256 = I256::from_i128(1);

    /// Minimum value: -2^255
    pub const MIN: I256 = I256 { value: SIGN_BIT };

    /// Maximum value: 2^255 - 1
    pub const MAX: I256 = I256 {
        value: U256([0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF, 0x7FFFFFFFFFFFFFFF]),
    };

    /**
     * @dev Sign-extends an i128 into 256 bits. Usable in const context, which is how the
     * log/exp constant table is built.
     */
    pub const fn from_i128(value: i128) -> Self {
        let bits = value as u128;
        let fill = if value < 0 { u64::MAX } else { 0 };
        I256 {
            value: U256([bits as u64, (bits >> 64) as u64, fill, fill]),
        }
    }

    /// Wraps a raw two's complement word.
    pub const fn from_raw(value: U256) -> Self {
        I256 { value }
    }

    /// The raw two's complement word.
    pub fn as_raw(&self) -> U256 {
        self.value
    }

    pub fn is_negative(&self) -> bool {
        self.value >= SIGN_BIT
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /**
     * @dev Absolute value as an unsigned word. Total: |MIN| = 2^255 fits in U256.
     */
    pub fn unsigned_abs(&self) -> U256 {
        if self.is_negative() {
            // A negative word is at least 2^255, so its inverse is below 2^255 and the increment cannot carry out.
            (!self.value) + U256::one()
        } else {
            self.value
        }
    }

    /**
     * @dev Rebuilds a signed value from a sign and a magnitude, failing with `err` if the magnitude does not fit.
     */
    fn from_sign_and_abs(negative: bool, abs: U256, err: MathError) -> Result<Self> {
        if abs.is_zero() {
            return Ok(Self::ZERO);
        }
        if negative {
            require!(abs <= SIGN_BIT, err);
            Ok(I256 { value: (!abs) + U256::one() })
        } else {
            require!(abs < SIGN_BIT, err);
            Ok(I256 { value: abs })
        }
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        let (sum, _) = self.value.overflowing_add(other.value);
        let result = I256 { value: sum };
        // Two's complement addition only overflows when both operands share a sign the result does not.
        let self_neg = self.is_negative();
        require!(
            self_neg != other.is_negative() || result.is_negative() == self_neg,
            MathError::AddOverflow
        );
        Ok(result)
    }

    pub fn checked_sub(self, other: Self) -> Result<Self> {
        let (difference, _) = self.value.overflowing_sub(other.value);
        let result = I256 { value: difference };
        let self_neg = self.is_negative();
        require!(
            self_neg == other.is_negative() || result.is_negative() == self_neg,
            MathError::SubOverflow
        );
        Ok(result)
    }

    pub fn checked_mul(self, other: Self) -> Result<Self> {
        let abs_product = self
            .unsigned_abs()
            .checked_mul(other.unsigned_abs())
            .ok_or(MathError::MulOverflow)?;
        Self::from_sign_and_abs(self.is_negative() != other.is_negative(), abs_product, MathError::MulOverflow)
    }

    /**
     * @dev Division truncating toward zero, like Solidity's sdiv.
     */
    pub fn checked_div(self, other: Self) -> Result<Self> {
        require!(!other.is_zero(), MathError::ZeroDivision);
        let quotient = self.unsigned_abs() / other.unsigned_abs();
        // Only MIN / -1 can land outside the range.
        Self::from_sign_and_abs(self.is_negative() != other.is_negative(), quotient, MathError::DivInternal)
    }

    /**
     * @dev Remainder with the sign of the dividend, like Solidity's smod.
     */
    pub fn checked_rem(self, other: Self) -> Result<Self> {
        require!(!other.is_zero(), MathError::ZeroDivision);
        let remainder = self.unsigned_abs() % other.unsigned_abs();
        Self::from_sign_and_abs(self.is_negative(), remainder, MathError::DivInternal)
    }

    pub fn checked_neg(self) -> Result<Self> {
        Self::ZERO.checked_sub(self)
    }

    /**
     * @dev Converts to U256, only for non-negative values.
     */
    pub fn to_u256(&self) -> Result<U256> {
        require!(!self.is_negative(), MathError::OutOfBounds);
        Ok(self.value)
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl From<u64> for I256 {
    fn from(value: u64) -> Self {
        I256 { value: U256::from(value) }
    }
}

/**
 * @dev From U256 (only works for values <= 2^255 - 1)
 */
impl TryFrom<U256> for I256 {
    type Error = MathError;

    fn try_from(value: U256) -> Result<Self> {
        require!(value < SIGN_BIT, MathError::OutOfBounds);
        Ok(I256 { value })
    }
}

impl TryFrom<I256> for U256 {
    type Error = MathError;

    fn try_from(value: I256) -> Result<Self> {
        value.to_u256()
    }
}

impl TryFrom<I256> for i128 {
    type Error = MathError;

    fn try_from(value: I256) -> Result<Self> {
        let U256([low, high, upper_low, upper_high]) = value.value;
        let fill = if value.is_negative() { u64::MAX } else { 0 };
        // Fits when the top 129 bits are all copies of the sign.
        require!(
            upper_low == fill && upper_high == fill && (high >> 63 == fill >> 63),
            MathError::OutOfBounds
        );
        Ok((((high as u128) << 64) | low as u128) as i128)
    }
}

impl PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for I256 {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // Same sign: two's complement words order like the values they encode.
            _ => self.value.cmp(&other.value),
        }
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.unsigned_abs())
        } else {
            write!(f, "{}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i128) -> I256 {
        I256::from(value)
    }

    #[test]
    fn test_add_positive() {
        let a = I256::try_from(U256::from(100u64)).unwrap();
        let b = I256::try_from(U256::from(200u64)).unwrap();
        assert_eq!(a.checked_add(b).unwrap().as_raw(), U256::from(300u64));
    }

    #[test]
    fn test_add_negative() {
        let result = int(-100).checked_add(int(-200)).unwrap();
        assert!(result.is_negative());
        assert_eq!(result, int(-300));
    }

    #[test]
    fn test_add_mixed() {
        assert_eq!(int(100).checked_add(int(-50)).unwrap(), int(50));
        assert_eq!(int(-100).checked_add(int(50)).unwrap(), int(-50));
    }

    #[test]
    fn test_add_overflow() {
        assert_eq!(I256::MAX.checked_add(I256::ONE), Err(MathError::AddOverflow));
        assert_eq!(I256::MIN.checked_add(int(-1)), Err(MathError::AddOverflow));
        assert_eq!(I256::MIN.checked_add(I256::MAX).unwrap(), int(-1));
    }

    #[test]
    fn test_sub() {
        assert_eq!(int(200).checked_sub(int(100)).unwrap(), int(100));
        assert_eq!(int(-100).checked_sub(int(-200)).unwrap(), int(100));
        assert_eq!(int(100).checked_sub(int(-50)).unwrap(), int(150));
        assert_eq!(int(0).checked_sub(int(7)).unwrap(), int(-7));
    }

    #[test]
    fn test_sub_overflow() {
        assert_eq!(I256::MIN.checked_sub(I256::ONE), Err(MathError::SubOverflow));
        assert_eq!(I256::MAX.checked_sub(int(-1)), Err(MathError::SubOverflow));
    }

    #[test]
    fn test_mul() {
        assert_eq!(int(10).checked_mul(int(20)).unwrap(), int(200));
        assert_eq!(int(-10).checked_mul(int(-20)).unwrap(), int(200));
        let mixed = int(10).checked_mul(int(-20)).unwrap();
        assert!(mixed.is_negative());
        assert_eq!(mixed.unsigned_abs(), U256::from(200u64));
        assert_eq!(int(-10).checked_mul(I256::ZERO).unwrap(), I256::ZERO);
    }

    #[test]
    fn test_mul_overflow() {
        assert_eq!(I256::MAX.checked_mul(int(2)), Err(MathError::MulOverflow));
        // -2^254 * 2 = MIN is still representable, 2^254 * 2 is not.
        let half = I256::from_raw(U256::one() << 254);
        assert_eq!(half.checked_mul(int(-2)).unwrap(), I256::MIN);
        assert_eq!(half.checked_mul(int(2)), Err(MathError::MulOverflow));
    }

    #[test]
    fn test_div_truncates_toward_zero() {
        assert_eq!(int(200).checked_div(int(10)).unwrap(), int(20));
        assert_eq!(int(-200).checked_div(int(-10)).unwrap(), int(20));
        assert_eq!(int(7).checked_div(int(-2)).unwrap(), int(-3));
        assert_eq!(int(-7).checked_div(int(2)).unwrap(), int(-3));
    }

    #[test]
    fn test_div_errors() {
        assert_eq!(int(100).checked_div(I256::ZERO), Err(MathError::ZeroDivision));
        assert_eq!(I256::MIN.checked_div(int(-1)), Err(MathError::DivInternal));
    }

    #[test]
    fn test_rem_takes_dividend_sign() {
        assert_eq!(int(17).checked_rem(int(5)).unwrap(), int(2));
        assert_eq!(int(-17).checked_rem(int(5)).unwrap(), int(-2));
        assert_eq!(int(17).checked_rem(int(-5)).unwrap(), int(2));
        assert_eq!(int(17).checked_rem(I256::ZERO), Err(MathError::ZeroDivision));
    }

    #[test]
    fn test_neg() {
        assert_eq!(int(100).checked_neg().unwrap(), int(-100));
        assert_eq!(int(-100).checked_neg().unwrap(), int(100));
        assert_eq!(I256::MIN.checked_neg(), Err(MathError::SubOverflow));
        assert_eq!(I256::MAX.checked_neg().unwrap().checked_sub(I256::ONE).unwrap(), I256::MIN);
    }

    #[test]
    fn test_from_i128_sign_extends() {
        assert_eq!(int(-1).as_raw(), U256::MAX);
        assert_eq!(int(i128::MAX).as_raw(), U256::from(i128::MAX as u128));
        assert_eq!(i128::try_from(int(i128::MIN)).unwrap(), i128::MIN);
        assert_eq!(i128::try_from(int(-41_000_000_000_000_000_000)).unwrap(), -41_000_000_000_000_000_000);
    }

    #[test]
    fn test_i128_out_of_range() {
        let too_big = I256::try_from(U256::from(i128::MAX as u128) + U256::one()).unwrap();
        assert_eq!(i128::try_from(too_big), Err(MathError::OutOfBounds));
        let too_small = int(i128::MIN).checked_sub(I256::ONE).unwrap();
        assert_eq!(i128::try_from(too_small), Err(MathError::OutOfBounds));
    }

    #[test]
    fn test_u256_conversions() {
        assert_eq!(I256::try_from(SIGN_BIT), Err(MathError::OutOfBounds));
        assert_eq!(I256::try_from(SIGN_BIT - U256::one()).unwrap(), I256::MAX);
        assert_eq!(U256::try_from(int(42)).unwrap(), U256::from(42u64));
        assert_eq!(int(-42).to_u256(), Err(MathError::OutOfBounds));
    }

    #[test]
    fn test_abs() {
        assert_eq!(int(-5).unsigned_abs(), U256::from(5u64));
        assert_eq!(I256::MIN.unsigned_abs(), SIGN_BIT);
    }

    #[test]
    fn test_comparison() {
        assert!(int(-1) < I256::ZERO);
        assert!(int(-2) < int(-1));
        assert!(I256::MIN < int(-1));
        assert!(int(3) > int(2));
        assert!(I256::MAX > int(i128::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(int(-1234).to_string(), "-1234");
        assert_eq!(int(99).to_string(), "99");
        assert_eq!(
            I256::MIN.to_string(),
            "-57896044618658097711785492504343953926634992332820282019728792003956564819968"
        );
    }
}
