// SPDX-License-Identifier: MIT

use primitive_types::U256;

use crate::error::{require, MathError, Result};

/**
 * @dev Wrappers over Solidity's uint256 arithmetic with added overflow checks.
 * Adapted from OpenZeppelin's SafeMath library.
 */
pub struct Math;

impl Math {
    /**
     * @dev Returns the addition of two unsigned integers of 256 bits, reverting on overflow.
     */
    pub fn add(a: U256, b: U256) -> Result<U256> {
        a.checked_add(b).ok_or(MathError::AddOverflow)
    }

    /**
     * @dev Returns the subtraction of two unsigned integers of 256 bits, reverting on overflow.
     */
    pub fn sub(a: U256, b: U256) -> Result<U256> {
        require!(b <= a, MathError::SubOverflow);
        Ok(a - b)
    }

    /**
     * @dev Returns the largest of two numbers of 256 bits.
     */
    pub fn max(a: U256, b: U256) -> U256 {
        // Equivalent to:
        // result = (a < b) ? b : a;
        if a < b {
            b
        } else {
            a
        }
    }

    /**
     * @dev Returns the smallest of two numbers of 256 bits.
     */
    pub fn min(a: U256, b: U256) -> U256 {
        if a < b {
            a
        } else {
            b
        }
    }

    pub fn mul(a: U256, b: U256) -> Result<U256> {
        a.checked_mul(b).ok_or(MathError::MulOverflow)
    }

    pub fn div(a: U256, b: U256, round_up: bool) -> Result<U256> {
        if round_up {
            Self::div_up(a, b)
        } else {
            Self::div_down(a, b)
        }
    }

    pub fn div_down(a: U256, b: U256) -> Result<U256> {
        require!(!b.is_zero(), MathError::ZeroDivision);
        Ok(a / b)
    }

    pub fn div_up(a: U256, b: U256) -> Result<U256> {
        require!(!b.is_zero(), MathError::ZeroDivision);

        // Equivalent to:
        // result = a == 0 ? 0 : 1 + (a - 1) / b;
        if a.is_zero() {
            Ok(U256::zero())
        } else {
            // (a - 1) / b < U256::MAX for b >= 1 and a >= 1, so the increment cannot overflow.
            Ok(U256::one() + (a - U256::one()) / b)
        }
    }
}
