// SPDX-License-Identifier: GPL-3.0-or-later
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use primitive_types::U256;
use tracing::trace;

use super::logexpmath::LogExpMath;
use super::math::Math;
use crate::error::{require, MathError, Result};
use crate::version::PoolVersion;

/// 1e18, the scale of every public fixed point value.
pub const WAD: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// 1e27, used by callers that need more precision than WAD.
pub const RAY: U256 = U256([0x9fd0803ce8000000, 0x33b2e3c, 0, 0]);

/**
 * @dev 18 decimal fixed point arithmetic with explicit rounding directions, mirroring the client-side `MathSol`
 * helpers that wrap the on-chain FixedPoint library.
 */
pub struct MathSol;

impl MathSol {
    pub const ONE: U256 = WAD; // 18 decimal places
    pub const TWO: U256 = U256([2_000_000_000_000_000_000, 0, 0, 0]);
    pub const FOUR: U256 = U256([4_000_000_000_000_000_000, 0, 0, 0]);
    pub const MAX_POW_RELATIVE_ERROR: U256 = U256([10000, 0, 0, 0]); // 10^(-14)

    pub fn add(a: U256, b: U256) -> Result<U256> {
        // Fixed Point addition is the same as regular checked addition
        Math::add(a, b)
    }

    pub fn sub(a: U256, b: U256) -> Result<U256> {
        // Fixed Point subtraction is the same as regular checked subtraction
        Math::sub(a, b)
    }

    pub fn max(a: U256, b: U256) -> U256 {
        Math::max(a, b)
    }

    pub fn min(a: U256, b: U256) -> U256 {
        Math::min(a, b)
    }

    pub fn mul_down_fixed(a: U256, b: U256) -> Result<U256> {
        let product = a.checked_mul(b).ok_or(MathError::MulOverflow)?;
        Ok(product / Self::ONE)
    }

    pub fn mul_up_fixed(a: U256, b: U256) -> Result<U256> {
        let product = a.checked_mul(b).ok_or(MathError::MulOverflow)?;

        // The traditional divUp formula is:
        // divUp(x, y) := (x + y - 1) / y
        // To avoid intermediate overflow in the addition, we distribute the division and get:
        // divUp(x, y) := (x - 1) / y + 1
        // Note that this requires x != 0, if x == 0 then the result is zero
        if product.is_zero() {
            Ok(U256::zero())
        } else {
            Ok((product - U256::one()) / Self::ONE + U256::one())
        }
    }

    pub fn div_down_fixed(a: U256, b: U256) -> Result<U256> {
        require!(!b.is_zero(), MathError::ZeroDivision);

        if a.is_zero() {
            return Ok(U256::zero());
        }
        let a_inflated = a.checked_mul(Self::ONE).ok_or(MathError::DivInternal)?; // mul overflow
        Ok(a_inflated / b)
    }

    pub fn div_up_fixed(a: U256, b: U256) -> Result<U256> {
        require!(!b.is_zero(), MathError::ZeroDivision);

        if a.is_zero() {
            return Ok(U256::zero());
        }
        let a_inflated = a.checked_mul(Self::ONE).ok_or(MathError::DivInternal)?; // mul overflow

        // The traditional divUp formula is:
        // divUp(x, y) := (x + y - 1) / y
        // To avoid intermediate overflow in the addition, we distribute the division and get:
        // divUp(x, y) := (x - 1) / y + 1
        Ok((a_inflated - U256::one()) / b + U256::one())
    }

    /**
     * @dev Integer (not fixed point) division rounding up.
     */
    pub fn div_up(a: U256, b: U256) -> Result<U256> {
        Math::div_up(a, b)
    }

    /**
     * @dev Returns x^y, assuming both are fixed point numbers, rounding down. The result is guaranteed to not be above
     * the true value (that is, the error function expected - actual is always positive) on the general path.
     *
     * `version` is the pool-type version from the caller's pool configuration, either a `PoolVersion` or the raw
     * number.
     */
    pub fn pow_down_fixed(x: U256, y: U256, version: impl Into<PoolVersion>) -> Result<U256> {
        if let Some(result) = Self::pow_shortcut(x, y, version.into())? {
            return Ok(result);
        }

        let raw = LogExpMath::pow(x, y)?;
        let max_error = Self::add(Self::mul_up_fixed(raw, Self::MAX_POW_RELATIVE_ERROR)?, U256::one())?;

        if raw < max_error {
            Ok(U256::zero())
        } else {
            Self::sub(raw, max_error)
        }
    }

    /**
     * @dev Returns x^y, assuming both are fixed point numbers, rounding up. The result is guaranteed to not be below
     * the true value (that is, the error function expected - actual is always negative).
     */
    pub fn pow_up_fixed(x: U256, y: U256, version: impl Into<PoolVersion>) -> Result<U256> {
        if let Some(result) = Self::pow_shortcut(x, y, version.into())? {
            return Ok(result);
        }

        let raw = LogExpMath::pow(x, y)?;
        let max_error = Self::add(Self::mul_up_fixed(raw, Self::MAX_POW_RELATIVE_ERROR)?, U256::one())?;

        Self::add(raw, max_error)
    }

    /// Exact results for y equal to 1.0, 2.0 or 4.0, which occur often in 50/50 and 80/20 weighted pools. Legacy pools
    /// never take these, and both rounding directions share them.
    fn pow_shortcut(x: U256, y: U256, version: PoolVersion) -> Result<Option<U256>> {
        if !version.has_pow_shortcuts() {
            trace!(%x, %y, "legacy pool version, general pow path");
            return Ok(None);
        }

        let result = if y == Self::ONE {
            x
        } else if y == Self::TWO {
            Self::mul_up_fixed(x, x)?
        } else if y == Self::FOUR {
            let square = Self::mul_up_fixed(x, x)?;
            Self::mul_up_fixed(square, square)?
        } else {
            return Ok(None);
        };
        trace!(%x, %y, %result, "pow shortcut");
        Ok(Some(result))
    }

    /**
     * @dev Returns the complement of a value (1 - x), capped to 0 if x is larger than 1.
     *
     * Useful when computing the complement for values with some level of relative error, as it strips this error and
     * prevents intermediate negative values.
     */
    pub fn complement_fixed(x: U256) -> U256 {
        // Equivalent to:
        // result = (x < ONE) ? (ONE - x) : 0;
        if x < Self::ONE {
            Self::ONE - x
        } else {
            U256::zero()
        }
    }
}
