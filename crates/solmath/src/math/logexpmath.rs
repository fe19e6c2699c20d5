// SPDX-License-Identifier: MIT
// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the
// Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE
// WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR
// OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use primitive_types::U256;
use static_assertions::{assert_impl_all, const_assert};
use tracing::debug;

use super::i256::I256;
use crate::error::{require, MathError, Result};

/// `x^y`, `e^x`, `ln` and `log` over signed 18 decimal fixed point values, evaluated as `exp(y * ln(x))` on top of a
/// table of precomputed powers of e.
///
/// Intermediate steps are checked 256-bit operations. Inputs the on-chain library accepts produce the same result,
/// and anything it would revert on surfaces as a `MathError`.
pub struct LogExpMath;

// Fixed point products divide by the scale and quotients multiply by it, inline at each call site.

pub const ONE_18: I256 = I256::from_i128(1_000_000_000_000_000_000);

// Extra precision for the decomposition steps (20 decimals) and for ln_36 (36 decimals).
pub const ONE_20: I256 = I256::from_i128(100_000_000_000_000_000_000);
pub const ONE_36: I256 = I256::from_i128(1_000_000_000_000_000_000_000_000_000_000_000_000);

// A 20 decimal result must fit in 255 bits, so exponents stop below ln((2^255 - 1) / 1e20) ~ 130.7, and the smallest
// representable result 1e-18 caps negative exponents near -41.4. Both are rounded inward.
pub const MAX_NATURAL_EXPONENT: I256 = I256::from_i128(130_000_000_000_000_000_000);
pub const MIN_NATURAL_EXPONENT: I256 = I256::from_i128(-41_000_000_000_000_000_000);

// ln_36 is used strictly inside (0.9, 1.1), where the result still fits with 36 decimals.
pub const LN_36_LOWER_BOUND: I256 = I256::from_i128(1_000_000_000_000_000_000 - 100_000_000_000_000_000);
pub const LN_36_UPPER_BOUND: I256 = I256::from_i128(1_000_000_000_000_000_000 + 100_000_000_000_000_000);

/// 2^254 / ONE_20. Exponents at or above this could overflow `y * ln(x)`.
pub const MILD_EXPONENT_BOUND: U256 = U256([0x4181ea8059f76532, 0xa88f4bb1ca6bcf58, 0x0bce5086492111ae, 0]);

const HUNDRED: I256 = I256::from_i128(100);
const TWO: I256 = I256::from_i128(2);

/// One `(x_n, a_n)` pair of the decomposition table, with `x_n = 2^(7 - n)` and `a_n = e^(x_n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompositionTerm {
    pub x_n: I256,
    pub a_n: I256,
}

const fn term(x_n: i128, a_n: I256) -> DecompositionTerm {
    DecompositionTerm { x_n: I256::from_i128(x_n), a_n }
}

/// e^128, which needs more than 128 bits even without decimals.
const A0: I256 = I256::from_raw(U256([0x0262827000000000, 0xf53a27172fa9ec63, 0x0195e54c5dd42177, 0]));

/// Terms 0 and 1 hold x_n with 18 decimals and a_n as plain integers (no decimals), since e^(2^7) and e^(2^6) would
/// overflow as fixed point numbers. Terms 2 to 11 hold both x_n and a_n with 20 decimals.
pub static DECOMPOSITION_TABLE: [DecompositionTerm; 12] = [
    term(128_000_000_000_000_000_000, A0),
    term(64_000_000_000_000_000_000, I256::from_i128(6_235_149_080_811_616_882_910_000_000)),
    term(3_200_000_000_000_000_000_000, I256::from_i128(7_896_296_018_268_069_516_100_000_000_000_000)),
    term(1_600_000_000_000_000_000_000, I256::from_i128(888_611_052_050_787_263_676_000_000)),
    term(800_000_000_000_000_000_000, I256::from_i128(298_095_798_704_172_827_474_000)),
    term(400_000_000_000_000_000_000, I256::from_i128(5_459_815_003_314_423_907_810)),
    term(200_000_000_000_000_000_000, I256::from_i128(738_905_609_893_065_022_723)),
    term(100_000_000_000_000_000_000, I256::from_i128(271_828_182_845_904_523_536)),
    term(50_000_000_000_000_000_000, I256::from_i128(164_872_127_070_012_814_685)),
    term(25_000_000_000_000_000_000, I256::from_i128(128_402_541_668_774_148_407)),
    term(12_500_000_000_000_000_000, I256::from_i128(113_314_845_306_682_631_683)),
    term(6_250_000_000_000_000_000, I256::from_i128(106_449_445_891_785_942_956)),
];

// x0 + x1 is larger than MAX_NATURAL_EXPONENT, so at most one of them is present in a decomposition.
const_assert!(128_000_000_000_000_000_000i128 + 64_000_000_000_000_000_000i128 > 130_000_000_000_000_000_000i128);
assert_impl_all!(DecompositionTerm: Send, Sync, Copy);

impl LogExpMath {
    /**
     * @dev x^y for an unsigned 18 decimal base and exponent.
     *
     * Fails when `x` or `y` do not fit the signed range, or when `y * ln(x)` leaves
     * [`MIN_NATURAL_EXPONENT`, `MAX_NATURAL_EXPONENT`].
     */
    pub fn pow(x: U256, y: U256) -> Result<U256> {
        if y.is_zero() {
            // 0^0 is defined as one.
            return Ok(ONE_18.as_raw());
        }

        if x.is_zero() {
            return Ok(U256::zero());
        }

        let x_int256 = match I256::try_from(x) {
            Ok(value) => value,
            Err(_) => {
                debug!(%x, "pow base does not fit in int256");
                return Err(MathError::XOutOfBounds);
            }
        };

        if y >= MILD_EXPONENT_BOUND {
            debug!(%y, "pow exponent above mild exponent bound");
            return Err(MathError::YOutOfBounds);
        }
        let y_int256 = I256::from_raw(y);

        // y * ln(x), still carrying an extra factor of ONE_18.
        let logx_times_y = if LN_36_LOWER_BOUND < x_int256 && x_int256 < LN_36_UPPER_BOUND {
            // Scaling y to 36 decimals could overflow, so the 36 decimal log is split into its integer-part and
            // fractional 18 decimal halves and each half is multiplied by y separately.
            let ln_36_x = Self::ln_36(x_int256)?;
            let ln_36_x_high = ln_36_x.checked_div(ONE_18)?;
            let ln_36_x_low = ln_36_x.checked_rem(ONE_18)?;
            ln_36_x_high
                .checked_mul(y_int256)?
                .checked_add(ln_36_x_low.checked_mul(y_int256)?.checked_div(ONE_18)?)?
        } else {
            Self::ln_internal(x_int256)?.checked_mul(y_int256)?
        };
        let logx_times_y = logx_times_y.checked_div(ONE_18)?;

        if logx_times_y < MIN_NATURAL_EXPONENT || logx_times_y > MAX_NATURAL_EXPONENT {
            debug!(%x, %y, %logx_times_y, "pow product outside natural exponent bounds");
            return Err(MathError::ProductOutOfBounds);
        }

        Self::exp(logx_times_y)?.to_u256()
    }

    /**
     * @dev e^x for a signed 18 decimal exponent within the natural exponent bounds.
     */
    pub fn exp(x: I256) -> Result<I256> {
        require!(
            x >= MIN_NATURAL_EXPONENT && x <= MAX_NATURAL_EXPONENT,
            MathError::InvalidExponent
        );

        if x.is_negative() {
            // e^x = 1 / e^(-x), and -x fits since x is above MIN_NATURAL_EXPONENT.
            let exp_neg_x = Self::exp_non_negative(x.checked_neg()?)?;
            ONE_36.checked_div(exp_neg_x)
        } else {
            Self::exp_non_negative(x)
        }
    }

    fn exp_non_negative(mut x: I256) -> Result<I256> {
        // Subtract every x_n that fits, multiplying the matching a_n into the result, then finish the remainder
        // (below x9) with a Taylor series.

        // Terms 0 and 1 are mutually exclusive and their a_n carry no decimals.
        let (first, second) = (DECOMPOSITION_TABLE[0], DECOMPOSITION_TABLE[1]);
        let first_an = if x >= first.x_n {
            x = x.checked_sub(first.x_n)?;
            first.a_n
        } else if x >= second.x_n {
            x = x.checked_sub(second.x_n)?;
            second.a_n
        } else {
            I256::ONE
        };

        // 20 decimals from here on.
        x = x.checked_mul(HUNDRED)?;

        let mut product = ONE_20;
        // x10 and x11 add nothing at this precision.
        for term in &DECOMPOSITION_TABLE[2..10] {
            if x >= term.x_n {
                x = x.checked_sub(term.x_n)?;
                product = product.checked_mul(term.a_n)?.checked_div(ONE_20)?;
            }
        }

        // 1 + x + x^2/2! + ... + x^12/12!, each term derived from the previous one.
        let mut term = x;
        let mut series_sum = ONE_20.checked_add(term)?;
        for n in 2..=12i128 {
            term = term.checked_mul(x)?.checked_div(ONE_20)?.checked_div(I256::from(n))?;
            series_sum = series_sum.checked_add(term)?;
        }

        // product and series_sum have 20 decimals, first_an none. Drop two digits to get back to 18.
        product
            .checked_mul(series_sum)?
            .checked_div(ONE_20)?
            .checked_mul(first_an)?
            .checked_div(HUNDRED)
    }

    /**
     * @dev log_base(arg) for signed 18 decimal values, as ln(arg) / ln(base) with both logs carried at 36 decimals.
     */
    pub fn log(arg: I256, base: I256) -> Result<I256> {
        require!(arg > I256::ZERO && base > I256::ZERO, MathError::OutOfBounds);

        let log_base = Self::ln_upscaled_36(base)?;
        let log_arg = Self::ln_upscaled_36(arg)?;

        log_arg.checked_mul(ONE_18)?.checked_div(log_base)
    }

    fn ln_upscaled_36(a: I256) -> Result<I256> {
        if LN_36_LOWER_BOUND < a && a < LN_36_UPPER_BOUND {
            Self::ln_36(a)
        } else {
            Self::ln_internal(a)?.checked_mul(ONE_18)
        }
    }

    /**
     * @dev ln(a) for a positive signed 18 decimal value.
     */
    pub fn ln(a: I256) -> Result<I256> {
        require!(a > I256::ZERO, MathError::OutOfBounds);
        if LN_36_LOWER_BOUND < a && a < LN_36_UPPER_BOUND {
            Self::ln_36(a)?.checked_div(ONE_18)
        } else {
            Self::ln_internal(a)
        }
    }

    /// ln(a) for any positive `a`, without the 36 decimal path.
    fn ln_internal(a: I256) -> Result<I256> {
        if a < ONE_18 {
            // ln(a) = -ln(1/a), and 1/a is above one.
            Self::ln_decomposed(ONE_36.checked_div(a)?)?.checked_neg()
        } else {
            Self::ln_decomposed(a)
        }
    }

    /// ln(a) for `a >= ONE_18`.
    fn ln_decomposed(mut a: I256) -> Result<I256> {
        // Divide out every a_n that fits, summing the matching x_n, then finish the remainder (below a11, about 1.06)
        // with the odd power series.
        let (integer_terms, fixed_terms) = DECOMPOSITION_TABLE.split_at(2);
        let mut sum = I256::ZERO;

        // a0 and a1 have no decimals: compare against them scaled up, divide by them as plain integers.
        for term in integer_terms {
            if a >= term.a_n.checked_mul(ONE_18)? {
                a = a.checked_div(term.a_n)?;
                sum = sum.checked_add(term.x_n)?;
            }
        }

        // 20 decimals from here on.
        sum = sum.checked_mul(HUNDRED)?;
        a = a.checked_mul(HUNDRED)?;

        for term in fixed_terms {
            if a >= term.a_n {
                a = a.checked_mul(ONE_20)?.checked_div(term.a_n)?;
                sum = sum.checked_add(term.x_n)?;
            }
        }

        let series_sum = Self::odd_power_series(a, ONE_20, &[3, 5, 7, 9, 11])?;

        sum.checked_add(series_sum)?.checked_div(HUNDRED)
    }

    /**
     * @dev ln(x) with 36 decimals of output, for x strictly between LN_36_LOWER_BOUND and LN_36_UPPER_BOUND.
     */
    fn ln_36(x: I256) -> Result<I256> {
        let x = x.checked_mul(ONE_18)?;
        Self::odd_power_series(x, ONE_36, &[3, 5, 7, 9, 11, 13, 15])
    }

    /// 2 * (z + z^3 / 3 + z^5 / 5 + ...) with z = (x - 1) / (x + 1), where `x` and the result use scale `one`. Each
    /// entry of `divisors` adds the next odd power.
    fn odd_power_series(x: I256, one: I256, divisors: &[i128]) -> Result<I256> {
        let z = x.checked_sub(one)?.checked_mul(one)?.checked_div(x.checked_add(one)?)?;
        let z_squared = z.checked_mul(z)?.checked_div(one)?;

        let mut num = z;
        let mut series_sum = z;
        for &divisor in divisors {
            num = num.checked_mul(z_squared)?.checked_div(one)?;
            series_sum = series_sum.checked_add(num.checked_div(I256::from(divisor))?)?;
        }

        series_sum.checked_mul(TWO)
    }
}
