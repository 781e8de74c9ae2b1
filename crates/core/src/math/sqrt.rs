//! Bit-trick inverse square root.

/// Magic constant for the 64-bit inverse square root estimate.
const INV_SQRT_MAGIC: u64 = 0x5fe6_ec85_e7de_30da;

/// Fast `1 / sqrt(x)`.
///
/// Reinterprets the IEEE-754 bits, subtracts half of them from a magic
/// constant for the initial estimate, then runs one Newton-Raphson step.
/// Worst-case relative error is about 1.8e-3.
///
/// Only meaningful for finite `x > 0`; callers guard everything else.
#[inline]
pub fn fast_inv_sqrt(x: f64) -> f64 {
    let bits = INV_SQRT_MAGIC.wrapping_sub(x.to_bits() >> 1);
    let y = f64::from_bits(bits);
    y * (1.5 - 0.5 * x * y * y)
}

/// Square root as `1 / fast_inv_sqrt(x)`.
///
/// `0 -> 0`, `+inf -> +inf`, negative or NaN input gives NaN.
#[inline]
pub fn inv_sqrt_sqrt(x: f64) -> f64 {
    if x > 0.0 {
        if x.is_infinite() {
            return x;
        }
        1.0 / fast_inv_sqrt(x)
    } else if x == 0.0 {
        0.0
    } else {
        f64::NAN
    }
}
