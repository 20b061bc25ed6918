//! Utility functions and helpers

use alloy::primitives::{Uint, U256};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::shared::errors::SwapError;

/// Render a raw integer amount as a decimal string with `decimals` places.
/// Trailing fractional zeros are dropped.
pub fn format_units(raw: &BigUint, decimals: u8) -> String {
    let digits = raw.to_str_radix(10);
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Parse a decimal string ("1.5") into a raw integer amount.
pub fn parse_units(value: &str, decimals: u8) -> Result<BigUint, SwapError> {
    let value = value.trim();
    let invalid = || SwapError::InvalidAmount(value.to_string());
    let (whole, fraction) = match value.split_once('.') {
        Some((w, f)) => (w, f),
        None => (value, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(SwapError::InvalidAmount(format!(
            "{} has more than {} fractional digits",
            value, decimals
        )));
    }
    let padded = format!(
        "{}{}{}",
        whole,
        fraction,
        "0".repeat(decimals as usize - fraction.len())
    );
    let raw = BigUint::parse_bytes(padded.as_bytes(), 10).unwrap_or_else(BigUint::zero);
    Ok(raw)
}

/// Narrow an exact amount to a uint256 contract argument
pub fn to_u256(value: &BigUint, what: &'static str) -> Result<U256, SwapError> {
    U256::try_from_be_slice(&value.to_bytes_be()).ok_or(SwapError::ArithmeticOverflow(what))
}

pub fn from_uint<const BITS: usize, const LIMBS: usize>(value: Uint<BITS, LIMBS>) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes_vec())
}
