//! Constant-product swap math with the 0.3% LP fee
//!
//! Rounding is asymmetric: exact-in output is floored, exact-out input is
//! floored and then incremented by one. Both directions leave the rounding
//! remainder inside the pool.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::shared::errors::SwapError;

pub const FEE_NUMERATOR: u32 = 997;
pub const FEE_DENOMINATOR: u32 = 1000;

/// Output for an exact input:
/// `floor(in * 997 * reserve_out / (reserve_in * 1000 + in * 997))`
pub fn get_amount_out(
    amount_in: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
) -> Result<BigUint, SwapError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(SwapError::InsufficientLiquidity("zero reserve".to_string()));
    }
    let amount_in_with_fee = amount_in * FEE_NUMERATOR;
    let numerator = &amount_in_with_fee * reserve_out;
    let denominator = reserve_in * FEE_DENOMINATOR + &amount_in_with_fee;
    Ok(numerator / denominator)
}

/// Input required for an exact output:
/// `floor(reserve_in * out * 1000 / ((reserve_out - out) * 997)) + 1`
pub fn get_amount_in(
    amount_out: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
) -> Result<BigUint, SwapError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(SwapError::InsufficientLiquidity("zero reserve".to_string()));
    }
    if amount_out >= reserve_out {
        return Err(SwapError::InsufficientOutputReserve);
    }
    let numerator = reserve_in * amount_out * FEE_DENOMINATOR;
    let denominator = (reserve_out - amount_out) * FEE_NUMERATOR;
    Ok(numerator / denominator + 1u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn big(v: u128) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_reference_exact_in() {
        let out = get_amount_out(&big(1_000), &big(1_000_000), &big(2_000_000)).unwrap();
        assert_eq!(out, big(1_992));
    }

    #[test]
    fn test_reference_exact_out() {
        // floor(1_000_000 * 1_992 * 1000 / (1_998_008 * 997)) + 1
        let input = get_amount_in(&big(1_992), &big(1_000_000), &big(2_000_000)).unwrap();
        assert_eq!(input, big(1_000));
    }

    #[test]
    fn test_zero_reserve_is_an_error_not_a_fault() {
        assert!(matches!(
            get_amount_out(&big(10), &big(0), &big(10)),
            Err(SwapError::InsufficientLiquidity(_))
        ));
        assert!(matches!(
            get_amount_in(&big(1), &big(10), &big(0)),
            Err(SwapError::InsufficientLiquidity(_))
        ));
    }

    #[test]
    fn test_output_at_or_above_reserve() {
        assert_eq!(
            get_amount_in(&big(100), &big(1_000), &big(100)),
            Err(SwapError::InsufficientOutputReserve)
        );
        assert_eq!(
            get_amount_in(&big(101), &big(1_000), &big(100)),
            Err(SwapError::InsufficientOutputReserve)
        );
    }

    #[test]
    fn test_exact_in_exact_out_consistency() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let reserve_in = big(rng.gen_range(1..=u64::MAX as u128));
            let reserve_out = big(rng.gen_range(1..=u64::MAX as u128));
            let amount_in = big(rng.gen_range(1..=u64::MAX as u128));

            let out = get_amount_out(&amount_in, &reserve_in, &reserve_out).unwrap();
            assert!(out < reserve_out);

            if !out.is_zero() {
                let required = get_amount_in(&out, &reserve_in, &reserve_out).unwrap();
                assert!(required <= amount_in, "pool would be underpaid");
            }

            // k never decreases, even before the fee is credited
            let k_before = &reserve_in * &reserve_out;
            let k_after = (&reserve_in + &amount_in) * (&reserve_out - &out);
            assert!(k_after >= k_before);
        }
    }

    #[test]
    fn test_exact_out_never_undersupplies() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let reserve_in = big(rng.gen_range(1_000..=1u128 << 100));
            let reserve_out = big(rng.gen_range(1_000..=1u128 << 100));
            let amount_out = big(rng.gen_range(1..1_000u128));

            let required = get_amount_in(&amount_out, &reserve_in, &reserve_out).unwrap();
            let delivered = get_amount_out(&required, &reserve_in, &reserve_out).unwrap();
            assert!(delivered >= amount_out);
        }
    }
}
