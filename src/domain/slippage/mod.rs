//! Slippage domain - worst-case bounds that protect a quoted trade

use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use std::str::FromStr;

use crate::domain::trade::{Trade, TradeType};
use crate::shared::errors::SwapError;
use crate::shared::types::{ceil_div, TokenAmount};
use crate::shared::utils::parse_units;

/// Exact rational tolerance in `[0, 1)`
#[derive(Debug, Clone)]
pub struct SlippageTolerance {
    numerator: BigUint,
    denominator: BigUint,
}

impl SlippageTolerance {
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, SwapError> {
        if numerator < 0 || denominator <= 0 {
            return Err(SwapError::InvalidSlippage(format!("{}/{}", numerator, denominator)));
        }
        Self::from_parts(BigUint::from(numerator as u64), BigUint::from(denominator as u64))
    }

    pub fn from_bps(bps: u32) -> Result<Self, SwapError> {
        Self::from_parts(BigUint::from(bps), BigUint::from(10_000u32))
    }

    pub fn zero() -> Self {
        Self {
            numerator: BigUint::zero(),
            denominator: BigUint::from(1u8),
        }
    }

    fn from_parts(numerator: BigUint, denominator: BigUint) -> Result<Self, SwapError> {
        if denominator.is_zero() || numerator >= denominator {
            return Err(SwapError::InvalidSlippage(format!("{}/{}", numerator, denominator)));
        }
        Ok(Self { numerator, denominator })
    }

    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }
}

impl PartialEq for SlippageTolerance {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for SlippageTolerance {}

impl fmt::Display for SlippageTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Accepts "1/100", "0.5%" or "0.005"
impl FromStr for SlippageTolerance {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || SwapError::InvalidSlippage(s.to_string());
        if s.starts_with('-') {
            return Err(invalid());
        }

        if let Some((numerator, denominator)) = s.split_once('/') {
            let numerator = parse_units(numerator, 0).map_err(|_| invalid())?;
            let denominator = parse_units(denominator, 0).map_err(|_| invalid())?;
            return Self::from_parts(numerator, denominator);
        }

        let (body, percent) = match s.strip_suffix('%') {
            Some(body) => (body.trim(), true),
            None => (s, false),
        };
        let places = body.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
        if places > u8::MAX as usize {
            return Err(invalid());
        }
        let numerator = parse_units(body, places as u8).map_err(|_| invalid())?;
        let mut denominator = BigUint::from(10u8).pow(places as u32);
        if percent {
            denominator *= 100u32;
        }
        Self::from_parts(numerator, denominator)
    }
}

/// `floor(output * (1 - s))` for exact-in trades; exact-out output is fixed
pub fn minimum_amount_out(trade: &Trade, slippage: &SlippageTolerance) -> TokenAmount {
    let output = trade.output_amount();
    match trade.trade_type() {
        TradeType::ExactOut => output.clone(),
        TradeType::ExactIn => {
            let keep = &slippage.denominator - &slippage.numerator;
            let bounded = output.raw() * keep / &slippage.denominator;
            TokenAmount::new(output.token().clone(), bounded)
        }
    }
}

/// `ceil(input * (1 + s))` for exact-out trades; exact-in input is fixed
pub fn maximum_amount_in(trade: &Trade, slippage: &SlippageTolerance) -> TokenAmount {
    let input = trade.input_amount();
    match trade.trade_type() {
        TradeType::ExactIn => input.clone(),
        TradeType::ExactOut => {
            let grow = &slippage.denominator + &slippage.numerator;
            let bounded = ceil_div(&(input.raw() * grow), &slippage.denominator);
            TokenAmount::new(input.token().clone(), bounded)
        }
    }
}

/// A trade together with its slippage-protected counter amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedTrade {
    trade: Trade,
    bounded_counter_amount: TokenAmount,
    slippage: SlippageTolerance,
}

impl ExpectedTrade {
    pub fn new(trade: Trade, slippage: SlippageTolerance) -> Self {
        let bounded_counter_amount = match trade.trade_type() {
            TradeType::ExactIn => minimum_amount_out(&trade, &slippage),
            TradeType::ExactOut => maximum_amount_in(&trade, &slippage),
        };
        Self {
            trade,
            bounded_counter_amount,
            slippage,
        }
    }

    pub fn trade(&self) -> &Trade {
        &self.trade
    }

    /// Minimum output (exact-in) or maximum input (exact-out)
    pub fn bounded_counter_amount(&self) -> &TokenAmount {
        &self.bounded_counter_amount
    }

    pub fn slippage(&self) -> &SlippageTolerance {
        &self.slippage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pair::Pair;
    use crate::domain::trade::Route;
    use crate::shared::types::{Address, Token};

    fn tokens() -> (Token, Token) {
        (
            Token::new(1, Address::repeat_byte(1), 18, "A", "A"),
            Token::new(1, Address::repeat_byte(2), 18, "B", "B"),
        )
    }

    fn exact_in_trade(amount: u64) -> Trade {
        let (a, b) = tokens();
        let pair = Pair::new(TokenAmount::new(a.clone(), 1_000_000u64), TokenAmount::new(b, 2_000_000u64)).unwrap();
        let route = Route::new(vec![pair], &a, None).unwrap();
        Trade::exact_in(route, TokenAmount::new(a, amount)).unwrap()
    }

    fn exact_out_trade(amount: u64) -> Trade {
        let (a, b) = tokens();
        let pair = Pair::new(TokenAmount::new(a.clone(), 1_000_000u64), TokenAmount::new(b.clone(), 2_000_000u64)).unwrap();
        let route = Route::new(vec![pair], &a, Some(&b)).unwrap();
        Trade::exact_out(route, TokenAmount::new(b, amount)).unwrap()
    }

    #[test]
    fn test_tolerance_bounds() {
        assert!(SlippageTolerance::new(0, 1).is_ok());
        assert!(SlippageTolerance::new(99, 100).is_ok());
        assert!(matches!(SlippageTolerance::new(-1, 100), Err(SwapError::InvalidSlippage(_))));
        assert!(matches!(SlippageTolerance::new(1, 1), Err(SwapError::InvalidSlippage(_))));
        assert!(matches!(SlippageTolerance::new(3, 2), Err(SwapError::InvalidSlippage(_))));
        assert!(matches!(SlippageTolerance::new(1, 0), Err(SwapError::InvalidSlippage(_))));
        assert!(matches!(SlippageTolerance::from_bps(10_000), Err(SwapError::InvalidSlippage(_))));
    }

    #[test]
    fn test_parse_forms() {
        let expected = SlippageTolerance::new(1, 200).unwrap();
        assert_eq!("1/200".parse::<SlippageTolerance>().unwrap(), expected);
        assert_eq!("0.5%".parse::<SlippageTolerance>().unwrap(), expected);
        assert_eq!("0.005".parse::<SlippageTolerance>().unwrap(), expected);
        assert_eq!(SlippageTolerance::from_bps(50).unwrap(), expected);
        assert!("-0.01".parse::<SlippageTolerance>().is_err());
        assert!("100%".parse::<SlippageTolerance>().is_err());
        assert!("1".parse::<SlippageTolerance>().is_err());
        assert!("abc".parse::<SlippageTolerance>().is_err());
        assert!("1/0".parse::<SlippageTolerance>().is_err());
    }

    #[test]
    fn test_minimum_out_zero_tolerance_is_identity() {
        let trade = exact_in_trade(1_000);
        let bound = minimum_amount_out(&trade, &SlippageTolerance::zero());
        assert_eq!(&bound, trade.output_amount());
    }

    #[test]
    fn test_minimum_out_floors() {
        let trade = exact_in_trade(1_000); // output 1_992
        let bound = minimum_amount_out(&trade, &SlippageTolerance::new(1, 100).unwrap());
        // 1_992 * 0.99 = 1_972.08
        assert_eq!(bound.raw(), &BigUint::from(1_972u32));
    }

    #[test]
    fn test_minimum_out_monotone() {
        let trade = exact_in_trade(123_456);
        let mut previous = trade.output_amount().raw().clone();
        for bps in (0..10_000).step_by(37) {
            let bound = minimum_amount_out(&trade, &SlippageTolerance::from_bps(bps).unwrap());
            assert!(bound.raw() <= &previous);
            previous = bound.raw().clone();
        }
    }

    #[test]
    fn test_maximum_in_ceils() {
        let trade = exact_out_trade(1_992); // input 1_000
        assert_eq!(trade.input_amount().raw(), &BigUint::from(1_000u32));
        let bound = maximum_amount_in(&trade, &SlippageTolerance::new(1, 300).unwrap());
        // 1_000 * 301 / 300 = 1_003.33..
        assert_eq!(bound.raw(), &BigUint::from(1_004u32));
        let exact = maximum_amount_in(&trade, &SlippageTolerance::new(1, 100).unwrap());
        assert_eq!(exact.raw(), &BigUint::from(1_010u32));
    }

    #[test]
    fn test_fixed_side_is_unchanged() {
        let slippage = SlippageTolerance::new(5, 100).unwrap();
        let exact_in = exact_in_trade(1_000);
        assert_eq!(&maximum_amount_in(&exact_in, &slippage), exact_in.input_amount());
        let exact_out = exact_out_trade(1_000);
        assert_eq!(&minimum_amount_out(&exact_out, &slippage), exact_out.output_amount());
    }

    #[test]
    fn test_expected_trade_picks_bound_by_type() {
        let slippage = SlippageTolerance::new(1, 100).unwrap();
        let quoted = ExpectedTrade::new(exact_in_trade(1_000), slippage.clone());
        assert_eq!(quoted.bounded_counter_amount().raw(), &BigUint::from(1_972u32));
        assert_eq!(quoted.bounded_counter_amount().token().symbol(), "B");

        let quoted = ExpectedTrade::new(exact_out_trade(1_992), slippage);
        assert_eq!(quoted.bounded_counter_amount().raw(), &BigUint::from(1_010u32));
        assert_eq!(quoted.bounded_counter_amount().token().symbol(), "A");
    }
}
