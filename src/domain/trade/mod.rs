//! Trade domain - routes, trades and best-trade resolution

pub mod trade_resolver;

pub use trade_resolver::{best_trade_exact_in, best_trade_exact_out, BestTradeOptions};

use num_bigint::BigUint;
use serde::Serialize;
use std::fmt;

use crate::domain::pair::Pair;
use crate::shared::errors::SwapError;
use crate::shared::types::{Fraction, Token, TokenAmount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TradeType {
    ExactIn,
    ExactOut,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::ExactIn => write!(f, "exact-in"),
            TradeType::ExactOut => write!(f, "exact-out"),
        }
    }
}

/// Ordered chain of pairs from an input token to an output token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pairs: Vec<Pair>,
    path: Vec<Token>,
}

impl Route {
    pub fn new(pairs: Vec<Pair>, input: &Token, output: Option<&Token>) -> Result<Self, SwapError> {
        if pairs.is_empty() {
            return Err(SwapError::NoRouteFound(input.symbol().to_string(), "?".to_string()));
        }

        let mut path = Vec::with_capacity(pairs.len() + 1);
        path.push(input.clone());
        for pair in &pairs {
            let current = &path[path.len() - 1];
            let next = pair.other_token(current)?.clone();
            path.push(next);
        }

        if let Some(expected) = output {
            let last = &path[path.len() - 1];
            if last != expected {
                return Err(SwapError::CurrencyMismatch(
                    last.symbol().to_string(),
                    expected.symbol().to_string(),
                ));
            }
        }
        Ok(Self { pairs, path })
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn path(&self) -> &[Token] {
        &self.path
    }

    pub fn input(&self) -> &Token {
        &self.path[0]
    }

    pub fn output(&self) -> &Token {
        &self.path[self.path.len() - 1]
    }

    pub fn hops(&self) -> usize {
        self.pairs.len()
    }

    /// Marginal price of the input token in output-token raw units
    pub fn mid_price(&self) -> Result<Fraction, SwapError> {
        let mut numerator = BigUint::from(1u8);
        let mut denominator = BigUint::from(1u8);
        for (pair, token) in self.pairs.iter().zip(self.path.iter()) {
            let price = pair.price_of(token)?;
            numerator *= price.numerator();
            denominator *= price.denominator();
        }
        Fraction::new(numerator, denominator)
    }
}

/// A fully computed swap along a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    route: Route,
    trade_type: TradeType,
    input_amount: TokenAmount,
    output_amount: TokenAmount,
}

impl Trade {
    pub fn exact_in(route: Route, amount_in: TokenAmount) -> Result<Self, SwapError> {
        if amount_in.token() != route.input() {
            return Err(SwapError::CurrencyMismatch(
                amount_in.token().symbol().to_string(),
                route.input().symbol().to_string(),
            ));
        }
        let mut current = amount_in.clone();
        for pair in route.pairs() {
            current = pair.output_amount(&current)?;
        }
        Ok(Self {
            route,
            trade_type: TradeType::ExactIn,
            input_amount: amount_in,
            output_amount: current,
        })
    }

    pub fn exact_out(route: Route, amount_out: TokenAmount) -> Result<Self, SwapError> {
        if amount_out.token() != route.output() {
            return Err(SwapError::CurrencyMismatch(
                amount_out.token().symbol().to_string(),
                route.output().symbol().to_string(),
            ));
        }
        let mut current = amount_out.clone();
        for pair in route.pairs().iter().rev() {
            current = pair.input_amount(&current)?;
        }
        Ok(Self {
            route,
            trade_type: TradeType::ExactOut,
            input_amount: current,
            output_amount: amount_out,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_amount(&self) -> &TokenAmount {
        &self.input_amount
    }

    pub fn output_amount(&self) -> &TokenAmount {
        &self.output_amount
    }

    /// Output per unit of input, raw units
    pub fn execution_price(&self) -> Result<Fraction, SwapError> {
        Fraction::new(self.output_amount.raw().clone(), self.input_amount.raw().clone())
    }

    /// Relative shortfall of the output against the mid-price quote of the input
    pub fn price_impact(&self) -> Result<Fraction, SwapError> {
        let mid = self.route.mid_price()?;
        let quoted_numerator = mid.numerator() * self.input_amount.raw();
        let realized = self.output_amount.raw() * mid.denominator();
        if realized >= quoted_numerator {
            return Ok(Fraction::zero());
        }
        Fraction::new(quoted_numerator.clone() - realized, quoted_numerator)
    }
}

/// Rescale a raw price so it reads in whole tokens of `base` and `quote`
pub fn to_display_price(raw: &Fraction, base: &Token, quote: &Token) -> Result<Fraction, SwapError> {
    let ten = BigUint::from(10u8);
    Fraction::new(
        raw.numerator() * ten.pow(base.decimals() as u32),
        raw.denominator() * ten.pow(quote.decimals() as u32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::Address;

    fn token(byte: u8, symbol: &str, decimals: u8) -> Token {
        Token::new(1, Address::repeat_byte(byte), decimals, symbol, symbol)
    }

    fn pair(a: &Token, ra: u64, b: &Token, rb: u64) -> Pair {
        Pair::new(TokenAmount::new(a.clone(), ra), TokenAmount::new(b.clone(), rb)).unwrap()
    }

    #[test]
    fn test_route_path() {
        let a = token(1, "A", 18);
        let b = token(2, "B", 18);
        let c = token(3, "C", 18);
        let route = Route::new(vec![pair(&a, 100, &b, 100), pair(&c, 100, &b, 100)], &a, Some(&c)).unwrap();
        assert_eq!(route.path(), &[a.clone(), b, c.clone()]);
        assert_eq!(route.input(), &a);
        assert_eq!(route.output(), &c);
        assert_eq!(route.hops(), 2);
    }

    #[test]
    fn test_route_rejects_disconnected_pairs() {
        let a = token(1, "A", 18);
        let b = token(2, "B", 18);
        let c = token(3, "C", 18);
        let d = token(4, "D", 18);
        assert!(Route::new(vec![pair(&a, 1, &b, 1), pair(&c, 1, &d, 1)], &a, None).is_err());
        assert!(Route::new(vec![pair(&a, 1, &b, 1)], &a, Some(&c)).is_err());
        assert!(Route::new(vec![], &a, None).is_err());
    }

    #[test]
    fn test_exact_in_trade() {
        let a = token(1, "A", 18);
        let b = token(2, "B", 18);
        let route = Route::new(vec![pair(&a, 1_000_000, &b, 2_000_000)], &a, None).unwrap();
        let trade = Trade::exact_in(route, TokenAmount::new(a, 1_000u32)).unwrap();
        assert_eq!(trade.output_amount().raw(), &BigUint::from(1_992u32));
        assert_eq!(trade.trade_type(), TradeType::ExactIn);
        assert_eq!(trade.execution_price().unwrap(), Fraction::new(1_992u32, 1_000u32).unwrap());
    }

    #[test]
    fn test_exact_out_trade_two_hops() {
        let a = token(1, "A", 18);
        let b = token(2, "B", 18);
        let c = token(3, "C", 18);
        let route = Route::new(
            vec![pair(&a, 1_000_000, &b, 1_000_000), pair(&b, 1_000_000, &c, 1_000_000)],
            &a,
            Some(&c),
        )
        .unwrap();
        let trade = Trade::exact_out(route.clone(), TokenAmount::new(c.clone(), 1_000u32)).unwrap();

        let b_needed = crate::domain::pair::amm_math::get_amount_in(
            &BigUint::from(1_000u32),
            &BigUint::from(1_000_000u32),
            &BigUint::from(1_000_000u32),
        )
        .unwrap();
        let a_needed = crate::domain::pair::amm_math::get_amount_in(
            &b_needed,
            &BigUint::from(1_000_000u32),
            &BigUint::from(1_000_000u32),
        )
        .unwrap();
        assert_eq!(trade.input_amount().raw(), &a_needed);
        assert_eq!(trade.input_amount().token(), &a);
    }

    #[test]
    fn test_price_impact_includes_fee() {
        let a = token(1, "A", 18);
        let b = token(2, "B", 18);
        let route = Route::new(
            vec![pair(&a, 1_000_000_000_000, &b, 1_000_000_000_000)],
            &a,
            None,
        )
        .unwrap();
        let trade = Trade::exact_in(route, TokenAmount::new(a, 1_000_000u32)).unwrap();
        // small trade in a deep pool: impact is dominated by the 0.3% fee
        let impact = trade.price_impact().unwrap();
        assert!(impact >= Fraction::new(3u32, 1_000u32).unwrap());
        assert!(impact < Fraction::new(5u32, 1_000u32).unwrap());
    }

    #[test]
    fn test_display_price_applies_decimals() {
        let weth = token(1, "WETH", 18);
        let usdc = token(2, "USDC", 6);
        // 1 WETH (1e18 raw) buys 2000 USDC (2e9 raw)
        let raw = Fraction::new(2_000_000_000u64, 1_000_000_000_000_000_000u64).unwrap();
        let display = to_display_price(&raw, &weth, &usdc).unwrap();
        assert_eq!(display, Fraction::new(2_000u32, 1u32).unwrap());
    }
}
