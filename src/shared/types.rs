//! Common types used across the application

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::shared::errors::SwapError;
use crate::shared::utils::format_units;

pub use alloy::primitives::Address;

pub type ChainId = u64;

/// Parse a user-supplied address, hex with or without `0x`, any case
pub fn parse_address(s: &str) -> Result<Address, SwapError> {
    s.trim()
        .parse::<Address>()
        .map_err(|_| SwapError::InvalidAddress(s.to_string()))
}

/// Token representation
///
/// Identity is `(chain_id, address)`; symbol, name and decimals are metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    chain_id: ChainId,
    address: Address,
    decimals: u8,
    symbol: String,
    name: String,
}

impl Token {
    pub fn new(chain_id: ChainId, address: Address, decimals: u8, symbol: &str, name: &str) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pair contracts order their tokens by address
    pub fn sorts_before(&self, other: &Token) -> bool {
        self.address < other.address
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.address)
    }
}

/// Raw token quantity in the token's smallest unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    token: Token,
    raw: BigUint,
}

impl TokenAmount {
    pub fn new(token: Token, raw: impl Into<BigUint>) -> Self {
        Self { token, raw: raw.into() }
    }

    pub fn zero(token: Token) -> Self {
        Self::new(token, BigUint::zero())
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn raw(&self) -> &BigUint {
        &self.raw
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    pub fn checked_add(&self, other: &TokenAmount) -> Result<TokenAmount, SwapError> {
        self.ensure_same_token(other)?;
        Ok(Self::new(self.token.clone(), &self.raw + &other.raw))
    }

    pub fn checked_sub(&self, other: &TokenAmount) -> Result<TokenAmount, SwapError> {
        self.ensure_same_token(other)?;
        if other.raw > self.raw {
            return Err(SwapError::InvalidAmount(format!(
                "{} - {} would be negative",
                self.raw, other.raw
            )));
        }
        Ok(Self::new(self.token.clone(), &self.raw - &other.raw))
    }

    /// Human-readable decimal string using the token's decimals
    pub fn to_exact(&self) -> String {
        format_units(&self.raw, self.token.decimals())
    }

    fn ensure_same_token(&self, other: &TokenAmount) -> Result<(), SwapError> {
        if self.token != other.token {
            return Err(SwapError::CurrencyMismatch(
                self.token.symbol().to_string(),
                other.token.symbol().to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.token.symbol())
    }
}

/// Non-negative exact rational, compared by value
#[derive(Debug, Clone)]
pub struct Fraction {
    numerator: BigUint,
    denominator: BigUint,
}

impl Fraction {
    pub fn new(numerator: impl Into<BigUint>, denominator: impl Into<BigUint>) -> Result<Self, SwapError> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(SwapError::InvalidAmount("fraction with zero denominator".to_string()));
        }
        Ok(Self { numerator: numerator.into(), denominator })
    }

    pub fn zero() -> Self {
        Self { numerator: BigUint::zero(), denominator: BigUint::from(1u8) }
    }

    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    pub fn floor(&self) -> BigUint {
        &self.numerator / &self.denominator
    }

    /// Fixed-point rendering with `places` fractional digits, truncated
    pub fn to_fixed(&self, places: u8) -> String {
        let scaled = &self.numerator * BigUint::from(10u8).pow(places as u32) / &self.denominator;
        format_units(&scaled, places)
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

/// Ceiling division for non-zero divisors
pub fn ceil_div(numerator: &BigUint, denominator: &BigUint) -> BigUint {
    let quotient = numerator / denominator;
    if (&quotient * denominator) == *numerator {
        quotient
    } else {
        quotient + 1u8
    }
}
