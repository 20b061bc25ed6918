//! Pair domain - reserve snapshots of constant-product pools

pub mod amm_math;

use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::shared::errors::SwapError;
use crate::shared::types::{Address, Fraction, Token, TokenAmount};

/// Raw reserves as read from chain, in the order the reader saw them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveSnapshot {
    pub token0: Address,
    pub token1: Address,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
}

/// Collaborator that reads live pair reserves
#[async_trait]
pub trait ReserveReader: Send + Sync {
    /// `Ok(None)` when no pair exists for the two tokens
    async fn fetch_pair(&self, token_a: &Token, token_b: &Token) -> Result<Option<ReserveSnapshot>, SwapError>;
}

/// Immutable reserve snapshot of one pair, tokens sorted by address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    token0: Token,
    token1: Token,
    reserve0: BigUint,
    reserve1: BigUint,
}

impl Pair {
    pub fn new(amount_a: TokenAmount, amount_b: TokenAmount) -> Result<Self, SwapError> {
        if amount_a.token() == amount_b.token() {
            return Err(SwapError::InvalidAmount(format!(
                "pair needs two distinct tokens, got {} twice",
                amount_a.token().symbol()
            )));
        }
        let (first, second) = if amount_a.token().sorts_before(amount_b.token()) {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        Ok(Self {
            token0: first.token().clone(),
            token1: second.token().clone(),
            reserve0: first.raw().clone(),
            reserve1: second.raw().clone(),
        })
    }

    /// Map a snapshot onto the requested tokens and require liquidity on
    /// both sides.
    pub fn from_snapshot(token_a: &Token, token_b: &Token, snapshot: &ReserveSnapshot) -> Result<Self, SwapError> {
        let (reserve_a, reserve_b) =
            if snapshot.token0 == token_a.address() && snapshot.token1 == token_b.address() {
                (snapshot.reserve0.clone(), snapshot.reserve1.clone())
            } else if snapshot.token0 == token_b.address() && snapshot.token1 == token_a.address() {
                (snapshot.reserve1.clone(), snapshot.reserve0.clone())
            } else {
                return Err(SwapError::Rpc(format!(
                    "reserve snapshot for {}/{} does not match requested {}/{}",
                    snapshot.token0,
                    snapshot.token1,
                    token_a.address(),
                    token_b.address()
                )));
            };

        let pair = Self::new(
            TokenAmount::new(token_a.clone(), reserve_a),
            TokenAmount::new(token_b.clone(), reserve_b),
        )?;
        pair.ensure_liquidity()?;
        Ok(pair)
    }

    pub fn token0(&self) -> &Token {
        &self.token0
    }

    pub fn token1(&self) -> &Token {
        &self.token1
    }

    pub fn reserve0(&self) -> TokenAmount {
        TokenAmount::new(self.token0.clone(), self.reserve0.clone())
    }

    pub fn reserve1(&self) -> TokenAmount {
        TokenAmount::new(self.token1.clone(), self.reserve1.clone())
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        *token == self.token0 || *token == self.token1
    }

    pub fn other_token(&self, token: &Token) -> Result<&Token, SwapError> {
        if *token == self.token0 {
            Ok(&self.token1)
        } else if *token == self.token1 {
            Ok(&self.token0)
        } else {
            Err(self.foreign_token(token))
        }
    }

    pub fn reserve_of(&self, token: &Token) -> Result<TokenAmount, SwapError> {
        if *token == self.token0 {
            Ok(self.reserve0())
        } else if *token == self.token1 {
            Ok(self.reserve1())
        } else {
            Err(self.foreign_token(token))
        }
    }

    pub fn is_tradeable(&self) -> bool {
        !self.reserve0.is_zero() && !self.reserve1.is_zero()
    }

    pub fn ensure_liquidity(&self) -> Result<(), SwapError> {
        if self.is_tradeable() {
            Ok(())
        } else {
            Err(SwapError::InsufficientLiquidity(format!(
                "{}/{} reserves {}/{}",
                self.token0.symbol(),
                self.token1.symbol(),
                self.reserve0,
                self.reserve1
            )))
        }
    }

    /// Price of `token` in units of the other token (raw, decimals not applied)
    pub fn price_of(&self, token: &Token) -> Result<Fraction, SwapError> {
        self.ensure_liquidity()?;
        let base = self.reserve_of(token)?;
        let quote = self.reserve_of(self.other_token(token)?)?;
        Fraction::new(quote.raw().clone(), base.raw().clone())
    }

    /// Output for an exact input; zero output is rejected
    pub fn output_amount(&self, input: &TokenAmount) -> Result<TokenAmount, SwapError> {
        self.ensure_liquidity()?;
        let reserve_in = self.reserve_of(input.token())?;
        let reserve_out = self.reserve_of(self.other_token(input.token())?)?;

        let out = amm_math::get_amount_out(input.raw(), reserve_in.raw(), reserve_out.raw())?;
        if out.is_zero() {
            return Err(SwapError::InsufficientInputAmount);
        }
        Ok(TokenAmount::new(reserve_out.token().clone(), out))
    }

    /// Input required for an exact output strictly below the output reserve
    pub fn input_amount(&self, output: &TokenAmount) -> Result<TokenAmount, SwapError> {
        self.ensure_liquidity()?;
        let reserve_out = self.reserve_of(output.token())?;
        let reserve_in = self.reserve_of(self.other_token(output.token())?)?;

        let required = amm_math::get_amount_in(output.raw(), reserve_in.raw(), reserve_out.raw())?;
        Ok(TokenAmount::new(reserve_in.token().clone(), required))
    }

    fn foreign_token(&self, token: &Token) -> SwapError {
        SwapError::CurrencyMismatch(
            token.symbol().to_string(),
            format!("{}/{}", self.token0.symbol(), self.token1.symbol()),
        )
    }
}
