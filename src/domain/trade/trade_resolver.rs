//! Best-trade search over a set of candidate pairs

use std::cmp::Ordering;
use tracing::debug;

use super::{Route, Trade};
use crate::domain::pair::Pair;
use crate::shared::types::{Token, TokenAmount};

/// Search limits for best-trade resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTradeOptions {
    pub max_hops: usize,
    pub max_num_results: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_hops: 1,
            max_num_results: 3,
        }
    }
}

/// Trades spending exactly `amount_in`, best output first.
///
/// Pairs without liquidity or that would yield nothing are skipped; an empty
/// result means no route exists within `max_hops`.
pub fn best_trade_exact_in(
    pairs: &[Pair],
    amount_in: &TokenAmount,
    token_out: &Token,
    options: BestTradeOptions,
) -> Vec<Trade> {
    let mut candidates = Vec::new();
    if options.max_hops == 0 || options.max_num_results == 0 || amount_in.token() == token_out {
        return candidates;
    }
    collect_exact_in(
        pairs,
        amount_in,
        token_out,
        options.max_hops,
        &mut Vec::new(),
        amount_in,
        &mut candidates,
    );
    // stable: equal candidates keep discovery order
    candidates.sort_by(compare_exact_in);
    candidates.truncate(options.max_num_results);
    candidates
}

/// Trades delivering exactly `amount_out`, cheapest input first.
pub fn best_trade_exact_out(
    pairs: &[Pair],
    token_in: &Token,
    amount_out: &TokenAmount,
    options: BestTradeOptions,
) -> Vec<Trade> {
    let mut candidates = Vec::new();
    if options.max_hops == 0 || options.max_num_results == 0 || amount_out.token() == token_in {
        return candidates;
    }
    collect_exact_out(
        pairs,
        token_in,
        amount_out,
        options.max_hops,
        &mut Vec::new(),
        amount_out,
        &mut candidates,
    );
    candidates.sort_by(compare_exact_out);
    candidates.truncate(options.max_num_results);
    candidates
}

fn collect_exact_in(
    pairs: &[Pair],
    current_in: &TokenAmount,
    token_out: &Token,
    hops_left: usize,
    current_pairs: &mut Vec<Pair>,
    original_in: &TokenAmount,
    candidates: &mut Vec<Trade>,
) {
    for (i, pair) in pairs.iter().enumerate() {
        if !pair.involves_token(current_in.token()) {
            continue;
        }
        let output = match pair.output_amount(current_in) {
            Ok(output) => output,
            Err(e) => {
                debug!(
                    "Skipping pair {}/{}: {}",
                    pair.token0().symbol(),
                    pair.token1().symbol(),
                    e
                );
                continue;
            }
        };

        if output.token() == token_out {
            let mut route_pairs = current_pairs.clone();
            route_pairs.push(pair.clone());
            let trade = Route::new(route_pairs, original_in.token(), Some(token_out))
                .and_then(|route| Trade::exact_in(route, original_in.clone()));
            match trade {
                Ok(trade) => candidates.push(trade),
                Err(e) => debug!("Discarding candidate route: {}", e),
            }
        } else if hops_left > 1 {
            let remaining: Vec<Pair> = pairs
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, p)| p.clone())
                .collect();
            current_pairs.push(pair.clone());
            collect_exact_in(
                &remaining,
                &output,
                token_out,
                hops_left - 1,
                current_pairs,
                original_in,
                candidates,
            );
            current_pairs.pop();
        }
    }
}

fn collect_exact_out(
    pairs: &[Pair],
    token_in: &Token,
    current_out: &TokenAmount,
    hops_left: usize,
    current_pairs: &mut Vec<Pair>,
    original_out: &TokenAmount,
    candidates: &mut Vec<Trade>,
) {
    for (i, pair) in pairs.iter().enumerate() {
        if !pair.involves_token(current_out.token()) {
            continue;
        }
        let input = match pair.input_amount(current_out) {
            Ok(input) => input,
            Err(e) => {
                debug!(
                    "Skipping pair {}/{}: {}",
                    pair.token0().symbol(),
                    pair.token1().symbol(),
                    e
                );
                continue;
            }
        };

        if input.token() == token_in {
            let mut route_pairs = Vec::with_capacity(current_pairs.len() + 1);
            route_pairs.push(pair.clone());
            route_pairs.extend(current_pairs.iter().cloned());
            let trade = Route::new(route_pairs, token_in, Some(original_out.token()))
                .and_then(|route| Trade::exact_out(route, original_out.clone()));
            match trade {
                Ok(trade) => candidates.push(trade),
                Err(e) => debug!("Discarding candidate route: {}", e),
            }
        } else if hops_left > 1 {
            let remaining: Vec<Pair> = pairs
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, p)| p.clone())
                .collect();
            current_pairs.insert(0, pair.clone());
            collect_exact_out(
                &remaining,
                token_in,
                &input,
                hops_left - 1,
                current_pairs,
                original_out,
                candidates,
            );
            current_pairs.remove(0);
        }
    }
}

fn compare_exact_in(a: &Trade, b: &Trade) -> Ordering {
    b.output_amount()
        .raw()
        .cmp(a.output_amount().raw())
        .then_with(|| a.route().hops().cmp(&b.route().hops()))
}

fn compare_exact_out(a: &Trade, b: &Trade) -> Ordering {
    a.input_amount()
        .raw()
        .cmp(b.input_amount().raw())
        .then_with(|| a.route().hops().cmp(&b.route().hops()))
}
