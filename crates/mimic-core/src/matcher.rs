//! Similarity lookup over remembered exchanges.
//!
//! Two encoded texts are compared position by position over the shorter of
//! their unpadded lengths. This is a deliberately crude notion of "similar":
//! it rewards shared prefixes and aligned characters, not edit distance.
//!
//! The scan is linear in the store size, which is fine for conversation
//! memory but not for anything resembling a search index.

use mimic_types::memory::Exchange;
use tracing::debug;

use crate::codec::{EncodedVector, encode};

/// A stored output must score strictly above this to be reused.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// A stored exchange whose input matched the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    /// Position of the exchange in store order.
    pub index: usize,
    pub score: f64,
    pub output: &'a str,
}

/// Fraction of positionally equal codes over the shorter unpadded length.
///
/// Symmetric. Returns `0.0` when either side is empty.
pub fn similarity(a: &EncodedVector, b: &EncodedVector) -> f64 {
    let len = a.significant_len().min(b.significant_len());
    if len == 0 {
        return 0.0;
    }
    let equal = a.codes()[..len]
        .iter()
        .zip(&b.codes()[..len])
        .filter(|(x, y)| x == y)
        .count();
    equal as f64 / len as f64
}

/// Find the stored output whose input best matches `query`.
///
/// Ties keep the earliest exchange. Returns `None` for an empty store or
/// when the best score does not exceed [`SIMILARITY_THRESHOLD`].
pub fn find<'a>(query: &EncodedVector, exchanges: &'a [Exchange]) -> Option<Match<'a>> {
    let mut best: Option<Match<'a>> = None;

    for (index, exchange) in exchanges.iter().enumerate() {
        let score = similarity(query, &encode(&exchange.input));
        let best_score = best.map_or(0.0, |m| m.score);
        if score > best_score {
            best = Some(Match {
                index,
                score,
                output: &exchange.output,
            });
        }
    }

    match best {
        Some(m) if m.score > SIMILARITY_THRESHOLD => {
            debug!(index = m.index, score = m.score, "memory hit");
            Some(m)
        }
        Some(m) => {
            debug!(score = m.score, "best memory candidate below threshold");
            None
        }
        None => None,
    }
}
