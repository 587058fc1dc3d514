//! # Adaptive Arithmetic (Range) Coding
//!
//! *Entropy coding at the Shannon limit, one interval at a time.*
//!
//! ## Intuition First
//!
//! Picture the numbers between 0 and 1 as a shelf, and give every symbol a
//! segment of that shelf proportional to how often it occurs. To encode a
//! message, zoom into the first symbol's segment, then give *that* segment
//! out to the alphabet in the same proportions and zoom again, symbol after
//! symbol. The message becomes a single number inside the final, tiny
//! segment, and frequent symbols, owning wide segments, cost almost nothing
//! to zoom into.
//!
//! ## The Problem
//!
//! Infinite-precision zooming needs infinite-precision numbers. The classic
//! fix is to keep only a 32-bit window `[bot, top)` onto the interval and
//! *renormalize*: once the leading bit of `bot` and `top` agree it can never
//! change, so ship it out and shift both ends left. One wrinkle remains:
//! the interval can shrink around the midpoint (`bot = 01..`, `top = 10..`)
//! without ever settling a leading bit. Those shifts are counted as
//! *pending* bits and resolved in one burst, as the opposite of whichever
//! bit finally settles.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon              Entropy as the fundamental limit
//! 1976  Rissanen/Pasco       Arithmetic coding reaches the limit
//! 1979  Martin               Range coding: the byte-oriented rediscovery
//! 1987  Witten/Neal/Cleary   The canonical adaptive CACM implementation
//! 1990s JPEG/JBIG            Binary arithmetic coders go mainstream
//! ```
//!
//! ## Mathematical Formulation
//!
//! With cumulative counts $F$ and total $T$, a symbol $s$ narrows the
//! current interval of width $R$ to
//!
//! ```text
//! [ bot + ceil((F(s-1)+1) * R / (T+1)),  bot + ceil((F(s)+1) * R / (T+1)) )
//! ```
//!
//! The denominator $T+1$ reserves one "shadow" unit at the bottom so a
//! never-seen symbol still owns a defined (if degenerate) interval. The
//! decoder inverts by scaling its code value back into the $T+1$ unit space
//! and binary-searching $F$.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(\log |\Sigma|)$ per decoded symbol (cumulative binary
//!   search over a 256-entry table, 8 probes); amortized $O(1)$ bit
//!   shifts per symbol.
//! - **Space**: $O(|\Sigma|)$ (one `u32` count per byte value).
//!
//! ## Failure Modes
//!
//! 1. **Model drift**: encoder and decoder must apply identical model
//!    updates in identical order; one missed update silently garbles the
//!    rest of the stream.
//! 2. **Precision ceiling**: updates reject totals past $2^{31}-1$, but
//!    non-empty sub-intervals are only guaranteed while the total stays at
//!    or below $2^{30}$, the smallest interval width renormalization can
//!    leave behind. Totals in between are accepted and can silently collapse
//!    a low-count symbol's sub-interval; see [`model::MAX_TOTAL`].
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`FrequencyModel`]: adaptive or precomputed per-byte counts, with a
//!   serialized form for the static ("perfect model") workflow.
//! - [`RangeEncoder`] / [`RangeDecoder`]: the coder pair over any
//!   [`std::io::Write`] / [`std::io::Read`] stream.
//!
//! ## References
//!
//! - Witten, I., Neal, R., Cleary, J. (1987). "Arithmetic Coding for Data
//!   Compression." *Communications of the ACM* 30(6).
//! - Martin, G. N. N. (1979). "Range encoding: an algorithm for removing
//!   redundancy from a digitised message."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod error;
pub mod model;
pub mod range;

pub use bitio::{BitReader, BitWriter};
pub use error::Error;
pub use model::FrequencyModel;
pub use range::{RangeDecoder, RangeEncoder};
