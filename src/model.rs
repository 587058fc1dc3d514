//! Adaptive symbol-frequency model.
//!
//! A [`FrequencyModel`] owns one count per byte value and maps each symbol to
//! a sub-interval of the coder's current `[bot, top)` range, proportional to
//! its count. The table lives in one of two representations:
//!
//! - **raw**: `freqs[i]` is the count of symbol `i` alone;
//! - **digested**: `freqs[i]` is the cumulative count of symbols `0..=i`.
//!
//! Interval and lookup operations digest on demand. Updating a digested model
//! still works but costs `O(256 - symbol)` instead of `O(1)`, so drivers that
//! batch many updates should [`undigest`](FrequencyModel::undigest) first.
//!
//! The numeric space is `total + 1` units wide: the extra unit is a shadow
//! "not present" slot so that a symbol with count zero still has a defined,
//! degenerate sub-interval that real coded data can never land on.

use std::io::{ErrorKind, Read, Write};

use crate::error::{Error, Result};

/// Number of symbols in the alphabet (bytes 0-255).
pub const ALPHABET: usize = 256;

/// Largest total `update`/`update_by` will accept: 31 bits of precision.
///
/// Acceptance is not a correctness guarantee. Renormalization can leave the
/// coder's interval as narrow as `2^30 + 1`, and once `total + 1` exceeds
/// that width a count-1 symbol's sub-interval can round to zero width,
/// which desynchronizes the stream with no error on either side. Only
/// totals at or below [`SAFE_TOTAL`] are immune; the band in between is
/// accepted for compatibility with the serialized-model format.
pub const MAX_TOTAL: u32 = (1 << 31) - 1;

/// Largest total for which every non-zero count is guaranteed a non-empty
/// sub-interval.
///
/// The narrowest interval renormalization can produce is `2^30 + 1` units
/// wide (leading bits differing, second bits not straddling), and bounds
/// scale by `total + 1`, so `total <= 2^30` keeps at least one interval
/// unit per frequency unit everywhere.
pub const SAFE_TOTAL: u32 = 1 << 30;

/// Per-symbol frequency table with raw and cumulative representations.
pub struct FrequencyModel {
    freqs: [u32; ALPHABET],
    total: u32,
    digested: bool,
}

impl FrequencyModel {
    /// Create an empty model: all counts zero, raw representation.
    pub fn new() -> Self {
        Self {
            freqs: [0; ALPHABET],
            total: 0,
            digested: false,
        }
    }

    /// Add one observation of `symbol`.
    ///
    /// # Errors
    /// Returns [`Error::TotalOverflow`] if the total would pass
    /// [`MAX_TOTAL`]; the model is unchanged on failure.
    pub fn update(&mut self, symbol: u8) -> Result<()> {
        self.update_by(symbol, 1)
    }

    /// Add `delta` observations of `symbol` (negative deltas remove them).
    ///
    /// Static ("perfect") drivers count a fully known input up front, then
    /// call this with `-1` per symbol as coding consumes it, so the total
    /// reaches zero exactly when the stream ends.
    ///
    /// # Errors
    /// Returns [`Error::TotalOverflow`] if the total would pass
    /// [`MAX_TOTAL`], or [`Error::CountUnderflow`] if `symbol`'s count would
    /// go negative. The model is unchanged on failure.
    pub fn update_by(&mut self, symbol: u8, delta: i32) -> Result<()> {
        let new_total = i64::from(self.total) + i64::from(delta);
        if new_total > i64::from(MAX_TOTAL) {
            return Err(Error::TotalOverflow);
        }
        if delta < 0 && i64::from(self.count(symbol)) + i64::from(delta) < 0 {
            return Err(Error::CountUnderflow(symbol));
        }

        self.total = new_total as u32;
        let s = symbol as usize;
        if self.digested {
            // Cumulative form: every entry at or above the symbol moves.
            for f in self.freqs[s..].iter_mut() {
                *f = (i64::from(*f) + i64::from(delta)) as u32;
            }
        } else {
            self.freqs[s] = (i64::from(self.freqs[s]) + i64::from(delta)) as u32;
        }
        Ok(())
    }

    /// Convert the table to cumulative form. Idempotent, `O(256)`.
    pub fn digest(&mut self) {
        if self.digested {
            return;
        }
        self.digested = true;
        for i in 1..ALPHABET {
            self.freqs[i] += self.freqs[i - 1];
        }
    }

    /// Convert the table back to raw per-symbol counts. Idempotent, `O(256)`.
    pub fn undigest(&mut self) {
        if !self.digested {
            return;
        }
        self.digested = false;
        for i in (1..ALPHABET).rev() {
            self.freqs[i] -= self.freqs[i - 1];
        }
    }

    /// Lower bound of `symbol`'s sub-interval within `[bot, top)`.
    ///
    /// The range is scaled to `total + 1` units; ceiling division keeps the
    /// bound inclusive under truncation. A zero-count symbol collapses to
    /// `bot`, the shadow slot. Digests the model if needed.
    pub fn lower_bound(&mut self, symbol: u8, bot: u32, top: u32) -> u32 {
        self.digest();
        let s = symbol as usize;
        let prev = if s == 0 { 0 } else { self.freqs[s - 1] };
        if prev == self.freqs[s] {
            return bot;
        }

        let range = u64::from(top - bot);
        let scale = u64::from(self.total) + 1;
        bot + ((u64::from(prev) + 1) * range).div_ceil(scale) as u32
    }

    /// Upper (exclusive) bound of `symbol`'s sub-interval within `[bot, top)`.
    ///
    /// A zero-count symbol collapses to `bot + 1`, one shadow unit above its
    /// lower bound. Digests the model if needed.
    pub fn upper_bound(&mut self, symbol: u8, bot: u32, top: u32) -> u32 {
        self.digest();
        let s = symbol as usize;
        let prev = if s == 0 { 0 } else { self.freqs[s - 1] };
        if prev == self.freqs[s] {
            return bot + 1;
        }

        let range = u64::from(top - bot);
        let scale = u64::from(self.total) + 1;
        bot + ((u64::from(self.freqs[s]) + 1) * range).div_ceil(scale) as u32
    }

    /// Invert a code value within `[bot, top)` back to a symbol.
    ///
    /// Scales `code` into the `total + 1` unit space with floor division,
    /// then binary-searches the cumulative table for the unique symbol whose
    /// sub-range contains the scaled value (8 probes worst case). Digests
    /// the model if needed.
    ///
    /// The caller must guarantee `bot <= code < top`; the pairing with
    /// [`lower_bound`](Self::lower_bound)/[`upper_bound`](Self::upper_bound)
    /// makes the scaled value land strictly above the previous symbol's
    /// cumulative count, so zero-count symbols are never returned.
    pub fn find_symbol(&mut self, code: u32, bot: u32, top: u32) -> u8 {
        self.digest();
        let range = u64::from(top - bot);
        let scale = u64::from(self.total) + 1;
        let scaled = (u64::from(code - bot) * scale / range) as u32;

        // Smallest index whose cumulative count reaches the scaled value.
        let mut lo = 0usize;
        let mut hi = ALPHABET - 1;
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.freqs[mid] >= scaled {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        hi as u8
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Count of `symbol` alone, regardless of representation.
    pub fn count(&self, symbol: u8) -> u32 {
        let s = symbol as usize;
        if self.digested && s > 0 {
            self.freqs[s] - self.freqs[s - 1]
        } else {
            self.freqs[s]
        }
    }

    /// Zero every count and return to the raw representation.
    pub fn reset(&mut self) {
        self.freqs = [0; ALPHABET];
        self.total = 0;
        self.digested = false;
    }

    /// Serialize the model in raw form.
    ///
    /// Wire layout: `total` as a little-endian `u32`, then one
    /// `(symbol: u8, count: LE u32)` pair per non-zero symbol in ascending
    /// order, then a terminator pair for symbol 0 whose count is written even
    /// when zero. The model is undigested afterwards.
    ///
    /// # Errors
    /// Propagates sink I/O errors.
    pub fn export(&mut self, sink: &mut impl Write) -> Result<()> {
        self.undigest();

        sink.write_all(&self.total.to_le_bytes())?;
        for s in 1..ALPHABET {
            if self.freqs[s] > 0 {
                sink.write_all(&[s as u8])?;
                sink.write_all(&self.freqs[s].to_le_bytes())?;
            }
        }

        // Symbol 0 doubles as the terminator, so it always goes last.
        sink.write_all(&[0])?;
        sink.write_all(&self.freqs[0].to_le_bytes())?;
        Ok(())
    }

    /// Rebuild the model from a stream written by [`export`](Self::export).
    ///
    /// Resets first, then reads pairs until the symbol-0 terminator or the
    /// end of the source. Internal consistency (counts summing to `total`)
    /// is not validated; that is the caller's responsibility.
    ///
    /// # Errors
    /// Propagates source I/O errors other than clean end-of-input.
    pub fn import(&mut self, source: &mut impl Read) -> Result<()> {
        self.reset();

        let mut word = [0u8; 4];
        source.read_exact(&mut word)?;
        self.total = u32::from_le_bytes(word);

        loop {
            let mut sym = [0u8; 1];
            match source.read_exact(&mut sym) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
            match source.read_exact(&mut word) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
            self.freqs[sym[0] as usize] = u32::from_le_bytes(word);
            if sym[0] == 0 {
                break;
            }
        }
        Ok(())
    }
}

impl Default for FrequencyModel {
    fn default() -> Self {
        Self::new()
    }
}
