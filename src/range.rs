//! Binary arithmetic (range) coder.
//!
//! [`RangeEncoder`] narrows a 32-bit interval `[bot, top)` symbol by symbol,
//! emitting each leading bit as soon as it is decided; [`RangeDecoder`] runs
//! the identical narrowing against a 32-bit code value read from the stream
//! and inverts it back to symbols. Two renormalization cases keep the
//! interval inside 32 bits:
//!
//! 1. **settled**: `bot` and `top` agree on their leading bit, so that bit
//!    can leave the interval immediately;
//! 2. **straddle**: the interval spans the midpoint without agreeing
//!    (`top = 10..`, `bot = 01..`), so the disagreeing *second* bit is
//!    dropped and the eventual polarity is deferred to a pending counter.
//!
//! Both cases are one shared state transition on `(bot, top)`; only the side
//! effect differs (emit a bit vs. shift one into the code value), so the loop
//! lives in one routine driven by a callback.
//!
//! Encoder and decoder must be driven with the same model in the same state
//! at every step. The interval arithmetic is a deterministic function of the
//! model's cumulative counts, and any divergence between the two sides
//! desynchronizes the stream with no way to detect it.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::model::FrequencyModel;

const MSB: u32 = 0x8000_0000;
const SECOND: u32 = 0x4000_0000;

/// One renormalization shift of the interval.
enum Shift {
    /// The leading bit is decided; pending bits resolve to its opposite.
    Settled(u8),
    /// The interval straddles the midpoint; polarity stays pending.
    Straddle,
}

/// Shared renormalization: run both shift classes to exhaustion, applying
/// `apply` once per shift before `(bot, top)` move.
fn renormalize(
    bot: &mut u32,
    top: &mut u32,
    mut apply: impl FnMut(Shift) -> Result<()>,
) -> Result<()> {
    // Leading bits agree: shift them out, loading 1 into top and 0 into bot
    // so the interval keeps covering the same real sub-range.
    while (*bot ^ *top) & MSB == 0 {
        apply(Shift::Settled((*top >> 31) as u8))?;
        *top = (*top << 1) | 1;
        *bot <<= 1;
    }

    // top = 10.., bot = 01..: the second bits disagree the wrong way round.
    // Drop them, keeping the leading bits in place.
    while *top & SECOND == 0 && *bot & SECOND != 0 {
        apply(Shift::Straddle)?;
        *top = (*top << 1) | MSB | 1;
        *bot = (*bot << 1) & !MSB;
    }
    Ok(())
}

/// Arithmetic-coding encoder over a byte sink.
pub struct RangeEncoder<W: Write> {
    sink: BitWriter<W>,
    bot: u32,
    top: u32,
    pending: u32,
    poisoned: bool,
}

impl<W: Write> RangeEncoder<W> {
    /// Create an encoder writing coded bits to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink: BitWriter::new(sink),
            bot: 0,
            top: u32::MAX,
            pending: 0,
            poisoned: false,
        }
    }

    /// Encode one symbol against `model`.
    ///
    /// The caller owns model maintenance: any `update` the encoding side
    /// applies must be applied identically, at the same point in the symbol
    /// sequence, on the decoding side.
    ///
    /// # Errors
    /// Returns [`Error::Poisoned`] after any earlier failure, otherwise
    /// propagates sink I/O errors (which poison the encoder).
    pub fn encode(&mut self, model: &mut FrequencyModel, symbol: u8) -> Result<()> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }

        let prev_top = self.top;
        self.top = model.upper_bound(symbol, self.bot, self.top);
        self.bot = model.lower_bound(symbol, self.bot, prev_top);

        let Self {
            sink,
            bot,
            top,
            pending,
            ..
        } = self;
        let result = renormalize(bot, top, |shift| match shift {
            Shift::Settled(bit) => {
                sink.write_bit(bit)?;
                // Pending bits resolve to the opposite of the settled bit.
                while *pending > 0 {
                    sink.write_bit(bit ^ 1)?;
                    *pending -= 1;
                }
                Ok(())
            }
            Shift::Straddle => {
                *pending += 1;
                Ok(())
            }
        });

        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    /// Terminate the stream.
    ///
    /// Emits one definite 0 bit (a settled 0 would already have left the
    /// interval), resolves pending bits as 1s, then writes the remaining 31
    /// bits of `bot` to pin down the final interval and pads to a byte
    /// boundary. Returns the bit count `32 + pending + buffered` measured at
    /// entry, along with the sink.
    ///
    /// # Errors
    /// Returns [`Error::Poisoned`] after any earlier failure, otherwise
    /// propagates sink I/O errors.
    pub fn finish(mut self) -> Result<(u64, W)> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }

        let written = 32 + u64::from(self.pending) + u64::from(self.sink.buffered());

        self.sink.write_bit(0)?;
        while self.pending > 0 {
            self.sink.write_bit(1)?;
            self.pending -= 1;
        }
        for i in (0..31).rev() {
            self.sink.write_bit(((self.bot >> i) & 1) as u8)?;
        }
        self.sink.flush()?;

        Ok((written, self.sink.into_inner()))
    }
}

/// Arithmetic-coding decoder over a byte source.
pub struct RangeDecoder<R: Read> {
    source: BitReader<R>,
    code: u32,
    bot: u32,
    top: u32,
    poisoned: bool,
}

impl<R: Read> RangeDecoder<R> {
    /// Create a decoder, priming the 32-bit code value from the first four
    /// bytes of `source` (big-endian; a shorter source zero-pads and marks
    /// the decoder exhausted).
    ///
    /// # Errors
    /// Propagates source I/O errors.
    pub fn new(source: R) -> Result<Self> {
        let mut source = BitReader::new(source);
        let mut code = 0u32;
        for _ in 0..32 {
            code = (code << 1) | u32::from(source.read_bit()?);
        }
        Ok(Self {
            source,
            code,
            bot: 0,
            top: u32::MAX,
            poisoned: false,
        })
    }

    /// Decode one symbol against `model`.
    ///
    /// The caller must mirror the encoding side's model updates exactly, and
    /// must know independently when to stop (a terminator symbol in the
    /// decoded output, or an externally tracked symbol count); symbols
    /// decoded past that point are meaningless.
    ///
    /// # Errors
    /// Returns [`Error::Poisoned`] after any earlier failure, otherwise
    /// propagates source I/O errors (which poison the decoder). Running past
    /// end-of-input is not an error; see [`is_exhausted`](Self::is_exhausted).
    pub fn decode(&mut self, model: &mut FrequencyModel) -> Result<u8> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }

        let symbol = model.find_symbol(self.code, self.bot, self.top);
        let prev_top = self.top;
        self.top = model.upper_bound(symbol, self.bot, self.top);
        self.bot = model.lower_bound(symbol, self.bot, prev_top);

        let Self {
            source,
            code,
            bot,
            top,
            ..
        } = self;
        let result = renormalize(bot, top, |shift| {
            match shift {
                Shift::Settled(_) => {
                    *code = (*code << 1) | u32::from(source.read_bit()?);
                }
                Shift::Straddle => {
                    // The dropped second bit is the complement of the leading
                    // bit, so after the shift the new leading bit is inverted
                    // to restore the one that is still significant.
                    *code = ((*code << 1) ^ MSB) | u32::from(source.read_bit()?);
                }
            }
            Ok(())
        });

        if let Err(e) = result {
            self.poisoned = true;
            return Err(e);
        }
        Ok(symbol)
    }

    /// Whether bit refills have run past the end of the source.
    ///
    /// Some zero-bit padding at the tail is normal; once set, only the
    /// symbols the caller already knows to expect remain meaningful.
    pub fn is_exhausted(&self) -> bool {
        self.source.is_exhausted()
    }
}
