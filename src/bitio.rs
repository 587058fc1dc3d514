//! Bit-granular stream adapters.
//!
//! The coded payload is bit-exact and most-significant-bit first, so both
//! coders work through a one-byte buffer with a cursor rather than touching
//! the underlying stream directly. [`BitWriter`] and [`BitReader`] own that
//! buffer plus the stream.

use std::io::{ErrorKind, Read, Write};

use crate::error::Result;

/// MSB-first bit writer over any byte sink.
pub struct BitWriter<W: Write> {
    sink: W,
    buf: u8,
    used: u8,
}

impl<W: Write> BitWriter<W> {
    /// Wrap a byte sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            buf: 0,
            used: 0,
        }
    }

    /// Append the low bit of `bit`, writing a byte out once eight accumulate.
    ///
    /// # Errors
    /// Propagates sink I/O errors.
    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        self.buf |= (bit & 1) << (7 - self.used);
        self.used += 1;
        if self.used == 8 {
            self.sink.write_all(&[self.buf])?;
            self.buf = 0;
            self.used = 0;
        }
        Ok(())
    }

    /// Number of bits waiting in the partial byte.
    pub fn buffered(&self) -> u8 {
        self.used
    }

    /// Write out any partial byte, zero-padded at the low end, and flush the
    /// sink.
    ///
    /// # Errors
    /// Propagates sink I/O errors.
    pub fn flush(&mut self) -> Result<()> {
        if self.used > 0 {
            self.sink.write_all(&[self.buf])?;
            self.buf = 0;
            self.used = 0;
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Give back the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// MSB-first bit reader over any byte source.
///
/// Reading past the end of the source is not an error: the reader hands back
/// zero bits and sets a sticky exhaustion flag. The encoder finishes a stream
/// with a finite tail, so a decoder resolving its last symbols legitimately
/// shifts in a few bits that were never written.
pub struct BitReader<R: Read> {
    source: R,
    buf: u8,
    left: u8,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Wrap a byte source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            buf: 0,
            left: 0,
            exhausted: false,
        }
    }

    /// Consume one bit, refilling from the source when the buffer runs dry.
    ///
    /// Past end-of-input this returns `0` and marks the reader exhausted.
    ///
    /// # Errors
    /// Propagates source I/O errors other than clean end-of-input.
    pub fn read_bit(&mut self) -> Result<u8> {
        if self.left == 0 {
            if self.exhausted || !self.refill()? {
                self.exhausted = true;
                return Ok(0);
            }
        }
        self.left -= 1;
        Ok((self.buf >> self.left) & 1)
    }

    /// Whether a read has already run past the end of the source.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn refill(&mut self) -> Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.buf = byte[0];
                    self.left = 8;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_msb_first_and_pads_with_zeros() {
        let mut w = BitWriter::new(Vec::new());
        for bit in [1, 0, 1, 1, 0, 0, 1, 0, 1, 1] {
            w.write_bit(bit).unwrap();
        }
        assert_eq!(w.buffered(), 2);
        w.flush().unwrap();
        assert_eq!(w.buffered(), 0);
        assert_eq!(w.into_inner(), vec![0b1011_0010, 0b1100_0000]);
    }

    #[test]
    fn reads_msb_first() {
        let mut r = BitReader::new(Cursor::new(vec![0b1011_0010]));
        let bits: Vec<u8> = (0..8).map(|_| r.read_bit().unwrap()).collect();
        assert_eq!(bits, vec![1, 0, 1, 1, 0, 0, 1, 0]);
        assert!(!r.is_exhausted());
    }

    #[test]
    fn exhausted_reader_yields_zero_bits() {
        let mut r = BitReader::new(Cursor::new(vec![0xFF]));
        for _ in 0..8 {
            assert_eq!(r.read_bit().unwrap(), 1);
        }
        assert_eq!(r.read_bit().unwrap(), 0);
        assert!(r.is_exhausted());
        assert_eq!(r.read_bit().unwrap(), 0);
    }

    #[test]
    fn writer_reader_roundtrip() {
        let bits: Vec<u8> = (0..50).map(|i| ((i * 7) % 3 == 0) as u8).collect();
        let mut w = BitWriter::new(Vec::new());
        for &b in &bits {
            w.write_bit(b).unwrap();
        }
        w.flush().unwrap();

        let mut r = BitReader::new(Cursor::new(w.into_inner()));
        for &b in &bits {
            assert_eq!(r.read_bit().unwrap(), b);
        }
    }
}
