/// A sink for individual bits. Values serialize themselves through this
/// trait so that writers with different backing stores stay interchangeable.
pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);
    fn write_byte(&mut self, byte: u8);
}

/// A growable bit-level writer. Bits are packed least-significant-first
/// within each byte; a trailing partial byte is zero-padded on finalization,
/// which keeps the output deterministic for any bit count.
pub struct BitWriter {
    scratch: u8,
    scratch_index: u8,
    buffer: Vec<u8>,
    bits_written: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer: Vec::with_capacity(64),
            bits_written: 0,
        }
    }

    pub fn bits_written(&self) -> u32 {
        self.bits_written
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        self.flush_scratch();
        self.buffer
    }

    fn flush_scratch(&mut self) {
        if self.scratch_index > 0 {
            let byte = (self.scratch << (8 - self.scratch_index)).reverse_bits();
            self.buffer.push(byte);
            self.scratch = 0;
            self.scratch_index = 0;
        }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// A `BitWrite` that measures instead of storing. Serializing into a
/// counter yields the exact bit cost of a value without allocating, which
/// is how variable-width encodes are sized ahead of time.
pub struct BitCounter {
    bits: u32,
}

impl BitCounter {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }
}

impl Default for BitCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWrite for BitCounter {
    fn write_bit(&mut self, _bit: bool) {
        self.bits += 1;
    }

    fn write_byte(&mut self, _byte: u8) {
        self.bits += 8;
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        self.scratch <<= 1;

        if bit {
            self.scratch |= 1;
        }

        self.scratch_index += 1;
        self.bits_written += 1;

        if self.scratch_index >= 8 {
            self.buffer.push(self.scratch.reverse_bits());
            self.scratch_index = 0;
            self.scratch = 0;
        }
    }

    fn write_byte(&mut self, byte: u8) {
        let mut temp = byte;
        for _ in 0..8 {
            self.write_bit(temp & 1 != 0);
            temp >>= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_identity() {
        let mut writer = BitWriter::new();

        writer.write_byte(0b1010_1010);
        writer.write_byte(0x3C);

        let bytes = writer.to_bytes();
        assert_eq!(bytes, vec![0b1010_1010, 0x3C]);
    }

    #[test]
    fn bits_pack_lsb_first() {
        let mut writer = BitWriter::new();

        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bit(true);

        let bytes = writer.to_bytes();
        assert_eq!(bytes, vec![0b0000_0101]);
    }

    #[test]
    fn partial_byte_is_zero_padded() {
        let mut writer = BitWriter::new();

        writer.write_bit(true);
        assert_eq!(writer.bits_written(), 1);

        let bytes = writer.to_bytes();
        assert_eq!(bytes, vec![0b0000_0001]);
    }

    #[test]
    fn counter_matches_writer() {
        let mut writer = BitWriter::new();
        let mut counter = BitCounter::new();

        for sink in [&mut writer as &mut dyn BitWrite, &mut counter] {
            sink.write_bit(true);
            sink.write_byte(0xA7);
            sink.write_bit(false);
            sink.write_bit(true);
        }

        assert_eq!(counter.bits(), writer.bits_written());
    }

    #[test]
    fn grows_past_any_fixed_buffer() {
        let mut writer = BitWriter::new();

        for _ in 0..10_000 {
            writer.write_byte(0xFF);
        }

        let bytes = writer.to_bytes();
        assert_eq!(bytes.len(), 10_000);
        assert!(bytes.iter().all(|&b| b == 0xFF));
    }
}
