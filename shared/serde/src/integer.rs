use crate::{
    bit_reader::BitReader,
    bit_writer::BitWrite,
    error::SerdeErr,
    serde::{ConstBitLength, Serde},
};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<false, true, BITS>;
pub type SignedVariableInteger<const BITS: u8> = SerdeInteger<true, true, BITS>;

/// An integer with an explicit wire budget. Fixed-width values spend exactly
/// `BITS` bits; variable-width values spend `BITS`-bit groups, each preceded
/// by a continuation bit, so small values stay small on the wire.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    value: i128,
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> SerdeInteger<SIGNED, VARIABLE, BITS> {
    pub fn new<T: Into<i128>>(value: T) -> Self {
        let value = value.into();

        assert!(BITS > 0, "can't create an integer with 0 bits");
        assert!(BITS < 128, "can't create an integer with 128 or more bits");

        if !SIGNED && value < 0 {
            panic!("can't encode a negative number with an unsigned integer");
        }

        if !VARIABLE {
            let max = 1_u128 << BITS;
            if value.unsigned_abs() >= max {
                panic!(
                    "value `{}` does not fit in {} fixed bits (magnitude limit is {})",
                    value,
                    BITS,
                    max - 1
                );
            }
        }

        Self { value }
    }

    pub fn get(&self) -> i128 {
        self.value
    }

    pub fn set<T: Into<i128>>(&mut self, value: T) {
        self.value = value.into();
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> Serde
    for SerdeInteger<SIGNED, VARIABLE, BITS>
{
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut remaining = self.value.unsigned_abs();

        if SIGNED {
            writer.write_bit(self.value < 0);
        }

        if VARIABLE {
            loop {
                let proceed = remaining >= 1_u128 << BITS;
                writer.write_bit(proceed);
                for _ in 0..BITS {
                    writer.write_bit(remaining & 1 != 0);
                    remaining >>= 1;
                }
                if !proceed {
                    return;
                }
            }
        } else {
            for _ in 0..BITS {
                writer.write_bit(remaining & 1 != 0);
                remaining >>= 1;
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let negative = if SIGNED { reader.read_bit()? } else { false };

        let mut value: u128 = 0;
        let mut shift: u32 = 0;

        if VARIABLE {
            loop {
                let proceed = reader.read_bit()?;
                for _ in 0..BITS {
                    if reader.read_bit()? {
                        // A set bit this high cannot be represented; the
                        // stream is malformed rather than merely large.
                        if shift > 126 {
                            return Err(SerdeErr);
                        }
                        value |= 1 << shift;
                    }
                    shift = shift.saturating_add(1);
                }
                if !proceed {
                    break;
                }
            }
        } else {
            for _ in 0..BITS {
                if reader.read_bit()? {
                    value |= 1 << shift;
                }
                shift += 1;
            }
        }

        let value = value as i128;
        Ok(Self {
            value: if negative { -value } else { value },
        })
    }

    fn bit_length(&self) -> u32 {
        let mut output: u32 = 0;

        if SIGNED {
            output += 1;
        }

        if VARIABLE {
            let mut value = self.value.unsigned_abs();
            loop {
                output += 1 + BITS as u32;
                value >>= BITS;
                if value == 0 {
                    break;
                }
            }
        } else {
            output += BITS as u32;
        }

        output
    }
}

impl<const SIGNED: bool, const BITS: u8> ConstBitLength for SerdeInteger<SIGNED, false, BITS> {
    fn const_bit_length() -> u32 {
        let mut output: u32 = 0;
        if SIGNED {
            output += 1;
        }
        output + BITS as u32
    }
}
