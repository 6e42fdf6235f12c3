//! # Lockstep Serde
//! A deterministic, machine-independent bit-level serialization layer for
//! lockstep command payloads. The same logical value always encodes to the
//! same bytes, regardless of host, locale, or object identity.

mod bit_reader;
mod bit_writer;
mod error;
mod integer;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::{BitCounter, BitWrite, BitWriter};
pub use error::SerdeErr;
pub use integer::{
    SerdeInteger, SignedInteger, SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};
pub use serde::{ConstBitLength, Serde};
