use lockstep_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

/// Stable identifier for a long-lived simulation object. References always
/// cross the wire as identifiers, never as anything tied to one peer's
/// memory; the receiving side resolves them against its own world and treats
/// a miss as a stale reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl Serde for ObjectId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value =
            u64::try_from(UnsignedVariableInteger::<7>::de(reader)?.get()).map_err(|_| SerdeErr)?;
        Ok(Self(value))
    }

    fn bit_length(&self) -> u32 {
        UnsignedVariableInteger::<7>::new(self.0).bit_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_serde::BitWriter;

    #[test]
    fn read_write_object_id() {
        for id in [ObjectId::new(0), ObjectId::new(391), ObjectId::new(u64::MAX)] {
            let mut writer = BitWriter::new();
            id.ser(&mut writer);

            let buffer = writer.to_bytes();
            let mut reader = BitReader::new(&buffer);
            assert_eq!(ObjectId::de(&mut reader).unwrap(), id);
        }
    }
}
