use lockstep_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr, UnsignedInteger};

/// Which targeting shape a designation payload carries. Written first in
/// every designator payload so replay knows what arguments to read.
#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum DesignateMode {
    SingleCell,
    MultiCell,
    Object,
}

impl Serde for DesignateMode {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let index = match self {
            DesignateMode::SingleCell => 0,
            DesignateMode::MultiCell => 1,
            DesignateMode::Object => 2,
        };
        UnsignedInteger::<2>::new(index).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match UnsignedInteger::<2>::de(reader)?.get() {
            0 => Ok(DesignateMode::SingleCell),
            1 => Ok(DesignateMode::MultiCell),
            2 => Ok(DesignateMode::Object),
            _ => Err(SerdeErr),
        }
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for DesignateMode {
    fn const_bit_length() -> u32 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_serde::BitWriter;

    #[test]
    fn read_write_designate_mode() {
        for mode in [
            DesignateMode::SingleCell,
            DesignateMode::MultiCell,
            DesignateMode::Object,
        ] {
            let mut writer = BitWriter::new();
            mode.ser(&mut writer);

            let buffer = writer.to_bytes();
            let mut reader = BitReader::new(&buffer);
            assert_eq!(DesignateMode::de(&mut reader).unwrap(), mode);
        }
    }

    #[test]
    fn reserved_mode_index_errors() {
        // Index 3 is unassigned.
        let mut writer = BitWriter::new();
        UnsignedInteger::<2>::new(3).ser(&mut writer);

        let buffer = writer.to_bytes();
        let mut reader = BitReader::new(&buffer);
        assert!(DesignateMode::de(&mut reader).is_err());
    }
}
