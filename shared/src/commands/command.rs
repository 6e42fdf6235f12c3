use lockstep_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr, UnsignedInteger};

use crate::types::ScopeId;

/// Top-level discriminant for a command payload. Designations are the only
/// kind this crate captures; the byte-wide tag leaves room for an embedding
/// engine's other command families.
#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum CommandKind {
    Designator,
}

impl Serde for CommandKind {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let index = match self {
            CommandKind::Designator => 0,
        };
        UnsignedInteger::<8>::new(index).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match UnsignedInteger::<8>::de(reader)?.get() {
            0 => Ok(CommandKind::Designator),
            _ => Err(SerdeErr),
        }
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for CommandKind {
    fn const_bit_length() -> u32 {
        8
    }
}

/// One captured command, addressed to a scope, carrying a canonical payload.
///
/// The payload bytes are final at capture time. The transport must deliver
/// commands to every peer in the same order; beyond that it never inspects
/// or rewrites them. Transports that move raw bytes frame the whole command
/// through its own `Serde` impl: scope, then the kind tag, then the
/// length-prefixed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub scope: ScopeId,
    pub kind: CommandKind,
    pub payload: Vec<u8>,
}

impl Serde for Command {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.scope.ser(writer);
        self.kind.ser(writer);
        self.payload.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            scope: ScopeId::de(reader)?,
            kind: CommandKind::de(reader)?,
            payload: Vec::<u8>::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.scope.bit_length() + self.kind.bit_length() + self.payload.bit_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_serde::BitWriter;

    #[test]
    fn read_write_command_kind() {
        let mut writer = BitWriter::new();
        CommandKind::Designator.ser(&mut writer);

        let buffer = writer.to_bytes();
        let mut reader = BitReader::new(&buffer);
        assert_eq!(CommandKind::de(&mut reader).unwrap(), CommandKind::Designator);
    }

    #[test]
    fn unknown_command_kind_errors() {
        let buffer = vec![0xFF];
        let mut reader = BitReader::new(&buffer);
        assert!(CommandKind::de(&mut reader).is_err());
    }

    #[test]
    fn read_write_command_frame() {
        let command = Command {
            scope: 12,
            kind: CommandKind::Designator,
            payload: vec![0x01, 0xAB, 0x00],
        };

        let mut writer = BitWriter::new();
        command.ser(&mut writer);
        assert_eq!(command.bit_length(), writer.bits_written());

        let buffer = writer.to_bytes();
        let mut reader = BitReader::new(&buffer);
        assert_eq!(Command::de(&mut reader).unwrap(), command);
    }
}
