use lockstep_serde::{
    BitReader, BitWrite, ConstBitLength, Serde, SerdeErr, SignedVariableInteger, UnsignedInteger,
};

/// A map coordinate triple. Encodes via signed varints: designations cluster
/// near the origin of whatever region a player is working in, so most
/// coordinates stay in one group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Serde for Cell {
    fn ser(&self, writer: &mut dyn BitWrite) {
        SignedVariableInteger::<7>::new(self.x).ser(writer);
        SignedVariableInteger::<7>::new(self.y).ser(writer);
        SignedVariableInteger::<7>::new(self.z).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let x = i32::try_from(SignedVariableInteger::<7>::de(reader)?.get()).map_err(|_| SerdeErr)?;
        let y = i32::try_from(SignedVariableInteger::<7>::de(reader)?.get()).map_err(|_| SerdeErr)?;
        let z = i32::try_from(SignedVariableInteger::<7>::de(reader)?.get()).map_err(|_| SerdeErr)?;
        Ok(Self { x, y, z })
    }

    fn bit_length(&self) -> u32 {
        SignedVariableInteger::<7>::new(self.x).bit_length()
            + SignedVariableInteger::<7>::new(self.y).bit_length()
            + SignedVariableInteger::<7>::new(self.z).bit_length()
    }
}

/// Four-step rotation for placeable structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rot4 {
    North,
    East,
    South,
    West,
}

impl Serde for Rot4 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let index = match self {
            Rot4::North => 0,
            Rot4::East => 1,
            Rot4::South => 2,
            Rot4::West => 3,
        };
        UnsignedInteger::<2>::new(index).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match UnsignedInteger::<2>::de(reader)?.get() {
            0 => Ok(Rot4::North),
            1 => Ok(Rot4::East),
            2 => Ok(Rot4::South),
            3 => Ok(Rot4::West),
            _ => Err(SerdeErr),
        }
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for Rot4 {
    fn const_bit_length() -> u32 {
        2
    }
}
