//! The built-in designation actions. Engines with their own action set can
//! skip these and register their own types instead.

use std::any::Any;

use lockstep_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    actions::{Action, ActionBuilder, ActionKind, CaptureEnv, Named},
    world::{ObjectId, Rot4},
};

/// Applies a designation (mine, chop, haul, cancel) to one or more cells.
pub struct DesignateCells {
    /// Index of the designation definition in the shared definition table.
    pub designation: u16,
}

impl Named for DesignateCells {
    fn name(&self) -> String {
        format!("DesignateCells({})", self.designation)
    }
}

impl Action for DesignateCells {
    fn kind(&self) -> ActionKind {
        ActionKind::of::<Self>()
    }

    fn write_fields(&self, writer: &mut dyn BitWrite, _env: &dyn CaptureEnv) {
        self.designation.ser(writer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_builder() -> Box<dyn ActionBuilder> {
        Box::new(DesignateCellsBuilder)
    }
}

struct DesignateCellsBuilder;

impl ActionBuilder for DesignateCellsBuilder {
    fn read(&self, reader: &mut BitReader) -> Result<Box<dyn Action>, SerdeErr> {
        let designation = u16::de(reader)?;
        Ok(Box::new(DesignateCells { designation }))
    }
}

/// Paints cells into a named allowed area, or erases them when `area` is
/// `None`.
pub struct SetAllowedArea {
    /// Index of the target area, `None` to clear.
    pub area: Option<u32>,
}

impl Named for SetAllowedArea {
    fn name(&self) -> String {
        match self.area {
            Some(area) => format!("SetAllowedArea({area})"),
            None => "SetAllowedArea(clear)".to_string(),
        }
    }
}

impl Action for SetAllowedArea {
    fn kind(&self) -> ActionKind {
        ActionKind::of::<Self>()
    }

    fn write_fields(&self, writer: &mut dyn BitWrite, _env: &dyn CaptureEnv) {
        self.area.ser(writer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_builder() -> Box<dyn ActionBuilder> {
        Box::new(SetAllowedAreaBuilder)
    }
}

struct SetAllowedAreaBuilder;

impl ActionBuilder for SetAllowedAreaBuilder {
    fn read(&self, reader: &mut BitReader) -> Result<Box<dyn Action>, SerdeErr> {
        let area = Option::<u32>::de(reader)?;
        Ok(Box::new(SetAllowedArea { area }))
    }
}

/// Places a building blueprint with an orientation and an optional material.
pub struct PlaceBuilding {
    /// Index of the building definition in the shared definition table.
    pub building: u16,
    pub rot: Rot4,
    /// Material definition index, for buildings built from a stuff. `None`
    /// for buildings with a fixed material.
    pub material: Option<u16>,
}

impl Named for PlaceBuilding {
    fn name(&self) -> String {
        format!("PlaceBuilding({})", self.building)
    }
}

impl Action for PlaceBuilding {
    fn kind(&self) -> ActionKind {
        ActionKind::of::<Self>()
    }

    fn write_fields(&self, writer: &mut dyn BitWrite, _env: &dyn CaptureEnv) {
        self.building.ser(writer);
        self.rot.ser(writer);
        self.material.ser(writer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_builder() -> Box<dyn ActionBuilder> {
        Box::new(PlaceBuildingBuilder)
    }
}

struct PlaceBuildingBuilder;

impl ActionBuilder for PlaceBuildingBuilder {
    fn read(&self, reader: &mut BitReader) -> Result<Box<dyn Action>, SerdeErr> {
        let building = u16::de(reader)?;
        let rot = Rot4::de(reader)?;
        let material = Option::<u16>::de(reader)?;
        Ok(Box::new(PlaceBuilding {
            building,
            rot,
            material,
        }))
    }
}

/// Reinstalls a previously built object at a new position.
///
/// The target is usually implied by the frontend's current selection rather
/// than held by the action itself, so capture resolves it through the
/// `CaptureEnv` and bakes the result into the payload.
pub struct InstallObject {
    /// Explicit target. When `None`, capture falls back to the environment's
    /// selected object.
    pub target: Option<ObjectId>,
}

impl Named for InstallObject {
    fn name(&self) -> String {
        "InstallObject".to_string()
    }
}

impl Action for InstallObject {
    fn kind(&self) -> ActionKind {
        ActionKind::of::<Self>()
    }

    fn write_fields(&self, writer: &mut dyn BitWrite, env: &dyn CaptureEnv) {
        self.target.or(env.selected_install_target()).ser(writer);
    }

    fn install_target(&self) -> Option<ObjectId> {
        self.target
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_builder() -> Box<dyn ActionBuilder> {
        Box::new(InstallObjectBuilder)
    }
}

struct InstallObjectBuilder;

impl ActionBuilder for InstallObjectBuilder {
    fn read(&self, reader: &mut BitReader) -> Result<Box<dyn Action>, SerdeErr> {
        let target = Option::<ObjectId>::de(reader)?;
        Ok(Box::new(InstallObject { target }))
    }
}
