use std::fmt;

use lockstep_serde::{BitWriter, Serde};

use crate::{
    actions::{Action, ActionKinds, CaptureEnv},
    commands::{error::EncodeError, TraceNode},
};

/// Builds a command payload and its encode trace in one pass. Every value
/// written to the wire also records a labeled, human-readable node, so the
/// trace always matches the bytes.
pub struct CommandWriter {
    writer: BitWriter,
    root: TraceNode,
}

impl CommandWriter {
    pub fn new(label: &str) -> Self {
        Self {
            writer: BitWriter::new(),
            root: TraceNode::new(label),
        }
    }

    pub fn write<T: Serde + fmt::Debug>(&mut self, label: &str, value: &T) {
        self.root
            .add_child(TraceNode::new(format!("{label}: {value:?}")));
        value.ser(&mut self.writer);
    }

    pub fn write_action(
        &mut self,
        kinds: &ActionKinds,
        env: &dyn CaptureEnv,
        action: &dyn Action,
    ) -> Result<(), EncodeError> {
        self.root
            .add_child(TraceNode::new(format!("action: {}", action.name())));
        kinds.write(&mut self.writer, env, action)?;
        Ok(())
    }

    pub fn trace(&self) -> &TraceNode {
        &self.root
    }

    pub fn finalize(self) -> (Vec<u8>, TraceNode) {
        (self.writer.to_bytes(), self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::DesignateMode;
    use crate::world::Cell;

    #[test]
    fn trace_mirrors_writes() {
        let mut writer = CommandWriter::new("Designate single cell");
        writer.write("mode", &DesignateMode::SingleCell);
        writer.write("cell", &Cell::new(1, 2, 3));

        let (payload, trace) = writer.finalize();
        assert!(!payload.is_empty());
        assert_eq!(trace.label(), "Designate single cell");
        assert_eq!(trace.children().len(), 2);
        assert_eq!(trace.children()[0].label(), "mode: SingleCell");
    }
}
