use log::warn;

use crate::{
    actions::{Action, CaptureEnv},
    commands::{CommandKind, CommandWriter, DesignateMode},
    sync::SyncSession,
    types::ScopeId,
    world::{Cell, ObjectId},
};

/// The interception decision for one local action.
#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum Verdict {
    /// Not captured: let the engine's own designation path run directly.
    Passthrough,
    /// Captured: the command was encoded and handed to the transport, and
    /// the engine's direct path must be skipped. The mutation happens later,
    /// when the command comes back through the replay path.
    Captured,
}

impl Verdict {
    pub fn captured(&self) -> bool {
        matches!(self, Verdict::Captured)
    }
}

impl SyncSession {
    /// Intercepts a single-cell designation before it mutates the world.
    pub fn intercept_single(
        &mut self,
        scope: ScopeId,
        action: &dyn Action,
        cell: Cell,
        env: &mut dyn CaptureEnv,
    ) -> Verdict {
        if !self.should_sync() || !action.relevant_to_sync() {
            return Verdict::Passthrough;
        }

        let mut writer = CommandWriter::new(&format!("Designate single cell: {}", action.name()));
        writer.write("mode", &DesignateMode::SingleCell);
        if self.write_action_or_bail(&mut writer, env, action) {
            return Verdict::Captured;
        }
        writer.write("cell", &cell);

        self.capture(scope, writer);
        Verdict::Captured
    }

    /// Intercepts a multi-cell designation before it mutates the world.
    pub fn intercept_multi(
        &mut self,
        scope: ScopeId,
        action: &dyn Action,
        cells: &[Cell],
        env: &mut dyn CaptureEnv,
    ) -> Verdict {
        if !self.should_sync() {
            return Verdict::Passthrough;
        }
        if cells.is_empty() {
            // An empty set finalizes with no effect; not worth an ordering
            // slot.
            return Verdict::Passthrough;
        }
        if !action.relevant_to_sync() {
            return Verdict::Passthrough;
        }

        let mut writer = CommandWriter::new(&format!("Designate multiple cells: {}", action.name()));
        writer.write("mode", &DesignateMode::MultiCell);
        if self.write_action_or_bail(&mut writer, env, action) {
            return Verdict::Captured;
        }
        writer.write("cells", &cells.to_vec());

        self.capture(scope, writer);
        Verdict::Captured
    }

    /// Intercepts an object-targeted designation before it mutates the
    /// world.
    pub fn intercept_object(
        &mut self,
        scope: ScopeId,
        action: &dyn Action,
        object: ObjectId,
        env: &mut dyn CaptureEnv,
    ) -> Verdict {
        if !self.should_sync() || !action.relevant_to_sync() {
            return Verdict::Passthrough;
        }

        let mut writer = CommandWriter::new(&format!("Designate object: {}", action.name()));
        writer.write("mode", &DesignateMode::Object);
        if self.write_action_or_bail(&mut writer, env, action) {
            return Verdict::Captured;
        }
        writer.write("object", &object);

        self.capture(scope, writer);

        // Feedback stays on the capturing peer; replay does not repeat it.
        env.visual_feedback(object);

        Verdict::Captured
    }

    /// Whether a designation tool's finalization step (deselect, close the
    /// tool) may run. Locally-issued work has not applied yet at capture
    /// time, so success-driven finalization must wait for the replay.
    pub fn finalize_allowed(&self, something_succeeded: bool) -> bool {
        if !self.active {
            return true;
        }
        !something_succeeded || self.state.replaying()
    }

    /// Returns true if encoding failed and the command must be dropped. The
    /// drop still counts as a capture: letting the engine's direct path run
    /// after a failed encode would fork this peer's state from the others.
    fn write_action_or_bail(
        &mut self,
        writer: &mut CommandWriter,
        env: &dyn CaptureEnv,
        action: &dyn Action,
    ) -> bool {
        if let Err(error) = writer.write_action(&self.protocol.action_kinds, env, action) {
            warn!("failed to encode action {}: {}", action.name(), error);
            return true;
        }
        false
    }

    fn capture(&mut self, scope: ScopeId, writer: CommandWriter) {
        let (payload, trace) = writer.finalize();
        self.trace_log.append(trace);
        self.dispatcher.send(scope, CommandKind::Designator, payload);
    }
}
