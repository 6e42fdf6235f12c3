use crate::{
    actions::Action,
    types::ScopeId,
    world::{Cell, ObjectId},
};

/// The simulation engine's designation surface, as seen from the replay
/// path. The engine owns all world state; this crate only calls in with
/// decoded, byte-identical arguments, and only ever from inside a replay
/// window (every peer makes the same calls in the same order).
pub trait DesignateWorld {
    /// Whether `scope` still resolves to a live simulation partition.
    fn contains_scope(&self, scope: ScopeId) -> bool;

    /// Whether `object` still resolves to a live object within `scope`.
    fn resolve_object(&self, scope: ScopeId, object: ObjectId) -> bool;

    fn designate_single(&mut self, scope: ScopeId, action: &dyn Action, cell: Cell);

    fn designate_multi(&mut self, scope: ScopeId, action: &dyn Action, cells: &[Cell]);

    fn designate_object(&mut self, scope: ScopeId, action: &dyn Action, object: ObjectId);
}
