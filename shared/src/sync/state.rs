use std::cell::Cell;

use crate::{types::ScopeId, world::ObjectId};

/// The flags that distinguish "replaying a delivered command" from "the
/// local player is acting", plus the context overrides replay pins while a
/// world call runs.
///
/// All fields are scoped: a guard raises them and its `Drop` restores the
/// previous value, so nesting and early returns both unwind correctly.
/// State is single-threaded by contract. Replay happens at one point in the
/// frame; an embedding that replays from multiple threads needs its own
/// serialization point in front of this type.
#[derive(Debug, Default)]
pub struct SyncState {
    replaying: Cell<bool>,
    scope_override: Cell<Option<ScopeId>>,
    suppress_scope_switch: Cell<bool>,
    install_override: Cell<Option<ObjectId>>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a delivered command is currently being applied. While true,
    /// interception must stand down or replay would capture its own calls.
    pub fn replaying(&self) -> bool {
        self.replaying.get()
    }

    /// The scope the current command addresses, when replaying; `natural`
    /// otherwise. Frontends route "which map am I looking at" through here
    /// so replay affects the command's map, not the viewer's.
    pub fn active_scope(&self, natural: ScopeId) -> ScopeId {
        self.scope_override.get().unwrap_or(natural)
    }

    pub fn scope_override(&self) -> Option<ScopeId> {
        self.scope_override.get()
    }

    /// While a scope override is held, the frontend must not treat scope
    /// reads as a user-driven view change (no camera jumps).
    pub fn suppress_scope_switch(&self) -> bool {
        self.suppress_scope_switch.get()
    }

    /// One-shot form of [`SyncState::suppress_scope_switch`]: reads and
    /// clears the flag. Frontends whose scope-change handler fires once per
    /// switch call this from that handler, so the one replay-driven switch
    /// is absorbed and the next real one reports normally.
    pub fn absorb_scope_switch(&self) -> bool {
        self.suppress_scope_switch.replace(false)
    }

    /// The install target the current command decoded, when replaying;
    /// `natural` (the local selection) otherwise.
    pub fn install_target(&self, natural: Option<ObjectId>) -> Option<ObjectId> {
        self.install_override.get().or(natural)
    }
}

/// Raises the replay gate for its lifetime.
pub struct ReplayGuard<'a> {
    state: &'a SyncState,
    previous: bool,
}

impl<'a> ReplayGuard<'a> {
    pub fn new(state: &'a SyncState) -> Self {
        let previous = state.replaying.replace(true);
        Self { state, previous }
    }
}

impl Drop for ReplayGuard<'_> {
    fn drop(&mut self) {
        self.state.replaying.set(self.previous);
    }
}

/// Pins the active scope to a command's target for its lifetime, and marks
/// scope reads as non-user-driven while held.
pub struct ScopeOverrideGuard<'a> {
    state: &'a SyncState,
    previous_scope: Option<ScopeId>,
    previous_suppress: bool,
}

impl<'a> ScopeOverrideGuard<'a> {
    pub fn new(state: &'a SyncState, scope: ScopeId) -> Self {
        let previous_scope = state.scope_override.replace(Some(scope));
        let previous_suppress = state.suppress_scope_switch.replace(true);
        Self {
            state,
            previous_scope,
            previous_suppress,
        }
    }
}

impl Drop for ScopeOverrideGuard<'_> {
    fn drop(&mut self) {
        self.state.scope_override.set(self.previous_scope);
        self.state.suppress_scope_switch.set(self.previous_suppress);
    }
}

/// Pins the install target to a command's decoded object for its lifetime.
pub struct InstallOverrideGuard<'a> {
    state: &'a SyncState,
    previous: Option<ObjectId>,
}

impl<'a> InstallOverrideGuard<'a> {
    pub fn new(state: &'a SyncState, target: ObjectId) -> Self {
        let previous = state.install_override.replace(Some(target));
        Self { state, previous }
    }
}

impl Drop for InstallOverrideGuard<'_> {
    fn drop(&mut self) {
        self.state.install_override.set(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_guard_restores_on_drop() {
        let state = SyncState::new();
        assert!(!state.replaying());
        {
            let _guard = ReplayGuard::new(&state);
            assert!(state.replaying());
        }
        assert!(!state.replaying());
    }

    #[test]
    fn replay_guards_nest() {
        let state = SyncState::new();
        {
            let _outer = ReplayGuard::new(&state);
            {
                let _inner = ReplayGuard::new(&state);
                assert!(state.replaying());
            }
            assert!(state.replaying());
        }
        assert!(!state.replaying());
    }

    #[test]
    fn scope_override_guard_sets_and_restores() {
        let state = SyncState::new();
        assert_eq!(state.active_scope(5), 5);
        assert!(!state.suppress_scope_switch());
        {
            let _guard = ScopeOverrideGuard::new(&state, 12);
            assert_eq!(state.active_scope(5), 12);
            assert!(state.suppress_scope_switch());
        }
        assert_eq!(state.active_scope(5), 5);
        assert!(!state.suppress_scope_switch());
    }

    #[test]
    fn absorb_scope_switch_consumes_the_flag() {
        let state = SyncState::new();
        {
            let _guard = ScopeOverrideGuard::new(&state, 4);
            // First observer of the switch absorbs it.
            assert!(state.absorb_scope_switch());
            // A second switch in the same window is a real one.
            assert!(!state.absorb_scope_switch());
            assert!(!state.suppress_scope_switch());
        }
        assert!(!state.absorb_scope_switch());
    }

    #[test]
    fn install_override_guard_shadows_natural_selection() {
        let state = SyncState::new();
        let natural = Some(ObjectId::new(1));
        assert_eq!(state.install_target(natural), natural);
        {
            let _guard = InstallOverrideGuard::new(&state, ObjectId::new(9));
            assert_eq!(state.install_target(natural), Some(ObjectId::new(9)));
            assert_eq!(state.install_target(None), Some(ObjectId::new(9)));
        }
        assert_eq!(state.install_target(natural), natural);
    }
}
