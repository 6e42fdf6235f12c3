/// Identifier of a simulation partition (a map) a command applies to.
pub type ScopeId = u32;

/// Wire tag assigned to a registered action kind.
pub type ActionNetId = u16;
