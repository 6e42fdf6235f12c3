mod interceptor;
mod session;
mod state;

pub use interceptor::Verdict;
pub use session::SyncSession;
pub use state::{InstallOverrideGuard, ReplayGuard, ScopeOverrideGuard, SyncState};
