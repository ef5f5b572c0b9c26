//! Navigation collaborator for ending an authenticated session.

/// Moves the user to the login boundary once the session cannot be recovered.
///
/// Implementations must tolerate repeated calls; the session layer only
/// guarantees one call per failed refresh cycle, not one call overall.
pub trait SessionNavigator: Send + Sync {
    /// End the authenticated session (redirect, exit the view, etc.).
    fn terminate(&self);
}
