//! engine::gate
//!
//! Authorization gating for commands.
//!
//! # Architecture
//!
//! Commands marked `auth_required` are hidden and refused while the
//! current session is not authorized. The forest never stores this
//! state; it asks an [`Authorizer`] every time a node is visited, so a
//! login or logout takes effect on the very next line.
//!
//! [`Session`] is the in-process authorizer used by the console. Other
//! collaborators can supply their own implementation.
//!
//! # Invariants
//!
//! - Gating never changes the forest
//! - The same session state always produces the same gating decision
//!
//! # Example
//!
//! ```
//! use ecoshell::engine::gate::{Authorizer, Session};
//!
//! let mut session = Session::new();
//! assert!(!session.is_authorized());
//!
//! session.login("ada");
//! assert!(session.is_authorized());
//! assert_eq!(session.user(), Some("ada"));
//!
//! assert_eq!(session.logout().as_deref(), Some("ada"));
//! assert!(!session.is_authorized());
//! ```

/// Source of the "is the current session authorized" decision.
pub trait Authorizer {
    fn is_authorized(&self) -> bool;
}

/// In-memory login state for one console session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    /// Create an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `user` as logged in, replacing any previous user.
    pub fn login(&mut self, user: impl Into<String>) {
        self.user = Some(user.into());
    }

    /// Clear the session, returning who was logged in.
    pub fn logout(&mut self) -> Option<String> {
        self.user.take()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

impl Authorizer for Session {
    fn is_authorized(&self) -> bool {
        self.user.is_some()
    }
}
