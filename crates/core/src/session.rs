//! The session state machine.
//!
//! A [`Session`] is the single source of truth for "who is the current
//! actor". It starts `Initializing`, becomes `Ready` after the first
//! restore attempt (success or failure), and is only ever mutated through
//! the named transitions here: [`Session::restore`],
//! [`Session::establish`], [`Session::logout`] and [`Session::teardown`].
//! Authorization flags are computed on read, never stored.

use crate::credential::{self, CredentialStore};
use crate::types::{Role, UserProfile};

/// Lifecycle status of the session.
///
/// `Initializing` only exists before the first restore attempt completes;
/// `Ready` is terminal for the life of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Ready,
}

/// The current actor and the session lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    current_user: Option<UserProfile>,
    status: SessionStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session, before any restore attempt.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current_user: None,
            status: SessionStatus::Initializing,
        }
    }

    /// Restore the session from the persisted credential pair.
    ///
    /// Trusts locally persisted data; does not contact the backend. A
    /// partial or malformed pair is self-healed by clearing the store and
    /// leaving the session unauthenticated. Always lands on `Ready` and
    /// never fails.
    pub fn restore(store: &mut dyn CredentialStore) -> Self {
        let current_user = match store.snapshot().interpret() {
            Ok(Some(cred)) => Some(cred.user),
            Ok(None) => None,
            Err(_) => {
                // Indistinguishable from "never logged in" for the user,
                // so heal silently.
                credential::clear(store);
                None
            }
        };

        Self {
            current_user,
            status: SessionStatus::Ready,
        }
    }

    /// Apply a successful login or registration.
    ///
    /// Persists the token/profile pair and replaces the current actor.
    pub fn establish(&mut self, store: &mut dyn CredentialStore, token: &str, profile: UserProfile) {
        credential::persist(store, token, &profile);
        self.current_user = Some(profile);
        self.status = SessionStatus::Ready;
    }

    /// Log out: clear the actor and the persisted pair.
    ///
    /// Synchronous, infallible, no backend call.
    pub fn logout(&mut self, store: &mut dyn CredentialStore) {
        credential::clear(store);
        self.current_user = None;
    }

    /// Session teardown after an authentication-rejected backend response.
    ///
    /// Same effect as [`Session::logout`]; whether a redirect follows is
    /// the caller's decision.
    pub fn teardown(&mut self, store: &mut dyn CredentialStore) {
        self.logout(store);
    }

    /// Lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// The current actor, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserProfile> {
        self.current_user.as_ref()
    }

    /// Derived: someone is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Derived: the current actor is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| user.role == Role::Admin)
    }

    /// Derived: logged in, but not an admin.
    #[must_use]
    pub fn is_regular_user(&self) -> bool {
        self.is_authenticated() && !self.is_admin()
    }

    /// The current actor's role, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current_user.as_ref().map(|user| user.role)
    }

    /// Build an already-`Ready` session around a known actor.
    ///
    /// For contexts (and tests) where the restore has conceptually
    /// already happened.
    #[must_use]
    pub const fn ready(current_user: Option<UserProfile>) -> Self {
        Self {
            current_user,
            status: SessionStatus::Ready,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{MemoryCredentialStore, persist};

    // Restore with an empty store is a no-op that still lands Ready.
    #[test]
    fn test_restore_with_empty_store() {
        let mut store = MemoryCredentialStore::default();
        let session = Session::restore(&mut store);

        assert_eq!(session.status(), SessionStatus::Ready);
        assert!(session.current_user().is_none());
        assert!(!session.is_authenticated());
        assert!(store.is_consistent());
    }

    #[test]
    fn test_restore_with_valid_pair() {
        let profile = UserProfile::test_with_role(Role::Admin);
        let mut store = MemoryCredentialStore::default();
        persist(&mut store, "tok", &profile);

        let session = Session::restore(&mut store);
        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.current_user(), Some(&profile));
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert!(!session.is_regular_user());
    }

    // A lone token is cleared and the session stays logged out.
    #[test]
    fn test_restore_heals_partial_pair() {
        let mut store = MemoryCredentialStore {
            token: Some("abc".to_owned()),
            user_data: None,
        };

        let session = Session::restore(&mut store);
        assert_eq!(session.status(), SessionStatus::Ready);
        assert!(session.current_user().is_none());
        assert!(store.token.is_none());
        assert!(store.user_data.is_none());
    }

    #[test]
    fn test_restore_heals_malformed_profile() {
        let mut store = MemoryCredentialStore {
            token: Some("abc".to_owned()),
            user_data: Some("][".to_owned()),
        };

        let session = Session::restore(&mut store);
        assert!(!session.is_authenticated());
        assert!(store.token.is_none() && store.user_data.is_none());
    }

    #[test]
    fn test_establish_then_logout() {
        let profile = UserProfile::test_with_role(Role::User);
        let mut store = MemoryCredentialStore::default();
        let mut session = Session::restore(&mut store);

        session.establish(&mut store, "tok", profile.clone());
        assert!(session.is_authenticated());
        assert!(session.is_regular_user());
        assert_eq!(session.role(), Some(Role::User));
        assert!(store.is_consistent() && store.token.is_some());

        session.logout(&mut store);
        assert!(!session.is_authenticated());
        assert_eq!(session.status(), SessionStatus::Ready);
        assert!(store.is_consistent() && store.token.is_none());
    }

    #[test]
    fn test_teardown_matches_logout() {
        let profile = UserProfile::test_with_role(Role::User);
        let mut store = MemoryCredentialStore::default();
        let mut session = Session::ready(Some(profile.clone()));
        persist(&mut store, "tok", &profile);

        session.teardown(&mut store);
        assert!(!session.is_authenticated());
        assert!(store.token.is_none() && store.user_data.is_none());
    }

    #[test]
    fn test_derived_flags_never_stored() {
        // A fresh session is Initializing and unauthenticated regardless
        // of what a caller might expect to find cached.
        let session = Session::new();
        assert_eq!(session.status(), SessionStatus::Initializing);
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
        assert!(!session.is_regular_user());
    }
}
