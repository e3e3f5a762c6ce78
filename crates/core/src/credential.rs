//! The persisted credential pair and its store.
//!
//! A logged-in browser session is backed by two slots in an external store:
//! an opaque bearer `token` and a JSON-serialized `user_data` profile. The
//! pair is written and cleared together, never one slot alone; a store
//! where exactly one slot is populated is corrupt and gets healed by the
//! next restore.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::UserProfile;

/// Store slot name for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Store slot name for the serialized user profile.
pub const USER_DATA_KEY: &str = "user_data";

/// Errors raised while interpreting a persisted credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Exactly one of the two slots is populated.
    #[error("persisted credential is partial: token={has_token}, user_data={has_user_data}")]
    Partial {
        has_token: bool,
        has_user_data: bool,
    },

    /// The persisted profile does not deserialize (bad JSON or an
    /// unrecognized role).
    #[error("persisted profile is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A usable credential: a bearer token paired with the identity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque bearer token issued by the backend.
    pub token: String,
    /// The profile the token was issued for.
    pub user: UserProfile,
}

/// Raw snapshot of the two store slots, before interpretation.
#[derive(Debug, Clone, Default)]
pub struct RawCredential {
    pub token: Option<String>,
    pub user_data: Option<String>,
}

impl RawCredential {
    /// Interpret the snapshot.
    ///
    /// Returns `Ok(None)` when both slots are empty (never logged in),
    /// `Ok(Some(_))` when both are present and the profile deserializes.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] for a partial pair or a profile that
    /// fails to deserialize. Callers treat either as "unauthenticated,
    /// clear the store".
    pub fn interpret(self) -> Result<Option<Credential>, CredentialError> {
        match (self.token, self.user_data) {
            (None, None) => Ok(None),
            (Some(token), Some(user_data)) => {
                let user: UserProfile = serde_json::from_str(&user_data)?;
                Ok(Some(Credential { token, user }))
            }
            (token, user_data) => Err(CredentialError::Partial {
                has_token: token.is_some(),
                has_user_data: user_data.is_some(),
            }),
        }
    }
}

/// External storage for the credential pair.
///
/// Implementations hold exactly two slots. All writes go through
/// [`persist`] and [`clear`], which touch both slots as a unit; the trait
/// deliberately has no single-slot setter.
pub trait CredentialStore {
    /// Snapshot the current slot contents.
    fn snapshot(&self) -> RawCredential;

    /// Overwrite both slots.
    fn put(&mut self, token: String, user_data: String);

    /// Empty both slots.
    fn clear(&mut self);
}

/// Persist a credential: serialize the profile and write the pair.
///
/// # Panics
///
/// Never in practice: [`UserProfile`] is plain strings and enums, which
/// always serialize.
pub fn persist(store: &mut dyn CredentialStore, token: &str, profile: &UserProfile) {
    let user_data = serde_json::to_string(profile).expect("profile always serializes");
    store.put(token.to_owned(), user_data);
}

/// Clear the pair.
pub fn clear(store: &mut dyn CredentialStore) {
    store.clear();
}

/// In-memory credential store.
///
/// Used by unit tests and as the template for the session-backed store in
/// the site crate. The slots can be poked directly to simulate corrupt or
/// partial state.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    pub token: Option<String>,
    pub user_data: Option<String>,
}

impl CredentialStore for MemoryCredentialStore {
    fn snapshot(&self) -> RawCredential {
        RawCredential {
            token: self.token.clone(),
            user_data: self.user_data.clone(),
        }
    }

    fn put(&mut self, token: String, user_data: String) {
        self.token = Some(token);
        self.user_data = Some(user_data);
    }

    fn clear(&mut self) {
        self.token = None;
        self.user_data = None;
    }
}

impl MemoryCredentialStore {
    /// Whether the pair invariant holds: both slots set or neither.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.token.is_some() == self.user_data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_empty_store_interprets_as_logged_out() {
        let store = MemoryCredentialStore::default();
        assert!(matches!(store.snapshot().interpret(), Ok(None)));
    }

    #[test]
    fn test_full_pair_interprets_as_credential() {
        let profile = UserProfile::test_with_role(Role::User);
        let mut store = MemoryCredentialStore::default();
        persist(&mut store, "tok-1", &profile);

        let cred = store
            .snapshot()
            .interpret()
            .expect("interpretable")
            .expect("present");
        assert_eq!(cred.token, "tok-1");
        assert_eq!(cred.user, profile);
    }

    #[test]
    fn test_token_without_user_data_is_partial() {
        let store = MemoryCredentialStore {
            token: Some("abc".to_owned()),
            user_data: None,
        };
        assert!(matches!(
            store.snapshot().interpret(),
            Err(CredentialError::Partial {
                has_token: true,
                has_user_data: false,
            })
        ));
    }

    #[test]
    fn test_malformed_profile_is_corrupt() {
        let store = MemoryCredentialStore {
            token: Some("abc".to_owned()),
            user_data: Some("{not json".to_owned()),
        };
        assert!(matches!(
            store.snapshot().interpret(),
            Err(CredentialError::Malformed(_))
        ));
    }

    #[test]
    fn test_unknown_role_is_corrupt() {
        let store = MemoryCredentialStore {
            token: Some("abc".to_owned()),
            user_data: Some(
                r#"{"id":"u","name":"N","email":"n@x.com","role":"ROOT"}"#.to_owned(),
            ),
        };
        assert!(matches!(
            store.snapshot().interpret(),
            Err(CredentialError::Malformed(_))
        ));
    }

    // The pair invariant survives any sequence of the mutation funnel.
    #[test]
    fn test_pair_invariant_across_sequences() {
        let profile = UserProfile::test_with_role(Role::Admin);
        let mut store = MemoryCredentialStore::default();

        persist(&mut store, "t1", &profile);
        assert!(store.is_consistent());

        clear(&mut store);
        assert!(store.is_consistent());

        persist(&mut store, "t2", &profile);
        persist(&mut store, "t3", &profile);
        assert!(store.is_consistent());

        // simulated 401 teardown is also just clear()
        clear(&mut store);
        clear(&mut store);
        assert!(store.is_consistent());
        assert!(store.token.is_none());
    }
}
