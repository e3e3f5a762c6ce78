//! User management and profile endpoints.

use reqwest::Method;
use serde::Serialize;

use unique_cctv_core::{Role, UserId, UserProfile};

use super::types::{PasswordChange, ProfileUpdate, UserStats, UserSummary};
use super::{BackendClient, BackendError};

#[derive(Debug, Serialize)]
struct RoleUpdate {
    role: Role,
}

impl BackendClient {
    /// List all users (admin).
    pub async fn list_users(&self, token: &str) -> Result<Vec<UserSummary>, BackendError> {
        self.get_authed("/users", token).await
    }

    /// Aggregate dashboard counts (admin).
    pub async fn user_stats(&self, token: &str) -> Result<UserStats, BackendError> {
        self.get_authed("/users/stats", token).await
    }

    /// Change a user's role (admin).
    pub async fn update_user_role(
        &self,
        token: &str,
        id: &UserId,
        role: Role,
    ) -> Result<UserSummary, BackendError> {
        self.send_authed(
            Method::PUT,
            &format!("/users/{id}/role"),
            token,
            Some(&RoleUpdate { role }),
        )
        .await
    }

    /// Delete a user (admin).
    pub async fn delete_user(&self, token: &str, id: &UserId) -> Result<(), BackendError> {
        self.delete_authed(&format!("/users/{id}"), token).await
    }

    /// Update the current user's own profile.
    ///
    /// Returns the replacement profile; callers re-persist it wholesale.
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, BackendError> {
        self.send_authed(Method::PUT, "/users/profile", token, Some(update))
            .await
    }

    /// Change the current user's password.
    pub async fn change_password(
        &self,
        token: &str,
        change: &PasswordChange,
    ) -> Result<(), BackendError> {
        let _ignored: serde_json::Value = self
            .send_authed(Method::PUT, "/users/password", token, Some(change))
            .await?;
        Ok(())
    }
}
