use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profiles::Role;

/// Supabase JWT claims.
///
/// The `sub` field is the user's UUID in `auth.users`; `user_metadata`
/// carries the sign-up metadata this application attaches (full name and
/// the chosen marketplace role).
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The auth user UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Issuer — the Supabase URL + `/auth/v1`.
    pub iss: Option<String>,
    /// User's email from Supabase auth.
    pub email: Option<String>,
    /// Supabase role (e.g. "authenticated"), not the marketplace role.
    pub role: Option<String>,
    /// Sign-up metadata.
    pub user_metadata: Option<UserMetadata>,
}

/// Metadata set at sign-up: `{ full_name, role }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }

    /// Best-effort email: prefer top-level, fall back to metadata.
    pub fn user_email(&self) -> Option<String> {
        self.email
            .clone()
            .or_else(|| self.user_metadata.as_ref().and_then(|m| m.email.clone()))
    }

    /// Display name from sign-up metadata.
    pub fn full_name(&self) -> Option<String> {
        self.user_metadata.as_ref().and_then(|m| m.full_name.clone())
    }

    /// Marketplace role chosen at sign-up. Unknown or missing values fall
    /// back to `Farmer`; admin accounts are provisioned with explicit
    /// metadata, never by accident.
    pub fn app_role(&self) -> Role {
        match self
            .user_metadata
            .as_ref()
            .and_then(|m| m.role.as_deref())
        {
            Some("contractor") => Role::Contractor,
            Some("admin") => Role::Admin,
            _ => Role::Farmer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_metadata(meta: Option<UserMetadata>) -> Claims {
        Claims {
            sub: "b9f0f8a2-6f9b-4a42-8f0a-1c2d3e4f5a6b".to_string(),
            exp: 2_000_000_000,
            iat: None,
            iss: None,
            email: Some("top@example.com".to_string()),
            role: Some("authenticated".to_string()),
            user_metadata: meta,
        }
    }

    #[test]
    fn role_parses_from_metadata() {
        let meta = |r: &str| UserMetadata {
            full_name: None,
            role: Some(r.to_string()),
            email: None,
            email_verified: None,
        };
        assert_eq!(claims_with_metadata(Some(meta("farmer"))).app_role(), Role::Farmer);
        assert_eq!(
            claims_with_metadata(Some(meta("contractor"))).app_role(),
            Role::Contractor
        );
        assert_eq!(claims_with_metadata(Some(meta("admin"))).app_role(), Role::Admin);
    }

    #[test]
    fn unknown_role_defaults_to_farmer() {
        let meta = UserMetadata {
            full_name: None,
            role: Some("superuser".to_string()),
            email: None,
            email_verified: None,
        };
        assert_eq!(claims_with_metadata(Some(meta)).app_role(), Role::Farmer);
        assert_eq!(claims_with_metadata(None).app_role(), Role::Farmer);
    }

    #[test]
    fn email_prefers_top_level() {
        let meta = UserMetadata {
            full_name: None,
            role: None,
            email: Some("meta@example.com".to_string()),
            email_verified: None,
        };
        let claims = claims_with_metadata(Some(meta));
        assert_eq!(claims.user_email().unwrap(), "top@example.com");
    }

    #[test]
    fn invalid_sub_is_rejected() {
        let mut claims = claims_with_metadata(None);
        claims.sub = "not-a-uuid".to_string();
        assert!(claims.user_id().is_err());
    }
}
