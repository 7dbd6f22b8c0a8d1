//! Integration test for JWT claim handling.
//!
//! Mints tokens locally with HS256 and decodes them through the same
//! `Claims` type the JWKS validator produces, so the claim shape and the
//! helper accessors are exercised without a running server or network.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use agrolink_backend::auth::jwt::{Claims, UserMetadata};
use agrolink_backend::models::profiles::Role;

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn mint_test_token(sub: &str, email: &str, full_name: &str, role: &str) -> String {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: Some(UserMetadata {
            full_name: Some(full_name.to_string()),
            role: Some(role.to_string()),
            email: Some(email.to_string()),
            email_verified: Some(true),
        }),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|td| td.claims)
}

#[test]
fn test_valid_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let token = mint_test_token(
        &user_id.to_string(),
        "asha@example.com",
        "Asha Patel",
        "contractor",
    );

    let claims = decode_claims(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.user_email().unwrap(), "asha@example.com");
    assert_eq!(claims.full_name().unwrap(), "Asha Patel");
    assert_eq!(claims.app_role(), Role::Contractor);
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: Some(now - 3600),
        iss: None,
        email: Some("expired@example.com".to_string()),
        role: None,
        user_metadata: None,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = decode_claims(&token, TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = mint_test_token(
        &Uuid::new_v4().to_string(),
        "ravi@example.com",
        "Ravi Kumar",
        "farmer",
    );

    let result = decode_claims(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = decode_claims("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_claims_helpers_with_missing_metadata() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: None,
        email: Some("bare@example.com".to_string()),
        role: None,
        user_metadata: None,
    };

    // Falls back to top-level email; role defaults to farmer.
    assert_eq!(claims.user_email().unwrap(), "bare@example.com");
    assert!(claims.full_name().is_none());
    assert_eq!(claims.app_role(), Role::Farmer);
}
