use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::principal::Principal;

#[derive(Clone)]
pub struct JwtKeys {
    secret: String,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: String, ttl_minutes: i64) -> Self {
        Self {
            secret,
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn generate_token(
        &self,
        principal: &Principal,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: principal.id.to_string(),
            username: principal.username.clone(),
            exp: (now + self.ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }

    /// Verifies a token and returns the principal it was issued to.
    pub fn principal_from_token(&self, token: &str) -> Option<Principal> {
        let claims = self.verify_token(token).ok()?;
        let id = Uuid::parse_str(&claims.sub).ok()?;
        Some(Principal::new(id, claims.username))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_principal() {
        let keys = JwtKeys::new("test-secret".into(), 60);
        let alice = Principal::new(Uuid::new_v4(), "alice");

        let token = keys.generate_token(&alice).unwrap();
        assert_eq!(keys.principal_from_token(&token), Some(alice));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let issuer = JwtKeys::new("one".into(), 60);
        let verifier = JwtKeys::new("two".into(), 60);
        let token = issuer
            .generate_token(&Principal::new(Uuid::new_v4(), "alice"))
            .unwrap();

        assert!(verifier.principal_from_token(&token).is_none());
        assert!(verifier.principal_from_token("not-a-token").is_none());
    }

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }
}
