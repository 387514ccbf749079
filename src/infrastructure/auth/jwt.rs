//! HS256 access tokens

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{TokenError, TokenIdentity, TokenServicePort};

const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id, as a string
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub fresh: bool,
}

impl AccessClaims {
    pub fn new(user_id: i64, expiry_secs: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            iat: now,
            nbf: now,
            exp: now + expiry_secs as i64,
            jti: Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            fresh: true,
        }
    }
}

/// Issues and verifies access tokens signed with one shared secret
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_secs: u64,
}

impl JwtTokenService {
    pub fn new(secret: &str, expiry_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_secs,
        }
    }

    pub fn expiry_secs(&self) -> u64 {
        self.expiry_secs
    }

    fn sign(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }
}

impl TokenServicePort for JwtTokenService {
    fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.sign(&AccessClaims::new(user_id, self.expiry_secs))
    }

    fn verify(&self, token: &str) -> Result<TokenIdentity, TokenError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;

        let claims = data.claims;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TokenError::Invalid);
        }
        let user_id = claims.sub.parse::<i64>().map_err(|_| TokenError::Invalid)?;

        Ok(TokenIdentity {
            user_id,
            token_id: claims.jti,
        })
    }
}

/// Random signing secret for deployments that configure none
pub fn generate_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
