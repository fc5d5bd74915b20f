use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use mongodb::bson::oid::ObjectId;

use crate::errors::AppError;
use crate::models::user::{AuthUser, Claims};
use crate::state::AppState;

pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&headers).ok_or(AppError::MissingToken)?;
    let user = verify_token(token, &state.jwt_secret)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// `x-auth-token` first, then `Authorization: Bearer`.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-auth-token")
        .and_then(|header| header.to_str().ok())
        .or_else(|| {
            headers
                .get("authorization")
                .and_then(|header| header.to_str().ok())
                .and_then(|header| header.strip_prefix("Bearer "))
        })
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let token_data = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))
        .map_err(|e| {
            tracing::debug!("rejected token: {}", e);
            AppError::InvalidToken
        })?;

    let id = ObjectId::parse_str(&token_data.claims.user.id).map_err(|_| AppError::InvalidToken)?;

    Ok(AuthUser { id })
}

#[cfg(test)]
pub(crate) fn sign_token(user_id: &str, secret: &str, ttl_secs: i64) -> String {
    use crate::models::user::ClaimsUser;
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        user: ClaimsUser {
            id: user_id.to_string(),
        },
        exp: (chrono::Utc::now().timestamp() + ttl_secs) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_x_auth_token_before_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer from-bearer"));
        assert_eq!(extract_token(&headers), Some("from-bearer"));

        headers.insert("x-auth-token", HeaderValue::from_static("from-header"));
        assert_eq!(extract_token(&headers), Some("from-header"));
    }

    #[test]
    fn missing_or_blank_token_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn verifies_signature_and_user_id() {
        let id = ObjectId::new();
        let token = sign_token(&id.to_hex(), "secret", 3600);

        assert_eq!(verify_token(&token, "secret").unwrap(), AuthUser { id });
        assert!(matches!(
            verify_token(&token, "other-secret"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn rejects_expired_and_malformed_tokens() {
        let expired = sign_token(&ObjectId::new().to_hex(), "secret", -3600);
        assert!(matches!(verify_token(&expired, "secret"), Err(AppError::InvalidToken)));

        let bad_id = sign_token("not-an-object-id", "secret", 3600);
        assert!(matches!(verify_token(&bad_id, "secret"), Err(AppError::InvalidToken)));

        assert!(matches!(verify_token("garbage", "secret"), Err(AppError::InvalidToken)));
    }
}
