// src/errors.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One entry of a validation failure response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: &'static str,
}

impl FieldError {
    pub fn body(param: impl Into<String>, msg: impl Into<String>) -> Self {
        FieldError {
            msg: msg.into(),
            param: param.into(),
            location: "body",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("There is no profile for this user")]
    NoProfileForUser,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("No token, authorization denied")]
    MissingToken,

    #[error("Token is not valid")]
    InvalidToken,

    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("BSON decode error: {0}")]
    Bson(#[from] mongodb::bson::de::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::NoProfileForUser | AppError::ProfileNotFound => {
                StatusCode::BAD_REQUEST
            }
            AppError::MissingToken | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::MongoDB(_) | AppError::Bson(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Validation(errors) => (status, Json(json!({ "errors": errors }))).into_response(),
            AppError::NoProfileForUser
            | AppError::ProfileNotFound
            | AppError::MissingToken
            | AppError::InvalidToken => (status, Json(json!({ "msg": self.to_string() }))).into_response(),
            AppError::MongoDB(_) | AppError::Bson(_) | AppError::Internal(_) => {
                // Detail stays in the log; callers only see the generic body.
                tracing::error!(error = %self, "request failed");
                (status, "Server error").into_response()
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let msg = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::body(field.to_string(), msg)
                })
            })
            .collect();

        fields.sort_by(|a, b| a.param.cmp(&b.param));
        AppError::Validation(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        AppError::Validation(vec![FieldError::body("body", "Invalid JSON body")])
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
