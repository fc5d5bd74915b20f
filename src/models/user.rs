use serde::{Deserialize, Serialize};
use mongodb::bson::oid::ObjectId;

/// The slice of a `users` document that profile reads expand into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClaimsUser {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user: ClaimsUser,
    pub exp: usize,
}

/// Caller identity attached to the request by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthUser {
    pub id: ObjectId,
}
