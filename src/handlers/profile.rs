use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use mongodb::bson::oid::ObjectId;

use crate::dtos::profile_dtos::{ExpandedProfileView, ProfileInput, ProfileView};
use crate::errors::{AppError, Result};
use crate::middleware::validated_json::ValidatedJson;
use crate::models::profile::ProfileFields;
use crate::models::user::AuthUser;
use crate::state::AppState;

// GET /api/profile/me
pub async fn get_current_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ExpandedProfileView>> {
    let profile = state
        .profiles
        .find_by_user(user.id)
        .await?
        .ok_or(AppError::NoProfileForUser)?;

    Ok(Json(profile.into()))
}

// POST /api/profile
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<ProfileInput>,
) -> Result<Json<ProfileView<String>>> {
    let fields = ProfileFields::from(input);
    let profile = state.profiles.upsert(user.id, fields).await?;

    tracing::info!(user = %user.id, "profile saved");
    Ok(Json(profile.into()))
}

// GET /api/profile
pub async fn get_all_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpandedProfileView>>> {
    let profiles = state.profiles.find_all().await?;

    tracing::debug!("fetched {} profiles", profiles.len());
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

// GET /api/profile/user/:user_id
pub async fn get_profile_by_user_id(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ExpandedProfileView>> {
    // A malformed id can't match anything; answer exactly like a miss.
    let user = ObjectId::parse_str(&user_id).map_err(|_| AppError::ProfileNotFound)?;

    let profile = state
        .profiles
        .find_by_user(user)
        .await?
        .ok_or(AppError::ProfileNotFound)?;

    Ok(Json(profile.into()))
}
