use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile::{parse_skills, PopulatedProfile, Profile, ProfileFields, Social};
use crate::models::user::UserSummary;

/// Body of `POST /api/profile`. Anything not named here is dropped by serde.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    /// `null` and a missing key both count as absent.
    #[validate(
        required(message = "Status is required"),
        length(min = 1, message = "Status is required")
    )]
    pub status: Option<String>,

    /// Comma-separated, e.g. `"html, css, js"`.
    #[validate(
        required(message = "Skills is required"),
        length(min = 1, message = "Skills is required")
    )]
    pub skills: Option<String>,

    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,

    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl From<ProfileInput> for ProfileFields {
    fn from(input: ProfileInput) -> Self {
        let skills = parse_skills(input.skills.as_deref().unwrap_or_default());

        ProfileFields {
            company: present(input.company),
            website: present(input.website),
            location: present(input.location),
            bio: present(input.bio),
            status: present(input.status),
            github_username: present(input.github_username),
            skills: (!skills.is_empty()).then_some(skills),
            social: Social {
                youtube: present(input.youtube),
                twitter: present(input.twitter),
                facebook: present(input.facebook),
                linkedin: present(input.linkedin),
                instagram: present(input.instagram),
            },
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<UserSummary> for UserView {
    fn from(user: UserSummary) -> Self {
        UserView {
            id: user.id.to_hex(),
            name: user.name,
            avatar: user.avatar,
        }
    }
}

/// JSON shape of a profile: hex ids and an RFC 3339 date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView<U> {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: U,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub date: String,
}

pub type ExpandedProfileView = ProfileView<Option<UserView>>;

impl<U> ProfileView<U> {
    fn from_profile(profile: Profile<U>) -> Self {
        ProfileView {
            id: profile.id.map(|id| id.to_hex()).unwrap_or_default(),
            date: profile.date.try_to_rfc3339_string().unwrap_or_default(),
            user: profile.user,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            status: profile.status,
            github_username: profile.github_username,
            skills: profile.skills,
            social: profile.social,
        }
    }
}

impl From<Profile> for ProfileView<String> {
    fn from(profile: Profile) -> Self {
        ProfileView::from_profile(profile.map_user(|user| user.to_hex()))
    }
}

impl From<PopulatedProfile> for ExpandedProfileView {
    fn from(profile: PopulatedProfile) -> Self {
        ProfileView::from_profile(profile.map_user(|user| user.map(UserView::from)))
    }
}
