use serde::{Deserialize, Serialize};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime, Document};

use crate::models::user::UserSummary;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    /// Present links as `(name, url)` pairs.
    pub fn links(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("youtube", &self.youtube),
            ("twitter", &self.twitter),
            ("facebook", &self.facebook),
            ("linkedin", &self.linkedin),
            ("instagram", &self.instagram),
        ]
        .into_iter()
        .filter_map(|(name, link)| link.as_deref().map(|link| (name, link)))
    }
}

/// A stored profile. `U` is how the owning user is represented: the raw
/// reference as stored, or the expanded summary produced by reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile<U = ObjectId> {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub user: U,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub social: Social,

    pub date: BsonDateTime,
}

pub type PopulatedProfile = Profile<Option<UserSummary>>;

impl<U> Profile<U> {
    pub fn map_user<V>(self, f: impl FnOnce(U) -> V) -> Profile<V> {
        Profile {
            id: self.id,
            user: f(self.user),
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            status: self.status,
            github_username: self.github_username,
            skills: self.skills,
            social: self.social,
            date: self.date,
        }
    }
}

/// The whitelisted, already-sanitized set of fields a write may touch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

impl ProfileFields {
    /// `$set` body for the fields present. Social links use dotted paths so
    /// links not being written survive the update.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();

        let scalars = [
            ("company", &self.company),
            ("website", &self.website),
            ("location", &self.location),
            ("bio", &self.bio),
            ("status", &self.status),
            ("githubUsername", &self.github_username),
        ];
        for (key, value) in scalars {
            if let Some(value) = value {
                set.insert(key, value.as_str());
            }
        }

        if let Some(skills) = &self.skills {
            set.insert("skills", skills.clone());
        }

        for (name, link) in self.social.links() {
            set.insert(format!("social.{}", name), link);
        }

        set
    }
}

/// Splits a comma-separated skills string into trimmed, non-empty tokens.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(String::from)
        .collect()
}
