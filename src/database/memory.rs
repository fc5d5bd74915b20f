//! In-process `ProfileStore` used by the handler tests.
//!
//! Records are kept as raw documents and writes go through the same `$set`
//! body the MongoDB store sends, so merge behavior is shared.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};

use crate::database::profile_store::ProfileStore;
use crate::errors::{AppError, Result};
use crate::models::profile::{PopulatedProfile, Profile, ProfileFields};
use crate::models::user::UserSummary;

#[derive(Default)]
struct Inner {
    profiles: Vec<Document>,
    users: HashMap<ObjectId, UserSummary>,
}

#[derive(Default)]
pub struct MemoryProfileStore {
    inner: Mutex<Inner>,
}

impl MemoryProfileStore {
    pub fn with_users(users: impl IntoIterator<Item = UserSummary>) -> Self {
        let store = MemoryProfileStore::default();
        {
            let mut inner = store.inner.lock().unwrap();
            inner.users = users.into_iter().map(|u| (u.id, u)).collect();
        }
        store
    }

    pub fn profile_count(&self) -> usize {
        self.inner.lock().unwrap().profiles.len()
    }
}

/// Applies a `$set` body, creating intermediate sub-documents for dotted keys.
fn apply_set(target: &mut Document, set: Document) {
    for (key, value) in set {
        match key.split_once('.') {
            Some((parent, child)) => {
                if !matches!(target.get(parent), Some(Bson::Document(_))) {
                    target.insert(parent, Document::new());
                }
                if let Some(Bson::Document(sub)) = target.get_mut(parent) {
                    sub.insert(child, value);
                }
            }
            None => {
                target.insert(key, value);
            }
        }
    }
}

fn owned_by(record: &Document, user: ObjectId) -> bool {
    record.get_object_id("user").map_or(false, |id| id == user)
}

fn populate(record: &Document, users: &HashMap<ObjectId, UserSummary>) -> Result<PopulatedProfile> {
    let profile: Profile = bson::from_document(record.clone())?;
    Ok(profile.map_user(|id| users.get(&id).cloned()))
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_user(&self, user: ObjectId) -> Result<Option<PopulatedProfile>> {
        let inner = self.inner.lock().unwrap();
        inner
            .profiles
            .iter()
            .find(|record| owned_by(record, user))
            .map(|record| populate(record, &inner.users))
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<PopulatedProfile>> {
        let inner = self.inner.lock().unwrap();
        inner
            .profiles
            .iter()
            .map(|record| populate(record, &inner.users))
            .collect()
    }

    async fn upsert(&self, user: ObjectId, fields: ProfileFields) -> Result<Profile> {
        let mut inner = self.inner.lock().unwrap();
        let index = match inner.profiles.iter().position(|record| owned_by(record, user)) {
            Some(index) => index,
            None => {
                inner.profiles.push(doc! {
                    "_id": ObjectId::new(),
                    "user": user,
                    "date": BsonDateTime::now()
                });
                inner.profiles.len() - 1
            }
        };

        let record = &mut inner.profiles[index];
        apply_set(record, fields.to_set_document());
        Ok(bson::from_document(record.clone())?)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Fails every call, for exercising the server-error path.
pub struct FailingStore;

#[async_trait]
impl ProfileStore for FailingStore {
    async fn find_by_user(&self, _user: ObjectId) -> Result<Option<PopulatedProfile>> {
        Err(AppError::internal("store offline"))
    }

    async fn find_all(&self) -> Result<Vec<PopulatedProfile>> {
        Err(AppError::internal("store offline"))
    }

    async fn upsert(&self, _user: ObjectId, _fields: ProfileFields) -> Result<Profile> {
        Err(AppError::internal("store offline"))
    }

    async fn ping(&self) -> Result<()> {
        Err(AppError::internal("store offline"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Social;

    #[tokio::test]
    async fn later_writes_keep_fields_not_supplied() {
        let store = MemoryProfileStore::default();
        let user = ObjectId::new();

        store
            .upsert(
                user,
                ProfileFields {
                    company: Some("Acme".into()),
                    status: Some("Junior".into()),
                    skills: Some(vec!["js".into()]),
                    social: Social {
                        youtube: Some("yt".into()),
                        ..Social::default()
                    },
                    ..ProfileFields::default()
                },
            )
            .await
            .unwrap();

        let profile = store
            .upsert(
                user,
                ProfileFields {
                    status: Some("Senior".into()),
                    skills: Some(vec!["rust".into()]),
                    social: Social {
                        linkedin: Some("li".into()),
                        ..Social::default()
                    },
                    ..ProfileFields::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(store.profile_count(), 1);
        assert_eq!(profile.user, user);
        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert_eq!(profile.status.as_deref(), Some("Senior"));
        assert_eq!(profile.skills, vec!["rust"]);
        assert_eq!(profile.social.youtube.as_deref(), Some("yt"));
        assert_eq!(profile.social.linkedin.as_deref(), Some("li"));
    }
}
