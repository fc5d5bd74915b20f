use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::errors::{AppError, Result};
use crate::models::profile::{PopulatedProfile, Profile, ProfileFields};

pub const PROFILES: &str = "profiles";
pub const USERS: &str = "users";

/// Persistence seam for the profile handlers.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The profile owned by `user`, with the user reference expanded.
    async fn find_by_user(&self, user: ObjectId) -> Result<Option<PopulatedProfile>>;

    /// Every profile, expanded, oldest first.
    async fn find_all(&self) -> Result<Vec<PopulatedProfile>>;

    /// Creates or updates the profile owned by `user` in one step and
    /// returns the stored state after the write.
    async fn upsert(&self, user: ObjectId, fields: ProfileFields) -> Result<Profile>;

    async fn ping(&self) -> Result<()>;
}

pub struct MongoProfileStore {
    db: Database,
    profiles: Collection<Profile>,
}

impl MongoProfileStore {
    pub fn new(db: Database) -> Self {
        let profiles = db.collection(PROFILES);
        MongoProfileStore { db, profiles }
    }

    /// One profile per user, enforced by the database as well.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.profiles.create_index(index).await?;
        tracing::info!("ensured unique index on {}.user", PROFILES);
        Ok(())
    }

    async fn find_populated(&self, filter: Document) -> Result<Vec<PopulatedProfile>> {
        let cursor = self.profiles.aggregate(populate_pipeline(filter)).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;

        docs.into_iter()
            .map(|doc| bson::from_document(doc).map_err(AppError::from))
            .collect()
    }
}

/// `$match` the profiles, then swap `user` for `{_id, name, avatar}` from
/// the users collection (null when the user is gone).
fn populate_pipeline(filter: Document) -> Vec<Document> {
    vec![
        doc! { "$match": filter },
        doc! { "$sort": { "date": 1, "_id": 1 } },
        doc! {
            "$lookup": {
                "from": USERS,
                "let": { "userId": "$user" },
                "pipeline": [
                    { "$match": { "$expr": { "$eq": ["$_id", "$$userId"] } } },
                    { "$project": { "name": 1, "avatar": 1 } }
                ],
                "as": "user"
            }
        },
        doc! { "$unwind": { "path": "$user", "preserveNullAndEmptyArrays": true } },
        doc! { "$addFields": { "user": { "$ifNull": ["$user", null] } } },
    ]
}

#[async_trait]
impl ProfileStore for MongoProfileStore {
    async fn find_by_user(&self, user: ObjectId) -> Result<Option<PopulatedProfile>> {
        let mut found = self.find_populated(doc! { "user": user }).await?;
        Ok(found.pop())
    }

    async fn find_all(&self) -> Result<Vec<PopulatedProfile>> {
        self.find_populated(doc! {}).await
    }

    async fn upsert(&self, user: ObjectId, fields: ProfileFields) -> Result<Profile> {
        // `user` comes from the filter on insert.
        let update = doc! {
            "$set": fields.to_set_document(),
            "$setOnInsert": { "date": BsonDateTime::now() }
        };

        self.profiles
            .find_one_and_update(doc! { "user": user }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::internal(format!("upsert for user {} returned no document", user)))
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
