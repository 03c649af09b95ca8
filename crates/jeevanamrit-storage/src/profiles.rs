use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use aws_sdk_s3::Client as S3Client;
use jeevanamrit_core::models::profile::{Profile, ProfileUpdate};
use jeevanamrit_core::s3_keys;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::StorageError;
use crate::objects;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The account service's view of patient profiles.
///
/// A write either lands completely or fails; callers never see a partially
/// applied update. Profiles are never deleted through this trait.
pub trait ProfileStore: Send + Sync {
    /// Store a new profile. Fails with `AlreadyExists` if the user has one.
    fn create_profile(&self, profile: Profile) -> BoxFuture<'_, Result<Profile, StorageError>>;

    /// Fetch the profile owned by `user_id`.
    fn get_profile(&self, user_id: Uuid) -> BoxFuture<'_, Result<Profile, StorageError>>;

    /// Apply questionnaire fields to an existing profile and return the
    /// stored result.
    fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> BoxFuture<'_, Result<Profile, StorageError>>;
}

/// Profiles stored as JSON objects under `profiles/{user_id}.json`.
pub struct S3ProfileStore {
    pub s3: S3Client,
    pub bucket: String,
}

impl S3ProfileStore {
    pub fn new(s3: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            s3,
            bucket: bucket.into(),
        }
    }

    /// Read a profile document and the ETag it was stored under, if S3
    /// returned one.
    async fn read(&self, key: &str) -> Result<(Profile, Option<String>), StorageError> {
        let output = objects::get_object(&self.s3, &self.bucket, key).await?;
        let profile: Profile = serde_json::from_slice(&output.body)?;
        Ok((profile, output.etag))
    }

    async fn write_new(&self, key: &str, profile: &Profile) -> Result<String, StorageError> {
        let body = serde_json::to_vec_pretty(profile)?;
        objects::put_object_if_absent(&self.s3, &self.bucket, key, body, Some(JSON)).await
    }

    /// Overwrite only if the stored document still carries `etag`.
    async fn write_over(
        &self,
        key: &str,
        profile: &Profile,
        etag: &str,
    ) -> Result<String, StorageError> {
        let body = serde_json::to_vec_pretty(profile)?;
        objects::put_object_if_match(&self.s3, &self.bucket, key, body, Some(JSON), etag).await
    }
}

const JSON: &str = "application/json";

/// A conditional overwrite needs the ETag of the version that was read.
fn require_etag(key: &str, etag: Option<String>) -> Result<String, StorageError> {
    etag.filter(|e| !e.is_empty())
        .ok_or_else(|| StorageError::MissingEtag {
            key: key.to_string(),
        })
}

impl ProfileStore for S3ProfileStore {
    fn create_profile(&self, profile: Profile) -> BoxFuture<'_, Result<Profile, StorageError>> {
        Box::pin(async move {
            let key = s3_keys::profile(profile.user_id);
            self.write_new(&key, &profile).await?;
            tracing::info!(user_id = %profile.user_id, key = %key, "profile created");
            Ok::<_, StorageError>(profile)
        })
    }

    fn get_profile(&self, user_id: Uuid) -> BoxFuture<'_, Result<Profile, StorageError>> {
        Box::pin(async move {
            let key = s3_keys::profile(user_id);
            let (profile, _etag) = self.read(&key).await?;
            Ok::<_, StorageError>(profile)
        })
    }

    fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> BoxFuture<'_, Result<Profile, StorageError>> {
        Box::pin(async move {
            let key = s3_keys::profile(user_id);
            let (mut profile, etag) = self.read(&key).await?;
            let etag = require_etag(&key, etag)?;
            profile.apply(&update, jiff::Timestamp::now());
            self.write_over(&key, &profile, &etag).await?;
            tracing::info!(
                user_id = %user_id,
                key = %key,
                dominant_dosha = %update.dominant_dosha,
                "profile updated"
            );
            Ok::<_, StorageError>(profile)
        })
    }
}

/// Process-local store for development and tests.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<Uuid, Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn create_profile(&self, profile: Profile) -> BoxFuture<'_, Result<Profile, StorageError>> {
        Box::pin(async move {
            let mut profiles = self.profiles.lock().await;
            if profiles.contains_key(&profile.user_id) {
                return Err(StorageError::AlreadyExists {
                    key: s3_keys::profile(profile.user_id),
                });
            }
            profiles.insert(profile.user_id, profile.clone());
            tracing::debug!(user_id = %profile.user_id, "profile created in memory");
            Ok(profile)
        })
    }

    fn get_profile(&self, user_id: Uuid) -> BoxFuture<'_, Result<Profile, StorageError>> {
        Box::pin(async move {
            self.profiles
                .lock()
                .await
                .get(&user_id)
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    key: s3_keys::profile(user_id),
                })
        })
    }

    fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> BoxFuture<'_, Result<Profile, StorageError>> {
        Box::pin(async move {
            let mut profiles = self.profiles.lock().await;
            let profile = profiles
                .get_mut(&user_id)
                .ok_or_else(|| StorageError::NotFound {
                    key: s3_keys::profile(user_id),
                })?;
            profile.apply(&update, jiff::Timestamp::now());
            tracing::debug!(user_id = %user_id, "profile updated in memory");
            Ok::<_, StorageError>(profile.clone())
        })
    }
}
