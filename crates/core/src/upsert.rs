//! Resource upsert workflow.
//!
//! Couples media-host uploads to document-store writes for every
//! image-bearing resource (gallery items, blog posts, testimonials and
//! page-content sections). Each external call is awaited before the next one
//! starts; later steps are irrevocable and must not run before earlier steps
//! are confirmed.
//!
//! Partial-failure rules:
//!
//! - create: nothing is uploaded until every attachment is validated. If the
//!   insert fails, every object uploaded in the attempt is released.
//! - update: new media is uploaded before the previous primary object is
//!   released. If the final update call fails the new uploads stay on the
//!   media host (they are logged, not rolled back).
//! - delete: media is released best-effort, then the record is removed.
//!
//! Cleanup failures are logged and never replace the error the caller sees.

use std::fmt;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::media::{validate_image, ImageUpload, MediaRef, MediaStore, Slot};

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Failure reported by the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate value: {0}")]
    Conflict(String),

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Media resolved for a write. On insert this is the full set of references;
/// on update `primary` replaces the stored primary reference and
/// `collection` is appended to the stored sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMedia {
    pub primary: Option<MediaRef>,
    pub collection: Vec<MediaRef>,
}

impl ResolvedMedia {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.collection.is_empty()
    }

    fn refs(&self) -> Vec<MediaRef> {
        self.primary
            .iter()
            .chain(self.collection.iter())
            .cloned()
            .collect()
    }
}

/// Records that reference objects on the media host.
pub trait MediaHolder {
    fn primary_media(&self) -> Option<MediaRef>;

    fn collection_media(&self) -> Vec<MediaRef> {
        Vec::new()
    }
}

/// Document-store operations the workflow needs for one resource kind.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Entity name used in not-found and conflict messages.
    const ENTITY: &'static str;

    /// Identifier or natural key (e.g. page-content section).
    type Key: fmt::Display + Send + Sync;
    type Record: MediaHolder + Send;
    /// Scalar fields for a new record.
    type Draft: Send;
    /// Partial scalar changes for an existing record.
    type Patch: Send;

    async fn insert(
        &self,
        draft: Self::Draft,
        media: ResolvedMedia,
    ) -> Result<Self::Record, StoreError>;

    async fn find(&self, key: &Self::Key) -> Result<Option<Self::Record>, StoreError>;

    /// Apply `patch` and `media` in one write. `None` means the record is gone.
    async fn update(
        &self,
        key: &Self::Key,
        patch: Self::Patch,
        media: ResolvedMedia,
    ) -> Result<Option<Self::Record>, StoreError>;

    /// Returns `false` when nothing was deleted.
    async fn remove(&self, key: &Self::Key) -> Result<bool, StoreError>;
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Media rules for one resource kind.
#[derive(Debug, Clone)]
pub struct MediaPolicy {
    /// Folder on the media host that receives this kind's uploads.
    pub folder: String,
    /// Whether creating a record requires a primary image.
    pub primary_required: bool,
    /// Maximum collection images per request; `0` means no collection slot.
    pub max_collection: usize,
}

impl MediaPolicy {
    /// Validate attachments without touching any external system.
    fn check(&self, entity: &str, uploads: &[ImageUpload], creating: bool) -> Result<(), CoreError> {
        let primaries = uploads.iter().filter(|u| u.slot == Slot::Primary).count();
        let collection = uploads.len() - primaries;

        if creating && self.primary_required && primaries == 0 {
            return Err(CoreError::MissingRequiredMedia(Slot::Primary));
        }
        if primaries > 1 {
            return Err(CoreError::Validation(format!(
                "Only one file may be attached to '{}'",
                Slot::Primary
            )));
        }
        if collection > self.max_collection {
            return Err(CoreError::Validation(if self.max_collection == 0 {
                format!("{entity} does not accept '{}' uploads", Slot::Collection)
            } else {
                format!(
                    "At most {} files may be attached to '{}'",
                    self.max_collection,
                    Slot::Collection
                )
            }));
        }

        for upload in uploads {
            validate_image(upload)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// Whether an upsert created a new record or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Created,
    Updated,
}

/// Create/update/delete orchestration for one resource kind.
pub struct UpsertWorkflow<'a, S: ResourceStore> {
    store: &'a S,
    media: &'a dyn MediaStore,
    policy: &'a MediaPolicy,
}

impl<'a, S: ResourceStore> UpsertWorkflow<'a, S> {
    pub fn new(store: &'a S, media: &'a dyn MediaStore, policy: &'a MediaPolicy) -> Self {
        Self {
            store,
            media,
            policy,
        }
    }

    /// Validate, upload, then insert. Uploads are released if the insert fails.
    pub async fn create(
        &self,
        draft: S::Draft,
        uploads: Vec<ImageUpload>,
    ) -> Result<S::Record, CoreError> {
        self.policy.check(S::ENTITY, &uploads, true)?;
        let media = self.upload_all(&uploads).await?;

        match self.store.insert(draft, media.clone()).await {
            Ok(record) => Ok(record),
            Err(err) => {
                tracing::warn!(
                    entity = S::ENTITY,
                    error = %err,
                    uploaded = media.refs().len(),
                    "Insert failed, releasing uploaded media"
                );
                self.release(&media.refs()).await;
                Err(persist_error(S::ENTITY, err))
            }
        }
    }

    /// Validate, fetch, upload, release the replaced primary, then update.
    pub async fn update(
        &self,
        key: &S::Key,
        patch: S::Patch,
        uploads: Vec<ImageUpload>,
    ) -> Result<S::Record, CoreError> {
        self.policy.check(S::ENTITY, &uploads, false)?;
        let existing = self.find_existing(key).await?;
        self.apply_update(key, &existing, patch, uploads).await
    }

    /// Update the record under `key` if it exists, otherwise create it.
    pub async fn upsert(
        &self,
        key: &S::Key,
        draft: S::Draft,
        patch: S::Patch,
        uploads: Vec<ImageUpload>,
    ) -> Result<(S::Record, Upserted), CoreError> {
        let existing = self
            .store
            .find(key)
            .await
            .map_err(|e| lookup_error(S::ENTITY, e))?;

        match existing {
            Some(existing) => {
                self.policy.check(S::ENTITY, &uploads, false)?;
                let record = self.apply_update(key, &existing, patch, uploads).await?;
                Ok((record, Upserted::Updated))
            }
            None => {
                let record = self.create(draft, uploads).await?;
                Ok((record, Upserted::Created))
            }
        }
    }

    /// Release every media object the record holds, then remove the record.
    pub async fn delete(&self, key: &S::Key) -> Result<(), CoreError> {
        let existing = self.find_existing(key).await?;

        let refs: Vec<MediaRef> = existing
            .primary_media()
            .into_iter()
            .chain(existing.collection_media())
            .collect();
        self.release(&refs).await;

        match self.store.remove(key).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(CoreError::not_found(S::ENTITY, key)),
            Err(err) => Err(persist_error(S::ENTITY, err)),
        }
    }

    async fn find_existing(&self, key: &S::Key) -> Result<S::Record, CoreError> {
        self.store
            .find(key)
            .await
            .map_err(|e| lookup_error(S::ENTITY, e))?
            .ok_or_else(|| CoreError::not_found(S::ENTITY, key))
    }

    async fn apply_update(
        &self,
        key: &S::Key,
        existing: &S::Record,
        patch: S::Patch,
        uploads: Vec<ImageUpload>,
    ) -> Result<S::Record, CoreError> {
        let fresh = self.upload_all(&uploads).await?;

        if fresh.primary.is_some() {
            if let Some(previous) = existing.primary_media() {
                self.release(std::slice::from_ref(&previous)).await;
            }
        }

        match self.store.update(key, patch, fresh.clone()).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                log_stranded(S::ENTITY, &fresh);
                Err(CoreError::not_found(S::ENTITY, key))
            }
            Err(err) => {
                log_stranded(S::ENTITY, &fresh);
                Err(persist_error(S::ENTITY, err))
            }
        }
    }

    /// Upload every attachment in order. On the first failure, objects
    /// already uploaded in this call are released.
    async fn upload_all(&self, uploads: &[ImageUpload]) -> Result<ResolvedMedia, CoreError> {
        let mut resolved = ResolvedMedia::default();

        for upload in uploads {
            match self.media.upload(&self.policy.folder, upload).await {
                Ok(media_ref) => match upload.slot {
                    Slot::Primary => resolved.primary = Some(media_ref),
                    Slot::Collection => resolved.collection.push(media_ref),
                },
                Err(err) => {
                    tracing::error!(
                        entity = S::ENTITY,
                        slot = %upload.slot,
                        error = %err,
                        "Media upload failed"
                    );
                    self.release(&resolved.refs()).await;
                    return Err(CoreError::MediaUploadFailed(format!(
                        "{}: {err}",
                        upload.slot
                    )));
                }
            }
        }

        Ok(resolved)
    }

    /// Best-effort deletion; failures are logged only.
    async fn release(&self, refs: &[MediaRef]) {
        for media_ref in refs {
            if let Err(err) = self.media.delete(&media_ref.media_id).await {
                tracing::warn!(
                    entity = S::ENTITY,
                    media_id = %media_ref.media_id,
                    error = %err,
                    "Failed to release media object"
                );
            }
        }
    }
}

fn persist_error(entity: &'static str, err: StoreError) -> CoreError {
    match err {
        StoreError::Conflict(detail) => {
            CoreError::Conflict(format!("{entity} already exists ({detail})"))
        }
        StoreError::Backend(detail) => CoreError::RecordPersistFailed(detail),
    }
}

fn lookup_error(entity: &'static str, err: StoreError) -> CoreError {
    CoreError::Internal(format!("{entity} lookup failed: {err}"))
}

fn log_stranded(entity: &'static str, fresh: &ResolvedMedia) {
    if fresh.is_empty() {
        return;
    }
    let media_ids: Vec<&str> = fresh
        .primary
        .iter()
        .chain(fresh.collection.iter())
        .map(|m| m.media_id.as_str())
        .collect();
    tracing::warn!(entity, ?media_ids, "Update failed, new media left on host");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;
    use crate::media::fixtures::png;
    use crate::media::MediaError;

    // -- fakes --------------------------------------------------------------

    #[derive(Default)]
    struct FakeMedia {
        log: Mutex<Vec<String>>,
        uploads: Mutex<usize>,
        /// 1-based index of the upload call that fails.
        fail_upload_at: Option<usize>,
        fail_deletes: bool,
    }

    impl FakeMedia {
        fn failing_upload(n: usize) -> Self {
            Self {
                fail_upload_at: Some(n),
                ..Self::default()
            }
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.log().iter().filter(|l| l.starts_with(prefix)).count()
        }
    }

    #[async_trait]
    impl MediaStore for FakeMedia {
        async fn upload(&self, folder: &str, _upload: &ImageUpload) -> Result<MediaRef, MediaError> {
            let n = {
                let mut uploads = self.uploads.lock().unwrap();
                *uploads += 1;
                *uploads
            };
            if self.fail_upload_at == Some(n) {
                self.log.lock().unwrap().push(format!("upload-failed:{n}"));
                return Err(MediaError::Transport("connection reset".into()));
            }
            let media_id = format!("{folder}/m{n}");
            self.log.lock().unwrap().push(format!("upload:{media_id}"));
            Ok(MediaRef {
                url: format!("https://media.test/{media_id}.png"),
                media_id,
            })
        }

        async fn delete(&self, media_id: &str) -> Result<(), MediaError> {
            self.log.lock().unwrap().push(format!("delete:{media_id}"));
            if self.fail_deletes {
                return Err(MediaError::Rejected {
                    status: 500,
                    message: "boom".into(),
                });
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        key: String,
        title: String,
        note: String,
        image: Option<MediaRef>,
        extras: Vec<MediaRef>,
    }

    impl MediaHolder for Item {
        fn primary_media(&self) -> Option<MediaRef> {
            self.image.clone()
        }

        fn collection_media(&self) -> Vec<MediaRef> {
            self.extras.clone()
        }
    }

    struct Draft {
        key: String,
        title: String,
        note: String,
    }

    #[derive(Default)]
    struct Patch {
        title: Option<String>,
        note: Option<String>,
    }

    #[derive(Default)]
    struct FakeStore {
        rows: Mutex<HashMap<String, Item>>,
        next_id: Mutex<i64>,
        calls: Mutex<usize>,
        fail_insert: Option<fn() -> StoreError>,
        fail_update: bool,
    }

    impl FakeStore {
        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn get(&self, key: &str) -> Option<Item> {
            self.rows.lock().unwrap().get(key).cloned()
        }

        fn touch(&self) {
            *self.calls.lock().unwrap() += 1;
        }
    }

    #[async_trait]
    impl ResourceStore for FakeStore {
        const ENTITY: &'static str = "Item";
        type Key = String;
        type Record = Item;
        type Draft = Draft;
        type Patch = Patch;

        async fn insert(&self, draft: Draft, media: ResolvedMedia) -> Result<Item, StoreError> {
            self.touch();
            if let Some(fail) = self.fail_insert {
                return Err(fail());
            }
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&draft.key) {
                return Err(StoreError::Conflict(draft.key));
            }
            let id = {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                *next
            };
            let item = Item {
                id,
                key: draft.key.clone(),
                title: draft.title,
                note: draft.note,
                image: media.primary,
                extras: media.collection,
            };
            rows.insert(draft.key, item.clone());
            Ok(item)
        }

        async fn find(&self, key: &String) -> Result<Option<Item>, StoreError> {
            self.touch();
            Ok(self.get(key))
        }

        async fn update(
            &self,
            key: &String,
            patch: Patch,
            media: ResolvedMedia,
        ) -> Result<Option<Item>, StoreError> {
            self.touch();
            if self.fail_update {
                return Err(StoreError::Backend("connection lost".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            let Some(item) = rows.get_mut(key) else {
                return Ok(None);
            };
            if let Some(title) = patch.title {
                item.title = title;
            }
            if let Some(note) = patch.note {
                item.note = note;
            }
            if let Some(primary) = media.primary {
                item.image = Some(primary);
            }
            item.extras.extend(media.collection);
            Ok(Some(item.clone()))
        }

        async fn remove(&self, key: &String) -> Result<bool, StoreError> {
            self.touch();
            Ok(self.rows.lock().unwrap().remove(key).is_some())
        }
    }

    // -- helpers ------------------------------------------------------------

    fn gallery_policy() -> MediaPolicy {
        MediaPolicy {
            folder: "gallery".into(),
            primary_required: true,
            max_collection: 10,
        }
    }

    fn optional_policy() -> MediaPolicy {
        MediaPolicy {
            folder: "content".into(),
            primary_required: false,
            max_collection: 0,
        }
    }

    fn draft(key: &str) -> Draft {
        Draft {
            key: key.into(),
            title: "Brand refresh".into(),
            note: "first".into(),
        }
    }

    async fn seed(store: &FakeStore, media: &FakeMedia, policy: &MediaPolicy, key: &str) -> Item {
        UpsertWorkflow::new(store, media, policy)
            .create(draft(key), vec![png(Slot::Primary, "cover.png")])
            .await
            .expect("seed create should succeed")
    }

    // -- create -------------------------------------------------------------

    #[tokio::test]
    async fn create_without_primary_fails_before_any_call() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), gallery_policy());
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let result = wf
            .create(draft("a"), vec![png(Slot::Collection, "extra.png")])
            .await;

        assert_matches!(result, Err(CoreError::MissingRequiredMedia(Slot::Primary)));
        assert!(media.log().is_empty());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn create_rejects_non_image_before_upload() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), gallery_policy());
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let mut doc = png(Slot::Collection, "brief.png");
        doc.content_type = Some("text/plain".into());
        let result = wf
            .create(draft("a"), vec![png(Slot::Primary, "cover.png"), doc])
            .await;

        assert_matches!(result, Err(CoreError::InvalidMediaType(_)));
        assert!(media.log().is_empty());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn create_rejects_too_many_collection_images() {
        let (store, media) = (FakeStore::default(), FakeMedia::default());
        let policy = MediaPolicy {
            max_collection: 2,
            ..gallery_policy()
        };
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let mut uploads = vec![png(Slot::Primary, "cover.png")];
        uploads.extend((0..3).map(|i| png(Slot::Collection, &format!("b{i}.png"))));

        assert_matches!(
            wf.create(draft("a"), uploads).await,
            Err(CoreError::Validation(_))
        );
        assert!(media.log().is_empty());
    }

    #[tokio::test]
    async fn create_persists_resolved_media() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), gallery_policy());
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let item = wf
            .create(
                draft("a"),
                vec![
                    png(Slot::Primary, "cover.png"),
                    png(Slot::Collection, "b1.png"),
                    png(Slot::Collection, "b2.png"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(item.image.as_ref().unwrap().media_id, "gallery/m1");
        let extras: Vec<&str> = item.extras.iter().map(|m| m.media_id.as_str()).collect();
        assert_eq!(extras, ["gallery/m2", "gallery/m3"]);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn persist_failure_releases_uploaded_media() {
        let store = FakeStore {
            fail_insert: Some(|| StoreError::Backend("null value in column".into())),
            ..FakeStore::default()
        };
        let (media, policy) = (FakeMedia::default(), gallery_policy());
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let result = wf
            .create(draft("a"), vec![png(Slot::Primary, "cover.png")])
            .await;

        assert_matches!(result, Err(CoreError::RecordPersistFailed(_)));
        assert_eq!(media.count("upload:"), 1);
        assert_eq!(media.count("delete:"), 1);
        assert_eq!(media.log(), ["upload:gallery/m1", "delete:gallery/m1"]);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn persist_failure_surfaces_original_error_when_cleanup_fails() {
        let store = FakeStore {
            fail_insert: Some(|| StoreError::Backend("disk full".into())),
            ..FakeStore::default()
        };
        let media = FakeMedia {
            fail_deletes: true,
            ..FakeMedia::default()
        };
        let policy = gallery_policy();
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let result = wf
            .create(draft("a"), vec![png(Slot::Primary, "cover.png")])
            .await;

        assert_matches!(result, Err(CoreError::RecordPersistFailed(msg)) if msg == "disk full");
        assert_eq!(media.count("delete:"), 1);
    }

    #[tokio::test]
    async fn unique_conflict_releases_media_and_reports_conflict() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), gallery_policy());
        seed(&store, &media, &policy, "same-slug").await;

        let wf = UpsertWorkflow::new(&store, &media, &policy);
        let result = wf
            .create(draft("same-slug"), vec![png(Slot::Primary, "cover.png")])
            .await;

        assert_matches!(result, Err(CoreError::Conflict(_)));
        assert_eq!(media.log().last().unwrap(), "delete:gallery/m2");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn failed_upload_releases_earlier_uploads_and_skips_store() {
        let store = FakeStore::default();
        let media = FakeMedia::failing_upload(2);
        let policy = gallery_policy();
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let result = wf
            .create(
                draft("a"),
                vec![png(Slot::Primary, "cover.png"), png(Slot::Collection, "b.png")],
            )
            .await;

        assert_matches!(result, Err(CoreError::MediaUploadFailed(_)));
        assert_eq!(
            media.log(),
            ["upload:gallery/m1", "upload-failed:2", "delete:gallery/m1"]
        );
        assert_eq!(store.calls(), 0);
    }

    // -- update -------------------------------------------------------------

    #[tokio::test]
    async fn replacing_primary_deletes_old_after_new_upload() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), gallery_policy());
        seed(&store, &media, &policy, "a").await;

        let wf = UpsertWorkflow::new(&store, &media, &policy);
        let updated = wf
            .update(
                &"a".to_string(),
                Patch {
                    title: Some("Renamed".into()),
                    ..Patch::default()
                },
                vec![png(Slot::Primary, "new.png")],
            )
            .await
            .unwrap();

        assert_eq!(
            media.log(),
            ["upload:gallery/m1", "upload:gallery/m2", "delete:gallery/m1"]
        );
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.note, "first");
        assert_eq!(updated.image.unwrap().media_id, "gallery/m2");
    }

    #[tokio::test]
    async fn failed_replacement_upload_leaves_record_and_media_untouched() {
        let (store, policy) = (FakeStore::default(), gallery_policy());
        let media = FakeMedia::failing_upload(2);
        let before = seed(&store, &media, &policy, "a").await;

        let wf = UpsertWorkflow::new(&store, &media, &policy);
        let result = wf
            .update(
                &"a".to_string(),
                Patch {
                    title: Some("Renamed".into()),
                    ..Patch::default()
                },
                vec![png(Slot::Primary, "new.png")],
            )
            .await;

        assert_matches!(result, Err(CoreError::MediaUploadFailed(_)));
        assert_eq!(media.count("delete:"), 0);
        assert_eq!(store.get("a").unwrap(), before);
    }

    #[tokio::test]
    async fn collection_uploads_are_appended() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), gallery_policy());
        seed(&store, &media, &policy, "a").await;
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        wf.update(&"a".into(), Patch::default(), vec![png(Slot::Collection, "b1.png")])
            .await
            .unwrap();
        let item = wf
            .update(&"a".into(), Patch::default(), vec![png(Slot::Collection, "b2.png")])
            .await
            .unwrap();

        let extras: Vec<&str> = item.extras.iter().map(|m| m.media_id.as_str()).collect();
        assert_eq!(extras, ["gallery/m2", "gallery/m3"]);
        assert_eq!(item.image.unwrap().media_id, "gallery/m1");
        assert_eq!(media.count("delete:"), 0);
    }

    #[tokio::test]
    async fn failed_update_leaves_new_uploads_in_place() {
        let (media, policy) = (FakeMedia::default(), gallery_policy());
        let seeded = FakeStore::default();
        seed(&seeded, &media, &policy, "a").await;
        let store = FakeStore {
            rows: Mutex::new(seeded.rows.lock().unwrap().clone()),
            fail_update: true,
            ..FakeStore::default()
        };

        let wf = UpsertWorkflow::new(&store, &media, &policy);
        let result = wf
            .update(&"a".into(), Patch::default(), vec![png(Slot::Primary, "new.png")])
            .await;

        assert_matches!(result, Err(CoreError::RecordPersistFailed(_)));
        assert!(!media.log().contains(&"delete:gallery/m2".to_string()));
    }

    #[tokio::test]
    async fn update_of_missing_record_uploads_nothing() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), gallery_policy());
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let result = wf
            .update(&"ghost".into(), Patch::default(), vec![png(Slot::Primary, "x.png")])
            .await;

        assert_matches!(result, Err(CoreError::NotFound { entity: "Item", .. }));
        assert!(media.log().is_empty());
    }

    // -- upsert -------------------------------------------------------------

    #[tokio::test]
    async fn upsert_creates_then_updates_same_record() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), optional_policy());
        let wf = UpsertWorkflow::new(&store, &media, &policy);
        let key = "home_hero".to_string();

        let (first, outcome) = wf
            .upsert(&key, draft("home_hero"), Patch::default(), Vec::new())
            .await
            .unwrap();
        assert_eq!(outcome, Upserted::Created);
        assert!(first.image.is_none());

        let (second, outcome) = wf
            .upsert(
                &key,
                draft("home_hero"),
                Patch {
                    note: Some("second".into()),
                    ..Patch::default()
                },
                vec![png(Slot::Primary, "hero.png")],
            )
            .await
            .unwrap();

        assert_eq!(outcome, Upserted::Updated);
        assert_eq!(second.id, first.id);
        assert_eq!(second.title, "Brand refresh");
        assert_eq!(second.note, "second");
        assert!(second.image.is_some());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn optional_policy_rejects_collection_uploads() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), optional_policy());
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        let result = wf
            .create(draft("a"), vec![png(Slot::Collection, "b.png")])
            .await;

        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    // -- delete -------------------------------------------------------------

    #[tokio::test]
    async fn delete_releases_all_media_then_second_delete_is_not_found() {
        let (store, media, policy) = (FakeStore::default(), FakeMedia::default(), gallery_policy());
        let wf = UpsertWorkflow::new(&store, &media, &policy);
        wf.create(
            draft("a"),
            vec![png(Slot::Primary, "cover.png"), png(Slot::Collection, "b.png")],
        )
        .await
        .unwrap();

        wf.delete(&"a".into()).await.unwrap();

        assert_eq!(media.count("delete:"), 2);
        assert_eq!(store.len(), 0);
        assert_matches!(
            wf.delete(&"a".into()).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn delete_succeeds_when_media_release_fails() {
        let store = FakeStore::default();
        let policy = gallery_policy();
        seed(&store, &FakeMedia::default(), &policy, "a").await;

        let media = FakeMedia {
            fail_deletes: true,
            ..FakeMedia::default()
        };
        let wf = UpsertWorkflow::new(&store, &media, &policy);

        wf.delete(&"a".into()).await.unwrap();
        assert_eq!(store.len(), 0);
    }
}
