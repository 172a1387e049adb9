//! Page-content upsert through the workflow against a live database.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use folio_core::media::{ImageUpload, MediaError, MediaRef, MediaStore};
use folio_core::upsert::{MediaPolicy, UpsertWorkflow, Upserted};
use folio_db::models::page_content::{CreatePageContent, ContentMeta, UpdatePageContent};
use folio_db::stores::PageContentStore;
use sqlx::PgPool;

#[derive(Default)]
struct CountingMedia {
    uploads: AtomicUsize,
}

#[async_trait]
impl MediaStore for CountingMedia {
    async fn upload(&self, folder: &str, _upload: &ImageUpload) -> Result<MediaRef, MediaError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MediaRef {
            url: format!("https://media.test/{folder}/{n}.png"),
            media_id: format!("{folder}/{n}"),
        })
    }

    async fn delete(&self, _media_id: &str) -> Result<(), MediaError> {
        Ok(())
    }
}

fn meta(pairs: &[(&str, &str)]) -> ContentMeta {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn second_post_updates_the_same_section(pool: PgPool) {
    let store = PageContentStore::new(pool.clone());
    let media = CountingMedia::default();
    let policy = MediaPolicy {
        folder: "content".into(),
        primary_required: false,
        max_collection: 0,
    };
    let workflow = UpsertWorkflow::new(&store, &media, &policy);
    let key = "home_hero".to_string();

    let (first, outcome) = workflow
        .upsert(
            &key,
            CreatePageContent {
                section: key.clone(),
                title: "Welcome".into(),
                meta: meta(&[("buttonText", "Explore")]),
                ..CreatePageContent::default()
            },
            UpdatePageContent::default(),
            Vec::new(),
        )
        .await
        .unwrap();
    assert_eq!(outcome, Upserted::Created);

    let (second, outcome) = workflow
        .upsert(
            &key,
            CreatePageContent::default(),
            UpdatePageContent {
                subtitle: Some("Design studio".into()),
                meta: meta(&[("videoUrl", "https://video.test/x")]),
                ..UpdatePageContent::default()
            },
            Vec::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome, Upserted::Updated);
    assert_eq!(second.id, first.id);
    assert_eq!(second.title, "Welcome");
    assert_eq!(second.subtitle, "Design studio");
    assert_eq!(second.meta.get("buttonText").map(String::as_str), Some("Explore"));
    assert_eq!(
        second.meta.get("videoUrl").map(String::as_str),
        Some("https://video.test/x")
    );
    assert_eq!(media.uploads.load(Ordering::SeqCst), 0);
}
