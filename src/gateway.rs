//! Typed access layer over the document store.
//!
//! Each call maps to store operations one to one. There is no cache: callers
//! re-run [`ContentGateway::fetch_all`] after every mutation to resynchronize.

use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{
    to_fields, AppData, GuidelinesData, Quote, Record, Resource, SlideWork, GUIDELINES_DOC_ID,
    SETTINGS_COLLECTION,
};
use crate::store::{DocumentStore, Fields};

/// Gateway for all site content.
#[derive(Clone)]
pub struct ContentGateway {
    store: Arc<dyn DocumentStore>,
}

impl ContentGateway {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load every collection plus the guidelines singleton.
    ///
    /// The reads run concurrently; if any of them fails the whole aggregate fails.
    pub async fn fetch_all(&self) -> Result<AppData, AppError> {
        let (quotes, resources, portfolio, guidelines) = tokio::try_join!(
            self.list::<Quote>(),
            self.list::<Resource>(),
            self.list::<SlideWork>(),
            self.fetch_guidelines(),
        )
        .inspect_err(|e| tracing::error!("Error fetching content: {}", e))?;

        Ok(AppData {
            quotes,
            resources,
            portfolio,
            guidelines,
        })
    }

    /// All records of one type, in insertion order.
    pub async fn list<R: Record>(&self) -> Result<Vec<R>, AppError> {
        let docs = self.store.list(R::COLLECTION).await?;

        Ok(docs
            .iter()
            .filter_map(|doc| match doc.decode::<R>() {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed {} {}: {}", R::KIND, doc.id, e);
                    None
                }
            })
            .collect())
    }

    /// Read the guidelines, writing the default body first if none exist yet.
    pub async fn fetch_guidelines(&self) -> Result<GuidelinesData, AppError> {
        if let Some(doc) = self.store.get(SETTINGS_COLLECTION, GUIDELINES_DOC_ID).await? {
            return doc.decode::<GuidelinesData>().map_err(|e| {
                tracing::error!("Malformed guidelines document: {}", e);
                AppError::Internal(format!("Malformed guidelines document: {}", e))
            });
        }

        tracing::info!("Guidelines document missing, creating default");
        let guidelines = GuidelinesData::default();
        self.store
            .set_merge(SETTINGS_COLLECTION, GUIDELINES_DOC_ID, to_fields(&guidelines)?)
            .await
            .inspect_err(|e| tracing::error!("Error creating default guidelines: {}", e))?;

        Ok(guidelines)
    }

    /// Insert a new record and return its store-assigned id.
    ///
    /// No validation happens here; the draft is persisted as given.
    pub async fn create<R: Record>(&self, draft: &R::Draft) -> Result<String, AppError> {
        let id = self
            .store
            .insert(R::COLLECTION, to_fields(draft)?)
            .await
            .inspect_err(|e| tracing::error!("Error adding {}: {}", R::KIND, e))?;

        tracing::info!("Created {} {}", R::KIND, id);
        Ok(id)
    }

    /// Merge the set fields of `patch` into an existing record.
    pub async fn update<R: Record>(&self, id: &str, patch: &R::Patch) -> Result<(), AppError> {
        let fields: Fields = to_fields(patch)?;
        if fields.is_empty() {
            tracing::debug!("Empty {} patch for {}", R::KIND, id);
        }

        self.store
            .update(R::COLLECTION, id, fields)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => {
                    tracing::warn!("Update of missing {} {}", R::KIND, id);
                    AppError::NotFound(format!("{} {} not found", R::KIND, id))
                }
                other => {
                    tracing::error!("Error updating {} {}: {}", R::KIND, id, other);
                    other
                }
            })
    }

    /// Remove a record. Deleting an id that does not exist succeeds.
    pub async fn delete<R: Record>(&self, id: &str) -> Result<(), AppError> {
        let removed = self
            .store
            .delete(R::COLLECTION, id)
            .await
            .inspect_err(|e| tracing::error!("Error deleting {} {}: {}", R::KIND, id, e))?;

        if removed {
            tracing::info!("Deleted {} {}", R::KIND, id);
        } else {
            tracing::debug!("{} {} already absent", R::KIND, id);
        }
        Ok(())
    }

    /// Merge-upsert the guidelines body.
    pub async fn save_guidelines(&self, content: &str) -> Result<(), AppError> {
        let guidelines = GuidelinesData {
            content: content.to_string(),
        };

        self.store
            .set_merge(SETTINGS_COLLECTION, GUIDELINES_DOC_ID, to_fields(&guidelines)?)
            .await
            .inspect_err(|e| tracing::error!("Error saving guidelines: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::{
        NewQuote, NewResource, NewSlideWork, QuotePatch, ResourcePatch, DEFAULT_GUIDELINES,
    };
    use crate::store::memory::MemoryStore;

    fn gateway() -> (ContentGateway, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ContentGateway::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_then_fetch_all_round_trip() {
        let (gateway, _store) = gateway();
        let resource = NewResource {
            title: "Coolors".to_string(),
            url: "https://coolors.co".to_string(),
            image: "https://coolors.co/logo.png".to_string(),
            description: Some("Palette generator".to_string()),
        };

        let id = gateway.create::<Resource>(&resource).await.unwrap();
        let data = gateway.fetch_all().await.unwrap();

        assert_eq!(
            data.resources,
            vec![Resource {
                id,
                title: resource.title,
                url: resource.url,
                image: resource.image,
                description: resource.description,
            }]
        );
    }

    #[tokio::test]
    async fn test_mutation_does_not_refresh_earlier_snapshot() {
        let (gateway, _store) = gateway();
        let before = gateway.fetch_all().await.unwrap();

        gateway
            .create::<Quote>(&NewQuote::new("Simplicity is the ultimate sophistication", "Leonardo"))
            .await
            .unwrap();

        assert!(before.quotes.is_empty());
        let after = gateway.fetch_all().await.unwrap();
        assert_eq!(after.quotes.len(), 1);
        assert!(after.quotes[0].active);
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_named_field() {
        let (gateway, _store) = gateway();
        let id = gateway
            .create::<Quote>(&NewQuote::new("A", "X"))
            .await
            .unwrap();

        gateway
            .update::<Quote>(
                &id,
                &QuotePatch {
                    author: Some("Y".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let quotes = gateway.list::<Quote>().await.unwrap();
        assert_eq!(
            quotes,
            vec![Quote {
                id,
                text: "A".to_string(),
                author: "Y".to_string(),
                active: true,
            }]
        );
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let (gateway, _store) = gateway();
        let result = gateway
            .update::<Resource>(
                "missing",
                &ResourcePatch {
                    title: Some("T".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Resource missing not found"));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (gateway, store) = gateway();
        let keep = gateway
            .create::<Quote>(&NewQuote::new("Keep", "K"))
            .await
            .unwrap();
        let id = gateway
            .create::<Quote>(&NewQuote::new("Drop", "D"))
            .await
            .unwrap();

        gateway.delete::<Quote>(&id).await.unwrap();
        let once = store.snapshot("quotes");
        gateway.delete::<Quote>(&id).await.unwrap();
        let twice = store.snapshot("quotes");

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
        assert_eq!(twice[0].id, keep);
    }

    #[tokio::test]
    async fn test_guidelines_self_heal_once() {
        let (gateway, store) = gateway();

        let first = gateway.fetch_all().await.unwrap();
        assert_eq!(first.guidelines.content, DEFAULT_GUIDELINES);
        assert_eq!(store.snapshot("settings").len(), 1);

        gateway.save_guidelines("# Custom").await.unwrap();
        let second = gateway.fetch_all().await.unwrap();
        assert_eq!(second.guidelines.content, "# Custom");
        assert_eq!(store.snapshot("settings").len(), 1);
    }

    #[tokio::test]
    async fn test_second_fetch_does_not_recreate_guidelines() {
        let (gateway, store) = gateway();

        gateway.fetch_guidelines().await.unwrap();
        let calls_after_first = store.calls();
        let again = gateway.fetch_guidelines().await.unwrap();

        // First fetch: get + set_merge. Second: get only.
        assert_eq!(calls_after_first, 2);
        assert_eq!(store.calls(), 3);
        assert_eq!(again.content, DEFAULT_GUIDELINES);
    }

    #[tokio::test]
    async fn test_store_failure_fails_whole_aggregate() {
        let (gateway, store) = gateway();
        gateway
            .create::<SlideWork>(&NewSlideWork {
                title: "Deck".to_string(),
                designer_name: "Lina".to_string(),
                image_url: "https://img.example/deck.png".to_string(),
            })
            .await
            .unwrap();

        store.set_failing(true);
        let result = gateway.fetch_all().await;
        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));

        store.set_failing(false);
        assert_eq!(gateway.fetch_all().await.unwrap().portfolio.len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_surface_store_failures() {
        let (gateway, store) = gateway();
        store.set_failing(true);

        assert!(matches!(
            gateway.create::<Quote>(&NewQuote::new("A", "X")).await,
            Err(AppError::StoreUnavailable(_))
        ));
        assert!(matches!(
            gateway.delete::<Quote>("q").await,
            Err(AppError::StoreUnavailable(_))
        ));
        assert!(matches!(
            gateway.save_guidelines("x").await,
            Err(AppError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_gateway_persists_drafts_without_validating() {
        let (gateway, _store) = gateway();
        let id = gateway
            .create::<Quote>(&NewQuote::new("", ""))
            .await
            .unwrap();
        assert_eq!(gateway.list::<Quote>().await.unwrap()[0].id, id);
    }

    #[tokio::test]
    async fn test_malformed_documents_are_skipped() {
        let (gateway, store) = gateway();
        let mut bad = Fields::new();
        bad.insert("author".to_string(), "no text".into());
        store.insert("quotes", bad).await.unwrap();
        gateway
            .create::<Quote>(&NewQuote::new("Fine", "F"))
            .await
            .unwrap();

        let quotes = gateway.list::<Quote>().await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].text, "Fine");
    }

    // Known gap: store calls have no timeout, so a hung store keeps the
    // aggregate fetch pending indefinitely.
    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_store_leaves_fetch_pending() {
        let (gateway, store) = gateway();
        store.set_hanging(true);

        let result = tokio::time::timeout(Duration::from_secs(3600), gateway.fetch_all()).await;
        assert!(result.is_err());
    }
}
