mod firestore;

pub use firestore::{FirestoreSource, FIRESTORE_BASE_URL};

pub(crate) fn firestore_base_url() -> String {
    FIRESTORE_BASE_URL.to_string()
}

use async_trait::async_trait;
use shared_types::ContactRecord;
use thiserror::Error;

/// One document from the remote collection, keyed by contact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    pub key: String,
    pub phone: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to document source failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("document source returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode document listing: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only access to a remote document collection.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns every document in `collection`, in the order the source supplies.
    async fn list_documents(&self, collection: &str) -> Result<Vec<RemoteDocument>, StoreError>;
}

/// One-shot loader for the contact list.
pub struct ContactStore {
    source: Box<dyn DocumentSource>,
    collection: String,
}

impl ContactStore {
    pub fn new(source: Box<dyn DocumentSource>, collection: impl Into<String>) -> Self {
        Self {
            source,
            collection: collection.into(),
        }
    }

    /// Fetches the collection once and normalizes it.
    ///
    /// Consumes the store; ids are assigned from 1 in source order.
    pub async fn load(self) -> Result<Vec<ContactRecord>, StoreError> {
        tracing::debug!("Fetching contacts from collection '{}'", self.collection);

        let documents = match self.source.list_documents(&self.collection).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch contacts from collection '{}': {}",
                    self.collection,
                    e
                );
                return Err(e);
            }
        };

        let contacts: Vec<ContactRecord> = documents
            .into_iter()
            .zip(1u32..)
            .map(|(doc, id)| ContactRecord::new(id, doc.key, doc.phone.unwrap_or_default()))
            .collect();

        tracing::info!(
            "Loaded {} contacts from collection '{}'",
            contacts.len(),
            self.collection
        );

        Ok(contacts)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory source returning a fixed listing or a fixed failure status.
    pub(crate) struct StaticSource {
        pub(crate) documents: Vec<RemoteDocument>,
        pub(crate) fail_with: Option<u16>,
    }

    impl StaticSource {
        pub(crate) fn with(documents: &[(&str, Option<&str>)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(key, phone)| RemoteDocument {
                        key: key.to_string(),
                        phone: phone.map(str::to_string),
                    })
                    .collect(),
                fail_with: None,
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self {
                documents: Vec::new(),
                fail_with: Some(status),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for StaticSource {
        async fn list_documents(
            &self,
            collection: &str,
        ) -> Result<Vec<RemoteDocument>, StoreError> {
            assert_eq!(collection, "contacts");
            match self.fail_with {
                Some(status) => Err(StoreError::Status {
                    status,
                    body: "unavailable".to_string(),
                }),
                None => Ok(self.documents.clone()),
            }
        }
    }

    #[tokio::test]
    async fn test_load_normalizes_in_source_order() {
        let source = StaticSource::with(&[
            ("USF Public Safety", Some("4154222911")),
            ("Alumni", None),
            ("Overseas Office", Some("+44 20 7946 0958")),
        ]);

        let contacts = ContactStore::new(Box::new(source), "contacts")
            .load()
            .await
            .unwrap();

        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[0].id(), 1);
        assert_eq!(contacts[0].name(), "USF Public Safety");
        assert_eq!(contacts[0].display_phone(), "(415) 422-2911");
        assert_eq!(contacts[1].id(), 2);
        assert_eq!(contacts[1].raw_phone(), "");
        assert_eq!(contacts[1].display_phone(), "");
        assert_eq!(contacts[2].id(), 3);
        assert_eq!(contacts[2].display_phone(), "+44 20 7946 0958");
        assert!(contacts.iter().all(|c| c.is_selected()));
    }

    #[tokio::test]
    async fn test_reload_restarts_ids() {
        let docs = [("A", Some("1")), ("B", Some("2"))];

        let first = ContactStore::new(Box::new(StaticSource::with(&docs)), "contacts")
            .load()
            .await
            .unwrap();
        let second = ContactStore::new(Box::new(StaticSource::with(&docs)), "contacts")
            .load()
            .await
            .unwrap();

        let ids: Vec<u32> = second.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_load_failure_is_returned() {
        let result = ContactStore::new(Box::new(StaticSource::failing(503)), "contacts")
            .load()
            .await;

        assert!(matches!(result, Err(StoreError::Status { status: 503, .. })));
    }
}
