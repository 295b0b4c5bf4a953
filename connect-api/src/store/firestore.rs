use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use super::{DocumentSource, RemoteDocument, StoreError};

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Reads a collection through the Firestore REST API.
pub struct FirestoreSource {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    api_key: Option<String>,
}

impl FirestoreSource {
    pub fn new(base_url: &str, project_id: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            api_key,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.base_url, self.project_id, collection
        )
    }
}

#[async_trait]
impl DocumentSource for FirestoreSource {
    async fn list_documents(&self, collection: &str) -> Result<Vec<RemoteDocument>, StoreError> {
        let mut request = self.client.get(self.collection_url(collection));
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_listing(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    // Firestore omits the array entirely for an empty collection
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: HashMap<String, FirestoreValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirestoreValue {
    string_value: Option<String>,
    // int64 values arrive as JSON strings
    integer_value: Option<String>,
}

impl FirestoreDocument {
    fn into_remote(mut self) -> RemoteDocument {
        let key = self
            .name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let phone = self
            .fields
            .remove("phone")
            .and_then(|value| value.string_value.or(value.integer_value));

        RemoteDocument { key, phone }
    }
}

pub(crate) fn decode_listing(body: &str) -> Result<Vec<RemoteDocument>, StoreError> {
    let listing: ListDocumentsResponse = serde_json::from_str(body)?;
    Ok(listing
        .documents
        .into_iter()
        .map(FirestoreDocument::into_remote)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::canned_server;
    use actix_web::http::StatusCode;

    #[test]
    fn test_collection_url() {
        let source = FirestoreSource::new("https://example.test/v1/", "kikis", None);
        assert_eq!(
            source.collection_url("contacts"),
            "https://example.test/v1/projects/kikis/databases/(default)/documents/contacts"
        );
    }

    #[test]
    fn test_decode_listing() {
        let body = r#"{
            "documents": [
                {
                    "name": "projects/kikis/databases/(default)/documents/contacts/USF Public Safety",
                    "fields": { "phone": { "stringValue": "4154222911" } },
                    "createTime": "2024-10-01T00:00:00Z"
                },
                {
                    "name": "projects/kikis/databases/(default)/documents/contacts/Alumni",
                    "fields": { "phone": { "integerValue": "4154226431" } }
                },
                {
                    "name": "projects/kikis/databases/(default)/documents/contacts/Front Desk"
                }
            ]
        }"#;

        let docs = decode_listing(body).unwrap();

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].key, "USF Public Safety");
        assert_eq!(docs[0].phone.as_deref(), Some("4154222911"));
        assert_eq!(docs[1].key, "Alumni");
        assert_eq!(docs[1].phone.as_deref(), Some("4154226431"));
        assert_eq!(docs[2].key, "Front Desk");
        assert_eq!(docs[2].phone, None);
    }

    #[test]
    fn test_decode_empty_collection() {
        assert!(decode_listing("{}").unwrap().is_empty());
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        assert!(matches!(
            decode_listing("<html>"),
            Err(StoreError::Decode(_))
        ));
    }

    #[actix_web::test]
    async fn test_list_documents_over_http() {
        let body = r#"{
            "documents": [{
                "name": "projects/p/databases/(default)/documents/contacts/Alumni",
                "fields": { "phone": { "stringValue": "4154226431" } }
            }]
        }"#;
        let (url, server) = canned_server(StatusCode::OK, body);
        let source = FirestoreSource::new(&url, "p", Some("key".to_string()));

        let docs = source.list_documents("contacts").await.unwrap();

        assert_eq!(
            docs,
            vec![RemoteDocument {
                key: "Alumni".to_string(),
                phone: Some("4154226431".to_string()),
            }]
        );
        server.stop(false).await;
    }

    #[actix_web::test]
    async fn test_list_documents_non_success_status() {
        let denied = "Missing or insufficient permissions.";
        let (url, server) = canned_server(StatusCode::FORBIDDEN, denied);
        let source = FirestoreSource::new(&url, "p", None);

        let err = source.list_documents("contacts").await.unwrap_err();

        match err {
            StoreError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, denied);
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
        server.stop(false).await;
    }
}
