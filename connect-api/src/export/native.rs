use async_trait::async_trait;
use serde::Serialize;
use shared_types::{ExportEntry, PickerRequest};
use std::sync::Arc;

use super::{CapabilityProbe, ContactsPicker, PickerError};

/// Forwards the selection to a device bridge that owns the address book.
pub struct HttpContactsPicker {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct PickerPayload<'a> {
    request: &'a PickerRequest,
    contacts: &'a [ExportEntry],
}

impl HttpContactsPicker {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ContactsPicker for HttpContactsPicker {
    async fn select(
        &self,
        request: &PickerRequest,
        contacts: &[ExportEntry],
    ) -> Result<(), PickerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PickerPayload { request, contacts })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let detail = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or_default()
                .to_string()
        } else {
            body
        };
        Err(PickerError::Rejected(detail))
    }
}

/// Capability probe fixed at startup: present iff a picker was configured.
pub struct ConfiguredProbe {
    picker: Option<Arc<dyn ContactsPicker>>,
}

impl ConfiguredProbe {
    pub fn new(picker: Option<Arc<dyn ContactsPicker>>) -> Self {
        Self { picker }
    }

    pub fn from_endpoint(endpoint: Option<&str>) -> Self {
        let picker = endpoint
            .filter(|e| !e.trim().is_empty())
            .map(|e| Arc::new(HttpContactsPicker::new(e)) as Arc<dyn ContactsPicker>);
        Self::new(picker)
    }
}

impl CapabilityProbe for ConfiguredProbe {
    fn native_contacts(&self) -> Option<Arc<dyn ContactsPicker>> {
        self.picker.clone()
    }
}
