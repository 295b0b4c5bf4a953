//! Export strategies for the selected contacts.
//!
//! Two paths exist. When the platform exposes a native contacts capability
//! the whole selection is handed to it in one call. Otherwise every contact
//! is rendered as its own vCard file and pushed through a [`DownloadSink`],
//! one after another in list order. A failure stops the file loop where it
//! is; files already delivered stay delivered.

mod downloads;
mod native;

pub use downloads::DirectoryDownloads;
pub use native::{ConfiguredProbe, HttpContactsPicker};

use async_trait::async_trait;
use contact_format::{VcardError, VcardFile};
use shared_types::{ExportEntry, ExportOutcome, NotificationLevel, PickerRequest};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub const NATIVE_SUCCESS: &str = "Contacts added successfully!";
pub const NATIVE_FAILURE_PREFIX: &str = "Error adding contacts: ";
pub const FILES_SUCCESS: &str = "Contact files created. Please save them to add to your contacts.";
pub const FILES_FAILURE_PREFIX: &str = "Error creating contact files: ";
pub const GENERIC_DETAIL: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] VcardError),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no staged document for {0}")]
    UnknownUrl(String),
    #[error("{0}")]
    Download(String),
}

/// The platform's native contacts capability.
#[async_trait]
pub trait ContactsPicker: Send + Sync {
    async fn select(
        &self,
        request: &PickerRequest,
        contacts: &[ExportEntry],
    ) -> Result<(), PickerError>;
}

/// Feature detection for [`ContactsPicker`], consulted once per export.
pub trait CapabilityProbe: Send + Sync {
    fn native_contacts(&self) -> Option<Arc<dyn ContactsPicker>>;
}

/// Where fallback vCard files go.
///
/// Mirrors the object-URL dance of a browser download: stage the document,
/// trigger the download, then revoke the staged handle.
pub trait DownloadSink: Send + Sync {
    fn create_url(&self, file: &VcardFile) -> Result<String, ExportError>;
    fn download(&self, url: &str, filename: &str) -> Result<(), ExportError>;
    fn revoke_url(&self, url: &str);
}

/// Revokes its URL when dropped, on success and failure alike.
struct StagedUrl<'a> {
    sink: &'a dyn DownloadSink,
    url: String,
}

impl Drop for StagedUrl<'_> {
    fn drop(&mut self) {
        self.sink.revoke_url(&self.url);
    }
}

/// Result of running one strategy: which path ran plus the banner to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyReport {
    pub outcome: ExportOutcome,
    pub level: NotificationLevel,
    pub text: String,
}

pub enum ExportStrategy {
    Native(Arc<dyn ContactsPicker>),
    Files(Arc<dyn DownloadSink>),
}

impl ExportStrategy {
    pub fn detect(probe: &dyn CapabilityProbe, downloads: &Arc<dyn DownloadSink>) -> Self {
        match probe.native_contacts() {
            Some(picker) => ExportStrategy::Native(picker),
            None => ExportStrategy::Files(downloads.clone()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportStrategy::Native(_) => "native",
            ExportStrategy::Files(_) => "files",
        }
    }

    pub async fn run(&self, entries: &[ExportEntry]) -> StrategyReport {
        match self {
            ExportStrategy::Native(picker) => export_native(picker.as_ref(), entries).await,
            ExportStrategy::Files(sink) => export_files(sink.as_ref(), entries),
        }
    }
}

async fn export_native(picker: &dyn ContactsPicker, entries: &[ExportEntry]) -> StrategyReport {
    match picker.select(&PickerRequest::default(), entries).await {
        Ok(()) => {
            tracing::info!("Handed {} contacts to native picker", entries.len());
            StrategyReport {
                outcome: ExportOutcome::Native {
                    count: entries.len(),
                },
                level: NotificationLevel::Success,
                text: NATIVE_SUCCESS.to_string(),
            }
        }
        Err(e) => {
            tracing::error!("Native contacts export failed: {}", e);
            StrategyReport {
                outcome: ExportOutcome::NativeFailed,
                level: NotificationLevel::Error,
                text: format!("{NATIVE_FAILURE_PREFIX}{}", detail_or_generic(&e)),
            }
        }
    }
}

fn export_files(sink: &dyn DownloadSink, entries: &[ExportEntry]) -> StrategyReport {
    let mut written = Vec::with_capacity(entries.len());

    for entry in entries {
        match write_one(sink, entry) {
            Ok(filename) => written.push(filename),
            Err(e) => {
                tracing::error!(
                    "vCard export stopped at '{}' after {} files: {}",
                    entry.name,
                    written.len(),
                    e
                );
                return StrategyReport {
                    outcome: ExportOutcome::FilesFailed { written },
                    level: NotificationLevel::Error,
                    text: format!("{FILES_FAILURE_PREFIX}{}", detail_or_generic(&e)),
                };
            }
        }
    }

    tracing::info!("Created {} vCard files", written.len());
    StrategyReport {
        outcome: ExportOutcome::Files { written },
        level: NotificationLevel::Success,
        text: FILES_SUCCESS.to_string(),
    }
}

fn write_one(sink: &dyn DownloadSink, entry: &ExportEntry) -> Result<String, ExportError> {
    let file = VcardFile::for_entry(entry)?;
    let staged = StagedUrl {
        sink,
        url: sink.create_url(&file)?,
    };
    sink.download(&staged.url, &file.filename)?;
    Ok(file.filename)
}

fn detail_or_generic(err: &dyn Display) -> String {
    let detail = err.to_string();
    if detail.trim().is_empty() {
        GENERIC_DETAIL.to_string()
    } else {
        detail
    }
}
