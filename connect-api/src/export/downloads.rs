use contact_format::VcardFile;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

use super::{DownloadSink, ExportError};

/// Writes downloaded vCards into a directory.
///
/// Documents are staged in memory under a `blob:` URL until downloaded or
/// revoked, so a revoked URL can no longer be written.
pub struct DirectoryDownloads {
    directory: PathBuf,
    staged: Mutex<HashMap<String, String>>,
}

impl DirectoryDownloads {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            staged: Mutex::new(HashMap::new()),
        }
    }

    pub fn staged_count(&self) -> usize {
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Contact names are used verbatim except for path separators.
fn safe_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}

impl DownloadSink for DirectoryDownloads {
    fn create_url(&self, file: &VcardFile) -> Result<String, ExportError> {
        let url = format!("blob:{}", Uuid::new_v4());
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone(), file.content.clone());
        Ok(url)
    }

    fn download(&self, url: &str, filename: &str) -> Result<(), ExportError> {
        let content = self
            .staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
            .ok_or_else(|| ExportError::UnknownUrl(url.to_string()))?;

        std::fs::create_dir_all(&self.directory).map_err(|source| ExportError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let path = self.directory.join(safe_filename(filename));
        std::fs::write(&path, content).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    fn revoke_url(&self, url: &str) {
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ExportEntry;

    fn file(name: &str, tel: &str) -> VcardFile {
        VcardFile::for_entry(&ExportEntry {
            name: name.to_string(),
            tel: tel.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_download_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloads::new(dir.path().join("out"));
        let vcard = file("USF Public Safety", "+14154222911");

        let url = sink.create_url(&vcard).unwrap();
        assert!(url.starts_with("blob:"));
        sink.download(&url, &vcard.filename).unwrap();
        sink.revoke_url(&url);

        let path = dir.path().join("out/USF Public Safety.vcf");
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, vcard.content);
        assert!(written.contains("TEL;TYPE=CELL:+14154222911"));
        assert_eq!(sink.staged_count(), 0);
    }

    #[test]
    fn test_revoked_url_cannot_be_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloads::new(dir.path());
        let vcard = file("Alumni", "");

        let url = sink.create_url(&vcard).unwrap();
        sink.revoke_url(&url);

        let err = sink.download(&url, &vcard.filename).unwrap_err();
        assert!(matches!(err, ExportError::UnknownUrl(u) if u == url));
    }

    #[test]
    fn test_separators_do_not_escape_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloads::new(dir.path());
        let vcard = file("Admissions/Transfer", "1");

        let url = sink.create_url(&vcard).unwrap();
        sink.download(&url, &vcard.filename).unwrap();

        assert!(dir.path().join("Admissions_Transfer.vcf").exists());
    }
}
