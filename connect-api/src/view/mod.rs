mod page;

use chrono::{Duration, Utc};
use shared_types::{ContactRecord, ExportEntry, ExportOutcome, Notification, NotificationLevel};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::export::{CapabilityProbe, DownloadSink, ExportStrategy, StrategyReport};
use crate::store::{ContactStore, StoreError};

pub const LOAD_FAILURE: &str = "Error loading contacts";
pub const NOTHING_SELECTED: &str = "Please select at least one contact";
pub const DEFAULT_NOTIFICATION_TIMEOUT_SECS: i64 = 6;

/// The view shared by every request handler. The mutex serializes all
/// mutations, so handlers observe them one at a time. It is never held
/// across the remote fetch or a native picker call.
pub type SharedView = Arc<Mutex<ContactListView>>;

pub enum ExportPlan {
    Done {
        outcome: ExportOutcome,
        notification: Notification,
    },
    Run {
        strategy: ExportStrategy,
        entries: Vec<ExportEntry>,
    },
}

/// Runs an export against the shared view without holding the lock while the
/// strategy is in flight. Returns the outcome with the banner it produced.
pub async fn export_shared(view: &SharedView) -> (ExportOutcome, Notification) {
    let (strategy, entries) = match view.lock().await.begin_export() {
        ExportPlan::Done {
            outcome,
            notification,
        } => return (outcome, notification),
        ExportPlan::Run { strategy, entries } => (strategy, entries),
    };

    let report = strategy.run(&entries).await;

    view.lock().await.finish_export(report)
}

/// Performs the one-shot store load and publishes it into the view. The
/// list stays empty, and the page keeps serving, until the fetch settles.
pub async fn populate(view: SharedView, store: ContactStore) {
    let loaded = store.load().await;
    view.lock().await.apply_load(loaded);
}

/// The contact list, its selection state, and the status banner.
pub struct ContactListView {
    contacts: Vec<ContactRecord>,
    notification: Option<Notification>,
    notification_timeout: Duration,
    probe: Arc<dyn CapabilityProbe>,
    downloads: Arc<dyn DownloadSink>,
}

impl ContactListView {
    pub fn new(
        contacts: Vec<ContactRecord>,
        probe: Arc<dyn CapabilityProbe>,
        downloads: Arc<dyn DownloadSink>,
    ) -> Self {
        Self {
            contacts,
            notification: None,
            notification_timeout: Duration::seconds(DEFAULT_NOTIFICATION_TIMEOUT_SECS),
            probe,
            downloads,
        }
    }

    /// Replaces the list with the result of the one-shot store load. A failed
    /// load leaves the list empty and shows an error banner.
    pub fn apply_load(&mut self, loaded: Result<Vec<ContactRecord>, StoreError>) {
        match loaded {
            Ok(contacts) => self.contacts = contacts,
            Err(e) => {
                tracing::warn!("Keeping an empty contact list: {}", e);
                self.contacts = Vec::new();
                self.notify(NotificationLevel::Error, LOAD_FAILURE);
            }
        }
    }

    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }

    pub fn contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    pub fn selected(&self) -> impl Iterator<Item = &ContactRecord> {
        self.contacts.iter().filter(|c| c.is_selected())
    }

    /// Flips selection for `id`. Unknown ids are ignored; returns whether a
    /// record matched.
    pub fn toggle(&mut self, id: u32) -> bool {
        match self.contacts.iter_mut().find(|c| c.id() == id) {
            Some(contact) => {
                contact.toggle();
                tracing::debug!(
                    "Contact {} is now {}",
                    id,
                    if contact.is_selected() { "selected" } else { "unselected" }
                );
                true
            }
            None => false,
        }
    }

    /// Exports the checked contacts through whichever strategy the platform
    /// supports right now.
    pub async fn export_selected(&mut self) -> ExportOutcome {
        match self.begin_export() {
            ExportPlan::Done { outcome, .. } => outcome,
            ExportPlan::Run { strategy, entries } => {
                let report = strategy.run(&entries).await;
                self.finish_export(report).0
            }
        }
    }

    /// First half of an export: snapshot the selection and pick a strategy.
    /// An empty selection is settled here with a warning.
    pub fn begin_export(&mut self) -> ExportPlan {
        let entries: Vec<ExportEntry> = self.selected().map(ExportEntry::from).collect();

        if entries.is_empty() {
            return ExportPlan::Done {
                outcome: ExportOutcome::NothingSelected,
                notification: self.notify(NotificationLevel::Warning, NOTHING_SELECTED),
            };
        }

        let strategy = ExportStrategy::detect(self.probe.as_ref(), &self.downloads);
        tracing::info!(
            "Exporting {} contacts via {} strategy",
            entries.len(),
            strategy.name()
        );

        ExportPlan::Run { strategy, entries }
    }

    /// Second half of an export: publish the strategy's banner.
    pub fn finish_export(&mut self, report: StrategyReport) -> (ExportOutcome, Notification) {
        let notification = self.notify(report.level, report.text);
        (report.outcome, notification)
    }

    /// The banner, if it is still showing.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification_at(Utc::now().timestamp_millis())
    }

    pub fn notification_at(&self, now_ms: i64) -> Option<&Notification> {
        let timeout_ms = self.notification_timeout.num_milliseconds();
        self.notification
            .as_ref()
            .filter(|n| n.is_visible_at(now_ms, timeout_ms))
    }

    /// The most recent banner regardless of visibility.
    pub fn last_notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        if let Some(notification) = self.notification.as_mut() {
            notification.dismiss();
        }
    }

    pub fn render(&self) -> String {
        page::render_page(&self.contacts, self.notification())
    }

    fn notify(&mut self, level: NotificationLevel, text: impl Into<String>) -> Notification {
        let notification = Notification::new(level, text, Utc::now().timestamp_millis());
        self.notification = Some(notification.clone());
        notification
    }
}
