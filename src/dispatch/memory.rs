//! In-process collaborators for host tools and tests.

use std::collections::BTreeMap;

use crate::error::SinkError;

use super::{
    collaborators::{DispatchSink, LocationProvider, NotificationService},
    notices::Notification,
    types::{DispatchEvent, Location, Presence},
};

/// Keeps the last record written per path, the way the remote store does.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: BTreeMap<String, String>,
    logs: BTreeMap<String, Vec<String>>,
    writes: usize,
    failure: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write fail with `message` until cleared.
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    pub fn recover(&mut self) {
        self.failure = None;
    }

    pub fn record(&self, path: &str) -> Option<&str> {
        self.records.get(path).map(String::as_str)
    }

    pub fn log(&self, path: &str) -> &[String] {
        self.logs.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    #[cfg(feature = "assistant")]
    pub(crate) fn append(&mut self, path: &str, json: String) -> Result<(), SinkError> {
        self.check_failure()?;
        self.logs.entry(path.to_string()).or_default().push(json);
        Ok(())
    }

    fn check_failure(&self) -> Result<(), SinkError> {
        match &self.failure {
            Some(message) => Err(SinkError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl DispatchSink for MemorySink {
    fn write(&mut self, path: &str, event: &DispatchEvent) -> Result<(), SinkError> {
        self.check_failure()?;
        let json = event.to_json().map_err(|e| SinkError::new(e.to_string()))?;
        self.records.insert(path.to_string(), json);
        self.writes += 1;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeliveredNotification {
    pub notification: Notification,
    pub presence: Presence,
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Vec<DeliveredNotification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> &[DeliveredNotification] {
        &self.delivered
    }

    pub fn titles(&self) -> Vec<&'static str> {
        self.delivered.iter().map(|d| d.notification.title).collect()
    }

    pub fn clear(&mut self) {
        self.delivered.clear();
    }
}

impl NotificationService for RecordingNotifier {
    fn notify(&mut self, notification: &Notification, presence: Presence) {
        self.delivered.push(DeliveredNotification {
            notification: notification.clone(),
            presence,
        });
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedLocation(pub Option<Location>);

impl FixedLocation {
    pub const fn at(latitude: f64, longitude: f64) -> Self {
        Self(Some(Location::new(latitude, longitude)))
    }

    pub const fn unknown() -> Self {
        Self(None)
    }

    pub fn set(&mut self, location: Option<Location>) {
        self.0 = location;
    }
}

impl LocationProvider for FixedLocation {
    fn last_known(&self) -> Option<Location> {
        self.0
    }
}
