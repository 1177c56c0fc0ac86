use crate::error::SinkError;

use super::{
    notices::Notification,
    types::{DispatchEvent, Location, Presence},
};

/// Remote store holding the single "current dispatch" record at `path`.
/// Writes overwrite; nothing is appended.
pub trait DispatchSink {
    fn write(&mut self, path: &str, event: &DispatchEvent) -> Result<(), SinkError>;
}

pub trait NotificationService {
    fn notify(&mut self, notification: &Notification, presence: Presence);
}

pub trait LocationProvider {
    fn last_known(&self) -> Option<Location>;
}

impl<T: DispatchSink + ?Sized> DispatchSink for &mut T {
    fn write(&mut self, path: &str, event: &DispatchEvent) -> Result<(), SinkError> {
        (**self).write(path, event)
    }
}

impl<T: NotificationService + ?Sized> NotificationService for &mut T {
    fn notify(&mut self, notification: &Notification, presence: Presence) {
        (**self).notify(notification, presence)
    }
}

impl<T: LocationProvider + ?Sized> LocationProvider for &T {
    fn last_known(&self) -> Option<Location> {
        (**self).last_known()
    }
}
