//! Lifecycle notifications
//!
//! Every state-changing [`LogFile`](crate::LogFile) operation emits a
//! "before" event ahead of its side effect and an "after" event once it has
//! been applied. Observers returning `Err` from a "before" event abort the
//! operation; errors from "after" events are passed back to the caller.

use super::entry_format::FormatOptions;
use super::error::{LoggerError, Result};
use crossbeam_channel::{Sender, TrySendError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BeforeCreate,
    Create,
    BeforeOpen,
    Open,
    BeforeClose,
    Close,
    BeforeDelete,
    Delete,
    BeforeWrite,
    Write,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::BeforeCreate,
        EventKind::Create,
        EventKind::BeforeOpen,
        EventKind::Open,
        EventKind::BeforeClose,
        EventKind::Close,
        EventKind::BeforeDelete,
        EventKind::Delete,
        EventKind::BeforeWrite,
        EventKind::Write,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::BeforeCreate => "beforeCreate",
            EventKind::Create => "create",
            EventKind::BeforeOpen => "beforeOpen",
            EventKind::Open => "open",
            EventKind::BeforeClose => "beforeClose",
            EventKind::Close => "close",
            EventKind::BeforeDelete => "beforeDelete",
            EventKind::Delete => "delete",
            EventKind::BeforeWrite => "beforeWrite",
            EventKind::Write => "write",
        }
    }

    pub fn is_before(&self) -> bool {
        matches!(
            self,
            EventKind::BeforeCreate
                | EventKind::BeforeOpen
                | EventKind::BeforeClose
                | EventKind::BeforeDelete
                | EventKind::BeforeWrite
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| LoggerError::invalid_option("event", "a lifecycle event name", format!("'{}'", s)))
    }
}

/// Event-specific data
#[derive(Debug, Clone, Copy)]
pub enum EventPayload<'a> {
    None,
    /// Options of the entry about to be written
    Entry(&'a FormatOptions),
    /// Text that was just written
    Text(&'a str),
}

/// A notification with a snapshot of the log file state
#[derive(Debug, Clone, Copy)]
pub struct LogFileEvent<'a> {
    pub kind: EventKind,
    pub path: &'a Path,
    pub online: bool,
    pub payload: EventPayload<'a>,
}

impl LogFileEvent<'_> {
    /// Rendered text carried by a `write` event
    pub fn text(&self) -> Option<&str> {
        match self.payload {
            EventPayload::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn to_owned_event(&self) -> OwnedEvent {
        OwnedEvent {
            kind: self.kind,
            path: self.path.to_path_buf(),
            online: self.online,
            text: self.text().map(str::to_string),
        }
    }
}

pub trait LogFileObserver: Send + Sync {
    fn notify(&self, event: &LogFileEvent<'_>) -> Result<()>;
}

impl<F> LogFileObserver for F
where
    F: Fn(&LogFileEvent<'_>) -> Result<()> + Send + Sync,
{
    fn notify(&self, event: &LogFileEvent<'_>) -> Result<()> {
        self(event)
    }
}

/// Handle returned on registration, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: Option<EventKind>,
    observer: Arc<dyn LogFileObserver>,
}

/// Observers registered on one log file, notified in registration order
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register for one event kind, or every kind when `kind` is `None`
    pub fn subscribe(
        &mut self,
        kind: Option<EventKind>,
        observer: Arc<dyn LogFileObserver>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, observer });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Notify matching observers, stopping at the first error
    pub fn emit(&self, event: &LogFileEvent<'_>) -> Result<()> {
        self.subscriptions
            .iter()
            .filter(|subscription| subscription.kind.map_or(true, |kind| kind == event.kind))
            .try_for_each(|subscription| subscription.observer.notify(event))
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

/// Owned copy of a [`LogFileEvent`], suitable for sending elsewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedEvent {
    pub kind: EventKind,
    pub path: PathBuf,
    pub online: bool,
    pub text: Option<String>,
}

/// Forwards every notification it receives into a channel
///
/// # Example
///
/// ```
/// use rust_log_file::{ChannelObserver, EventKind, LogFile, MemoryFileSystem};
///
/// let (observer, events) = ChannelObserver::unbounded();
/// let mut log = LogFile::with_storage("/logs/app.log", MemoryFileSystem::new()).unwrap();
/// log.subscribe(None, observer);
/// log.create().unwrap();
///
/// assert_eq!(events.try_recv().unwrap().kind, EventKind::BeforeCreate);
/// assert_eq!(events.try_recv().unwrap().kind, EventKind::Create);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<OwnedEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<OwnedEvent>) -> Self {
        Self { sender }
    }

    pub fn unbounded() -> (Self, crossbeam_channel::Receiver<OwnedEvent>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl LogFileObserver for ChannelObserver {
    fn notify(&self, event: &LogFileEvent<'_>) -> Result<()> {
        match self.sender.try_send(event.to_owned_event()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(LoggerError::observer(
                event.kind.name(),
                "event channel is full",
            )),
            // Receiver gone; nobody is listening anymore
            Err(TrySendError::Disconnected(_)) => {
                tracing::trace!(event = event.kind.name(), "event channel disconnected");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn event(kind: EventKind) -> LogFileEvent<'static> {
        LogFileEvent {
            kind,
            path: Path::new("/tmp/app.log"),
            online: false,
            payload: EventPayload::None,
        }
    }

    #[test]
    fn test_event_names_roundtrip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>().unwrap(), kind);
        }
        assert!("rotate".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_before_classification() {
        let before = EventKind::ALL.iter().filter(|kind| kind.is_before()).count();
        assert_eq!(before, 5);
        assert!(!EventKind::Write.is_before());
    }

    #[test]
    fn test_registry_filters_by_kind() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        let sink = Arc::clone(&seen);
        registry.subscribe(
            Some(EventKind::Open),
            Arc::new(move |event: &LogFileEvent<'_>| -> Result<()> {
                sink.lock().push(event.kind);
                Ok(())
            }),
        );

        registry.emit(&event(EventKind::BeforeOpen)).unwrap();
        registry.emit(&event(EventKind::Open)).unwrap();
        assert_eq!(*seen.lock(), vec![EventKind::Open]);
    }

    #[test]
    fn test_registry_stops_at_first_error() {
        let calls = Arc::new(Mutex::new(0));
        let mut registry = ObserverRegistry::new();
        registry.subscribe(
            None,
            Arc::new(|event: &LogFileEvent<'_>| -> Result<()> {
                Err(LoggerError::observer(event.kind.name(), "no"))
            }),
        );
        let counter = Arc::clone(&calls);
        registry.subscribe(
            None,
            Arc::new(move |_: &LogFileEvent<'_>| -> Result<()> {
                *counter.lock() += 1;
                Ok(())
            }),
        );

        assert!(registry.emit(&event(EventKind::BeforeDelete)).is_err());
        assert_eq!(*calls.lock(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut registry = ObserverRegistry::new();
        let id = registry.subscribe(None, Arc::new(|_: &LogFileEvent<'_>| -> Result<()> { Ok(()) }));
        assert_eq!(registry.len(), 1);
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_channel_observer() {
        let (observer, receiver) = ChannelObserver::unbounded();
        let written = LogFileEvent {
            kind: EventKind::Write,
            path: Path::new("/tmp/app.log"),
            online: true,
            payload: EventPayload::Text("line\n"),
        };
        observer.notify(&written).unwrap();

        let received = receiver.try_recv().unwrap();
        assert_eq!(received.kind, EventKind::Write);
        assert_eq!(received.text.as_deref(), Some("line\n"));
        assert!(received.online);
    }

    #[test]
    fn test_bounded_channel_full_is_an_error() {
        let (sender, _receiver) = crossbeam_channel::bounded(1);
        let observer = ChannelObserver::new(sender);
        observer.notify(&event(EventKind::Open)).unwrap();
        assert!(matches!(
            observer.notify(&event(EventKind::Close)),
            Err(LoggerError::Observer { .. })
        ));
    }

    #[test]
    fn test_disconnected_channel_is_ignored() {
        let (observer, receiver) = ChannelObserver::unbounded();
        drop(receiver);
        assert!(observer.notify(&event(EventKind::Open)).is_ok());
    }
}
