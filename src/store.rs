//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the toast
//! queue shared by every page.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

/// How long a toast stays on screen
const TOAST_MILLIS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "toast toast-success",
            NoticeKind::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Toasts currently shown, oldest first
    pub notifications: Vec<Notification>,
    /// Id handed to the next toast
    pub next_notification_id: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            next_notification_id: 1,
            ..Default::default()
        }
    }
}

/// Hand out the next toast id
fn allocate_id(next_id: &mut u32) -> u32 {
    let id = (*next_id).max(1);
    *next_id = id + 1;
    id
}

fn dismiss_notice(queue: &mut Vec<Notification>, id: u32) {
    queue.retain(|n| n.id != id);
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast that dismisses itself after a few seconds
pub fn store_notify(store: &AppStore, kind: NoticeKind, message: impl Into<String>) {
    // One field guard at a time: both borrow the same root store
    let id = allocate_id(&mut store.next_notification_id().write());
    store.notifications().write().push(Notification {
        id,
        kind,
        message: message.into(),
    });

    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(TOAST_MILLIS).await;
        store_dismiss(&store, id);
    });
}

pub fn store_success(store: &AppStore, message: impl Into<String>) {
    store_notify(store, NoticeKind::Success, message);
}

pub fn store_error(store: &AppStore, message: impl Into<String>) {
    store_notify(store, NoticeKind::Error, message);
}

/// Remove a toast by ID; already-dismissed ids are ignored
pub fn store_dismiss(store: &AppStore, id: u32) {
    dismiss_notice(&mut store.notifications().write(), id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: u32, kind: NoticeKind) -> Notification {
        Notification {
            id,
            kind,
            message: String::new(),
        }
    }

    #[test]
    fn test_ids_are_unique_and_start_at_one() {
        let mut state = AppState::default();
        let first = allocate_id(&mut state.next_notification_id);
        let second = allocate_id(&mut state.next_notification_id);
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(AppState::new().next_notification_id, 1);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut queue = vec![notice(1, NoticeKind::Success), notice(2, NoticeKind::Error)];
        dismiss_notice(&mut queue, 1);
        assert_eq!(queue, vec![notice(2, NoticeKind::Error)]);

        dismiss_notice(&mut queue, 1);
        assert_eq!(queue.len(), 1);
    }
}
