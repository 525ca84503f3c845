//! Toast notifications.
//!
//! Toasts live in a container that is created on first use. Each toast is
//! dismissed automatically after the configured timeout unless the user
//! closed it first. Server-rendered flash alerts get the same treatment at
//! page start.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopsphere_core::Severity;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::presenter::{ElementId, Presenter, Toast, ToastId};

/// A flash alert rendered by the server with the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashAlert {
    pub id: ElementId,
    /// Alerts marked `alert-permanent` stay until the user closes them
    #[serde(default)]
    pub permanent: bool,
}

#[derive(Debug, Default)]
struct NotifierState {
    container_created: bool,
    next_id: u64,
    shown: HashSet<ToastId>,
}

struct Inner {
    presenter: Arc<dyn Presenter>,
    timeout: Duration,
    state: Mutex<NotifierState>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, NotifierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Notification service.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    /// Create a notifier whose toasts auto-dismiss after `timeout`.
    #[must_use]
    pub fn new(presenter: Arc<dyn Presenter>, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                presenter,
                timeout,
                state: Mutex::new(NotifierState::default()),
            }),
        }
    }

    /// Show a toast and schedule its automatic dismissal.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let id = {
            let mut state = self.inner.lock();
            if !state.container_created {
                self.inner.presenter.create_notification_container();
                state.container_created = true;
            }

            state.next_id += 1;
            let id = ToastId::new(state.next_id);
            state.shown.insert(id);

            let toast = Toast {
                id,
                message: message.into(),
                severity,
            };
            debug!(%id, severity = %toast.severity, message = %toast.message, "Showing notification");
            self.inner.presenter.append_toast(&toast);
            id
        };

        let notifier = self.clone();
        self.after_timeout(move || {
            if notifier.dismiss(id) {
                debug!(%id, "Notification dismissed automatically");
            }
        });
        id
    }

    /// Close a toast; returns false if it was already closed.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut state = self.inner.lock();
        if state.shown.remove(&id) {
            self.inner.presenter.close_toast(id);
            true
        } else {
            false
        }
    }

    /// Whether a toast is still on screen.
    #[must_use]
    pub fn is_showing(&self, id: ToastId) -> bool {
        self.inner.lock().shown.contains(&id)
    }

    /// Schedule automatic closing of server-rendered, non-permanent alerts.
    pub fn init_flash_alerts(&self, alerts: &[FlashAlert]) {
        for alert in alerts.iter().filter(|alert| !alert.permanent) {
            let presenter = Arc::clone(&self.inner.presenter);
            let id = alert.id.clone();
            self.after_timeout(move || {
                if presenter.is_alert_shown(&id) {
                    presenter.close_alert(&id);
                }
            });
        }
    }

    /// Run `task` once the notification timeout has elapsed.
    fn after_timeout<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let timeout = self.inner.timeout;
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(timeout).await;
                    task();
                });
            }
            Err(e) => warn!(error = %e, "No async runtime, notification will not auto-dismiss"),
        }
    }
}
