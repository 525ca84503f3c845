//! Recording presenter for tests.
//!
//! Available to this crate's unit tests and, through the `test-support`
//! feature, to the integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use shopsphere_core::{ProductId, Severity};
use url::Url;

use crate::backend::LikeStatus;
use crate::presenter::{Download, ElementId, Presenter, Toast, ToastId};

/// A presenter call, as recorded by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    InitTooltips(Vec<ElementId>),
    Confirm(String),
    CartBadge { count: u32, visible: bool },
    CreateNotificationContainer,
    AppendToast(Toast),
    CloseToast(ToastId),
    CloseAlert(ElementId),
    CreateLoadingOverlay,
    LoadingOverlayVisible(bool),
    ObserveImage(ElementId),
    UnobserveImage(ElementId),
    ImageSource { image: ElementId, src: String },
    AddClass { element: ElementId, class: String },
    RemoveClass { element: ElementId, class: String },
    CustomValidity { field: ElementId, message: String },
    Download(Download),
    Navigate(Url),
    Like { product_id: ProductId, status: LikeStatus },
}

#[derive(Default)]
struct Recorded {
    calls: Vec<Call>,
    shown_alerts: HashSet<ElementId>,
}

/// Presenter double that records every call.
#[derive(Default)]
pub struct RecordingPresenter {
    recorded: Mutex<Recorded>,
    tables: HashMap<ElementId, Vec<Vec<String>>>,
    confirm_answer: bool,
}

impl RecordingPresenter {
    /// Create a presenter that declines confirmations and has no tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation with `answer`.
    #[must_use]
    pub fn with_confirm_answer(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }

    /// Serve `rows` for the table `id`.
    #[must_use]
    pub fn with_table(mut self, id: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect();
        self.tables.insert(ElementId::new(id), rows);
        self
    }

    /// Mark a server-rendered alert as shown.
    #[must_use]
    pub fn with_shown_alert(self, id: &str) -> Self {
        self.lock().shown_alerts.insert(ElementId::new(id));
        self
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: Call) {
        self.lock().calls.push(call);
    }

    /// All recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.lock().calls.clear();
    }

    /// Toasts appended so far, as `(message, severity)`.
    #[must_use]
    pub fn toasts(&self) -> Vec<(String, Severity)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::AppendToast(toast) => Some((toast.message.clone(), toast.severity)),
                _ => None,
            })
            .collect()
    }

    /// Number of calls matching a predicate.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    /// The last overlay visibility rendered, if any.
    #[must_use]
    pub fn overlay_visible(&self) -> Option<bool> {
        self.lock().calls.iter().rev().find_map(|call| match call {
            Call::LoadingOverlayVisible(visible) => Some(*visible),
            _ => None,
        })
    }

    /// The last cart badge rendered, as `(count, visible)`.
    #[must_use]
    pub fn cart_badge(&self) -> Option<(u32, bool)> {
        self.lock().calls.iter().rev().find_map(|call| match call {
            Call::CartBadge { count, visible } => Some((*count, *visible)),
            _ => None,
        })
    }

    /// URLs navigated to.
    #[must_use]
    pub fn navigations(&self) -> Vec<Url> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Navigate(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// The last custom validity message set on a field.
    #[must_use]
    pub fn validity(&self, field: &str) -> Option<String> {
        self.lock().calls.iter().rev().find_map(|call| match call {
            Call::CustomValidity { field: f, message } if f.as_str() == field => {
                Some(message.clone())
            }
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn init_tooltips(&self, elements: &[ElementId]) {
        self.record(Call::InitTooltips(elements.to_vec()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.record(Call::Confirm(message.to_string()));
        self.confirm_answer
    }

    fn render_cart_badge(&self, count: u32, visible: bool) {
        self.record(Call::CartBadge { count, visible });
    }

    fn create_notification_container(&self) {
        self.record(Call::CreateNotificationContainer);
    }

    fn append_toast(&self, toast: &Toast) {
        self.record(Call::AppendToast(toast.clone()));
    }

    fn close_toast(&self, id: ToastId) {
        self.record(Call::CloseToast(id));
    }

    fn is_alert_shown(&self, alert: &ElementId) -> bool {
        self.lock().shown_alerts.contains(alert)
    }

    fn close_alert(&self, alert: &ElementId) {
        let mut recorded = self.lock();
        recorded.shown_alerts.remove(alert);
        recorded.calls.push(Call::CloseAlert(alert.clone()));
    }

    fn create_loading_overlay(&self) {
        self.record(Call::CreateLoadingOverlay);
    }

    fn set_loading_overlay_visible(&self, visible: bool) {
        self.record(Call::LoadingOverlayVisible(visible));
    }

    fn observe_image(&self, image: &ElementId) {
        self.record(Call::ObserveImage(image.clone()));
    }

    fn unobserve_image(&self, image: &ElementId) {
        self.record(Call::UnobserveImage(image.clone()));
    }

    fn set_image_source(&self, image: &ElementId, src: &str) {
        self.record(Call::ImageSource {
            image: image.clone(),
            src: src.to_string(),
        });
    }

    fn add_class(&self, element: &ElementId, class: &str) {
        self.record(Call::AddClass {
            element: element.clone(),
            class: class.to_string(),
        });
    }

    fn remove_class(&self, element: &ElementId, class: &str) {
        self.record(Call::RemoveClass {
            element: element.clone(),
            class: class.to_string(),
        });
    }

    fn set_custom_validity(&self, field: &ElementId, message: &str) {
        self.record(Call::CustomValidity {
            field: field.clone(),
            message: message.to_string(),
        });
    }

    fn table_rows(&self, table: &ElementId) -> Option<Vec<Vec<String>>> {
        self.tables.get(table).cloned()
    }

    fn download(&self, file: Download) {
        self.record(Call::Download(file));
    }

    fn navigate(&self, url: &Url) {
        self.record(Call::Navigate(url.clone()));
    }

    fn render_like(&self, product_id: ProductId, status: &LikeStatus) {
        self.record(Call::Like {
            product_id,
            status: *status,
        });
    }
}
