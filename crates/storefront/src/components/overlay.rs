//! Loading overlay.
//!
//! The overlay is shared by every async operation on the page. Visibility is
//! derived from a holder count: each operation holds a [`SpinnerGuard`] for
//! its duration and the overlay hides only when the last holder is gone, so
//! one request finishing cannot hide the spinner of another still in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::presenter::Presenter;

#[derive(Debug, Default)]
struct OverlayState {
    created: bool,
    /// Outstanding guards plus outstanding explicit shows
    holders: usize,
    /// Explicit `show` calls not yet matched by `hide`
    explicit: usize,
}

struct Shared {
    presenter: Arc<dyn Presenter>,
    state: Mutex<OverlayState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, OverlayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn add_holder(&self, explicit: bool) {
        let mut state = self.lock();
        if !state.created {
            self.presenter.create_loading_overlay();
            state.created = true;
        }
        state.holders += 1;
        if explicit {
            state.explicit += 1;
        }
        if state.holders == 1 {
            debug!("Showing loading overlay");
            self.presenter.set_loading_overlay_visible(true);
        }
    }

    fn release_holder(&self) {
        let mut state = self.lock();
        state.holders = state.holders.saturating_sub(1);
        if state.holders == 0 && state.created {
            debug!("Hiding loading overlay");
            self.presenter.set_loading_overlay_visible(false);
        }
    }
}

/// Reference-counted loading overlay.
#[derive(Clone)]
pub struct LoadingOverlay {
    shared: Arc<Shared>,
}

impl LoadingOverlay {
    /// Create the overlay service; the element itself is created on first show.
    #[must_use]
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        Self {
            shared: Arc::new(Shared {
                presenter,
                state: Mutex::new(OverlayState::default()),
            }),
        }
    }

    /// Hold the overlay until the returned guard is dropped.
    #[must_use = "the overlay hides again as soon as the guard is dropped"]
    pub fn acquire(&self) -> SpinnerGuard {
        self.shared.add_holder(false);
        SpinnerGuard {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Show the overlay until a matching [`hide`](Self::hide).
    pub fn show(&self) {
        self.shared.add_holder(true);
    }

    /// Release one earlier [`show`](Self::show).
    ///
    /// A hide without a matching show does nothing; guards held by in-flight
    /// operations keep the overlay visible.
    pub fn hide(&self) {
        {
            let mut state = self.shared.lock();
            if state.explicit == 0 {
                return;
            }
            state.explicit -= 1;
        }
        self.shared.release_holder();
    }

    /// Whether the overlay is currently visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shared.lock().holders > 0
    }
}

/// Keeps the loading overlay visible while alive.
#[must_use = "the overlay hides again as soon as the guard is dropped"]
pub struct SpinnerGuard {
    shared: Arc<Shared>,
}

impl SpinnerGuard {
    /// Release the overlay now rather than at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.shared.release_holder();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingPresenter};

    fn overlay() -> (Arc<RecordingPresenter>, LoadingOverlay) {
        let presenter = Arc::new(RecordingPresenter::new());
        let overlay = LoadingOverlay::new(presenter.clone());
        (presenter, overlay)
    }

    #[test]
    fn test_show_then_hide_ends_hidden() {
        let (presenter, overlay) = overlay();
        overlay.show();
        assert!(overlay.is_visible());
        overlay.hide();
        assert!(!overlay.is_visible());
        assert_eq!(presenter.overlay_visible(), Some(false));
    }

    #[test]
    fn test_hide_without_show_is_noop() {
        let (presenter, overlay) = overlay();
        overlay.hide();
        assert!(!overlay.is_visible());
        assert!(presenter.calls().is_empty());
    }

    #[test]
    fn test_element_created_once() {
        let (presenter, overlay) = overlay();
        overlay.show();
        overlay.hide();
        overlay.show();
        overlay.hide();
        assert_eq!(
            presenter.count(|c| matches!(c, Call::CreateLoadingOverlay)),
            1
        );
    }

    #[test]
    fn test_concurrent_holders_keep_overlay_visible() {
        let (presenter, overlay) = overlay();
        let first = overlay.acquire();
        let second = overlay.acquire();

        first.release();
        assert!(overlay.is_visible());
        assert_eq!(presenter.overlay_visible(), Some(true));

        drop(second);
        assert!(!overlay.is_visible());
        assert_eq!(presenter.overlay_visible(), Some(false));
    }

    #[test]
    fn test_explicit_hide_does_not_release_guards() {
        let (_presenter, overlay) = overlay();
        let guard = overlay.acquire();
        overlay.show();
        overlay.hide();
        overlay.hide();
        assert!(overlay.is_visible());
        drop(guard);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_only_transitions_are_rendered() {
        let (presenter, overlay) = overlay();
        let a = overlay.acquire();
        let b = overlay.acquire();
        drop(a);
        drop(b);
        assert_eq!(
            presenter.count(|c| matches!(c, Call::LoadingOverlayVisible(_))),
            2
        );
    }
}
