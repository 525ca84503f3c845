//! Deferred image loading.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::presenter::{ElementId, Presenter};

/// Class carried by images whose source has not been loaded yet.
pub const LAZY_CLASS: &str = "lazy";

/// An `img[data-src]` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyImage {
    pub id: ElementId,
    /// Deferred source from `data-src`
    pub data_src: String,
}

/// Whether the host can report image visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilitySupport {
    #[default]
    Observer,
    Unsupported,
}

/// One visibility report for an observed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub id: ElementId,
    pub is_intersecting: bool,
}

/// Loads deferred image sources when images become visible.
pub struct LazyImageLoader {
    presenter: Arc<dyn Presenter>,
    /// Observed images not loaded yet, by id
    observed: Mutex<HashMap<ElementId, String>>,
}

impl LazyImageLoader {
    #[must_use]
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        Self {
            presenter,
            observed: Mutex::new(HashMap::new()),
        }
    }

    /// Observe every image, or load them all now when visibility is not reported.
    pub fn init(&self, images: &[LazyImage], support: VisibilitySupport) {
        match support {
            VisibilitySupport::Observer => {
                let mut observed = self.observed.lock().unwrap_or_else(PoisonError::into_inner);
                for image in images {
                    observed.insert(image.id.clone(), image.data_src.clone());
                    self.presenter.observe_image(&image.id);
                }
            }
            VisibilitySupport::Unsupported => {
                debug!(count = images.len(), "Visibility not reported, loading images eagerly");
                for image in images {
                    self.presenter.set_image_source(&image.id, &image.data_src);
                }
            }
        }
    }

    /// Load every intersecting image that is still observed.
    ///
    /// Returns the number of images loaded.
    pub fn on_intersection(&self, entries: &[IntersectionEntry]) -> usize {
        let mut observed = self.observed.lock().unwrap_or_else(PoisonError::into_inner);
        let mut loaded = 0;
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(src) = observed.remove(&entry.id) else {
                continue;
            };
            self.presenter.set_image_source(&entry.id, &src);
            self.presenter.remove_class(&entry.id, LAZY_CLASS);
            self.presenter.unobserve_image(&entry.id);
            loaded += 1;
        }
        loaded
    }

    /// Number of images still waiting to load.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
