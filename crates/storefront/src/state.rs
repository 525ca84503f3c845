//! The storefront facade shared by page event handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shopsphere_core::{DateFormatError, ProductId, Severity};
use tracing::{debug, info, warn};

use crate::backend::StorefrontApi;
use crate::components::{
    CartBadge, CartCountSource, CartQuantityClick, FormValidator, IntersectionEntry, LazyImageLoader,
    LoadingOverlay, LogSearch, Notifier, SearchBox, SearchHook, StubCartCount, SubmitDecision,
};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::page::PageSnapshot;
use crate::presenter::{ElementId, Presenter, ToastId};
use crate::services::storage::StorageBackend;
use crate::services::{ActionResult, LocalStorage, ProductActions, SelectedFile};

/// Builds a [`Storefront`] with optional pluggable parts.
pub struct StorefrontBuilder {
    config: StorefrontConfig,
    presenter: Arc<dyn Presenter>,
    search_hook: Option<Arc<dyn SearchHook>>,
    cart_count: Option<Arc<dyn CartCountSource>>,
    storage: Option<Arc<dyn StorageBackend>>,
}

impl StorefrontBuilder {
    #[must_use]
    pub fn new(config: StorefrontConfig, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            config,
            presenter,
            search_hook: None,
            cart_count: None,
            storage: None,
        }
    }

    /// Receive debounced search queries (default: log them).
    #[must_use]
    pub fn search_hook(mut self, hook: Arc<dyn SearchHook>) -> Self {
        self.search_hook = Some(hook);
        self
    }

    /// Source of the cart badge count (default: always 0).
    #[must_use]
    pub fn cart_count_source(mut self, source: Arc<dyn CartCountSource>) -> Self {
        self.cart_count = Some(source);
        self
    }

    /// Local storage backend (default: from `storage_path` in the config).
    #[must_use]
    pub fn storage(mut self, backend: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(backend);
        self
    }

    /// Build the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn build(self) -> Result<Storefront> {
        let Self {
            config,
            presenter,
            search_hook,
            cart_count,
            storage,
        } = self;

        let api = StorefrontApi::new(&config)?;
        let overlay = LoadingOverlay::new(Arc::clone(&presenter));
        let notifier = Notifier::new(Arc::clone(&presenter), config.notification_timeout);
        let badge = Arc::new(CartBadge::new(
            Arc::clone(&presenter),
            cart_count.unwrap_or_else(|| Arc::new(StubCartCount)),
        ));
        let products = ProductActions::new(
            api,
            Arc::clone(&presenter),
            overlay.clone(),
            notifier.clone(),
            Arc::clone(&badge),
        );
        let storage = storage.map_or_else(|| LocalStorage::from_config(&config), LocalStorage::new);

        Ok(Storefront {
            inner: Arc::new(StorefrontInner {
                forms: FormValidator::new(Arc::clone(&presenter)),
                images: LazyImageLoader::new(Arc::clone(&presenter)),
                search_hook: search_hook.unwrap_or_else(|| Arc::new(LogSearch)),
                search: Mutex::new(None),
                config,
                presenter,
                overlay,
                notifier,
                badge,
                products,
                storage,
            }),
        })
    }
}

/// Storefront UI layer.
///
/// This struct is cheaply cloneable via `Arc`; hosts keep one per page and
/// route page events into it.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    presenter: Arc<dyn Presenter>,
    overlay: LoadingOverlay,
    notifier: Notifier,
    badge: Arc<CartBadge>,
    products: ProductActions,
    forms: FormValidator,
    images: LazyImageLoader,
    search_hook: Arc<dyn SearchHook>,
    /// Present once the page reported a search input
    search: Mutex<Option<SearchBox>>,
    storage: LocalStorage,
}

impl Storefront {
    /// Build a storefront with default hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, presenter: Arc<dyn Presenter>) -> Result<Self> {
        StorefrontBuilder::new(config, presenter).build()
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the loading overlay service.
    #[must_use]
    pub fn overlay(&self) -> &LoadingOverlay {
        &self.inner.overlay
    }

    /// Get a reference to the notification service.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Wire every component to the page once it is ready.
    pub fn init(&self, page: &PageSnapshot) {
        if !page.tooltips.is_empty() {
            self.inner.presenter.init_tooltips(&page.tooltips);
        }

        self.inner.badge.set_present(page.has_cart_badge);
        self.inner.badge.update();

        *self.search_box() = page
            .has_search_input
            .then(|| SearchBox::new(&self.inner.config.search, Arc::clone(&self.inner.search_hook)));

        self.inner.forms.register(&page.forms);
        self.inner.images.init(&page.lazy_images, page.visibility);
        self.inner.notifier.init_flash_alerts(&page.alerts);

        info!(
            forms = page.forms.len(),
            lazy_images = page.lazy_images.len(),
            alerts = page.alerts.len(),
            search = page.has_search_input,
            "Storefront initialized"
        );
    }

    fn search_box(&self) -> MutexGuard<'_, Option<SearchBox>> {
        self.inner.search.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Page events

    /// A `.cart-quantity-btn` was clicked.
    pub async fn on_cart_quantity_click(&self, click: CartQuantityClick) -> ActionResult {
        self.update_cart_item_quantity(click).await
    }

    /// A `.cart-quantity-btn` was clicked, reported as its raw `data-action`,
    /// `data-item-id` and the line's current quantity.
    ///
    /// Buttons whose attributes do not parse are ignored with a warning.
    pub async fn on_cart_quantity_button(
        &self,
        action: &str,
        item_id: &str,
        current_quantity: &str,
    ) -> Option<ActionResult> {
        match CartQuantityClick::from_attributes(action, item_id, current_quantity) {
            Ok(click) => Some(self.on_cart_quantity_click(click).await),
            Err(e) => {
                warn!(error = %e, action, item_id, "Ignoring quantity button");
                None
            }
        }
    }

    /// The `#searchInput` value changed.
    pub fn on_search_input(&self, value: &str) {
        match self.search_box().as_ref() {
            Some(search) => search.on_input(value),
            None => debug!("No search input on page, ignoring input"),
        }
    }

    /// A field of a validated form changed.
    pub fn on_field_input(&self, field: &ElementId, value: &str) {
        self.inner.forms.on_field_input(field, value);
    }

    /// A form is about to be submitted.
    #[must_use]
    pub fn on_form_submit(&self, form: &ElementId) -> SubmitDecision {
        self.inner.forms.on_form_submit(form)
    }

    /// Observed images changed visibility; returns how many were loaded.
    pub fn on_images_intersecting(&self, entries: &[IntersectionEntry]) -> usize {
        self.inner.images.on_intersection(entries)
    }

    /// The user closed a toast.
    pub fn on_notification_dismissed(&self, id: ToastId) -> bool {
        self.inner.notifier.dismiss(id)
    }

    // Product actions

    /// Add a product to the wishlist.
    pub async fn add_to_wishlist(&self, product_id: ProductId) -> ActionResult {
        self.inner.products.add_to_wishlist(product_id).await
    }

    /// Add one unit of a product to the cart, in `size` (default `M`).
    pub async fn quick_add_to_cart(&self, product_id: ProductId, size: Option<&str>) -> ActionResult {
        self.inner.products.quick_add_to_cart(product_id, size).await
    }

    /// Toggle the user's like on a product.
    pub async fn toggle_like(&self, product_id: ProductId) -> ActionResult {
        self.inner.products.toggle_like(product_id).await
    }

    /// Set a cart line's quantity from a quantity button click.
    pub async fn update_cart_item_quantity(&self, click: CartQuantityClick) -> ActionResult {
        self.inner.products.update_cart_item_quantity(click).await
    }

    /// Refresh the cart badge; `None` when the page has no badge.
    pub fn update_cart_badge(&self) -> Option<u32> {
        self.inner.badge.update()
    }

    // Notifications & overlay

    /// Show a toast that dismisses itself after the configured timeout.
    pub fn show_notification(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.inner.notifier.show(message, severity)
    }

    /// Show the loading overlay until a matching [`hide_loading_spinner`](Self::hide_loading_spinner).
    pub fn show_loading_spinner(&self) {
        self.inner.overlay.show();
    }

    /// Release one earlier [`show_loading_spinner`](Self::show_loading_spinner).
    pub fn hide_loading_spinner(&self) {
        self.inner.overlay.hide();
    }

    // Utilities

    /// Format an amount as Indian rupees, e.g. `₹12,34,567.89`.
    #[must_use]
    pub fn format_currency(amount: Decimal) -> String {
        shopsphere_core::format_inr(amount)
    }

    /// Format a date the `en-IN` way, e.g. `16 Oct 2026`.
    #[must_use]
    pub fn format_date(date: NaiveDate) -> String {
        shopsphere_core::format_date(date)
    }

    /// Format a `YYYY-MM-DD` or RFC 3339 string the `en-IN` way.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not a recognised date.
    pub fn format_date_str(date: &str) -> std::result::Result<String, DateFormatError> {
        shopsphere_core::format_date_str(date)
    }

    /// Ask the user to confirm an action.
    #[must_use]
    pub fn confirm_action(&self, message: &str) -> bool {
        self.inner.presenter.confirm(message)
    }

    /// Download a table as CSV; returns false when there is no such table.
    pub fn export_table_to_csv(&self, table: &ElementId, filename: &str) -> bool {
        crate::services::export_table_to_csv(self.inner.presenter.as_ref(), table, filename)
    }

    /// Show a selected image file in a preview element.
    ///
    /// Returns false when no file was selected.
    pub fn preview_image(&self, file: Option<&SelectedFile>, preview: &ElementId) -> bool {
        let Some(file) = file else {
            return false;
        };
        debug!(file = %file.name, bytes = file.bytes.len(), %preview, "Previewing image");
        self.inner
            .presenter
            .set_image_source(preview, &file.to_data_url());
        true
    }

    /// Store a JSON value in local storage; false when it could not be stored.
    pub fn set_local_storage<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        self.inner.storage.set(key, value)
    }

    /// Read a JSON value from local storage.
    #[must_use]
    pub fn get_local_storage<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.inner.storage.get(key)
    }

    /// Remove a local storage entry.
    pub fn remove_local_storage(&self, key: &str) -> bool {
        self.inner.storage.remove(key)
    }

    /// Record a named event.
    pub fn track_event(name: &str, data: &serde_json::Value) {
        crate::services::track_event(name, data);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::components::{FieldKind, FieldSpec, FlashAlert, FormSpec, LazyImage};
    use crate::services::MemoryStorage;
    use crate::testing::{Call, RecordingPresenter};

    struct Recorded(Mutex<Vec<String>>);

    impl SearchHook for Recorded {
        fn search(&self, query: &str) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(query.to_string());
        }
    }

    struct ThreeItems;

    impl CartCountSource for ThreeItems {
        fn cart_items_count(&self) -> u32 {
            3
        }
    }

    fn config() -> StorefrontConfig {
        StorefrontConfig::new(Url::parse("http://127.0.0.1:9/").unwrap())
    }

    fn storefront(presenter: &Arc<RecordingPresenter>) -> Storefront {
        Storefront::new(config(), presenter.clone()).unwrap()
    }

    fn page() -> PageSnapshot {
        PageSnapshot {
            tooltips: vec![ElementId::new("help")],
            has_cart_badge: true,
            has_search_input: true,
            forms: vec![FormSpec {
                id: ElementId::new("checkout"),
                fields: vec![FieldSpec::new("phone", FieldKind::Tel).required()],
            }],
            lazy_images: vec![LazyImage {
                id: ElementId::new("hero"),
                data_src: "/img/hero.webp".to_string(),
            }],
            alerts: vec![FlashAlert {
                id: ElementId::new("flash"),
                permanent: false,
            }],
            ..PageSnapshot::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_wires_page() {
        let presenter = Arc::new(RecordingPresenter::new().with_shown_alert("flash"));
        let hook = Arc::new(Recorded(Mutex::new(Vec::new())));
        let storefront = StorefrontBuilder::new(config(), presenter.clone())
            .search_hook(hook.clone())
            .cart_count_source(Arc::new(ThreeItems))
            .build()
            .unwrap();

        storefront.init(&page());

        assert_eq!(presenter.count(|c| matches!(c, Call::InitTooltips(_))), 1);
        assert_eq!(presenter.cart_badge(), Some((3, true)));
        assert_eq!(presenter.count(|c| matches!(c, Call::ObserveImage(_))), 1);

        storefront.on_search_input("ku");
        storefront.on_search_input("kurta");
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(*hook.0.lock().unwrap(), vec!["kurta".to_string()]);
        assert_eq!(presenter.count(|c| matches!(c, Call::CloseAlert(_))), 1);

        assert!(storefront.on_form_submit(&ElementId::new("checkout")).is_blocked());
        storefront.on_field_input(&ElementId::new("phone"), "9123456789");
        assert_eq!(
            storefront.on_form_submit(&ElementId::new("checkout")),
            SubmitDecision::Proceed
        );

        assert_eq!(
            storefront.on_images_intersecting(&[IntersectionEntry {
                id: ElementId::new("hero"),
                is_intersecting: true,
            }]),
            1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_input_without_search_box_is_ignored() {
        let presenter = Arc::new(RecordingPresenter::new());
        let hook = Arc::new(Recorded(Mutex::new(Vec::new())));
        let storefront = StorefrontBuilder::new(config(), presenter.clone())
            .search_hook(hook.clone())
            .build()
            .unwrap();
        storefront.init(&PageSnapshot::default());

        storefront.on_search_input("kurta");
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(hook.0.lock().unwrap().is_empty());
        // no badge on the page
        assert_eq!(storefront.update_cart_badge(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_and_spinner() {
        let presenter = Arc::new(RecordingPresenter::new());
        let storefront = storefront(&presenter);

        let id = storefront.show_notification("Saved", Severity::Success);
        assert!(storefront.on_notification_dismissed(id));
        assert!(!storefront.on_notification_dismissed(id));

        storefront.hide_loading_spinner();
        assert!(!storefront.overlay().is_visible());
        storefront.show_loading_spinner();
        assert!(storefront.overlay().is_visible());
        storefront.hide_loading_spinner();
        assert!(!storefront.overlay().is_visible());
    }

    #[tokio::test]
    async fn test_unparseable_quantity_button_is_ignored() {
        let presenter = Arc::new(RecordingPresenter::new());
        let storefront = storefront(&presenter);
        assert!(
            storefront
                .on_cart_quantity_button("remove", "7", "1")
                .await
                .is_none()
        );
        assert!(presenter.calls().is_empty());
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(
            Storefront::format_currency(Decimal::new(1_234_567_891, 3)),
            "₹12,34,567.89"
        );
        assert_eq!(
            Storefront::format_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()),
            "16 Oct 2026"
        );
        assert_eq!(Storefront::format_date_str("2026-10-16").unwrap(), "16 Oct 2026");
        assert!(Storefront::format_date_str("yesterday").is_err());
    }

    #[test]
    fn test_confirm_action_asks_presenter() {
        let presenter = Arc::new(RecordingPresenter::new().with_confirm_answer(true));
        let storefront = storefront(&presenter);
        assert!(storefront.confirm_action("Remove this item?"));
        assert_eq!(
            presenter.calls(),
            vec![Call::Confirm("Remove this item?".to_string())]
        );
    }

    #[test]
    fn test_export_and_preview() {
        let presenter = Arc::new(RecordingPresenter::new().with_table("t", &[&["A", "B"], &["1", "2"]]));
        let storefront = storefront(&presenter);

        assert!(storefront.export_table_to_csv(&ElementId::new("t"), "t.csv"));
        assert!(!storefront.preview_image(None, &ElementId::new("preview")));

        let file = SelectedFile {
            name: "a.gif".to_string(),
            mime_type: "image/gif".to_string(),
            bytes: b"GIF".to_vec(),
        };
        assert!(storefront.preview_image(Some(&file), &ElementId::new("preview")));
        assert_eq!(
            presenter.count(|c| *c
                == Call::ImageSource {
                    image: ElementId::new("preview"),
                    src: "data:image/gif;base64,R0lG".to_string()
                }),
            1
        );
    }

    #[test]
    fn test_local_storage_helpers() {
        let presenter = Arc::new(RecordingPresenter::new());
        let storefront = StorefrontBuilder::new(config(), presenter)
            .storage(Arc::new(MemoryStorage::new()))
            .build()
            .unwrap();

        assert!(storefront.set_local_storage("filters", &json!({"size": "M"})));
        assert_eq!(
            storefront.get_local_storage::<serde_json::Value>("filters"),
            Some(json!({"size": "M"}))
        );
        assert!(storefront.remove_local_storage("filters"));
        assert_eq!(storefront.get_local_storage::<serde_json::Value>("filters"), None);
    }
}
