//! Terminal presenter.

#![allow(clippy::print_stdout)]

use std::collections::HashMap;
use std::io::{BufRead, Write};

use shopsphere_core::ProductId;
use shopsphere_storefront::backend::LikeStatus;
use shopsphere_storefront::{Download, ElementId, Presenter, Toast, ToastId};
use url::Url;

/// Prints page updates to stdout and writes downloads to disk.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    tables: HashMap<ElementId, Vec<Vec<String>>>,
}

impl ConsolePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `rows` as the table `id`.
    #[must_use]
    pub fn with_table(mut self, id: ElementId, rows: Vec<Vec<String>>) -> Self {
        self.tables.insert(id, rows);
        self
    }
}

impl Presenter for ConsolePresenter {
    fn init_tooltips(&self, _elements: &[ElementId]) {}

    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }

    fn render_cart_badge(&self, count: u32, visible: bool) {
        if visible {
            println!("cart: {count} item(s)");
        }
    }

    fn create_notification_container(&self) {}

    fn append_toast(&self, toast: &Toast) {
        println!("[{}] {}", toast.severity, toast.message);
    }

    fn close_toast(&self, _id: ToastId) {}

    fn is_alert_shown(&self, _alert: &ElementId) -> bool {
        false
    }

    fn close_alert(&self, _alert: &ElementId) {}

    fn create_loading_overlay(&self) {}

    fn set_loading_overlay_visible(&self, visible: bool) {
        if visible {
            println!("working...");
        }
    }

    fn observe_image(&self, _image: &ElementId) {}

    fn unobserve_image(&self, _image: &ElementId) {}

    fn set_image_source(&self, _image: &ElementId, _src: &str) {}

    fn add_class(&self, _element: &ElementId, _class: &str) {}

    fn remove_class(&self, _element: &ElementId, _class: &str) {}

    fn set_custom_validity(&self, _field: &ElementId, _message: &str) {}

    fn table_rows(&self, table: &ElementId) -> Option<Vec<Vec<String>>> {
        self.tables.get(table).cloned()
    }

    fn download(&self, file: Download) {
        match std::fs::write(&file.filename, &file.content) {
            Ok(()) => println!(
                "wrote {} ({}, {} bytes)",
                file.filename,
                file.mime_type,
                file.content.len()
            ),
            Err(e) => tracing::error!(filename = %file.filename, error = %e, "Download failed"),
        }
    }

    fn navigate(&self, url: &Url) {
        println!("redirected to {url}");
    }

    fn render_like(&self, product_id: ProductId, status: &LikeStatus) {
        let state = if status.liked { "liked" } else { "not liked" };
        println!("product {product_id}: {state} ({} likes)", status.likes_count);
    }
}
