//! Voucher Desk Frontend App
//!
//! Two pages sharing one calculation model: the voucher editor and the
//! read-only voucher view with PDF export.

use leptos::prelude::*;

use crate::components::{ToastHost, VoucherEditor, VoucherView};
use crate::context::{AppContext, Toast};

/// Page selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Editor,
    /// Read-only view of a stored voucher, addressed by backend id.
    Viewer(String),
}

/// Parse `#/voucher/<id>` into a page; anything else is the editor.
pub fn page_from_hash(hash: &str) -> Page {
    let path = hash.trim_start_matches('#').trim_start_matches('/');
    match path.strip_prefix("voucher/") {
        Some(id) if !id.is_empty() => Page::Viewer(id.to_string()),
        _ => Page::Editor,
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Deep links land directly on the viewer.
    let initial = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| page_from_hash(&hash))
        .unwrap_or(Page::Editor);

    let (page, set_page) = signal(initial);
    let (toasts, set_toasts) = signal(Vec::<Toast>::new());

    // Provide context to all children
    provide_context(AppContext::new((toasts, set_toasts), (page, set_page)));

    view! {
        <div class="app-layout">
            {move || match page.get() {
                Page::Editor => view! { <VoucherEditor /> }.into_any(),
                Page::Viewer(id) => view! { <VoucherView voucher_id=id /> }.into_any(),
            }}
            <ToastHost />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_hash() {
        assert_eq!(page_from_hash(""), Page::Editor);
        assert_eq!(page_from_hash("#/"), Page::Editor);
        assert_eq!(page_from_hash("#/voucher/"), Page::Editor);
        assert_eq!(
            page_from_hash("#/voucher/abc123"),
            Page::Viewer("abc123".to_string())
        );
        assert_eq!(
            page_from_hash("voucher/abc123"),
            Page::Viewer("abc123".to_string())
        );
    }
}
