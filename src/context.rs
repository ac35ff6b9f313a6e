//! Application Context
//!
//! Shared state provided via Leptos Context API: toast notifications
//! and page navigation.

use leptos::prelude::*;

use crate::app::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Warn,
    Error,
}

/// One non-blocking notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Active toasts - read
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: RwSignal<u32>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    set_page: WriteSignal<Page>,
}

impl AppContext {
    pub fn new(
        toasts: (ReadSignal<Vec<Toast>>, WriteSignal<Vec<Toast>>),
        page: (ReadSignal<Page>, WriteSignal<Page>),
    ) -> Self {
        Self {
            toasts: toasts.0,
            set_toasts: toasts.1,
            next_toast_id: RwSignal::new(0),
            page: page.0,
            set_page: page.1,
        }
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.next_toast_id.get_untracked() + 1;
        self.next_toast_id.set(id);
        self.set_toasts
            .update(|list| list.push(Toast { id, kind, message }));
    }

    pub fn toast_info(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Info, message.into());
    }

    pub fn toast_warn(&self, message: impl Into<String>) {
        let message = message.into();
        web_sys::console::warn_1(&message.clone().into());
        self.push_toast(ToastKind::Warn, message);
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        let message = message.into();
        web_sys::console::error_1(&message.clone().into());
        self.push_toast(ToastKind::Error, message);
    }

    pub fn dismiss_toast(&self, id: u32) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }

    /// Open the read-only view for a stored voucher.
    pub fn open_voucher(&self, id: String) {
        set_hash(&format!("#/voucher/{id}"));
        self.set_page.set(Page::Viewer(id));
    }

    /// Back to the editor.
    pub fn open_editor(&self) {
        set_hash("");
        self.set_page.set(Page::Editor);
    }
}

fn set_hash(hash: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(hash);
    }
}
