//! UI Components
//!
//! Reusable Leptos components.

mod balance_panel;
mod client_picker;
mod delete_confirm_button;
mod given_section;
mod received_section;
mod toast;
mod voucher_editor;
mod voucher_view;

pub use balance_panel::BalancePanel;
pub use client_picker::ClientPicker;
pub use delete_confirm_button::DeleteConfirmButton;
pub use given_section::GivenSectionEditor;
pub use received_section::ReceivedSectionEditor;
pub use toast::ToastHost;
pub use voucher_editor::VoucherEditor;
pub use voucher_view::VoucherView;

/// Read the current value out of an input event's target.
pub(crate) fn input_value(ev: &web_sys::Event) -> String {
    use wasm_bindgen::JsCast;
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Read the selected value out of a select element's change event.
pub(crate) fn select_value(ev: &web_sys::Event) -> String {
    use wasm_bindgen::JsCast;
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|select| select.value())
        .unwrap_or_default()
}
