//! Toast Notifications
//!
//! Non-blocking notification stack. Every toast auto-dismisses after a
//! few seconds; clicking one dismisses it immediately.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{AppContext, ToastKind};

const TOAST_DISMISS_MS: u32 = 4000;

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="toast-stack">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    spawn_local(async move {
                        TimeoutFuture::new(TOAST_DISMISS_MS).await;
                        ctx.dismiss_toast(id);
                    });
                    let class = match toast.kind {
                        ToastKind::Info => "toast info",
                        ToastKind::Warn => "toast warn",
                        ToastKind::Error => "toast error",
                    };
                    view! {
                        <div class=class on:click=move |_| ctx.dismiss_toast(id)>
                            {toast.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
