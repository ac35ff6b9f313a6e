//! Client Picker Component
//!
//! Loads the client list (with built-in fallback data when the backend
//! is unreachable), filters it by name or shop, and holds the selected
//! client for the editor. Selecting a client fetches its detail record
//! for the running balance.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::calc::format_amount;
use crate::components::input_value;
use crate::context::AppContext;
use crate::models::Client;

#[component]
pub fn ClientPicker(selected: RwSignal<Option<Client>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (clients, set_clients) = signal(Vec::<Client>::new());
    let (search, set_search) = signal(String::new());

    // Load clients on mount; fall back to sample data so the page
    // stays usable without the backend.
    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_clients().await {
                Ok(list) => {
                    let _ = set_clients.try_set(list);
                }
                Err(err) => {
                    web_sys::console::warn_1(
                        &format!("client list fetch failed: {err}").into(),
                    );
                    ctx.toast_warn("Could not load clients; showing sample data");
                    let _ = set_clients.try_set(api::sample_clients());
                }
            }
        });
    });

    let filtered = Memo::new(move |_| {
        let needle = search.get().trim().to_lowercase();
        clients
            .get()
            .into_iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.shop_name.to_lowercase().contains(&needle)
            })
            .collect::<Vec<_>>()
    });

    let select_client = move |client: Client| {
        let id = client.id.clone();
        selected.set(Some(client));
        spawn_local(async move {
            // The detail record carries the running balance; keep the
            // summary if the fetch fails.
            if let Ok(detail) = api::get_client(&id).await {
                let _ = selected.try_set(Some(detail));
            }
        });
    };

    view! {
        <div class="client-picker">
            {move || match selected.get() {
                Some(client) => view! {
                    <div class="client-card">
                        <div class="client-name">{client.name.clone()}</div>
                        <div class="client-shop">{client.shop_name.clone()}</div>
                        <div class="client-phone">{client.phone_number.clone()}</div>
                        <div class="client-balance">
                            {client.balance
                                .map(|b| format!("Balance: {}", format_amount(b)))
                                .unwrap_or_default()}
                        </div>
                        <button
                            class="change-client-btn"
                            on:click=move |_| selected.set(None)
                        >
                            "Change client"
                        </button>
                    </div>
                }.into_any(),
                None => view! {
                    <div class="client-search">
                        <input
                            type="text"
                            placeholder="Search client or shop..."
                            prop:value=move || search.get()
                            on:input=move |ev| set_search.set(input_value(&ev))
                        />
                        <ul class="client-list">
                            <For
                                each=move || filtered.get()
                                key=|client| client.id.clone()
                                children=move |client: Client| {
                                    let label = if client.shop_name.is_empty() {
                                        client.name.clone()
                                    } else {
                                        format!("{} - {}", client.name, client.shop_name)
                                    };
                                    let pick = client.clone();
                                    view! {
                                        <li>
                                            <button
                                                class="client-option"
                                                on:click=move |_| select_client(pick.clone())
                                            >
                                                {label}
                                            </button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}
