//! Voucher Editor Page
//!
//! Client selection, the two item ledgers, and the manual balance
//! panel. Owns all editor state and the save orchestration: the first
//! successful save creates the voucher and adopts the server id, later
//! saves update it in place.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, VoucherUpdate};
use crate::calc::{self, SaveState};
use crate::components::{BalancePanel, ClientPicker, GivenSectionEditor, ReceivedSectionEditor};
use crate::context::AppContext;
use crate::models::{Client, GivenItem, ManualCalc, ReceivedItem, Voucher};

/// Today in the `YYYY-MM-DD` form a date input wants.
fn today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1, // js Date months are 0-based
        now.get_date()
    )
}

#[component]
pub fn VoucherEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let selected_client = RwSignal::new(None::<Client>);

    // Item ids come from one per-session counter and are never reused.
    let next_item_id = RwSignal::new(3u32);
    let given_items = RwSignal::new(vec![GivenItem::new(1)]);
    let received_items = RwSignal::new(vec![ReceivedItem::new(2)]);
    let given_date = RwSignal::new(today());
    let received_date = RwSignal::new(today());

    let voucher_id = RwSignal::new(String::new());
    let voucher_db_id = RwSignal::new(None::<String>);

    let (given_save_state, set_given_save_state) = signal(SaveState::Idle);
    let (received_save_state, set_received_save_state) = signal(SaveState::Idle);
    let (given_saved, set_given_saved) = signal(false);
    let (received_saved, set_received_saved) = signal(false);

    let manual_given = RwSignal::new(String::new());
    let manual_received = RwSignal::new(String::new());
    let operation = RwSignal::new(calc::OP_SUBTRACT_GIVEN_RECEIVED.to_string());

    let computed_given = Memo::new(move |_| calc::given_totals(&given_items.get()).total);
    let computed_received =
        Memo::new(move |_| calc::received_totals(&received_items.get()).total);

    let fresh_item_id = move || {
        let id = next_item_id.get_untracked();
        next_item_id.set(id + 1);
        id
    };

    // Fetch a voucher id once on mount; the endpoint falls back to a
    // locally generated id on failure.
    Effect::new(move |_| {
        spawn_local(async move {
            let id = api::generate_voucher_id().await;
            if voucher_id
                .try_get_untracked()
                .map(|v| v.is_empty())
                .unwrap_or(false)
            {
                let _ = voucher_id.try_set(id);
            }
        });
    });

    // When a client is picked before anything was typed or saved, look
    // for an incomplete voucher to resume instead of creating a second
    // one. A failed lookup is not worth interrupting the user for.
    Effect::new(move |_| {
        let Some(client) = selected_client.get() else {
            return;
        };
        if voucher_db_id.get_untracked().is_some()
            || calc::given_has_content(&given_items.get_untracked())
            || calc::received_has_content(&received_items.get_untracked())
        {
            return;
        }
        let client_id = client.id.clone();
        spawn_local(async move {
            let vouchers = match api::list_vouchers(Some(&client_id)).await {
                Ok(list) => list,
                Err(err) => {
                    web_sys::console::warn_1(
                        &format!("voucher list fetch failed: {err}").into(),
                    );
                    return;
                }
            };
            let Some(existing) = vouchers
                .into_iter()
                .find(|v| v.status == "incomplete" && v.id.is_some())
            else {
                return;
            };

            let max_item_id = existing
                .given
                .iter()
                .flat_map(|s| s.items.iter().map(|it| it.id))
                .chain(
                    existing
                        .received
                        .iter()
                        .flat_map(|s| s.items.iter().map(|it| it.id)),
                )
                .max()
                .unwrap_or(0);
            let _ = next_item_id.try_update(|n| *n = (*n).max(max_item_id + 1));

            let _ = voucher_db_id.try_set(existing.id.clone());
            if !existing.voucher_id.is_empty() {
                let _ = voucher_id.try_set(existing.voucher_id.clone());
            }
            if let Some(given) = existing.given {
                if !given.date.is_empty() {
                    let _ = given_date.try_set(given.date);
                }
                if !given.items.is_empty() {
                    let _ = given_items.try_set(given.items);
                }
                let _ = set_given_saved.try_set(true);
            }
            if let Some(received) = existing.received {
                if !received.date.is_empty() {
                    let _ = received_date.try_set(received.date);
                }
                if !received.items.is_empty() {
                    let _ = received_items.try_set(received.items);
                }
                let _ = set_received_saved.try_set(true);
            }
            if let Some(mc) = existing.manual_calc {
                let _ = manual_given.try_set(mc.given_total.to_string());
                let _ = manual_received.try_set(mc.received_total.to_string());
                if !mc.operation.is_empty() {
                    let _ = operation.try_set(mc.operation);
                }
            }
            ctx.toast_info("Resumed incomplete voucher");
        });
    });

    let manual_calc_snapshot = move || {
        let given_total = calc::num(&manual_given.get_untracked());
        let received_total = calc::num(&manual_received.get_untracked());
        let op = operation.get_untracked();
        ManualCalc {
            given_total,
            received_total,
            result: calc::balance_result(given_total, received_total, &op),
            operation: op,
        }
    };

    let save_given = move |_| {
        // The disabled button already blocks this; the guard makes the
        // no-op structural even if a click slips through.
        if !given_save_state.get_untracked().can_submit() {
            return;
        }
        let Some(client) = selected_client.get_untracked() else {
            ctx.toast_error("Select a client before saving");
            return;
        };
        let items = given_items.get_untracked();
        if let Err(msg) = calc::validate_given(&items) {
            ctx.toast_error(msg);
            return;
        }
        set_given_save_state.set(SaveState::Saving);
        let payload = calc::given_section_payload(&given_date.get_untracked(), &items);
        let manual_calc = manual_calc_snapshot();

        let finish = move |result: Result<(), String>| match result {
            Ok(()) => {
                let _ = set_given_save_state.try_set(SaveState::Idle);
                let _ = set_given_saved.try_set(true);
                ctx.toast_info("Given section saved");
            }
            Err(err) => {
                let _ = set_given_save_state.try_set(SaveState::Error);
                ctx.toast_error(format!("Save failed: {err}"));
            }
        };

        match voucher_db_id.get_untracked() {
            Some(id) => {
                let update = VoucherUpdate {
                    given: Some(payload),
                    manual_calc: Some(manual_calc),
                    ..Default::default()
                };
                spawn_local(async move {
                    finish(api::update_voucher(&id, &update).await);
                });
            }
            None => {
                let mut voucher = Voucher {
                    id: None,
                    voucher_id: voucher_id.get_untracked(),
                    client_id: client.id.clone(),
                    client_name: client.name.clone(),
                    given: Some(payload),
                    received: None,
                    status: "incomplete".to_string(),
                    manual_calc: Some(manual_calc),
                };
                // The first save captures the other side too when it
                // already holds something worth keeping.
                let other = received_items.get_untracked();
                if calc::received_has_content(&other) {
                    voucher.received = Some(calc::received_section_payload(
                        &received_date.get_untracked(),
                        &other,
                    ));
                }
                spawn_local(async move {
                    let result = api::create_voucher(&voucher).await.map(|created| {
                        // Adopting the returned id flips create to edit mode.
                        if created.id.is_some() {
                            let _ = voucher_db_id.try_set(created.id);
                        }
                    });
                    finish(result);
                });
            }
        }
    };

    let save_received = move |_| {
        if !received_save_state.get_untracked().can_submit() {
            return;
        }
        let Some(client) = selected_client.get_untracked() else {
            ctx.toast_error("Select a client before saving");
            return;
        };
        let items = received_items.get_untracked();
        if let Err(msg) = calc::validate_received(&items) {
            ctx.toast_error(msg);
            return;
        }
        set_received_save_state.set(SaveState::Saving);
        let payload = calc::received_section_payload(&received_date.get_untracked(), &items);
        let manual_calc = manual_calc_snapshot();

        let finish = move |result: Result<(), String>| match result {
            Ok(()) => {
                let _ = set_received_save_state.try_set(SaveState::Idle);
                let _ = set_received_saved.try_set(true);
                ctx.toast_info("Received section saved");
            }
            Err(err) => {
                let _ = set_received_save_state.try_set(SaveState::Error);
                ctx.toast_error(format!("Save failed: {err}"));
            }
        };

        match voucher_db_id.get_untracked() {
            Some(id) => {
                let update = VoucherUpdate {
                    received: Some(payload),
                    manual_calc: Some(manual_calc),
                    ..Default::default()
                };
                spawn_local(async move {
                    finish(api::update_voucher(&id, &update).await);
                });
            }
            None => {
                let mut voucher = Voucher {
                    id: None,
                    voucher_id: voucher_id.get_untracked(),
                    client_id: client.id.clone(),
                    client_name: client.name.clone(),
                    given: None,
                    received: Some(payload),
                    status: "incomplete".to_string(),
                    manual_calc: Some(manual_calc),
                };
                let other = given_items.get_untracked();
                if calc::given_has_content(&other) {
                    voucher.given = Some(calc::given_section_payload(
                        &given_date.get_untracked(),
                        &other,
                    ));
                }
                spawn_local(async move {
                    let result = api::create_voucher(&voucher).await.map(|created| {
                        if created.id.is_some() {
                            let _ = voucher_db_id.try_set(created.id);
                        }
                    });
                    finish(result);
                });
            }
        }
    };

    view! {
        <main class="voucher-editor">
            <header class="editor-header">
                <h1>"Voucher Editor"</h1>
                <span class="voucher-id">{move || voucher_id.get()}</span>
                {move || voucher_db_id.get().map(|id| view! {
                    <button
                        class="view-voucher-btn"
                        on:click=move |_| ctx.open_voucher(id.clone())
                    >
                        "Print view"
                    </button>
                })}
            </header>

            <ClientPicker selected=selected_client />

            <div class="ledgers">
                <GivenSectionEditor
                    items=given_items
                    date=given_date
                    save_state=given_save_state
                    on_add=move |_| given_items.update(|list| list.push(GivenItem::new(fresh_item_id())))
                    on_save=save_given
                />
                <ReceivedSectionEditor
                    items=received_items
                    date=received_date
                    save_state=received_save_state
                    on_add=move |_| received_items.update(|list| list.push(ReceivedItem::new(fresh_item_id())))
                    on_save=save_received
                />
            </div>

            <BalancePanel
                manual_given=manual_given
                manual_received=manual_received
                operation=operation
                computed_given=computed_given
                computed_received=computed_received
                given_saved=given_saved
                received_saved=received_saved
            />
        </main>
    }
}
