//! Received Section Editor
//!
//! Editable ledger of finished goods returned: final ornament weight,
//! stone weight, and making-charge percent per row, with the derived
//! subtotal and total and the section totals row.

use leptos::prelude::*;

use crate::calc::{self, format_amount, format_weight, ReceivedField, SaveState};
use crate::components::{input_value, DeleteConfirmButton};
use crate::context::AppContext;
use crate::models::ReceivedItem;

#[component]
pub fn ReceivedSectionEditor(
    items: RwSignal<Vec<ReceivedItem>>,
    date: RwSignal<String>,
    save_state: ReadSignal<SaveState>,
    #[prop(into)] on_add: Callback<()>,
    #[prop(into)] on_save: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let totals = Memo::new(move |_| calc::received_totals(&items.get()));
    let single_item = Memo::new(move |_| items.with(|list| list.len() <= 1));

    let remove_item = move |id: u32| {
        items.update(|list| {
            if !calc::remove_received_item(list, id) {
                ctx.toast_warn("A section keeps at least one item");
            }
        });
    };

    view! {
        <section class="ledger received-ledger">
            <header class="ledger-header">
                <h2>"Received"</h2>
                <input
                    type="date"
                    prop:value=move || date.get()
                    on:input=move |ev| date.set(input_value(&ev))
                />
                <button class="add-item-btn" on:click=move |_| on_add.run(())>
                    "+ Item"
                </button>
            </header>

            <table class="ledger-table">
                <thead>
                    <tr>
                        <th>"Product"</th>
                        <th>"Final Wt"</th>
                        <th>"Stone Wt"</th>
                        <th>"MC %"</th>
                        <th>"Subtotal"</th>
                        <th>"Total"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || items.get()
                        key=|item| item.id
                        children=move |item: ReceivedItem| {
                            let id = item.id;
                            let read = move |get: fn(&ReceivedItem) -> String| {
                                items.with(|list| {
                                    list.iter().find(|it| it.id == id).map(get).unwrap_or_default()
                                })
                            };
                            let derived = move |get: fn(&ReceivedItem) -> f64| {
                                items.with(|list| {
                                    list.iter()
                                        .find(|it| it.id == id)
                                        .map(|it| format_amount(get(it)))
                                        .unwrap_or_default()
                                })
                            };
                            let edit = move |field: ReceivedField, ev: web_sys::Event| {
                                let value = input_value(&ev);
                                items.update(|list| calc::update_received_item(list, id, field, value));
                            };
                            view! {
                                <tr>
                                    <td>
                                        <input
                                            type="text"
                                            placeholder="Product name"
                                            prop:value=move || read(|it| it.product_name.clone())
                                            on:input=move |ev| edit(ReceivedField::ProductName, ev)
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            prop:value=move || read(|it| it.final_ornaments_wt.clone())
                                            on:input=move |ev| edit(ReceivedField::FinalOrnamentsWt, ev)
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            prop:value=move || read(|it| it.stone_weight.clone())
                                            on:input=move |ev| edit(ReceivedField::StoneWeight, ev)
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            prop:value=move || read(|it| it.making_charge_percent.clone())
                                            on:input=move |ev| edit(ReceivedField::MakingChargePercent, ev)
                                        />
                                    </td>
                                    <td class="derived-cell">{move || derived(|it| it.sub_total)}</td>
                                    <td class="derived-cell">{move || derived(|it| it.total)}</td>
                                    <td>
                                        <DeleteConfirmButton
                                            button_class="delete-btn"
                                            disabled=single_item
                                            on_confirm=move |_| remove_item(id)
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
                <tfoot>
                    <tr class="totals-row">
                        <td>"Totals"</td>
                        <td class="derived-cell">
                            {move || format_weight(totals.get().total_ornaments_wt)}
                        </td>
                        <td class="derived-cell">
                            {move || format_weight(totals.get().total_stone_weight)}
                        </td>
                        <td></td>
                        <td class="derived-cell">
                            {move || format_amount(totals.get().total_sub_total)}
                        </td>
                        <td class="derived-cell">
                            {move || format_amount(totals.get().total)}
                        </td>
                        <td></td>
                    </tr>
                </tfoot>
            </table>

            <button
                class="save-btn"
                disabled=move || !save_state.get().can_submit()
                on:click=move |_| on_save.run(())
            >
                {move || match save_state.get() {
                    SaveState::Saving => "Saving...",
                    SaveState::Error => "Retry save",
                    SaveState::Idle => "Save received",
                }}
            </button>
        </section>
    }
}
