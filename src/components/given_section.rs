//! Given Section Editor
//!
//! Editable ledger of raw material issued: per-row field inputs with
//! live derived totals, the section totals row, and the save control.

use leptos::prelude::*;

use crate::calc::{self, format_amount, format_weight, GivenField, SaveState};
use crate::components::{input_value, DeleteConfirmButton};
use crate::context::AppContext;
use crate::models::GivenItem;

#[component]
pub fn GivenSectionEditor(
    items: RwSignal<Vec<GivenItem>>,
    date: RwSignal<String>,
    save_state: ReadSignal<SaveState>,
    #[prop(into)] on_add: Callback<()>,
    #[prop(into)] on_save: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let totals = Memo::new(move |_| calc::given_totals(&items.get()));
    let single_item = Memo::new(move |_| items.with(|list| list.len() <= 1));

    let remove_item = move |id: u32| {
        items.update(|list| {
            if !calc::remove_given_item(list, id) {
                ctx.toast_warn("A section keeps at least one item");
            }
        });
    };

    view! {
        <section class="ledger given-ledger">
            <header class="ledger-header">
                <h2>"Given"</h2>
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
                        <th>"Pure Wt"</th>
                        <th>"Pure %"</th>
                        <th>"Melting"</th>
                        <th>"Total"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || items.get()
                        key=|item| item.id
                        children=move |item: GivenItem| {
                            let id = item.id;
                            // Row cells read through the signal so edits
                            // land without recreating the inputs.
                            let read = move |get: fn(&GivenItem) -> String| {
                                items.with(|list| {
                                    list.iter().find(|it| it.id == id).map(get).unwrap_or_default()
                                })
                            };
                            let edit = move |field: GivenField, ev: web_sys::Event| {
                                let value = input_value(&ev);
                                items.update(|list| calc::update_given_item(list, id, field, value));
                            };
                            view! {
                                <tr>
                                    <td>
                                        <input
                                            type="text"
                                            placeholder="Product name"
                                            prop:value=move || read(|it| it.product_name.clone())
                                            on:input=move |ev| edit(GivenField::ProductName, ev)
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            prop:value=move || read(|it| it.pure_weight.clone())
                                            on:input=move |ev| edit(GivenField::PureWeight, ev)
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            prop:value=move || read(|it| it.pure_percent.clone())
                                            on:input=move |ev| edit(GivenField::PurePercent, ev)
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            prop:value=move || read(|it| it.melting.clone())
                                            on:input=move |ev| edit(GivenField::Melting, ev)
                                        />
                                    </td>
                                    <td class="derived-cell">
                                        {move || items.with(|list| {
                                            list.iter()
                                                .find(|it| it.id == id)
                                                .map(|it| format_amount(it.total))
                                                .unwrap_or_default()
                                        })}
                                    </td>
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
                        <td colspan="3">
                            {move || format!("Pure weight: {}", format_weight(totals.get().total_pure_weight))}
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
                    SaveState::Idle => "Save given",
                }}
            </button>
        </section>
    }
}
