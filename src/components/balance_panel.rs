//! Manual Balance Panel
//!
//! Two free-standing scalar inputs and an operation selector. The
//! inputs are deliberately decoupled from the computed section totals;
//! the only bridge is the explicit "use computed" action, offered for a
//! section once it has been saved.

use leptos::prelude::*;

use crate::calc::{self, format_amount, OP_ADD, OP_SUBTRACT_GIVEN_RECEIVED, OP_SUBTRACT_RECEIVED_GIVEN};
use crate::components::{input_value, select_value};

#[component]
pub fn BalancePanel(
    manual_given: RwSignal<String>,
    manual_received: RwSignal<String>,
    operation: RwSignal<String>,
    computed_given: Memo<f64>,
    computed_received: Memo<f64>,
    given_saved: ReadSignal<bool>,
    received_saved: ReadSignal<bool>,
) -> impl IntoView {
    let result = Memo::new(move |_| {
        calc::balance_result(
            calc::num(&manual_given.get()),
            calc::num(&manual_received.get()),
            &operation.get(),
        )
    });

    view! {
        <section class="balance-panel">
            <h2>"Balance"</h2>
            <div class="balance-row">
                <label>"Given total"</label>
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=move || manual_given.get()
                    on:input=move |ev| manual_given.set(input_value(&ev))
                />
                <Show when=move || given_saved.get()>
                    <button
                        class="apply-total-btn"
                        on:click=move |_| manual_given.set(format_amount(computed_given.get_untracked()))
                    >
                        "Use computed"
                    </button>
                </Show>
            </div>
            <div class="balance-row">
                <label>"Received total"</label>
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=move || manual_received.get()
                    on:input=move |ev| manual_received.set(input_value(&ev))
                />
                <Show when=move || received_saved.get()>
                    <button
                        class="apply-total-btn"
                        on:click=move |_| manual_received.set(format_amount(computed_received.get_untracked()))
                    >
                        "Use computed"
                    </button>
                </Show>
            </div>
            <div class="balance-row">
                <label>"Operation"</label>
                <select
                    prop:value=move || operation.get()
                    on:change=move |ev| operation.set(select_value(&ev))
                >
                    <option value=OP_SUBTRACT_GIVEN_RECEIVED>"Given - Received"</option>
                    <option value=OP_SUBTRACT_RECEIVED_GIVEN>"Received - Given"</option>
                    <option value=OP_ADD>"Given + Received"</option>
                </select>
            </div>
            <div class="balance-result">
                {move || format!("Result: {}", format_amount(result.get()))}
            </div>
        </section>
    }
}
