//! Voucher View Page
//!
//! Read-only rendering of a stored voucher and its client. Totals are
//! recomputed from the stored items with the same engine the editor
//! uses; the page also offers the PDF download.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::calc::{self, format_amount, format_weight};
use crate::context::AppContext;
use crate::models::{Client, Voucher};
use crate::pdf;

#[component]
pub fn VoucherView(voucher_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (voucher, set_voucher) = signal(None::<Voucher>);
    let (client, set_client) = signal(None::<Client>);
    let (loading, set_loading) = signal(true);

    let id_to_load = voucher_id.clone();
    Effect::new(move |_| {
        let id = id_to_load.clone();
        spawn_local(async move {
            match api::get_voucher(&id).await {
                Ok(v) => {
                    let client_id = v.client_id.clone();
                    let _ = set_voucher.try_set(Some(v));
                    if !client_id.is_empty() {
                        // Missing client detail degrades to an empty
                        // identity block, not a dead page.
                        if let Ok(c) = api::get_client(&client_id).await {
                            let _ = set_client.try_set(Some(c));
                        }
                    }
                }
                Err(err) => {
                    ctx.toast_error(format!("Could not load voucher: {err}"));
                }
            }
            let _ = set_loading.try_set(false);
        });
    });

    let export_pdf = move |_| {
        let Some(v) = voucher.get_untracked() else {
            return;
        };
        let c = client.get_untracked().unwrap_or_default();
        if let Err(err) = pdf::download_voucher_pdf(&v, &c) {
            ctx.toast_error(format!("PDF export failed: {err}"));
        }
    };

    view! {
        <main class="voucher-view">
            <header class="view-header">
                <button class="back-btn" on:click=move |_| ctx.open_editor()>
                    "< Back"
                </button>
                <h1>{move || {
                    voucher.get()
                        .map(|v| format!("Voucher {}", v.voucher_id))
                        .unwrap_or_else(|| "Voucher".to_string())
                }}</h1>
                <button
                    class="pdf-btn"
                    disabled=move || voucher.get().is_none()
                    on:click=export_pdf
                >
                    "Download PDF"
                </button>
            </header>

            {move || {
                if loading.get() {
                    return view! { <p class="loading">"Loading..."</p> }.into_any();
                }
                let Some(v) = voucher.get() else {
                    return view! { <p class="empty">"Voucher not found."</p> }.into_any();
                };
                let c = client.get().unwrap_or_default();

                let client_block = view! {
                    <div class="client-card">
                        <div class="client-name">{c.name.clone()}</div>
                        <div class="client-shop">{c.shop_name.clone()}</div>
                        <div class="client-phone">{c.phone_number.clone()}</div>
                        <div class="client-address">{c.address.clone()}</div>
                        <div class="voucher-status">{format!("Status: {}", v.status)}</div>
                    </div>
                };

                let given_block = v.given.as_ref().map(|section| {
                    let totals = calc::given_totals(&section.items);
                    let date = section.date.clone();
                    view! {
                        <section class="ledger given-ledger">
                            <h2>"Given items"</h2>
                            <table class="ledger-table">
                                <thead>
                                    <tr>
                                        <th>"#"</th>
                                        <th>"Product"</th>
                                        <th>"Pure Wt"</th>
                                        <th>"Pure %"</th>
                                        <th>"Melting"</th>
                                        <th>"Total"</th>
                                        <th>"Date"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {section.items.iter().enumerate().map(|(seq, item)| {
                                        view! {
                                            <tr>
                                                <td>{seq + 1}</td>
                                                <td>{item.product_name.clone()}</td>
                                                <td class="num">{item.pure_weight.clone()}</td>
                                                <td class="num">{item.pure_percent.clone()}</td>
                                                <td class="num">{item.melting.clone()}</td>
                                                <td class="num">{format_amount(calc::given_item_total(item))}</td>
                                                <td>{date.clone()}</td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                                <tfoot>
                                    <tr class="totals-row">
                                        <td></td>
                                        <td>"Totals"</td>
                                        <td colspan="3">
                                            {format!("Pure weight: {}", format_weight(totals.total_pure_weight))}
                                        </td>
                                        <td class="num">{format_amount(totals.total)}</td>
                                        <td></td>
                                    </tr>
                                </tfoot>
                            </table>
                        </section>
                    }
                });

                let received_block = v.received.as_ref().map(|section| {
                    let totals = calc::received_totals(&section.items);
                    let date = section.date.clone();
                    view! {
                        <section class="ledger received-ledger">
                            <h2>"Received items"</h2>
                            <table class="ledger-table">
                                <thead>
                                    <tr>
                                        <th>"#"</th>
                                        <th>"Product"</th>
                                        <th>"Date"</th>
                                        <th>"Final Wt"</th>
                                        <th>"Stone"</th>
                                        <th>"Touch"</th>
                                        <th>"MC"</th>
                                        <th>"Subtotal"</th>
                                        <th>"Total"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {section.items.iter().enumerate().map(|(seq, item)| {
                                        let sub_total = calc::received_item_sub_total(item);
                                        let total = calc::received_item_total(item);
                                        view! {
                                            <tr>
                                                <td>{seq + 1}</td>
                                                <td>{item.product_name.clone()}</td>
                                                <td>{date.clone()}</td>
                                                <td class="num">{item.final_ornaments_wt.clone()}</td>
                                                <td class="num">{item.stone_weight.clone()}</td>
                                                <td class="num">{item.making_charge_percent.clone()}</td>
                                                <td class="num">{format_amount(total - sub_total)}</td>
                                                <td class="num">{format_amount(sub_total)}</td>
                                                <td class="num">{format_amount(total)}</td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                                <tfoot>
                                    <tr class="totals-row">
                                        <td></td>
                                        <td>"Totals"</td>
                                        <td></td>
                                        <td class="num">{format_weight(totals.total_ornaments_wt)}</td>
                                        <td class="num">{format_weight(totals.total_stone_weight)}</td>
                                        <td></td>
                                        <td></td>
                                        <td class="num">{format_amount(totals.total_sub_total)}</td>
                                        <td class="num">{format_amount(totals.total)}</td>
                                    </tr>
                                </tfoot>
                            </table>
                        </section>
                    }
                });

                let opening = c.balance.unwrap_or(0.0);
                let current = v.manual_calc.as_ref().map(|m| m.result).unwrap_or(0.0);
                let balance_block = view! {
                    <section class="balance-block">
                        <h2>"Balance"</h2>
                        <div class="balance-row">
                            <span>"Opening balance"</span>
                            <span class="num">{format_amount(opening)}</span>
                        </div>
                        <div class="balance-row">
                            <span>"Current balance"</span>
                            <span class="num">{format_amount(current)}</span>
                        </div>
                        <div class="balance-row">
                            <span>"New balance"</span>
                            <span class="num">{format_amount(opening + current)}</span>
                        </div>
                    </section>
                };

                view! {
                    <div class="voucher-detail">
                        {client_block}
                        {given_block}
                        {received_block}
                        {balance_block}
                    </div>
                }.into_any()
            }}
        </main>
    }
}
