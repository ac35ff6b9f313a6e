//! Voucher PDF Export
//!
//! Client-side PDF generation for a stored voucher: header identity
//! block, given/received item tables, and the balance block. All
//! numeric columns reuse the formulas from `calc`, so the document can
//! never disagree with the on-screen totals.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};
use wasm_bindgen::JsCast;

use crate::calc::{self, format_amount, format_weight};
use crate::models::{Client, Voucher};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_X: f32 = 15.0;
const MARGIN_TOP: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 14.0;
const ROW_H: f32 = 5.2;
const PT_TO_MM: f32 = 25.4 / 72.0;

const CONTENT_RIGHT: f32 = PAGE_W - MARGIN_X;

fn push_line(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

/// printpdf exposes no text metrics for builtin fonts; a per-character
/// estimate is enough for right-aligning numeric columns.
fn push_line_right(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    x_right: f32,
    y: f32,
) {
    let width_est = text.chars().count() as f32 * size * 0.5 * PT_TO_MM;
    push_line(layer, font, text, size, (x_right - width_est).max(0.0), y);
}

fn draw_rule(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, thickness: f32) {
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Flowing layout cursor; rolls over to a fresh page when a row would
/// cross the bottom margin.
struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor {
    fn ensure_room(&mut self, doc: &PdfDocumentReference, needed: f32) {
        if self.y - needed < MARGIN_BOTTOM {
            let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            self.layer = doc.get_page(page).get_layer(layer);
            self.y = PAGE_H - MARGIN_TOP;
        }
    }
}

pub fn voucher_pdf_bytes(voucher: &Voucher, client: &Client) -> Result<Vec<u8>, String> {
    let title = if voucher.voucher_id.is_empty() {
        "Voucher".to_string()
    } else {
        format!("Voucher {}", voucher.voucher_id)
    };
    let (doc, page1, layer1) = PdfDocument::new(&title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| e.to_string())?;

    let mut cur = Cursor {
        layer: doc.get_page(page1).get_layer(layer1),
        y: PAGE_H - MARGIN_TOP,
    };

    // ----- Header identity block -----
    push_line(&cur.layer, &font_bold, &title, 14.0, MARGIN_X, cur.y);
    push_line_right(
        &cur.layer,
        &font,
        &format!("Status: {}", voucher.status),
        9.0,
        CONTENT_RIGHT,
        cur.y,
    );
    cur.y -= 7.0;

    if !client.name.is_empty() {
        push_line(&cur.layer, &font_bold, &client.name, 10.5, MARGIN_X, cur.y);
        cur.y -= 4.6;
    }
    for detail in [
        client.shop_name.as_str(),
        client.address.as_str(),
        client.phone_number.as_str(),
    ] {
        if !detail.trim().is_empty() {
            push_line(&cur.layer, &font, detail, 8.5, MARGIN_X, cur.y);
            cur.y -= 4.2;
        }
    }
    cur.y -= 2.0;
    draw_rule(&cur.layer, MARGIN_X, CONTENT_RIGHT, cur.y, 0.8);
    cur.y -= 7.0;

    // ----- Given items -----
    if let Some(given) = &voucher.given {
        push_line(&cur.layer, &font_bold, "Given items", 10.5, MARGIN_X, cur.y);
        cur.y -= 6.0;

        // seq | product | pure wt | pure % | melting | total | date
        let headers: [(&str, f32, bool); 7] = [
            ("#", MARGIN_X, false),
            ("Product", 24.0, false),
            ("Pure Wt", 99.0, true),
            ("Pure %", 119.0, true),
            ("Melting", 139.0, true),
            ("Total", 165.0, true),
            ("Date", 169.0, false),
        ];
        for (label, x, right) in headers {
            if right {
                push_line_right(&cur.layer, &font_bold, label, 8.0, x, cur.y);
            } else {
                push_line(&cur.layer, &font_bold, label, 8.0, x, cur.y);
            }
        }
        cur.y -= 1.8;
        draw_rule(&cur.layer, MARGIN_X, CONTENT_RIGHT, cur.y, 0.4);
        cur.y -= 4.0;

        for (seq, item) in given.items.iter().enumerate() {
            cur.ensure_room(&doc, ROW_H);
            push_line(&cur.layer, &font, &format!("{}", seq + 1), 8.0, MARGIN_X, cur.y);
            push_line(&cur.layer, &font, &item.product_name, 8.0, 24.0, cur.y);
            push_line_right(&cur.layer, &font, &item.pure_weight, 8.0, 99.0, cur.y);
            push_line_right(&cur.layer, &font, &item.pure_percent, 8.0, 119.0, cur.y);
            push_line_right(&cur.layer, &font, &item.melting, 8.0, 139.0, cur.y);
            push_line_right(
                &cur.layer,
                &font,
                &format_amount(calc::given_item_total(item)),
                8.0,
                165.0,
                cur.y,
            );
            push_line(&cur.layer, &font, &given.date, 8.0, 169.0, cur.y);
            cur.y -= ROW_H;
        }

        cur.ensure_room(&doc, ROW_H + 2.0);
        draw_rule(&cur.layer, MARGIN_X, CONTENT_RIGHT, cur.y + 1.6, 0.4);
        let totals = calc::given_totals(&given.items);
        push_line(
            &cur.layer,
            &font_bold,
            &format!("Total pure weight: {}", format_weight(totals.total_pure_weight)),
            8.5,
            24.0,
            cur.y - 1.0,
        );
        push_line_right(
            &cur.layer,
            &font_bold,
            &format_amount(totals.total),
            8.5,
            165.0,
            cur.y - 1.0,
        );
        cur.y -= ROW_H + 4.0;
    }

    // ----- Received items -----
    if let Some(received) = &voucher.received {
        cur.ensure_room(&doc, 24.0);
        push_line(&cur.layer, &font_bold, "Received items", 10.5, MARGIN_X, cur.y);
        cur.y -= 6.0;

        // seq | product | date | final wt | stone | touch | MC | subtotal | total
        let headers: [(&str, f32, bool); 9] = [
            ("#", MARGIN_X, false),
            ("Product", 22.0, false),
            ("Date", 56.0, false),
            ("Final Wt", 101.0, true),
            ("Stone", 119.0, true),
            ("Touch", 136.0, true),
            ("MC", 154.0, true),
            ("Subtotal", 175.0, true),
            ("Total", 195.0, true),
        ];
        for (label, x, right) in headers {
            if right {
                push_line_right(&cur.layer, &font_bold, label, 8.0, x, cur.y);
            } else {
                push_line(&cur.layer, &font_bold, label, 8.0, x, cur.y);
            }
        }
        cur.y -= 1.8;
        draw_rule(&cur.layer, MARGIN_X, CONTENT_RIGHT, cur.y, 0.4);
        cur.y -= 4.0;

        for (seq, item) in received.items.iter().enumerate() {
            cur.ensure_room(&doc, ROW_H);
            let sub_total = calc::received_item_sub_total(item);
            let total = calc::received_item_total(item);
            // Making charge amount is the margin between total and subtotal.
            let mc = total - sub_total;
            push_line(&cur.layer, &font, &format!("{}", seq + 1), 8.0, MARGIN_X, cur.y);
            push_line(&cur.layer, &font, &item.product_name, 8.0, 22.0, cur.y);
            push_line(&cur.layer, &font, &received.date, 8.0, 56.0, cur.y);
            push_line_right(&cur.layer, &font, &item.final_ornaments_wt, 8.0, 101.0, cur.y);
            push_line_right(&cur.layer, &font, &item.stone_weight, 8.0, 119.0, cur.y);
            push_line_right(&cur.layer, &font, &item.making_charge_percent, 8.0, 136.0, cur.y);
            push_line_right(&cur.layer, &font, &format_amount(mc), 8.0, 154.0, cur.y);
            push_line_right(&cur.layer, &font, &format_amount(sub_total), 8.0, 175.0, cur.y);
            push_line_right(&cur.layer, &font, &format_amount(total), 8.0, 195.0, cur.y);
            cur.y -= ROW_H;
        }

        cur.ensure_room(&doc, ROW_H + 2.0);
        draw_rule(&cur.layer, MARGIN_X, CONTENT_RIGHT, cur.y + 1.6, 0.4);
        let totals = calc::received_totals(&received.items);
        push_line(
            &cur.layer,
            &font_bold,
            &format!(
                "Ornaments: {}  Stone: {}",
                format_weight(totals.total_ornaments_wt),
                format_weight(totals.total_stone_weight)
            ),
            8.5,
            22.0,
            cur.y - 1.0,
        );
        push_line_right(
            &cur.layer,
            &font_bold,
            &format_amount(totals.total_sub_total),
            8.5,
            175.0,
            cur.y - 1.0,
        );
        push_line_right(
            &cur.layer,
            &font_bold,
            &format_amount(totals.total),
            8.5,
            195.0,
            cur.y - 1.0,
        );
        cur.y -= ROW_H + 4.0;
    }

    // ----- Balance block -----
    cur.ensure_room(&doc, 22.0);
    draw_rule(&cur.layer, MARGIN_X, CONTENT_RIGHT, cur.y, 0.8);
    cur.y -= 6.0;

    let opening = client.balance.unwrap_or(0.0);
    let current = voucher.manual_calc.as_ref().map(|m| m.result).unwrap_or(0.0);
    let rows = [
        ("Opening balance", opening),
        ("Current balance", current),
        ("New balance", opening + current),
    ];
    for (label, value) in rows {
        push_line(&cur.layer, &font_bold, label, 9.0, MARGIN_X, cur.y);
        push_line_right(&cur.layer, &font, &format_amount(value), 9.0, 90.0, cur.y);
        cur.y -= 5.2;
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(|e| e.to_string())?;
    writer.into_inner().map_err(|e| e.to_string())
}

/// Build the PDF and hand it to the browser as a named download.
pub fn download_voucher_pdf(voucher: &Voucher, client: &Client) -> Result<(), String> {
    let bytes = voucher_pdf_bytes(voucher, client)?;

    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "could not build pdf blob".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "could not create object url".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(|_| "could not create anchor".to_string())?;
    let anchor: web_sys::HtmlAnchorElement = anchor
        .dyn_into()
        .map_err(|_| "anchor cast failed".to_string())?;
    let name = if voucher.voucher_id.is_empty() {
        "voucher".to_string()
    } else {
        voucher.voucher_id.clone()
    };
    anchor.set_href(&url);
    anchor.set_download(&format!("{name}.pdf"));
    anchor.click();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GivenItem, GivenSection, ManualCalc, ReceivedItem, ReceivedSection};

    fn make_voucher() -> Voucher {
        let mut given_item = GivenItem::new(1);
        given_item.product_name = "Gold bar".to_string();
        given_item.pure_weight = "10".to_string();
        given_item.pure_percent = "92".to_string();
        given_item.melting = "2".to_string();
        given_item.total = 460.0;

        let mut received_item = ReceivedItem::new(2);
        received_item.product_name = "Ring".to_string();
        received_item.final_ornaments_wt = "50".to_string();
        received_item.stone_weight = "5".to_string();
        received_item.making_charge_percent = "10".to_string();
        received_item.sub_total = 45.0;
        received_item.total = 4.5;

        Voucher {
            id: Some("v1".to_string()),
            voucher_id: "GA-2608-1234".to_string(),
            client_id: "c1".to_string(),
            client_name: "Ravi".to_string(),
            given: Some(GivenSection {
                date: "2026-08-29".to_string(),
                items: vec![given_item],
                total_pure_weight: 9.2,
                total: 460.0,
            }),
            received: Some(ReceivedSection {
                date: "2026-08-29".to_string(),
                items: vec![received_item],
                total_ornaments_wt: 50.0,
                total_stone_weight: 5.0,
                total_sub_total: 45.0,
                total: 4.5,
            }),
            status: "incomplete".to_string(),
            manual_calc: Some(ManualCalc {
                given_total: 460.0,
                received_total: 4.5,
                operation: "subtract-given-received".to_string(),
                result: 455.5,
            }),
        }
    }

    #[test]
    fn test_pdf_bytes_smoke() {
        let client = Client {
            id: "c1".to_string(),
            name: "Ravi".to_string(),
            shop_name: "Sri Jewels".to_string(),
            phone_number: "98400".to_string(),
            address: "12 Bazaar St".to_string(),
            balance: Some(1000.0),
        };
        let bytes = voucher_pdf_bytes(&make_voucher(), &client).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_pdf_tolerates_empty_sections_and_client() {
        let voucher = Voucher {
            given: None,
            received: None,
            manual_calc: None,
            ..make_voucher()
        };
        let bytes = voucher_pdf_bytes(&voucher, &Client::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_paginates_long_ledgers() {
        let mut voucher = make_voucher();
        let template = voucher.given.as_ref().unwrap().items[0].clone();
        let items: Vec<GivenItem> = (0..120)
            .map(|i| {
                let mut it = template.clone();
                it.id = i + 10;
                it
            })
            .collect();
        voucher.given.as_mut().unwrap().items = items;
        let bytes = voucher_pdf_bytes(&voucher, &Client::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 5000);
    }
}
