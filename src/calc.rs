//! Voucher Calculation Engine
//!
//! Per-item derived fields, section aggregates, the manual balance
//! operation, completion validation, and submit payload shaping.
//! One parse rule everywhere: a field that fails to parse contributes
//! the neutral value for its operator (0 for weights and percents,
//! 1 for the melting divisor).

use crate::models::{GivenItem, GivenSection, ReceivedItem, ReceivedSection};

// ========================
// Parsing
// ========================

/// Parse a numeric text field; anything unparsable counts as 0.
pub fn num(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse the melting divisor; blank, unparsable, or zero counts as 1.
/// Asymmetric with `num` on purpose: persisted totals were computed
/// this way, so changing the default would rewrite history.
pub fn melt(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => 1.0,
    }
}

// ========================
// Per-Item Derivation
// ========================

pub fn given_item_total(item: &GivenItem) -> f64 {
    (num(&item.pure_weight) * num(&item.pure_percent)) / melt(&item.melting)
}

pub fn received_item_sub_total(item: &ReceivedItem) -> f64 {
    num(&item.final_ornaments_wt) - num(&item.stone_weight)
}

pub fn received_item_total(item: &ReceivedItem) -> f64 {
    received_item_sub_total(item) * (num(&item.making_charge_percent) / 100.0)
}

/// Editable fields of a given item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GivenField {
    ProductName,
    PureWeight,
    PurePercent,
    Melting,
}

/// Editable fields of a received item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceivedField {
    ProductName,
    FinalOrnamentsWt,
    StoneWeight,
    MakingChargePercent,
}

impl GivenItem {
    /// Set one editable field from raw input, recomputing `total` only
    /// when the field participates in the derivation.
    pub fn set_field(&mut self, field: GivenField, value: String) {
        match field {
            GivenField::ProductName => {
                self.product_name = value;
                return;
            }
            GivenField::PureWeight => self.pure_weight = value,
            GivenField::PurePercent => self.pure_percent = value,
            GivenField::Melting => self.melting = value,
        }
        self.total = given_item_total(self);
    }
}

impl ReceivedItem {
    /// Set one editable field from raw input; numeric edits recompute
    /// `sub_total` first and `total` from the fresh `sub_total`.
    pub fn set_field(&mut self, field: ReceivedField, value: String) {
        match field {
            ReceivedField::ProductName => {
                self.product_name = value;
                return;
            }
            ReceivedField::FinalOrnamentsWt => self.final_ornaments_wt = value,
            ReceivedField::StoneWeight => self.stone_weight = value,
            ReceivedField::MakingChargePercent => self.making_charge_percent = value,
        }
        self.sub_total = received_item_sub_total(self);
        self.total = self.sub_total * (num(&self.making_charge_percent) / 100.0);
    }
}

/// Apply a field edit to the one item with this id; all other items in
/// the section are left untouched.
pub fn update_given_item(items: &mut Vec<GivenItem>, id: u32, field: GivenField, value: String) {
    if let Some(item) = items.iter_mut().find(|it| it.id == id) {
        item.set_field(field, value);
    }
}

pub fn update_received_item(
    items: &mut Vec<ReceivedItem>,
    id: u32,
    field: ReceivedField,
    value: String,
) {
    if let Some(item) = items.iter_mut().find(|it| it.id == id) {
        item.set_field(field, value);
    }
}

/// Remove an item by id. Refused when it would empty the section;
/// a section always keeps at least one item.
pub fn remove_given_item(items: &mut Vec<GivenItem>, id: u32) -> bool {
    if items.len() <= 1 {
        return false;
    }
    let before = items.len();
    items.retain(|it| it.id != id);
    items.len() < before
}

pub fn remove_received_item(items: &mut Vec<ReceivedItem>, id: u32) -> bool {
    if items.len() <= 1 {
        return false;
    }
    let before = items.len();
    items.retain(|it| it.id != id);
    items.len() < before
}

// ========================
// Section Aggregates
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GivenTotals {
    pub total_pure_weight: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReceivedTotals {
    pub total_ornaments_wt: f64,
    pub total_stone_weight: f64,
    pub total_sub_total: f64,
    pub total: f64,
}

/// Aggregate totals for the given side, recomputed in full from the
/// current items. The pure-weight sum divides by a fixed 100, not by
/// melting; that divisor belongs to the per-item total only.
pub fn given_totals(items: &[GivenItem]) -> GivenTotals {
    let mut totals = GivenTotals::default();
    for item in items {
        totals.total_pure_weight += num(&item.pure_weight) * num(&item.pure_percent) / 100.0;
        totals.total += given_item_total(item);
    }
    totals
}

/// Aggregate totals for the received side.
pub fn received_totals(items: &[ReceivedItem]) -> ReceivedTotals {
    let mut totals = ReceivedTotals::default();
    for item in items {
        totals.total_ornaments_wt += num(&item.final_ornaments_wt);
        totals.total_stone_weight += num(&item.stone_weight);
        totals.total_sub_total += received_item_sub_total(item);
        totals.total += received_item_total(item);
    }
    totals
}

// ========================
// Manual Balance
// ========================

pub const OP_SUBTRACT_GIVEN_RECEIVED: &str = "subtract-given-received";
pub const OP_SUBTRACT_RECEIVED_GIVEN: &str = "subtract-received-given";
pub const OP_ADD: &str = "add";

/// Manual balance operation over the two user-entered scalars. The
/// selector is a closed set; an unknown key yields 0, not an error.
pub fn balance_result(given: f64, received: f64, operation: &str) -> f64 {
    match operation {
        OP_SUBTRACT_GIVEN_RECEIVED => given - received,
        OP_SUBTRACT_RECEIVED_GIVEN => received - given,
        OP_ADD => given + received,
        _ => 0.0,
    }
}

// ========================
// Completion / Submission
// ========================

/// Completion check for the given side. Fails fast on the first item
/// with a missing required field and names the section, without
/// enumerating every failing item.
pub fn validate_given(items: &[GivenItem]) -> Result<(), String> {
    for item in items {
        if item.product_name.trim().is_empty()
            || item.pure_weight.trim().is_empty()
            || item.pure_percent.trim().is_empty()
            || item.melting.trim().is_empty()
        {
            return Err("Given section has an incomplete item; fill all fields first".to_string());
        }
    }
    Ok(())
}

/// Completion check for the received side. Stone weight is exempt; it
/// defaults to "0".
pub fn validate_received(items: &[ReceivedItem]) -> Result<(), String> {
    for item in items {
        if item.product_name.trim().is_empty()
            || item.final_ornaments_wt.trim().is_empty()
            || item.making_charge_percent.trim().is_empty()
        {
            return Err(
                "Received section has an incomplete item; fill all fields first".to_string()
            );
        }
    }
    Ok(())
}

/// Whether a section is worth carrying into a create request: at least
/// one item with a non-empty product name.
pub fn given_has_content(items: &[GivenItem]) -> bool {
    items.iter().any(|it| !it.product_name.trim().is_empty())
}

pub fn received_has_content(items: &[ReceivedItem]) -> bool {
    items.iter().any(|it| !it.product_name.trim().is_empty())
}

/// Shape the given side for submission: date, items, and a point-in-time
/// aggregate snapshot for the backend to store as-is.
pub fn given_section_payload(date: &str, items: &[GivenItem]) -> GivenSection {
    let totals = given_totals(items);
    GivenSection {
        date: date.to_string(),
        items: items.to_vec(),
        total_pure_weight: totals.total_pure_weight,
        total: totals.total,
    }
}

pub fn received_section_payload(date: &str, items: &[ReceivedItem]) -> ReceivedSection {
    let totals = received_totals(items);
    ReceivedSection {
        date: date.to_string(),
        items: items.to_vec(),
        total_ornaments_wt: totals.total_ornaments_wt,
        total_stone_weight: totals.total_stone_weight,
        total_sub_total: totals.total_sub_total,
        total: totals.total,
    }
}

/// Per-section save lifecycle. The save control is enabled only while
/// `can_submit` holds, so a second click during a pending save cannot
/// issue a duplicate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Error,
}

impl SaveState {
    pub fn can_submit(self) -> bool {
        !matches!(self, SaveState::Saving)
    }
}

// ========================
// Display Formatting
// ========================

/// Fixed three-decimal weight display (grams).
pub fn format_weight(v: f64) -> String {
    format!("{:.3}", v)
}

/// Fixed two-decimal amount display.
pub fn format_amount(v: f64) -> String {
    format!("{:.2}", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_given(id: u32, product: &str, weight: &str, percent: &str, melting: &str) -> GivenItem {
        let mut item = GivenItem::new(id);
        item.set_field(GivenField::ProductName, product.to_string());
        item.set_field(GivenField::PureWeight, weight.to_string());
        item.set_field(GivenField::PurePercent, percent.to_string());
        item.set_field(GivenField::Melting, melting.to_string());
        item
    }

    fn make_received(id: u32, product: &str, wt: &str, stone: &str, mc: &str) -> ReceivedItem {
        let mut item = ReceivedItem::new(id);
        item.set_field(ReceivedField::ProductName, product.to_string());
        item.set_field(ReceivedField::FinalOrnamentsWt, wt.to_string());
        item.set_field(ReceivedField::StoneWeight, stone.to_string());
        item.set_field(ReceivedField::MakingChargePercent, mc.to_string());
        item
    }

    #[test]
    fn test_num_defaults_to_zero() {
        assert_eq!(num("12.5"), 12.5);
        assert_eq!(num("  7 "), 7.0);
        assert_eq!(num(""), 0.0);
        assert_eq!(num("abc"), 0.0);
        assert_eq!(num("1,2"), 0.0);
    }

    #[test]
    fn test_melt_defaults_to_one() {
        assert_eq!(melt("2"), 2.0);
        assert_eq!(melt(""), 1.0);
        assert_eq!(melt("junk"), 1.0);
        assert_eq!(melt("0"), 1.0);
        assert_eq!(melt("0.0"), 1.0);
    }

    #[test]
    fn test_given_item_total_scenario() {
        // 10 x 92 / 2 = 460
        let mut item = make_given(1, "Bar", "10", "92", "2");
        assert_eq!(item.total, 460.0);

        // Blank melting falls back to the neutral divisor 1.
        item.set_field(GivenField::Melting, String::new());
        assert_eq!(item.total, 920.0);
    }

    #[test]
    fn test_received_item_scenario() {
        let item = make_received(1, "Ring", "50", "5", "10");
        assert_eq!(item.sub_total, 45.0);
        assert_eq!(item.total, 4.5);
    }

    #[test]
    fn test_non_trigger_edit_keeps_derived_bits() {
        let mut item = make_given(1, "Bar", "10", "92", "3");
        let before = item.total.to_bits();
        item.set_field(GivenField::ProductName, "Renamed bar".to_string());
        assert_eq!(item.total.to_bits(), before);

        let mut item = make_received(2, "Ring", "50", "5", "10");
        let before = (item.sub_total.to_bits(), item.total.to_bits());
        item.set_field(ReceivedField::ProductName, "Renamed ring".to_string());
        assert_eq!((item.sub_total.to_bits(), item.total.to_bits()), before);
    }

    #[test]
    fn test_update_touches_only_target_item() {
        let mut items = vec![
            make_given(1, "A", "10", "92", "2"),
            make_given(2, "B", "5", "80", "1"),
        ];
        let untouched = items[1].clone();
        update_given_item(&mut items, 1, GivenField::PureWeight, "20".to_string());
        assert_eq!(items[0].total, 920.0);
        assert_eq!(items[1], untouched);

        // Unknown id is a no-op.
        let snapshot = items.clone();
        update_given_item(&mut items, 99, GivenField::PureWeight, "1".to_string());
        assert_eq!(items, snapshot);
    }

    #[test]
    fn test_given_totals_scenario() {
        let items = vec![
            make_given(1, "A", "10", "92", "2"),  // total 460
            make_given(2, "B", "10", "100", "10"), // total 100
        ];
        let totals = given_totals(&items);
        assert_eq!(totals.total, 560.0);
        // First item alone contributes 10 * 92 / 100 = 9.2.
        let first = given_totals(&items[..1]);
        assert!((first.total_pure_weight - 9.2).abs() < 1e-9);
    }

    #[test]
    fn test_totals_recompute_is_idempotent() {
        let mut items = vec![make_given(1, "A", "10", "92", "2")];
        let a = given_totals(&items);
        let b = given_totals(&items);
        assert_eq!(a, b);

        update_given_item(&mut items, 1, GivenField::PurePercent, "50".to_string());
        let after = given_totals(&items);
        assert_eq!(after.total, 250.0);
    }

    #[test]
    fn test_totals_tolerate_unparsable_fields() {
        let items = vec![
            make_received(1, "Ring", "50", "5", "10"),
            make_received(2, "Chain", "not-a-number", "", "x"),
        ];
        let totals = received_totals(&items);
        // The junk row contributes neutral zeros, never an abort.
        assert_eq!(totals.total_ornaments_wt, 50.0);
        assert_eq!(totals.total_stone_weight, 5.0);
        assert_eq!(totals.total_sub_total, 45.0);
        assert_eq!(totals.total, 4.5);
    }

    #[test]
    fn test_remove_keeps_section_nonempty() {
        let mut items = vec![make_given(1, "A", "1", "1", "1")];
        assert!(!remove_given_item(&mut items, 1));
        assert_eq!(items.len(), 1);

        items.push(make_given(2, "B", "2", "2", "2"));
        assert!(remove_given_item(&mut items, 1));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);
        assert!(!remove_given_item(&mut items, 2));
    }

    #[test]
    fn test_balance_operations() {
        assert_eq!(balance_result(100.0, 40.0, OP_SUBTRACT_GIVEN_RECEIVED), 60.0);
        assert_eq!(balance_result(100.0, 40.0, OP_SUBTRACT_RECEIVED_GIVEN), -60.0);
        assert_eq!(balance_result(100.0, 40.0, OP_ADD), 140.0);
        assert_eq!(balance_result(100.0, 40.0, "multiply"), 0.0);
        assert_eq!(balance_result(100.0, 40.0, ""), 0.0);
    }

    #[test]
    fn test_validate_given_fails_fast() {
        let mut items = vec![
            make_given(1, "A", "10", "92", "2"),
            make_given(2, "", "5", "80", "1"),
            make_given(3, "C", "", "", ""),
        ];
        let err = validate_given(&items).unwrap_err();
        assert!(err.contains("Given"));

        items[1].set_field(GivenField::ProductName, "B".to_string());
        assert!(validate_given(&items).is_err()); // item 3 still incomplete
        items[2] = make_given(3, "C", "1", "1", "1");
        assert!(validate_given(&items).is_ok());
    }

    #[test]
    fn test_validate_received_exempts_stone_weight() {
        let mut item = make_received(1, "Ring", "50", "", "10");
        item.stone_weight = String::new();
        assert!(validate_received(&[item]).is_ok());

        let missing_mc = make_received(2, "Ring", "50", "0", "");
        let err = validate_received(&[missing_mc]).unwrap_err();
        assert!(err.contains("Received"));
    }

    #[test]
    fn test_section_payload_snapshots_totals() {
        let items = vec![
            make_given(1, "A", "10", "92", "2"),
            make_given(2, "B", "10", "100", "10"),
        ];
        let payload = given_section_payload("2026-08-29", &items);
        assert_eq!(payload.date, "2026-08-29");
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.total, 560.0);
        assert!((payload.total_pure_weight - (9.2 + 10.0)).abs() < 1e-9);

        let received = vec![make_received(1, "Ring", "50", "5", "10")];
        let payload = received_section_payload("2026-08-29", &received);
        assert_eq!(payload.total_ornaments_wt, 50.0);
        assert_eq!(payload.total_stone_weight, 5.0);
        assert_eq!(payload.total_sub_total, 45.0);
        assert_eq!(payload.total, 4.5);
    }

    #[test]
    fn test_save_state_blocks_double_submit() {
        assert!(SaveState::Idle.can_submit());
        assert!(!SaveState::Saving.can_submit());
        // A failed save must allow a retry.
        assert!(SaveState::Error.can_submit());
        assert_eq!(SaveState::default(), SaveState::Idle);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_weight(9.2), "9.200");
        assert_eq!(format_amount(4.5), "4.50");
        assert_eq!(format_amount(-60.0), "-60.00");
    }
}
