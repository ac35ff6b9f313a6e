//! Frontend Models
//!
//! Data structures matching the voucher-service backend.

use serde::{Deserialize, Serialize};

/// Client record (matches backend). Owned and mutated by the remote
/// service; this app only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default, alias = "clientName")]
    pub name: String,
    #[serde(default, alias = "shop")]
    pub shop_name: String,
    #[serde(default, alias = "phone")]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    /// Running balance; absent on list endpoints, present on detail.
    #[serde(default)]
    pub balance: Option<f64>,
}

/// One unit of raw material issued to the client.
///
/// Numeric fields stay as the user typed them; `total` is derived
/// (see `calc::given_item_total`) and never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivenItem {
    pub id: u32,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub pure_weight: String,
    #[serde(default)]
    pub pure_percent: String,
    #[serde(default)]
    pub melting: String,
    #[serde(default)]
    pub total: f64,
}

impl GivenItem {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            product_name: String::new(),
            pure_weight: String::new(),
            pure_percent: String::new(),
            melting: String::new(),
            total: 0.0,
        }
    }
}

/// One unit of finished goods returned by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedItem {
    pub id: u32,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub final_ornaments_wt: String,
    #[serde(default)]
    pub stone_weight: String,
    #[serde(default)]
    pub making_charge_percent: String,
    #[serde(default)]
    pub sub_total: f64,
    #[serde(default)]
    pub total: f64,
}

impl ReceivedItem {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            product_name: String::new(),
            final_ornaments_wt: String::new(),
            stone_weight: "0".to_string(),
            making_charge_percent: String::new(),
            sub_total: 0.0,
            total: 0.0,
        }
    }
}

/// Persisted "given" side: date, items, and the aggregate snapshot taken
/// at submit time. Live aggregates are always recomputed from `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivenSection {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub items: Vec<GivenItem>,
    #[serde(default)]
    pub total_pure_weight: f64,
    #[serde(default)]
    pub total: f64,
}

/// Persisted "received" side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedSection {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub items: Vec<ReceivedItem>,
    #[serde(default)]
    pub total_ornaments_wt: f64,
    #[serde(default)]
    pub total_stone_weight: f64,
    #[serde(default)]
    pub total_sub_total: f64,
    #[serde(default)]
    pub total: f64,
}

/// Manual balance record. Independent of the computed section totals;
/// only the explicit "use computed total" action copies them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualCalc {
    #[serde(default)]
    pub given_total: f64,
    #[serde(default)]
    pub received_total: f64,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub result: f64,
}

/// Voucher aggregate (matches backend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    /// Backend document id; absent until the first save round-trips.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub voucher_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given: Option<GivenSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<ReceivedSection>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_calc: Option<ManualCalc>,
}

fn default_status() -> String {
    "incomplete".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_decodes_backend_aliases() {
        let json = r#"{"_id":"c1","clientName":"Ravi","shop":"Sri Jewels","phone":"98400"}"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.id, "c1");
        assert_eq!(client.name, "Ravi");
        assert_eq!(client.shop_name, "Sri Jewels");
        assert_eq!(client.phone_number, "98400");
        assert_eq!(client.address, "");
        assert!(client.balance.is_none());
    }

    #[test]
    fn test_voucher_decodes_with_missing_sections() {
        let json = r#"{"_id":"v9","voucherId":"GA-2608-1234","clientId":"c1","clientName":"Ravi"}"#;
        let voucher: Voucher = serde_json::from_str(json).unwrap();
        assert_eq!(voucher.id.as_deref(), Some("v9"));
        assert_eq!(voucher.voucher_id, "GA-2608-1234");
        assert!(voucher.given.is_none());
        assert!(voucher.received.is_none());
        assert_eq!(voucher.status, "incomplete");
    }

    #[test]
    fn test_voucher_roundtrips_given_section() {
        let json = r#"{
            "voucherId":"GA-2608-1234","clientId":"c1","clientName":"Ravi",
            "given":{"date":"2026-08-01","items":[
                {"id":1,"productName":"Bar","pureWeight":"10","purePercent":"92","melting":"2","total":460.0}
            ],"totalPureWeight":9.2,"total":460.0},
            "status":"incomplete"
        }"#;
        let voucher: Voucher = serde_json::from_str(json).unwrap();
        let given = voucher.given.as_ref().unwrap();
        assert_eq!(given.items.len(), 1);
        assert_eq!(given.items[0].product_name, "Bar");
        assert_eq!(given.items[0].total, 460.0);
        assert_eq!(given.total_pure_weight, 9.2);

        // Serializes back without inventing absent optional fields.
        let out = serde_json::to_value(&voucher).unwrap();
        assert!(out.get("received").is_none());
        assert!(out.get("id").is_none());
        assert_eq!(out["given"]["items"][0]["pureWeight"], "10");
    }

    #[test]
    fn test_received_item_defaults_stone_weight() {
        let item = ReceivedItem::new(3);
        assert_eq!(item.stone_weight, "0");
        assert_eq!(item.sub_total, 0.0);
        assert_eq!(item.total, 0.0);
    }
}
