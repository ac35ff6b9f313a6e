//! Backend API Client
//!
//! Thin async wrappers over the voucher-service REST API under `/api`.
//! Every fallible call returns `Result<T, String>`. Response shapes the
//! backend has been loose about are decoded through explicit tolerant
//! enums here, at the boundary, so nothing downstream probes shapes.

use serde::{Deserialize, Serialize};

use crate::models::{Client, GivenSection, ManualCalc, ReceivedSection, Voucher};

const API_BASE: &str = "/api";

// ========================
// Tolerant Response Shapes
// ========================

/// The clients list has shipped both as a bare array and wrapped in
/// `{ "clients": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClientsResponse {
    Wrapped { clients: Vec<Client> },
    Bare(Vec<Client>),
}

impl ClientsResponse {
    fn into_clients(self) -> Vec<Client> {
        match self {
            ClientsResponse::Wrapped { clients } => clients,
            ClientsResponse::Bare(clients) => clients,
        }
    }
}

/// Voucher-id endpoint: either a bare string or `{ "voucherId": "..." }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VoucherIdResponse {
    Wrapped {
        #[serde(rename = "voucherId", alias = "id")]
        voucher_id: String,
    },
    Bare(String),
}

impl VoucherIdResponse {
    fn into_id(self) -> String {
        match self {
            VoucherIdResponse::Wrapped { voucher_id } => voucher_id,
            VoucherIdResponse::Bare(id) => id,
        }
    }
}

/// Partial update body for `PUT /admin-receipts/:id`: only the sections
/// being saved are present.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<GivenSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<ReceivedSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_calc: Option<ManualCalc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ========================
// Requests
// ========================

async fn get_json<T: serde::de::DeserializeOwned>(url: String) -> Result<T, String> {
    let resp = reqwest::get(url.as_str()).await.map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("GET {} failed: {}", url, resp.status()));
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

pub async fn list_clients() -> Result<Vec<Client>, String> {
    get_json::<ClientsResponse>(format!("{API_BASE}/clients"))
        .await
        .map(ClientsResponse::into_clients)
}

pub async fn get_client(id: &str) -> Result<Client, String> {
    get_json(format!("{API_BASE}/clients/{id}")).await
}

pub async fn list_vouchers(client_id: Option<&str>) -> Result<Vec<Voucher>, String> {
    let url = match client_id {
        Some(id) => format!("{API_BASE}/admin-receipts?clientId={id}"),
        None => format!("{API_BASE}/admin-receipts"),
    };
    get_json(url).await
}

pub async fn get_voucher(id: &str) -> Result<Voucher, String> {
    get_json(format!("{API_BASE}/admin-receipts/{id}")).await
}

/// Create a voucher. The response carries the server-assigned id the
/// editor adopts to flip from create to edit mode.
pub async fn create_voucher(voucher: &Voucher) -> Result<Voucher, String> {
    let resp = reqwest::Client::new()
        .post(format!("{API_BASE}/admin-receipts"))
        .json(voucher)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("POST /admin-receipts failed: {}", resp.status()));
    }
    resp.json::<Voucher>().await.map_err(|e| e.to_string())
}

pub async fn update_voucher(id: &str, update: &VoucherUpdate) -> Result<(), String> {
    let resp = reqwest::Client::new()
        .put(format!("{API_BASE}/admin-receipts/{id}"))
        .json(update)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("PUT /admin-receipts/{} failed: {}", id, resp.status()));
    }
    Ok(())
}

// ========================
// Voucher Id Generation
// ========================

/// Fetch a fresh voucher id from the backend; fall back to a locally
/// generated `GA-YYMM-NNNN` when the endpoint is unavailable so the
/// editor stays usable.
pub async fn generate_voucher_id() -> String {
    match get_json::<VoucherIdResponse>(format!("{API_BASE}/admin-receipts/generate-voucher-id"))
        .await
    {
        Ok(resp) => resp.into_id(),
        Err(err) => {
            web_sys::console::warn_1(
                &format!("voucher-id endpoint unavailable, generating locally: {err}").into(),
            );
            local_voucher_id()
        }
    }
}

/// Local fallback: current date plus a random four-digit suffix.
pub fn local_voucher_id() -> String {
    let now = js_sys::Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // js Date months are 0-based
    let digits = 1000 + (js_sys::Math::random() * 9000.0).floor() as u32;
    format_voucher_id(year, month, digits)
}

/// `GA-YYMM-NNNN`: two-digit year, two-digit month, four digits in
/// [1000, 9999].
pub fn format_voucher_id(year: u32, month: u32, digits: u32) -> String {
    format!("GA-{:02}{:02}-{}", year % 100, month, digits.clamp(1000, 9999))
}

// ========================
// Fallback Data
// ========================

/// Built-in sample clients used when the list endpoint is down or its
/// response is unrecognizable. The picker warns but stays usable.
pub fn sample_clients() -> Vec<Client> {
    let make = |id: &str, name: &str, shop: &str, phone: &str, address: &str| Client {
        id: id.to_string(),
        name: name.to_string(),
        shop_name: shop.to_string(),
        phone_number: phone.to_string(),
        address: address.to_string(),
        balance: None,
    };
    vec![
        make("sample-1", "Ramesh Kumar", "Sri Lakshmi Jewellers", "9840012345", "12 Bazaar St"),
        make("sample-2", "Anitha Devi", "Golden Touch", "9840067890", "4 Car St"),
        make("sample-3", "Vijay Anand", "Anand & Sons", "9840023456", "81 Main Rd"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_decode_wrapped_shape() {
        let json = r#"{"clients":[{"id":"c1","name":"Ravi"},{"id":"c2","name":"Devi"}]}"#;
        let resp: ClientsResponse = serde_json::from_str(json).unwrap();
        let clients = resp.into_clients();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].id, "c1");
    }

    #[test]
    fn test_clients_decode_bare_shape() {
        let json = r#"[{"id":"c1","name":"Ravi"}]"#;
        let resp: ClientsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_clients().len(), 1);
    }

    #[test]
    fn test_clients_decode_rejects_garbage() {
        let err = serde_json::from_str::<ClientsResponse>(r#"{"count":3}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_voucher_id_decode_both_shapes() {
        let wrapped: VoucherIdResponse =
            serde_json::from_str(r#"{"voucherId":"GA-2608-4321"}"#).unwrap();
        assert_eq!(wrapped.into_id(), "GA-2608-4321");

        let bare: VoucherIdResponse = serde_json::from_str(r#""GA-2608-1111""#).unwrap();
        assert_eq!(bare.into_id(), "GA-2608-1111");
    }

    #[test]
    fn test_format_voucher_id_pattern() {
        assert_eq!(format_voucher_id(2026, 8, 4321), "GA-2608-4321");
        assert_eq!(format_voucher_id(26, 12, 1000), "GA-2612-1000");
        // Out-of-range suffixes clamp into the four-digit band.
        assert_eq!(format_voucher_id(2026, 1, 12), "GA-2601-1000");
        assert_eq!(format_voucher_id(2026, 1, 99999), "GA-2601-9999");
    }

    #[test]
    fn test_update_body_omits_absent_sections() {
        let update = VoucherUpdate {
            manual_calc: Some(ManualCalc {
                given_total: 100.0,
                received_total: 40.0,
                operation: crate::calc::OP_SUBTRACT_GIVEN_RECEIVED.to_string(),
                result: 60.0,
            }),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("given").is_none());
        assert!(body.get("received").is_none());
        assert!(body.get("status").is_none());
        assert_eq!(body["manualCalc"]["result"], 60.0);
    }

    #[test]
    fn test_sample_clients_are_usable() {
        let clients = sample_clients();
        assert!(clients.len() >= 3);
        assert!(clients.iter().all(|c| !c.id.is_empty() && !c.name.is_empty()));
    }
}
