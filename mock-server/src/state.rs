//! In-memory records, stored files and the request journal.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const ORGANIZATION_ID: &str = "aa93e8a8-2aa3-470b-b914-caad8a255dd8";

/// One request as the server saw it, before authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Lower-cased header names, in arrival order.
    pub headers: Vec<(String, String)>,
}

impl JournalEntry {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Default)]
pub(crate) struct Store {
    /// Records per collection, in creation order.
    pub records: HashMap<String, Vec<Value>>,
    pub files: HashMap<String, StoredFile>,
    pub journal: Vec<JournalEntry>,
    pub profile: Value,
    pub countries: Value,
    pub payment_conditions: Value,
    pub posting_categories: Value,
    pub print_layouts: Value,
    pub voucher_numbers: HashMap<&'static str, u32>,
}

impl Store {
    pub fn find(&self, resource: &str, id: &str) -> Option<&Value> {
        self.records
            .get(resource)?
            .iter()
            .find(|record| record["id"] == id)
    }

    pub fn find_mut(&mut self, resource: &str, id: &str) -> Option<&mut Value> {
        self.records
            .get_mut(resource)?
            .iter_mut()
            .find(|record| record["id"] == id)
    }

    /// Next voucher number for a prefix, e.g. `RE0001`.
    pub fn next_voucher_number(&mut self, prefix: &'static str) -> String {
        let counter = self.voucher_numbers.entry(prefix).or_insert(0);
        *counter += 1;
        format!("{prefix}{counter:04}")
    }
}

/// Shared state behind the router. Cloning shares the same store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) store: Arc<RwLock<Store>>,
    pub(crate) api_key: Option<Arc<str>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty collections plus seeded lookup lists.
    pub fn new() -> Self {
        let store = Store {
            profile: seed_profile(),
            countries: seed_countries(),
            payment_conditions: seed_payment_conditions(),
            posting_categories: seed_posting_categories(),
            print_layouts: seed_print_layouts(),
            ..Store::default()
        };
        Self {
            store: Arc::new(RwLock::new(store)),
            api_key: None,
        }
    }

    /// Accept only this bearer token instead of any non-empty one.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(Arc::from(api_key));
        self
    }

    /// Insert a record as is, assigning an `id` if it has none.
    pub async fn insert(&self, resource: &str, mut record: Value) -> String {
        let id = match record.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                record["id"] = Value::String(id.clone());
                id
            }
        };
        self.store
            .write()
            .await
            .records
            .entry(resource.to_string())
            .or_default()
            .push(record);
        id
    }

    pub async fn record(&self, resource: &str, id: &str) -> Option<Value> {
        self.store.read().await.find(resource, id).cloned()
    }

    pub async fn file(&self, id: &str) -> Option<StoredFile> {
        self.store.read().await.files.get(id).cloned()
    }

    pub async fn journal(&self) -> Vec<JournalEntry> {
        self.store.read().await.journal.clone()
    }

    pub async fn clear_journal(&self) {
        self.store.write().await.journal.clear();
    }
}

fn seed_profile() -> Value {
    json!({
        "organizationId": ORGANIZATION_ID,
        "companyName": "Mock GmbH",
        "created": {"year": 2020, "month": 1, "day": 15},
        "connectionId": "3dea098b-73e9-4af4-9b2c-02a7b7c2b0d2",
        "taxType": "net",
        "smallBusiness": false,
        "distanceSalesPrinciple": "ORIGIN"
    })
}

fn seed_countries() -> Value {
    json!([
        {"countryCode": "DE", "countryNameDE": "Deutschland", "countryNameEN": "Germany", "taxClassification": "domestic"},
        {"countryCode": "AT", "countryNameDE": "Österreich", "countryNameEN": "Austria", "taxClassification": "intraCommunity"},
        {"countryCode": "US", "countryNameDE": "Vereinigte Staaten von Amerika", "countryNameEN": "United States", "taxClassification": "thirdPartyCountry"}
    ])
}

fn seed_payment_conditions() -> Value {
    json!([
        {
            "id": "cb1f0c8b-c7b1-4b8b-8d6f-b0c5a1f3d2a1",
            "organizationId": ORGANIZATION_ID,
            "paymentTermLabelTemplate": "Zahlbar sofort, rein netto",
            "paymentTermDuration": 0
        },
        {
            "id": "0a9d1f4c-51c8-4b5e-a6a2-9d2f4b1c7e3d",
            "organizationId": ORGANIZATION_ID,
            "paymentTermLabelTemplate": "{discountRange} Tage -{discount}, {paymentRange} Tage netto",
            "paymentTermDuration": 30,
            "paymentDiscountConditions": {"discountPercentage": 2, "discountRange": 10}
        }
    ])
}

fn seed_posting_categories() -> Value {
    json!([
        {"id": "8f8664a8-fd86-11e1-a21f-0800200c9a66", "name": "Einnahmen", "type": "income", "contactRequired": false, "splitAllowed": true, "groupName": "Einnahmen"},
        {"id": "8f8664a0-fd86-11e1-a21f-0800200c9a66", "name": "Bürobedarf", "type": "outgo", "contactRequired": false, "splitAllowed": true, "groupName": "Sonstiges"}
    ])
}

fn seed_print_layouts() -> Value {
    json!([
        {"id": "28c212c4-b6dd-11ee-b80a-dbc65f4ceccf", "name": "Standard", "default": true},
        {"id": "9d6e0b4a-b6dd-11ee-9b3a-2b8f1c7d5e6a", "name": "Brief"}
    ])
}
