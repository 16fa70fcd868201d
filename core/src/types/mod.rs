//! Data-transfer shapes for the Lexware API.
//!
//! # Design
//! Records mirror the provider's camelCase JSON. Fields the provider may omit
//! are `Option`s (or empty `Vec`s) and are omitted again on serialization, so
//! a record decoded from a response re-encodes without inventing `null`s.
//! Create/update shapes are separate types: they carry only the fields the
//! provider accepts, and update shapes carry the `version` used for
//! optimistic-concurrency checks.
//!
//! Filter structs implement `QueryParams`; each set, non-empty field becomes
//! exactly one query parameter.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::http::{Query, QueryParams};

/// Declares a string-valued enum with its wire names, `as_str` and `Display`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod article;
mod contact;
mod event_subscription;
mod reference;
mod sales;
mod voucher;

pub use article::*;
pub use contact::*;
pub use event_subscription::*;
pub use reference::*;
pub use sales::*;
pub use voucher::*;

/// Provider timestamps, e.g. `2023-02-21T00:00:00.000+01:00`.
pub type Timestamp = DateTime<FixedOffset>;

wire_enum! {
    /// Lifecycle status of a voucher. Transitions happen on the provider.
    pub enum VoucherStatus {
        Draft => "draft",
        Open => "open",
        Paid => "paid",
        PaidOff => "paidoff",
        Voided => "voided",
        Transferred => "transferred",
        SepaDebit => "sepadebit",
        Overdue => "overdue",
        Accepted => "accepted",
        Rejected => "rejected",
        Unchecked => "unchecked",
    }
}

wire_enum! {
    pub enum VoucherType {
        SalesInvoice => "salesinvoice",
        SalesCreditNote => "salescreditnote",
        PurchaseInvoice => "purchaseinvoice",
        PurchaseCreditNote => "purchasecreditnote",
        Invoice => "invoice",
        DownPaymentInvoice => "downpaymentinvoice",
        CreditNote => "creditnote",
        OrderConfirmation => "orderconfirmation",
        Quotation => "quotation",
        DeliveryNote => "deliverynote",
        Dunning => "dunning",
    }
}

wire_enum! {
    pub enum TaxType {
        Net => "net",
        Gross => "gross",
        VatFree => "vatfree",
        IntraCommunitySupply => "intraCommunitySupply",
        ConstructionalServices => "constructionalServices",
        ExternalServices => "externalServices",
        ThirdPartyCountryService => "thirdPartyCountryService",
        ThirdPartyCountryDelivery => "thirdPartyCountryDelivery",
    }
}

wire_enum! {
    pub enum LineItemType {
        Service => "service",
        Material => "material",
        Custom => "custom",
        Text => "text",
    }
}

wire_enum! {
    pub enum ShippingType {
        Delivery => "delivery",
        DeliveryPeriod => "deliveryperiod",
        Service => "service",
        ServicePeriod => "serviceperiod",
        None => "none",
    }
}

wire_enum! {
    pub enum ElectronicDocumentProfile {
        None => "NONE",
        En16931 => "EN16931",
        XRechnung => "XRechnung",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPrice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalPrice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_net_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_gross_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tax_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_discount_absolute: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_discount_percentage: Option<f64>,
}

/// Tax subtotal for one tax rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxAmount {
    #[serde(default)]
    pub tax_rate_percentage: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub net_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConditions {
    pub tax_type: TaxType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type_note: Option<String>,
}

impl TaxConditions {
    pub fn new(tax_type: TaxType) -> Self {
        Self {
            tax_type,
            tax_type_note: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_term_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_term_label_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_term_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_discount_conditions: Option<PaymentDiscountConditions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDiscountConditions {
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub discount_range: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_end_date: Option<Timestamp>,
    pub shipping_type: ShippingType,
}

/// A document linked to another in a business document chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedVoucher {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_type: Option<String>,
}

/// File references of a rendered sales voucher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFiles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_file_id: Option<String>,
}

/// Body of a `GET …/{id}/document` render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    pub document_file_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<UnitPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item_amount: Option<f64>,
}

impl LineItem {
    /// A custom line item with a name, quantity and unit price.
    pub fn custom(name: impl Into<String>, quantity: f64, unit_price: UnitPrice) -> Self {
        Self {
            id: None,
            item_type: LineItemType::Custom,
            name: Some(name.into()),
            description: None,
            quantity: Some(quantity),
            unit_name: None,
            unit_price: Some(unit_price),
            discount_percentage: None,
            line_item_amount: None,
        }
    }

    /// A text-only line item without price.
    pub fn text(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            item_type: LineItemType::Text,
            name: Some(name.into()),
            description: Some(description.into()),
            quantity: None,
            unit_name: None,
            unit_price: None,
            discount_percentage: None,
            line_item_amount: None,
        }
    }
}

/// XRechnung (German e-invoicing) properties of a voucher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XRechnung {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_reference: Option<String>,
}

/// One page of a listing.
///
/// Paging is offset based: `number` is the 0-based page index and there is no
/// continuation token. Use [`Page::next_page`] to compute the following page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
}

impl<T> Page<T> {
    /// Index of the page after this one, or `None` on the last page.
    pub fn next_page(&self) -> Option<u32> {
        self.number
            .checked_add(1)
            .filter(|next| !self.last && *next < self.total_pages)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

/// Result of a create or update call. Not the full resource: fetch it with
/// `get` when the complete record is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub id: String,
    #[serde(default)]
    pub resource_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<Timestamp>,
    #[serde(default)]
    pub version: i64,
}

/// Paging parameters for list calls. `page` is 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ListOptions {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            size: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

impl QueryParams for ListOptions {
    fn append_to(&self, query: &mut Query) {
        query.push_opt("page", self.page);
        query.push_opt("size", self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wire_enum_round_trips_wire_names() {
        assert_eq!(VoucherStatus::PaidOff.as_str(), "paidoff");
        assert_eq!(TaxType::IntraCommunitySupply.to_string(), "intraCommunitySupply");
        assert_eq!(
            serde_json::to_value(ElectronicDocumentProfile::XRechnung).unwrap(),
            "XRechnung"
        );
        let status: VoucherStatus = serde_json::from_str(r#""voided""#).unwrap();
        assert_eq!(status, VoucherStatus::Voided);
    }

    #[test]
    fn action_result_tolerates_missing_timestamps() {
        let result: ActionResult =
            serde_json::from_str(r#"{"id":"a1","resourceUri":"https://api.lexware.io/v1/articles/a1","version":1}"#)
                .unwrap();
        assert_eq!(result.id, "a1");
        assert_eq!(result.version, 1);
        assert!(result.created_date.is_none());
    }

    #[test]
    fn action_result_parses_provider_timestamps() {
        let result: ActionResult = serde_json::from_str(
            r#"{
                "id": "66196c43-baf3-4335-bfee-d610367059db",
                "resourceUri": "https://api.lexware.io/v1/invoices/66196c43-baf3-4335-bfee-d610367059db",
                "createdDate": "2023-06-29T15:15:09.447+02:00",
                "updatedDate": "2023-06-29T15:15:09.447+02:00",
                "version": 1
            }"#,
        )
        .unwrap();
        let created = result.created_date.unwrap();
        assert_eq!(created.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn page_next_page() {
        let page: Page<serde_json::Value> = serde_json::from_str(
            r#"{"content":[],"first":true,"last":false,"totalPages":3,"totalElements":55,"numberOfElements":25,"size":25,"number":0}"#,
        )
        .unwrap();
        assert_eq!(page.next_page(), Some(1));

        let last = Page::<serde_json::Value> {
            last: true,
            number: 2,
            ..page
        };
        assert_eq!(last.next_page(), None);
    }

    #[test]
    fn next_page_stops_at_largest_page_index() {
        let page: Page<serde_json::Value> = serde_json::from_str(
            r#"{"content":[],"last":false,"totalPages":5,"number":4294967295}"#,
        )
        .unwrap();
        assert_eq!(page.next_page(), None);
    }

    #[test]
    fn list_options_emit_page_then_size() {
        assert!(ListOptions::default().to_query().is_empty());
        assert_eq!(ListOptions::page(0).with_size(50).to_query().encode(), "page=0&size=50");
    }

    #[test]
    fn line_item_skips_absent_fields() {
        let item = LineItem::text("Note", "Delivered in two parts");
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({
                "type": "text",
                "name": "Note",
                "description": "Delivered in two parts"
            })
        );
    }
}
