//! Organization profile, lookup lists, payments, recurring templates, files.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    Address, LineItem, PaymentConditions, PaymentDiscountConditions, ShippingConditions,
    TaxAmount, TaxConditions, Timestamp, TotalPrice, VoucherStatus,
};

wire_enum! {
    pub enum TaxClassification {
        Domestic => "domestic",
        IntraCommunity => "intraCommunity",
        ThirdPartyCountry => "thirdPartyCountry",
    }
}

wire_enum! {
    /// The `type` form field of `POST /v1/files`.
    pub enum FileUploadType {
        Voucher => "voucher",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub country_code: String,
    #[serde(rename = "countryNameDE", skip_serializing_if = "Option::is_none")]
    pub country_name_de: Option<String>,
    #[serde(rename = "countryNameEN", skip_serializing_if = "Option::is_none")]
    pub country_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_classification: Option<TaxClassification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub organization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<LexwareDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
    #[serde(default)]
    pub small_business: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_sales_principle: Option<String>,
}

/// Calendar date split into its parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexwareDate {
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub day: u32,
}

impl LexwareDate {
    /// `None` when the parts do not form a valid date.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Payment state of a sales or bookkeeping voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub open_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_items: Vec<PaymentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_date: Option<Timestamp>,
    #[serde(default)]
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// A payment term preset of the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCondition {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_term_label_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_term_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_discount_conditions: Option<PaymentDiscountConditions>,
}

/// Booking category usable in `VoucherItem::category_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingCategory {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category_type: Option<String>,
    #[serde(default)]
    pub contact_required: bool,
    #[serde(default)]
    pub split_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintLayout {
    pub id: String,
    pub name: String,
    #[serde(rename = "default", default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<Timestamp>,
    #[serde(default)]
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_status: Option<VoucherStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_amounts: Vec<TaxAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_conditions: Option<TaxConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_conditions: Option<PaymentConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_conditions: Option<ShippingConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_template_settings: Option<RecurringTemplateSettings>,
}

/// Schedule of a recurring template. Dates are calendar dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplateSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub finalize: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_type: Option<String>,
    /// e.g. `MONTHLY`, `QUARTERLY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_execution_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_execution_failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_execution_error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub id: String,
}
