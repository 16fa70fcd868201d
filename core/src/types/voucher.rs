//! Bookkeeping vouchers and the cross-type voucher list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{TaxType, Timestamp, VoucherStatus, VoucherType};
use crate::http::{Query, QueryParams};

/// Date format of the voucher list's date-range filters.
const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub voucher_type: Option<VoucherType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_status: Option<VoucherStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub total_gross_amount: f64,
    #[serde(default)]
    pub total_tax_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<TaxType>,
    #[serde(default)]
    pub use_collective_contact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub voucher_items: Vec<VoucherItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<VoucherFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<Timestamp>,
    #[serde(default)]
    pub version: i64,
}

/// One booking line of a voucher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherItem {
    pub amount: f64,
    pub tax_amount: f64,
    pub tax_rate_percent: f64,
    pub category_id: String,
}

/// Reference to a file attached to a voucher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherFile {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherCreateRequest {
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<String>,
    pub voucher_date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    pub total_gross_amount: f64,
    pub total_tax_amount: f64,
    pub tax_type: TaxType,
    #[serde(default)]
    pub use_collective_contact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub voucher_items: Vec<VoucherItem>,
}

/// Full replacement of a voucher; `version` must match the stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<String>,
    pub voucher_date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    pub total_gross_amount: f64,
    pub total_tax_amount: f64,
    pub tax_type: TaxType,
    #[serde(default)]
    pub use_collective_contact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub voucher_items: Vec<VoucherItem>,
    pub version: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoucherFilter {
    pub voucher_number: Option<String>,
    pub voucher_status: Option<VoucherStatus>,
    pub contact_id: Option<String>,
}

impl QueryParams for VoucherFilter {
    fn append_to(&self, query: &mut Query) {
        query.push_opt("voucherNumber", self.voucher_number.as_deref());
        query.push_opt("voucherStatus", self.voucher_status);
        query.push_opt("contactId", self.contact_id.as_deref());
    }
}

/// Summary row of `GET /v1/voucherlist`, across all voucher types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherListItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_type: Option<VoucherType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_status: Option<VoucherStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub open_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// Filters of the voucher list. Date bounds are sent as `yyyy-MM-dd`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoucherListFilter {
    pub voucher_type: Option<VoucherType>,
    pub voucher_status: Option<VoucherStatus>,
    pub archived: Option<bool>,
    pub contact_id: Option<String>,
    pub voucher_date_from: Option<NaiveDate>,
    pub voucher_date_to: Option<NaiveDate>,
    pub created_date_from: Option<NaiveDate>,
    pub created_date_to: Option<NaiveDate>,
    pub updated_date_from: Option<NaiveDate>,
    pub updated_date_to: Option<NaiveDate>,
}

impl QueryParams for VoucherListFilter {
    fn append_to(&self, query: &mut Query) {
        query.push_opt("voucherType", self.voucher_type);
        query.push_opt("voucherStatus", self.voucher_status);
        query.push_opt("archived", self.archived);
        query.push_opt("contactId", self.contact_id.as_deref());
        for (name, date) in [
            ("voucherDateFrom", self.voucher_date_from),
            ("voucherDateTo", self.voucher_date_to),
            ("createdDateFrom", self.created_date_from),
            ("createdDateTo", self.created_date_to),
            ("updatedDateFrom", self.updated_date_from),
            ("updatedDateTo", self.updated_date_to),
        ] {
            query.push_opt(name, date.map(|date| date.format(FILTER_DATE_FORMAT)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voucher_filter_order() {
        let filter = VoucherFilter {
            voucher_number: Some("RE-2024-1".to_string()),
            voucher_status: Some(VoucherStatus::Open),
            contact_id: Some("c1".to_string()),
        };
        assert_eq!(
            filter.to_query().encode(),
            "voucherNumber=RE-2024-1&voucherStatus=open&contactId=c1"
        );
    }

    #[test]
    fn voucher_list_dates_use_iso_calendar_format() {
        let filter = VoucherListFilter {
            voucher_type: Some(VoucherType::SalesInvoice),
            archived: Some(false),
            voucher_date_from: NaiveDate::from_ymd_opt(2024, 1, 5),
            updated_date_to: NaiveDate::from_ymd_opt(2024, 12, 31),
            ..VoucherListFilter::default()
        };
        assert_eq!(
            filter.to_query().encode(),
            "voucherType=salesinvoice&archived=false&voucherDateFrom=2024-01-05&updatedDateTo=2024-12-31"
        );
    }

    #[test]
    fn voucher_type_is_sent_as_type() {
        let input = VoucherCreateRequest {
            voucher_type: VoucherType::PurchaseInvoice,
            voucher_number: None,
            voucher_date: Timestamp::parse_from_rfc3339("2024-03-01T00:00:00+01:00").unwrap(),
            shipping_date: None,
            due_date: None,
            total_gross_amount: 119.0,
            total_tax_amount: 19.0,
            tax_type: TaxType::Gross,
            use_collective_contact: true,
            contact_id: None,
            remark: None,
            voucher_items: vec![VoucherItem {
                amount: 119.0,
                tax_amount: 19.0,
                tax_rate_percent: 19.0,
                category_id: "8f8664a8-fd86-11e1-a21f-0800200c9a66".to_string(),
            }],
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "purchaseinvoice");
        assert_eq!(json["taxType"], "gross");
        assert_eq!(json["voucherItems"][0]["taxRatePercent"], 19.0);
    }
}
