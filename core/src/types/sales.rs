//! Sales vouchers: invoices and the documents around them.

use serde::{Deserialize, Serialize};

use super::{
    Address, DocumentFiles, ElectronicDocumentProfile, LineItem, PaymentConditions,
    RelatedVoucher, ShippingConditions, TaxAmount, TaxConditions, Timestamp, TotalPrice,
    VoucherStatus, XRechnung,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
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
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rechnung: Option<XRechnung>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electronic_document_profile: Option<ElectronicDocumentProfile>,
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
    #[serde(default)]
    pub closing_invoice: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_gross_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub down_payment_deductions: Vec<DownPaymentDeduction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_vouchers: Vec<RelatedVoucher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<DocumentFiles>,
}

/// A down payment already received and deducted on a closing invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownPaymentDeduction {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_date: Option<Timestamp>,
    #[serde(default)]
    pub received_gross_amount: f64,
    #[serde(default)]
    pub received_net_amount: f64,
    #[serde(default)]
    pub received_tax_amount: f64,
    #[serde(default)]
    pub tax_rate_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreateRequest {
    pub voucher_date: Timestamp,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub tax_conditions: TaxConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
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
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rechnung: Option<XRechnung>,
}

impl InvoiceCreateRequest {
    pub fn new(
        voucher_date: Timestamp,
        address: Address,
        line_items: Vec<LineItem>,
        tax_conditions: TaxConditions,
    ) -> Self {
        Self {
            voucher_date,
            address,
            line_items,
            tax_conditions,
            total_price: None,
            payment_conditions: None,
            shipping_conditions: None,
            print_layout_id: None,
            title: None,
            introduction: None,
            remark: None,
            language: None,
            x_rechnung: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
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
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electronic_document_profile: Option<ElectronicDocumentProfile>,
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_vouchers: Vec<RelatedVoucher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<DocumentFiles>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationCreateRequest {
    pub voucher_date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub tax_conditions: TaxConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
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
    pub language: Option<String>,
}

impl QuotationCreateRequest {
    pub fn new(
        voucher_date: Timestamp,
        address: Address,
        line_items: Vec<LineItem>,
        tax_conditions: TaxConditions,
    ) -> Self {
        Self {
            voucher_date,
            expiration_date: None,
            address,
            line_items,
            tax_conditions,
            total_price: None,
            payment_conditions: None,
            shipping_conditions: None,
            print_layout_id: None,
            title: None,
            introduction: None,
            remark: None,
            language: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNote {
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
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electronic_document_profile: Option<ElectronicDocumentProfile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_amounts: Vec<TaxAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_conditions: Option<TaxConditions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_vouchers: Vec<RelatedVoucher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<DocumentFiles>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditNoteCreateRequest {
    pub voucher_date: Timestamp,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub tax_conditions: TaxConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl CreditNoteCreateRequest {
    pub fn new(
        voucher_date: Timestamp,
        address: Address,
        line_items: Vec<LineItem>,
        tax_conditions: TaxConditions,
    ) -> Self {
        Self {
            voucher_date,
            address,
            line_items,
            tax_conditions,
            total_price: None,
            print_layout_id: None,
            title: None,
            introduction: None,
            remark: None,
            language: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryNote {
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
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electronic_document_profile: Option<ElectronicDocumentProfile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_amounts: Vec<TaxAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_conditions: Option<TaxConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_conditions: Option<ShippingConditions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_vouchers: Vec<RelatedVoucher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<DocumentFiles>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryNoteCreateRequest {
    pub voucher_date: Timestamp,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub tax_conditions: TaxConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
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
    pub language: Option<String>,
}

impl DeliveryNoteCreateRequest {
    pub fn new(
        voucher_date: Timestamp,
        address: Address,
        line_items: Vec<LineItem>,
        tax_conditions: TaxConditions,
    ) -> Self {
        Self {
            voucher_date,
            address,
            line_items,
            tax_conditions,
            total_price: None,
            shipping_conditions: None,
            print_layout_id: None,
            title: None,
            introduction: None,
            remark: None,
            language: None,
        }
    }
}

/// A payment reminder. Always issued for a preceding sales voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dunning {
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
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electronic_document_profile: Option<ElectronicDocumentProfile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_amounts: Vec<TaxAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_conditions: Option<TaxConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_conditions: Option<ShippingConditions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_vouchers: Vec<RelatedVoucher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<DocumentFiles>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DunningCreateRequest {
    pub voucher_date: Timestamp,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub tax_conditions: TaxConditions,
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
    pub language: Option<String>,
}

impl DunningCreateRequest {
    pub fn new(
        voucher_date: Timestamp,
        address: Address,
        line_items: Vec<LineItem>,
        tax_conditions: TaxConditions,
    ) -> Self {
        Self {
            voucher_date,
            address,
            line_items,
            tax_conditions,
            shipping_conditions: None,
            print_layout_id: None,
            title: None,
            introduction: None,
            remark: None,
            language: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
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
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electronic_document_profile: Option<ElectronicDocumentProfile>,
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
    pub delivery_terms: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_vouchers: Vec<RelatedVoucher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<DocumentFiles>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmationCreateRequest {
    pub voucher_date: Timestamp,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub tax_conditions: TaxConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<TotalPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_conditions: Option<PaymentConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_conditions: Option<ShippingConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl OrderConfirmationCreateRequest {
    pub fn new(
        voucher_date: Timestamp,
        address: Address,
        line_items: Vec<LineItem>,
        tax_conditions: TaxConditions,
    ) -> Self {
        Self {
            voucher_date,
            address,
            line_items,
            tax_conditions,
            total_price: None,
            payment_conditions: None,
            shipping_conditions: None,
            delivery_terms: None,
            print_layout_id: None,
            title: None,
            introduction: None,
            remark: None,
            language: None,
        }
    }
}

/// Read-only: down-payment invoices are created in the Lexware UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownPaymentInvoice {
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
    pub voucher_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electronic_document_profile: Option<ElectronicDocumentProfile>,
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
    pub closing_invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_vouchers: Vec<RelatedVoucher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_layout_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<DocumentFiles>,
}
