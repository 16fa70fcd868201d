use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Event type names accepted by `event-subscriptions`.
pub mod event_types {
    pub const ARTICLE_CREATED: &str = "article.created";
    pub const ARTICLE_CHANGED: &str = "article.changed";
    pub const ARTICLE_DELETED: &str = "article.deleted";

    pub const CONTACT_CREATED: &str = "contact.created";
    pub const CONTACT_CHANGED: &str = "contact.changed";
    pub const CONTACT_DELETED: &str = "contact.deleted";

    pub const CREDIT_NOTE_CREATED: &str = "credit-note.created";
    pub const CREDIT_NOTE_CHANGED: &str = "credit-note.changed";
    pub const CREDIT_NOTE_DELETED: &str = "credit-note.deleted";
    pub const CREDIT_NOTE_STATUS_CHANGED: &str = "credit-note.status.changed";

    pub const DELIVERY_NOTE_CREATED: &str = "delivery-note.created";
    pub const DELIVERY_NOTE_CHANGED: &str = "delivery-note.changed";
    pub const DELIVERY_NOTE_DELETED: &str = "delivery-note.deleted";
    pub const DELIVERY_NOTE_STATUS_CHANGED: &str = "delivery-note.status.changed";

    pub const DUNNING_CREATED: &str = "dunning.created";
    pub const DUNNING_CHANGED: &str = "dunning.changed";
    pub const DUNNING_DELETED: &str = "dunning.deleted";

    pub const DOWN_PAYMENT_INVOICE_CREATED: &str = "down-payment-invoice.created";
    pub const DOWN_PAYMENT_INVOICE_CHANGED: &str = "down-payment-invoice.changed";
    pub const DOWN_PAYMENT_INVOICE_DELETED: &str = "down-payment-invoice.deleted";
    pub const DOWN_PAYMENT_INVOICE_STATUS_CHANGED: &str = "down-payment-invoice.status.changed";

    pub const INVOICE_CREATED: &str = "invoice.created";
    pub const INVOICE_CHANGED: &str = "invoice.changed";
    pub const INVOICE_DELETED: &str = "invoice.deleted";
    pub const INVOICE_STATUS_CHANGED: &str = "invoice.status.changed";

    pub const ORDER_CONFIRMATION_CREATED: &str = "order-confirmation.created";
    pub const ORDER_CONFIRMATION_CHANGED: &str = "order-confirmation.changed";
    pub const ORDER_CONFIRMATION_DELETED: &str = "order-confirmation.deleted";
    pub const ORDER_CONFIRMATION_STATUS_CHANGED: &str = "order-confirmation.status.changed";

    pub const PAYMENT_CHANGED: &str = "payment.changed";

    pub const QUOTATION_CREATED: &str = "quotation.created";
    pub const QUOTATION_CHANGED: &str = "quotation.changed";
    pub const QUOTATION_DELETED: &str = "quotation.deleted";
    pub const QUOTATION_STATUS_CHANGED: &str = "quotation.status.changed";

    pub const RECURRING_TEMPLATE_CREATED: &str = "recurring-template.created";
    pub const RECURRING_TEMPLATE_CHANGED: &str = "recurring-template.changed";
    pub const RECURRING_TEMPLATE_DELETED: &str = "recurring-template.deleted";

    pub const TOKEN_REVOKED: &str = "token.revoked";

    pub const VOUCHER_CREATED: &str = "voucher.created";
    pub const VOUCHER_CHANGED: &str = "voucher.changed";
    pub const VOUCHER_DELETED: &str = "voucher.deleted";
    pub const VOUCHER_STATUS_CHANGED: &str = "voucher.status.changed";
}

/// A webhook registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubscription {
    pub subscription_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,
    pub event_type: String,
    pub callback_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubscriptionCreateRequest {
    pub event_type: String,
    pub callback_url: String,
}

impl EventSubscriptionCreateRequest {
    pub fn new(event_type: impl Into<String>, callback_url: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            callback_url: callback_url.into(),
        }
    }
}

/// Listing envelope; unlike paged resources it only carries `content`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSubscriptionList {
    #[serde(default)]
    pub content: Vec<EventSubscription>,
}

/// Body the provider POSTs to a subscription's callback URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    pub event_type: String,
    pub resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_defaults_to_empty() {
        let list: EventSubscriptionList = serde_json::from_str("{}").unwrap();
        assert!(list.content.is_empty());
    }

    #[test]
    fn webhook_payload_decodes() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "organizationId": "aa93e8a8-2aa3-470b-b914-caad8a255dd8",
                "eventType": "invoice.status.changed",
                "resourceId": "e9066f04-8cc7-4616-93f8-ac9ecc8479c8",
                "eventDate": "2023-04-24T08:20:22.528+02:00"
            }"#,
        )
        .unwrap();
        assert_eq!(payload.event_type, event_types::INVOICE_STATUS_CHANGED);
        assert!(payload.event_date.is_some());
    }
}
