//! Read-only lookups: profile, countries, payments, payment conditions,
//! posting categories, print layouts, recurring templates.
//!
//! The lookup lists come back as bare JSON arrays, not pages.

use crate::error::Result;
use crate::http::{HttpRequest, QueryParams};
use crate::resources::{collection_path, item_path};
use crate::transport::Transport;
use crate::types::{
    Country, ListOptions, Page, Payment, PaymentCondition, PostingCategory, PrintLayout, Profile,
    RecurringTemplate,
};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            transport: &'a Transport,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(transport: &'a Transport) -> Self {
                Self { transport }
            }
        }
    };
}

handle!(
    /// `/v1/profile`
    Profiles
);
handle!(
    /// `/v1/countries`
    Countries
);
handle!(
    /// `/v1/payments/{voucherId}`
    Payments
);
handle!(
    /// `/v1/payment-conditions`
    PaymentConditions
);
handle!(
    /// `/v1/posting-categories`
    PostingCategories
);
handle!(
    /// `/v1/print-layouts`
    PrintLayouts
);
handle!(
    /// `/v1/recurring-templates`
    RecurringTemplates
);

impl Profiles<'_> {
    pub async fn get(&self) -> Result<Profile> {
        self.transport
            .send_json(HttpRequest::get(collection_path("profile")))
            .await
    }
}

impl Countries<'_> {
    pub async fn list(&self) -> Result<Vec<Country>> {
        self.transport
            .send_json(HttpRequest::get(collection_path("countries")))
            .await
    }
}

impl Payments<'_> {
    /// Payment state of the voucher `voucher_id` (any voucher type).
    pub async fn get(&self, voucher_id: &str) -> Result<Payment> {
        self.transport
            .send_json(HttpRequest::get(item_path("payments", voucher_id)))
            .await
    }
}

impl PaymentConditions<'_> {
    pub async fn list(&self) -> Result<Vec<PaymentCondition>> {
        self.transport
            .send_json(HttpRequest::get(collection_path("payment-conditions")))
            .await
    }
}

impl PostingCategories<'_> {
    pub async fn list(&self) -> Result<Vec<PostingCategory>> {
        self.transport
            .send_json(HttpRequest::get(collection_path("posting-categories")))
            .await
    }
}

impl PrintLayouts<'_> {
    pub async fn list(&self) -> Result<Vec<PrintLayout>> {
        self.transport
            .send_json(HttpRequest::get(collection_path("print-layouts")))
            .await
    }
}

impl RecurringTemplates<'_> {
    pub async fn get(&self, id: &str) -> Result<RecurringTemplate> {
        self.transport
            .send_json(HttpRequest::get(item_path("recurring-templates", id)))
            .await
    }

    pub async fn list(&self, options: &ListOptions) -> Result<Page<RecurringTemplate>> {
        let req = HttpRequest::get(collection_path("recurring-templates"))
            .with_query(&options.to_query());
        self.transport.send_json(req).await
    }
}
