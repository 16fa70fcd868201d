//! Entry point: one client, one handle per resource group.
//!
//! # Design
//! `LexwareClient` owns the `Transport` and nothing else. Resource handles
//! borrow it, so a handle is free to create and cannot outlive the client.
//! The client is `Clone + Send + Sync`; clones share the connection pool and
//! may be used from many tasks at once.

use crate::config::Config;
use crate::error::Result;
use crate::resources::{
    Articles, Contacts, Countries, CreditNotes, DeliveryNotes, DownPaymentInvoices, Dunnings,
    EventSubscriptions, Files, Invoices, OrderConfirmations, PaymentConditions, Payments,
    PostingCategories, PrintLayouts, Profiles, Quotations, RecurringTemplates, SalesVouchers,
    VoucherList, Vouchers,
};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct LexwareClient {
    transport: Transport,
}

impl LexwareClient {
    /// Client for the production API with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(Config::new(api_key))
    }

    /// Fails with `Error::Config` if the key is empty or the base URL invalid.
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(&config)?,
        })
    }

    /// `LexwareClient::with_config(Config::from_env()?)`
    pub fn from_env() -> Result<Self> {
        Self::with_config(Config::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// The underlying executor, for endpoints without a dedicated handle.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn articles(&self) -> Articles<'_> {
        Articles::new(&self.transport)
    }

    pub fn contacts(&self) -> Contacts<'_> {
        Contacts::new(&self.transport)
    }

    pub fn invoices(&self) -> Invoices<'_> {
        SalesVouchers::new(&self.transport)
    }

    pub fn quotations(&self) -> Quotations<'_> {
        SalesVouchers::new(&self.transport)
    }

    pub fn credit_notes(&self) -> CreditNotes<'_> {
        SalesVouchers::new(&self.transport)
    }

    pub fn delivery_notes(&self) -> DeliveryNotes<'_> {
        SalesVouchers::new(&self.transport)
    }

    pub fn order_confirmations(&self) -> OrderConfirmations<'_> {
        SalesVouchers::new(&self.transport)
    }

    pub fn dunnings(&self) -> Dunnings<'_> {
        SalesVouchers::new(&self.transport)
    }

    pub fn down_payment_invoices(&self) -> DownPaymentInvoices<'_> {
        SalesVouchers::new(&self.transport)
    }

    pub fn vouchers(&self) -> Vouchers<'_> {
        Vouchers::new(&self.transport)
    }

    pub fn voucher_list(&self) -> VoucherList<'_> {
        VoucherList::new(&self.transport)
    }

    pub fn files(&self) -> Files<'_> {
        Files::new(&self.transport)
    }

    pub fn event_subscriptions(&self) -> EventSubscriptions<'_> {
        EventSubscriptions::new(&self.transport)
    }

    pub fn profile(&self) -> Profiles<'_> {
        Profiles::new(&self.transport)
    }

    pub fn countries(&self) -> Countries<'_> {
        Countries::new(&self.transport)
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments::new(&self.transport)
    }

    pub fn payment_conditions(&self) -> PaymentConditions<'_> {
        PaymentConditions::new(&self.transport)
    }

    pub fn posting_categories(&self) -> PostingCategories<'_> {
        PostingCategories::new(&self.transport)
    }

    pub fn print_layouts(&self) -> PrintLayouts<'_> {
        PrintLayouts::new(&self.transport)
    }

    pub fn recurring_templates(&self) -> RecurringTemplates<'_> {
        RecurringTemplates::new(&self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn assert_send_sync<T: Send + Sync + Clone>() {}

    #[test]
    fn client_is_shareable_across_tasks() {
        assert_send_sync::<LexwareClient>();
    }

    #[test]
    fn new_rejects_empty_key() {
        assert!(matches!(LexwareClient::new(""), Err(Error::Config(_))));
    }

    #[test]
    fn with_config_strips_trailing_slash() {
        let client =
            LexwareClient::with_config(Config::new("key").with_base_url("http://127.0.0.1:9/"))
                .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }

    #[test]
    fn with_config_rejects_unparseable_base_url() {
        let err = LexwareClient::with_config(Config::new("key").with_base_url("not a url"))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
