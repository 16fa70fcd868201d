//! Per-resource handles over the shared transport.
//!
//! # Design
//! A handle borrows the client's `Transport` and is created on demand by the
//! accessor methods on `LexwareClient`; it holds no state of its own. Each
//! operation is split the same way: a request builder that produces an
//! `HttpRequest` as plain data, and an async method that executes it and
//! decodes the response. The builders are where paths, query parameters and
//! header overrides are decided, so they carry the unit tests.
//!
//! All paths live under `/v1`.

mod articles;
mod contacts;
mod event_subscriptions;
mod files;
mod reference;
mod sales_vouchers;
mod vouchers;

pub use articles::Articles;
pub use contacts::Contacts;
pub use event_subscriptions::EventSubscriptions;
pub use files::Files;
pub use reference::{
    Countries, PaymentConditions, Payments, PostingCategories, PrintLayouts, Profiles,
    RecurringTemplates,
};
pub use sales_vouchers::{
    kind, CreditNotes, DeliveryNotes, DownPaymentInvoices, Dunnings, Finalizable, Invoices,
    OrderConfirmations, Pursuable, Quotations, SalesVoucherKind, SalesVouchers,
};
pub use vouchers::{VoucherList, Vouchers};

use crate::http::{Query, QueryParams};
use crate::types::ListOptions;

/// `/v1/{resource}`
pub(crate) fn collection_path(resource: &str) -> String {
    format!("/v1/{resource}")
}

/// `/v1/{resource}/{id}`
pub(crate) fn item_path(resource: &str, id: &str) -> String {
    format!("/v1/{resource}/{id}")
}

/// Paging parameters first, then the filter's own parameters.
pub(crate) fn list_query(options: &ListOptions, filter: Option<&impl QueryParams>) -> Query {
    let mut query = options.to_query();
    if let Some(filter) = filter {
        query.extend(filter);
    }
    query
}

/// `finalize=true` when requested, nothing otherwise.
pub(crate) fn push_finalize(query: &mut Query, finalize: bool) {
    if finalize {
        query.push("finalize", true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArticleFilter;

    #[test]
    fn paths_are_rooted_at_v1() {
        assert_eq!(collection_path("credit-notes"), "/v1/credit-notes");
        assert_eq!(item_path("credit-notes", "c1"), "/v1/credit-notes/c1");
    }

    #[test]
    fn list_query_puts_paging_before_filters() {
        let filter = ArticleFilter {
            gtin: Some("9783648170632".to_string()),
            ..ArticleFilter::default()
        };
        let query = list_query(&ListOptions::page(1).with_size(10), Some(&filter));
        assert_eq!(query.encode(), "page=1&size=10&gtin=9783648170632");
    }

    #[test]
    fn list_query_without_anything_is_empty() {
        assert!(list_query(&ListOptions::default(), None::<&ArticleFilter>).is_empty());
    }

    #[test]
    fn finalize_only_when_requested() {
        let mut query = Query::new();
        push_finalize(&mut query, false);
        assert!(query.is_empty());
        push_finalize(&mut query, true);
        assert_eq!(query.encode(), "finalize=true");
    }
}
