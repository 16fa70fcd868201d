//! One generic facade for every sales voucher kind.
//!
//! # Design
//! Invoices, quotations, credit notes, delivery notes, order confirmations,
//! dunnings and down-payment invoices share their path layout and most of
//! their operations. `SalesVouchers<K>` implements them once; the marker
//! type `K` supplies the collection path and record type, and the capability
//! traits decide which operations exist for it:
//!
//! | kind                | create(finalize) | pursue | get/render/download |
//! |---------------------|------------------|--------|---------------------|
//! | invoice             | yes              | yes    | yes                 |
//! | quotation           | yes              | no     | yes                 |
//! | credit note         | yes              | yes    | yes                 |
//! | delivery note       | yes              | yes    | yes                 |
//! | order confirmation  | yes              | yes    | yes                 |
//! | dunning             | with preceding   | yes    | yes                 |
//! | down-payment inv.   | no               | no     | yes                 |
//!
//! Dunnings always need a preceding sales voucher, so their `create` takes
//! its id and is the same call as `pursue`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::http::{HttpRequest, Query, APPLICATION_PDF};
use crate::resources::{collection_path, item_path, push_finalize};
use crate::stream::ByteStream;
use crate::transport::Transport;
use crate::types::{ActionResult, DocumentFile};

mod sealed {
    pub trait Sealed {}
}

/// A sales voucher kind: its collection path and record type.
pub trait SalesVoucherKind: sealed::Sealed {
    /// Path segment under `/v1`, e.g. `credit-notes`.
    const PATH: &'static str;
    type Record: DeserializeOwned;
}

/// Kinds created with a plain POST and an optional `finalize` flag.
pub trait Finalizable: SalesVoucherKind {
    type Create: Serialize;
}

/// Kinds that can be created as a follow-up of another sales voucher.
pub trait Pursuable: Finalizable {}

/// Marker types for [`SalesVouchers`].
pub mod kind {
    use super::{sealed::Sealed, Finalizable, Pursuable, SalesVoucherKind};
    use crate::types;

    macro_rules! kinds {
        ($($(#[$meta:meta])* $name:ident => $path:literal, $record:ty;)+) => {
            $(
                $(#[$meta])*
                #[derive(Debug)]
                pub enum $name {}

                impl Sealed for $name {}

                impl SalesVoucherKind for $name {
                    const PATH: &'static str = $path;
                    type Record = $record;
                }
            )+
        };
    }

    kinds! {
        Invoice => "invoices", types::Invoice;
        Quotation => "quotations", types::Quotation;
        CreditNote => "credit-notes", types::CreditNote;
        DeliveryNote => "delivery-notes", types::DeliveryNote;
        OrderConfirmation => "order-confirmations", types::OrderConfirmation;
        /// Created only as a follow-up; see `SalesVouchers::<Dunning>::create`.
        Dunning => "dunnings", types::Dunning;
        /// Read-only.
        DownPaymentInvoice => "down-payment-invoices", types::DownPaymentInvoice;
    }

    impl Finalizable for Invoice {
        type Create = types::InvoiceCreateRequest;
    }
    impl Finalizable for Quotation {
        type Create = types::QuotationCreateRequest;
    }
    impl Finalizable for CreditNote {
        type Create = types::CreditNoteCreateRequest;
    }
    impl Finalizable for DeliveryNote {
        type Create = types::DeliveryNoteCreateRequest;
    }
    impl Finalizable for OrderConfirmation {
        type Create = types::OrderConfirmationCreateRequest;
    }

    impl Pursuable for Invoice {}
    impl Pursuable for CreditNote {}
    impl Pursuable for DeliveryNote {}
    impl Pursuable for OrderConfirmation {}
}

pub type Invoices<'a> = SalesVouchers<'a, kind::Invoice>;
pub type Quotations<'a> = SalesVouchers<'a, kind::Quotation>;
pub type CreditNotes<'a> = SalesVouchers<'a, kind::CreditNote>;
pub type DeliveryNotes<'a> = SalesVouchers<'a, kind::DeliveryNote>;
pub type OrderConfirmations<'a> = SalesVouchers<'a, kind::OrderConfirmation>;
pub type Dunnings<'a> = SalesVouchers<'a, kind::Dunning>;
pub type DownPaymentInvoices<'a> = SalesVouchers<'a, kind::DownPaymentInvoice>;

/// Handle for one sales voucher kind.
pub struct SalesVouchers<'a, K> {
    transport: &'a Transport,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for SalesVouchers<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SalesVouchers<'_, K> {}

impl<K: SalesVoucherKind> fmt::Debug for SalesVouchers<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesVouchers")
            .field("path", &K::PATH)
            .finish_non_exhaustive()
    }
}

impl<'a, K: SalesVoucherKind> SalesVouchers<'a, K> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self {
            transport,
            kind: PhantomData,
        }
    }

    pub async fn get(&self, id: &str) -> Result<K::Record> {
        self.transport.send_json(build_get::<K>(id)).await
    }

    /// Ask the provider to render the PDF. The response body is discarded.
    pub async fn render_document(&self, id: &str) -> Result<()> {
        self.transport.send_unit(build_render::<K>(id)).await
    }

    /// Render the PDF and return the id of the resulting file, usable with
    /// `files().download`.
    pub async fn render_document_file_id(&self, id: &str) -> Result<String> {
        let file: DocumentFile = self.transport.send_json(build_render::<K>(id)).await?;
        Ok(file.document_file_id)
    }

    /// Stream the rendered PDF. The body is released when the stream drops.
    pub async fn download_document(&self, id: &str) -> Result<ByteStream> {
        self.transport.execute_stream(build_download::<K>(id)).await
    }
}

impl<K: Finalizable> SalesVouchers<'_, K> {
    /// Create a voucher, as draft unless `finalize` is set.
    pub async fn create(&self, input: &K::Create, finalize: bool) -> Result<ActionResult> {
        self.transport
            .send_json(build_create::<K, _>(input, None, finalize)?)
            .await
    }
}

impl<K: Pursuable> SalesVouchers<'_, K> {
    /// Create a voucher as follow-up of `preceding_id`, linking both.
    pub async fn pursue(
        &self,
        preceding_id: &str,
        input: &K::Create,
        finalize: bool,
    ) -> Result<ActionResult> {
        self.transport
            .send_json(build_create::<K, _>(input, Some(preceding_id), finalize)?)
            .await
    }
}

impl SalesVouchers<'_, kind::Dunning> {
    /// Create a dunning for the sales voucher `preceding_id`.
    pub async fn create(
        &self,
        preceding_id: &str,
        input: &crate::types::DunningCreateRequest,
    ) -> Result<ActionResult> {
        self.transport
            .send_json(build_create::<kind::Dunning, _>(input, Some(preceding_id), false)?)
            .await
    }

    /// Same call as [`create`](Self::create).
    pub async fn pursue(
        &self,
        preceding_id: &str,
        input: &crate::types::DunningCreateRequest,
    ) -> Result<ActionResult> {
        self.create(preceding_id, input).await
    }
}

fn build_create<K: SalesVoucherKind, B: Serialize>(
    input: &B,
    preceding_id: Option<&str>,
    finalize: bool,
) -> Result<HttpRequest> {
    let mut query = Query::new();
    query.push_opt("precedingSalesVoucherId", preceding_id);
    push_finalize(&mut query, finalize);
    Ok(HttpRequest::post_json(collection_path(K::PATH), input)?.with_query(&query))
}

fn build_get<K: SalesVoucherKind>(id: &str) -> HttpRequest {
    HttpRequest::get(item_path(K::PATH, id))
}

fn build_render<K: SalesVoucherKind>(id: &str) -> HttpRequest {
    HttpRequest::get(document_path::<K>(id))
}

fn build_download<K: SalesVoucherKind>(id: &str) -> HttpRequest {
    HttpRequest::get(document_path::<K>(id)).with_header("Accept", APPLICATION_PDF)
}

fn document_path<K: SalesVoucherKind>(id: &str) -> String {
    format!("{}/document", item_path(K::PATH, id))
}
