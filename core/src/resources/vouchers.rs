use bytes::Bytes;
use tracing::debug;

use crate::error::Result;
use crate::http::{HttpRequest, MultipartForm};
use crate::resources::{collection_path, item_path, list_query};
use crate::transport::Transport;
use crate::types::{
    ActionResult, ListOptions, Page, Voucher, VoucherCreateRequest, VoucherFilter,
    VoucherListFilter, VoucherListItem, VoucherUpdateRequest,
};

const RESOURCE: &str = "vouchers";
const LIST_RESOURCE: &str = "voucherlist";

/// `/v1/vouchers`: bookkeeping vouchers and their attached files.
#[derive(Debug, Clone, Copy)]
pub struct Vouchers<'a> {
    transport: &'a Transport,
}

impl<'a> Vouchers<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn create(&self, input: &VoucherCreateRequest) -> Result<ActionResult> {
        self.transport.send_json(build_create(input)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Voucher> {
        self.transport.send_json(build_get(id)).await
    }

    pub async fn update(&self, id: &str, input: &VoucherUpdateRequest) -> Result<ActionResult> {
        self.transport.send_json(build_update(id, input)?).await
    }

    pub async fn list(
        &self,
        options: &ListOptions,
        filter: Option<&VoucherFilter>,
    ) -> Result<Page<Voucher>> {
        self.transport.send_json(build_list(options, filter)).await
    }

    /// Attach a file (receipt scan, PDF) to voucher `id`.
    pub async fn upload_file(
        &self,
        id: &str,
        filename: &str,
        content: impl Into<Bytes>,
    ) -> Result<()> {
        let content = content.into();
        debug!(id, filename, bytes = content.len(), "uploading voucher file");
        self.transport
            .send_unit(build_upload_file(id, filename, content))
            .await
    }
}

/// `/v1/voucherlist`: a read-only index across all voucher types.
#[derive(Debug, Clone, Copy)]
pub struct VoucherList<'a> {
    transport: &'a Transport,
}

impl<'a> VoucherList<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        options: &ListOptions,
        filter: Option<&VoucherListFilter>,
    ) -> Result<Page<VoucherListItem>> {
        self.transport.send_json(build_voucher_list(options, filter)).await
    }
}

fn build_create(input: &VoucherCreateRequest) -> Result<HttpRequest> {
    HttpRequest::post_json(collection_path(RESOURCE), input)
}

fn build_get(id: &str) -> HttpRequest {
    HttpRequest::get(item_path(RESOURCE, id))
}

fn build_update(id: &str, input: &VoucherUpdateRequest) -> Result<HttpRequest> {
    HttpRequest::put_json(item_path(RESOURCE, id), input)
}

fn build_list(options: &ListOptions, filter: Option<&VoucherFilter>) -> HttpRequest {
    HttpRequest::get(collection_path(RESOURCE)).with_query(&list_query(options, filter))
}

fn build_upload_file(id: &str, filename: &str, content: Bytes) -> HttpRequest {
    let form = MultipartForm::new().file("file", filename, content);
    HttpRequest::post_multipart(format!("{}/files", item_path(RESOURCE, id)), form)
}

fn build_voucher_list(options: &ListOptions, filter: Option<&VoucherListFilter>) -> HttpRequest {
    HttpRequest::get(collection_path(LIST_RESOURCE)).with_query(&list_query(options, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, MultipartPart, RequestBody};
    use crate::types::{VoucherStatus, VoucherType};

    #[test]
    fn build_list_with_filter() {
        let filter = VoucherFilter {
            voucher_status: Some(VoucherStatus::Unchecked),
            ..VoucherFilter::default()
        };
        let req = build_list(&ListOptions::default(), Some(&filter));
        assert_eq!(req.path, "/v1/vouchers?voucherStatus=unchecked");
    }

    #[test]
    fn build_upload_file_is_single_file_part() {
        let req = build_upload_file("v1", "receipt.jpg", Bytes::from_static(b"\xff\xd8"));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/v1/vouchers/v1/files");
        match req.body {
            Some(RequestBody::Multipart(form)) => {
                assert_eq!(form.parts.len(), 1);
                match &form.parts[0] {
                    MultipartPart::File {
                        name,
                        filename,
                        content_type,
                        ..
                    } => {
                        assert_eq!(name, "file");
                        assert_eq!(filename, "receipt.jpg");
                        assert_eq!(content_type, "image/jpeg");
                    }
                    other => panic!("expected file part, got {other:?}"),
                }
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn build_voucher_list_paging_first() {
        let filter = VoucherListFilter {
            voucher_type: Some(VoucherType::Invoice),
            voucher_status: Some(VoucherStatus::Open),
            ..VoucherListFilter::default()
        };
        let req = build_voucher_list(&ListOptions::page(0).with_size(250), Some(&filter));
        assert_eq!(
            req.path,
            "/v1/voucherlist?page=0&size=250&voucherType=invoice&voucherStatus=open"
        );
    }
}
