use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::error::{Error, Result};
use crate::http::{HttpRequest, MultipartForm, APPLICATION_OCTET_STREAM};
use crate::resources::{collection_path, item_path};
use crate::stream::ByteStream;
use crate::transport::Transport;
use crate::types::{FileUploadResponse, FileUploadType};

const RESOURCE: &str = "files";

/// `/v1/files`: bookkeeping uploads and rendered document downloads.
#[derive(Debug, Clone, Copy)]
pub struct Files<'a> {
    transport: &'a Transport,
}

impl<'a> Files<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn upload(
        &self,
        filename: &str,
        content: impl Into<Bytes>,
        file_type: FileUploadType,
    ) -> Result<FileUploadResponse> {
        let content = content.into();
        debug!(filename, bytes = content.len(), %file_type, "uploading file");
        self.transport
            .send_json(build_upload(filename, content, file_type))
            .await
    }

    /// Read a local file and upload it under its own file name.
    pub async fn upload_path(
        &self,
        path: impl AsRef<Path>,
        file_type: FileUploadType,
    ) -> Result<FileUploadResponse> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} has no usable file name", path.display()),
                ))
            })?;
        let content = tokio::fs::read(path).await?;
        self.upload(filename, content, file_type).await
    }

    /// Stream a stored file, e.g. the `documentFileId` of a rendered voucher.
    pub async fn download(&self, id: &str) -> Result<ByteStream> {
        self.transport.execute_stream(build_download(id)).await
    }
}

fn build_upload(filename: &str, content: Bytes, file_type: FileUploadType) -> HttpRequest {
    let form = MultipartForm::new()
        .file("file", filename, content)
        .text("type", file_type.as_str());
    HttpRequest::post_multipart(collection_path(RESOURCE), form)
}

fn build_download(id: &str) -> HttpRequest {
    HttpRequest::get(item_path(RESOURCE, id)).with_header("Accept", APPLICATION_OCTET_STREAM)
}
