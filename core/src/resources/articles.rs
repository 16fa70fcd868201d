use crate::error::Result;
use crate::http::HttpRequest;
use crate::resources::{collection_path, item_path, list_query};
use crate::transport::Transport;
use crate::types::{
    ActionResult, Article, ArticleCreateRequest, ArticleFilter, ArticleUpdateRequest,
    ListOptions, Page,
};

const RESOURCE: &str = "articles";

/// `/v1/articles`: products and services.
#[derive(Debug, Clone, Copy)]
pub struct Articles<'a> {
    transport: &'a Transport,
}

impl<'a> Articles<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn create(&self, input: &ArticleCreateRequest) -> Result<ActionResult> {
        self.transport.send_json(build_create(input)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Article> {
        self.transport.send_json(build_get(id)).await
    }

    /// Replace an article. A stale `version` is rejected with 409.
    pub async fn update(&self, id: &str, input: &ArticleUpdateRequest) -> Result<ActionResult> {
        self.transport.send_json(build_update(id, input)?).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport.send_unit(build_delete(id)).await
    }

    pub async fn list(
        &self,
        options: &ListOptions,
        filter: Option<&ArticleFilter>,
    ) -> Result<Page<Article>> {
        self.transport.send_json(build_list(options, filter)).await
    }
}

fn build_create(input: &ArticleCreateRequest) -> Result<HttpRequest> {
    HttpRequest::post_json(collection_path(RESOURCE), input)
}

fn build_get(id: &str) -> HttpRequest {
    HttpRequest::get(item_path(RESOURCE, id))
}

fn build_update(id: &str, input: &ArticleUpdateRequest) -> Result<HttpRequest> {
    HttpRequest::put_json(item_path(RESOURCE, id), input)
}

fn build_delete(id: &str) -> HttpRequest {
    HttpRequest::delete(item_path(RESOURCE, id))
}

fn build_list(options: &ListOptions, filter: Option<&ArticleFilter>) -> HttpRequest {
    HttpRequest::get(collection_path(RESOURCE)).with_query(&list_query(options, filter))
}
