use crate::error::Result;
use crate::http::HttpRequest;
use crate::resources::{collection_path, item_path, list_query};
use crate::transport::Transport;
use crate::types::{
    ActionResult, Contact, ContactCreateRequest, ContactFilter, ContactUpdateRequest, ListOptions,
    Page,
};

const RESOURCE: &str = "contacts";

/// `/v1/contacts`. Contacts cannot be deleted through the API.
#[derive(Debug, Clone, Copy)]
pub struct Contacts<'a> {
    transport: &'a Transport,
}

impl<'a> Contacts<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn create(&self, input: &ContactCreateRequest) -> Result<ActionResult> {
        self.transport.send_json(build_create(input)?).await
    }

    pub async fn get(&self, id: &str) -> Result<Contact> {
        self.transport.send_json(build_get(id)).await
    }

    pub async fn update(&self, id: &str, input: &ContactUpdateRequest) -> Result<ActionResult> {
        self.transport.send_json(build_update(id, input)?).await
    }

    pub async fn list(
        &self,
        options: &ListOptions,
        filter: Option<&ContactFilter>,
    ) -> Result<Page<Contact>> {
        self.transport.send_json(build_list(options, filter)).await
    }
}

fn build_create(input: &ContactCreateRequest) -> Result<HttpRequest> {
    HttpRequest::post_json(collection_path(RESOURCE), input)
}

fn build_get(id: &str) -> HttpRequest {
    HttpRequest::get(item_path(RESOURCE, id))
}

fn build_update(id: &str, input: &ContactUpdateRequest) -> Result<HttpRequest> {
    HttpRequest::put_json(item_path(RESOURCE, id), input)
}

fn build_list(options: &ListOptions, filter: Option<&ContactFilter>) -> HttpRequest {
    HttpRequest::get(collection_path(RESOURCE)).with_query(&list_query(options, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::types::ContactRoles;

    #[test]
    fn build_create_and_get() {
        let input = ContactCreateRequest {
            roles: ContactRoles::vendor(),
            ..ContactCreateRequest::default()
        };
        let req = build_create(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/v1/contacts");
        assert_eq!(build_get("missing-id").path, "/v1/contacts/missing-id");
    }

    #[test]
    fn build_update_is_put() {
        let req = build_update("c1", &ContactUpdateRequest::default()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "/v1/contacts/c1");
    }

    #[test]
    fn build_list_encodes_each_set_filter_once() {
        let filter = ContactFilter {
            email: Some("info@example.org".to_string()),
            name: Some("Müller".to_string()),
            number: Some(10_001),
            customer: true,
            vendor: false,
        };
        let req = build_list(&ListOptions::default().with_size(100), Some(&filter));
        assert_eq!(
            req.path,
            "/v1/contacts?size=100&email=info%40example.org&name=M%C3%BCller&number=10001&customer=true"
        );
    }
}
