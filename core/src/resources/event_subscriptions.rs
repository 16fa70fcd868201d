use crate::error::Result;
use crate::http::HttpRequest;
use crate::resources::{collection_path, item_path};
use crate::transport::Transport;
use crate::types::{
    ActionResult, EventSubscription, EventSubscriptionCreateRequest, EventSubscriptionList,
};

const RESOURCE: &str = "event-subscriptions";

/// `/v1/event-subscriptions`: webhook registrations.
#[derive(Debug, Clone, Copy)]
pub struct EventSubscriptions<'a> {
    transport: &'a Transport,
}

impl<'a> EventSubscriptions<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn create(&self, input: &EventSubscriptionCreateRequest) -> Result<ActionResult> {
        let req = HttpRequest::post_json(collection_path(RESOURCE), input)?;
        self.transport.send_json(req).await
    }

    pub async fn get(&self, id: &str) -> Result<EventSubscription> {
        self.transport
            .send_json(HttpRequest::get(item_path(RESOURCE, id)))
            .await
    }

    /// All subscriptions of the organization. Not paged.
    pub async fn list(&self) -> Result<Vec<EventSubscription>> {
        let list: EventSubscriptionList = self
            .transport
            .send_json(HttpRequest::get(collection_path(RESOURCE)))
            .await?;
        Ok(list.content)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport
            .send_unit(HttpRequest::delete(item_path(RESOURCE, id)))
            .await
    }
}
