use serde::{Deserialize, Serialize};

use super::Timestamp;
use crate::http::{Query, QueryParams};

wire_enum! {
    pub enum ArticleType {
        Product => "PRODUCT",
        Service => "SERVICE",
    }
}

wire_enum! {
    /// Which of net or gross price is authoritative; the other is derived.
    pub enum LeadingPrice {
        Net => "NET",
        Gross => "GROSS",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<Timestamp>,
    #[serde(default)]
    pub archived: bool,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub article_type: ArticleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<ArticlePrice>,
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePrice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_price: Option<LeadingPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCreateRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub article_type: ArticleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<ArticlePrice>,
}

impl ArticleCreateRequest {
    pub fn new(title: impl Into<String>, article_type: ArticleType) -> Self {
        Self {
            title: title.into(),
            article_type,
            description: None,
            article_number: None,
            gtin: None,
            note: None,
            unit_name: None,
            price: None,
        }
    }
}

/// Full replacement of an article; `version` must match the stored one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdateRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub article_type: ArticleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<ArticlePrice>,
    pub version: i64,
}

impl From<Article> for ArticleUpdateRequest {
    fn from(article: Article) -> Self {
        Self {
            title: article.title,
            article_type: article.article_type,
            description: article.description,
            article_number: article.article_number,
            gtin: article.gtin,
            note: article.note,
            unit_name: article.unit_name,
            price: article.price,
            version: article.version,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub article_number: Option<String>,
    pub gtin: Option<String>,
    pub article_type: Option<ArticleType>,
}

impl QueryParams for ArticleFilter {
    fn append_to(&self, query: &mut Query) {
        query.push_opt("articleNumber", self.article_number.as_deref());
        query.push_opt("gtin", self.gtin.as_deref());
        query.push_opt("type", self.article_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_serializes_required_and_set_fields_only() {
        let mut input = ArticleCreateRequest::new("Widget", ArticleType::Product);
        input.unit_name = Some("Stück".to_string());
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Widget", "type": "PRODUCT", "unitName": "Stück"})
        );
    }

    #[test]
    fn update_request_from_fetched_article_keeps_version() {
        let article: Article = serde_json::from_str(
            r#"{"id":"a1","title":"Widget","type":"SERVICE","version":4,"archived":false}"#,
        )
        .unwrap();
        let update = ArticleUpdateRequest::from(article);
        assert_eq!(update.version, 4);
        assert_eq!(update.article_type, ArticleType::Service);
    }

    #[test]
    fn filter_emits_documented_names() {
        let filter = ArticleFilter {
            article_number: Some("LXW-1".to_string()),
            gtin: None,
            article_type: Some(ArticleType::Service),
        };
        assert_eq!(filter.to_query().encode(), "articleNumber=LXW-1&type=SERVICE");
    }
}
