use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub website_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl Partner {
    pub fn new(name: &str, website_url: &str) -> Self {
        Partner {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            website_url: website_url.to_string(),
            logo_url: None,
        }
    }
}
