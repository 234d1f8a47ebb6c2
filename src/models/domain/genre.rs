use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Genre {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Genre {
    pub fn new(name: &str, description: Option<String>) -> Self {
        Genre {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description,
        }
    }
}
