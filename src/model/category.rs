use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// Body of POST/PUT /categories.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: Option<String>,
}

/// Category fields after validation; the only shape the store accepts.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
}
