use serde::{Deserialize, Serialize};
use stockledger_core::CategoryId;
use stockledger_domain::{FieldPatch, Item, ItemUpdate};
use ts_rs::TS;

/// Incoming payload for item creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-item-request.ts"
)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub category_id: i64,
}

/// Incoming payload for item update; omitted fields stay untouched.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-item-request.ts"
)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub category_id: Option<i64>,
}

impl From<UpdateItemRequest> for ItemUpdate {
    fn from(value: UpdateItemRequest) -> Self {
        Self {
            name: FieldPatch::from_option(value.name),
            description: FieldPatch::from_option(value.description),
            quantity: FieldPatch::from_option(value.quantity),
            category_id: FieldPatch::from_option(value.category_id.map(CategoryId::new)),
        }
    }
}

/// API representation of an item.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/item-response.ts"
)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub category_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Item> for ItemResponse {
    fn from(value: Item) -> Self {
        Self {
            id: value.id().as_i64(),
            name: value.name().as_str().to_owned(),
            description: value.description().to_owned(),
            quantity: value.quantity(),
            category_id: value.category_id().as_i64(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}
