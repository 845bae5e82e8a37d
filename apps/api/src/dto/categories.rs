use serde::{Deserialize, Serialize};
use stockledger_domain::{Category, CategoryUpdate, FieldPatch};
use ts_rs::TS;

/// Incoming payload for category creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-category-request.ts"
)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Incoming payload for category update; omitted fields stay untouched.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-category-request.ts"
)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(value: UpdateCategoryRequest) -> Self {
        Self {
            name: FieldPatch::from_option(value.name),
            description: FieldPatch::from_option(value.description.map(Some)),
        }
    }
}

/// API representation of a category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/category-response.ts"
)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        Self {
            id: value.id().as_i64(),
            name: value.name().as_str().to_owned(),
            description: value.description().map(str::to_owned),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}
