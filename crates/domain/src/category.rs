use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockledger_core::{AppResult, CategoryId, NonEmptyString};

use crate::change::{ChangeSet, FieldPatch};

/// A grouping of inventory items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: NonEmptyString,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a category with validated fields.
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description,
            created_at,
        })
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the unique category name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the rich-text description, if one is set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Compares supplied fields against current values and plans the update.
    ///
    /// Omitted fields are never evaluated; supplied fields that equal the
    /// current value produce no change entry. The returned plan carries the
    /// entity as it should be persisted plus the field-level diff.
    pub fn plan_update(&self, update: &CategoryUpdate) -> AppResult<CategoryUpdatePlan> {
        let mut changes = ChangeSet::new();

        let name = match update.name.as_set() {
            Some(new_name) => {
                let new_name = NonEmptyString::new(new_name.clone())?;
                changes.record("name", self.name.as_str(), new_name.as_str());
                new_name
            }
            None => self.name.clone(),
        };

        let description = match update.description.as_set() {
            Some(new_description) => {
                changes.record(
                    "description",
                    self.description.as_deref().unwrap_or_default(),
                    new_description.as_deref().unwrap_or_default(),
                );
                new_description.clone()
            }
            None => self.description.clone(),
        };

        Ok(CategoryUpdatePlan {
            category: Self {
                id: self.id,
                name,
                description,
                created_at: self.created_at,
            },
            changes,
        })
    }
}

/// Supplied field values for a category update.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    /// New unique name, when supplied.
    pub name: FieldPatch<String>,
    /// New description, when supplied; `Set(None)` clears it.
    pub description: FieldPatch<Option<String>>,
}

/// Outcome of planning a category update.
#[derive(Debug, Clone)]
pub struct CategoryUpdatePlan {
    category: Category,
    changes: ChangeSet,
}

impl CategoryUpdatePlan {
    /// Returns the category as it should be persisted.
    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the field-level diff.
    #[must_use]
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Splits the plan into its entity and diff.
    #[must_use]
    pub fn into_parts(self) -> (Category, ChangeSet) {
        (self.category, self.changes)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use stockledger_core::CategoryId;

    use super::{Category, CategoryUpdate};
    use crate::change::FieldPatch;

    fn fasteners() -> Category {
        match Category::new(CategoryId::new(1), "Fasteners", None, Utc::now()) {
            Ok(category) => category,
            Err(error) => panic!("category fixture failed: {error}"),
        }
    }

    #[test]
    fn rejects_empty_name() {
        let result = Category::new(CategoryId::new(1), "  ", None, Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn identical_name_produces_empty_diff() {
        let category = fasteners();
        let plan = category.plan_update(&CategoryUpdate {
            name: FieldPatch::Set("Fasteners".to_owned()),
            description: FieldPatch::Omit,
        });

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        assert!(plan.changes().is_empty());
        assert_eq!(plan.changes().describe(), "");
    }

    #[test]
    fn rename_produces_single_change() {
        let category = fasteners();
        let plan = category.plan_update(&CategoryUpdate {
            name: FieldPatch::Set("Hardware".to_owned()),
            description: FieldPatch::Omit,
        });

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        assert_eq!(plan.changes().len(), 1);
        assert_eq!(plan.category().name().as_str(), "Hardware");
        assert_eq!(
            plan.changes().describe(),
            "The name was changed from 'Fasteners' to 'Hardware'."
        );
    }

    #[test]
    fn omitted_description_is_not_evaluated() {
        let category = fasteners();
        let plan = category.plan_update(&CategoryUpdate::default());

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        assert!(plan.changes().is_empty());
        assert_eq!(plan.category().description(), None);
    }

    #[test]
    fn setting_description_records_change_from_empty() {
        let category = fasteners();
        let plan = category.plan_update(&CategoryUpdate {
            name: FieldPatch::Omit,
            description: FieldPatch::Set(Some("<p>Nuts and bolts</p>".to_owned())),
        });

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        assert_eq!(
            plan.changes().describe(),
            "The description was changed from '' to '<p>Nuts and bolts</p>'."
        );
    }
}
