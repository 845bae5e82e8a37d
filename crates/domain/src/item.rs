use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockledger_core::{AppError, AppResult, CategoryId, ItemId, NonEmptyString};

use crate::change::{ChangeSet, FieldPatch};

/// A tracked inventory item belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: NonEmptyString,
    description: String,
    quantity: i64,
    category_id: CategoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates an item with validated fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: i64,
        category_id: CategoryId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        validate_quantity(quantity)?;

        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: description.into(),
            quantity,
            category_id,
            created_at,
            updated_at,
        })
    }

    /// Validates a proposed stocked quantity.
    pub fn validate_quantity(quantity: i64) -> AppResult<()> {
        validate_quantity(quantity)
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the item description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the non-negative stocked quantity.
    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Returns the owning category identifier.
    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-mutation timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Compares supplied fields against current values and plans the update.
    ///
    /// Omitted fields are never evaluated. A changed quantity additionally
    /// yields the signed delta (`new - old`), which is kept out of the
    /// textual diff. Existence of a reassigned category is the caller's
    /// responsibility and is checked before this runs.
    pub fn plan_update(&self, update: &ItemUpdate) -> AppResult<ItemUpdatePlan> {
        let mut changes = ChangeSet::new();
        let mut quantity_delta = None;

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
                    self.description.as_str(),
                    new_description.as_str(),
                );
                new_description.clone()
            }
            None => self.description.clone(),
        };

        let quantity = match update.quantity.as_set() {
            Some(&new_quantity) => {
                validate_quantity(new_quantity)?;
                if new_quantity != self.quantity {
                    quantity_delta = Some(new_quantity - self.quantity);
                    changes.record("quantity", &self.quantity, &new_quantity);
                }
                new_quantity
            }
            None => self.quantity,
        };

        let category_id = match update.category_id.as_set() {
            Some(&new_category_id) => {
                changes.record("category_id", &self.category_id, &new_category_id);
                new_category_id
            }
            None => self.category_id,
        };

        Ok(ItemUpdatePlan {
            item: Self {
                id: self.id,
                name,
                description,
                quantity,
                category_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            changes,
            quantity_delta,
        })
    }
}

fn validate_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::Validation(format!(
            "quantity must not be negative, got {quantity}"
        )));
    }

    Ok(())
}

/// Supplied field values for an item update.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    /// New name, when supplied.
    pub name: FieldPatch<String>,
    /// New description, when supplied.
    pub description: FieldPatch<String>,
    /// New non-negative quantity, when supplied.
    pub quantity: FieldPatch<i64>,
    /// New owning category, when supplied.
    pub category_id: FieldPatch<CategoryId>,
}

/// Outcome of planning an item update.
#[derive(Debug, Clone)]
pub struct ItemUpdatePlan {
    item: Item,
    changes: ChangeSet,
    quantity_delta: Option<i64>,
}

impl ItemUpdatePlan {
    /// Returns the item as it should be persisted.
    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Returns the field-level diff.
    #[must_use]
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Returns the signed quantity delta, set only when quantity changed.
    #[must_use]
    pub fn quantity_delta(&self) -> Option<i64> {
        self.quantity_delta
    }

    /// Splits the plan into entity, diff, and quantity delta.
    #[must_use]
    pub fn into_parts(self) -> (Item, ChangeSet, Option<i64>) {
        (self.item, self.changes, self.quantity_delta)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;
    use stockledger_core::{CategoryId, ItemId};

    use super::{Item, ItemUpdate};
    use crate::change::FieldPatch;

    fn bolt() -> Item {
        let item = Item::new(
            ItemId::new(7),
            "Bolt",
            "M4 bolt",
            10,
            CategoryId::new(1),
            Utc::now(),
            Utc::now(),
        );
        match item {
            Ok(item) => item,
            Err(error) => panic!("item fixture failed: {error}"),
        }
    }

    #[test]
    fn rejects_negative_quantity_on_construction() {
        let result = Item::new(
            ItemId::new(1),
            "Bolt",
            "M4 bolt",
            -1,
            CategoryId::new(1),
            Utc::now(),
            Utc::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn quantity_update_yields_diff_and_delta() {
        let plan = bolt().plan_update(&ItemUpdate {
            quantity: FieldPatch::Set(15),
            ..ItemUpdate::default()
        });

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        assert_eq!(plan.changes().len(), 1);
        assert_eq!(plan.quantity_delta(), Some(5));
        assert_eq!(plan.item().quantity(), 15);
        assert_eq!(
            plan.changes().describe(),
            "The quantity was changed from '10' to '15'."
        );
    }

    #[test]
    fn shrinking_quantity_yields_negative_delta() {
        let plan = bolt().plan_update(&ItemUpdate {
            quantity: FieldPatch::Set(4),
            ..ItemUpdate::default()
        });

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        assert_eq!(plan.quantity_delta(), Some(-6));
    }

    #[test]
    fn description_only_update_leaves_other_fields_out_of_diff() {
        let plan = bolt().plan_update(&ItemUpdate {
            description: FieldPatch::Set("M4 hex bolt".to_owned()),
            ..ItemUpdate::default()
        });

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        let fields: Vec<&str> = plan.changes().iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["description"]);
        assert_eq!(plan.quantity_delta(), None);
    }

    #[test]
    fn unchanged_quantity_yields_no_delta() {
        let plan = bolt().plan_update(&ItemUpdate {
            quantity: FieldPatch::Set(10),
            ..ItemUpdate::default()
        });

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        assert!(plan.changes().is_empty());
        assert_eq!(plan.quantity_delta(), None);
    }

    #[test]
    fn category_reassignment_is_a_regular_field_change() {
        let plan = bolt().plan_update(&ItemUpdate {
            category_id: FieldPatch::Set(CategoryId::new(3)),
            ..ItemUpdate::default()
        });

        let Ok(plan) = plan else {
            panic!("plan_update failed");
        };
        assert_eq!(plan.item().category_id(), CategoryId::new(3));
        assert_eq!(plan.quantity_delta(), None);
        assert_eq!(
            plan.changes().describe(),
            "The category_id was changed from '1' to '3'."
        );
    }

    #[test]
    fn negative_proposed_quantity_is_rejected() {
        let plan = bolt().plan_update(&ItemUpdate {
            quantity: FieldPatch::Set(-5),
            ..ItemUpdate::default()
        });
        assert!(plan.is_err());
    }

    proptest! {
        #[test]
        fn quantity_delta_matches_difference(old in 0i64..1_000_000, new in 0i64..1_000_000) {
            let item = Item::new(
                ItemId::new(1),
                "Bolt",
                "M4 bolt",
                old,
                CategoryId::new(1),
                Utc::now(),
                Utc::now(),
            );
            prop_assert!(item.is_ok());
            let Ok(item) = item else { unreachable!() };

            let plan = item.plan_update(&ItemUpdate {
                quantity: FieldPatch::Set(new),
                ..ItemUpdate::default()
            });
            prop_assert!(plan.is_ok());
            let Ok(plan) = plan else { unreachable!() };

            if old == new {
                prop_assert!(plan.changes().is_empty());
                prop_assert_eq!(plan.quantity_delta(), None);
            } else {
                prop_assert_eq!(plan.changes().len(), 1);
                prop_assert_eq!(plan.quantity_delta(), Some(new - old));
            }
        }
    }
}
