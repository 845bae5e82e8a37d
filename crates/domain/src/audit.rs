use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stockledger_core::AppError;

/// Mutating action recorded by one audit log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    /// A category was created.
    CreateCategory,
    /// A category was updated.
    UpdateCategory,
    /// A category was deleted.
    DeleteCategory,
    /// An item was created.
    CreateItem,
    /// An item was updated.
    UpdateItem,
    /// An item was deleted.
    DeleteItem,
}

impl LogAction {
    /// Returns a stable storage value for the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateCategory => "create_category",
            Self::UpdateCategory => "update_category",
            Self::DeleteCategory => "delete_category",
            Self::CreateItem => "create_item",
            Self::UpdateItem => "update_item",
            Self::DeleteItem => "delete_item",
        }
    }
}

impl Display for LogAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

impl FromStr for LogAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create_category" => Ok(Self::CreateCategory),
            "update_category" => Ok(Self::UpdateCategory),
            "delete_category" => Ok(Self::DeleteCategory),
            "create_item" => Ok(Self::CreateItem),
            "update_item" => Ok(Self::UpdateItem),
            "delete_item" => Ok(Self::DeleteItem),
            _ => Err(AppError::Validation(format!("unknown log action '{value}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::LogAction;

    #[test]
    fn storage_values_round_trip() {
        let actions = [
            LogAction::CreateCategory,
            LogAction::UpdateCategory,
            LogAction::DeleteCategory,
            LogAction::CreateItem,
            LogAction::UpdateItem,
            LogAction::DeleteItem,
        ];

        for action in actions {
            assert_eq!(LogAction::from_str(action.as_str()).ok(), Some(action));
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(LogAction::from_str("truncate_everything").is_err());
    }
}
