use std::fmt::Display;

/// A proposed value for one updatable field.
///
/// `Omit` means the caller did not supply the field at all; the current value
/// stays untouched and the field is never evaluated for a diff. This is
/// distinct from supplying the current value, which is evaluated and produces
/// no diff entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldPatch<T> {
    /// Field was not supplied by the caller.
    #[default]
    Omit,
    /// Field was supplied with this value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Converts an optional value where `None` means "not supplied".
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Omit,
        }
    }

    /// Returns the supplied value, if any.
    #[must_use]
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Omit => None,
        }
    }
}

/// Old and new rendered values for one changed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Value before the update.
    pub old: String,
    /// Value after the update.
    pub new: String,
}

/// Insertion-ordered collection of field-level changes for one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: Vec<(String, FieldChange)>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change for `field` when `old` and `new` differ.
    ///
    /// Equal values leave the set untouched, so callers can feed every
    /// supplied field through without filtering first.
    pub fn record<T>(&mut self, field: &str, old: &T, new: &T)
    where
        T: PartialEq + Display + ?Sized,
    {
        if old != new {
            self.entries.push((
                field.to_owned(),
                FieldChange {
                    old: old.to_string(),
                    new: new.to_string(),
                },
            ));
        }
    }

    /// Appends an entry without comparing values.
    pub fn push(&mut self, field: impl Into<String>, change: FieldChange) {
        self.entries.push((field.into(), change));
    }

    /// Returns true when no field changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of changed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldChange)> {
        self.entries
            .iter()
            .map(|(field, change)| (field.as_str(), change))
    }

    /// Renders the change set as one human-readable sentence per field.
    ///
    /// Entries added through [`ChangeSet::record`] always differ, but entries
    /// pushed directly may not, so the unchanged wording stays reachable.
    #[must_use]
    pub fn describe(&self) -> String {
        let sentences: Vec<String> = self
            .entries
            .iter()
            .map(|(field, change)| {
                if change.old == change.new {
                    format!("The {} remained unchanged at '{}'.", field, change.old)
                } else {
                    format!(
                        "The {} was changed from '{}' to '{}'.",
                        field, change.old, change.new
                    )
                }
            })
            .collect();

        sentences.join(" ")
    }
}
