//! Selectable items and their string projection.
//!
//! A combobox candidate is either plain text or a structured value/label
//! pair. Entries synthesized from free text that matched no candidate carry
//! the `created` marker until the host confirms them; accepted entries are
//! normalized through a transform before joining the selection.

/// A selectable entry in a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A plain text value; projection and display are the text itself.
    Text(String),
    /// A structured entry with separate stored value and display label.
    Entry {
        /// The stored value.
        value: String,
        /// The display label.
        label: String,
        /// Marks an entry synthesized from free text, pending confirmation.
        created: bool,
    },
}

impl Item {
    /// Create a plain text item.
    pub fn text(text: impl Into<String>) -> Self {
        Item::Text(text.into())
    }

    /// Create a structured value/label entry.
    pub fn entry(value: impl Into<String>, label: impl Into<String>) -> Self {
        Item::Entry {
            value: value.into(),
            label: label.into(),
            created: false,
        }
    }

    /// Create an entry carrying the creation marker.
    pub fn created(value: impl Into<String>, label: impl Into<String>) -> Self {
        Item::Entry {
            value: value.into(),
            label: label.into(),
            created: true,
        }
    }

    /// Whether this item carries the creation marker.
    pub fn is_created(&self) -> bool {
        matches!(self, Item::Entry { created: true, .. })
    }

    /// Return the same item with the creation marker cleared.
    pub fn strip_created(self) -> Self {
        match self {
            Item::Entry { value, label, .. } => Item::Entry {
                value,
                label,
                created: false,
            },
            text => text,
        }
    }

    /// The stored value: the value field for entries, the text otherwise.
    pub fn value(&self) -> &str {
        match self {
            Item::Text(text) => text,
            Item::Entry { value, .. } => value,
        }
    }

    /// The display label: the label field for entries, the text otherwise.
    pub fn label(&self) -> &str {
        match self {
            Item::Text(text) => text,
            Item::Entry { label, .. } => label,
        }
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Item::text(text)
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Item::Text(text)
    }
}

/// Canonical string form of an item, used for comparison and display.
pub type Projection = Box<dyn Fn(&Item) -> String + Send>;

/// Default projection: the display label.
pub fn default_projection(item: &Item) -> String {
    item.label().to_string()
}

/// Normalization applied to an accepted created entry before it joins the
/// selection.
pub type NewItemTransform = Box<dyn Fn(Item) -> Item + Send>;

/// Default transform: collapse the entry to its raw value.
pub fn default_new_item_transform(item: Item) -> Item {
    Item::Text(item.value().to_string())
}
