/// A fixed catalog entry. The catalog is consumed for selection and
/// display only; the store validates just the non-emptiness of whatever
/// category string a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Category {
    pub(crate) id: &'static str,
    pub(crate) label: &'static str,
}

pub(crate) const CATEGORIES: &[Category] = &[
    Category { id: "food", label: "Food & Drink" },
    Category { id: "groceries", label: "Groceries" },
    Category { id: "transport", label: "Transport" },
    Category { id: "housing", label: "Housing" },
    Category { id: "utilities", label: "Utilities" },
    Category { id: "health", label: "Health" },
    Category { id: "shopping", label: "Shopping" },
    Category { id: "entertainment", label: "Entertainment" },
    Category { id: "education", label: "Education" },
    Category { id: "travel", label: "Travel" },
    Category { id: "subscriptions", label: "Subscriptions" },
    Category { id: "other", label: "Other" },
];

impl Category {
    pub(crate) fn all() -> &'static [Category] {
        CATEGORIES
    }

    /// Find a catalog entry by id.
    pub(crate) fn find(id: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.id == id)
    }

    /// Display label for a category id; ids outside the catalog fall back
    /// to the raw string.
    pub(crate) fn label_for(id: &str) -> &str {
        Self::find(id).map(|c| c.label).unwrap_or(id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
