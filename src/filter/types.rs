use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional list parameters as they arrive on the query string.
/// Every field is raw and unvalidated; `compile` turns it into a `Predicate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub is_featured: Option<String>,
}

impl FilterSpec {
    /// Read the known parameters from a raw query string. When a key repeats,
    /// the first value is kept. Unknown keys are ignored.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut spec = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "categoryId" => &mut spec.category_id,
                "colorId" => &mut spec.color_id,
                "sizeId" => &mut spec.size_id,
                "isFeatured" => &mut spec.is_featured,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        spec
    }
}

/// Product columns a predicate can constrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    StoreId,
    CategoryId,
    ColorId,
    SizeId,
    IsFeatured,
    IsArchived,
}

impl Column {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Column::StoreId => "store_id",
            Column::CategoryId => "category_id",
            Column::ColorId => "color_id",
            Column::SizeId => "size_id",
            Column::IsFeatured => "is_featured",
            Column::IsArchived => "is_archived",
        }
    }

    /// Name used on the wire (query string and JSON)
    pub fn field_name(&self) -> &'static str {
        match self {
            Column::StoreId => "storeId",
            Column::CategoryId => "categoryId",
            Column::ColorId => "colorId",
            Column::SizeId => "sizeId",
            Column::IsFeatured => "isFeatured",
            Column::IsArchived => "isArchived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue {
    Uuid(Uuid),
    Bool(bool),
}

/// Single equality constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub column: Column,
    pub value: FilterValue,
}

/// Conjunction of equality constraints, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    conditions: Vec<Condition>,
    unsatisfiable: bool,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and_eq(mut self, column: Column, value: FilterValue) -> Self {
        self.conditions.push(Condition { column, value });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Value constrained for `column`, if any
    pub fn get(&self, column: Column) -> Option<FilterValue> {
        self.conditions.iter().find(|c| c.column == column).map(|c| c.value)
    }

    /// Add a constraint no row can meet
    pub fn and_never(mut self) -> Self {
        self.unsatisfiable = true;
        self
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.unsatisfiable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Listing order. Rows with equal `created_at` fall back to insertion
/// sequence in the same direction so repeated reads are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub created_at: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self { created_at: SortDirection::Desc }
    }
}

/// Related entities to load onto each listed product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expand {
    pub images: bool,
    pub category: bool,
    pub color: bool,
    pub size: bool,
}

impl Expand {
    pub fn all() -> Self {
        Self { images: true, category: true, color: true, size: true }
    }

    pub fn none() -> Self {
        Self { images: false, category: false, color: false, size: false }
    }
}

impl Default for Expand {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<FilterValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_wins_for_repeated_keys() {
        let spec = FilterSpec::from_query(Some("categoryId=a&categoryId=b&isFeatured=true&page=2"));
        assert_eq!(spec.category_id.as_deref(), Some("a"));
        assert_eq!(spec.is_featured.as_deref(), Some("true"));
        assert_eq!(spec.color_id, None);
    }

    #[test]
    fn decodes_percent_escapes_and_empty_values() {
        let spec = FilterSpec::from_query(Some("colorId=&sizeId=x%2Dl"));
        assert_eq!(spec.color_id.as_deref(), Some(""));
        assert_eq!(spec.size_id.as_deref(), Some("x-l"));
        assert_eq!(FilterSpec::from_query(None), FilterSpec::default());
    }
}
