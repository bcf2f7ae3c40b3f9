use uuid::Uuid;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{Column, FilterSpec, FilterValue, Predicate, Sort, SqlResult};

/// Compile list parameters into a predicate.
///
/// The result always constrains `store_id` and `is_archived = false`. Id
/// parameters add an equality only when present and non-empty; an id that is
/// not a UUID can match no row, so it makes the whole predicate unsatisfiable.
/// `isFeatured` adds `is_featured = true` only for the exact string `"true"`;
/// any other value, `"false"` included, adds nothing.
pub fn compile(store_id: Uuid, spec: &FilterSpec) -> Predicate {
    let mut predicate = Predicate::new()
        .and_eq(Column::StoreId, FilterValue::Uuid(store_id))
        .and_eq(Column::IsArchived, FilterValue::Bool(false));

    for (column, raw) in [
        (Column::CategoryId, &spec.category_id),
        (Column::ColorId, &spec.color_id),
        (Column::SizeId, &spec.size_id),
    ] {
        let Some(raw) = present(raw) else { continue };
        match Uuid::parse_str(raw) {
            Ok(id) => predicate = predicate.and_eq(column, FilterValue::Uuid(id)),
            Err(_) => {
                tracing::debug!(field = column.field_name(), value = raw, "filter id is not a UUID");
                predicate = predicate.and_never();
            }
        }
    }

    // "false" is not a filter: non-featured products cannot be selected alone
    if present(&spec.is_featured) == Some("true") {
        predicate = predicate.and_eq(Column::IsFeatured, FilterValue::Bool(true));
    }

    predicate
}

fn present(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|s| !s.is_empty())
}

/// SELECT builder over a single table
pub struct Filter {
    table_name: String,
    select_columns: Vec<&'static str>,
    predicate: Predicate,
    sort: Option<Sort>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        Self::validate_table_name(&table_name)?;
        Ok(Self {
            table_name,
            select_columns: vec![],
            predicate: Predicate::new(),
            sort: None,
        })
    }

    pub fn select(mut self, columns: &[&'static str]) -> Self {
        self.select_columns = columns.to_vec();
        self
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.predicate, 0);
        let order_clause = self.sort.map(|s| FilterOrder::generate(&s)).unwrap_or_default();

        let query = [
            format!("SELECT {}", self.build_select_clause()),
            format!("FROM \"{}\"", self.table_name),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            order_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    fn validate_table_name(name: &str) -> Result<(), FilterError> {
        let mut chars = name.chars();
        let valid_start = chars.next().map_or(false, |c| c.is_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidTableName(name.to_string()));
        }
        Ok(())
    }

    fn build_select_clause(&self) -> String {
        if self.select_columns.is_empty() {
            "*".to_string()
        } else {
            self.select_columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
        }
    }
}
