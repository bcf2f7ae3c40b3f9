use crate::database::models::Product;

use super::types::{Column, Condition, FilterValue, Predicate};

pub struct FilterWhere {
    param_values: Vec<FilterValue>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Render a predicate as a parameterized WHERE body (`$n` placeholders
    /// numbered after `starting_param_index`). An empty predicate yields `1=1`.
    pub fn generate(predicate: &Predicate, starting_param_index: usize) -> (String, Vec<FilterValue>) {
        let mut filter_where = Self::new(starting_param_index);
        let mut sql_conditions: Vec<String> = predicate
            .conditions()
            .iter()
            .map(|condition| filter_where.build_sql_condition(condition))
            .collect();
        if predicate.is_unsatisfiable() {
            sql_conditions.push("1=0".to_string());
        }

        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        (where_clause, filter_where.param_values)
    }

    /// Evaluate a predicate against an in-memory row
    pub fn matches(predicate: &Predicate, product: &Product) -> bool {
        !predicate.is_unsatisfiable()
            && predicate
                .conditions()
                .iter()
                .all(|condition| Self::column_value(condition.column, product) == condition.value)
    }

    fn column_value(column: Column, product: &Product) -> FilterValue {
        match column {
            Column::StoreId => FilterValue::Uuid(product.store_id),
            Column::CategoryId => FilterValue::Uuid(product.category_id),
            Column::ColorId => FilterValue::Uuid(product.color_id),
            Column::SizeId => FilterValue::Uuid(product.size_id),
            Column::IsFeatured => FilterValue::Bool(product.is_featured),
            Column::IsArchived => FilterValue::Bool(product.is_archived),
        }
    }

    fn build_sql_condition(&mut self, condition: &Condition) -> String {
        format!("\"{}\" = {}", condition.column.to_sql(), self.param(condition.value))
    }

    fn param(&mut self, value: FilterValue) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewImage, NewProduct};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn product(store_id: Uuid, featured: bool, archived: bool) -> Product {
        NewProduct {
            store_id,
            name: "Mug".to_string(),
            price: Decimal::new(1200, 2),
            category_id: Uuid::new_v4(),
            color_id: Uuid::new_v4(),
            size_id: Uuid::new_v4(),
            is_featured: featured,
            is_archived: archived,
        }
        .into_rows(vec![NewImage { url: "https://cdn.example.com/mug.png".to_string() }])
        .0
    }

    #[test]
    fn empty_predicate_renders_tautology() {
        let (sql, params) = FilterWhere::generate(&Predicate::new(), 0);
        assert_eq!(sql, "1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn numbers_placeholders_after_offset() {
        let predicate = Predicate::new()
            .and_eq(Column::IsFeatured, FilterValue::Bool(true))
            .and_eq(Column::IsArchived, FilterValue::Bool(false));
        let (sql, params) = FilterWhere::generate(&predicate, 3);
        assert_eq!(sql, "\"is_featured\" = $4 AND \"is_archived\" = $5");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn matches_all_conditions() {
        let store = Uuid::new_v4();
        let row = product(store, true, false);
        let predicate = Predicate::new()
            .and_eq(Column::StoreId, FilterValue::Uuid(store))
            .and_eq(Column::IsArchived, FilterValue::Bool(false))
            .and_eq(Column::IsFeatured, FilterValue::Bool(true));

        assert!(FilterWhere::matches(&predicate, &row));
        assert!(!FilterWhere::matches(&predicate, &product(store, false, false)));
        assert!(!FilterWhere::matches(&predicate, &product(store, true, true)));
        assert!(!FilterWhere::matches(&predicate, &product(Uuid::new_v4(), true, false)));
    }

    #[test]
    fn unsatisfiable_predicate_matches_nothing() {
        let store = Uuid::new_v4();
        let predicate = Predicate::new().and_eq(Column::StoreId, FilterValue::Uuid(store)).and_never();

        let (sql, params) = FilterWhere::generate(&predicate, 0);
        assert_eq!(sql, "\"store_id\" = $1 AND 1=0");
        assert_eq!(params.len(), 1);
        assert!(!FilterWhere::matches(&predicate, &product(store, false, false)));
    }
}
