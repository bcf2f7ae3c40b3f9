use super::types::Sort;

pub struct FilterOrder;

impl FilterOrder {
    /// `seq` is the table's insertion sequence and breaks `created_at` ties
    pub fn generate(sort: &Sort) -> String {
        let direction = sort.created_at.to_sql();
        format!("ORDER BY \"created_at\" {}, \"seq\" {}", direction, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::SortDirection;

    #[test]
    fn default_sort_is_newest_first() {
        assert_eq!(FilterOrder::generate(&Sort::default()), "ORDER BY \"created_at\" DESC, \"seq\" DESC");
    }

    #[test]
    fn ascending_applies_to_tie_break() {
        let sort = Sort { created_at: SortDirection::Asc };
        assert_eq!(FilterOrder::generate(&sort), "ORDER BY \"created_at\" ASC, \"seq\" ASC");
    }
}
