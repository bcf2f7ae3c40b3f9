use sqlx::{self, postgres::{PgArguments, PgRow}, FromRow, PgExecutor};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, FilterValue, Predicate, Sort};

/// Typed SELECT over one table driven by a compiled `Predicate`
pub struct QueryBuilder<T> {
    filter: Filter,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        let filter = Filter::new(table_name).map_err(|e| DatabaseError::QueryError(e.to_string()))?;
        Ok(Self {
            filter,
            _phantom: std::marker::PhantomData,
        })
    }

    pub fn select(mut self, columns: &[&'static str]) -> Self {
        self.filter = self.filter.select(columns);
        self
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.filter = self.filter.predicate(predicate);
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.filter = self.filter.order(sort);
        self
    }

    pub async fn select_all<'e, E>(self, executor: E) -> Result<Vec<T>, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let sql_result = self.filter.to_sql();
        tracing::debug!(query = %sql_result.query, params = sql_result.params.len(), "select");

        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(executor).await?;
        Ok(rows)
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &FilterValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match *v {
        FilterValue::Uuid(id) => q.bind(id),
        FilterValue::Bool(b) => q.bind(b),
    }
}
