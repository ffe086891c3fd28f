//! Dynamic filter queries for the listing endpoints.
//!
//! A [`FilterQuery`] starts from a fixed `SELECT ... WHERE <base predicate>`
//! and appends one `AND <column> <op> $n` per supplied filter value. Column
//! names and operators are `&'static str` chosen by the caller; every value
//! goes through a bind parameter, so request input never reaches the SQL text.

use sqlx::postgres::{PgRow, Postgres};
use sqlx::{Encode, FromRow, PgPool, QueryBuilder, Type};

/// Builder for a parameterized `SELECT` with optional predicates.
///
/// The base statement must already contain a `WHERE` clause (use
/// `WHERE 1=1` when there is no natural base predicate).
///
/// ```
/// use comparebuddy_api::db::FilterQuery;
///
/// let mut query = FilterQuery::new("SELECT id FROM items WHERE 1=1");
/// query
///     .eq("category_id", Some(3))
///     .contains("brand", Some("acme"))
///     .eq::<String>("field", None)
///     .order_by("brand, price");
///
/// assert_eq!(
///     query.sql(),
///     "SELECT id FROM items WHERE 1=1 AND category_id = $1 AND brand ILIKE $2 ORDER BY brand, price"
/// );
/// ```
pub struct FilterQuery<'args> {
    builder: QueryBuilder<'args, Postgres>,
}

impl<'args> FilterQuery<'args> {
    /// Start a query from a base statement ending in a `WHERE` clause.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            builder: QueryBuilder::new(base),
        }
    }

    /// `AND column = value` when `value` is present.
    pub fn eq<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        self.compare(column, " = ", value)
    }

    /// `AND column >= value` when `value` is present.
    pub fn gte<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        self.compare(column, " >= ", value)
    }

    /// `AND column <= value` when `value` is present.
    pub fn lte<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        self.compare(column, " <= ", value)
    }

    /// `AND column <op> value` when `value` is present.
    fn compare<T>(&mut self, column: &'static str, op: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        if let Some(value) = value {
            self.builder
                .push(" AND ")
                .push(column)
                .push(op)
                .push_bind(value);
        }
        self
    }

    /// `AND column ILIKE '%value%'` when `value` is present.
    pub fn contains(&mut self, column: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(term) = value {
            self.builder
                .push(" AND ")
                .push(column)
                .push(" ILIKE ")
                .push_bind(contains_pattern(term));
        }
        self
    }

    /// `AND (c1 ILIKE '%term%' OR c2 ILIKE '%term%' ...)`.
    pub fn any_contains(&mut self, columns: &[&'static str], term: &str) -> &mut Self {
        if columns.is_empty() {
            return self;
        }
        let pattern = contains_pattern(term);
        self.builder.push(" AND (");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                self.builder.push(" OR ");
            }
            self.builder
                .push(*column)
                .push(" ILIKE ")
                .push_bind(pattern.clone());
        }
        self.builder.push(")");
        self
    }

    /// `AND column IN ($1, $2, ...)` with one placeholder per value.
    ///
    /// An empty list matches nothing.
    pub fn in_list<T, I>(&mut self, column: &'static str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            self.builder.push(" AND FALSE");
            return self;
        }

        self.builder.push(" AND ").push(column).push(" IN (");
        let mut list = self.builder.separated(", ");
        for value in values {
            list.push_bind(value);
        }
        list.push_unseparated(")");
        self
    }

    /// Append a fixed `ORDER BY` clause.
    pub fn order_by(&mut self, columns: &'static str) -> &mut Self {
        self.builder.push(" ORDER BY ").push(columns);
        self
    }

    /// Append a fixed row cap.
    pub fn limit(&mut self, rows: u32) -> &mut Self {
        self.builder.push(" LIMIT ").push(rows);
        self
    }

    /// The SQL text built so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    /// Execute and decode every row; any decode failure fails the query.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query or row decoding fails.
    pub async fn fetch_all<T>(mut self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.builder.build_query_as::<T>().fetch_all(pool).await
    }

    /// Execute and decode row by row, dropping rows that fail to decode.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query itself fails.
    pub async fn fetch_lenient<T>(mut self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        let rows = self.builder.build().fetch_all(pool).await?;

        Ok(rows
            .iter()
            .filter_map(|row| match T::from_row(row) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping row that failed to decode");
                    None
                }
            })
            .collect())
    }
}

/// Wrap a search term in `%...%`, escaping LIKE metacharacters so the term
/// matches literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "SELECT id FROM car_models m WHERE 1=1";

    #[test]
    fn test_no_filters_leaves_base_untouched() {
        let mut query = FilterQuery::new(BASE);
        query
            .eq::<i32>("m.brand_id", None)
            .eq::<String>("m.segment", None)
            .order_by("m.name");
        assert_eq!(query.sql(), format!("{BASE} ORDER BY m.name"));
    }

    #[test]
    fn test_filters_append_in_call_order() {
        let mut query = FilterQuery::new(BASE);
        query
            .eq("m.brand_id", Some(2))
            .eq::<String>("m.powertrain_type", None)
            .eq("m.body_type", Some("SUV".to_string()))
            .order_by("b.name, m.name");
        assert_eq!(
            query.sql(),
            format!("{BASE} AND m.brand_id = $1 AND m.body_type = $2 ORDER BY b.name, m.name")
        );
    }

    #[test]
    fn test_range_filters_and_limit() {
        let mut query = FilterQuery::new("SELECT v.id FROM car_variants v WHERE v.price_baht IS NOT NULL");
        query
            .gte("v.price_baht", Some(500_000_i64))
            .lte("v.price_baht", Some(1_500_000_i64))
            .gte::<i32>("v.range_km", None)
            .order_by("v.price_baht")
            .limit(50);
        assert_eq!(
            query.sql(),
            "SELECT v.id FROM car_variants v WHERE v.price_baht IS NOT NULL \
             AND v.price_baht >= $1 AND v.price_baht <= $2 ORDER BY v.price_baht LIMIT 50"
        );
    }

    #[test]
    fn test_each_comparison_operator() {
        let mut query = FilterQuery::new("SELECT 1 WHERE 1=1");
        query
            .eq("a", Some(1))
            .gte("b", Some(2.5_f64))
            .lte("c", Some("z"))
            .lte::<i32>("d", None);
        assert_eq!(query.sql(), "SELECT 1 WHERE 1=1 AND a = $1 AND b >= $2 AND c <= $3");
    }

    #[test]
    fn test_any_contains_binds_once_per_column() {
        let mut query = FilterQuery::new("SELECT 1 WHERE 1=1");
        query.any_contains(&["b.name", "m.name", "v.name"], "atto");
        assert_eq!(
            query.sql(),
            "SELECT 1 WHERE 1=1 AND (b.name ILIKE $1 OR m.name ILIKE $2 OR v.name ILIKE $3)"
        );
    }

    #[test]
    fn test_in_list_has_one_placeholder_per_value() {
        let mut query = FilterQuery::new("SELECT 1 WHERE 1=1");
        query.in_list("v.id", [1, 3, 6]);
        assert_eq!(query.sql(), "SELECT 1 WHERE 1=1 AND v.id IN ($1, $2, $3)");
    }

    #[test]
    fn test_in_list_empty_matches_nothing() {
        let mut query = FilterQuery::new("SELECT 1 WHERE 1=1");
        query.in_list::<i32, _>("v.id", []);
        assert_eq!(query.sql(), "SELECT 1 WHERE 1=1 AND FALSE");
    }

    #[test]
    fn test_values_never_reach_sql_text() {
        let hostile = "x' OR '1'='1";
        let mut query = FilterQuery::new("SELECT 1 WHERE 1=1");
        query.contains("brand", Some(hostile)).eq("field", Some(hostile));
        assert!(!query.sql().contains(hostile));
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("atto"), "%atto%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
    }
}
