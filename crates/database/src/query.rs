//! Dynamic filter-query construction for the employee listing endpoint.
//!
//! Raw query-string pairs are first normalized into a typed [`UserFilters`] +
//! [`Page`] pair; anything unparseable aborts there with an error naming the
//! offending field. [`build_user_query`] then produces the count and page
//! statements with an ordered parameter list. The same filters always yield
//! the same query text and parameter order.

use chrono::NaiveDate;

use crate::types::errors::{DirectoryError, DirectoryResult};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

const USER_COLUMNS: &str = "id, first_name, last_name, gender, location, email, phone, department, role, salary, join_date, years_of_experience, created_at, updated_at";

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    Date(NaiveDate),
}

/// Optional filters for the employee listing. All fields are independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilters {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Vec<String>,
    pub location: Vec<String>,
    pub department: Vec<String>,
    pub role: Vec<String>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub join_date_from: Option<NaiveDate>,
    pub join_date_to: Option<NaiveDate>,
    pub experience_from: Option<i64>,
    pub experience_to: Option<i64>,
}

/// 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A built listing query: count + page statements over one parameter list.
/// The page statement binds `params` first, then limit, then offset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub count_sql: String,
    pub page_sql: String,
    pub params: Vec<SqlParam>,
    pub limit: i64,
    pub offset: i64,
}

impl UserFilters {
    /// Parse raw query pairs into filters and pagination.
    ///
    /// Multi-value fields accept the repeated `field[]` key form or a single
    /// comma-separated `field` value; the array form wins when both appear.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> DirectoryResult<(Self, Page)> {
        let page = Page {
            page: parse_page_value(single(pairs, "page"), "page")?,
            limit: parse_page_value(single(pairs, "limit"), "limit")?,
        };

        let filters = UserFilters {
            first_name: non_empty(single(pairs, "first_name")),
            last_name: non_empty(single(pairs, "last_name")),
            email: non_empty(single(pairs, "email")),
            phone: non_empty(single(pairs, "phone")),
            gender: multi_values(pairs, "gender"),
            location: multi_values(pairs, "location"),
            department: multi_values(pairs, "department"),
            role: multi_values(pairs, "role"),
            salary_from: parse_int_filter(single(pairs, "salary_from"), "salary_from")?,
            salary_to: parse_int_filter(single(pairs, "salary_to"), "salary_to")?,
            join_date_from: parse_date_filter(single(pairs, "join_date_from"), "join_date_from")?,
            join_date_to: parse_date_filter(single(pairs, "join_date_to"), "join_date_to")?,
            experience_from: parse_int_filter(
                single(pairs, "years_of_experience_from"),
                "years_of_experience_from",
            )?,
            experience_to: parse_int_filter(
                single(pairs, "years_of_experience_to"),
                "years_of_experience_to",
            )?,
        };

        Ok((filters, page))
    }
}

fn single<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn multi_values(pairs: &[(String, String)], key: &str) -> Vec<String> {
    let array_key = format!("{key}[]");
    let from_array: Vec<String> = pairs
        .iter()
        .filter(|(name, _)| *name == array_key)
        .map(|(_, value)| value.clone())
        .collect();

    if !from_array.is_empty() {
        return from_array;
    }

    match single(pairs, key) {
        Some(value) if !value.is_empty() => value.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn parse_page_value(value: Option<&str>, field: &'static str) -> DirectoryResult<i64> {
    let default = match field {
        "page" => DEFAULT_PAGE,
        _ => DEFAULT_LIMIT,
    };
    match value {
        None => Ok(default),
        Some("") => Ok(default),
        Some(raw) => match raw.parse::<i64>() {
            Ok(parsed) if parsed >= 1 => Ok(parsed),
            _ => Err(DirectoryError::validation(
                field,
                "must be a positive integer",
            )),
        },
    }
}

fn parse_int_filter(value: Option<&str>, field: &'static str) -> DirectoryResult<Option<i64>> {
    match value {
        None => Ok(None),
        Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| DirectoryError::validation(field, "must be an integer")),
    }
}

fn parse_date_filter(
    value: Option<&str>,
    field: &'static str,
) -> DirectoryResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some("") => Ok(None),
        Some(raw) => parse_strict_date(raw, field).map(Some),
    }
}

/// Strict `YYYY-MM-DD` date parse. chrono's `%m`/`%d` accept unpadded digits,
/// so the full 10-character form is required up front.
pub fn parse_strict_date(raw: &str, field: &'static str) -> DirectoryResult<NaiveDate> {
    if raw.len() != 10 {
        return Err(DirectoryError::validation(
            field,
            "expected format YYYY-MM-DD",
        ));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DirectoryError::validation(field, "expected format YYYY-MM-DD"))
}

#[derive(Default)]
struct PredicateList {
    fragments: Vec<String>,
    params: Vec<SqlParam>,
}

impl PredicateList {
    fn next_index(&self) -> usize {
        self.params.len() + 1
    }

    /// Case-insensitive substring match, value wrapped in wildcards.
    fn contains(&mut self, column: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.fragments
                .push(format!("{column} ILIKE ${}", self.next_index()));
            self.params.push(SqlParam::Text(format!("%{value}%")));
        }
    }

    /// Set membership with one placeholder per value.
    fn any_of(&mut self, column: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }
        let mut placeholders = Vec::with_capacity(values.len());
        for value in values {
            placeholders.push(format!("${}", self.next_index()));
            self.params.push(SqlParam::Text(value.clone()));
        }
        self.fragments
            .push(format!("{column} IN ({})", placeholders.join(",")));
    }

    fn compare(&mut self, column: &str, op: &str, param: SqlParam) {
        self.fragments
            .push(format!("{column} {op} ${}", self.next_index()));
        self.params.push(param);
    }

    fn where_clause(&self) -> String {
        if self.fragments.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.fragments.join(" AND "))
        }
    }
}

/// Build the count and page queries for a filtered employee listing.
///
/// Predicates are appended in a fixed order so that identical filters always
/// produce identical SQL and parameter ordering. Rows are always ordered by
/// id ascending; no other sort is supported.
pub fn build_user_query(filters: &UserFilters, page: Page) -> FilterQuery {
    let mut predicates = PredicateList::default();

    predicates.contains("first_name", filters.first_name.as_deref());
    predicates.contains("last_name", filters.last_name.as_deref());
    predicates.any_of("gender", &filters.gender);
    predicates.any_of("location", &filters.location);
    predicates.contains("email", filters.email.as_deref());
    predicates.contains("phone", filters.phone.as_deref());
    predicates.any_of("department", &filters.department);
    predicates.any_of("role", &filters.role);
    if let Some(value) = filters.salary_from {
        predicates.compare("salary", ">=", SqlParam::Int(value));
    }
    if let Some(value) = filters.salary_to {
        predicates.compare("salary", "<=", SqlParam::Int(value));
    }
    if let Some(date) = filters.join_date_from {
        predicates.compare("join_date", ">=", SqlParam::Date(date));
    }
    if let Some(date) = filters.join_date_to {
        predicates.compare("join_date", "<=", SqlParam::Date(date));
    }
    if let Some(value) = filters.experience_from {
        predicates.compare("years_of_experience", ">=", SqlParam::Int(value));
    }
    if let Some(value) = filters.experience_to {
        predicates.compare("years_of_experience", "<=", SqlParam::Int(value));
    }

    let where_clause = predicates.where_clause();
    let limit_index = predicates.params.len() + 1;

    FilterQuery {
        count_sql: format!("SELECT COUNT(*) FROM users{where_clause}"),
        page_sql: format!(
            "SELECT {USER_COLUMNS} FROM users{where_clause} ORDER BY id LIMIT ${limit_index} OFFSET ${}",
            limit_index + 1
        ),
        params: predicates.params,
        limit: page.limit,
        offset: page.offset(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn no_filters_produce_no_where_clause() {
        let query = build_user_query(&UserFilters::default(), Page::default());

        assert_eq!(query.count_sql, "SELECT COUNT(*) FROM users");
        assert!(query.page_sql.ends_with("FROM users ORDER BY id LIMIT $1 OFFSET $2"));
        assert!(query.params.is_empty());
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn scalar_filters_use_wildcarded_ilike() {
        let filters = UserFilters {
            first_name: Some("ann".to_string()),
            ..Default::default()
        };

        let query = build_user_query(&filters, Page::default());

        assert_eq!(query.count_sql, "SELECT COUNT(*) FROM users WHERE first_name ILIKE $1");
        assert_eq!(query.params, vec![SqlParam::Text("%ann%".to_string())]);
    }

    #[test]
    fn multi_value_filters_get_one_placeholder_per_value() {
        let filters = UserFilters {
            gender: vec!["male".to_string(), "female".to_string()],
            department: vec!["Engineering".to_string()],
            ..Default::default()
        };

        let query = build_user_query(&filters, Page::default());

        assert_eq!(
            query.count_sql,
            "SELECT COUNT(*) FROM users WHERE gender IN ($1,$2) AND department IN ($3)"
        );
        assert_eq!(
            query.params,
            vec![
                SqlParam::Text("male".to_string()),
                SqlParam::Text("female".to_string()),
                SqlParam::Text("Engineering".to_string()),
            ]
        );
    }

    #[test]
    fn salary_range_emits_two_ordered_fragments() {
        let filters = UserFilters {
            salary_from: Some(50_000),
            salary_to: Some(100_000),
            ..Default::default()
        };

        let query = build_user_query(&filters, Page::default());

        assert_eq!(
            query.count_sql,
            "SELECT COUNT(*) FROM users WHERE salary >= $1 AND salary <= $2"
        );
        assert_eq!(
            query.params,
            vec![SqlParam::Int(50_000), SqlParam::Int(100_000)]
        );
    }

    #[test]
    fn fragments_follow_the_fixed_field_order() {
        let filters = UserFilters {
            first_name: Some("a".to_string()),
            email: Some("b".to_string()),
            gender: vec!["male".to_string()],
            salary_from: Some(1),
            experience_to: Some(9),
            join_date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };

        let query = build_user_query(&filters, Page::default());

        assert_eq!(
            query.count_sql,
            "SELECT COUNT(*) FROM users WHERE first_name ILIKE $1 AND gender IN ($2) \
             AND email ILIKE $3 AND salary >= $4 AND join_date >= $5 \
             AND years_of_experience <= $6"
        );
    }

    #[test]
    fn pagination_binds_limit_then_offset_after_the_filters() {
        let filters = UserFilters {
            location: vec!["Berlin".to_string()],
            ..Default::default()
        };
        let page = Page { page: 2, limit: 10 };

        let query = build_user_query(&filters, page);

        assert!(query.page_sql.ends_with("ORDER BY id LIMIT $2 OFFSET $3"));
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 10);
    }

    #[test]
    fn identical_filters_build_identical_queries() {
        let filters = UserFilters {
            last_name: Some("smith".to_string()),
            role: vec!["Manager".to_string(), "Lead".to_string()],
            salary_to: Some(90_000),
            ..Default::default()
        };
        let page = Page { page: 3, limit: 25 };

        let first = build_user_query(&filters, page);
        let second = build_user_query(&filters, page);

        assert_eq!(first, second);
    }

    #[test]
    fn query_pairs_parse_scalars_and_defaults() {
        let (filters, page) =
            UserFilters::from_query_pairs(&pairs(&[("first_name", "ann"), ("email", "ex.com")]))
                .unwrap();

        assert_eq!(filters.first_name.as_deref(), Some("ann"));
        assert_eq!(filters.email.as_deref(), Some("ex.com"));
        assert!(filters.last_name.is_none());
        assert_eq!(page, Page { page: 1, limit: 10 });
    }

    #[test]
    fn empty_scalar_values_contribute_no_filter() {
        let (filters, _) =
            UserFilters::from_query_pairs(&pairs(&[("first_name", ""), ("phone", "")])).unwrap();

        assert_eq!(filters, UserFilters::default());
    }

    #[test]
    fn array_form_collects_repeated_keys() {
        let (filters, _) = UserFilters::from_query_pairs(&pairs(&[
            ("gender[]", "male"),
            ("gender[]", "female"),
        ]))
        .unwrap();

        assert_eq!(filters.gender, vec!["male", "female"]);
    }

    #[test]
    fn comma_form_splits_a_single_value() {
        let (filters, _) =
            UserFilters::from_query_pairs(&pairs(&[("location", "Berlin,Munich")])).unwrap();

        assert_eq!(filters.location, vec!["Berlin", "Munich"]);
    }

    #[test]
    fn array_form_wins_over_comma_form() {
        let (filters, _) = UserFilters::from_query_pairs(&pairs(&[
            ("role[]", "Manager"),
            ("role", "Lead,Intern"),
        ]))
        .unwrap();

        assert_eq!(filters.role, vec!["Manager"]);
    }

    #[test]
    fn invalid_month_is_rejected_naming_the_field() {
        let error =
            UserFilters::from_query_pairs(&pairs(&[("join_date_from", "2024-13-01")])).unwrap_err();

        assert_eq!(
            error,
            DirectoryError::validation("join_date_from", "expected format YYYY-MM-DD")
        );
    }

    #[test]
    fn unpadded_dates_are_rejected() {
        let error =
            UserFilters::from_query_pairs(&pairs(&[("join_date_to", "2024-1-1")])).unwrap_err();

        assert_eq!(
            error,
            DirectoryError::validation("join_date_to", "expected format YYYY-MM-DD")
        );
    }

    #[test]
    fn valid_dates_parse() {
        let (filters, _) = UserFilters::from_query_pairs(&pairs(&[
            ("join_date_from", "2023-02-28"),
            ("join_date_to", "2024-02-29"),
        ]))
        .unwrap();

        assert_eq!(filters.join_date_from, NaiveDate::from_ymd_opt(2023, 2, 28));
        assert_eq!(filters.join_date_to, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn non_numeric_range_values_are_rejected_naming_the_field() {
        let error =
            UserFilters::from_query_pairs(&pairs(&[("salary_from", "lots")])).unwrap_err();
        assert_eq!(
            error,
            DirectoryError::validation("salary_from", "must be an integer")
        );

        let error = UserFilters::from_query_pairs(&pairs(&[("years_of_experience_to", "3.5")]))
            .unwrap_err();
        assert_eq!(
            error,
            DirectoryError::validation("years_of_experience_to", "must be an integer")
        );
    }

    #[test]
    fn invalid_pagination_is_rejected() {
        let error = UserFilters::from_query_pairs(&pairs(&[("page", "0")])).unwrap_err();
        assert_eq!(
            error,
            DirectoryError::validation("page", "must be a positive integer")
        );

        let error = UserFilters::from_query_pairs(&pairs(&[("limit", "ten")])).unwrap_err();
        assert_eq!(
            error,
            DirectoryError::validation("limit", "must be a positive integer")
        );
    }

    #[test]
    fn explicit_pagination_is_honoured() {
        let (_, page) =
            UserFilters::from_query_pairs(&pairs(&[("page", "4"), ("limit", "25")])).unwrap();

        assert_eq!(page, Page { page: 4, limit: 25 });
        assert_eq!(page.offset(), 75);
    }
}
