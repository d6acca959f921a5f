//! Tenant-scoped query builder
//!
//! Every list/count query over tenant data goes through [`ScopedQuery`]. The
//! organization filter is added by the constructor and bound under a fixed
//! name; caller-supplied filters get generated parameter names (`$p0`,
//! `$p1`, ...), so nothing a caller adds can replace the tenant binding.
//! Field names are compile-time constants, never request input.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::repository::RepoResult;

/// Hard ceiling for any page size
pub const MAX_PAGE_SIZE: u32 = 100;

const TENANT_PARAM: &str = "organization_id";

#[derive(Debug, Clone)]
pub struct ScopedQuery {
    table: &'static str,
    projection: &'static str,
    conditions: Vec<String>,
    params: Vec<(String, Value)>,
    order: Option<(&'static str, bool)>,
    limit: Option<u32>,
    start: Option<u64>,
}

impl ScopedQuery {
    pub fn new(table: &'static str, organization_id: &str) -> Self {
        Self {
            table,
            projection: "*, record::id(id) AS id",
            conditions: vec![format!("organizationId = ${TENANT_PARAM}")],
            params: vec![(TENANT_PARAM.to_string(), Value::from(organization_id))],
            order: None,
            limit: None,
            start: None,
        }
    }

    fn bind_next(&mut self, value: Value) -> String {
        // params[0] is the tenant binding
        let name = format!("p{}", self.params.len() - 1);
        self.params.push((name.clone(), value));
        name
    }

    /// Replace the default `*` projection (aggregations over a few fields)
    pub fn select(mut self, projection: &'static str) -> Self {
        self.projection = projection;
        self
    }

    /// `field = value`; `None` adds nothing
    pub fn eq(mut self, field: &'static str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            let param = self.bind_next(value.into());
            self.conditions.push(format!("{field} = ${param}"));
        }
        self
    }

    /// Case-insensitive substring match OR-ed across `fields`; blank terms
    /// add nothing, missing fields count as empty strings
    pub fn search(mut self, fields: &[&'static str], term: Option<&str>) -> Self {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return self;
        };
        if fields.is_empty() {
            return self;
        }
        let param = self.bind_next(Value::from(term.to_lowercase()));
        let clauses: Vec<String> = fields
            .iter()
            .map(|f| format!("string::contains(string::lowercase({f} ?? ''), ${param})"))
            .collect();
        self.conditions.push(format!("({})", clauses.join(" OR ")));
        self
    }

    /// Inclusive bounds; either side may be open
    pub fn range(
        mut self,
        field: &'static str,
        from: Option<impl Into<Value>>,
        to: Option<impl Into<Value>>,
    ) -> Self {
        if let Some(from) = from {
            let param = self.bind_next(from.into());
            self.conditions.push(format!("{field} >= ${param}"));
        }
        if let Some(to) = to {
            let param = self.bind_next(to.into());
            self.conditions.push(format!("{field} <= ${param}"));
        }
        self
    }

    /// Strict `field < value`
    pub fn before(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        let param = self.bind_next(value.into());
        self.conditions.push(format!("{field} < ${param}"));
        self
    }

    pub fn order_by(mut self, field: &'static str, descending: bool) -> Self {
        self.order = Some((field, descending));
        self
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.limit = Some(page.limit);
        self.start = Some(page.offset());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.min(MAX_PAGE_SIZE));
        self
    }

    fn where_clause(&self) -> String {
        self.conditions.join(" AND ")
    }

    pub fn select_sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE {}",
            self.projection,
            self.table,
            self.where_clause()
        );
        if let Some((field, descending)) = self.order {
            sql.push_str(&format!(
                " ORDER BY {field} {}",
                if descending { "DESC" } else { "ASC" }
            ));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(start) = self.start.filter(|s| *s > 0) {
            sql.push_str(&format!(" START {start}"));
        }
        sql
    }

    pub fn count_sql(&self) -> String {
        format!(
            "SELECT count() AS total FROM {} WHERE {} GROUP ALL",
            self.table,
            self.where_clause()
        )
    }

    pub fn params(&self) -> &[(String, Value)] {
        &self.params
    }

    async fn run(&self, db: &Surreal<Db>, sql: String) -> RepoResult<surrealdb::Response> {
        let mut query = db.query(sql);
        for (name, value) in &self.params {
            query = query.bind((name.clone(), value.clone()));
        }
        Ok(query.await?.check()?)
    }

    pub async fn fetch<T: DeserializeOwned>(&self, db: &Surreal<Db>) -> RepoResult<Vec<T>> {
        let mut res = self.run(db, self.select_sql()).await?;
        Ok(res.take(0)?)
    }

    pub async fn count(&self, db: &Surreal<Db>) -> RepoResult<u64> {
        let mut res = self.run(db, self.count_sql()).await?;
        let row: Option<CountRow> = res.take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    /// One page of results plus the total across all pages
    pub async fn fetch_page<T: DeserializeOwned>(
        self,
        db: &Surreal<Db>,
        page: PageRequest,
    ) -> RepoResult<Paginated<T>> {
        let total = self.count(db).await?;
        let items = self.paginate(page).fetch(db).await?;
        Ok(Paginated::new(items, total, page))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub total: u64,
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Clamp raw query values: page >= 1, 1 <= limit <= [`MAX_PAGE_SIZE`]
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Page metadata as sent to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, page: PageRequest) -> Self {
        Self {
            items,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: total.div_ceil(u64::from(page.limit)),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_filter_always_present() {
        let q = ScopedQuery::new("member", "org-1");
        assert_eq!(
            q.select_sql(),
            "SELECT *, record::id(id) AS id FROM member WHERE organizationId = $organization_id"
        );
        assert_eq!(q.params()[0], ("organization_id".to_string(), Value::from("org-1")));
    }

    #[test]
    fn test_filters_use_generated_params() {
        let q = ScopedQuery::new("member", "org-1")
            .eq("subscription.status", Some("active"))
            .eq("phone", None::<&str>)
            .search(&["name", "phone"], Some("  Jan "))
            .order_by("createdAt", true)
            .paginate(PageRequest::new(Some(2), Some(10), 10));

        assert_eq!(
            q.select_sql(),
            "SELECT *, record::id(id) AS id FROM member WHERE organizationId = $organization_id \
             AND subscription.status = $p0 \
             AND (string::contains(string::lowercase(name ?? ''), $p1) OR string::contains(string::lowercase(phone ?? ''), $p1)) \
             ORDER BY createdAt DESC LIMIT 10 START 10"
        );
        let names: Vec<&str> = q.params().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["organization_id", "p0", "p1"]);
        assert_eq!(q.params()[2].1, Value::from("jan"));
    }

    #[test]
    fn test_blank_search_adds_nothing() {
        let q = ScopedQuery::new("lead", "org-1").search(&["name"], Some("   "));
        assert_eq!(q.params().len(), 1);
        assert!(!q.select_sql().contains("string::contains"));
    }

    #[test]
    fn test_range_and_count() {
        let q = ScopedQuery::new("attendance", "org-1").range(
            "date",
            Some("2025-01-01"),
            None::<&str>,
        );
        assert_eq!(
            q.count_sql(),
            "SELECT count() AS total FROM attendance WHERE organizationId = $organization_id \
             AND date >= $p0 GROUP ALL"
        );
    }

    #[test]
    fn test_before_is_strict() {
        let q = ScopedQuery::new("member", "org-1").before("subscription.endDate", "2025-03-01");
        assert!(q.select_sql().ends_with("AND subscription.endDate < $p0"));
    }

    #[test]
    fn test_custom_projection() {
        let q = ScopedQuery::new("payment", "org-1").select("amount, paymentDate");
        assert_eq!(
            q.select_sql(),
            "SELECT amount, paymentDate FROM payment WHERE organizationId = $organization_id"
        );
    }

    #[test]
    fn test_limit_is_capped() {
        let q = ScopedQuery::new("payment", "org-1").limit(500);
        assert!(q.select_sql().ends_with("LIMIT 100"));
    }

    #[test]
    fn test_page_request_clamps() {
        assert_eq!(PageRequest::new(None, None, 10), PageRequest { page: 1, limit: 10 });
        assert_eq!(PageRequest::new(Some(0), Some(0), 10), PageRequest { page: 1, limit: 1 });
        assert_eq!(PageRequest::new(Some(3), Some(1000), 20).limit, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(Some(3), Some(10), 10).offset(), 20);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PageRequest::new(Some(2), Some(10), 10);
        assert_eq!(Paginated::<u8>::new(vec![], 25, page).total_pages, 3);
        assert_eq!(Paginated::<u8>::new(vec![], 20, page).total_pages, 2);
        assert_eq!(Paginated::<u8>::new(vec![], 0, page).total_pages, 0);
    }
}
