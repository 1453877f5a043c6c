//! Query-string builder following PostgREST conventions.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Accumulated query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column selection, including embedded resources.
    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns)
    }

    /// `column = value`.
    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.param(column, format!("eq.{}", value.to_string()))
    }

    /// `column <> value`.
    pub fn neq(self, column: &str, value: impl ToString) -> Self {
        self.param(column, format!("neq.{}", value.to_string()))
    }

    /// Case-insensitive substring match on any of the given columns.
    pub fn ilike_any(self, columns: &[&str], term: &str) -> Self {
        let pattern = quote_value(&format!("*{term}*"));
        let conditions: Vec<String> = columns
            .iter()
            .map(|column| format!("{column}.ilike.{pattern}"))
            .collect();
        self.param("or", format!("({})", conditions.join(",")))
    }

    /// Sort by a column.
    pub fn order(self, column: &str, order: Order) -> Self {
        let dir = match order {
            Order::Asc => "asc",
            Order::Desc => "desc",
        };
        self.param("order", format!("{column}.{dir}"))
    }

    /// Row window.
    pub fn range(self, offset: u64, limit: u64) -> Self {
        self.param("limit", limit.to_string())
            .param("offset", offset.to_string())
    }

    /// Conflict target for upserts.
    pub fn on_conflict(self, columns: &str) -> Self {
        self.param("on_conflict", columns)
    }

    /// Key/value pairs ready for `reqwest::RequestBuilder::query`.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }
}

/// Quote a value for use inside a logic tree when it holds reserved
/// characters.
fn quote_value(value: &str) -> String {
    if value.contains([',', '.', ':', '(', ')', '"', '\\']) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Parse the total out of a `Content-Range` header such as `0-9/42`.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}
