//! Query parameters shared by every collection listing.
//!
//! The GeoNode v2 API paginates with `page`/`page_size`, searches with
//! `search`, orders with `sort_by` and filters with `filter{field}=value`
//! where `field` may be a dotted path into a nested object
//! (e.g. `owner.username`).

/// Parameters for a list call. One page per call; the client never
/// auto-paginates.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    /// Equality filters as (field, value) pairs.
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Renders the parameters as query pairs in the API's convention.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page_size) = self.page_size {
            query.push(("page_size".to_string(), page_size.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        for (field, value) in &self.filters {
            query.push((format!("filter{{{field}}}"), value.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(ordering) = &self.ordering {
            query.push(("sort_by".to_string(), ordering.clone()));
        }
        query
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.page_size.is_none()
            && self.search.is_none()
            && self.ordering.is_none()
            && self.filters.is_empty()
    }
}
