//! Page requests and paged results.

use serde::{Deserialize, Serialize};

use dispatch_core::{DomainError, DomainResult};

/// 1-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> DomainResult<Self> {
        let req = Self { page, page_size };
        req.validate()?;
        Ok(req)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.page < 1 {
            return Err(DomainError::validation("page", "must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(DomainError::validation("pageSize", "must be positive"));
        }
        Ok(())
    }

    /// Number of items before this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            page_size: self.page_size,
        }
    }
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(page_size as u64)).unwrap_or(u32::MAX)
}

/// One page of a filtered listing.
///
/// Some endpoints omit `totalPages`, `hasPrevPage` and `hasNextPage`; the
/// accessors derive them from `page`, `pageSize` and `total` in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_pages: Option<u32>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_prev_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_next_page: Option<bool>,
}

impl<T> Page<T> {
    /// Build a page from items already cut to `req`, filling the derived fields.
    pub fn from_parts(items: Vec<T>, req: PageRequest, total: u64) -> Self {
        let pages = total_pages(total, req.page_size);
        Self {
            page: req.page,
            page_size: req.page_size,
            total,
            total_pages: Some(pages),
            items,
            has_prev_page: Some(req.page > 1),
            has_next_page: Some(req.page < pages),
        }
    }

    pub fn empty(req: PageRequest) -> Self {
        Self::from_parts(Vec::new(), req, 0)
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
            .unwrap_or_else(|| total_pages(self.total, self.page_size))
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
            .unwrap_or_else(|| self.page < self.total_pages())
    }

    pub fn has_prev_page(&self) -> bool {
        self.has_prev_page.unwrap_or(self.page > 1)
    }

    pub fn request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Check the paging guarantees on a server response.
    pub fn check_invariants(&self) -> DomainResult<()> {
        let len = self.items.len();
        if len > self.page_size as usize {
            return Err(DomainError::invariant(format!(
                "page holds {len} items but pageSize is {}",
                self.page_size
            )));
        }
        if (len as u64) > self.total {
            return Err(DomainError::invariant(format!(
                "page holds {len} items but total is {}",
                self.total
            )));
        }
        if self.has_next_page() != (self.page < self.total_pages()) {
            return Err(DomainError::invariant(format!(
                "hasNextPage disagrees with page {} of {}",
                self.page,
                self.total_pages()
            )));
        }
        Ok(())
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
            has_prev_page: self.has_prev_page,
            has_next_page: self.has_next_page,
        }
    }
}

impl<T: Clone> Page<T> {
    /// Cut the requested page out of a complete filtered listing.
    pub fn slice(all: &[T], req: PageRequest) -> Self {
        let items = all
            .iter()
            .skip(req.offset())
            .take(req.page_size as usize)
            .cloned()
            .collect();
        Self::from_parts(items, req, all.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_invalid_requests() {
        assert_eq!(
            PageRequest::new(0, 10).unwrap_err().field(),
            Some("page")
        );
        assert_eq!(
            PageRequest::new(1, 0).unwrap_err().field(),
            Some("pageSize")
        );
    }

    #[test]
    fn twenty_five_items_in_pages_of_ten() {
        let all: Vec<u32> = (0..25).collect();
        let first = Page::slice(&all, PageRequest::new(1, 10).unwrap());
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages(), 3);
        assert!(first.has_next_page());
        assert!(!first.has_prev_page());

        let last = Page::slice(&all, PageRequest::new(3, 10).unwrap());
        assert_eq!(last.items, vec![20, 21, 22, 23, 24]);
        assert!(!last.has_next_page());
        assert!(last.has_prev_page());
    }

    #[test]
    fn derives_missing_fields_from_totals() {
        let json = r#"{"items":[1,2],"total":12,"page":2,"pageSize":5}"#;
        let page: Page<u8> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next_page());
        assert!(page.has_prev_page());
        page.check_invariants().unwrap();
    }

    #[test]
    fn detects_inconsistent_server_pages() {
        let json = r#"{"items":[1,2,3],"total":2,"page":1,"pageSize":5}"#;
        let page: Page<u8> = serde_json::from_str(json).unwrap();
        assert!(page.check_invariants().is_err());

        let json = r#"{"items":[1],"total":1,"page":1,"pageSize":5,"totalPages":1,"hasNextPage":true}"#;
        let page: Page<u8> = serde_json::from_str(json).unwrap();
        assert!(page.check_invariants().is_err());
    }

    #[test]
    fn page_past_the_end_is_empty_but_consistent() {
        let all: Vec<u32> = (0..4).collect();
        let page = Page::slice(&all, PageRequest::new(9, 10).unwrap());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
        page.check_invariants().unwrap();
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        id: i64,
    }

    #[test]
    fn items_without_default_still_decode() {
        let page: Page<Row> =
            serde_json::from_str(r#"{"items":[{"id":7}],"total":1,"page":1,"pageSize":10}"#).unwrap();
        assert_eq!(page.items, vec![Row { id: 7 }]);

        let page: Page<Row> = serde_json::from_str(r#"{"total":0,"page":1,"pageSize":10}"#).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn next_stops_at_the_last_representable_page() {
        let req = PageRequest { page: u32::MAX, page_size: 10 };
        assert_eq!(req.next().page, u32::MAX);
        assert_eq!(PageRequest::default().next().page, 2);
    }

    #[test]
    fn total_pages_clamps_instead_of_truncating() {
        assert_eq!(total_pages(u64::MAX, 1), u32::MAX);
        assert_eq!(total_pages(u32::MAX as u64 + 1, 1), u32::MAX);
        assert_eq!(total_pages(21, 10), 3);
        assert_eq!(total_pages(5, 0), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any valid request, a page never holds more than
        /// `pageSize` items, never more than `total`, and `hasNextPage` is
        /// exactly `page < totalPages`.
        #[test]
        fn slicing_respects_paging_guarantees(
            len in 0usize..300,
            page in 1u32..40,
            page_size in 1u32..60,
        ) {
            let all: Vec<usize> = (0..len).collect();
            let req = PageRequest::new(page, page_size).unwrap();
            let result = Page::slice(&all, req);

            prop_assert!(result.items.len() <= page_size as usize);
            prop_assert!(result.total >= result.items.len() as u64);
            prop_assert_eq!(result.has_next_page(), page < result.total_pages());
            prop_assert!(result.check_invariants().is_ok());
        }
    }
}
