use serde::Serialize;

use crate::domain::error::DomainError;

/// Feeds are always cut into pages of this many posts.
pub const PAGE_SIZE: u64 = 5;

/// A requested page, as given in the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(u64),
    Last,
}

impl Default for PageNumber {
    fn default() -> Self {
        PageNumber::Number(1)
    }
}

impl PageNumber {
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(Self::default());
        };
        if raw == "last" {
            return Ok(PageNumber::Last);
        }
        match raw.parse::<u64>() {
            Ok(number) if number >= 1 => Ok(PageNumber::Number(number)),
            Ok(_) => Err(DomainError::PageNotFound(
                "that page number is less than 1".into(),
            )),
            Err(_) => Err(DomainError::PageNotFound(
                "that page number is not an integer".into(),
            )),
        }
    }

    /// Resolves against a total item count, rejecting pages past the end.
    /// The first page exists even when there are no items.
    pub fn resolve(self, count: u64) -> Result<PageWindow, DomainError> {
        let num_pages = num_pages(count);
        let number = match self {
            PageNumber::Last => num_pages,
            PageNumber::Number(n) if n <= num_pages => n,
            PageNumber::Number(_) => {
                return Err(DomainError::PageNotFound(
                    "that page contains no results".into(),
                ));
            }
        };
        Ok(PageWindow {
            number,
            num_pages,
            count,
        })
    }
}

fn num_pages(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// A validated page position within a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
}

impl PageWindow {
    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1) * PAGE_SIZE
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_next: self.number < self.num_pages,
            has_previous: self.number > 1,
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(skip)]
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_paginated(&self) -> bool {
        self.num_pages > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_page_means_first() {
        assert_eq!(PageNumber::parse(None).unwrap(), PageNumber::Number(1));
        assert_eq!(PageNumber::parse(Some("")).unwrap(), PageNumber::Number(1));
        assert_eq!(PageNumber::parse(Some("3")).unwrap(), PageNumber::Number(3));
        assert_eq!(PageNumber::parse(Some("last")).unwrap(), PageNumber::Last);
    }

    #[test]
    fn rejects_malformed_page_numbers() {
        assert!(matches!(
            PageNumber::parse(Some("0")),
            Err(DomainError::PageNotFound(_))
        ));
        assert!(matches!(
            PageNumber::parse(Some("two")),
            Err(DomainError::PageNotFound(_))
        ));
        assert!(PageNumber::parse(Some("-1")).is_err());
    }

    #[test]
    fn empty_result_set_still_has_a_first_page() {
        let window = PageNumber::default().resolve(0).unwrap();
        assert_eq!(window.number, 1);
        assert_eq!(window.num_pages, 1);
        assert_eq!(window.offset(), 0);

        assert!(PageNumber::Number(2).resolve(0).is_err());
    }

    #[test]
    fn windows_cover_five_items_each() {
        assert_eq!(PageNumber::Last.resolve(11).unwrap().number, 3);
        let second = PageNumber::Number(2).resolve(11).unwrap();
        assert_eq!(second.offset(), 5);
        assert_eq!(second.limit(), 5);

        let page = second.into_page(vec![0; 5]);
        assert!(page.has_next);
        assert!(page.has_previous);
        assert!(page.is_paginated());

        assert!(PageNumber::Number(4).resolve(11).is_err());
        assert_eq!(PageNumber::Last.resolve(10).unwrap().number, 2);
    }
}
