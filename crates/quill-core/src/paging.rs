//! Explicit paging and sorting for post listings.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::domain::Post;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case sorts descending; anything else ascending.
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Post attributes a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSortField {
    #[default]
    Id,
    Title,
    Description,
    Content,
}

impl FromStr for PostSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(PostSortField::Id),
            "title" => Ok(PostSortField::Title),
            "description" => Ok(PostSortField::Description),
            "content" => Ok(PostSortField::Content),
            other => Err(DomainError::Validation(format!(
                "Unknown sort field '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostSort {
    pub field: PostSortField,
    pub direction: SortDirection,
}

impl PostSort {
    /// Total order used by in-memory stores. Ties fall back to ascending id
    /// so pages are stable.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let primary = match self.field {
            PostSortField::Id => a.id.cmp(&b.id),
            PostSortField::Title => a.title.cmp(&b.title),
            PostSortField::Description => a.description.cmp(&b.description),
            PostSortField::Content => a.content.cmp(&b.content),
        };
        let primary = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_no: u64,
    pub page_size: u64,
    pub sort: PostSort,
}

impl PageRequest {
    pub fn new(page_no: u64, page_size: u64, sort: PostSort) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }
        // Offsets must fit a signed 64-bit SQL OFFSET.
        let in_range = page_no
            .checked_mul(page_size)
            .is_some_and(|offset| offset <= i64::MAX as u64);
        if !in_range {
            return Err(DomainError::Validation(format!(
                "Page number {page_no} is out of range"
            )));
        }
        Ok(Self {
            page_no,
            page_size,
            sort,
        })
    }

    pub fn offset(&self) -> u64 {
        self.page_no.saturating_mul(self.page_size)
    }
}

/// A slice of results plus the total count it was cut from.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_no: u64,
    pub page_size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.page_size.max(1))
    }

    pub fn is_last(&self) -> bool {
        self.page_no.saturating_add(1) >= self.total_pages()
    }
}
