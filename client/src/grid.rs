// Listing view state: quick filter, column sort and pagination over the cached
// articles. The cached list itself is never reordered.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use shared::ars_format::format_currency;
use shared::models::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortColumn {
    Code,
    Description,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridState {
    pub search: String,
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(vec![5, 10, 25], 10)
    }
}

/// One rendered page of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    pub rows: Vec<Article>,
    pub page: usize,
    pub page_count: usize,
    pub matching: usize,
}

impl GridState {
    pub fn new(page_size_options: Vec<usize>, page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 0,
            page_size,
            page_size_options,
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 0;
    }

    /// Cycles a column through ascending, descending and unsorted.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some(SortSpec { column: current, direction: SortDirection::Ascending }) if current == column => {
                Some(SortSpec { column, direction: SortDirection::Descending })
            }
            Some(SortSpec { column: current, direction: SortDirection::Descending }) if current == column => None,
            _ => Some(SortSpec { column, direction: SortDirection::Ascending }),
        };
    }

    /// Returns false when `size` is not one of the offered options.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !self.page_size_options.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page = 0;
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    fn matches(&self, article: &Article) -> bool {
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        article.code.to_lowercase().contains(&query)
            || article.description.to_lowercase().contains(&query)
            || format_currency(&article.price).to_lowercase().contains(&query)
    }

    fn compare(spec: SortSpec, a: &Article, b: &Article) -> Ordering {
        let ordering = match spec.column {
            SortColumn::Code => a.code.cmp(&b.code),
            SortColumn::Description => a.description.cmp(&b.description),
            // missing prices sort before every number
            SortColumn::Price => match (a.price, b.price) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Filters, sorts and slices `articles`; the stored page index is clamped
    /// when the filtered list got shorter.
    pub fn view(&mut self, articles: &[Article]) -> GridPage {
        let mut rows: Vec<Article> = articles.iter().filter(|a| self.matches(a)).cloned().collect();
        if let Some(spec) = self.sort {
            rows.sort_by(|a, b| Self::compare(spec, a, b));
        }

        let matching = rows.len();
        let page_size = self.page_size.max(1);
        let page_count = matching.div_ceil(page_size).max(1);
        self.page = self.page.min(page_count - 1);

        let rows = rows.into_iter().skip(self.page * page_size).take(page_size).collect();
        GridPage {
            rows,
            page: self.page,
            page_count,
            matching,
        }
    }
}

/// Sum of every parsable price; missing prices count as zero.
pub fn total_price(articles: &[Article]) -> f64 {
    articles.iter().filter_map(|a| a.price).sum()
}
