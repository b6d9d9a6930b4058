//! Common types

use serde::{Deserialize, Serialize};

/// A request for one page of a result set. `page_index` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self { page_index, page_size: page_size.max(1) }
    }

    /// Build a request from a 1-based page number. Anything below 1 is page 1.
    pub fn from_one_based(page: i64, page_size: u32) -> Self {
        let index = u32::try_from(page.saturating_sub(1).max(0)).unwrap_or(u32::MAX);
        Self::new(index, page_size)
    }

    pub fn offset(&self) -> u64 {
        self.page_index as u64 * self.page_size as u64
    }

    /// The 1-based number of this page.
    pub fn page_number(&self) -> u32 {
        self.page_index.saturating_add(1)
    }
}

/// One page of query results together with totals over the whole result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page_index: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            total_elements,
            page_index: request.page_index,
            page_size: request.page_size,
        }
    }

    /// A page holding every element of `content`, the way an unpaged result looks.
    pub fn single(content: Vec<T>) -> Self {
        let total = content.len() as u64;
        let size = content.len().max(1) as u32;
        Self::new(content, PageRequest::new(0, size), total)
    }

    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(self.page_size as u64) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// How the owner summary tallies visits across an owner's pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitTally {
    /// The running total restarts for every pet, leaving only the last pet's count.
    #[default]
    LastPet,
    AllPets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_one_based_converts_and_clamps() {
        assert_eq!(PageRequest::from_one_based(1, 5).page_index, 0);
        assert_eq!(PageRequest::from_one_based(3, 5).offset(), 10);
        assert_eq!(PageRequest::from_one_based(0, 5).page_index, 0);
        assert_eq!(PageRequest::from_one_based(-7, 5).page_index, 0);
        assert_eq!(PageRequest::from_one_based(2, 0).page_size, 1);
        assert_eq!(PageRequest::from_one_based(i64::MAX, 5).page_index, u32::MAX);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::new(0, 5);
        assert_eq!(Page::<u8>::new(vec![], request, 0).total_pages(), 0);
        assert_eq!(Page::new(vec![1u8], request, 10).total_pages(), 2);
        assert_eq!(Page::new(vec![1u8], request, 11).total_pages(), 3);
    }

    #[test]
    fn test_single_page() {
        let page = Page::single(vec!["a", "b"]);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.is_empty());
    }

    #[test]
    fn test_visit_tally_deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Holder {
            tally: VisitTally,
        }
        let holder: Holder = config::Config::builder()
            .set_override("tally", "all_pets")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(holder.tally, VisitTally::AllPets);
    }
}
