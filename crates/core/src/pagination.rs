use serde::Serialize;

/// Page metadata returned alongside every paginated listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Slices out the 1-indexed `page` of `per_page` elements. An out-of-range
/// page is not an error: it yields an empty slice with correct metadata.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_items = items.len();
    let offset = (page - 1).saturating_mul(per_page);

    let pagination = Pagination {
        current_page: page,
        total_pages: total_items.div_ceil(per_page),
        total_items,
        items_per_page: per_page,
        has_next_page: offset.saturating_add(per_page) < total_items,
        has_prev_page: page > 1,
    };

    Page { items: items.into_iter().skip(offset).take(per_page).collect(), pagination }
}

#[cfg(test)]
mod tests {
    use crate::pagination::paginate;

    #[test]
    fn first_page_of_twenty_five_items() {
        let page = paginate((0..25).collect::<Vec<_>>(), 1, 10);

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.total_items, 25);
        assert_eq!(page.pagination.items_per_page, 10);
        assert!(page.pagination.has_next_page);
        assert!(!page.pagination.has_prev_page);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let page = paginate((0..25).collect::<Vec<_>>(), 3, 10);

        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
    }

    #[test]
    fn out_of_range_page_is_empty_with_correct_metadata() {
        let page = paginate((0..25).collect::<Vec<_>>(), 9, 10);

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.current_page, 9);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.total_items, 25);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
    }

    #[test]
    fn maximum_page_number_does_not_overflow() {
        let page = paginate(vec![1, 2, 3], usize::MAX, 10);

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.current_page, usize::MAX);
        assert_eq!(page.pagination.total_items, 3);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let page = paginate(Vec::<i32>::new(), 1, 10);

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.total_items, 0);
        assert!(!page.pagination.has_next_page);
        assert!(!page.pagination.has_prev_page);
    }

    #[test]
    fn metadata_serializes_with_wire_names() {
        let page = paginate(vec![1, 2, 3], 1, 2);

        let value = serde_json::to_value(&page.pagination).expect("serialize");
        assert_eq!(value["currentPage"], 1);
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["totalItems"], 3);
        assert_eq!(value["itemsPerPage"], 2);
        assert_eq!(value["hasNextPage"], true);
        assert_eq!(value["hasPrevPage"], false);
    }
}
