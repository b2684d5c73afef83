//! Client-side paging over an already fetched sequence.
//!
//! Pages are 1-indexed. Page `p` of size `n` covers the half-open window
//! `[(p-1)*n, p*n)`, clipped to the sequence.

use std::ops::Range;

/// Number of recipes shown per list page
pub const RECIPES_PER_PAGE: usize = 6;

/// `ceil(len / page_size)`; zero for an empty sequence
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Unclipped index window of `page`. Page 0 maps to an empty window.
pub fn page_window(page: usize, page_size: usize) -> Range<usize> {
    match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(page_size);
            start..start.saturating_add(page_size)
        }
        None => 0..0,
    }
}

/// The items visible on `page`. Out-of-range pages give an empty slice.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let window = page_window(page, page_size);
    let start = window.start.min(items.len());
    let end = window.end.min(items.len());
    &items[start..end]
}
