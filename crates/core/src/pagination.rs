//! Page-size constants and offset/limit math for the catalog list views.

use serde::Serialize;

/// Movies list page size.
pub const MOVIES_PAGE_SIZE: u32 = 12;

/// Scenes list page size.
pub const SCENES_PAGE_SIZE: u32 = 6;

/// Number of movies and scenes shown on the home page previews.
pub const HOME_PREVIEW_LIMIT: u32 = 4;

/// How many movies the scene form loads for its movie picker and for
/// resolving movie titles next to scenes.
pub const MOVIE_LOOKUP_LIMIT: u32 = 100;

/// How many scenes the scene detail page scans to find the requested one.
pub const SCENE_LOOKUP_LIMIT: u32 = 1000;

/// A `skip`/`limit` window sent to the list and search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u32,
}

impl PageWindow {
    /// The window for a 1-based `page` of `page_size` items.
    ///
    /// Page `0` is treated as page `1`.
    ///
    /// ```
    /// use scenevault_core::pagination::PageWindow;
    ///
    /// let window = PageWindow::for_page(2, 6);
    /// assert_eq!(window.skip, 6);
    /// assert_eq!(window.limit, 6);
    /// ```
    pub fn for_page(page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        Self {
            skip: u64::from(page - 1) * u64::from(page_size),
            limit: page_size,
        }
    }

    /// The first `limit` records.
    pub fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }
}

/// `ceil(total / page_size)`; zero when `page_size` is zero.
///
/// ```
/// use scenevault_core::pagination::total_pages;
///
/// assert_eq!(total_pages(13, 6), 3);
/// assert_eq!(total_pages(12, 6), 2);
/// assert_eq!(total_pages(0, 6), 0);
/// ```
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Whether `page` is a page a user can navigate to.
pub fn is_valid_page(page: u32, total_pages: u32) -> bool {
    (1..=total_pages).contains(&page)
}
