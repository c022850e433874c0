//! Offset pagination query parameters.

use salvo::oapi::extract::QueryParam;

use storefront_app::domain::pagination::{Page, PageBounds};

pub(crate) trait PageExt {
    fn into_page(self, limit: QueryParam<u32, false>, bounds: PageBounds) -> Page;
}

impl PageExt for QueryParam<u32, false> {
    fn into_page(self, limit: QueryParam<u32, false>, bounds: PageBounds) -> Page {
        Page::bounded(self.into_inner(), limit.into_inner(), bounds)
    }
}
