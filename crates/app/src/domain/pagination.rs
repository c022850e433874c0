//! Offset pagination

/// Default and maximum page size for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl PageBounds {
    #[must_use]
    pub const fn new(default_limit: u32, max_limit: u32) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }
}

/// A clamped `skip`/`limit` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    /// Build a page from caller input, falling back to the default limit and
    /// clamping the limit into `1..=max_limit`.
    #[must_use]
    pub fn bounded(skip: Option<u32>, limit: Option<u32>, bounds: PageBounds) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit
                .unwrap_or(bounds.default_limit)
                .clamp(1, bounds.max_limit),
        }
    }

    pub(crate) fn limit_i64(self) -> i64 {
        i64::from(self.limit)
    }

    pub(crate) fn offset_i64(self) -> i64 {
        i64::from(self.skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: PageBounds = PageBounds::new(20, 50);

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(
            Page::bounded(None, None, BOUNDS),
            Page { skip: 0, limit: 20 }
        );
    }

    #[test]
    fn limit_is_clamped_to_maximum() {
        assert_eq!(Page::bounded(Some(5), Some(500), BOUNDS).limit, 50);
    }

    #[test]
    fn zero_limit_becomes_one() {
        assert_eq!(Page::bounded(None, Some(0), BOUNDS).limit, 1);
    }
}
