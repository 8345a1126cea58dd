use super::error::PlayerError;
use super::filter::PlayerQuery;
use super::types::PlayerOrder;

pub const DEFAULT_PAGE_NUMBER: usize = 0;
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Which slice of the sorted result set to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: usize,
    pub size: usize,
    pub order: PlayerOrder,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
            order: PlayerOrder::default(),
        }
    }
}

impl PageRequest {
    #[cfg(test)]
    pub fn new(number: usize, size: usize, order: PlayerOrder) -> Self {
        Self { number, size, order }
    }

    /// Resolve paging from the query. A parameter that is present but does
    /// not parse fails the request instead of falling back to the default.
    pub fn from_query(query: &PlayerQuery) -> Result<Self, PlayerError> {
        let defaults = PageRequest::default();

        let number = match query.page_number.as_deref() {
            Some(raw) => parse_bounded("pageNumber", raw, 0)?,
            None => defaults.number,
        };
        let size = match query.page_size.as_deref() {
            Some(raw) => parse_bounded("pageSize", raw, 1)?,
            None => defaults.size,
        };
        let order = match query.order.as_deref() {
            Some(raw) => raw.parse().map_err(|_| PlayerError::invalid("order"))?,
            None => defaults.order,
        };

        Ok(Self { number, size, order })
    }

    /// Index of the first record on this page
    pub fn offset(&self) -> usize {
        self.number.saturating_mul(self.size)
    }
}

fn parse_bounded(field: &'static str, raw: &str, min: i32) -> Result<usize, PlayerError> {
    let value: i32 = raw.parse().map_err(|_| PlayerError::invalid(field))?;
    if value < min {
        return Err(PlayerError::invalid(field));
    }
    usize::try_from(value).map_err(|_| PlayerError::invalid(field))
}
