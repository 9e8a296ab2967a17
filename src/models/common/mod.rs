pub mod pagination;
pub mod response;

pub use pagination::{MAX_PAGE_SIZE, PaginationInfo, PaginationQuery, page_bounds};
pub use response::ApiResponse;
