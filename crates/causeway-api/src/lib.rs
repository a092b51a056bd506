#![forbid(unsafe_code)]
//! Wire contract for the causeway HTTP API.
//!
//! Response DTOs, the structured error envelope, and query-parameter
//! parsing. Everything on the wire is camelCase JSON; error codes are the
//! machine-readable SCREAMING_SNAKE vocabulary of the public contract.

mod dto;
mod error_mapping;
mod errors;
pub mod params;

pub use dto::{
    CategoryDto, CategoryListDto, FeedItemDto, FeedMediaDto, FeedOpportunityDto,
    FeedOrganizationDto, FeedPageDto,
};
pub use error_mapping::http_status_for;
pub use errors::{ApiError, ApiErrorCode, ErrorEnvelope, FieldError};

pub const CRATE_NAME: &str = "causeway-api";
