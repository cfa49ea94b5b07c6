pub mod endpoints;
pub mod error;
pub mod router;

pub use error::ApiError;
pub use router::portal_router;
