pub mod router;
pub mod types;
pub mod handlers {
    pub mod albums;
    pub mod common;
}

pub use router::{build_app, create_router, ApiDoc};
pub use types::{ApiError, AppState};
