pub mod error;
pub mod lifecycle;
pub mod recurring;
pub mod search;
pub mod validation;

pub use error::ScrimError;
pub use lifecycle::ScrimLifecycleService;
