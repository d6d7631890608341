pub mod common;
pub mod scrim;
pub mod scrim_request;
pub mod team;
