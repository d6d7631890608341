pub mod request_queries;
pub mod scrim_queries;
pub mod team_queries;
