pub mod job;
pub mod search_config;
