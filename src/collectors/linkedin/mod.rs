// Guest job search: query building, page fetching, and markup parsing.

pub mod cards;
pub mod client;
pub mod description;
pub mod params;

pub use client::LinkedInClient;
