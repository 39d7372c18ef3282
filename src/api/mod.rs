pub mod client;
pub mod ddragon;
pub mod endpoints;
pub mod live_client;
pub mod models;
