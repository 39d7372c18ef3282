pub mod match_stats;
pub mod role;
