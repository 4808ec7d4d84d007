pub mod awards;
pub mod global_ranking;
pub mod match_processor;
pub mod mvp;
pub mod ranking;
pub mod report;
