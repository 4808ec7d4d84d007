pub mod line;
pub mod splitter;

pub use line::{parse_log_line, LogEvent};
pub use splitter::{split_log_into_match_chunks, MatchChunk};
