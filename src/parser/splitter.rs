const MATCH_START_MARKER: &str = "New match ";

/// Contiguous slice of a raw log belonging to one match.
///
/// The match start line, when present, is kept as the first body line.
/// `match_id` is `None` when no numeric id could be recovered, in which case
/// the chunk must not produce a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchChunk {
    pub match_id: Option<String>,
    pub lines: Vec<String>,
}

impl MatchChunk {
    fn from_lines(lines: Vec<String>) -> Self {
        let match_id = lines.first().and_then(|line| extract_match_id(line));
        MatchChunk { match_id, lines }
    }
}

pub fn split_log_into_match_chunks(content: &str) -> Vec<MatchChunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_match_start(line) && !current.is_empty() {
            chunks.push(MatchChunk::from_lines(std::mem::take(&mut current)));
        }
        current.push(line.to_string());
    }

    if !current.is_empty() {
        chunks.push(MatchChunk::from_lines(current));
    }

    chunks
}

fn is_match_start(line: &str) -> bool {
    line.contains(MATCH_START_MARKER)
}

/// First run of digits following the start marker, e.g. `11348965` in
/// `23/04/2019 15:34:22 - New match 11348965 has started`.
pub fn extract_match_id(line: &str) -> Option<String> {
    let (_, after) = line.split_once(MATCH_START_MARKER)?;
    let id: String = after
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
