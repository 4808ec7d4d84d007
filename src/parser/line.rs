/// Killer name the server uses for environmental deaths.
pub const WORLD_KILLER: &str = "<WORLD>";

const TIME_SEPARATOR: &str = " - ";
const KILLED: &str = " killed ";
const USING: &str = " using ";
const BY: &str = " by ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    PlayerKill {
        time: u32,
        killer: String,
        victim: String,
        weapon: String,
    },
    WorldKill {
        time: u32,
        victim: String,
    },
}

/// Parse one raw log line into a kill event.
///
/// Recognised shapes (an optional date may precede the time):
/// - `HH:MM:SS - <killer> killed <victim> using <weapon>`
/// - `HH:MM:SS - <WORLD> killed <victim> by <cause>`
///
/// Anything else yields `None`.
pub fn parse_log_line(line: &str) -> Option<LogEvent> {
    let (prefix, body) = line.trim().split_once(TIME_SEPARATOR)?;
    let time = time_to_seconds(prefix.split_whitespace().last().unwrap_or(""));

    let (killer, rest) = body.split_once(KILLED)?;
    let killer = killer.trim();
    if killer.is_empty() {
        return None;
    }

    if killer == WORLD_KILLER {
        let (victim, _cause) = rest.split_once(BY)?;
        let victim = non_empty(victim)?;
        return Some(LogEvent::WorldKill { time, victim });
    }

    let (victim, weapon) = rest.split_once(USING)?;
    Some(LogEvent::PlayerKill {
        time,
        killer: killer.to_string(),
        victim: non_empty(victim)?,
        weapon: non_empty(weapon)?,
    })
}

/// Convert `HH:MM:SS` to seconds of day. Malformed or missing input gives 0.
pub fn time_to_seconds(time: &str) -> u32 {
    let mut parts = time.split(':').map(|part| part.trim().parse::<u32>().ok());

    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Some(hours)), Some(Some(minutes)), Some(Some(seconds)), None) => hours
            .checked_mul(3600)
            .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
            .and_then(|total| total.checked_add(seconds))
            .unwrap_or(0),
        _ => 0,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
