use schedule_dns_domain::QueryIntent;

const NOW_PATTERN: &str = "now.talks";
const NEXT_PATTERN: &str = "next.talks";
const TRACK_PREFIX: &str = "track";
const TRACK_SUFFIX: &str = ".talks";

/// Maps a DNS question name onto a [`QueryIntent`].
///
/// Matching is a case-insensitive substring search, checked in a fixed order:
/// `now.talks`, then `next.talks`, then `track<N>.talks`. The first hit wins;
/// anything else is [`QueryIntent::Unknown`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRouter;

impl QueryRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, query_name: &str) -> QueryIntent {
        let name = query_name.to_ascii_lowercase();

        if name.contains(NOW_PATTERN) {
            return QueryIntent::Now;
        }
        if name.contains(NEXT_PATTERN) {
            return QueryIntent::Next;
        }
        if let Some(number) = find_track_number(&name) {
            return QueryIntent::numbered_track(number);
        }
        QueryIntent::Unknown
    }
}

/// Finds the first `track<digits>.talks` occurrence and returns its number.
fn find_track_number(name: &str) -> Option<u32> {
    name.match_indices(TRACK_PREFIX).find_map(|(pos, _)| {
        let rest = &name[pos + TRACK_PREFIX.len()..];
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || !rest[digits..].starts_with(TRACK_SUFFIX) {
            return None;
        }
        rest[..digits].parse().ok()
    })
}
