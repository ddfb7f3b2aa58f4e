use regex::Regex;
use std::sync::OnceLock;

use crate::domain::TitleKind;

/// Numeric duration of a free-text field: minutes for movies, seasons for shows.
///
/// `"90 min"` for a movie yields `90`, `"2 Seasons"` for a show yields `2`.
/// A movie listed in seasons (or the reverse) does not parse.
#[must_use]
pub fn parse_duration(duration: Option<&str>, kind: TitleKind) -> Option<u32> {
    static MINUTES: OnceLock<Regex> = OnceLock::new();
    static SEASONS: OnceLock<Regex> = OnceLock::new();

    let text = duration?.trim();
    if text.is_empty() {
        return None;
    }

    let re = match kind {
        TitleKind::Movie => {
            MINUTES.get_or_init(|| Regex::new(r"(?i)(\d+)\s*min").expect("Invalid regex"))
        }
        TitleKind::TvShow => {
            SEASONS.get_or_init(|| Regex::new(r"(?i)(\d+)\s*Season").expect("Invalid regex"))
        }
    };

    re.captures(text)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_minutes() {
        assert_eq!(parse_duration(Some("90 min"), TitleKind::Movie), Some(90));
        assert_eq!(parse_duration(Some("125min"), TitleKind::Movie), Some(125));
        assert_eq!(parse_duration(Some("45 MIN"), TitleKind::Movie), Some(45));
    }

    #[test]
    fn test_parse_show_seasons() {
        assert_eq!(parse_duration(Some("2 Seasons"), TitleKind::TvShow), Some(2));
        assert_eq!(parse_duration(Some("1 Season"), TitleKind::TvShow), Some(1));
    }

    #[test]
    fn test_unparseable_durations() {
        assert_eq!(parse_duration(None, TitleKind::Movie), None);
        assert_eq!(parse_duration(Some(""), TitleKind::TvShow), None);
        assert_eq!(parse_duration(Some("2 Seasons"), TitleKind::Movie), None);
        assert_eq!(parse_duration(Some("90 min"), TitleKind::TvShow), None);
        assert_eq!(parse_duration(Some("unknown"), TitleKind::Movie), None);
    }
}
