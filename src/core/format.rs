// rlog - core/format.rs
//
// Line composition:
//
//   [<timestamp> ]<DECORATION padded to 9>: [<caller info> ]<message>\n
//
// DECORATION is the level name, followed by "(<depth>)" for trace lines.

use crate::core::caller::CallSite;
use crate::core::level::Level;
use crate::util::constants::{DEFAULT_TIME_PATTERN, LEVEL_COLUMN_WIDTH};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::{self, Write as _};

/// Well-known named time formats and their strftime equivalents.
const NAMED_TIME_FORMATS: &[(&str, &str)] = &[
    ("ANSIC", "%a %b %e %H:%M:%S %Y"),
    ("UnixDate", "%a %b %e %H:%M:%S %Z %Y"),
    ("RubyDate", "%a %b %d %H:%M:%S %z %Y"),
    ("RFC822", "%d %b %y %H:%M %Z"),
    ("RFC822Z", "%d %b %y %H:%M %z"),
    ("RFC850", "%A, %d-%b-%y %H:%M:%S %Z"),
    ("RFC1123", "%a, %d %b %Y %H:%M:%S %Z"),
    ("RFC1123Z", "%a, %d %b %Y %H:%M:%S %z"),
    ("RFC3339", DEFAULT_TIME_PATTERN),
    ("RFC3339Nano", "%Y-%m-%dT%H:%M:%S%.9f%:z"),
    ("Kitchen", "%-I:%M%p"),
    ("Stamp", "%b %e %H:%M:%S"),
    ("StampMilli", "%b %e %H:%M:%S%.3f"),
    ("StampMicro", "%b %e %H:%M:%S%.6f"),
    ("StampNano", "%b %e %H:%M:%S%.9f"),
];

// =============================================================================
// Time format
// =============================================================================

/// A validated strftime pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    pattern: String,
}

impl TimeFormat {
    /// Resolve a configured value: a named format, a custom strftime
    /// pattern, or empty for the RFC 3339 default. Invalid custom patterns
    /// fall back to the default.
    pub fn resolve(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Self::default();
        }
        if let Some((_, pattern)) = NAMED_TIME_FORMATS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
        {
            return Self {
                pattern: (*pattern).to_string(),
            };
        }
        if is_valid_pattern(value) {
            Self {
                pattern: value.to_string(),
            }
        } else {
            tracing::warn!(
                format = value,
                default = DEFAULT_TIME_PATTERN,
                "Invalid time format pattern, using default"
            );
            Self::default()
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render the current local time.
    pub fn now(&self) -> String {
        self.render(&Local::now())
    }

    pub fn render<Tz>(&self, time: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        time.format(&self.pattern).to_string()
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIME_PATTERN.to_string(),
        }
    }
}

fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

// =============================================================================
// Message body
// =============================================================================

/// Write `parts` separated by single spaces.
pub fn join_parts<I>(buf: &mut String, parts: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            buf.push(' ');
        }
        let _ = write!(buf, "{part}");
    }
}

/// Level decoration before padding: `INFO`, `TRACE(3)`.
pub fn decoration(level: Level, depth: Option<u32>) -> String {
    match depth {
        Some(depth) => format!("{}({depth})", level.name()),
        None => level.name().to_string(),
    }
}

// =============================================================================
// Line
// =============================================================================

/// Everything that goes into one output line.
#[derive(Debug)]
pub struct LineParts<'a> {
    pub timestamp: Option<&'a str>,
    pub level: Level,
    pub depth: Option<u32>,
    pub caller: Option<&'a CallSite>,
    pub message: &'a str,
}

/// Compose the final line, always terminated by exactly one newline.
pub fn compose_line(parts: &LineParts<'_>) -> String {
    let mut line = String::with_capacity(parts.message.len() + 64);
    if let Some(ts) = parts.timestamp {
        line.push_str(ts);
        line.push(' ');
    }
    let decoration = decoration(parts.level, parts.depth);
    let _ = write!(line, "{decoration:<width$}: ", width = LEVEL_COLUMN_WIDTH);
    if let Some(site) = parts.caller {
        line.push_str(&site.render());
        line.push(' ');
    }
    line.push_str(parts.message);
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use std::borrow::Cow;

    fn fixed_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2016, 3, 7, 14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_default_is_rfc3339() {
        let tf = TimeFormat::resolve("");
        assert_eq!(tf.render(&fixed_time()), "2016-03-07T14:05:09+01:00");
    }

    #[test]
    fn test_named_formats_are_case_insensitive() {
        assert_eq!(TimeFormat::resolve("ansic"), TimeFormat::resolve("ANSIC"));
        assert_eq!(
            TimeFormat::resolve("ANSIC").render(&fixed_time()),
            "Mon Mar  7 14:05:09 2016"
        );
        assert_eq!(
            TimeFormat::resolve("Kitchen").render(&fixed_time()),
            "2:05PM"
        );
    }

    #[test]
    fn test_custom_pattern() {
        let tf = TimeFormat::resolve("%H:%M");
        assert_eq!(tf.render(&fixed_time()), "14:05");
    }

    #[test]
    fn test_invalid_custom_pattern_falls_back() {
        assert_eq!(TimeFormat::resolve("%Q broken"), TimeFormat::default());
    }

    #[test]
    fn test_join_parts() {
        let mut buf = String::new();
        join_parts(&mut buf, ["a", "b", "c"]);
        assert_eq!(buf, "a b c");

        let mut buf = String::new();
        let mixed: [&dyn fmt::Display; 3] = [&1, &"two", &3.5];
        join_parts(&mut buf, mixed);
        assert_eq!(buf, "1 two 3.5");
    }

    #[test]
    fn test_levels_pad_to_nine_columns() {
        let line = compose_line(&LineParts {
            timestamp: None,
            level: Level::Info,
            depth: None,
            caller: None,
            message: "Test Info",
        });
        assert_eq!(line, "INFO     : Test Info\n");

        let line = compose_line(&LineParts {
            timestamp: None,
            level: Level::Critical,
            depth: None,
            caller: None,
            message: "Test Critical",
        });
        assert_eq!(line, "CRITICAL : Test Critical\n");
    }

    #[test]
    fn test_trace_decoration_includes_depth() {
        let line = compose_line(&LineParts {
            timestamp: None,
            level: Level::Trace,
            depth: Some(1),
            caller: None,
            message: "Trace 1",
        });
        assert_eq!(line, "TRACE(1) : Trace 1\n");

        let line = compose_line(&LineParts {
            timestamp: None,
            level: Level::Trace,
            depth: Some(12),
            caller: None,
            message: "deep",
        });
        assert_eq!(line, "TRACE(12): deep\n");
    }

    #[test]
    fn test_timestamp_and_caller_info() {
        let site = CallSite {
            module_and_file: Cow::Borrowed("app/main.rs"),
            line: 42,
            function: Some("demo::main"),
        };
        let line = compose_line(&LineParts {
            timestamp: Some("2016-03-07T14:05:09+01:00"),
            level: Level::Warn,
            depth: None,
            caller: Some(&site),
            message: "careful\n",
        });
        assert_eq!(
            line,
            "2016-03-07T14:05:09+01:00 WARN     : [app/main.rs:42 (demo::main)] careful\n"
        );
    }
}
