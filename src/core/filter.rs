// rlog - core/filter.rs
//
// Per-file level filtering.
//
// A FilterSpec is an ordered list of (pattern, threshold) rules compiled
// from a configuration string such as "net.rs=DEBUG,core/*.rs=WARN,ERROR".
// Pattern rules keep their configured order and the first one whose pattern
// matches the caller decides. The global rule (empty pattern) is always
// stored last, wherever it appeared in the string.
//
// Core layer: pure logic, no I/O.

use crate::core::level::Level;
use crate::util::constants::TRACE_DISABLED;
use glob::{MatchOptions, Pattern};

/// `*` and `?` never cross a `/`, so "*.rs" only matches a bare filename.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Which threshold vocabulary a spec string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Level names (`DEBUG`, `WARN`, ...). `TRACE` is rejected.
    Level,
    /// Signed trace depths. Negative means disabled.
    Trace,
}

// =============================================================================
// Filter
// =============================================================================

/// A single rule: callers matching `pattern` are admitted up to `threshold`.
#[derive(Debug, Clone)]
pub struct Filter {
    pattern: String,
    /// `None` for the global rule and for patterns that failed to compile.
    compiled: Option<Pattern>,
    threshold: i64,
}

impl Filter {
    /// Build a rule. An unparsable glob never matches anything.
    pub fn new(pattern: &str, threshold: i64) -> Self {
        let compiled = if pattern.is_empty() {
            None
        } else {
            match Pattern::new(pattern) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::debug!(pattern, error = %e, "Invalid filter pattern, rule will never match");
                    None
                }
            }
        };
        Self {
            pattern: pattern.to_string(),
            compiled,
            threshold,
        }
    }

    /// The fallback rule that matches every caller.
    pub fn global(threshold: i64) -> Self {
        Self::new("", threshold)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn is_global(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Returns `(pattern_matched, should_log)`.
    ///
    /// `filename` is the caller's `parent/file` with `/` separators. The
    /// pattern is tried against the bare filename first, then against the
    /// two-segment form so rules like `core/*.rs` work.
    pub fn check(&self, filename: &str, candidate: i64) -> (bool, bool) {
        let matched = if self.is_global() {
            true
        } else {
            match &self.compiled {
                Some(pattern) => {
                    let base = filename.rsplit('/').next().unwrap_or(filename);
                    pattern.matches_with(base, MATCH_OPTIONS)
                        || pattern.matches_with(filename, MATCH_OPTIONS)
                }
                None => false,
            }
        };
        if matched {
            (true, candidate <= self.threshold)
        } else {
            (false, false)
        }
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.threshold == other.threshold
    }
}

impl Eq for Filter {}

// =============================================================================
// FilterSpec
// =============================================================================

/// Ordered rule set. At most one global rule, always last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    filters: Vec<Filter>,
}

impl FilterSpec {
    /// Compile a comma-separated spec string.
    ///
    /// Each field is `pattern=threshold` or a bare `threshold` that sets the
    /// global rule (the last bare field wins). Fields with the wrong number
    /// of `=` tokens or an unparsable threshold are dropped. In trace mode a
    /// disabled global threshold is left out entirely, so a spec with no
    /// pattern rules compiles to an empty list.
    pub fn compile(raw: &str, mode: FilterMode, default_global: i64) -> Self {
        let mut global = default_global;
        let mut filters = Vec::new();

        for field in raw.split(',') {
            let tokens: Vec<&str> = field.split('=').map(str::trim).collect();
            let (pattern, threshold_token) = match tokens.as_slice() {
                [threshold] => ("", *threshold),
                [pattern, threshold] => (*pattern, *threshold),
                _ => {
                    tracing::debug!(field, "Malformed filter field, skipping");
                    continue;
                }
            };

            let Some(threshold) = parse_threshold(threshold_token, mode) else {
                if !threshold_token.is_empty() {
                    tracing::debug!(
                        field,
                        ?mode,
                        "Unrecognised filter threshold, skipping"
                    );
                }
                continue;
            };

            if pattern.is_empty() {
                global = threshold;
            } else {
                filters.push(Filter::new(pattern, threshold));
            }
        }

        if mode == FilterMode::Level || global > TRACE_DISABLED {
            filters.push(Filter::global(global));
        }

        Self { filters }
    }

    /// Compile a log-level spec. The global default is INFO.
    pub fn log_levels(raw: &str) -> Self {
        Self::compile(raw, FilterMode::Level, Level::Info.number())
    }

    /// Compile a trace-depth spec. The global default is disabled.
    pub fn trace_levels(raw: &str) -> Self {
        Self::compile(raw, FilterMode::Trace, TRACE_DISABLED)
    }

    /// First matching rule decides. No matching rule means "do not log".
    pub fn matches(&self, filename: &str, candidate: i64) -> bool {
        for filter in &self.filters {
            let (matched, should_log) = filter.check(filename, candidate);
            if matched {
                return should_log;
            }
        }
        false
    }

    /// True when nothing can ever be admitted (trace disabled everywhere).
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True when any rule depends on the caller's filename.
    pub fn has_patterns(&self) -> bool {
        self.filters.iter().any(|f| !f.is_global())
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}

fn parse_threshold(token: &str, mode: FilterMode) -> Option<i64> {
    match mode {
        FilterMode::Level => Level::from_name(token)
            .filter(|level| level.is_threshold())
            .map(Level::number),
        FilterMode::Trace => token.parse::<i64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admits(spec: &FilterSpec, file: &str, level: Level) -> bool {
        spec.matches(file, level.number())
    }

    #[test]
    fn test_global_threshold_admits_less_verbose_levels() {
        let spec = FilterSpec::log_levels("WARN");
        assert!(admits(&spec, "app/main.rs", Level::Critical));
        assert!(admits(&spec, "app/main.rs", Level::Error));
        assert!(admits(&spec, "app/main.rs", Level::Warn));
        assert!(!admits(&spec, "app/main.rs", Level::Info));
        assert!(!admits(&spec, "app/main.rs", Level::Debug));
    }

    #[test]
    fn test_empty_spec_defaults_to_info() {
        let spec = FilterSpec::log_levels("");
        assert_eq!(spec, FilterSpec::log_levels("INFO"));
        assert!(admits(&spec, "a/b.rs", Level::Info));
        assert!(!admits(&spec, "a/b.rs", Level::Debug));
    }

    #[test]
    fn test_none_disables_everything() {
        let spec = FilterSpec::log_levels("NONE");
        assert!(!admits(&spec, "a/b.rs", Level::Critical));
    }

    #[test]
    fn test_pattern_overrides_global() {
        let spec = FilterSpec::log_levels("foo.go=DEBUG,WARN");
        assert!(admits(&spec, "pkg/foo.go", Level::Info));
        assert!(!admits(&spec, "pkg/bar.go", Level::Info));
    }

    #[test]
    fn test_global_is_last_regardless_of_position() {
        let spec = FilterSpec::log_levels("WARN,foo.go=DEBUG");
        let filters = spec.filters();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].pattern(), "foo.go");
        assert!(filters[1].is_global());
        assert!(admits(&spec, "pkg/foo.go", Level::Debug));
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        let spec = FilterSpec::log_levels("net*.rs=ERROR,network.rs=DEBUG");
        assert!(!admits(&spec, "src/network.rs", Level::Info));
    }

    #[test]
    fn test_parent_directory_pattern() {
        let spec = FilterSpec::log_levels("core/*.rs=DEBUG,ERROR");
        assert!(admits(&spec, "core/filter.rs", Level::Debug));
        assert!(!admits(&spec, "app/filter.rs", Level::Debug));
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let spec = FilterSpec::log_levels("*.rs=DEBUG,NONE");
        // Matched via the bare filename, never via "core/x.rs" as a whole.
        assert!(admits(&spec, "core/x.rs", Level::Debug));
        let spec = FilterSpec::log_levels("c*.rs=DEBUG,NONE");
        assert!(!admits(&spec, "core/x.rs", Level::Debug));
    }

    #[test]
    fn test_malformed_tokens_are_dropped() {
        let spec = FilterSpec::log_levels("foo.go=,BADLEVEL,DEBUG");
        assert_eq!(spec, FilterSpec::log_levels("DEBUG"));
        let spec = FilterSpec::log_levels("a=b=c,ERROR");
        assert_eq!(spec, FilterSpec::log_levels("ERROR"));
    }

    #[test]
    fn test_trace_cannot_be_selected_as_level() {
        let spec = FilterSpec::log_levels("TRACE");
        assert_eq!(spec, FilterSpec::log_levels("INFO"));
        let spec = FilterSpec::log_levels("foo.rs=trace,WARN");
        assert_eq!(spec, FilterSpec::log_levels("WARN"));
    }

    #[test]
    fn test_level_names_are_case_insensitive() {
        assert_eq!(
            FilterSpec::log_levels("foo.rs=debug,warn"),
            FilterSpec::log_levels("foo.rs=DEBUG,WARN")
        );
    }

    #[test]
    fn test_trace_depth_admission() {
        let spec = FilterSpec::trace_levels("3");
        for depth in 0..=3 {
            assert!(spec.matches("a/b.rs", depth));
        }
        assert!(!spec.matches("a/b.rs", 4));
    }

    #[test]
    fn test_trace_disabled_compiles_to_empty() {
        assert!(FilterSpec::trace_levels("").is_empty());
        assert!(FilterSpec::trace_levels("-1").is_empty());
        assert!(FilterSpec::trace_levels("nonsense").is_empty());
        assert!(!FilterSpec::trace_levels("0").is_empty());
    }

    #[test]
    fn test_trace_pattern_without_global() {
        let spec = FilterSpec::trace_levels("parser.rs=2");
        assert!(!spec.is_empty());
        assert!(spec.matches("core/parser.rs", 2));
        assert!(!spec.matches("core/lexer.rs", 0));
    }

    #[test]
    fn test_trace_pattern_can_silence_one_file() {
        let spec = FilterSpec::trace_levels("noisy.rs=-1,5");
        assert!(!spec.matches("app/noisy.rs", 0));
        assert!(spec.matches("app/quiet.rs", 5));
    }

    #[test]
    fn test_invalid_glob_never_matches() {
        let spec = FilterSpec::log_levels("[abc=DEBUG,WARN");
        assert!(spec.has_patterns());
        assert!(!admits(&spec, "a/[abc", Level::Debug));
        assert!(admits(&spec, "a/[abc", Level::Warn));
    }

    #[test]
    fn test_empty_filename_only_matches_global() {
        let spec = FilterSpec::log_levels("foo.rs=DEBUG,WARN");
        assert!(!admits(&spec, "", Level::Info));
        assert!(admits(&spec, "", Level::Warn));
    }

    #[test]
    fn test_has_patterns() {
        assert!(!FilterSpec::log_levels("DEBUG").has_patterns());
        assert!(FilterSpec::log_levels("x.rs=DEBUG").has_patterns());
    }
}
