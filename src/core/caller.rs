// rlog - core/caller.rs
//
// Caller attribution.
//
// Public entry points are `#[track_caller]`, so `Location::caller()` taken
// there is the user's call site. Any wrapper added between user code and
// the capture point must also be `#[track_caller]`, otherwise every line
// is attributed to the wrapper. Macros additionally capture the enclosing
// function path. Turning that raw capture into the `parent/file` form used
// for filtering and output is the job of a CallerResolver.

use std::borrow::Cow;
use std::panic::Location;

/// Raw call-site capture, taken by the public API.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    location: &'static Location<'static>,
    function: Option<&'static str>,
}

impl Caller {
    /// Capture the location of whoever called the enclosing
    /// `#[track_caller]` function.
    #[track_caller]
    pub fn here(function: Option<&'static str>) -> Self {
        Self {
            location: Location::caller(),
            function,
        }
    }

    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }

    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

/// Resolved caller information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Immediate parent directory and filename joined with `/`.
    pub module_and_file: Cow<'static, str>,
    pub line: u32,
    /// Path of the enclosing function, when the call came through a macro.
    pub function: Option<&'static str>,
}

impl CallSite {
    /// Caller info segment: `[parent/file:line (function)]`.
    pub fn render(&self) -> String {
        format!(
            "[{}:{} ({})]",
            self.module_and_file,
            self.line,
            self.function.unwrap_or("?")
        )
    }
}

/// Turns a raw capture into a CallSite.
///
/// Returning `None` means caller information is unavailable; the pipeline
/// then filters with an empty filename and prints no caller segment.
pub trait CallerResolver: Send + Sync {
    fn resolve(&self, caller: &Caller) -> Option<CallSite>;
}

/// Default resolver built on `std::panic::Location`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationResolver;

impl CallerResolver for LocationResolver {
    fn resolve(&self, caller: &Caller) -> Option<CallSite> {
        Some(CallSite {
            module_and_file: module_and_file(caller.file()),
            line: caller.line(),
            function: caller.function(),
        })
    }
}

/// Last two segments of `path`, joined with `/`.
///
/// Borrows from the static path when it already uses `/`, so the common
/// case allocates nothing.
pub fn module_and_file(path: &'static str) -> Cow<'static, str> {
    let separators: &[char] = &['/', '\\'];
    let trimmed = path.trim_end_matches(separators);
    let start = trimmed
        .rfind(separators)
        .and_then(|last| trimmed[..last].rfind(separators).map(|i| i + 1))
        .unwrap_or(0);
    let tail = &trimmed[start..];
    if tail.contains('\\') {
        Cow::Owned(tail.replace('\\', "/"))
    } else {
        Cow::Borrowed(tail)
    }
}

/// Strip the helper suffix from a `type_name` taken inside a function.
///
/// Used by `function_name!`. Closures show up as `{{closure}}` segments,
/// which are dropped so the enclosing named function is reported.
#[doc(hidden)]
pub fn clean_function_name(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::__rlog_fn").unwrap_or(raw);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}
