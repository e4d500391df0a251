// rlog - macros.rs
//
// Formatted logging macros. Unlike the plain functions they also record
// the enclosing function, which shows up in the caller info segment.

/// Path of the enclosing function, e.g. `my_crate::net::connect`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __rlog_fn() {}
        fn __rlog_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::caller::clean_function_name(__rlog_type_name_of(__rlog_fn))
    }};
}

/// Log at DEBUG with `format!` syntax.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::app::global::__log(
            $crate::Level::Debug,
            $crate::function_name!(),
            ::std::format_args!($($arg)+),
        )
    };
}

/// Log at INFO with `format!` syntax.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::app::global::__log(
            $crate::Level::Info,
            $crate::function_name!(),
            ::std::format_args!($($arg)+),
        )
    };
}

/// Log at WARN with `format!` syntax.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::app::global::__log(
            $crate::Level::Warn,
            $crate::function_name!(),
            ::std::format_args!($($arg)+),
        )
    };
}

/// Log at ERROR with `format!` syntax.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::app::global::__log(
            $crate::Level::Error,
            $crate::function_name!(),
            ::std::format_args!($($arg)+),
        )
    };
}

/// Log at CRITICAL with `format!` syntax.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::app::global::__log(
            $crate::Level::Critical,
            $crate::function_name!(),
            ::std::format_args!($($arg)+),
        )
    };
}

/// Log a trace message at a numeric depth: `trace!(2, "step {}", n)`.
#[macro_export]
macro_rules! trace {
    ($depth:expr, $($arg:tt)+) => {
        $crate::app::global::__trace(
            $depth,
            $crate::function_name!(),
            ::std::format_args!($($arg)+),
        )
    };
}
