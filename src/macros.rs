//! Logging macros that record the full call site.
//!
//! The [`Logger`](crate::Logger) methods see file and line through
//! `#[track_caller]` and recover the function name from debug info. These
//! macros expand at the caller and capture the enclosing function name at
//! compile time, so `%m` works in builds without debug info too.
//!
//! # Examples
//!
//! ```no_run
//! use category_logger::{logf, logln, Logger};
//!
//! let logger = Logger::open("/var/log/app.log")?;
//! logger.set_prefix("%m [%L] ");
//!
//! let port = 8080;
//! logf!(logger, "http", "WARN", "listening on {}\n", port)?;
//! logln!(logger, "http", "ERROR", "bind failed:", port)?;
//! # Ok::<(), category_logger::LoggerError>(())
//! ```

/// Path of the enclosing function, e.g. `my_crate::server::start`.
///
/// Inside closures the path ends in `{{closure}}`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        name.strip_suffix("::__here").unwrap_or(name)
    }};
}

/// A [`CallSite`](crate::CallSite) for the place the macro is expanded.
///
/// The code address is that of a marker function local to the call site.
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __site() {}
        $crate::CallSite::new(
            __site as fn() as usize,
            ::std::file!(),
            ::std::line!(),
            $crate::function_name!(),
        )
    }};
}

/// Formatted write: `logf!(logger, category, level, "fmt", args...)`
///
/// Evaluates to `Result<usize>`.
#[macro_export]
macro_rules! logf {
    ($logger:expr, $category:expr, $level:expr, $($arg:tt)+) => {
        $logger
            .at($crate::call_site!())
            .writef($category, $level, ::std::format_args!($($arg)+))
    };
}

/// Space-joined write with trailing newline: `logln!(logger, category, level, a, b, ...)`
///
/// Evaluates to `Result<usize>`.
#[macro_export]
macro_rules! logln {
    ($logger:expr, $category:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger
            .at($crate::call_site!())
            .writeln($category, $level, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Like [`logf!`] but returns the composed line as a `String`
#[macro_export]
macro_rules! slogf {
    ($logger:expr, $category:expr, $level:expr, $($arg:tt)+) => {
        $logger
            .at($crate::call_site!())
            .sprintf($category, $level, ::std::format_args!($($arg)+))
    };
}

/// Like [`logln!`] but returns the composed line as a `String`
#[macro_export]
macro_rules! slogln {
    ($logger:expr, $category:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger
            .at($crate::call_site!())
            .sprintln($category, $level, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Logger;
    use tempfile::TempDir;

    fn logger(dir: &TempDir) -> Logger {
        Logger::open(dir.path().join("macros.log")).expect("Failed to open")
    }

    #[test]
    fn test_function_name() {
        assert_eq!(
            function_name!(),
            "category_logger::macros::tests::test_function_name"
        );
    }

    #[test]
    fn test_call_site() {
        let site = call_site!();
        assert_eq!(site.file, file!());
        assert_eq!(site.line, line!() - 2);
        assert_eq!(site.function, "category_logger::macros::tests::test_call_site");
        assert_ne!(site.pc, 0);
    }

    #[test]
    fn test_slogf_macro() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let logger = logger(&temp_dir);
        logger.set_prefix("%m %f [%L] ");

        let out = slogf!(logger, "app", "ERROR", "code {}", 500);
        assert_eq!(
            out,
            "category_logger::macros::tests::test_slogf_macro macros.rs [ERROR] code 500"
        );
    }

    #[test]
    fn test_slogln_macro() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let logger = logger(&temp_dir);
        logger.set_prefix("[%c] ");

        assert_eq!(slogln!(logger, "app", "WARN", "a", 1, 2.5), "[app] a 1 2.5\n");
        assert_eq!(slogln!(logger, "app", "WARN"), "[app] \n");
        assert_eq!(slogln!(logger, "app", "DEBUG", "filtered"), "");
    }

    #[test]
    fn test_logf_and_logln_macros() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let logger = logger(&temp_dir);
        logger.set_prefix("%L ");

        logf!(logger, "app", "ERROR", "first {}\n", 1).expect("Failed to write");
        logln!(logger, "app", "FATAL", "second", 2).expect("Failed to write");
        let skipped = logf!(logger, "app", "INFO", "skipped\n").expect("filtered");
        assert_eq!(skipped, 0);

        let content = std::fs::read_to_string(logger.path()).expect("Failed to read log file");
        assert_eq!(content, "ERROR first 1\nFATAL second 2\n");
    }
}
