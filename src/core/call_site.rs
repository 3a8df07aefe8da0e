//! Call-site capture
//!
//! A [`CallSite`] identifies the user code that issued a log call:
//!
//! - `#[track_caller]` entry points on [`Logger`](super::Logger) receive the
//!   caller's [`Location`], which carries file and line. The enclosing
//!   function is looked up in the debug info on first use and cached per
//!   location; without debug info it stays empty.
//! - The crate's macros build a complete [`CallSite`] with
//!   [`call_site!`](crate::call_site), including the enclosing function name.
//!
//! Both arrive as an [`Origin`], and the logger's [`FrameCapture`] turns it into
//! the final [`CallSite`]. Tests swap in [`FixedFrame`] for deterministic output.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::OnceLock;

/// Caller information rendered by the `%p %F %f %l %m` header directives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Code address identifying the call site
    pub pc: usize,
    pub file: &'static str,
    pub line: u32,
    /// Fully-qualified function path, empty when unknown
    pub function: &'static str,
}

impl CallSite {
    pub const fn new(pc: usize, file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            pc,
            file,
            line,
            function,
        }
    }

    /// Build a call site from a `#[track_caller]` location.
    ///
    /// The function name is unknown here, and the address of the
    /// per-call-site location record stands in for the program counter.
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            pc: location as *const Location<'static> as usize,
            file: location.file(),
            line: location.line(),
            function: "",
        }
    }

    /// File name with leading directories stripped
    pub fn short_file(&self) -> &'static str {
        short_file_name(self.file)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Substring after the last `/`
pub fn short_file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// What an entry point knows about its caller
#[derive(Debug, Clone, Copy)]
pub enum Origin {
    /// Location forwarded through `#[track_caller]`
    Caller(&'static Location<'static>),
    /// Call site assembled by a macro at the user's code
    Site(CallSite),
}

/// Resolves an [`Origin`] into the [`CallSite`] rendered into a header
pub trait FrameCapture: Send + Sync {
    /// File, line and address of the call. The function name may be empty.
    fn capture(&self, origin: Origin) -> CallSite;

    /// Enclosing function of a `#[track_caller]` location, empty when unknown.
    ///
    /// Only consulted when a header renders `%m`.
    fn function_name(&self, location: &'static Location<'static>) -> &'static str {
        enclosing_function(location)
    }
}

/// Default capture: uses whatever the entry point recorded
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceFrames;

impl FrameCapture for SourceFrames {
    fn capture(&self, origin: Origin) -> CallSite {
        match origin {
            Origin::Caller(location) => CallSite::from_location(location),
            Origin::Site(site) => site,
        }
    }
}

/// Always reports the same call site
#[derive(Debug, Clone, Copy)]
pub struct FixedFrame(pub CallSite);

impl FrameCapture for FixedFrame {
    fn capture(&self, _origin: Origin) -> CallSite {
        self.0
    }

    fn function_name(&self, _location: &'static Location<'static>) -> &'static str {
        self.0.function
    }
}

/// Fully-qualified path of the function containing `location`.
///
/// Walks the current stack for the frame whose debug info points at the
/// location's file and line. Results, including misses, are cached for the
/// life of the process, one entry per call site.
pub fn enclosing_function(location: &'static Location<'static>) -> &'static str {
    let key = location as *const Location<'static> as usize;
    if let Some(name) = function_names().read().get(&key) {
        return name;
    }

    let name = match resolve_function(location) {
        Some(name) => &*Box::leak(name.into_boxed_str()),
        None => "",
    };
    *function_names().write().entry(key).or_insert(name)
}

fn function_names() -> &'static RwLock<HashMap<usize, &'static str>> {
    static NAMES: OnceLock<RwLock<HashMap<usize, &'static str>>> = OnceLock::new();
    NAMES.get_or_init(Default::default)
}

fn resolve_function(location: &Location<'_>) -> Option<String> {
    let target = Path::new(location.file());
    let mut found = None;

    backtrace::trace(|frame| {
        // Inlined frames resolve to several symbols, innermost first
        backtrace::resolve_frame(frame, |symbol| {
            if found.is_some() || symbol.lineno() != Some(location.line()) {
                return;
            }
            if symbol.filename().is_some_and(|file| file.ends_with(target)) {
                found = symbol.name().map(|name| format!("{:#}", name));
            }
        });
        found.is_none()
    });

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_file_name() {
        assert_eq!(short_file_name("src/core/logger.rs"), "logger.rs");
        assert_eq!(short_file_name("/abs/path/main.rs"), "main.rs");
        assert_eq!(short_file_name("main.rs"), "main.rs");
        assert_eq!(short_file_name("dir/"), "");
    }

    #[test]
    fn test_source_frames_from_caller() {
        let location = Location::caller();
        let site = SourceFrames.capture(Origin::Caller(location));
        assert_eq!(site.file, location.file());
        assert_eq!(site.line, location.line());
        assert_eq!(site.function, "");
        assert_ne!(site.pc, 0);
    }

    #[test]
    fn test_source_frames_passes_site_through() {
        let site = CallSite::new(42, "src/app.rs", 7, "app::run");
        assert_eq!(SourceFrames.capture(Origin::Site(site)), site);
    }

    #[test]
    fn test_enclosing_function_from_debug_info() {
        let name = SourceFrames.function_name(Location::caller());
        assert_eq!(
            name,
            "category_logger::core::call_site::tests::test_enclosing_function_from_debug_info"
        );
    }

    #[test]
    fn test_enclosing_function_is_cached() {
        let location = Location::caller();
        let first = enclosing_function(location);
        assert!(std::ptr::eq(first, enclosing_function(location)));
    }

    #[test]
    fn test_fixed_frame_function_name() {
        let fixed = FixedFrame(CallSite::new(1, "fixed.rs", 1, "fixed"));
        assert_eq!(fixed.function_name(Location::caller()), "fixed");
    }

    #[test]
    fn test_fixed_frame_ignores_origin() {
        let fixed = CallSite::new(1, "fixed.rs", 1, "fixed");
        let other = CallSite::new(2, "other.rs", 2, "other");
        assert_eq!(FixedFrame(fixed).capture(Origin::Site(other)), fixed);
    }

    #[test]
    fn test_display() {
        let site = CallSite::new(0, "src/app.rs", 12, "");
        assert_eq!(site.to_string(), "src/app.rs:12");
        assert_eq!(site.short_file(), "app.rs");
    }
}
