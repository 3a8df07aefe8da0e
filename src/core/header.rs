//! Line header templates
//!
//! A header template is literal text mixed with two-character directives.
//! Each directive is replaced by one piece of the [`CallContext`]:
//!
//! | directive | output |
//! |---|---|
//! | `%p` | call-site code address, decimal |
//! | `%F` | full source file path |
//! | `%f` | source file name without directories |
//! | `%l` | source line |
//! | `%m` | enclosing function path |
//! | `%t` | wall-clock time in the configured [`TimestampFormat`] |
//! | `%c` | category |
//! | `%L` | level name |
//! | `%%` | a literal `%` |
//!
//! Any other directive renders nothing. A lone trailing `%` ends the header.
//!
//! ```
//! use category_logger::core::header::{CallContext, HeaderTemplate};
//! use category_logger::{CallSite, TimestampFormat};
//!
//! let template = HeaderTemplate::parse("[%L] %c %f:%l ");
//! let site = CallSite::new(0, "src/db/pool.rs", 88, "db::pool::acquire");
//! let ctx = CallContext::now(site, "db", "WARN");
//! assert_eq!(template.render(&ctx, &TimestampFormat::Rfc3339), "[WARN] db pool.rs:88 ");
//! ```

use super::call_site::CallSite;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Substitution selected by the character following `%`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    ProgramCounter,
    FullPath,
    ShortFile,
    Line,
    Function,
    Time,
    Category,
    Level,
    Percent,
    /// Unrecognised directive character; renders nothing
    Unknown(char),
}

impl Directive {
    pub fn from_char(c: char) -> Self {
        match c {
            'p' => Directive::ProgramCounter,
            'F' => Directive::FullPath,
            'f' => Directive::ShortFile,
            'l' => Directive::Line,
            'm' => Directive::Function,
            't' => Directive::Time,
            'c' => Directive::Category,
            'L' => Directive::Level,
            '%' => Directive::Percent,
            other => Directive::Unknown(other),
        }
    }

    fn render_into(self, ctx: &CallContext<'_>, time_format: &TimestampFormat, out: &mut String) {
        match self {
            // Writing into a String cannot fail
            Directive::ProgramCounter => {
                let _ = write!(out, "{}", ctx.site.pc);
            }
            Directive::FullPath => out.push_str(ctx.site.file),
            Directive::ShortFile => out.push_str(ctx.site.short_file()),
            Directive::Line => {
                let _ = write!(out, "{}", ctx.site.line);
            }
            Directive::Function => out.push_str(ctx.site.function),
            Directive::Time => out.push_str(&time_format.format(&ctx.time)),
            Directive::Category => out.push_str(ctx.category),
            Directive::Level => out.push_str(ctx.level),
            Directive::Percent => out.push('%'),
            Directive::Unknown(_) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Directive(Directive),
}

/// Everything a header may refer to, captured once per log call
#[derive(Debug, Clone)]
pub struct CallContext<'a> {
    pub site: CallSite,
    pub time: DateTime<Local>,
    pub category: &'a str,
    pub level: &'a str,
}

impl<'a> CallContext<'a> {
    pub fn new(site: CallSite, time: DateTime<Local>, category: &'a str, level: &'a str) -> Self {
        Self {
            site,
            time,
            category,
            level,
        }
    }

    /// Context stamped with the current local time
    pub fn now(site: CallSite, category: &'a str, level: &'a str) -> Self {
        Self::new(site, Local::now(), category, level)
    }
}

/// A parsed header template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl HeaderTemplate {
    pub fn parse(template: impl Into<String>) -> Self {
        let source = template.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            // Trailing '%' ends the template
            let Some(next) = chars.next() else {
                break;
            };
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Directive(Directive::from_char(next)));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { source, segments }
    }

    /// The template text as given
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether rendering substitutes `directive` anywhere
    pub fn uses(&self, directive: Directive) -> bool {
        self.segments
            .iter()
            .any(|segment| *segment == Segment::Directive(directive))
    }

    pub fn render(&self, ctx: &CallContext<'_>, time_format: &TimestampFormat) -> String {
        let mut out = String::new();
        self.render_into(ctx, time_format, &mut out);
        out
    }

    /// Append the rendered header to `out`
    pub fn render_into(&self, ctx: &CallContext<'_>, time_format: &TimestampFormat, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Directive(directive) => directive.render_into(ctx, time_format, out),
            }
        }
    }
}

impl From<&str> for HeaderTemplate {
    fn from(template: &str) -> Self {
        Self::parse(template)
    }
}

impl From<String> for HeaderTemplate {
    fn from(template: String) -> Self {
        Self::parse(template)
    }
}
