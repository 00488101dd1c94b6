//! Caller location resolution
//!
//! Emission methods are `#[track_caller]`, which yields the location of the
//! call into this crate. When a logger is configured with an additional
//! caller skip, the stack is captured and walked outward from that location
//! by the requested number of frames, so helpers that wrap the logger can
//! report their own caller instead of themselves.

use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerLocation {
    pub file: String,
    pub line: u32,
}

impl CallerLocation {
    fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
        }
    }

    fn is_same_site(&self, location: &Location<'_>) -> bool {
        self.line == location.line() && Path::new(&self.file).ends_with(location.file())
    }
}

impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Resolve the location to report for a record
///
/// Falls back to `call_site` when the stack cannot be symbolized or is
/// shallower than requested.
pub(crate) fn resolve(call_site: &Location<'_>, additional_skip: usize) -> CallerLocation {
    if additional_skip == 0 {
        return CallerLocation::from_location(call_site);
    }

    let rendered = format!("{:#}", Backtrace::force_capture());
    let frames = frame_locations(&rendered);
    let Some(idx) = frames.iter().position(|frame| frame.is_same_site(call_site)) else {
        return CallerLocation::from_location(call_site);
    };
    let Some(target) = frames.get(idx + additional_skip) else {
        return CallerLocation::from_location(call_site);
    };

    // Backtraces carry absolute paths; report the form `Location::file()` uses
    let file = source_root(&frames[idx].file, call_site.file())
        .and_then(|root| Path::new(&target.file).strip_prefix(root).ok())
        .map(|relative| relative.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.file.clone());
    CallerLocation {
        file,
        line: target.line,
    }
}

/// Directory that `relative` is resolved against to give `absolute`
fn source_root<'a>(absolute: &'a str, relative: &str) -> Option<&'a Path> {
    let depth = Path::new(relative).components().count();
    let mut root = Path::new(absolute);
    for _ in 0..depth {
        root = root.parent()?;
    }
    Some(root)
}

/// Source locations of a rendered backtrace, innermost first
fn frame_locations(rendered: &str) -> Vec<CallerLocation> {
    rendered
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix("at "))
        .filter_map(parse_location)
        .collect()
}

/// Parse `path:line:column`
fn parse_location(text: &str) -> Option<CallerLocation> {
    let mut parts = text.trim().rsplitn(3, ':');
    let _column = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let file = parts.next()?;
    Some(CallerLocation {
        file: file.to_string(),
        line,
    })
}
