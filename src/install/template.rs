use std::path::{is_separator, Path, PathBuf};

use chrono::NaiveDateTime;

/// Date and time captured once per install run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// `yyyymmdd`
    pub date: String,
    /// `hhmmss`
    pub time: String,
}

impl Stamp {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Stamp {
            date: date.into(),
            time: time.into(),
        }
    }

    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Stamp {
            date: at.format("%Y%m%d").to_string(),
            time: at.format("%H%M%S").to_string(),
        }
    }

    /// Local wall-clock time
    pub fn now() -> Self {
        Stamp::from_datetime(chrono::Local::now().naive_local())
    }
}

/// Replace `$d` with the date and `$t` with the time
pub fn expand_placeholders(text: &str, stamp: &Stamp) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' {
            match chars.peek() {
                Some('d') => {
                    chars.next();
                    out.push_str(&stamp.date);
                    continue;
                }
                Some('t') => {
                    chars.next();
                    out.push_str(&stamp.time);
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}

/// Insert `suffix` before a trailing `.exe` (any case); other names are unchanged.
pub fn apply_suffix(file: &str, suffix: Option<&str>) -> String {
    const EXE: &str = ".exe";
    match suffix.filter(|s| !s.is_empty()) {
        Some(suffix) if file.len() >= EXE.len() => {
            let split = file.len() - EXE.len();
            match (file.get(..split), file.get(split..)) {
                (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(EXE) => {
                    format!("{}{}{}", stem, suffix, ext)
                }
                _ => file.to_string(),
            }
        }
        _ => file.to_string(),
    }
}

/// Join so that exactly one separator sits between `dir` and `name`
fn join_once(dir: &str, name: &str) -> String {
    let name = name.trim_start_matches(is_separator);
    if dir.is_empty() {
        return name.to_string();
    }
    if dir.ends_with(is_separator) {
        format!("{}{}", dir, name)
    } else {
        format!("{}{}{}", dir, std::path::MAIN_SEPARATOR, name)
    }
}

/// Destination for `file` under rule `target`.
///
/// A target starting with `+` is relative to `root`; any other target is
/// used as written.
pub fn destination(
    root: &Path,
    target: &str,
    file: &str,
    suffix: Option<&str>,
    stamp: &Stamp,
) -> PathBuf {
    let dir = match target.strip_prefix('+') {
        Some(rest) => join_once(&root.to_string_lossy(), rest),
        None => target.to_string(),
    };
    let dir = expand_placeholders(&dir, stamp);
    let name = apply_suffix(&expand_placeholders(file, stamp), suffix);
    PathBuf::from(join_once(&dir, &name))
}
