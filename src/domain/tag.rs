use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ReleaseError, Result};

/// A release revision decoded from a tag suffix or from `-r` on the command line.
///
/// `rev` and `subrev` use 0 to mean "not given, pick the next one". An empty
/// qualifier marks a release; anything else (e.g. `dev`) is a pre-release channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub rev: u32,
    pub qualifier: String,
    pub subrev: u32,
}

fn revision_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // digits, an optional '-' before a non-empty qualifier, digits, then an optional line end
    RE.get_or_init(|| {
        Regex::new(r"^(\d*)(?:-?([A-Za-z_]+))?(\d*)\r?\n?$").expect("revision pattern is valid")
    })
}

fn parse_counter(digits: &str, text: &str) -> Result<u32> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<u32>()
        .map_err(|_| ReleaseError::invalid_revision(text))
}

impl Tag {
    /// Create a tag from its three components
    pub fn new(rev: u32, qualifier: impl Into<String>, subrev: u32) -> Self {
        Tag {
            rev,
            qualifier: qualifier.into(),
            subrev,
        }
    }

    /// Parse `<digits><letters|_><digits>`; every part may be empty.
    pub fn parse(text: &str) -> Result<Self> {
        let caps = revision_regex()
            .captures(text)
            .ok_or_else(|| ReleaseError::invalid_revision(text.trim_end()))?;

        let rev = parse_counter(caps.get(1).map_or("", |m| m.as_str()), text.trim_end())?;
        let qualifier = caps.get(2).map_or("", |m| m.as_str()).to_string();
        let subrev = parse_counter(caps.get(3).map_or("", |m| m.as_str()), text.trim_end())?;

        Ok(Tag {
            rev,
            qualifier,
            subrev,
        })
    }

    /// True for release tags (no qualifier)
    pub fn is_release(&self) -> bool {
        self.qualifier.is_empty()
    }

    /// The `<qualifier><subrev>` part, if this is a pre-release
    pub fn channel(&self) -> Option<String> {
        if self.is_release() {
            None
        } else {
            Some(format!("{}{}", self.qualifier, self.subrev))
        }
    }
}

impl FromStr for Tag {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Tag::parse(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel() {
            Some(channel) => write!(f, "{}{}", self.rev, channel),
            None => write!(f, "{}", self.rev),
        }
    }
}

/// Tag naming scheme for one project: `<project>-r<revision>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    prefix: String,
}

impl TagPattern {
    /// Pattern for the tags of `project`
    pub fn for_project(project: &str) -> Self {
        TagPattern {
            prefix: format!("{}-r", project),
        }
    }

    /// The literal prefix every tag of the project starts with
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Glob handed to `git tag -l`
    pub fn glob(&self) -> String {
        format!("{}[1-9]*", self.prefix)
    }

    /// Strip the prefix (ASCII case-insensitive), returning the revision part
    pub fn strip<'a>(&self, tag: &'a str) -> Option<&'a str> {
        let head = tag.get(..self.prefix.len())?;
        if head.eq_ignore_ascii_case(&self.prefix) {
            tag.get(self.prefix.len()..)
        } else {
            None
        }
    }

    /// Full tag name for a resolved revision
    pub fn format(&self, tag: &Tag) -> String {
        format!("{}{}", self.prefix, tag)
    }
}
