//! Next-revision resolution from existing release tags.
//!
//! Release tags look like `<project>-r<rev>` and pre-release tags like
//! `<project>-r<rev><qualifier><subrev>`. Release numbers never decrease, and
//! re-tagging the current maximum is only allowed on the day it was made.

use chrono::{DateTime, Utc};

use crate::domain::{BranchContext, ReleaseVersion, Tag, TagPattern};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;

const SECONDS_PER_DAY: i64 = 86_400;

/// Outcome of resolving the next revision
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub tag: Tag,
    pub version: ReleaseVersion,
    pub tag_name: String,
    pub branch: String,
    /// The revision re-uses today's latest tag instead of creating a new one
    pub re_release: bool,
}

/// A candidate with its zero placeholders filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub tag: Tag,
    /// The highest existing value the candidate was checked against
    /// (`rev` for releases, `subrev` for pre-releases)
    pub latest: u32,
}

impl Assignment {
    /// True when the assigned value equals the existing maximum
    pub fn is_re_release(&self) -> bool {
        let value = if self.tag.is_release() {
            self.tag.rev
        } else {
            self.tag.subrev
        };
        value == self.latest
    }
}

/// Parse the revision part of each tag line, skipping lines that do not
/// belong to the project or do not decompose cleanly.
pub fn scan_tags<S: AsRef<str>>(pattern: &TagPattern, lines: &[S]) -> Vec<Tag> {
    lines
        .iter()
        .filter_map(|line| {
            let line = line.as_ref().trim_end();
            let revision = pattern.strip(line)?;
            match Tag::parse(revision) {
                Ok(tag) => Some(tag),
                Err(_) => {
                    tracing::debug!(tag = line, "skipping tag with unrecognised revision");
                    None
                }
            }
        })
        .collect()
}

/// Highest `rev` among release (qualifier-less) tags, 0 if none
pub fn max_release_rev(tags: &[Tag]) -> u32 {
    tags.iter()
        .filter(|t| t.is_release())
        .map(|t| t.rev)
        .max()
        .unwrap_or(0)
}

/// Highest `subrev` among tags sharing `rev` and `qualifier`, 0 if none
pub fn max_subrev(tags: &[Tag], rev: u32, qualifier: &str) -> u32 {
    tags.iter()
        .filter(|t| t.rev == rev && t.qualifier == qualifier)
        .map(|t| t.subrev)
        .max()
        .unwrap_or(0)
}

/// Fill in auto components of `candidate` and enforce monotonicity.
pub fn assign_revision(mut candidate: Tag, existing: &[Tag]) -> Result<Assignment> {
    let max_rev = max_release_rev(existing);
    if candidate.rev == 0 {
        candidate.rev = max_rev
            .checked_add(1)
            .ok_or_else(|| ReleaseError::exhausted(max_rev.to_string()))?;
    }

    if candidate.is_release() {
        if candidate.rev < max_rev {
            return Err(ReleaseError::backwards(
                candidate.to_string(),
                max_rev.to_string(),
            ));
        }
        return Ok(Assignment {
            tag: candidate,
            latest: max_rev,
        });
    }

    let max_sub = max_subrev(existing, candidate.rev, &candidate.qualifier);
    if candidate.subrev == 0 {
        candidate.subrev = match max_sub.checked_add(1) {
            Some(next) => next,
            None => {
                let latest = Tag::new(candidate.rev, candidate.qualifier.clone(), max_sub);
                return Err(ReleaseError::exhausted(latest.to_string()));
            }
        };
    }
    if candidate.subrev < max_sub {
        let latest = Tag::new(candidate.rev, candidate.qualifier.clone(), max_sub);
        return Err(ReleaseError::backwards(
            candidate.to_string(),
            latest.to_string(),
        ));
    }

    Ok(Assignment {
        tag: candidate,
        latest: max_sub,
    })
}

/// True if both epoch times fall on the same UTC calendar day
pub fn same_utc_day(a: i64, b: i64) -> bool {
    a.div_euclid(SECONDS_PER_DAY) == b.div_euclid(SECONDS_PER_DAY)
}

/// Resolves the next release revision for one project
#[derive(Debug, Clone)]
pub struct VersionResolver {
    pattern: TagPattern,
    now: DateTime<Utc>,
    release_branches: Vec<String>,
    default_qualifier: String,
}

impl VersionResolver {
    /// Create a resolver for `project`, with "now" fixed for the whole run
    pub fn new(project: &str, now: DateTime<Utc>) -> Self {
        VersionResolver {
            pattern: TagPattern::for_project(project),
            now,
            release_branches: vec!["main".to_string(), "master".to_string()],
            default_qualifier: "dev".to_string(),
        }
    }

    /// Branches whose releases may omit a qualifier
    pub fn with_release_branches(mut self, branches: Vec<String>) -> Self {
        self.release_branches = branches;
        self
    }

    /// Qualifier applied on other branches when none is requested
    pub fn with_default_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.default_qualifier = qualifier.into();
        self
    }

    pub fn pattern(&self) -> &TagPattern {
        &self.pattern
    }

    /// Resolve `revision` (possibly empty) against the tags in `repo`
    pub fn resolve<R: Repository + ?Sized>(&self, repo: &R, revision: &str) -> Result<Resolution> {
        let mut candidate = Tag::parse(revision)?;

        let branch = repo.current_branch()?.ok_or(ReleaseError::DetachedHead)?;
        let context = BranchContext::new(branch.clone(), &self.release_branches);
        if candidate.is_release() && !context.is_release_branch() {
            tracing::debug!(
                branch = %context.name,
                qualifier = %self.default_qualifier,
                "no qualifier requested off a release branch"
            );
            candidate.qualifier = self.default_qualifier.clone();
        }

        let lines = repo.list_tags(&self.pattern.glob())?;
        let existing = scan_tags(&self.pattern, &lines);
        tracing::debug!(count = existing.len(), "existing release tags");

        let assignment = assign_revision(candidate, &existing)?;
        let tag_name = self.pattern.format(&assignment.tag);

        let re_release = assignment.is_re_release();
        if re_release {
            // the existing tag may be spelled differently (case, `-` before the qualifier)
            let existing_name = lines
                .iter()
                .map(|line| line.trim_end())
                .find(|line| {
                    self.pattern
                        .strip(line)
                        .and_then(|revision| Tag::parse(revision).ok())
                        .as_ref()
                        == Some(&assignment.tag)
                })
                .unwrap_or(&tag_name);
            self.check_re_release(repo, existing_name)?;
        }

        Ok(Resolution {
            version: ReleaseVersion::new(self.now.date_naive(), assignment.tag.clone()),
            tag: assignment.tag,
            tag_name,
            branch,
            re_release,
        })
    }

    fn check_re_release<R: Repository + ?Sized>(&self, repo: &R, tag_name: &str) -> Result<()> {
        match repo.tag_commit_time(tag_name)? {
            Some(time) if same_utc_day(time, self.now.timestamp()) => {
                tracing::debug!(tag = tag_name, "same-day re-release");
                Ok(())
            }
            _ => Err(ReleaseError::re_release(tag_name)),
        }
    }
}
