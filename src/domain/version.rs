use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::tag::Tag;

/// Date-based release version: `<year>.<month>.<day>.<rev>[-<qualifier><subrev>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    date: NaiveDate,
    tag: Tag,
}

impl ReleaseVersion {
    /// Build the version for a resolved tag released on `date`
    pub fn new(date: NaiveDate, tag: Tag) -> Self {
        ReleaseVersion { date, tag }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Purely numeric form used for resource and assembly versions
    pub fn numeric(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.tag.rev
        )
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.numeric())?;
        if let Some(channel) = self.tag.channel() {
            write!(f, "-{}", channel)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_release_version_display() {
        let v = ReleaseVersion::new(date(2024, 3, 5), Tag::new(6, "", 0));
        assert_eq!(v.to_string(), "2024.3.5.6");
    }

    #[test]
    fn test_prerelease_version_display() {
        let v = ReleaseVersion::new(date(2024, 11, 21), Tag::new(7, "dev", 3));
        assert_eq!(v.to_string(), "2024.11.21.7-dev3");
        assert_eq!(v.numeric(), "2024.11.21.7");
    }

    #[test]
    fn test_year() {
        let v = ReleaseVersion::new(date(2025, 1, 1), Tag::new(1, "", 0));
        assert_eq!(v.year(), 2025);
    }
}
