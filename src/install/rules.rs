//! `install.cfg` line grammar.
//!
//! ```text
//! * comment
//! # comment
//! - a.txt, b.txt     exclude these files from the rules that follow
//! + a.txt            re-include
//! bin  +out/$d/ win  parent directory, destination template, optional suffix
//! ```

/// Iterator over the tokens of a line; tokens are separated by commas
/// and/or whitespace.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Tokenize `text`
pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let trimmed = self
            .rest
            .trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let end = trimmed
            .find(|c: char| c.is_whitespace() || c == ',')
            .unwrap_or(trimmed.len());
        let (token, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

/// True if the list names `file` (ASCII case-insensitive) or contains `*`
pub fn list_contains(list: &str, file: &str) -> bool {
    tokens(list).any(|t| t == "*" || t.eq_ignore_ascii_case(file))
}

/// One install rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<'a> {
    /// Parent directory name the source must live in
    pub parent: &'a str,
    /// Destination template; a leading `+` makes it relative to the install root
    pub target: &'a str,
    /// Inserted before a trailing `.exe` in the file name
    pub suffix: Option<&'a str>,
}

/// Classification of one configuration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine<'a> {
    Blank,
    Comment,
    /// `-` list: files excluded from subsequent rules
    Exclude(&'a str),
    /// `+` list: files re-included
    Include(&'a str),
    Rule(Rule<'a>),
}

/// Classify a single line
pub fn parse_line(line: &str) -> ConfigLine<'_> {
    let line = line.trim_start();
    if let Some(list) = line.strip_prefix('-') {
        return ConfigLine::Exclude(list);
    }
    if let Some(list) = line.strip_prefix('+') {
        return ConfigLine::Include(list);
    }
    if line.starts_with('*') || line.starts_with('#') {
        return ConfigLine::Comment;
    }

    let mut parts = tokens(line);
    match parts.next() {
        None => ConfigLine::Blank,
        Some(parent) => ConfigLine::Rule(Rule {
            parent,
            target: parts.next().unwrap_or(""),
            suffix: parts.next(),
        }),
    }
}

/// The rules that apply to `file` in directory `parent`, in file order,
/// honouring `-`/`+` skip scopes.
pub fn matching_rules<'a>(config: &'a str, parent: &str, file: &str) -> Vec<Rule<'a>> {
    let mut skip = false;
    let mut matched = Vec::new();

    for (number, line) in config.lines().enumerate() {
        match parse_line(line) {
            ConfigLine::Exclude(list) if list_contains(list, file) => {
                tracing::debug!(line = number + 1, file, "excluded");
                skip = true;
            }
            ConfigLine::Include(list) if list_contains(list, file) => {
                tracing::debug!(line = number + 1, file, "re-included");
                skip = false;
            }
            ConfigLine::Rule(rule) if !skip && rule.parent.eq_ignore_ascii_case(parent) => {
                tracing::debug!(line = number + 1, target = rule.target, "rule matches");
                matched.push(rule);
            }
            _ => {}
        }
    }
    matched
}
