use crate::domain::models::MatchMode;
use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use log::debug;
use regex::Regex;

/// A pattern compiled once per run, applied to bare entry names.
#[derive(Debug)]
pub enum EntryMatcher {
    /// No pattern given: every entry matches.
    Any,
    Wildcard {
        glob: GlobMatcher,
        /// Pattern starts with `.`, so hidden entries are eligible.
        matches_hidden: bool,
    },
    Regex(Regex),
}

impl EntryMatcher {
    pub fn compile(pattern: Option<&str>, mode: MatchMode) -> Result<Self> {
        let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
            debug!("No pattern given, matching every entry");
            return Ok(EntryMatcher::Any);
        };

        match mode {
            MatchMode::Wildcard => {
                let glob = Glob::new(pattern)
                    .with_context(|| format!("Invalid wildcard pattern '{pattern}'"))?
                    .compile_matcher();
                Ok(EntryMatcher::Wildcard {
                    glob,
                    matches_hidden: pattern.starts_with('.'),
                })
            }
            MatchMode::BasicRegex => {
                let translated = basic_to_extended(pattern);
                debug!("Translated basic regex '{pattern}' to '{translated}'");
                let regex = Regex::new(&translated)
                    .with_context(|| format!("Invalid basic regex '{pattern}'"))?;
                Ok(EntryMatcher::Regex(regex))
            }
            MatchMode::ExtendedRegex => {
                let regex = Regex::new(pattern)
                    .with_context(|| format!("Invalid extended regex '{pattern}'"))?;
                Ok(EntryMatcher::Regex(regex))
            }
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        match self {
            EntryMatcher::Any => true,
            EntryMatcher::Wildcard {
                glob,
                matches_hidden,
            } => {
                // fnmatch hidden-file rule: a leading dot is only matched
                // by a pattern that spells it out.
                if name.starts_with('.') && !matches_hidden {
                    return false;
                }
                glob.is_match(name)
            }
            // Unanchored search, same as POSIX regexec.
            EntryMatcher::Regex(regex) => regex.is_match(name),
        }
    }
}

/// Rewrites a basic (BRE) pattern into the extended dialect `regex` speaks.
///
/// In a basic regex `+ ? | ( ) { }` are ordinary characters and their
/// backslashed forms are the operators; extended regexes have it the other
/// way around, so both sets are swapped here.
fn basic_to_extended(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ ('(' | ')' | '{' | '}' | '|' | '+' | '?')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                // Dangling backslash: keep it and let compilation report it.
                None => out.push('\\'),
            },
            '(' | ')' | '{' | '}' | '|' | '+' | '?' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}
