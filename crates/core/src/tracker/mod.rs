//! Tracker identity normalization.
//!
//! The cross-seed database records trackers the way its indexers report them:
//! torznab guids, bare domains, abbreviations, mixed case. Everything here
//! funnels those spellings into one [`CanonicalTracker`] code per site, or
//! reports them as unmapped so the caller can leave them out of the analysis.

mod table;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use table::{BUILTIN_TRACKERS, PREFIX_RULES};

/// Short upper-case code identifying a tracker across all of its spellings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalTracker(String);

impl CanonicalTracker {
    pub(crate) fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalTracker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lookup table from accepted spellings to canonical codes.
///
/// Built from the static mapping and inverted once, so lookups are a single
/// hash probe on the lower-cased spelling.
#[derive(Debug, Clone)]
pub struct TrackerTable {
    by_spelling: HashMap<String, CanonicalTracker>,
}

static BUILTIN: Lazy<TrackerTable> = Lazy::new(TrackerTable::builtin);

impl TrackerTable {
    /// Table containing only the built-in trackers.
    pub fn builtin() -> Self {
        let mut table = Self {
            by_spelling: HashMap::new(),
        };
        for (code, spellings) in BUILTIN_TRACKERS {
            table.insert(CanonicalTracker::new(code), spellings.iter().copied());
        }
        table
    }

    /// Extend the table with configured aliases.
    ///
    /// A key that already resolves to a tracker adds spellings to it; any
    /// other key introduces a new tracker code.
    pub fn with_aliases(mut self, aliases: &BTreeMap<String, Vec<String>>) -> Self {
        for (key, spellings) in aliases {
            let code = self
                .lookup(key)
                .unwrap_or_else(|| CanonicalTracker::new(key));
            self.insert(code, spellings.iter().map(String::as_str));
        }
        self
    }

    fn insert<'a>(&mut self, code: CanonicalTracker, spellings: impl Iterator<Item = &'a str>) {
        let own = code.as_str().to_ascii_lowercase();
        let spellings = std::iter::once(own).chain(spellings.map(|s| s.trim().to_ascii_lowercase()));
        for spelling in spellings {
            if spelling.is_empty() {
                continue;
            }
            match self.by_spelling.get(&spelling) {
                Some(existing) if *existing != code => {
                    warn!(
                        spelling = %spelling,
                        kept = %existing,
                        ignored = %code,
                        "Tracker spelling already mapped, keeping first mapping"
                    );
                }
                Some(_) => {}
                None => {
                    self.by_spelling.insert(spelling, code.clone());
                }
            }
        }
    }

    fn lookup(&self, spelling: &str) -> Option<CanonicalTracker> {
        self.by_spelling
            .get(&spelling.trim().to_ascii_lowercase())
            .cloned()
    }

    /// Map a raw tracker identifier to its canonical code.
    ///
    /// Accepts codes, site names, domains and torznab guid URLs. Returns
    /// `None` for anything not in the table; that is never an error.
    pub fn normalize(&self, raw: &str) -> Option<CanonicalTracker> {
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return None;
        }

        for (prefix, code) in PREFIX_RULES {
            let matches_prefix = cleaned
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
            if matches_prefix {
                return self.lookup(code);
            }
        }

        let host = site_of(cleaned);
        let label = host.split('.').next().unwrap_or(host);
        [cleaned, host, label]
            .into_iter()
            .find_map(|candidate| self.lookup(candidate))
    }

}

impl Default for TrackerTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

fn clean(raw: &str) -> &str {
    let cleaned = raw.trim();
    let cleaned = cleaned
        .strip_prefix("https://")
        .or_else(|| cleaned.strip_prefix("http://"))
        .unwrap_or(cleaned);
    cleaned.strip_suffix(" (API)").unwrap_or(cleaned).trim()
}

/// The site part of a raw identifier: scheme and path removed.
///
/// Used to group unmapped guids by site when reporting them.
pub fn site_of(raw: &str) -> &str {
    let cleaned = clean(raw);
    cleaned.split('/').next().unwrap_or(cleaned)
}

/// Normalize against the built-in table.
pub fn normalize(raw: &str) -> Option<CanonicalTracker> {
    BUILTIN.normalize(raw)
}
