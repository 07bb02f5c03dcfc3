//! Keys that are never turned into instance-derived props
//!
//! The fixed set covers names the wrapping component owns itself (`args`,
//! `attach`, ...) and scene-graph bookkeeping (`parent`, `children`, `uuid`).
//! Names shaped like `isMesh` are capability markers, not settable state.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

/// Names excluded regardless of configuration
pub const FIXED_EXCLUDED_KEYS: [&str; 10] = [
    "type",
    "args",
    "attach",
    "manual",
    "makeDefault",
    "id",
    "children",
    "parent",
    "uuid",
    "name",
];

/// `is` followed by an uppercase letter in any script, e.g. `isMesh`, `isÉtat`
static MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^is\p{Lu}").expect("marker pattern is a valid regex"));

/// Whether a name has the shape of a capability marker
pub fn is_marker_name(name: &str) -> bool {
    MARKER_PATTERN.is_match(name)
}

/// Denylist applied to the instance-derived props contribution
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    keys: FxHashSet<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusionPolicy {
    /// Policy with only the fixed keys and the marker pattern
    pub fn new() -> Self {
        Self {
            keys: FIXED_EXCLUDED_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Policy with additional keys on top of the fixed ones
    pub fn with_extra_keys<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut policy = Self::new();
        policy.keys.extend(extra.into_iter().map(Into::into));
        policy
    }

    /// Whether `name` must be skipped
    pub fn is_excluded(&self, name: &str) -> bool {
        self.keys.contains(name) || is_marker_name(name)
    }
}
