//! Naming conventions for overloaded entry points.
//!
//! Overloads carry their parameter typing in a name suffix (`glUniform4uiv`,
//! `glColor3fv`). Two matchers live here:
//!
//! - [`is_unsigned_name`] answers whether a name claims unsigned parameters.
//! - [`split_overload`] separates the logical stem from the element type the
//!   suffix encodes, dropping the count, `u` and `v` markers.
//!
//! Both patterns are compiled once, on first use.

use once_cell::sync::Lazy;
use regex::Regex;

/// The unsigned-naming convention. Searched, not anchored: any `u` followed by
/// `d`, `f`, `i`, `s` or `b` after the first character marks the name.
pub const UNSIGNED_NAME_PATTERN: &str = ".+(u[dfisb]v?)";

/// Overload type suffixes: a vector form (`fv`, `uiv`, `3i64v`) or a sized
/// scalar form (`3f`, `1ui`). Group 1 is the stem, group 2 or 3 the element.
const OVERLOAD_SUFFIX_PATTERN: &str =
    r"^(.+?)(?:[1-4]?u?(i64|[bsifd])v|[1-4]u?(i64|[bsifd]))$";

static UNSIGNED_NAME: Lazy<Regex> = Lazy::new(|| compile(UNSIGNED_NAME_PATTERN));

static OVERLOAD_SUFFIX: Lazy<Regex> = Lazy::new(|| compile(OVERLOAD_SUFFIX_PATTERN));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("naming pattern is a valid regex")
}

/// Returns true if `name` follows the unsigned-naming convention.
pub fn is_unsigned_name(name: &str) -> bool {
    UNSIGNED_NAME.is_match(name)
}

/// An overload name split into its stem and element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverloadName<'a> {
    /// The name without its type suffix.
    pub stem: &'a str,
    /// The element type letter(s) of the suffix, with signedness dropped
    /// (`i` for both `iv` and `uiv`). `None` for names without a suffix.
    pub element: Option<&'a str>,
}

impl OverloadName<'_> {
    /// Returns true if both names can denote the same function: equal stems,
    /// and equal element types when both carry one.
    pub fn is_compatible(&self, other: &OverloadName<'_>) -> bool {
        self.stem == other.stem
            && match (self.element, other.element) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }
}

/// Splits `name` into stem and element type.
///
/// Names without a recognised suffix are their own stem.
pub fn split_overload(name: &str) -> OverloadName<'_> {
    let Some(caps) = OVERLOAD_SUFFIX.captures(name) else {
        return OverloadName { stem: name, element: None };
    };
    OverloadName {
        stem: caps.get(1).map_or(name, |m| m.as_str()),
        element: caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str()),
    }
}

/// Returns `name` without its overload type suffix.
pub fn base_name(name: &str) -> &str {
    split_overload(name).stem
}
