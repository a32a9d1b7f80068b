//! Lexers for identifiers found in the game's data dump.
//!
//! The dump writes compound names in UpperCamel (`CopperImpure`,
//! `MaintenanceT2`), tags product types as `<Type>ProductProto` and wraps
//! product ids as `Product_<Name>` or `Product_Virtual_<Name>`. The planner
//! wants lowercase, hyphen-joined ids instead (`copper-impure`).

use regex::Regex;
use std::sync::LazyLock;

/// One token of a compound name: a capitalized word, a tier marker (optional
/// capital, a digit, optional capital) or an acronym of two or more capitals.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+|[A-Z]?[0-9][A-Z]?|[A-Z]{2,}").unwrap());

/// `<Type>ProductProto`, anchored at the start.
static PRODUCT_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<kind>[A-Z][a-z0-9]+)ProductProto").unwrap());

/// `Product_[Virtual_]<Name>`, anchored at the start.
static PRODUCT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Product_(?P<virtual>Virtual_)?(?P<name>[A-Za-z0-9]+)").unwrap()
});

// ===========================================================================
// Compound names
// ===========================================================================

/// Split a compound name into its tokens, in order of appearance.
///
/// Characters that belong to no token (underscores, lowercase-initial runs,
/// punctuation) are dropped.
pub fn tokens(name: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(name).map(|m| m.as_str()).collect()
}

/// Translate a compound name into a planner id.
///
/// Returns an empty string when `name` contains no token at all; callers
/// treat that as bad data and skip the entity.
///
/// ```
/// use cod2lab_core::naming::translate;
///
/// assert_eq!(translate("CopperImpure"), "copper-impure");
/// assert_eq!(translate("MaintenanceT2"), "maintenance-t2");
/// ```
pub fn translate(name: &str) -> String {
    tokens(name)
        .iter()
        .map(|t| t.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

// ===========================================================================
// Product tags
// ===========================================================================

/// Extract the type tag from a `<Type>ProductProto` string.
pub fn product_type_tag(type_name: &str) -> Option<&str> {
    PRODUCT_TYPE_RE
        .captures(type_name)
        .and_then(|caps| caps.name("kind"))
        .map(|m| m.as_str())
}

/// A product id with its `Product_` wrapper removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappedId<'a> {
    pub name: &'a str,
    pub is_virtual: bool,
}

/// Unwrap a `Product_<Name>` / `Product_Virtual_<Name>` id.
pub fn unwrap_product_id(id: &str) -> Option<WrappedId<'_>> {
    let caps = PRODUCT_ID_RE.captures(id)?;
    Some(WrappedId {
        name: caps.name("name")?.as_str(),
        is_virtual: caps.name("virtual").is_some(),
    })
}

// ===========================================================================
// Tests
// ===========================================================================
