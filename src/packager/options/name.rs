//! Package-name template resolution.
//!
//! Templates carry three placeholders: `%a%` (app name), `%v%` (app version)
//! and `%p%` (platform identifier). Version strings may carry a pre-release
//! flavor after the first `-`; only the base version appears in package
//! names, the flavor is carried in context for consumers that want it.

use crate::packager::error::{Error, Result};
use std::sync::OnceLock;

/// Splits a version string into its base version and optional flavor tag.
///
/// `"1.2.0-beta"` → `("1.2.0", Some("beta"))`; `"1.2.0"` → `("1.2.0", None)`.
pub fn split_version(version: &str) -> (&str, Option<&str>) {
    match version.split_once('-') {
        Some((base, flavor)) => (base, Some(flavor)),
        None => (version, None),
    }
}

/// Resolves a package-name template into a concrete output base name.
///
/// The version placeholder is substituted with the base version only.
///
/// # Errors
///
/// [`Error::UnresolvedPlaceholder`] if any `%…%` token survives
/// substitution; unresolved placeholders must never reach output paths.
pub fn resolve_package_name(
    template: &str,
    app_name: &str,
    app_version: &str,
    platform: &str,
) -> Result<String> {
    let (base_version, _flavor) = split_version(app_version);

    let name = template
        .replace("%a%", app_name)
        .replace("%v%", base_version)
        .replace("%p%", platform);

    static PLACEHOLDER: OnceLock<regex::Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER
        .get_or_init(|| regex::Regex::new(r"%[A-Za-z_]+%").expect("valid placeholder pattern"));

    if let Some(m) = placeholder.find(&name) {
        return Err(Error::UnresolvedPlaceholder {
            placeholder: m.as_str().to_string(),
            name,
        });
    }

    Ok(name)
}
