//! Slug derivation and validation

use regex::Regex;
use std::sync::OnceLock;

/// Check that a slug is URL-safe: lowercase ASCII words joined by single
/// hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        SLUG_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());
    regex.is_match(slug)
}

/// Derive a URL-safe slug from a human name
///
/// Folds the accented characters common in Spanish names, lowercases, and
/// collapses runs of non-alphanumeric characters into single hyphens.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_hyphen = true; // suppress leading hyphen
    for c in name.chars() {
        let folded = if c.is_ascii_alphanumeric() {
            Some(c.to_ascii_lowercase())
        } else {
            fold_accent(c)
        };
        match folded {
            Some(f) => {
                out.push(f);
                last_hyphen = false;
            }
            None if !last_hyphen => {
                out.push('-');
                last_hyphen = true;
            }
            None => {}
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn fold_accent(c: char) -> Option<char> {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => Some('a'),
        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => Some('e'),
        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => Some('i'),
        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => Some('o'),
        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => Some('u'),
        'ñ' | 'Ñ' => Some('n'),
        'ç' | 'Ç' => Some('c'),
        _ => None,
    }
}
