//! Entity name normalization
//!
//! Two phrases that normalize to the same string become the same graph
//! node; this is the only deduplication the graph performs.

/// Canonicalize a phrase into an entity identifier.
///
/// Characters other than letters, ASCII digits and whitespace are removed
/// (so `½`, `²` and `Ⅻ` are dropped), whitespace runs become a single
/// underscore, and leading/trailing separators are trimmed. Existing underscores are treated as separators,
/// so the function is idempotent. No case folding happens here.
///
/// ```
/// use scikg_extractor::normalize;
///
/// assert_eq!(normalize("  the model...  "), "the_model");
/// assert_eq!(normalize(&normalize("bone  density")), "bone_density");
/// ```
pub fn normalize(phrase: &str) -> String {
    let cleaned: String = phrase
        .chars()
        .filter_map(|c| match c {
            '_' => Some(' '),
            c if is_letter(c) || c.is_ascii_digit() || c.is_whitespace() => Some(c),
            _ => None,
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Alphabetic but not numeric, which drops letter-numbers such as `Ⅻ`
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

/// Number of underscore-separated tokens in a normalized identifier
pub fn token_count(id: &str) -> usize {
    if id.is_empty() {
        0
    } else {
        id.split('_').count()
    }
}
