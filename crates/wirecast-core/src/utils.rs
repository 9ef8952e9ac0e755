/// Check that `s` is a plain identifier: `[A-Za-z_][A-Za-z0-9_]*`.
///
/// # Examples
/// ```
/// use wirecast_core::utils::is_identifier;
/// assert!(is_identifier("thing_nested"));
/// assert!(!is_identifier("3d"));
/// assert!(!is_identifier(""));
/// ```
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Convert snake_case, kebab-case or camelCase to UPPER_SNAKE_CASE.
///
/// Used for union key constants.
///
/// # Examples
/// ```
/// use wirecast_core::utils::to_upper_snake_case;
/// assert_eq!(to_upper_snake_case("global_any_of"), "GLOBAL_ANY_OF");
/// assert_eq!(to_upper_snake_case("fooBar"), "FOO_BAR");
/// assert_eq!(to_upper_snake_case("THING"), "THING");  // idempotent
/// ```
pub fn to_upper_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if matches!(c, '_' | '-' | '.') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !result.ends_with('_') {
            result.push('_');
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        result.push(c.to_ascii_uppercase());
    }
    result
}
