//! Identifier case conversion.

/// `"on click"` -> `"onClick"`, `"box-item"` -> `"boxItem"`.
///
/// Every run of spaces, dashes or underscores is dropped and the character
/// after it is uppercased.
pub fn camelize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut upper_next = false;

    for c in text.chars() {
        if matches!(c, ' ' | '-' | '_') || c.is_whitespace() {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `"backgroundColor"` -> `"background-color"`.
pub fn decamelize(text: &str, separator: char) -> String {
    let mut out = String::with_capacity(text.len() + 4);

    for (i, c) in text.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i != 0 {
                out.push(separator);
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Lowercase the first character.
pub fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
