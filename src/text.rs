//! Small string transforms shared by the layouts: turning property names
//! into labels and building id and message-bundle keys.

/// Turn a property name into a display label.
///
/// Splits on camelCase humps and on letter/digit boundaries, then
/// capitalizes the first letter: `widget1` → `Widget 1`, `firstName` →
/// `First Name`, `homeURLValue` → `Home URL Value`.
pub fn humanize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
            continue;
        }
        let prev = chars[i - 1];
        let next = chars.get(i + 1).copied();
        let hump = c.is_uppercase() && (prev.is_lowercase() || prev.is_ascii_digit());
        let acronym_end =
            c.is_uppercase() && prev.is_uppercase() && next.is_some_and(char::is_lowercase);
        let digits = c.is_ascii_digit() && prev.is_alphabetic();
        if hump || acronym_end || digits {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Upper-case the first character.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse a phrase into a camelCase key: `Section 1.1` → `section1.1`.
pub fn camel_case(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    for (i, word) in phrase.split_whitespace().enumerate() {
        if i == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_lowercase());
                out.extend(chars);
            }
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}
