/// Canonical form of a subscribed keyword. `None` for blank input.
pub fn normalize_keyword(word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

/// Uppercased first character of `title`, or `#` if it is not alphabetic.
pub fn first_letter_key(title: &str) -> String {
    match title.chars().next() {
        Some(first) if first.is_alphabetic() => first.to_uppercase().collect(),
        _ => "#".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keyword_lowercases_and_trims() {
        assert_eq!(normalize_keyword("  Python "), Some("python".to_string()));
        assert_eq!(normalize_keyword("   "), None);
    }

    #[test]
    fn first_letter_key_handles_digits_and_unicode() {
        assert_eq!(first_letter_key("dune"), "D");
        assert_eq!(first_letter_key("1984"), "#");
        assert_eq!(first_letter_key(""), "#");
        assert_eq!(first_letter_key("élan"), "É");
        assert_eq!(first_letter_key("ßeta"), "SS");
    }
}
