//! Camel-case transform for keys and type names
//!
//! Words are split on whitespace and ASCII punctuation, before every
//! uppercase letter that follows another character, and at digit
//! boundaries. Every other character, combining marks included, belongs to
//! the current word. The first word is lowercased and every later word is
//! capitalised, so `first_name`, `first-name` and `FirstName` all become
//! `firstName`. Case mapping never yields a delimiter and each uppercase
//! letter opens a new word, so the output splits back into the same words
//! and the transform is idempotent.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
}

fn classify(c: char) -> Option<CharClass> {
    if c.is_whitespace() || (c.is_ascii() && !c.is_ascii_alphanumeric()) {
        None
    } else if c.is_numeric() {
        Some(CharClass::Digit)
    } else if c.is_uppercase() {
        Some(CharClass::Upper)
    } else {
        Some(CharClass::Lower)
    }
}

/// Split a string into its words
pub fn words(input: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev: Option<CharClass> = None;

    for (idx, c) in input.char_indices() {
        let class = classify(c);

        let boundary = match (prev, class) {
            (_, None) => {
                if let Some(s) = start.take() {
                    words.push(&input[s..idx]);
                }
                prev = None;
                continue;
            }
            (None, Some(_)) => false,
            (Some(_), Some(CharClass::Upper)) => true,
            (Some(CharClass::Digit), Some(CharClass::Digit)) => false,
            (Some(CharClass::Digit), Some(_)) | (Some(_), Some(CharClass::Digit)) => true,
            (Some(_), Some(_)) => false,
        };

        if boundary {
            if let Some(s) = start {
                words.push(&input[s..idx]);
            }
            start = Some(idx);
        } else if start.is_none() {
            start = Some(idx);
        }
        prev = class;
    }

    if let Some(s) = start {
        words.push(&input[s..]);
    }

    words
}

/// Convert a string to camelCase
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for (idx, word) in words(input).into_iter().enumerate() {
        let lower = word.to_lowercase();
        // Digit words are never capitalised: `ⅷ_ⅷ` would otherwise merge into one word
        if idx == 0 || word.starts_with(char::is_numeric) {
            out.push_str(&lower);
            continue;
        }

        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_snake_and_kebab() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("first-name"), "firstName");
        assert_eq!(camel_case("blog-posts"), "blogPosts");
        assert_eq!(camel_case("created_at_utc"), "createdAtUtc");
    }

    #[test]
    fn test_already_camel_is_stable() {
        assert_eq!(camel_case("firstName"), "firstName");
        assert_eq!(camel_case("FirstName"), "firstName");
        assert_eq!(camel_case("articles"), "articles");
    }

    #[test]
    fn test_delimiters_are_dropped() {
        assert_eq!(camel_case("__private_field"), "privateField");
        assert_eq!(camel_case("first name"), "firstName");
        assert_eq!(camel_case("a.b.c"), "aBC");
        assert_eq!(camel_case("--"), "");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_digits_form_words() {
        assert_eq!(camel_case("address_line_1"), "addressLine1");
        assert_eq!(camel_case("foo2bar"), "foo2Bar");
        assert_eq!(camel_case("v2"), "v2");
    }

    #[test]
    fn test_uppercase_runs_split_per_letter() {
        assert_eq!(words("HTTPCode"), vec!["H", "T", "T", "P", "Code"]);
        assert_eq!(camel_case("a_b_c"), "aBC");
        assert_eq!(camel_case("aBC"), "aBC");
    }

    #[test]
    fn test_non_ascii_letters() {
        assert_eq!(camel_case("größe_maß"), "größeMaß");
        assert_eq!(camel_case("x_ß"), "xSS");
    }

    #[test]
    fn test_combining_marks_stay_in_word() {
        assert_eq!(camel_case("İ"), "i\u{307}");
        assert_eq!(words("i\u{307}"), vec!["i\u{307}"]);
        assert_eq!(camel_case("cafe\u{301}_menu"), "cafe\u{301}Menu");
    }

    #[test]
    fn test_unicode_output_is_stable() {
        for input in ["İ", "a_İd", "ß_x", "x_ß", "ⅷ_ⅷ", "ŉa_b", "名前_first", "x_\u{345}a"] {
            let once = camel_case(input);
            assert_eq!(camel_case(&once), once, "input {:?}", input);
        }
    }

    proptest! {
        #[test]
        fn prop_camel_case_idempotent(s in "\\PC{0,24}") {
            let once = camel_case(&s);
            prop_assert_eq!(camel_case(&once), once);
        }

        #[test]
        fn prop_camel_case_has_no_delimiters(s in "[a-z0-9_-]{0,24}") {
            let out = camel_case(&s);
            prop_assert!(out.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
