//! Identifier case conversion.
//!
//! Schema names arrive in every style (`pet-name`, `pet_name`, `PetName`, `PET NAME`).
//! These helpers split a name into words and reassemble it in the style a target
//! construct needs.

/// Splits a name into lowercase words.
///
/// Word boundaries are separators (`_`, `-`, space, `.`, `/`), lower-to-upper
/// transitions and letter/digit transitions.
#[must_use]
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }

        if let Some(p) = prev {
            let boundary = (p.is_lowercase() && c.is_uppercase())
                || (p.is_alphabetic() && c.is_ascii_digit())
                || (p.is_ascii_digit() && c.is_alphabetic());
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
        prev = Some(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Converts a string to camelCase.
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut result = String::with_capacity(s.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            result.push_str(word);
        } else {
            result.push_str(&capitalize(word));
        }
    }
    result
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Converts a string to CONSTANT_CASE.
///
/// A result starting with a digit is prefixed with `_` so it stays a valid identifier.
#[must_use]
pub fn to_constant_case(s: &str) -> String {
    let joined = split_words(s).join("_").to_uppercase();
    match joined.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{joined}"),
        Some(_) => joined,
        None => "_".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("pet_name"), "PetName");
        assert_eq!(to_pascal_case("pet-name"), "PetName");
        assert_eq!(to_pascal_case("petName"), "PetName");
        assert_eq!(to_pascal_case("PetName"), "PetName");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("Pet Name"), "petName");
        assert_eq!(to_camel_case("pet_name"), "petName");
        assert_eq!(to_camel_case("name"), "name");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("clOrdId"), "cl_ord_id");
        assert_eq!(to_snake_case("PetName"), "pet_name");
    }

    #[test]
    fn test_to_constant_case() {
        assert_eq!(to_constant_case("dog"), "DOG");
        assert_eq!(to_constant_case("hotDog"), "HOT_DOG");
        assert_eq!(to_constant_case("42"), "_42");
        assert_eq!(to_constant_case("a2b"), "A_2_B");
        assert_eq!(to_constant_case(""), "_");
    }
}
