use heck::{ToKebabCase, ToLowerCamelCase, ToTitleCase};

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Replacement identifiers for JavaScript reserved words.
fn reserved_remap(word: &str) -> Option<&'static str> {
    let mapped = match word {
        "default" => "defaultValue",
        "await" => "anAwait",
        "break" => "aBreak",
        "case" => "aCase",
        "catch" => "aCatch",
        "class" => "aClass",
        "const" => "aConst",
        "continue" => "aContinue",
        "debugger" => "aDebugger",
        "delete" => "aDelete",
        "do" => "aDo",
        "else" => "anElse",
        "enum" => "anEnum",
        "export" => "anExport",
        "extends" => "anExtends",
        "false" => "aFalse",
        "finally" => "aFinally",
        "for" => "aFor",
        "function" => "aFunction",
        "if" => "anIf",
        "import" => "anImport",
        "in" => "anIn",
        "instanceof" => "anInstanceof",
        "let" => "aLet",
        "new" => "aNew",
        "null" => "aNull",
        "return" => "aReturn",
        "static" => "aStatic",
        "super" => "aSuper",
        "switch" => "aSwitch",
        "this" => "aThis",
        "throw" => "aThrow",
        "true" => "aTrue",
        "try" => "aTry",
        "typeof" => "aTypeof",
        "var" => "aVar",
        "void" => "aVoid",
        "while" => "aWhile",
        "with" => "aWith",
        "yield" => "aYield",
        _ => return None,
    };
    Some(mapped)
}

/// Whether `word` is a JavaScript reserved word that `clean_identifier` remaps.
pub fn is_reserved(word: &str) -> bool {
    reserved_remap(word).is_some()
}

/// Split into words on non-alphanumeric separators, lower-to-upper case
/// changes, letter/digit changes and the end of an acronym (`XMLHttp`).
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_ascii_lowercase());
            let boundary = prev.is_ascii_digit() != ch.is_ascii_digit()
                || (prev.is_ascii_lowercase() && ch.is_ascii_uppercase())
                || (prev.is_ascii_uppercase() && ch.is_ascii_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn camel_join(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        let lower = word.to_ascii_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn digit_word(ch: char) -> Option<&'static str> {
    ch.to_digit(10).map(|d| DIGIT_WORDS[d as usize])
}

/// Turn an arbitrary upstream name into a camelCase identifier that is safe
/// to use as a JavaScript binding.
///
/// Reserved words are remapped (`default` becomes `defaultValue`). Otherwise
/// the name is split into words and camelCased; a leading digit is spelled
/// out so the result never starts with a digit (`12345foobar` becomes
/// `one2345Foobar`).
pub fn clean_identifier(input: &str) -> String {
    if let Some(mapped) = reserved_remap(input) {
        return mapped.to_string();
    }

    let mut words = split_words(input);
    if let Some(first) = words.first().cloned() {
        let mut chars = first.chars();
        if let Some(word) = chars.next().and_then(digit_word) {
            let rest = chars.as_str();
            words[0] = word.to_string();
            if !rest.is_empty() {
                words.insert(1, rest.to_string());
            }
        }
    }

    let joined = camel_join(&words);
    if joined.is_empty() {
        return "unnamed".to_string();
    }
    match reserved_remap(&joined) {
        Some(mapped) => mapped.to_string(),
        None => joined,
    }
}

/// Derive the action group for a path from its first non-empty segment.
///
/// Every digit of a leading run is spelled out (`/2fa/...` groups under
/// `twoFa`); the root path groups under `root`.
pub fn to_group_tag(path: &str) -> String {
    let Some(segment) = path
        .split(['/', '{', '}'])
        .find(|s| !s.is_empty())
    else {
        return "root".to_string();
    };

    let digits = segment.chars().take_while(char::is_ascii_digit);
    let spelled: Vec<&str> = digits.filter_map(digit_word).collect();
    let rest = segment.trim_start_matches(|c: char| c.is_ascii_digit());
    let words = if spelled.is_empty() {
        rest.to_string()
    } else {
        format!("{} {rest}", spelled.join(" "))
    };

    let tag = words.to_lower_camel_case();
    if tag.is_empty() { "root".to_string() } else { tag }
}

/// Human-readable label, e.g. `userId` becomes `User Id`.
pub fn title_case(input: &str) -> String {
    input.to_title_case()
}

/// Default component key for an API title, e.g. `Pet Store API` becomes
/// `pet-store-api`.
pub fn component_key(title: &str) -> String {
    title.to_kebab_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_are_word_boundaries() {
        assert_eq!(clean_identifier("foo/bar"), "fooBar");
        assert_eq!(clean_identifier(",foo_bar"), "fooBar");
        assert_eq!(clean_identifier("foo-bar baz"), "fooBarBaz");
        assert_eq!(clean_identifier("X-Api-Key"), "xApiKey");
    }

    #[test]
    fn leading_digits_are_spelled() {
        assert_eq!(clean_identifier("12345foobar"), "one2345Foobar");
        assert_eq!(clean_identifier("0"), "zero");
        assert_eq!(clean_identifier("3d_model"), "threeDModel");
    }

    #[test]
    fn reserved_words_are_remapped() {
        assert_eq!(clean_identifier("default"), "defaultValue");
        assert_eq!(clean_identifier("case"), "aCase");
        assert_eq!(clean_identifier("Default"), "defaultValue");
        assert_eq!(clean_identifier("new"), "aNew");
    }

    #[test]
    fn case_changes_are_word_boundaries() {
        assert_eq!(clean_identifier("getUser"), "getUser");
        assert_eq!(clean_identifier("GetUserByID"), "getUserById");
        assert_eq!(clean_identifier("XMLHttpRequest"), "xmlHttpRequest");
        assert_eq!(clean_identifier("page2size"), "page2Size");
    }

    #[test]
    fn empty_names_get_a_placeholder() {
        assert_eq!(clean_identifier(""), "unnamed");
        assert_eq!(clean_identifier("__"), "unnamed");
    }

    #[test]
    fn never_starts_with_digit_or_is_reserved() {
        for input in ["1", "42 things", "9lives", "for", "in", "0x1F", "_1a"] {
            let cleaned = clean_identifier(input);
            assert!(
                !cleaned.starts_with(|c: char| c.is_ascii_digit()),
                "{input} -> {cleaned}"
            );
            assert!(!is_reserved(&cleaned), "{input} -> {cleaned}");
        }
    }

    #[test]
    fn group_tags() {
        assert_eq!(to_group_tag("/"), "root");
        assert_eq!(to_group_tag(""), "root");
        assert_eq!(to_group_tag("/users/{userId}"), "users");
        assert_eq!(to_group_tag("/user-accounts"), "userAccounts");
        assert_eq!(to_group_tag("/2fa/verify"), "twoFa");
        assert_eq!(to_group_tag("/123abc"), "oneTwoThreeAbc");
        assert_eq!(to_group_tag("/{tenant}/items"), "tenant");
    }

    #[test]
    fn component_keys() {
        assert_eq!(component_key("Pet Store API"), "pet-store-api");
        assert_eq!(component_key("petstore"), "petstore");
    }

    #[test]
    fn titles() {
        assert_eq!(title_case("userId"), "User Id");
        assert_eq!(title_case("available"), "Available");
    }
}
