use std::sync::LazyLock;

use regex::Regex;

/// Type name used when a document has neither a title nor a usable file stem.
pub(crate) const DEFAULT_CLASS_NAME: &str = "DefaultClassName";

static QUALIFIED_NAME_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap());

/// Uppercases the first character and leaves the rest untouched.
pub(crate) fn capitalize(input: &str) -> String {
  let mut chars = input.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}

/// Lowercases the first character and leaves the rest untouched.
pub(crate) fn lower_first(input: &str) -> String {
  let mut chars = input.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
  }
}

/// Turns arbitrary text into a type or member identifier.
///
/// # Rules:
/// 1. Split on every whitespace character.
/// 2. Capitalize the first character of each token.
/// 3. Concatenate the tokens with no separator.
/// 4. Prefix `_` when the result does not start with a letter or underscore
///    (this includes the empty result).
pub(crate) fn sanitize_identifier(input: &str) -> String {
  let mut ident: String = input.split(char::is_whitespace).map(capitalize).collect();

  if !ident.starts_with(|c: char| c.is_alphabetic() || c == '_') {
    ident.insert(0, '_');
  }

  ident
}

/// Splits a dotted type name into its namespace and final segment.
///
/// Returns `None` when any segment is not a plain identifier, which covers
/// empty input, empty segments (`a..b`, `Foo.`) and whitespace.
pub(crate) fn split_qualified_name(input: &str) -> Option<(Option<&str>, &str)> {
  if !QUALIFIED_NAME_RE.is_match(input) {
    return None;
  }

  Some(match input.rsplit_once('.') {
    Some((namespace, name)) => (Some(namespace), name),
    None => (None, input),
  })
}

/// Derives a type name from a file stem such as `order-line` in `order-line.json`.
pub(crate) fn type_name_from_stem(stem: &str) -> String {
  let words = stem.replace(['-', '.'], " ");
  let trimmed = words.trim();
  if trimmed.is_empty() {
    return DEFAULT_CLASS_NAME.to_string();
  }
  sanitize_identifier(trimmed)
}
