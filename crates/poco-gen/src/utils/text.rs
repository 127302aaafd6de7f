/// Expands the escape sequences schema authors write inside descriptions.
///
/// Recognizes `\n`, `\r`, `\t`, `\\`, `\"`, `\'`, `\/` and `\uXXXX`. Anything
/// else, including a malformed `\u`, is kept as written.
#[must_use]
pub(crate) fn unescape(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut chars = input.chars().peekable();

  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }

    let decoded = match chars.peek().copied() {
      Some('n') => Some('\n'),
      Some('r') => Some('\r'),
      Some('t') => Some('\t'),
      Some(escaped @ ('\\' | '"' | '\'' | '/')) => Some(escaped),
      Some('u') => {
        let hex: String = chars.clone().skip(1).take(4).collect();
        let decoded = decode_unicode(&hex);
        if decoded.is_some() {
          // Skip `u` and the first three digits; the last one is consumed below.
          chars.nth(3);
        }
        decoded
      }
      _ => None,
    };

    match decoded {
      Some(decoded) => {
        chars.next();
        out.push(decoded);
      }
      None => out.push('\\'),
    }
  }

  out
}

fn decode_unicode(hex: &str) -> Option<char> {
  if hex.len() != 4 {
    return None;
  }
  u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Splits documentation into comment lines with `prefix`, trimming trailing
/// whitespace so blank lines stay clean.
#[must_use]
pub(crate) fn comment_lines(input: &str, prefix: &str) -> Vec<String> {
  input
    .lines()
    .map(|line| {
      if line.trim().is_empty() {
        prefix.trim_end().to_string()
      } else {
        format!("{prefix}{}", line.trim_end())
      }
    })
    .collect()
}
