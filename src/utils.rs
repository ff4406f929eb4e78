pub mod error;

/// Escapes text so it cannot open markup when embedded in an HTML document.
/// Quotes are left alone; the value is only ever placed in element content.
pub fn escape_markup(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      _ => escaped.push(c),
    }
  }
  escaped
}
