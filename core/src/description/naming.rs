/// Namespace used when a converter is configured without one.
pub const DEFAULT_NAMESPACE: &str = "http://tempuri.org/";

/// Encodes `name` into a valid XML local name.
///
/// Names that are already valid are returned unchanged. Otherwise characters
/// that may not appear at their position are written as `_xHHHH_` (eight
/// digits outside the BMP), and an underscore that would read as the start of
/// such an escape is itself escaped.
pub fn xml_name(name: &str) -> String {
  if is_xml_name(name) {
    return name.to_string();
  }
  let chars = name.chars().collect::<Vec<_>>();
  let mut encoded = String::with_capacity(name.len());
  for (index, ch) in chars.iter().copied().enumerate() {
    let valid = if index == 0 {
      is_name_start_char(ch)
    } else {
      is_name_char(ch)
    };
    if !valid || (ch == '_' && is_escape_sequence(&chars[index..])) {
      push_escaped(&mut encoded, ch);
    } else {
      encoded.push(ch);
    }
  }
  encoded
}

/// Whether `name` is a non-empty XML local name (no prefix).
pub fn is_xml_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => is_name_start_char(first) && chars.all(is_name_char),
    None => false,
  }
}

fn is_name_start_char(ch: char) -> bool {
  ch == '_' || ch.is_alphabetic()
}

fn is_name_char(ch: char) -> bool {
  is_name_start_char(ch) || ch.is_numeric() || ch == '-' || ch == '.'
}

fn is_escape_sequence(chars: &[char]) -> bool {
  chars.len() >= 7 && chars[1] == 'x' && chars[2..6].iter().all(|c| c.is_ascii_hexdigit()) && chars[6] == '_'
}

fn push_escaped(out: &mut String, ch: char) {
  let code = ch as u32;
  if code > 0xFFFF {
    out.push_str(&format!("_x{:08X}_", code));
  } else {
    out.push_str(&format!("_x{:04X}_", code));
  }
}
