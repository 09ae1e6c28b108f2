//! Word boundaries
//!
//! Whitespace is always a boundary. An apostrophe (straight or U+2019)
//! between two letters is interior, so contractions select as one word.
//! Any other non-alphanumeric character is a boundary.

/// True when the character starting at `byte_idx` is a word boundary.
/// Past the end counts as a boundary.
pub fn is_word_boundary(text: &str, byte_idx: usize) -> bool {
  let Some(c) = text[byte_idx..].chars().next() else {
    return true;
  };

  if c.is_whitespace() {
    return true;
  }

  if c == '\'' || c == '\u{2019}' {
    let before = text[..byte_idx].chars().next_back();
    let after = text[byte_idx + c.len_utf8()..].chars().next();
    let letter_before = before.is_some_and(|b| b.is_alphabetic());
    let letter_after = after.is_some_and(|a| a.is_alphabetic());
    if letter_before && letter_after {
      return false;
    }
  }

  !c.is_alphanumeric()
}

/// The word around `byte_idx` as a `(start, end)` byte range. Trailing
/// whitespace (not leading) is included; a click on a boundary character
/// selects just that character.
pub fn find_word_boundaries(text: &str, byte_idx: usize) -> (usize, usize) {
  if text.is_empty() {
    return (0, 0);
  }

  let mut idx = byte_idx.min(text.len());
  if idx == text.len() {
    idx = last_char_start(text);
  }
  while idx > 0 && !text.is_char_boundary(idx) {
    idx -= 1;
  }

  if is_word_boundary(text, idx) {
    let end = next_char_boundary(text, idx);
    return (idx, end);
  }

  let mut start = idx;
  loop {
    let prev = prev_char_start(text, start);
    if prev == start || is_word_boundary(text, prev) {
      break;
    }
    start = prev;
  }

  let mut end = idx;
  while end < text.len() && !is_word_boundary(text, end) {
    end = next_char_boundary(text, end);
  }

  // Browsers include the whitespace after a double-clicked word
  while end < text.len() {
    let Some(c) = text[end..].chars().next() else {
      break;
    };
    if !c.is_whitespace() {
      break;
    }
    end += c.len_utf8();
  }

  (start, end)
}

/// Byte index of the next char boundary after `idx` (or `len` at the end)
pub fn next_char_boundary(text: &str, idx: usize) -> usize {
  match text[idx..].chars().next() {
    Some(c) => idx + c.len_utf8(),
    None => text.len(),
  }
}

/// Byte index of the char preceding `idx`, or `idx` at the start
pub fn prev_char_start(text: &str, idx: usize) -> usize {
  if idx == 0 {
    return 0;
  }
  text[..idx]
    .char_indices()
    .next_back()
    .map(|(i, _)| i)
    .unwrap_or(0)
}

fn last_char_start(text: &str) -> usize {
  text
    .char_indices()
    .next_back()
    .map(|(i, _)| i)
    .unwrap_or(0)
}
