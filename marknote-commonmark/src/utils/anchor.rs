//! Deterministic anchor IDs for headings.
//!
//! IDs are shared between the heading element and the TOC entry pointing at
//! it, and the browser client looks them up after lowercasing. They therefore
//! have to be stable across runs and implementations, and lowercase.
//!
//! The hash is the classic 31-multiplier string hash over UTF-16 code units,
//! wrapped to a signed 32-bit integer after every step. Distinct texts may
//! collide; collisions are not resolved.

/// Prefix of every generated anchor ID.
pub const ID_PREFIX: &str = "hash-";

/// Anything that can be turned into an anchor ID.
///
/// Values that carry no text (absent values, numbers) report `None` and hash
/// to `0`, so every input yields a usable ID.
pub trait AnchorSource {
  fn anchor_text(&self) -> Option<&str>;
}

impl AnchorSource for str {
  fn anchor_text(&self) -> Option<&str> {
    Some(self)
  }
}

impl AnchorSource for String {
  fn anchor_text(&self) -> Option<&str> {
    Some(self.as_str())
  }
}

impl<T: AnchorSource + ?Sized> AnchorSource for &T {
  fn anchor_text(&self) -> Option<&str> {
    (**self).anchor_text()
  }
}

impl<T: AnchorSource> AnchorSource for Option<T> {
  fn anchor_text(&self) -> Option<&str> {
    self.as_ref().and_then(AnchorSource::anchor_text)
  }
}

macro_rules! textless_anchor_source {
  ($($ty:ty),* $(,)?) => {
    $(
      impl AnchorSource for $ty {
        fn anchor_text(&self) -> Option<&str> {
          None
        }
      }
    )*
  };
}

textless_anchor_source!(
  (),
  bool,
  i8,
  i16,
  i32,
  i64,
  isize,
  u8,
  u16,
  u32,
  u64,
  usize,
  f32,
  f64
);

/// Hash the text of `input` to a signed 32-bit value.
#[must_use]
pub fn hash_code<T: AnchorSource + ?Sized>(input: &T) -> i32 {
  input.anchor_text().map_or(0, |text| {
    text.encode_utf16().fold(0_i32, |acc, unit| {
      acc.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
  })
}

/// Build the anchor ID for `input`, e.g. `hash-70809164` for "Intro".
#[must_use]
pub fn make_id<T: AnchorSource + ?Sized>(input: &T) -> String {
  format!("{ID_PREFIX}{}", hash_code(input))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_known_values() {
    assert_eq!(hash_code("a"), 97);
    assert_eq!(hash_code("ab"), 97 * 31 + 98);
    assert_eq!(make_id("Intro"), "hash-70809164");
  }

  #[test]
  fn test_wraps_like_int32() {
    // "hello world" overflows i32 several times along the way
    assert_eq!(hash_code("hello world"), 1_794_106_052);
    assert_eq!(hash_code("Configuration"), -1_563_253_546);
    assert_eq!(make_id("Configuration"), "hash--1563253546");
  }

  #[test]
  fn test_utf16_code_units() {
    // U+4E2D is a single code unit
    assert_eq!(hash_code("中"), 0x4E2D);
    // U+1F600 is a surrogate pair: 0xD83D, 0xDE00
    assert_eq!(hash_code("😀"), 0xD83D * 31 + 0xDE00);
  }

  #[test]
  fn test_textless_inputs_default() {
    assert_eq!(make_id(""), "hash-0");
    assert_eq!(make_id(&None::<&str>), "hash-0");
    assert_eq!(make_id(&()), "hash-0");
    assert_eq!(make_id(&123_i32), "hash-0");
    assert_eq!(make_id(&1.5_f64), "hash-0");
  }

  #[test]
  fn test_deterministic_and_lowercase() {
    for text in ["Intro", "Getting Started", "API `Reference`", "ÄÖÜ"] {
      let first = make_id(text);
      assert_eq!(first, make_id(text));
      assert_eq!(first, first.to_lowercase());
    }
  }
}
