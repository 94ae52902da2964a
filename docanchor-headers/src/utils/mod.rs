use std::collections::HashSet;
pub mod codeblock;

use regex::Regex;

/// Slug used when a heading yields no usable characters.
pub const FALLBACK_SLUG: &str = "header";

/// Error type for utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
  #[error("Regex compilation failed: {0}")]
  RegexError(#[from] regex::Error),
}

/// Result type for utility operations.
pub type UtilResult<T> = Result<T, UtilError>;

/// Slugify heading text for use as an anchor ID.
///
/// Lowercases and trims the text, drops every character that is not a letter,
/// digit, whitespace or hyphen, turns whitespace runs into a single hyphen,
/// collapses repeated hyphens and strips them from both ends. Text that ends
/// up empty yields [`FALLBACK_SLUG`].
///
/// # Examples
///
/// ```
/// use docanchor_headers::utils::slugify;
///
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("  --- "), "header");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
  let lowered = text.to_lowercase();
  let mut slug = String::with_capacity(lowered.len());
  let mut pending_hyphen = false;

  for c in lowered.trim().chars() {
    if c.is_whitespace() || c == '-' {
      pending_hyphen = true;
    } else if c.is_alphanumeric() {
      if pending_hyphen && !slug.is_empty() {
        slug.push('-');
      }
      pending_hyphen = false;
      slug.push(c);
    }
  }

  if slug.is_empty() {
    FALLBACK_SLUG.to_string()
  } else {
    slug
  }
}

/// Tracks the slugs assigned during one processing call.
///
/// Every candidate passed to [`SlugTracker::claim`] is resolved against the
/// slugs already handed out; on collision the first free `-1`, `-2`, ...
/// suffix wins. The set only ever grows.
#[derive(Debug, Clone, Default)]
pub struct SlugTracker {
  seen: HashSet<String>,
}

impl SlugTracker {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Reserve `candidate`, or the first unused suffixed variant of it.
  pub fn claim(&mut self, candidate: &str) -> String {
    if self.seen.insert(candidate.to_string()) {
      return candidate.to_string();
    }

    let mut suffix: usize = 1;
    loop {
      let next = format!("{candidate}-{suffix}");
      if !self.seen.contains(&next) {
        self.seen.insert(next.clone());
        return next;
      }
      suffix += 1;
    }
  }

  /// Whether `slug` has already been handed out.
  #[must_use]
  pub fn contains(&self, slug: &str) -> bool {
    self.seen.contains(slug)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.seen.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.seen.is_empty()
  }
}

/// Compile a regex pattern.
///
/// # Errors
///
/// Returns an error if the pattern is invalid.
pub fn compile_regex(pattern: &str) -> UtilResult<Regex> {
  Ok(Regex::new(pattern)?)
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when a pattern fails to compile, so a broken pattern
/// degrades to "no match" and the input passes through untouched.
///
/// # Errors
///
/// Returns an error if the fallback pattern fails to compile.
pub fn never_matching_regex() -> UtilResult<Regex> {
  compile_regex(r"[^\s\S]")
}

/// Compile `pattern`, logging and falling back to a never matching regex on
/// failure.
pub(crate) fn regex_or_never(name: &str, pattern: &str) -> Regex {
  compile_regex(pattern).unwrap_or_else(|e| {
    log::error!(
      "Failed to compile {name} regex: {e}\n Falling back to never matching \
       regex."
    );
    never_matching_regex().unwrap_or_else(|_| {
      #[allow(
        clippy::expect_used,
        reason = "This pattern is guaranteed to be valid"
      )]
      Regex::new(r"[^\s\S]")
        .expect("regex pattern [^\\s\\S] should always compile")
    })
  })
}
