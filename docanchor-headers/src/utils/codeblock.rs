/// State tracking for fenced code blocks.
///
/// Tracks the fence character and length of the currently open block, so
/// only a matching fence of at least the same length closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceTracker {
  in_code_block:    bool,
  code_fence_char:  Option<char>,
  code_fence_count: usize,
}

impl FenceTracker {
  /// Create a new fence tracker.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      in_code_block:    false,
      code_fence_char:  None,
      code_fence_count: 0,
    }
  }

  /// Check if currently inside a code block.
  #[must_use]
  pub const fn in_code_block(&self) -> bool {
    self.in_code_block
  }

  /// Process a line and return the state after it.
  #[must_use]
  pub fn process_line(&self, line: &str) -> Self {
    let trimmed = line.trim_start();

    let Some(fence_char) = trimmed.chars().next() else {
      return *self;
    };
    if fence_char != '`' && fence_char != '~' {
      return *self;
    }

    let fence_count = trimmed.chars().take_while(|&c| c == fence_char).count();
    if fence_count < 3 {
      return *self;
    }

    if !self.in_code_block {
      Self {
        in_code_block:    true,
        code_fence_char:  Some(fence_char),
        code_fence_count: fence_count,
      }
    } else if self.code_fence_char == Some(fence_char)
      && fence_count >= self.code_fence_count
    {
      Self::new()
    } else {
      *self
    }
  }
}

#[cfg(test)]
mod tests {
  use super::FenceTracker;

  #[test]
  fn test_backtick_fence_open_close() {
    let tracker = FenceTracker::new().process_line("```rust");
    assert!(tracker.in_code_block());
    let tracker = tracker.process_line("# not a heading");
    assert!(tracker.in_code_block());
    let tracker = tracker.process_line("```");
    assert!(!tracker.in_code_block());
  }

  #[test]
  fn test_mismatched_fence_does_not_close() {
    let tracker = FenceTracker::new().process_line("````");
    let tracker = tracker.process_line("~~~");
    assert!(tracker.in_code_block());
    let tracker = tracker.process_line("```");
    assert!(tracker.in_code_block());
    let tracker = tracker.process_line("`````");
    assert!(!tracker.in_code_block());
  }

  #[test]
  fn test_short_fence_ignored() {
    let tracker = FenceTracker::new().process_line("`` inline ``");
    assert!(!tracker.in_code_block());
  }
}
