//! Code fence tracking for list scanning.
//!
//! List markers inside fenced code blocks are literal text, so the
//! preprocessor consults [`FenceTracker`] before tokenizing a line.

/// An open fence.
#[derive(Debug, Clone, Copy)]
struct OpenFence {
    /// Backtick or tilde.
    ch: char,
    /// Length of the opening run; the closing run must be at least as long.
    len: usize,
    /// Line where the fence opened (1-indexed).
    line: usize,
}

/// Tracks fenced code blocks during line-by-line processing.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Line where the currently open fence started.
    pub(crate) fn open_line(&self) -> Option<usize> {
        self.open.map(|fence| fence.line)
    }

    /// Feed a line. Returns `true` if it opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str, line_num: usize) -> bool {
        let trimmed = line.trim_start();
        match self.open {
            Some(fence) => {
                let closes = fence_run(trimmed).is_some_and(|(ch, len)| {
                    ch == fence.ch && len >= fence.len && trimmed[len..].trim().is_empty()
                });
                if closes {
                    self.open = None;
                }
                closes
            }
            None => match fence_run(trimmed) {
                Some((ch, len)) => {
                    self.open = Some(OpenFence {
                        ch,
                        len,
                        line: line_num,
                    });
                    true
                }
                None => false,
            },
        }
    }
}

/// Leading run of three or more backticks or tildes.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let ch = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}
