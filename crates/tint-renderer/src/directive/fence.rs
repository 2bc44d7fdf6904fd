//! Code fence tracking for directive scanning.
//!
//! Directive syntax inside fenced code blocks must stay literal, so the
//! processor feeds every line through a [`FenceTracker`] first.

/// An open code fence: marker character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

/// Tracks fenced code block state during line-by-line processing.
///
/// Fences use three or more backticks or tildes, indented by at most three
/// spaces. A closing fence uses the same character, is at least as long as the
/// opening fence and carries no info string.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the last line seen opened or continued a fenced block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if the line is a fence marker.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some(fence) = fence_marker(line) else {
            return false;
        };

        match self.open {
            Some(open) => {
                let closes = fence.marker == open.marker
                    && fence.len >= open.len
                    && line.trim()[fence.len..].trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                // Backtick fences may not carry backticks in their info string.
                let info = &line.trim()[fence.len..];
                if fence.marker == '`' && info.contains('`') {
                    return false;
                }
                self.open = Some(fence);
                true
            }
        }
    }
}

/// Detect a fence run at the start of `line`.
fn fence_marker(line: &str) -> Option<Fence> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }

    let rest = &line[indent..];
    let marker = rest.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = rest.chars().take_while(|&c| c == marker).count();

    (len >= 3).then_some(Fence { marker, len })
}
