//! Character-based text splitting for embedding input.
//!
//! Chunks are capped at `chunk_size` bytes with `chunk_overlap` bytes of
//! overlap between consecutive chunks, preferring paragraph, sentence and
//! word boundaries over hard cuts.

#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split text into overlapping chunks. Whitespace-only input yields no
    /// chunks; input shorter than `chunk_size` yields exactly one.
    pub fn split(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < text.len() {
            let hard_end = floor_boundary(text, (start + self.chunk_size).min(text.len()));

            let mut end = if hard_end < text.len() {
                find_break_point(&text[start..hard_end])
                    .map(|offset| start + offset)
                    .unwrap_or(hard_end)
            } else {
                hard_end
            };

            // Guarantee forward progress when a single multi-byte character
            // straddles the window edge.
            if end <= start {
                end = ceil_boundary(text, start + 1);
            }

            let piece = text[start..end].trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }

            if end >= text.len() {
                break;
            }

            let step = end - start;
            start = if step <= self.chunk_overlap {
                end
            } else {
                // Rounding down to a char boundary can land back on the
                // current start when the overlap nearly covers the step;
                // give up the overlap rather than loop in place.
                let next = floor_boundary(text, end - self.chunk_overlap);
                if next <= start {
                    end
                } else {
                    next
                }
            };
        }

        chunks
    }
}

fn floor_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx.min(text.len())
}

/// Find a good break point within a window (byte offset into `text`),
/// preferring paragraph then sentence then word boundaries. Boundaries in
/// the first third of the window are ignored so chunks stay reasonably
/// full.
fn find_break_point(text: &str) -> Option<usize> {
    let max_len = text.len();

    if let Some(pos) = text.rfind("\n\n") {
        if pos > max_len / 3 {
            return Some(pos + 2);
        }
    }

    for pattern in &[". ", "! ", "? ", ".\n", "!\n", "?\n"] {
        if let Some(pos) = text.rfind(pattern) {
            if pos > max_len / 3 {
                return Some(pos + pattern.len());
            }
        }
    }

    if let Some(pos) = text.rfind('\n') {
        if pos > max_len / 3 {
            return Some(pos + 1);
        }
    }

    if let Some(pos) = text.rfind(' ') {
        return Some(pos + 1);
    }

    None
}
