//! Line-boundary chunking for oversized documents

/// A contiguous, order-preserving segment of a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Position of this chunk in the original text
    pub index: usize,
    /// The chunk's text
    pub text: String,
}

/// Splits text into ordered, gapless chunks at line boundaries.
///
/// Concatenating the chunks in order reproduces the input exactly: each split
/// point is the last newline at or before the size limit, and that newline
/// byte begins the next chunk. When a window contains no usable newline, the
/// chunk is hard-cut at the limit instead, so splitting always advances.
pub struct LineChunker {
    size_limit: usize,
}

impl LineChunker {
    /// Create a chunker with the given size limit (in bytes).
    pub fn new(size_limit: usize) -> Self {
        Self { size_limit }
    }

    /// Chunk the given text.
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        if text.len() <= self.size_limit {
            return vec![TextChunk {
                index: 0,
                text: text.to_string(),
            }];
        }

        let mut chunks = Vec::new();
        let mut rest = text;

        while rest.len() > self.size_limit {
            let window_end = floor_char_boundary(rest, self.size_limit);
            // A newline at position 0 would yield an empty chunk and no
            // forward progress, so it does not count as a split point.
            let cut = match rest[..window_end].rfind('\n') {
                Some(i) if i > 0 => i,
                _ => hard_cut(rest, window_end),
            };

            chunks.push(TextChunk {
                index: chunks.len(),
                text: rest[..cut].to_string(),
            });
            rest = &rest[cut..];
        }

        chunks.push(TextChunk {
            index: chunks.len(),
            text: rest.to_string(),
        });

        chunks
    }
}

/// Largest index `<= limit` that falls on a UTF-8 character boundary.
fn floor_char_boundary(s: &str, limit: usize) -> usize {
    let mut i = limit.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Cut position when no newline is available: the window end, or at minimum
/// one whole character so the loop always advances.
fn hard_cut(s: &str, window_end: usize) -> usize {
    if window_end > 0 {
        window_end
    } else {
        s.chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(s.len())
    }
}
