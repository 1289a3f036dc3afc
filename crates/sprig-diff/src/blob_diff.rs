//! Blob-level diff: line comparison of two file versions.

use serde::Serialize;

use crate::lines::{diff_lines, DiffSegment, SegmentKind};

/// The result of diffing two blobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlobDiff {
    /// Line segments turning the old content into the new.
    pub segments: Vec<DiffSegment>,
    /// Set when either side is not UTF-8; the segments then hold a single
    /// synthetic removed/added pair instead of a line diff.
    pub binary: bool,
}

impl BlobDiff {
    /// Returns `true` if both sides have the same content.
    pub fn is_unchanged(&self) -> bool {
        self.segments
            .iter()
            .all(|s| s.kind == SegmentKind::Unchanged)
    }

    /// Number of lines only in the new content.
    pub fn additions(&self) -> usize {
        self.count(SegmentKind::Added)
    }

    /// Number of lines only in the old content.
    pub fn deletions(&self) -> usize {
        self.count(SegmentKind::Removed)
    }

    fn count(&self, kind: SegmentKind) -> usize {
        self.segments
            .iter()
            .filter(|s| s.kind == kind)
            .map(DiffSegment::line_count)
            .sum()
    }
}

/// Compute the line diff between two blobs.
///
/// Content is interpreted as UTF-8. If either side is not valid UTF-8 the
/// result notes the sizes of the differing contents instead.
pub fn diff_blobs(old: &[u8], new: &[u8]) -> BlobDiff {
    match (std::str::from_utf8(old), std::str::from_utf8(new)) {
        (Ok(old), Ok(new)) => BlobDiff {
            segments: diff_lines(old, new),
            binary: false,
        },
        _ => binary_diff(old, new),
    }
}

fn binary_diff(old: &[u8], new: &[u8]) -> BlobDiff {
    let mut segments = Vec::new();
    if old != new {
        if !old.is_empty() {
            segments.push(DiffSegment::new(
                SegmentKind::Removed,
                format!("(binary content, {} bytes)\n", old.len()),
            ));
        }
        if !new.is_empty() {
            segments.push(DiffSegment::new(
                SegmentKind::Added,
                format!("(binary content, {} bytes)\n", new.len()),
            ));
        }
    }
    BlobDiff {
        segments,
        binary: true,
    }
}
