//! Mappability classification
//!
//! Partitions a batch of alignment records into uniquely mapped reads and the
//! top placements of ambiguous (multi-mapped) reads, using occurrence counts
//! and score thresholds. Reads with more than two equally-good top alignments
//! are considered too ambiguous to display and are dropped entirely.

use indexmap::IndexMap;

use crate::record::AlignmentRecord;

/// Mappability category of a displayed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Read with exactly one reported alignment
    Unique,
    /// One of the (at most two) best placements of a multi-mapped read
    TopMulti,
}

impl Category {
    /// Display color for this category (the viewer's fixed palette)
    pub fn color(self) -> &'static str {
        match self {
            Category::Unique => "#8B79A5",
            Category::TopMulti => "#325b38",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Unique => "unique",
            Category::TopMulti => "top_multi",
        }
    }
}

/// One classified, drawable interval: `start .. start + len` on the mapped
/// axis, tagged with its mappability category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedInterval {
    pub start: i64,
    pub len: i64,
    pub category: Category,
}

impl ClassifiedInterval {
    pub fn end(&self) -> i64 {
        self.start + self.len
    }
}

/// Count occurrences of each read id, preserving first-seen order so that
/// downstream output is deterministic for a given input order.
fn count_read_ids<'a, I>(records: I) -> IndexMap<&'a str, usize>
where
    I: IntoIterator<Item = &'a AlignmentRecord>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for record in records {
        *counts.entry(record.read_id.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Pick the batch read length: the first record with a computable
/// consumed-query length. All simulated reads in a batch share one length.
pub fn representative_read_len(records: &[AlignmentRecord]) -> Option<i64> {
    records.iter().find_map(|r| r.cigar_size)
}

/// Classify a batch of records into unique and top multi-mapped intervals.
///
/// Returns the unique intervals followed by the top multi-mapped intervals,
/// each `read_len` wide at its mapped start. Unmapped records never
/// contribute; records with absent NM/AS tags never qualify as top
/// alignments; multi-mapped reads with more than two perfect placements are
/// dropped entirely.
pub fn classify(records: &[AlignmentRecord], read_len: i64) -> Vec<ClassifiedInterval> {
    let counts = count_read_ids(records);

    let mut intervals = Vec::new();

    // Unique reads: exactly one alignment, mapped
    for record in records {
        if counts[record.read_id.as_str()] == 1 && record.is_mapped() {
            intervals.push(ClassifiedInterval {
                start: record.mapped_start,
                len: read_len,
                category: Category::Unique,
            });
        }
    }

    // Multi-mapped candidates: more than one alignment, mapped, and a
    // perfect score (AS = 2 * read length, NM = 0). Absent tags are None
    // and can never satisfy the equality tests.
    let top_alignments: Vec<&AlignmentRecord> = records
        .iter()
        .filter(|r| counts[r.read_id.as_str()] > 1 && r.is_mapped())
        .filter(|r| r.as_score == Some(2 * read_len) && r.nm_score == Some(0))
        .collect();

    // Keep only reads with at most two equally-good top placements
    let top_counts = count_read_ids(top_alignments.iter().copied());
    for record in &top_alignments {
        if top_counts[record.read_id.as_str()] <= 2 {
            intervals.push(ClassifiedInterval {
                start: record.mapped_start,
                len: read_len,
                category: Category::TopMulti,
            });
        }
    }

    intervals
}
