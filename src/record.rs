use std::fmt;

/// SAM flag bit marking an unmapped alignment
pub const FLAG_UNMAPPED: u16 = 0x4;

/// One structured alignment record, combining where the read was simulated
/// from (decoded out of its name) with where the aligner placed it.
///
/// Optional fields use `Option` rather than sentinel values so that an absent
/// NM/AS tag can never satisfy a numeric comparison downstream. The table
/// export renders `None` as `N/A`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    pub read_id: String,
    /// Chromosome the read was simulated from
    pub derived_chr: String,
    /// Intra-region offset embedded in the read name
    pub read_offset: i64,
    /// Ground-truth start (region start + offset)
    pub derived_start: i64,
    /// Ground-truth end (region end + offset)
    pub derived_end: i64,
    /// Reference name the aligner placed the read on ("*" when unmapped)
    pub mapped_chr: String,
    /// Aligner start position with the benchmark's +2 coordinate correction
    pub mapped_start: i64,
    /// Aligner end position; None when unmapped / no computable end
    pub mapped_end: Option<i64>,
    pub flag: u16,
    pub map_quality: u8,
    /// Consumed-query length inferred from the CIGAR
    pub cigar_size: Option<i64>,
    pub cigar: Option<String>,
    /// NM tag (edit distance); None when the tag is absent
    pub nm_score: Option<i64>,
    /// AS tag (alignment score); None when the tag is absent
    pub as_score: Option<i64>,
}

impl AlignmentRecord {
    pub fn is_mapped(&self) -> bool {
        self.flag & FLAG_UNMAPPED == 0
    }
}

/// Render an optional integer field with the table's N/A sentinel
fn fmt_opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

impl fmt::Display for AlignmentRecord {
    /// One TSV table row, in the original viewer's column order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.read_id,
            self.derived_chr,
            self.read_offset,
            self.mapped_chr,
            self.flag,
            self.map_quality,
            fmt_opt(&self.cigar_size),
            fmt_opt(&self.cigar),
            self.derived_start,
            self.derived_end,
            self.mapped_start,
            fmt_opt(&self.mapped_end),
            fmt_opt(&self.nm_score),
            fmt_opt(&self.as_score),
        )
    }
}
