//! Tabular export of extracted records and placed rectangles

use anyhow::Result;
use std::io::Write;

use crate::layout::PlacedRectangle;
use crate::pipeline::TrackLayout;
use crate::record::AlignmentRecord;

/// Column order of the per-alignment table, matching the original viewer
pub const TABLE_HEADER: &str = "readID\tderivedChr\treadStart\tmappedChr\tflag\tMapQ\t\
cigarSize\tcigarString\tderivedStart\tderivedEnd\tmappedStart\tmappedEnd\tnmScore\tasScore";

/// Write the flat per-alignment table as TSV
pub fn write_table<W: Write>(mut out: W, records: &[AlignmentRecord]) -> Result<()> {
    writeln!(out, "{}", TABLE_HEADER)?;
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

/// Write one placed rectangle as a TSV row
fn write_rectangle<W: Write>(out: &mut W, rect: &PlacedRectangle) -> Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}",
        rect.start,
        rect.end,
        rect.row,
        rect.category.as_str(),
        rect.color()
    )?;
    Ok(())
}

/// Write the layout as TSV: a window header line followed by one row per
/// placed rectangle
pub fn write_layout<W: Write>(mut out: W, layout: &TrackLayout) -> Result<()> {
    if let Some((window_start, window_end)) = layout.window {
        writeln!(out, "#window\t{}\t{}", window_start, window_end)?;
    }
    writeln!(out, "start\tend\trow\tcategory\tcolor")?;
    for rect in &layout.rectangles {
        write_rectangle(&mut out, rect)?;
    }
    Ok(())
}
