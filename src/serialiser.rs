use crate::srt::Cue;
use crate::timecode::format_micros;

use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Renders cues as SRT text.
pub fn render(cues: &[Cue]) -> String {
    cues.iter().map(format_cue).collect()
}

fn format_cue(cue: &Cue) -> String {
    format!(
        "{}\n{} --> {}\n{}\n\n",
        cue.index,
        format_micros(cue.start),
        format_micros(cue.end),
        cue.text
    )
}

/// Replaces the file at `output` with `data` in one step.
///
/// The data is written to a temporary file next to the destination and
/// renamed over it, so a failed run leaves any existing file untouched.
pub fn commit<P: AsRef<Path>>(output: P, data: &[u8]) -> Result<()> {
    let output = output.as_ref();
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let file = NamedTempFile::new_in(dir)
        .context(format!("Failed to create temporary file in '{}'", dir.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .context("Failed to write to output file.")?;
    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to write to output file.")?;
    file.as_file()
        .sync_all()
        .context("Failed to sync output file.")?;
    file.persist(output)
        .context(format!("Failed to replace output file: '{}'", output.display()))?;
    Ok(())
}
