use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use anyhow::{Context, Result};
use docx_rs::{Docx, Paragraph, Run};

use crate::data::selection::SelectionSet;

// ---------------------------------------------------------------------------
// Line format shared by every output
// ---------------------------------------------------------------------------

fn line(n: usize, text: &str) -> String {
    format!("{n}: {text}")
}

/// Plain-text rendition: one `"<n>: <text>"` line per entry.
pub fn render_text(selection: &SelectionSet) -> String {
    selection
        .numbered()
        .map(|(n, text)| line(n, text) + "\n")
        .collect()
}

/// Word document with one paragraph per entry.
pub fn write_docx<W: Write + Seek>(selection: &SelectionSet, writer: W) -> Result<()> {
    let doc = selection.numbered().fold(Docx::new(), |doc, (n, text)| {
        doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line(n, text))))
    });
    doc.build()
        .pack(writer)
        .map_err(|e| anyhow::anyhow!("packing docx: {e}"))
}

/// Write the selection to `path`: `.txt` gets plain text, anything else a
/// Word document.
pub fn export_to_path(selection: &SelectionSet, path: &Path) -> Result<()> {
    let is_text = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));

    if is_text {
        std::fs::write(path, render_text(selection))
            .with_context(|| format!("writing {}", path.display()))?;
    } else {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_docx(selection, file).with_context(|| format!("writing {}", path.display()))?;
    }

    log::info!("Exported {} question(s) to {}", selection.len(), path.display());
    Ok(())
}
