//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `resume_core` linkage with deterministic output.
//! - Optionally export the sample resume: `resume_cli <output-dir>` writes
//!   `<output-dir>/resume.pdf`.

use resume_core::{layout_preview, render_preview, sample_document, ExportAdapter, LayoutConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("resume_core ping={}", resume_core::ping());
    println!("resume_core version={}", resume_core::core_version());

    let Some(out_dir) = std::env::args_os().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let preview = render_preview(&sample_document());
    let layout = layout_preview(&preview, &LayoutConfig::default());
    let mut exporter = resume_core::PdfExporter::new(out_dir);
    match exporter.export(&layout) {
        Ok(artifact) => {
            println!(
                "exported path={} size={}x{} bytes={}",
                artifact.path.display(),
                artifact.width,
                artifact.height,
                artifact.byte_len
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            ExitCode::FAILURE
        }
    }
}
