use std::process::ExitCode;

use vertex_layout::{StructLayout, check_vertex_layout, shader};

fn main() -> ExitCode {
    env_logger::init();

    let report = match check_vertex_layout() {
        Ok(report) => report,
        Err(e) => {
            log::error!("Vertex layout check failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    log_struct(&report.storage);
    log_struct(&report.input);
    log::info!("array<Vertex> stride: {} bytes", report.array_stride);

    match shader::prelude() {
        Ok(prelude) => {
            print!("{prelude}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to generate WGSL prelude: {e}");
            ExitCode::FAILURE
        }
    }
}

fn log_struct(layout: &StructLayout) {
    log::info!("struct {} ({} bytes)", layout.name, layout.size);
    for member in &layout.members {
        let location = member
            .location
            .map(|l| format!(" @location({l})"))
            .unwrap_or_default();
        log::info!(
            "  {:>3} {}{}: {:?} ({} bytes)",
            member.offset,
            member.name,
            location,
            member.format,
            member.size
        );
    }
}
