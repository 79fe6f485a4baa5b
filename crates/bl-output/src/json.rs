//! JSON route-data export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{OutputResult, RouteDataExport};

/// Serialize `export` as pretty-printed JSON.
pub fn write_route_json<W: Write>(mut writer: W, export: &RouteDataExport) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut writer, export)?;
    writer.flush()?;
    Ok(())
}

pub fn write_route_json_to_path(path: &Path, export: &RouteDataExport) -> OutputResult<()> {
    let file = File::create(path)?;
    write_route_json(BufWriter::new(file), export)?;
    log::debug!(
        "wrote {} ({} nodes, {} bridges, {} tunnels)",
        path.display(),
        export.route_data.len(),
        export.obstacles.len(),
        export.tunnels.len()
    );
    Ok(())
}
