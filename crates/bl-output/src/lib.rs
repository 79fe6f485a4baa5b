//! `bl-output` — export of an analysed route.
//!
//! | File                | Writer                 | Contents                                   |
//! |---------------------|------------------------|--------------------------------------------|
//! | `RouteData.json`    | [`write_route_json`]   | node records, bridge matches, tunnel matches |
//! | `route_nodes.csv`   | [`write_node_csv`]     | `timestamp,obstructedTime,speed`           |
//! | `loss_timeline.csv` | [`write_loss_csv`]     | `timestamp,lossTime` (non-zero, ascending) |
//!
//! Every writer is generic over [`std::io::Write`]; the `*_to_path` variants
//! create the file.  [`write_exports`] writes the whole set into a directory.

pub mod csv;
pub mod error;
pub mod json;
pub mod row;


use std::path::Path;

use bl_netsim::LossTimeline;

pub use crate::csv::{write_loss_csv, write_loss_csv_to_path, write_node_csv, write_node_csv_to_path};
pub use error::{OutputError, OutputResult};
pub use json::{write_route_json, write_route_json_to_path};
pub use row::{NodeRecord, RouteDataExport, node_records};

pub const ROUTE_DATA_FILE: &str = "RouteData.json";
pub const NODE_CSV_FILE: &str = "route_nodes.csv";
pub const LOSS_CSV_FILE: &str = "loss_timeline.csv";

/// Write `RouteData.json` and `route_nodes.csv` into `dir`, plus
/// `loss_timeline.csv` when a timeline is given.  `dir` must exist.
pub fn write_exports(dir: &Path, export: &RouteDataExport, loss: Option<&LossTimeline>) -> OutputResult<()> {
    write_route_json_to_path(&dir.join(ROUTE_DATA_FILE), export)?;
    write_node_csv_to_path(&dir.join(NODE_CSV_FILE), &export.route_data)?;
    if let Some(timeline) = loss {
        write_loss_csv_to_path(&dir.join(LOSS_CSV_FILE), timeline)?;
    }
    log::info!("exports written to {}", dir.display());
    Ok(())
}
