//! CSV exports.
//!
//! ```csv
//! timestamp,obstructedTime,speed        timestamp,lossTime
//! 0,0,0                                 10,6.5
//! 5,0.5,72                              30,0.25
//! ```
//!
//! `timestamp` is elapsed route time in seconds.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use bl_netsim::LossTimeline;

use crate::{NodeRecord, OutputResult};

/// One row per node, in route order.
pub fn write_node_csv<W: Write>(writer: W, records: &[NodeRecord]) -> OutputResult<()> {
    let mut w = Writer::from_writer(writer);
    w.write_record(["timestamp", "obstructedTime", "speed"])?;
    for r in records {
        w.write_record(&[r.elapsed_time.to_string(), r.obstructed_time.to_string(), r.speed.to_string()])?;
    }
    w.flush()?;
    Ok(())
}

/// Non-zero loss entries, ascending by timestamp.
pub fn write_loss_csv<W: Write>(writer: W, timeline: &LossTimeline) -> OutputResult<()> {
    let mut w = Writer::from_writer(writer);
    w.write_record(["timestamp", "lossTime"])?;
    for (timestamp, loss) in timeline.iter() {
        w.write_record(&[timestamp.to_string(), loss.to_string()])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_node_csv_to_path(path: &Path, records: &[NodeRecord]) -> OutputResult<()> {
    write_node_csv(File::create(path)?, records)?;
    log::debug!("wrote {} ({} rows)", path.display(), records.len());
    Ok(())
}

pub fn write_loss_csv_to_path(path: &Path, timeline: &LossTimeline) -> OutputResult<()> {
    write_loss_csv(File::create(path)?, timeline)?;
    log::debug!("wrote {} ({} rows)", path.display(), timeline.len());
    Ok(())
}
