//! Static bridge attribute dataset.
//!
//! A JSON object keyed by way id.  Each value carries whatever width and
//! naming information could be assembled offline for that bridge way:
//!
//! | Field         | Meaning                                                |
//! |---------------|--------------------------------------------------------|
//! | `bast_width`  | width from the federal bridge survey (authoritative)   |
//! | `bast_name`   | survey structure name; shared by every lane of a bridge|
//! | `osm_width`   | `width=*` tag from the map                             |
//! | `est_width`   | estimate from lane count / structure type              |
//! | `nn_width`    | nearest-neighbour imputed width                        |
//! | `osm_name`    | `name=*` tag from the map                              |
//! | `bwnr_tbwnr`  | survey structure number                                |

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use bl_core::WayId;

use crate::ObstacleResult;

/// Physical attributes of one bridge way.  Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ObstacleAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bast_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bast_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nn_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_name: Option<String>,
    #[serde(default, rename = "bwnr_tbwnr", skip_serializing_if = "Option::is_none")]
    pub bridge_number: Option<String>,
}

/// Keyed lookup of [`ObstacleAttributes`] by way id.
#[derive(Debug, Clone, Default)]
pub struct AttributeDataset {
    entries: FxHashMap<WayId, ObstacleAttributes>,
}

impl AttributeDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the dataset from any JSON source.
    pub fn from_json_reader<R: Read>(reader: R) -> ObstacleResult<Self> {
        let entries: FxHashMap<WayId, ObstacleAttributes> = serde_json::from_reader(reader)?;
        log::debug!("loaded attributes for {} bridge ways", entries.len());
        Ok(Self { entries })
    }

    /// Like [`from_json_reader`](Self::from_json_reader) but opens `path`.
    pub fn from_json_path(path: &Path) -> ObstacleResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    pub fn insert(&mut self, way: WayId, attributes: ObstacleAttributes) {
        self.entries.insert(way, attributes);
    }

    pub fn get(&self, way: WayId) -> Option<&ObstacleAttributes> {
        self.entries.get(&way)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
