//! JSON waypoint graph format.
//!
//! ```json
//! { "markers": [
//!     { "label": "Gate", "position": [0, 0, 0], "neighbors": ["Quad"] },
//!     ...
//! ] }
//! ```
//!
//! Neighbors are listed by label and are one-way; list a link on both
//! markers to make it walkable in both directions.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use wp_core::{MarkerId, Vec3};
use wp_graph::{Graph, GraphBuilder};

#[derive(Debug, Deserialize)]
pub struct GraphFile {
    pub markers: Vec<MarkerRecord>,
}

#[derive(Debug, Deserialize)]
pub struct MarkerRecord {
    pub label:     String,
    pub position:  [f32; 3],
    #[serde(default)]
    pub neighbors: Vec<String>,
}

pub fn load_graph(path: &Path) -> Result<Graph> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading graph file {}", path.display()))?;
    parse_graph(&text).with_context(|| format!("parsing graph file {}", path.display()))
}

pub fn parse_graph(json: &str) -> Result<Graph> {
    let file: GraphFile = serde_json::from_str(json)?;
    build_graph(&file)
}

fn build_graph(file: &GraphFile) -> Result<Graph> {
    let mut b = GraphBuilder::with_capacity(file.markers.len(), file.markers.len() * 3);
    let mut by_label: HashMap<&str, MarkerId> = HashMap::with_capacity(file.markers.len());

    for entry in &file.markers {
        let id = b.add_marker(Vec3::from(entry.position), entry.label.as_str());
        if by_label.insert(entry.label.as_str(), id).is_some() {
            bail!("duplicate marker label {:?}", entry.label);
        }
    }

    for entry in &file.markers {
        let from = by_label[entry.label.as_str()];
        for neighbor in &entry.neighbors {
            let Some(&to) = by_label.get(neighbor.as_str()) else {
                bail!("marker {:?} lists unknown neighbor {:?}", entry.label, neighbor);
            };
            b.add_neighbor(from, to);
        }
    }

    Ok(b.build()?)
}

/// A small campus used when no graph file is given.  `Tower` has no links
/// and is unreachable from everywhere else.
pub const SAMPLE_CAMPUS: &str = r#"{
  "markers": [
    { "label": "Gate",    "position": [0.0,  0.0, 0.0],  "neighbors": ["Quad", "Cafe"] },
    { "label": "Quad",    "position": [10.0, 0.0, 0.0],  "neighbors": ["Gate", "Hall", "Library"] },
    { "label": "Cafe",    "position": [0.0,  0.0, 10.0], "neighbors": ["Gate", "Hall"] },
    { "label": "Hall",    "position": [10.0, 0.0, 10.0], "neighbors": ["Quad", "Cafe", "Lab"] },
    { "label": "Library", "position": [20.0, 1.5, 4.0],  "neighbors": ["Quad", "Lab"] },
    { "label": "Lab",     "position": [20.0, 1.5, 14.0], "neighbors": ["Library", "Hall"] },
    { "label": "Tower",   "position": [40.0, 0.0, 40.0] }
  ]
}"#;
