//! Overlap-aware layout packing.
//!
//! Blocks that transitively overlap form a cluster; inside a cluster every
//! block gets the first column whose previous block has already ended.
//! Each block's horizontal position is then `column / columns` with width
//! `1 / columns`, so a cluster always spans the full width.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::block::{Block, TimeOfDay};

/// Horizontal placement of one block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSlot {
    /// Left offset as a fraction of the full width
    pub left: f64,
    /// Width as a fraction of the full width
    pub width: f64,
    /// Zero-based column inside the cluster
    pub column: usize,
    /// Number of columns in the block's cluster
    pub columns: usize,
    /// Zero-based cluster index in start order
    pub cluster: usize,
}

struct Placement<'a> {
    block: &'a Block,
    column: usize,
}

/// Compute a placement for every block, keyed by block id.
///
/// Ids are expected to be unique; see [`crate::block::validate_blocks`].
pub fn calculate_layout(blocks: &[Block]) -> BTreeMap<String, LayoutSlot> {
    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut layout = BTreeMap::new();
    let mut cluster: Vec<&Block> = Vec::new();
    let mut cluster_end = TimeOfDay::MIDNIGHT;
    let mut cluster_index = 0;

    for block in sorted {
        if !cluster.is_empty() && block.start >= cluster_end {
            place_cluster(&cluster, cluster_index, &mut layout);
            cluster.clear();
            cluster_index += 1;
        }
        if cluster.is_empty() {
            cluster_end = block.end;
        } else {
            cluster_end = cluster_end.max(block.end);
        }
        cluster.push(block);
    }
    if !cluster.is_empty() {
        place_cluster(&cluster, cluster_index, &mut layout);
        cluster_index += 1;
    }

    tracing::debug!(blocks = blocks.len(), clusters = cluster_index, "layout computed");
    layout
}

fn place_cluster(
    cluster: &[&Block],
    cluster_index: usize,
    layout: &mut BTreeMap<String, LayoutSlot>,
) {
    // Last block placed in each column
    let mut column_tails: Vec<TimeOfDay> = Vec::new();
    let mut placements = Vec::with_capacity(cluster.len());

    for block in cluster {
        let column = match column_tails.iter().position(|tail| *tail <= block.start) {
            Some(column) => {
                column_tails[column] = block.end;
                column
            }
            None => {
                column_tails.push(block.end);
                column_tails.len() - 1
            }
        };
        placements.push(Placement { block, column });
    }

    let columns = column_tails.len().max(1);
    let width = 1.0 / columns as f64;
    for placement in placements {
        layout.insert(
            placement.block.id.clone(),
            LayoutSlot {
                left: placement.column as f64 * width,
                width,
                column: placement.column,
                columns,
                cluster: cluster_index,
            },
        );
    }
}
