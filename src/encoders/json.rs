use serde::Serialize;

use crate::error::GridResult;
use crate::utils::encoder::GridEncoder;
use crate::utils::occupancy_grid::OccupancyGrid;

/// JSON 格式，counts 按行给出二维数组
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        JsonEncoder
    }
}

#[derive(Serialize)]
struct JsonGrid<'a> {
    selector: &'a str,
    projection: &'a str,
    axes: [&'a str; 2],
    shape: [usize; 2],
    x_edges: &'a [f64],
    y_edges: &'a [f64],
    counts: Vec<&'a [u64]>,
    total: u64,
    max: u64,
    selected: usize,
}

impl GridEncoder for JsonEncoder {
    fn supported_formats(&self) -> Vec<&'static str> {
        vec!["json"]
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode(&self, grid: &OccupancyGrid) -> GridResult<Vec<u8>> {
        let (rows, cols) = grid.shape();
        let body = JsonGrid {
            selector: &grid.selector,
            projection: grid.projection,
            axes: [grid.axes.0, grid.axes.1],
            shape: [rows, cols],
            x_edges: grid.x_edges.as_slice(),
            y_edges: grid.y_edges.as_slice(),
            counts: (0..rows).map(|row| grid.counts.row(row)).collect(),
            total: grid.counts.total(),
            max: grid.counts.max(),
            selected: grid.selected,
        };
        Ok(serde_json::to_vec(&body)?)
    }

    fn name(&self) -> &'static str {
        "JSON Encoder"
    }
}
