use serde::Serialize;

use crate::error::{GridError, GridResult};
use crate::utils::bin_edges::BinEdges;
use crate::utils::binner::compute_occupancy_with_progress;
use crate::utils::extractor::{Projection, TypeSelector, select_coordinates};
use crate::utils::particle_table::ParticleTable;
use crate::utils::progress::RowProgress;

/// 二维占据计数矩阵
/// 按行优先存储，行对应 x 区间，列对应 y 区间
/// 索引计算: index = row * cols + col
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyMatrix {
    rows: usize,
    cols: usize,
    counts: Vec<u64>,
}

impl OccupancyMatrix {
    pub fn new(rows: usize, cols: usize, counts: Vec<u64>) -> GridResult<Self> {
        if counts.len() != rows * cols {
            return Err(GridError::invalid(format!(
                "数据量不匹配: shape ({}, {}) 需要 {} 个元素，但提供了 {} 个",
                rows,
                cols,
                rows * cols,
                counts.len()
            )));
        }
        Ok(OccupancyMatrix { rows, cols, counts })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.counts[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> &[u64] {
        &self.counts[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// 所有格子计数之和
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// 一次分箱的完整结果: 两个轴的边界加计数矩阵
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyGrid {
    pub selector: String,
    pub projection: &'static str,
    /// 行、列分别对应的坐标轴名称
    pub axes: (&'static str, &'static str),
    pub x_edges: BinEdges,
    pub y_edges: BinEdges,
    pub counts: OccupancyMatrix,
    /// 参与分箱的粒子数（筛选之后）
    pub selected: usize,
}

impl OccupancyGrid {
    pub fn shape(&self) -> (usize, usize) {
        self.counts.shape()
    }
}

/// 从粒子表构建占据网格
///
/// 1. 按类型筛选粒子坐标
/// 2. 根据视角取出两个坐标轴
/// 3. 在观测到的最小/最大值之间生成 resolution 个等间距边界
/// 4. 统计每个格子的粒子数
pub fn build_occupancy_grid(
    table: &ParticleTable,
    selector: TypeSelector,
    projection: Projection,
    resolution: usize,
    progress: &mut dyn RowProgress,
) -> GridResult<OccupancyGrid> {
    if resolution == 0 {
        return Err(GridError::invalid("resolution 必须至少为 1"));
    }

    let selected = select_coordinates(table, selector);
    if selected.is_empty() {
        return Err(GridError::invalid(format!(
            "没有类型为 {} 的粒子，无法生成网格",
            selector
        )));
    }

    let (horizontal, vertical) = selected.project(projection);
    let x_edges = BinEdges::spanning(horizontal, resolution)?;
    let y_edges = BinEdges::spanning(vertical, resolution)?;
    let counts = compute_occupancy_with_progress(horizontal, vertical, &x_edges, &y_edges, progress)?;

    Ok(OccupancyGrid {
        selector: selector.to_string(),
        projection: projection.name(),
        axes: projection.axes(),
        x_edges,
        y_edges,
        counts,
        selected: selected.len(),
    })
}
