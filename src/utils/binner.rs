use crate::error::{GridError, GridResult};
use crate::utils::bin_edges::BinEdges;
use crate::utils::occupancy_grid::OccupancyMatrix;
use crate::utils::progress::{NoProgress, RowProgress};

/// 统计每个 (x 区间, y 区间) 中同时落入两个区间的粒子数
///
/// 返回矩阵的行对应 x 区间，列对应 y 区间。
/// x 与 y 必须是逐粒子配对的坐标，长度不一致时直接报错。
pub fn compute_occupancy(
    x: &[f64],
    y: &[f64],
    x_edges: &BinEdges,
    y_edges: &BinEdges,
) -> GridResult<OccupancyMatrix> {
    compute_occupancy_with_progress(x, y, x_edges, y_edges, &mut NoProgress)
}

/// 同 `compute_occupancy`，每完成一行调用一次 `progress`
pub fn compute_occupancy_with_progress(
    x: &[f64],
    y: &[f64],
    x_edges: &BinEdges,
    y_edges: &BinEdges,
    progress: &mut dyn RowProgress,
) -> GridResult<OccupancyMatrix> {
    if x.len() != y.len() {
        return Err(GridError::invalid(format!(
            "x 与 y 坐标数量不一致: x 有 {} 个，y 有 {} 个",
            x.len(),
            y.len()
        )));
    }
    if x_edges.is_empty() || y_edges.is_empty() {
        return Err(GridError::invalid("分箱边界不能为空"));
    }

    let rows = x_edges.len();
    let cols = y_edges.len();

    // 先按 x 区间把每个粒子的 y 区间下标归组，任一轴越界的粒子不计入
    let mut columns_by_row: Vec<Vec<usize>> = vec![Vec::new(); rows];
    for (&xv, &yv) in x.iter().zip(y) {
        if let (Some(row), Some(col)) = (x_edges.bin_index(xv), y_edges.bin_index(yv)) {
            columns_by_row[row].push(col);
        }
    }

    let mut counts = vec![0u64; rows * cols];
    for (row, columns) in columns_by_row.iter().enumerate() {
        let cells = &mut counts[row * cols..(row + 1) * cols];
        for &col in columns {
            cells[col] += 1;
        }
        progress.row_done(row + 1, rows);
    }

    OccupancyMatrix::new(rows, cols, counts)
}
