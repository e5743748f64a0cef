use serde::Serialize;

use crate::error::{GridError, GridResult};

/// 单个坐标轴的分箱边界
///
/// 长度为 N 的边界把坐标轴划分为 N 个区间:
/// - 第 0 个区间为 (-∞, edges[0]]，低于范围的值全部落入这里
/// - 第 i 个区间 (i ≥ 1) 为 (edges[i-1], edges[i]]
///
/// 大于最后一个边界的值不属于任何区间。
/// 边界需要升序排列，这里不做校验。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    pub fn new(edges: Vec<f64>) -> GridResult<Self> {
        if edges.is_empty() {
            return Err(GridError::invalid("分箱边界不能为空"));
        }
        Ok(BinEdges { edges })
    }

    /// 在 [start, stop] 上生成 num 个等间距边界，最后一个边界恰好等于 stop
    pub fn linspace(start: f64, stop: f64, num: usize) -> GridResult<Self> {
        if num == 0 {
            return Err(GridError::invalid("分箱数量必须至少为 1"));
        }
        if num == 1 {
            return Ok(BinEdges { edges: vec![start] });
        }

        let step = (stop - start) / (num - 1) as f64;
        let mut edges: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
        edges[num - 1] = stop;
        Ok(BinEdges { edges })
    }

    /// 按观测到的最小/最大值生成等间距边界，非有限值不参与范围计算
    pub fn spanning(values: &[f64], resolution: usize) -> GridResult<Self> {
        let (min, max) = finite_range(values)
            .ok_or_else(|| GridError::invalid("坐标数组中没有有限值，无法确定分箱范围"))?;
        Self::linspace(min, max, resolution)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// 通过 `new`/`linspace` 构造的边界至少有一个元素，
    /// 分箱函数仍把非空作为自身的前置条件检查
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.edges[0]
    }

    pub fn last(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// 返回 value 所在区间的下标；超过最后一个边界或为 NaN 时返回 None
    #[inline]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let index = self.edges.partition_point(|&edge| edge < value);
        (index < self.edges.len()).then_some(index)
    }
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
