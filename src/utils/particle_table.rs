use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{GridError, GridResult};

/// 每行数据至少需要的列数: id, type, x, y, z
pub const MIN_COLUMNS: usize = 5;

/// 粒子表中的一行
/// 列映射固定: 0 = 帧号/编号, 1 = 类型代码, 2/3/4 = x/y/z
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleRecord {
    pub frame: f64,
    pub type_code: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ParticleRecord {
    /// 从一行原始数值构造记录，多出的列会被忽略
    pub fn from_row(index: usize, row: &[f64]) -> GridResult<Self> {
        if row.len() < MIN_COLUMNS {
            return Err(GridError::invalid(format!(
                "第 {} 行只有 {} 列，至少需要 {} 列 (id, type, x, y, z)",
                index,
                row.len(),
                MIN_COLUMNS
            )));
        }

        let raw_type = row[1];
        if !raw_type.is_finite() || raw_type.fract() != 0.0 {
            return Err(GridError::invalid(format!(
                "第 {} 行的类型代码 {} 不是整数",
                index, raw_type
            )));
        }

        Ok(ParticleRecord {
            frame: row[0],
            type_code: raw_type as i64,
            x: row[2],
            y: row[3],
            z: row[4],
        })
    }
}

/// 某一时刻的粒子表，保持输入顺序，不要求唯一
#[derive(Debug, Clone, Default)]
pub struct ParticleTable {
    records: Vec<ParticleRecord>,
}

impl ParticleTable {
    /// 从原始数值行构造粒子表，任意一行不合法则整体失败
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> GridResult<Self> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| ParticleRecord::from_row(index, row.as_ref()))
            .collect::<GridResult<Vec<_>>>()?;
        Ok(ParticleTable { records })
    }

    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按类型代码统计粒子数量
    pub fn count_by_type(&self) -> BTreeMap<i64, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.type_code).or_insert(0) += 1;
        }
        counts
    }
}
