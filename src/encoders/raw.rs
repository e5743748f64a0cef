use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{GridError, GridResult};
use crate::utils::encoder::GridEncoder;
use crate::utils::occupancy_grid::OccupancyGrid;

pub const RAW_MAGIC: &[u8; 4] = b"OCCG";
pub const RAW_VERSION: u32 = 1;

/// 小端二进制格式
///
/// 布局:
/// - 4 字节 magic "OCCG"
/// - u32 版本号
/// - u32 行数 (x 区间数), u32 列数 (y 区间数)
/// - 行数个 f64 x 边界, 列数个 f64 y 边界
/// - 行数 * 列数个 u64 计数，按行优先
pub struct RawEncoder;

impl RawEncoder {
    pub fn new() -> Self {
        RawEncoder
    }

    /// 把网格写入任意 writer，gzip 编码器复用这一步
    pub fn write_to<W: Write>(&self, grid: &OccupancyGrid, writer: &mut W) -> GridResult<()> {
        let (rows, cols) = grid.shape();
        let rows_u32 = u32::try_from(rows)
            .map_err(|_| GridError::invalid(format!("行数 {} 超出 u32 范围", rows)))?;
        let cols_u32 = u32::try_from(cols)
            .map_err(|_| GridError::invalid(format!("列数 {} 超出 u32 范围", cols)))?;

        writer.write_all(RAW_MAGIC)?;
        writer.write_u32::<LittleEndian>(RAW_VERSION)?;
        writer.write_u32::<LittleEndian>(rows_u32)?;
        writer.write_u32::<LittleEndian>(cols_u32)?;
        for &edge in grid.x_edges.as_slice() {
            writer.write_f64::<LittleEndian>(edge)?;
        }
        for &edge in grid.y_edges.as_slice() {
            writer.write_f64::<LittleEndian>(edge)?;
        }
        for &count in grid.counts.as_slice() {
            writer.write_u64::<LittleEndian>(count)?;
        }
        Ok(())
    }

    /// 编码后的字节数
    pub fn encoded_len(grid: &OccupancyGrid) -> usize {
        let (rows, cols) = grid.shape();
        16 + (rows + cols) * std::mem::size_of::<f64>() + rows * cols * std::mem::size_of::<u64>()
    }
}

impl GridEncoder for RawEncoder {
    fn supported_formats(&self) -> Vec<&'static str> {
        vec!["bin", "raw"]
    }

    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }

    fn encode(&self, grid: &OccupancyGrid) -> GridResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(Self::encoded_len(grid));
        self.write_to(grid, &mut bytes)?;
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "Raw Encoder"
    }
}
