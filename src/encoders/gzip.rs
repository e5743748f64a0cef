use flate2::Compression;
use flate2::write::GzEncoder;

use super::raw::RawEncoder;
use crate::error::GridResult;
use crate::utils::encoder::GridEncoder;
use crate::utils::occupancy_grid::OccupancyGrid;

/// gzip 压缩后的小端二进制格式，内容与 RawEncoder 相同
pub struct GzipEncoder {
    raw: RawEncoder,
    level: Compression,
}

impl GzipEncoder {
    pub fn new() -> Self {
        Self {
            raw: RawEncoder::new(),
            level: Compression::default(),
        }
    }
}

impl GridEncoder for GzipEncoder {
    fn supported_formats(&self) -> Vec<&'static str> {
        vec!["bin.gz", "gz"]
    }

    fn content_type(&self) -> &'static str {
        "application/gzip"
    }

    fn encode(&self, grid: &OccupancyGrid) -> GridResult<Vec<u8>> {
        let mut encoder = GzEncoder::new(
            Vec::with_capacity(RawEncoder::encoded_len(grid) / 4),
            self.level,
        );
        self.raw.write_to(grid, &mut encoder)?;
        Ok(encoder.finish()?)
    }

    fn name(&self) -> &'static str {
        "Gzip Encoder"
    }
}
