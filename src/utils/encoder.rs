use crate::error::GridResult;
use crate::utils::occupancy_grid::OccupancyGrid;

/// 占据网格编码器 trait
/// 不同输出格式需要实现这个 trait
pub trait GridEncoder: Send + Sync {
    /// 获取支持的格式名称，例如: "json", "bin"
    fn supported_formats(&self) -> Vec<&'static str>;

    /// 检查格式名称是否被支持
    fn supports(&self, format: &str) -> bool {
        self.supported_formats()
            .iter()
            .any(|name| name.eq_ignore_ascii_case(format))
    }

    /// 响应的 Content-Type
    fn content_type(&self) -> &'static str;

    /// 把网格编码为字节
    fn encode(&self, grid: &OccupancyGrid) -> GridResult<Vec<u8>>;

    /// 获取编码器名称（用于日志和错误信息）
    fn name(&self) -> &'static str;
}
