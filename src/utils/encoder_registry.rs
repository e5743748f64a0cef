use crate::utils::encoder::GridEncoder;

/// 编码器注册表
/// 管理所有可用的网格编码器，并根据格式名称匹配对应的编码器
pub struct EncoderRegistry {
    encoders: Vec<Box<dyn GridEncoder>>,
}

impl EncoderRegistry {
    /// 创建新的编码器注册表，自动注册所有可用的编码器
    pub fn new() -> Self {
        let encoders = crate::encoders::get_all_encoders();
        Self { encoders }
    }

    /// 根据格式名称查找匹配的编码器
    /// format: 格式名称，例如 "json"
    pub fn find_encoder(&self, format: &str) -> Option<&dyn GridEncoder> {
        self.encoders
            .iter()
            .find(|encoder| encoder.supports(format))
            .map(|e| e.as_ref())
    }

    /// 获取所有支持的格式列表
    pub fn supported_formats(&self) -> Vec<String> {
        let mut formats = Vec::new();
        for encoder in &self.encoders {
            formats.extend(
                encoder
                    .supported_formats()
                    .iter()
                    .map(|s| s.to_lowercase()),
            );
        }
        formats.sort();
        formats.dedup();
        formats
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
