mod gzip;
mod json;
mod raw;

pub use gzip::GzipEncoder;
pub use json::JsonEncoder;
pub use raw::{RAW_MAGIC, RAW_VERSION, RawEncoder};

/// 获取所有可用的编码器
pub fn get_all_encoders() -> Vec<Box<dyn crate::utils::encoder::GridEncoder>> {
    vec![
        Box::new(JsonEncoder::new()),
        Box::new(RawEncoder::new()),
        Box::new(GzipEncoder::new()),
    ]
}
