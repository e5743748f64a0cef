pub mod health;
pub mod occupancy;
pub mod snapshot;

pub use health::hello;
pub use occupancy::get_occupancy;
pub use snapshot::{delete_snapshot, upload_snapshot};
