pub mod app_state;
pub mod config;
pub mod encoders;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod snapshot;
pub mod utils;

pub use error::{GridError, GridResult};
pub use utils::bin_edges::BinEdges;
pub use utils::binner::{compute_occupancy, compute_occupancy_with_progress};
pub use utils::extractor::{
    AtomType, Projection, SelectedCoordinates, TypeSelector, select_coordinates,
    select_coordinates_by,
};
pub use utils::occupancy_grid::{OccupancyGrid, OccupancyMatrix, build_occupancy_grid};
pub use utils::particle_table::{ParticleRecord, ParticleTable};
