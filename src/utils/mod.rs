pub mod bin_edges;
pub mod binner;
pub mod encoder;
pub mod encoder_registry;
pub mod extractor;
pub mod occupancy_grid;
pub mod particle_table;
pub mod progress;
