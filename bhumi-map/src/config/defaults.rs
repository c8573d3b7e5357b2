//! Default value functions for serde deserialization.

pub fn resolution() -> f32 {
    0.05
}

pub fn margin() -> f32 {
    10.0
}

pub fn elevation_neighbors() -> usize {
    8
}

pub fn occupancy_neighbors() -> usize {
    16
}

pub fn occupancy_threshold() -> f32 {
    1.0
}

pub fn kernel_half_width() -> usize {
    10
}

pub fn kernel_sigma_sq() -> f32 {
    50.0
}

pub fn robot_radius() -> f32 {
    0.5
}

pub fn soil_k_c() -> f32 {
    0.99
}

pub fn soil_k_phi() -> f32 {
    1528.43
}

pub fn soil_n0() -> f32 {
    1.1
}

pub fn soil_phi_deg() -> f32 {
    28.0
}

pub fn output_format() -> String {
    "bhumi".to_string()
}

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn file_stem() -> String {
    "terrain".to_string()
}
