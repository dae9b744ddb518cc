//! System utilities

pub mod cpu_features;

pub use cpu_features::{get_cpu_features, CpuFeatures};
