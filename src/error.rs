use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("sphere {sphere} refers to material {material}, but only {available} materials exist")]
    UnknownMaterial {
        sphere: usize,
        material: usize,
        available: usize,
    },
    #[error("sphere {index} has an invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },
    #[error("material {index} has roughness {roughness}, expected a value in [0, 1]")]
    InvalidRoughness { index: usize, roughness: f32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("unsupported output format for {0}, use .png, .jpg or .jpeg")]
    UnsupportedFormat(PathBuf),
    #[error("failed to write image")]
    Image(#[from] image::ImageError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
