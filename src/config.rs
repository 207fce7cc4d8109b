use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use serde::Deserialize;

use crate::camera::Camera;
use crate::error::ConfigError;
use crate::tracer::setup::SceneOptions;
use crate::tracer::vector::Vec3;
use crate::tracer::{Settings, MAX_DEPTH_LIMIT};

// 파일에 없는 키는 전부 기본값을 씀
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    pub seed: u64,
    pub sphere_count: usize,
    pub parallel: bool,
    pub max_depth: u32,
    pub ambient: f32,
    pub specular_exponent: f32,
    pub sky_color: [f32; 3],
    pub light_direction: [f32; 3],
    pub camera_position: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        let settings = Settings::default();
        let sky = settings.sky_color;
        Self {
            width: 1024,
            height: 1024,
            output: PathBuf::from("render.png"),
            seed: 43,
            sphere_count: SceneOptions::default().sphere_count,
            parallel: settings.parallel,
            max_depth: settings.max_depth,
            ambient: settings.ambient,
            specular_exponent: settings.specular_exponent,
            sky_color: [sky.x, sky.y, sky.z],
            light_direction: [1.0, 1.0, -1.0],
            camera_position: [0.0, 0.0, -2.0],
        }
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(
                "width and height must be positive".into(),
            ));
        }

        for (name, value) in [
            ("sky_color", self.sky_color),
            ("light_direction", self.light_direction),
            ("camera_position", self.camera_position),
        ] {
            if !value.iter().all(|c| c.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must contain finite values"
                )));
            }
        }

        if Vec3::from(self.light_direction).magnitude_squared() == 0.0 {
            return Err(ConfigError::Invalid(
                "light_direction must not be a zero vector".into(),
            ));
        }

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_depth must be at most {MAX_DEPTH_LIMIT}, got {}",
                self.max_depth
            )));
        }

        if !(0.0..=1.0).contains(&self.ambient) {
            return Err(ConfigError::Invalid(format!(
                "ambient must be in [0, 1], got {}",
                self.ambient
            )));
        }

        if !self.specular_exponent.is_finite() || self.specular_exponent < 0.0 {
            return Err(ConfigError::Invalid(
                "specular_exponent must be a non-negative number".into(),
            ));
        }

        Ok(())
    }

    // validate()를 먼저 통과해야 함. 빛 방향은 여기서 정규화함
    pub fn settings(&self) -> Settings {
        Settings {
            light_direction: Vec3::from(self.light_direction).normalize(),
            sky_color: Vec3::from(self.sky_color),
            ambient: self.ambient,
            specular_exponent: self.specular_exponent,
            max_depth: self.max_depth,
            parallel: self.parallel,
            ..Default::default()
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(Point3::from(self.camera_position))
    }

    pub fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            sphere_count: self.sphere_count,
        }
    }
}
