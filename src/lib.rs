use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod camera;
pub mod config;
pub mod error;
pub mod tracer;
mod util;

pub use crate::camera::Camera;
pub use crate::config::RenderConfig;
pub use crate::error::{Error, Result};
pub use crate::tracer::canvas::{Canvas, PixelSink};
pub use crate::tracer::scene::{Material, MaterialId, Scene, Sphere};
pub use crate::tracer::{Settings, Tracer};

/// 구들로 이루어진 씬을 픽셀당 광선 하나로 렌더링해서 이미지로 저장함
#[derive(Debug, Default, Parser)]
#[command(name = "softrt", version, about)]
pub struct Args {
    /// TOML 설정 파일. 없으면 기본값으로 렌더링
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// 출력 파일 (.png, .jpg, .jpeg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 씬 생성에 쓸 난수 시드
    #[arg(long)]
    pub seed: Option<u64>,

    /// rayon 없이 한 스레드로 렌더링
    #[arg(long)]
    pub sequential: bool,
}

impl Args {
    pub fn resolve(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.sequential {
            config.parallel = false;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn run(args: Args) -> Result<()> {
    // 테스트에서 여러 번 불려도 괜찮도록 try_init 사용
    let _ = env_logger::try_init();

    let config = args.resolve()?;
    render_to_file(&config)
}

pub fn render_to_file(config: &RenderConfig) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let scene = tracer::setup::random_scene(&mut rng, &config.scene_options())?;
    let tracer = Tracer::new(config.settings());
    let camera = config.camera();

    info!(
        "rendering {}x{} with {} spheres (seed {}, max depth {})",
        config.width,
        config.height,
        scene.spheres().len(),
        config.seed,
        tracer.settings.max_depth
    );

    let started = Instant::now();
    let mut canvas = Canvas::new(config.width, config.height);
    tracer.render(config.width, config.height, &scene, &camera, &mut canvas);
    info!("frame finished in {:?}", started.elapsed());

    canvas.save(&config.output)
}
