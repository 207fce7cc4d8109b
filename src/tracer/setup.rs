use log::debug;
use nalgebra::Point3;
use rand::Rng;

use crate::error::SceneError;
use crate::tracer::scene::{Material, MaterialId, Scene, Sphere};
use crate::tracer::vector::Vec3;
use crate::util::random_point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    pub sphere_count: usize,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self { sphere_count: 40 }
    }
}

// 첫 번째 재질은 바닥에도 씀
pub fn default_palette() -> Vec<Material> {
    [
        ([0.75, 1.0, 0.75], 0.975),
        ([0.0, 0.0, 1.0], 0.9),
        ([1.0, 0.0, 0.0], 0.9),
        ([0.0, 1.0, 0.0], 1.0),
        ([1.0, 1.0, 0.0], 0.985),
        ([0.0, 1.0, 1.0], 0.985),
        ([1.0, 0.0, 1.0], 0.985),
        ([1.0, 1.0, 1.0], 0.95),
        ([0.25, 0.25, 1.0], 0.95),
        ([1.0, 0.25, 0.25], 0.95),
        ([0.5, 1.0, 0.25], 0.95),
        ([1.0, 1.0, 0.25], 0.9),
        ([0.25, 1.0, 1.0], 0.9),
        ([1.0, 0.25, 1.0], 0.9),
    ]
    .into_iter()
    .map(|([r, g, b], roughness)| Material::new(Vec3::new(r, g, b), roughness))
    .collect()
}

/// 임의의 구들을 흩뿌리고, 그 아래에 아주 큰 구를 깔아서 바닥으로 씀.
/// 같은 시드의 `rng`를 넘기면 항상 같은 씬이 나옴.
pub fn random_scene<R: Rng>(
    rng: &mut R,
    options: &SceneOptions,
) -> Result<Scene, SceneError> {
    let materials = default_palette();

    let mut spheres = Vec::with_capacity(options.sphere_count + 1);
    for i in 0..options.sphere_count {
        let center = random_point(rng, -5.0..5.0, 0.0..5.0, 0.0..10.0);
        let radius = rng.gen_range(0.0..1.25);
        spheres.push(Sphere::new(center, radius, MaterialId(i % materials.len())));
    }

    spheres.push(Sphere::new(
        Point3::new(0.0, -1000.0, 5.0),
        999.0,
        MaterialId(0),
    ));

    debug!(
        "generated scene with {} spheres and {} materials",
        spheres.len(),
        materials.len()
    );

    Scene::new(materials, spheres)
}
