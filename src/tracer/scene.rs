use nalgebra::Point3;

use crate::error::SceneError;
use crate::tracer::vector::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    // 1에 가까울수록 자기 색, 0에 가까울수록 튕긴 빛을 따라감
    pub roughness: f32,
}

impl Material {
    pub fn new(color: Vec3, roughness: f32) -> Self {
        Self { color, roughness }
    }
}

/// 씬의 재질 테이블 안의 인덱스
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
    pub material: MaterialId,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// 렌더링 도중에는 읽기만 함. 만들 때 모든 구의 재질 참조가 유효한지 확인해 둠
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    spheres: Vec<Sphere>,
}

impl Scene {
    pub fn new(materials: Vec<Material>, spheres: Vec<Sphere>) -> Result<Self, SceneError> {
        for (index, material) in materials.iter().enumerate() {
            if !(0.0..=1.0).contains(&material.roughness) {
                return Err(SceneError::InvalidRoughness {
                    index,
                    roughness: material.roughness,
                });
            }
        }

        for (index, sphere) in spheres.iter().enumerate() {
            if !sphere.radius.is_finite() || sphere.radius < 0.0 {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            if sphere.material.0 >= materials.len() {
                return Err(SceneError::UnknownMaterial {
                    sphere: index,
                    material: sphere.material.0,
                    available: materials.len(),
                });
            }
        }

        Ok(Self { materials, spheres })
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    // new()에서 인덱스를 검사했으니 여기선 범위를 벗어날 수 없음
    pub fn material(&self, sphere: &Sphere) -> &Material {
        &self.materials[sphere.material.0]
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}
