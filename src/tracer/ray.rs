use nalgebra::Point3;

use crate::tracer::vector::Vec3;

// direction은 정규화하지 않음. 교차 계산에서 a = |d|^2 로 크기를 고려함
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}
