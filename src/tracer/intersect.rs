use nalgebra::Point3;

use crate::tracer::ray::Ray;
use crate::tracer::scene::Sphere;

// 판별식이 이 값 이하면 접선으로 보고 근을 하나만 씀
pub const INTERSECTION_EPSILON: f32 = 0.00001;

/// 광선 진행 방향(t >= 0)에 있는 교점들. 가까운 순서로 최대 2개
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersections {
    points: [Point3<f32>; 2],
    len: usize,
}

impl Intersections {
    fn empty() -> Self {
        Self {
            points: [Point3::origin(); 2],
            len: 0,
        }
    }

    fn push(&mut self, point: Point3<f32>) {
        self.points[self.len] = point;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<&Point3<f32>> {
        self.as_slice().first()
    }

    pub fn as_slice(&self) -> &[Point3<f32>] {
        &self.points[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f32>> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Point3<f32>;
    type IntoIter = std::slice::Iter<'a, Point3<f32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub fn intersect(ray: &Ray, sphere: &Sphere) -> Intersections {
    let mut result = Intersections::empty();

    // 구가 원점에 있다고 보고 광선 시작점을 그만큼 옮겨서 계산함
    // (d.d) t^2 + 2 (d.L) t + (L.L - r^2) = 0
    let origin = ray.origin - sphere.center;

    let a = ray.direction.magnitude_squared();
    let b = 2.0 * ray.direction.dot(&origin);
    let c = origin.magnitude_squared() - sphere.radius.powi(2);

    // 방향이 영벡터인 광선은 아무것도 맞추지 않음
    if a == 0.0 {
        return result;
    }

    let discriminant = b.powi(2) - 4.0 * a * c;
    if discriminant < 0.0 {
        return result;
    }

    let root = discriminant.sqrt();
    let far = (-b + root) / (2.0 * a);
    let mut far_included = false;
    if far >= 0.0 {
        result.push(ray.at(far));
        far_included = true;
    }

    if discriminant > INTERSECTION_EPSILON {
        let near = (-b - root) / (2.0 * a);
        if near >= 0.0 {
            result.push(ray.at(near));

            if far_included && near < far {
                result.points.swap(0, 1);
            }
        }
    }

    result
}
