use std::time::Instant;

use log::{debug, warn};
use nalgebra::Point3;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::tracer::canvas::PixelSink;
use crate::tracer::intersect::intersect;
use crate::tracer::ray::Ray;
use crate::tracer::scene::{Material, Scene};
use crate::tracer::vector::{lerp, normalize_or_zero, saturate, Vec3, WHITE};

pub mod canvas;
pub mod intersect;
pub mod ray;
pub mod scene;
pub mod setup;
pub mod vector;

// 재귀 깊이의 상한. 이보다 큰 max_depth는 이 값으로 잘림
pub const MAX_DEPTH_LIMIT: u32 = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // 무한히 먼 방향광 하나. 정규화된 값이어야 함
    pub light_direction: Vec3,
    pub sky_color: Vec3,
    pub ambient: f32,
    pub specular_exponent: f32,
    // 표면에서 새 광선을 쏠 때 법선 방향으로 띄우는 거리
    pub surface_bias: f32,
    pub max_depth: u32,
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(1.0, 1.0, -1.0).normalize(),
            sky_color: Vec3::new(0.75, 0.75, 1.0),
            ambient: 0.15,
            specular_exponent: 128.0,
            surface_bias: 0.001,
            max_depth: 8,
            parallel: true,
        }
    }
}

pub struct Tracer {
    pub settings: Settings,
}

impl Tracer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// 모든 픽셀마다 광선을 하나씩 쏘고, 결과를 `sink`에 정확히 한 번씩 넘김.
    /// 순서는 열 우선 (x 바깥, y 안쪽).
    pub fn render<S: PixelSink>(
        &self,
        width: u32,
        height: u32,
        scene: &Scene,
        camera: &Camera,
        sink: &mut S,
    ) {
        if scene.is_empty() {
            warn!("scene has no spheres, the whole frame will be sky");
        }

        let started = Instant::now();

        if self.settings.parallel {
            // 각 열을 rayon으로 따로 계산한 뒤, 모두 끝나면 한꺼번에 sink로 보냄
            let columns: Vec<Vec<[u8; 3]>> = (0..width)
                .into_par_iter()
                .map(|x| {
                    (0..height)
                        .map(|y| self.per_pixel(scene, camera, x, y, width, height))
                        .collect()
                })
                .collect();

            for (x, column) in columns.into_iter().enumerate() {
                for (y, rgb) in column.into_iter().enumerate() {
                    sink.set_pixel(x as u32, y as u32, rgb);
                }
            }
        } else {
            for x in 0..width {
                for y in 0..height {
                    let rgb = self.per_pixel(scene, camera, x, y, width, height);
                    sink.set_pixel(x, y, rgb);
                }
            }
        }

        debug!(
            "traced {} primary rays in {:?} (parallel: {})",
            width as u64 * height as u64,
            started.elapsed(),
            self.settings.parallel
        );
    }

    pub fn per_pixel(
        &self,
        scene: &Scene,
        camera: &Camera,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> [u8; 3] {
        let ray = camera.ray_for_pixel(x, y, width, height);
        quantize(&self.shade(&ray, scene, &camera.position, 0))
    }

    /// 광선 하나의 색을 구함. 깊이가 `max_depth`에 닿거나 아무것도 맞지 않으면 재귀를 멈춤.
    pub fn shade(
        &self,
        ray: &Ray,
        scene: &Scene,
        camera_position: &Point3<f32>,
        depth: u32,
    ) -> Vec3 {
        let Some(HitPayload {
            position,
            normal,
            eye,
            material,
            ..
        }) = self.closest_hit(ray, scene, camera_position)
        else {
            return self.settings.sky_color;
        };

        let light = &self.settings.light_direction;

        let mut diffuse = normal.dot(light).max(0.0);

        // Blinn 하이라이트: 시선 반대 방향과 빛 방향의 중간 벡터
        let half = normalize_or_zero(&(light - eye));
        let mut specular = normal
            .dot(&half)
            .max(0.0)
            .powf(self.settings.specular_exponent);

        // 표면 위 점에서 바로 쏘면 자기 자신과 다시 부딪히니 조금 띄움
        let origin = position + normal * self.settings.surface_bias;

        if self.occluded(&Ray::new(origin, *light), scene) {
            diffuse = 0.0;
            specular = 0.0;
        }

        let diffuse_color = material.color * diffuse.max(self.settings.ambient);

        if depth >= self.settings.max_depth.min(MAX_DEPTH_LIMIT) {
            return lerp(&diffuse_color, &WHITE, specular);
        }

        // 반사 방향이 아니라 법선 방향으로 튕김
        let bounced = self.shade(&Ray::new(origin, normal), scene, camera_position, depth + 1);
        let base = lerp(&diffuse_color, &bounced, 1.0 - material.roughness);

        lerp(&base, &WHITE, specular)
    }

    /// 광선 위에 구가 하나라도 있으면 true. 가장 가까운 것은 찾지 않음
    pub fn occluded(&self, ray: &Ray, scene: &Scene) -> bool {
        scene
            .spheres()
            .iter()
            .any(|sphere| !intersect(ray, sphere).is_empty())
    }

    /// 맞은 구들 중 첫 교점이 카메라에서 가장 가까운 것을 고름.
    /// 거리는 광선 시작점이 아니라 항상 카메라 위치에서 잼.
    pub fn closest_hit<'a>(
        &self,
        ray: &Ray,
        scene: &'a Scene,
        camera_position: &Point3<f32>,
    ) -> Option<HitPayload<'a>> {
        let mut closest: Option<HitPayload<'a>> = None;

        for sphere in scene.spheres() {
            let intersections = intersect(ray, sphere);
            let Some(&position) = intersections.first() else {
                continue;
            };

            let eye = position - camera_position;
            let distance = eye.magnitude();

            if let Some(previous) = &closest {
                if previous.distance <= distance {
                    continue;
                }
            }

            closest = Some(HitPayload {
                distance,
                position,
                normal: normalize_or_zero(&(position - sphere.center)),
                eye: normalize_or_zero(&eye),
                material: scene.material(sphere),
            });
        }

        closest
    }
}

// HitPayload는 맞은 위치에 대한 정보만 담고, 색은 shade에서 계산함
#[derive(Debug, Clone, Copy)]
pub struct HitPayload<'a> {
    pub distance: f32,
    pub position: Point3<f32>,
    pub normal: Vec3,
    pub eye: Vec3,
    pub material: &'a Material,
}

pub fn quantize(color: &Vec3) -> [u8; 3] {
    [
        (saturate(color.x) * 255.0) as u8,
        (saturate(color.y) * 255.0) as u8,
        (saturate(color.z) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::scene::{MaterialId, Sphere};

    fn close(a: &Vec3, b: &Vec3) -> bool {
        (a - b).amax() < 1e-4
    }

    fn single_sphere(color: Vec3, roughness: f32) -> Scene {
        Scene::new(
            vec![Material::new(color, roughness)],
            vec![Sphere::new(Point3::origin(), 1.0, MaterialId(0))],
        )
        .unwrap()
    }

    fn camera() -> Point3<f32> {
        Point3::new(0.0, 0.0, -2.0)
    }

    fn forward() -> Ray {
        Ray::new(camera(), Vec3::new(0.0, 0.0, 2.0))
    }

    fn with_depth(max_depth: u32) -> Tracer {
        Tracer::new(Settings {
            max_depth,
            ..Default::default()
        })
    }

    // 맞은 점 (0,0,-1), 법선 (0,0,-1), 시선 (0,0,1)에서의 조명 값
    fn lighting_at_front(settings: &Settings) -> (f32, f32) {
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let eye = Vec3::new(0.0, 0.0, 1.0);
        let light = settings.light_direction;
        let diffuse = normal.dot(&light).max(0.0);
        let half = (light - eye).normalize();
        let specular = normal.dot(&half).max(0.0).powf(settings.specular_exponent);
        (diffuse, specular)
    }

    #[test]
    fn miss_returns_sky_at_any_depth() {
        let scene = single_sphere(Vec3::new(1.0, 0.0, 0.0), 0.5);
        let ray = Ray::new(camera(), Vec3::new(0.0, 5.0, 1.0));
        let tracer = Tracer::new(Settings::default());

        for depth in [0, 3, 8, 20] {
            assert_eq!(
                tracer.shade(&ray, &scene, &camera(), depth),
                tracer.settings.sky_color
            );
        }
    }

    #[test]
    fn zero_max_depth_returns_local_shading_only() {
        // roughness 0이면 재귀 결과만 보이므로, 재귀하지 않았다는 걸 확인할 수 있음
        let color = Vec3::new(0.2, 0.4, 0.8);
        let scene = single_sphere(color, 0.0);
        let tracer = with_depth(0);

        let (diffuse, specular) = lighting_at_front(&tracer.settings);
        let expected = lerp(
            &(color * diffuse.max(tracer.settings.ambient)),
            &WHITE,
            specular,
        );

        assert!(close(
            &tracer.shade(&forward(), &scene, &camera(), 0),
            &expected
        ));
    }

    #[test]
    fn smooth_surface_shows_what_the_bounce_sees() {
        // 법선 방향으로 튕긴 광선은 하늘로 빠져나감
        let scene = single_sphere(Vec3::new(1.0, 0.0, 0.0), 0.0);
        let tracer = with_depth(8);

        let (_, specular) = lighting_at_front(&tracer.settings);
        let expected = lerp(&tracer.settings.sky_color, &WHITE, specular);

        assert!(close(
            &tracer.shade(&forward(), &scene, &camera(), 0),
            &expected
        ));
    }

    #[test]
    fn fully_rough_surface_ignores_the_bounce() {
        let scene = single_sphere(Vec3::new(0.3, 0.9, 0.1), 1.0);

        let deep = with_depth(8).shade(&forward(), &scene, &camera(), 0);
        let shallow = with_depth(0).shade(&forward(), &scene, &camera(), 0);

        assert!(close(&deep, &shallow));
    }

    #[test]
    fn shadowed_point_falls_back_to_ambient() {
        let settings = Settings {
            max_depth: 0,
            ..Default::default()
        };
        let blocker = Point3::new(0.0, 0.0, -1.0) + settings.light_direction * 3.0;
        let scene = Scene::new(
            vec![Material::new(Vec3::new(1.0, 0.0, 0.0), 1.0)],
            vec![
                Sphere::new(Point3::origin(), 1.0, MaterialId(0)),
                Sphere::new(blocker, 0.5, MaterialId(0)),
            ],
        )
        .unwrap();
        let tracer = Tracer::new(settings);

        let color = tracer.shade(&forward(), &scene, &camera(), 0);

        assert!(close(&color, &Vec3::new(0.15, 0.0, 0.0)));
    }

    #[test]
    fn occlusion_needs_any_sphere_on_the_ray() {
        let tracer = Tracer::new(Settings::default());
        let scene = single_sphere(Vec3::new(1.0, 1.0, 1.0), 1.0);

        assert!(tracer.occluded(&forward(), &scene));
        assert!(!tracer.occluded(&Ray::new(camera(), Vec3::new(0.0, 0.0, -1.0)), &scene));
        assert!(!tracer.occluded(&forward(), &Scene::default()));
    }

    #[test]
    fn closest_hit_ignores_scene_order() {
        let materials = vec![
            Material::new(Vec3::new(1.0, 0.0, 0.0), 1.0),
            Material::new(Vec3::new(0.0, 0.0, 1.0), 1.0),
        ];
        let far = Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0, MaterialId(1));
        let near = Sphere::new(Point3::origin(), 1.0, MaterialId(0));
        let tracer = Tracer::new(Settings::default());

        for spheres in [vec![far, near], vec![near, far]] {
            let scene = Scene::new(materials.clone(), spheres).unwrap();
            let hit = tracer.closest_hit(&forward(), &scene, &camera()).unwrap();

            assert_eq!(hit.material.color, Vec3::new(1.0, 0.0, 0.0));
            assert!((hit.distance - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn hit_normal_faces_the_camera() {
        let scene = single_sphere(Vec3::new(1.0, 1.0, 1.0), 1.0);
        let tracer = Tracer::new(Settings::default());
        let ray = forward();

        let hit = tracer.closest_hit(&ray, &scene, &camera()).unwrap();

        assert!(hit.normal.dot(&-ray.direction) > 0.0);
        assert!(close(&hit.normal, &Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn facing_spheres_stop_bouncing_at_the_depth_limit() {
        // 두 구 사이에서 법선 방향으로 튕기면 끝없이 오감
        let scene = Scene::new(
            vec![Material::new(Vec3::new(0.5, 0.5, 0.5), 0.5)],
            vec![
                Sphere::new(Point3::origin(), 1.0, MaterialId(0)),
                Sphere::new(Point3::new(3.0, 0.0, 0.0), 1.0, MaterialId(0)),
            ],
        )
        .unwrap();
        let eye = Point3::new(1.5, 0.0, 0.0);
        let ray = Ray::new(eye, Vec3::new(-1.0, 0.0, 0.0));

        let unbounded = with_depth(u32::MAX).shade(&ray, &scene, &eye, 0);
        let capped = with_depth(MAX_DEPTH_LIMIT).shade(&ray, &scene, &eye, 0);

        assert!(unbounded.iter().all(|c| c.is_finite()));
        assert_eq!(unbounded, capped);
    }

    #[test]
    fn quantize_saturates_and_truncates() {
        assert_eq!(quantize(&Vec3::new(-1.0, 0.5, 2.0)), [0, 127, 255]);
        assert_eq!(quantize(&Vec3::new(1.0, 0.0, 0.999)), [255, 0, 254]);
    }
}
