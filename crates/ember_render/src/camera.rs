//! Camera models.

use ember_math::{sampling, Plane, Ray, Vec3};
use rand::RngCore;

/// Maps film coordinates `(s, t)` in `[0, 1]^2` to primary rays.
/// `t = 0` is the bottom of the film. Each ray gets a timestamp drawn
/// from the camera's shutter interval.
pub trait RayCamera: Send + Sync {
    fn cast_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray;
}

// Orthonormal view frame plus viewport extents shared by both models.
fn view_frame(
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov_degrees: f32,
    aspect_ratio: f32,
    film_dist: f32,
) -> (Vec3, Vec3, Vec3, Vec3, Vec3) {
    let theta = vfov_degrees.to_radians();
    let half_height = (theta * 0.5).tan() * film_dist;
    let viewport_height = 2.0 * half_height;
    let viewport_width = aspect_ratio * viewport_height;

    let w = (look_from - look_at).normalize();
    let u = vup.cross(w).normalize();
    let v = w.cross(u);

    let horizontal = viewport_width * u;
    let vertical = viewport_height * v;
    (u, v, w, horizontal, vertical)
}

// =============================================================================
// Pinhole
// =============================================================================

/// Ideal pinhole: every ray leaves a single point and everything is
/// in focus. The virtual viewport sits `film_dist` in front of the
/// aperture, so no image inversion occurs.
pub struct PinholeCamera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    time0: f32,
    time1: f32,
}

impl PinholeCamera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov_degrees: f32,
        aspect_ratio: f32,
        film_dist: f32,
        time0: f32,
        time1: f32,
    ) -> Self {
        let (_, _, w, horizontal, vertical) = view_frame(
            look_from,
            look_at,
            vup,
            vfov_degrees,
            aspect_ratio,
            film_dist,
        );
        let lower_left_corner =
            look_from - horizontal * 0.5 - vertical * 0.5 - w * film_dist;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            time0,
            time1,
        }
    }
}

impl RayCamera for PinholeCamera {
    fn cast_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let time = sampling::gen_range(self.time0, self.time1, rng);
        let direction =
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin;
        Ray::new(self.origin, direction, time)
    }
}

// =============================================================================
// Thin lens
// =============================================================================

/// Photographic parameters for the thin-lens model, in scene units.
#[derive(Debug, Clone, Copy)]
pub struct LensSettings {
    /// Lens diameter.
    pub aperture: f32,
    /// Focal length of the lens.
    pub focal_length: f32,
    /// Distance from lens to film.
    pub film_dist: f32,
    /// Output image height in pixels, for the circle of confusion.
    pub image_height: f32,
    /// Acceptable blur circle in pixels.
    pub coc_pixels: f32,
}

/// Thin-lens camera with defocus blur, `1/f = 1/zi + 1/zo`.
///
/// The film sits behind the lens, so the image inverts; film
/// coordinates are flipped to compensate. Rays originate on the lens
/// disk and aim at the film point's conjugate on the plane of sharp
/// focus, `zo = f * zi / (zi - f)` in front of the lens.
pub struct ThinLensCamera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
    focus_plane: Plane,
    depth_field: (f32, f32),
    time0: f32,
    time1: f32,
}

impl ThinLensCamera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov_degrees: f32,
        aspect_ratio: f32,
        lens: LensSettings,
        time0: f32,
        time1: f32,
    ) -> Self {
        let (u, v, w, horizontal, vertical) = view_frame(
            look_from,
            look_at,
            vup,
            vfov_degrees,
            aspect_ratio,
            lens.film_dist,
        );
        // Film behind the lens.
        let lower_left_corner =
            look_from - horizontal * 0.5 - vertical * 0.5 + w * lens.film_dist;

        // Object distance conjugate to the film distance.
        let zo = lens.focal_length * lens.film_dist / (lens.film_dist - lens.focal_length);
        let focus_plane = Plane::new(w, look_from - zo * w);

        // Depth of field limits from the circle-of-confusion diameter
        // projected back through the lens equation.
        let film_height = vertical.length();
        let coc = film_height * lens.coc_pixels / lens.image_height;
        let f_number = lens.focal_length / lens.aperture;
        let f2 = lens.focal_length * lens.focal_length;
        let zo_f2 = zo * f2;
        let nc_term = f_number * coc * (zo - lens.focal_length);
        let far = zo_f2 / (f2 - nc_term);
        let near = zo_f2 / (f2 + nc_term);

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: lens.aperture * 0.5,
            focus_plane,
            depth_field: (near, far),
            time0,
            time1,
        }
    }

    /// Near and far distances between which the image stays sharp.
    pub fn depth_of_field(&self) -> (f32, f32) {
        self.depth_field
    }
}

impl RayCamera for ThinLensCamera {
    fn cast_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let time = sampling::gen_range(self.time0, self.time1, rng);

        // Undo the lens inversion.
        let s = 1.0 - s;
        let t = 1.0 - t;

        let film_point = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        let central = Ray::new(film_point, self.origin - film_point, time);
        let Some(focus_point) = self.focus_plane.intersect(&central) else {
            // Degenerate focus geometry: fall back to the central ray.
            return central;
        };

        let rd = self.lens_radius * sampling::random_in_unit_disk(rng);
        let lens_point = self.origin + self.u * rd.x + self.v * rd.y;
        Ray::new(lens_point, focus_point - lens_point, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pinhole() -> PinholeCamera {
        PinholeCamera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            90.0,
            1.0,
            1.0,
            0.0,
            0.0,
        )
    }

    #[test]
    fn center_ray_points_at_the_target() {
        let camera = pinhole();
        let mut rng = StdRng::seed_from_u64(0);
        let ray = camera.cast_ray(0.5, 0.5, &mut rng);
        let dir = ray.direction.normalize();
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert_eq!(ray.origin, Vec3::ZERO);
    }

    #[test]
    fn film_edges_diverge_symmetrically() {
        let camera = pinhole();
        let mut rng = StdRng::seed_from_u64(0);
        let low = camera.cast_ray(0.5, 0.0, &mut rng).direction.normalize();
        let high = camera.cast_ray(0.5, 1.0, &mut rng).direction.normalize();
        assert!((low.y + high.y).abs() < 1e-5);
        assert!(low.y < 0.0 && high.y > 0.0);
    }

    #[test]
    fn shutter_interval_bounds_ray_time() {
        let camera = PinholeCamera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            60.0,
            1.5,
            1.0,
            0.25,
            0.75,
        );
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let ray = camera.cast_ray(0.3, 0.6, &mut rng);
            assert!((0.25..0.75).contains(&ray.time));
        }
    }

    fn thin_lens() -> ThinLensCamera {
        ThinLensCamera::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            60.0,
            1.0,
            LensSettings {
                aperture: 0.5,
                focal_length: 0.9,
                film_dist: 1.0,
                image_height: 400.0,
                coc_pixels: 1.0,
            },
            0.0,
            0.0,
        )
    }

    #[test]
    fn depth_of_field_brackets_the_focus_distance() {
        let camera = thin_lens();
        let (near, far) = camera.depth_of_field();
        // Focus distance for f = 0.9, zi = 1 is 9 units.
        let zo = 0.9 * 1.0 / (1.0 - 0.9);
        assert!(near > 0.0);
        assert!(near < zo);
        assert!(far > zo);
    }

    #[test]
    fn lens_rays_converge_on_the_focus_plane() {
        let camera = thin_lens();
        let mut rng = StdRng::seed_from_u64(12);

        // Every ray for one film point crosses the plane of sharp
        // focus at the same spot, wherever it leaves the lens.
        let zo = 0.9 * 1.0 / (1.0 - 0.9);
        let first = camera.cast_ray(0.3, 0.7, &mut rng);
        let t_first = (-zo - first.origin.z) / first.direction.z;
        let target = first.at(t_first);
        for _ in 0..20 {
            let ray = camera.cast_ray(0.3, 0.7, &mut rng);
            let t = (-zo - ray.origin.z) / ray.direction.z;
            assert!((ray.at(t) - target).length() < 1e-3);
        }
    }

    #[test]
    fn thin_lens_center_looks_forward() {
        let camera = thin_lens();
        let mut rng = StdRng::seed_from_u64(3);
        let ray = camera.cast_ray(0.5, 0.5, &mut rng);
        let dir = ray.direction.normalize();
        assert!(dir.z < -0.9);
    }
}
