//! Route curve sampling.

use glam::Vec3;

/// The decorative navigation path: a fixed control polyline smoothed with a
/// Catmull-Rom spline before being swept into a tube by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    control_points: Vec<Vec3>,
}

impl Route {
    /// Wrap a control polyline.
    pub fn new(control_points: Vec<Vec3>) -> Self {
        Self { control_points }
    }

    /// The raw control polyline.
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Sample `segments + 1` points along the spline, endpoints inclusive.
    ///
    /// Uniform Catmull-Rom with clamped ends: the first and last control
    /// points are duplicated so the curve passes through them.
    pub fn sample(&self, segments: usize) -> Vec<Vec3> {
        let pts = &self.control_points;
        if pts.len() < 2 || segments == 0 {
            return pts.clone();
        }

        let spans = pts.len() - 1;
        let mut out = Vec::with_capacity(segments + 1);
        for i in 0..=segments {
            let t = i as f32 / segments as f32 * spans as f32;
            let span = (t.floor() as usize).min(spans - 1);
            let local = t - span as f32;

            let p0 = pts[span.saturating_sub(1)];
            let p1 = pts[span];
            let p2 = pts[span + 1];
            let p3 = pts[(span + 2).min(pts.len() - 1)];
            out.push(catmull_rom(p0, p1, p2, p3, local));
        }
        out
    }
}

fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - 3.0 * p2 + p3 - p0) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_route() -> Route {
        Route::new(vec![
            Vec3::new(-7.0, 0.0, 7.0),
            Vec3::new(-7.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, -7.0),
            Vec3::new(7.0, 0.0, -7.0),
        ])
    }

    #[test]
    fn sampling_preserves_endpoints() {
        let route = demo_route();
        let samples = route.sample(64);
        assert_eq!(samples.len(), 65);
        assert!(samples[0].distance(Vec3::new(-7.0, 0.0, 7.0)) < 1e-4);
        assert!(samples[64].distance(Vec3::new(7.0, 0.0, -7.0)) < 1e-4);
    }

    #[test]
    fn samples_stay_on_the_floor_plane() {
        for point in demo_route().sample(64) {
            assert!(point.y.abs() < 1e-4);
        }
    }

    #[test]
    fn spline_passes_through_interior_control_points() {
        let route = demo_route();
        // 4 spans over 64 segments: every 16th sample lands on a control point.
        let samples = route.sample(64);
        for (i, expected) in route.control_points().iter().enumerate() {
            assert!(samples[i * 16].distance(*expected) < 1e-3);
        }
    }

    #[test]
    fn degenerate_routes_pass_through_unchanged() {
        let single = Route::new(vec![Vec3::ZERO]);
        assert_eq!(single.sample(64), vec![Vec3::ZERO]);
    }
}
