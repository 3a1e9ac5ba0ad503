//! Rasterization of core draw ops onto an egui painter.
//!
//! Canvas 2D gradients have no direct egui equivalent, so gradient lines
//! become vertex-colored quad strips and radial glows become two-ring
//! triangle fans. The mesh builders are pure and unit-tested; only
//! [`paint_scene`] touches a live painter.

use egui::epaint::Mesh;
use egui::{Color32, Pos2, Rect};
use field_core::color::Rgba;
use field_core::scene::{DrawOp, Scene};
use std::f32::consts::TAU;

/// Segments used to approximate the circular glow rim.
const GLOW_SEGMENTS: usize = 24;

pub fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (c.a.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Builds a quad strip for a line whose color runs through three stops:
/// `stops[0]` at `a`, `stops[1]` at the midpoint, `stops[2]` at `b`.
///
/// Degenerate (zero-length) lines yield an empty mesh.
pub fn gradient_line(a: Pos2, b: Pos2, stops: [Rgba; 3], width: f32) -> Mesh {
    let mut mesh = Mesh::default();

    let span = b - a;
    if span.length() <= f32::EPSILON {
        return mesh;
    }

    let dir = span.normalized();
    let normal = egui::vec2(-dir.y, dir.x) * (width * 0.5);
    let mid = a + span * 0.5;

    for (point, stop) in [a, mid, b].into_iter().zip(stops) {
        let color = color32(stop);
        mesh.colored_vertex(point + normal, color);
        mesh.colored_vertex(point - normal, color);
    }

    // Two quads: (a, mid) and (mid, b).
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    mesh.add_triangle(2, 3, 4);
    mesh.add_triangle(3, 5, 4);

    mesh
}

/// Builds the radial glow: full color at the center, 30% alpha on a ring
/// at 60% of the radius, fully transparent at the rim.
pub fn glow_mesh(center: Pos2, radius: f32, color: Rgba) -> Mesh {
    let mut mesh = Mesh::default();
    if radius <= 0.0 {
        return mesh;
    }

    let center_color = color32(color);
    let ring_color = color32(color.with_alpha(color.a * 0.3));
    let rim_color = color32(color.with_alpha(0.0));

    mesh.colored_vertex(center, center_color);
    for ring in [(radius * 0.6, ring_color), (radius, rim_color)] {
        let (r, c) = ring;
        for i in 0..GLOW_SEGMENTS {
            let t = i as f32 / GLOW_SEGMENTS as f32 * TAU;
            mesh.colored_vertex(center + egui::vec2(t.cos(), t.sin()) * r, c);
        }
    }

    let n = GLOW_SEGMENTS as u32;
    for i in 0..n {
        let next = (i + 1) % n;
        let (inner, inner_next) = (1 + i, 1 + next);
        let (outer, outer_next) = (1 + n + i, 1 + n + next);

        // Center fan out to the 60% ring.
        mesh.add_triangle(0, inner, inner_next);
        // Strip between the 60% ring and the transparent rim.
        mesh.add_triangle(inner, outer, outer_next);
        mesh.add_triangle(inner, outer_next, inner_next);
    }

    mesh
}

/// Paints a scene into `rect`, mapping canvas-space coordinates onto the
/// rect's top-left origin. Ops are painted in scene order.
pub fn paint_scene(painter: &egui::Painter, rect: Rect, scene: &Scene) {
    let to_screen = |v: glam::Vec2| rect.min + egui::vec2(v.x, v.y);

    for op in &scene.ops {
        match *op {
            DrawOp::Line { a, b, stops, width } => {
                painter.add(gradient_line(to_screen(a), to_screen(b), stops, width));
            }
            DrawOp::Glow {
                center,
                radius,
                color,
            } => {
                painter.add(glow_mesh(to_screen(center), radius, color));
            }
            DrawOp::Dot {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(to_screen(center), radius, color32(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color32_conversion_scales_alpha() {
        let c = color32(Rgba::new(255, 138, 101, 0.5));
        assert_eq!(c, Color32::from_rgba_unmultiplied(255, 138, 101, 128));

        // Alpha already clamped by Rgba, but conversion tolerates junk.
        let c = color32(Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 2.0,
        });
        assert_eq!(c.a(), 255);
    }

    #[test]
    fn gradient_line_builds_two_quads() {
        let stops = [
            Rgba::new(255, 138, 101, 0.8),
            Rgba::new(255, 138, 101, 0.4),
            Rgba::new(255, 138, 101, 0.8),
        ];
        let mesh = gradient_line(Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), stops, 2.0);

        // Three stops, two vertices each; four triangles.
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices.len(), 12);

        // For a horizontal line the strip extends one half-width in y.
        assert_eq!(mesh.vertices[0].pos, Pos2::new(0.0, 1.0));
        assert_eq!(mesh.vertices[1].pos, Pos2::new(0.0, -1.0));
        assert_eq!(mesh.vertices[2].pos, Pos2::new(50.0, 1.0));
        assert_eq!(mesh.vertices[4].pos, Pos2::new(100.0, 1.0));

        // Endpoint vertices carry the endpoint stop, midpoint the dimmer one.
        assert_eq!(mesh.vertices[0].color, mesh.vertices[4].color);
        assert!(mesh.vertices[2].color.a() <= mesh.vertices[0].color.a());
    }

    #[test]
    fn degenerate_line_is_empty() {
        let stop = Rgba::new(1, 2, 3, 0.5);
        let mesh = gradient_line(Pos2::new(5.0, 5.0), Pos2::new(5.0, 5.0), [stop; 3], 1.0);
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn glow_mesh_has_center_and_two_rings() {
        let mesh = glow_mesh(Pos2::new(10.0, 10.0), 8.0, Rgba::new(255, 138, 101, 0.5));

        assert_eq!(mesh.vertices.len(), 1 + GLOW_SEGMENTS * 2);
        assert_eq!(mesh.indices.len(), GLOW_SEGMENTS * 3 * 3);

        // Center at full alpha, rim fully transparent.
        assert_eq!(mesh.vertices[0].color.a(), 128);
        assert_eq!(mesh.vertices[1 + GLOW_SEGMENTS].color.a(), 0);

        // Ring radii: 60% and 100% of the glow radius.
        let center = Pos2::new(10.0, 10.0);
        let inner = mesh.vertices[1].pos - center;
        let outer = mesh.vertices[1 + GLOW_SEGMENTS].pos - center;
        assert!((inner.length() - 4.8).abs() < 1e-3);
        assert!((outer.length() - 8.0).abs() < 1e-3);
    }

    #[test]
    fn zero_radius_glow_is_empty() {
        let mesh = glow_mesh(Pos2::ZERO, 0.0, Rgba::new(1, 1, 1, 1.0));
        assert!(mesh.vertices.is_empty());
    }
}
