//! Platform-neutral draw list produced once per tick.
//!
//! The core never touches a real canvas; each frame it emits a [`Scene`]
//! of primitive [`DrawOp`]s that a host rasterizes in order. Ordering is
//! contractual: connection lines come first so particles render on top.

use crate::color::Rgba;
use crate::field::ParticleField;
use glam::Vec2;

/// A single drawing primitive.
#[derive(Debug, Clone, Copy)]
pub enum DrawOp {
    /// A straight connection line with a three-stop gradient along its
    /// length; the endpoint stops are brighter than the midpoint.
    Line {
        a: Vec2,
        b: Vec2,
        stops: [Rgba; 3],
        width: f32,
    },
    /// A soft radial glow behind a particle: full color at the center,
    /// 30% alpha at 60% of the radius, transparent at the rim.
    Glow { center: Vec2, radius: f32, color: Rgba },
    /// The solid particle body.
    Dot { center: Vec2, radius: f32, color: Rgba },
}

#[derive(Debug, Default)]
pub struct Scene {
    pub ops: Vec<DrawOp>,
}

impl Scene {
    /// Builds the draw list for the field's current state: every
    /// connection line, then per particle a glow followed by its body.
    pub fn build(field: &ParticleField) -> Self {
        let line_color = field.cfg().line_color;
        let connections = field.connections();

        let mut ops = Vec::with_capacity(connections.len() + field.len() * 2);

        for c in connections {
            let bright = line_color.with_alpha(c.opacity * 1.2);
            let dim = line_color.with_alpha(c.opacity * 0.7);
            ops.push(DrawOp::Line {
                a: c.a,
                b: c.b,
                stops: [bright, dim, bright],
                width: c.width,
            });
        }

        for p in field.particles() {
            let radius = p.pulse_radius();
            ops.push(DrawOp::Glow {
                center: p.pos,
                radius: radius * 2.0,
                color: p.color,
            });
            ops.push(DrawOp::Dot {
                center: p.pos,
                radius,
                color: p.color,
            });
        }

        Self { ops }
    }
}
