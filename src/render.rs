//! Canvas2D render pass
//!
//! Pure sink: consumes the current game state and issues primitive draw
//! calls in a fixed order (background, spawn marker, falling objects,
//! particles, paddle last). Never mutates game state.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::sim::state::{GameState, ObjectKind, Paddle, Particle};

/// Renderer over a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Draw one frame of the given state
    pub fn render(&self, state: &GameState, show_spawn_marker: bool) {
        let ctx = &self.ctx;

        // Camera shake: translate the whole frame, restore afterwards
        let offset = state.camera_offset();
        ctx.save();
        ctx.translate(offset.x as f64, offset.y as f64).ok();

        self.draw_background(state);
        if show_spawn_marker {
            self.draw_spawn_marker(state);
        }
        for obj in &state.objects {
            self.draw_object(obj.pos.x, obj.pos.y, obj.radius, obj.kind);
        }
        for particle in &state.particles {
            self.draw_particle(particle);
        }
        self.draw_paddle(&state.paddle);

        ctx.restore();
    }

    fn draw_background(&self, state: &GameState) {
        let ctx = &self.ctx;
        // Overdraw past the edges so the shake never exposes the page behind
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(
            -20.0,
            -20.0,
            PLAY_WIDTH as f64 + 40.0,
            PLAY_HEIGHT as f64 + 40.0,
        );

        ctx.set_fill_style_str(BLUE);
        ctx.set_global_alpha(0.07);
        for star in &state.stars {
            ctx.begin_path();
            ctx.arc(star.pos.x as f64, star.pos.y as f64, star.radius as f64, 0.0, TAU)
                .ok();
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
    }

    /// Debug marker showing where the stream currently sits
    fn draw_spawn_marker(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(GREEN);
        ctx.begin_path();
        ctx.arc(state.spawner.x as f64, 15.0, 10.0, 0.0, TAU).ok();
        ctx.fill();
        ctx.set_stroke_style_str(WHITE);
        ctx.set_line_width(4.0);
        ctx.stroke();
    }

    fn draw_object(&self, x: f32, y: f32, radius: f32, kind: ObjectKind) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(kind.color());
        ctx.set_stroke_style_str(WHITE);
        ctx.set_line_width(4.0);
        ctx.begin_path();

        // Penalty objects read as hazards: boxes instead of circles
        if kind == ObjectKind::Penalty {
            ctx.rect(
                (x - radius) as f64,
                (y - radius) as f64,
                (radius * 2.0) as f64,
                (radius * 2.0) as f64,
            );
        } else {
            ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU).ok();
        }
        ctx.fill();
        ctx.stroke();
    }

    /// Burst ring: radius grows and alpha fades with age/lifetime
    fn draw_particle(&self, particle: &Particle) {
        let ctx = &self.ctx;
        let progress = particle.progress();

        ctx.set_global_alpha((1.0 - progress) as f64);
        ctx.set_fill_style_str(particle.kind.color());
        ctx.set_stroke_style_str(WHITE);
        ctx.set_line_width((4.0 * progress) as f64);
        ctx.begin_path();
        let radius = Particle::BASE_RADIUS * (1.0 + progress);
        ctx.arc(
            particle.pos.x as f64,
            particle.pos.y as f64,
            radius as f64,
            0.0,
            TAU,
        )
        .ok();
        ctx.fill();
        ctx.stroke();
        ctx.set_global_alpha(1.0);
    }

    fn draw_paddle(&self, paddle: &Paddle) {
        let ctx = &self.ctx;
        let width = paddle.width();
        let x = (paddle.x - width / 2.0) as f64;
        let y = (Paddle::Y - Paddle::HEIGHT / 2.0) as f64;

        ctx.set_fill_style_str(paddle.tint);
        ctx.fill_rect(x, y, width as f64, Paddle::HEIGHT as f64);
        ctx.set_stroke_style_str(WHITE);
        ctx.set_line_width(3.0);
        ctx.stroke_rect(x, y, width as f64, Paddle::HEIGHT as f64);
    }
}
