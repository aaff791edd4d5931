//! Canvas2D rendering
//!
//! A pure consumer of `GameData`: given the state, paint one frame. Nothing
//! here feeds back into the simulation.

/// Color palette
pub mod colors {
    pub const BACKGROUND: &str = "#1a1a2e";
    pub const GRID: &str = "rgba(255,255,255,0.03)";
    pub const CIRCLE: &str = "#16213e";
    pub const CIRCLE_STROKE: &str = "#0f3460";
    pub const PIN: &str = "#e94560";
    pub const PIN_ATTACHED: &str = "#ffffff";
    pub const TEXT: &str = "#ffffff";
    pub const TEXT_DIM: &str = "rgba(255,255,255,0.7)";
    pub const SUCCESS: &str = "#00ff88";
}

use crate::sim::ParticleColor;

impl ParticleColor {
    /// CSS color for this tag
    pub fn as_css(self) -> &'static str {
        match self {
            ParticleColor::PinRed => colors::PIN,
            ParticleColor::White => colors::PIN_ATTACHED,
            ParticleColor::Success => colors::SUCCESS,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::f64::consts::TAU;

    use web_sys::CanvasRenderingContext2d;

    use super::colors;
    use crate::sim::{attached_pin_segment, GameConfig, GameData, GamePhase};

    /// Paint one frame of the game onto the 2D context
    pub fn render(ctx: &CanvasRenderingContext2d, game: &GameData) {
        let config = &game.config;
        ctx.clear_rect(0.0, 0.0, config.width as f64, config.height as f64);

        draw_background(ctx, config);
        draw_circle(ctx, config);
        draw_attached_pins(ctx, game);
        draw_flying_pin(ctx, game);
        draw_waiting_pins(ctx, game);
        draw_particles(ctx, game);
        draw_hud(ctx, game);
    }

    fn draw_background(ctx: &CanvasRenderingContext2d, config: &GameConfig) {
        let (w, h) = (config.width as f64, config.height as f64);
        ctx.set_fill_style_str(colors::BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Subtle grid
        ctx.set_stroke_style_str(colors::GRID);
        ctx.set_line_width(1.0);
        let grid = 30.0;
        let mut x = 0.0;
        while x < w {
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, h);
            ctx.stroke();
            x += grid;
        }
        let mut y = 0.0;
        while y < h {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(w, y);
            ctx.stroke();
            y += grid;
        }
    }

    fn draw_circle(ctx: &CanvasRenderingContext2d, config: &GameConfig) {
        ctx.set_shadow_color(colors::CIRCLE_STROKE);
        ctx.set_shadow_blur(20.0);

        ctx.set_fill_style_str(colors::CIRCLE);
        ctx.set_stroke_style_str(colors::CIRCLE_STROKE);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        let _ = ctx.arc(
            config.center.x as f64,
            config.center.y as f64,
            config.circle_radius as f64,
            0.0,
            TAU,
        );
        ctx.fill();
        ctx.stroke();

        ctx.set_shadow_blur(0.0);
    }

    fn draw_attached_pins(ctx: &CanvasRenderingContext2d, game: &GameData) {
        let config = &game.config;
        for &angle in &game.attached_pins {
            let seg = attached_pin_segment(angle, game.rotation, config);

            ctx.set_stroke_style_str(colors::PIN_ATTACHED);
            ctx.set_line_width(3.0);
            ctx.begin_path();
            ctx.move_to(seg.start.x as f64, seg.start.y as f64);
            ctx.line_to(seg.end.x as f64, seg.end.y as f64);
            ctx.stroke();

            ctx.set_fill_style_str(colors::PIN_ATTACHED);
            ctx.begin_path();
            let _ = ctx.arc(
                seg.end.x as f64,
                seg.end.y as f64,
                config.pin_radius as f64,
                0.0,
                TAU,
            );
            ctx.fill();
        }
    }

    fn draw_flying_pin(ctx: &CanvasRenderingContext2d, game: &GameData) {
        let Some(pin) = &game.flying_pin else { return };
        let config = &game.config;
        let (x, y) = (pin.pos.x as f64, pin.pos.y as f64);

        ctx.set_shadow_color(colors::PIN);
        ctx.set_shadow_blur(10.0);

        ctx.set_stroke_style_str(colors::PIN);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(x, y);
        ctx.line_to(x, y + config.pin_length as f64);
        ctx.stroke();

        ctx.set_fill_style_str(colors::PIN);
        ctx.begin_path();
        let _ = ctx.arc(x, y, config.pin_radius as f64, 0.0, TAU);
        ctx.fill();

        ctx.set_shadow_blur(0.0);
    }

    /// Remaining-pin dots along the bottom edge
    fn draw_waiting_pins(ctx: &CanvasRenderingContext2d, game: &GameData) {
        let config = &game.config;
        let count = game.pins_remaining as f64;
        let y = (config.height - 50.0) as f64;
        let spacing = 20.0;
        let start_x = config.center.x as f64 - (count - 1.0) * spacing / 2.0;

        ctx.set_fill_style_str(colors::PIN);
        for i in 0..game.pins_remaining {
            ctx.begin_path();
            let _ = ctx.arc(start_x + i as f64 * spacing, y, 6.0, 0.0, TAU);
            ctx.fill();
        }
    }

    fn draw_particles(ctx: &CanvasRenderingContext2d, game: &GameData) {
        for p in &game.particles {
            ctx.save();
            ctx.set_global_alpha(p.alpha.clamp(0.0, 1.0) as f64);
            ctx.set_fill_style_str(p.color.as_css());
            ctx.begin_path();
            let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, p.radius as f64, 0.0, TAU);
            ctx.fill();
            ctx.restore();
        }
    }

    fn draw_hud(ctx: &CanvasRenderingContext2d, game: &GameData) {
        let config = &game.config;
        let (cx, h) = (config.center.x as f64, config.height as f64);
        ctx.save();
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        // Pins remaining inside the circle
        let big = (config.width * 0.12).min(48.0);
        ctx.set_font(&format!("bold {big}px Arial"));
        ctx.set_fill_style_str(colors::TEXT);
        let _ = ctx.fill_text(&game.pins_remaining.to_string(), cx, config.center.y as f64);

        // Level indicator at the top
        let small = (config.width * 0.05).min(20.0);
        ctx.set_font(&format!("bold {small}px Arial"));
        ctx.set_fill_style_str(colors::TEXT_DIM);
        let _ = ctx.fill_text(&format!("LEVEL {}", game.level.number), cx, 40.0);

        match game.phase {
            GamePhase::Idle => {
                ctx.set_fill_style_str(colors::TEXT_DIM);
                let _ = ctx.fill_text("TAP TO START", cx, h - 120.0);
            }
            GamePhase::GameOver => {
                let large = (config.width * 0.08).min(32.0);
                ctx.set_font(&format!("bold {large}px Arial"));
                ctx.set_fill_style_str(colors::PIN);
                let _ = ctx.fill_text("GAME OVER", cx, h * 0.65);

                ctx.set_font(&format!("bold {small}px Arial"));
                ctx.set_fill_style_str(colors::TEXT_DIM);
                let _ = ctx.fill_text("TAP TO RESTART", cx, h * 0.72);
            }
            GamePhase::LevelComplete => {
                let large = (config.width * 0.08).min(32.0);
                ctx.set_font(&format!("bold {large}px Arial"));
                ctx.set_fill_style_str(colors::SUCCESS);
                let _ = ctx.fill_text("PERFECT!", cx, h * 0.65);
            }
            GamePhase::Playing => {}
        }

        ctx.restore();
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::render;
