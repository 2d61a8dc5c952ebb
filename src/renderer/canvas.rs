//! Canvas 2D drawing

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::hud::{Feedback, Hud, PieceStyle};
use crate::layout::PieceLayout;
use crate::puzzle::{GameSession, Phase};
use crate::tuning::Skin;

/// Per-frame presentation options not held by the session
pub struct View<'a> {
    pub skin: Skin,
    pub hinted: Option<usize>,
    pub feedback: Option<&'a Feedback>,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub size: Vec2,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
        })
    }

    /// Draw one frame
    pub fn render(&self, session: &GameSession, layout: &PieceLayout, view: &View, time: f64) {
        let ctx = &self.ctx;
        let (w, h) = (self.size.x as f64, self.size.y as f64);
        let ink = if view.high_contrast { "#000000" } else { "#264653" };

        ctx.set_fill_style_str(if view.high_contrast { "#ffffff" } else { "#fdf6e3" });
        ctx.fill_rect(0.0, 0.0, w, h);

        let hud = Hud::from_session(session);

        // Target banner
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str(ink);
        self.fit_text(&hud.prompt, w / 2.0, 90.0, 56.0, w * 0.8);
        self.fit_text(&hud.equation, w / 2.0, 170.0, 32.0, w * 0.9);

        // Corners
        ctx.set_font("bold 22px sans-serif");
        ctx.set_text_align("left");
        let _ = ctx.fill_text(&hud.score, 20.0, 30.0);
        if let Some(streak) = &hud.streak {
            let _ = ctx.fill_text(streak, 20.0, 58.0);
        }
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&hud.lives, w - 20.0, 30.0);
        let _ = ctx.fill_text(view.skin.as_str(), w - 20.0, 58.0);

        let styles = Hud::piece_styles(session, view.hinted);
        for (i, (&center, style)) in layout.centers.iter().zip(styles).enumerate() {
            let value = session.round().pieces.get(i).copied().unwrap_or(0);
            self.draw_piece(i, value, center, layout.radius, style, view, time);
        }

        if let Some(feedback) = view.feedback {
            ctx.set_text_align("center");
            ctx.set_fill_style_str(feedback.mood.color(view.high_contrast));
            self.fit_text(&feedback.text, w / 2.0, h - 50.0, 30.0, w * 0.9);
        }

        if session.phase == Phase::GameOver {
            ctx.set_global_alpha(0.6);
            ctx.set_fill_style_str("#000000");
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str("#ffffff");
            ctx.set_text_align("center");
            self.fit_text("Game Over", w / 2.0, h / 2.0 - 30.0, 64.0, w * 0.8);
            self.fit_text(
                &format!("{} - press R to play again", hud.score),
                w / 2.0,
                h / 2.0 + 30.0,
                28.0,
                w * 0.8,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_piece(
        &self,
        index: usize,
        value: u32,
        center: Vec2,
        radius: f32,
        style: PieceStyle,
        view: &View,
        time: f64,
    ) {
        let ctx = &self.ctx;
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);

        if style == PieceStyle::Hinted {
            let pulse = if view.reduced_motion {
                1.0
            } else {
                0.75 + 0.25 * (time / 200.0).sin()
            };
            ctx.set_global_alpha(pulse);
            ctx.set_fill_style_str("#ffd166");
            ctx.begin_path();
            let _ = ctx.arc(x, y, r + 10.0, 0.0, TAU);
            ctx.fill();
            ctx.set_global_alpha(1.0);
        }

        let alpha = match style {
            PieceStyle::Chosen { .. } => 0.35,
            _ => 1.0,
        };
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str(view.skin.piece_color());
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, TAU);
        ctx.fill();
        ctx.set_line_width(if view.high_contrast { 4.0 } else { 2.0 });
        ctx.set_stroke_style_str("#1d3557");
        ctx.stroke();

        ctx.set_fill_style_str("#ffffff");
        ctx.set_text_align("center");
        ctx.set_font(&format!("bold {}px sans-serif", (r * 0.9) as u32));
        let _ = ctx.fill_text(&value.to_string(), x, y);

        // Key label under the piece
        ctx.set_fill_style_str("#1d3557");
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text(&(index + 1).to_string(), x, y + r + 16.0);
        ctx.set_global_alpha(1.0);

        if let PieceStyle::Chosen { order } = style {
            ctx.set_fill_style_str("#1d3557");
            ctx.begin_path();
            let _ = ctx.arc(x + r * 0.7, y - r * 0.7, 13.0, 0.0, TAU);
            ctx.fill();
            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("bold 14px sans-serif");
            let _ = ctx.fill_text(&(order + 1).to_string(), x + r * 0.7, y - r * 0.7);
        }
    }

    /// Draw text, shrinking the font until it fits `max_width`
    fn fit_text(&self, text: &str, x: f64, y: f64, size: f64, max_width: f64) {
        let mut size = size;
        loop {
            self.ctx.set_font(&format!("bold {}px sans-serif", size as u32));
            let width = self
                .ctx
                .measure_text(text)
                .map(|m| m.width())
                .unwrap_or(0.0);
            if width <= max_width || size <= 12.0 {
                break;
            }
            size -= 2.0;
        }
        let _ = self.ctx.fill_text(text, x, y);
    }
}
