//! Browser binding: the `SeatMapWidget` exported to JavaScript.
//!
//! The host creates one widget per canvas and forwards DOM events to it.
//! Every event handler calls `prevent_default()` before anything else so the
//! page never scrolls or zooms underneath a gesture. Handlers return `true`
//! when the selection or tooltip changed and the host should re-query them.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, TouchList, WheelEvent};

use crate::camera::{Point, Size};
use crate::config::SeatMapConfig;
use crate::engine::{Action, EngineCore};
use crate::error::{Result, SeatMapError};
use crate::hit::CanvasGeometry;
use crate::input::WheelDelta;
use crate::layout::Occupancy;
use crate::logging;
use crate::render::{Paint, Surface, TextAlign, TextBaseline, TextStyle};
use crate::viewport::{self, Breakpoints};

#[wasm_bindgen]
pub struct SeatMapWidget {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: EngineCore,
}

#[wasm_bindgen]
impl SeatMapWidget {
    /// Mount on `canvas`. Empty `config_json` selects the theater preset and
    /// empty `occupancy_json` the sample house.
    ///
    /// # Errors
    ///
    /// Throws when either JSON document is invalid or the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str, occupancy_json: &str) -> std::result::Result<SeatMapWidget, JsValue> {
        logging::init_console(tracing::Level::INFO);

        let config = SeatMapConfig::from_json(config_json).map_err(to_js)?;
        let occupancy = if occupancy_json.trim().is_empty() {
            Occupancy::demo()
        } else {
            Occupancy::from_json(occupancy_json).map_err(to_js)?
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| to_js(SeatMapError::Surface("canvas has no 2d context".into())))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| to_js(SeatMapError::Surface("2d context has an unexpected type".into())))?;

        let core = EngineCore::new(config, occupancy);
        tracing::info!(
            rows = core.layout.rows().len(),
            seats = core.layout.seats().count(),
            capacity = core.selection.capacity(),
            "seat map mounted"
        );
        let mut widget = Self { canvas, ctx, core };
        widget.sync_geometry();
        widget.draw();
        Ok(widget)
    }

    // --- Mouse ---

    pub fn on_mouse_down(&mut self, ev: &MouseEvent) -> bool {
        ev.prevent_default();
        let actions = self.core.on_pointer_down(mouse_point(ev));
        self.process(actions)
    }

    pub fn on_mouse_move(&mut self, ev: &MouseEvent) -> bool {
        ev.prevent_default();
        let actions = self.core.on_pointer_move(mouse_point(ev));
        self.process(actions)
    }

    pub fn on_mouse_up(&mut self, ev: &MouseEvent) -> bool {
        ev.prevent_default();
        self.sync_geometry();
        let actions = self.core.on_pointer_up(mouse_point(ev));
        self.process(actions)
    }

    pub fn on_mouse_leave(&mut self, ev: &MouseEvent) -> bool {
        ev.prevent_default();
        let actions = self.core.on_pointer_leave();
        self.process(actions)
    }

    // --- Touch ---

    pub fn on_touch_start(&mut self, ev: &TouchEvent) -> bool {
        ev.prevent_default();
        let touches = self.touch_points(&ev.touches());
        let actions = self.core.on_touch_start(&touches);
        self.process(actions)
    }

    pub fn on_touch_move(&mut self, ev: &TouchEvent) -> bool {
        ev.prevent_default();
        let touches = self.touch_points(&ev.touches());
        let actions = self.core.on_touch_move(&touches);
        self.process(actions)
    }

    pub fn on_touch_end(&mut self, ev: &TouchEvent) -> bool {
        ev.prevent_default();
        self.sync_geometry();
        let remaining = self.touch_points(&ev.touches());
        let released = self.touch_points(&ev.changed_touches()).first().copied();
        let actions = self.core.on_touch_end(&remaining, released);
        self.process(actions)
    }

    pub fn on_touch_cancel(&mut self, ev: &TouchEvent) -> bool {
        ev.prevent_default();
        let remaining = self.touch_points(&ev.touches());
        let actions = self.core.on_touch_cancel(&remaining);
        self.process(actions)
    }

    // --- Wheel ---

    pub fn on_wheel(&mut self, ev: &WheelEvent) -> bool {
        ev.prevent_default();
        let actions = self.core.on_wheel(WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() });
        self.process(actions)
    }

    // --- Host signals ---

    /// Resize the canvas for the current window and breakpoint match, then redraw.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_breakpoints(&mut self, handset: bool, tablet: bool) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (Ok(w), Ok(h)) = (window.inner_width(), window.inner_height()) else {
            tracing::warn!("window size unavailable");
            return;
        };
        let (Some(w), Some(h)) = (w.as_f64(), h.as_f64()) else {
            return;
        };
        let size = viewport::canvas_size(Size::new(w, h), Breakpoints { handset, tablet });
        self.canvas.set_width(size.width as u32);
        self.canvas.set_height(size.height as u32);
        tracing::debug!(width = size.width, height = size.height, handset, tablet, "canvas resized");
        self.sync_geometry();
        self.draw();
    }

    /// Redraw the scene. Surface failures are logged and the next draw starts clean.
    pub fn draw(&mut self) {
        if let Err(e) = self.core.render(&mut self.ctx) {
            tracing::error!(error = %e, "draw failed");
        }
    }

    // --- Queries ---

    /// Selected seat ids, oldest first.
    pub fn selected_seat_ids(&self) -> Vec<String> {
        self.core.selected_ids()
    }

    /// The visible tooltip as JSON, if any.
    pub fn tooltip(&self) -> Option<String> {
        let tip = self.core.tooltip()?;
        match serde_json::to_string(tip) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!(error = %e, "tooltip serialization failed");
                None
            }
        }
    }

    pub fn clear_tooltip(&mut self) -> bool {
        let actions = self.core.hide_tooltip();
        self.process(actions)
    }
}

impl SeatMapWidget {
    fn process(&mut self, actions: Vec<Action>) -> bool {
        let mut changed = false;
        let mut render = false;
        for action in actions {
            match action {
                Action::RenderNeeded => render = true,
                Action::SelectionChanged { .. } | Action::TooltipShown(_) | Action::TooltipHidden => changed = true,
                Action::SelectionRejected { .. } => {}
            }
        }
        if render {
            self.draw();
        }
        changed
    }

    fn sync_geometry(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        let geometry = CanvasGeometry {
            pixel_size: Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height())),
            css_size: Size::new(rect.width(), rect.height()),
            screen_origin: Point::new(rect.left(), rect.top()),
        };
        if geometry != self.core.geometry {
            self.core.set_geometry(geometry);
        }
    }

    /// Touch positions relative to the canvas box.
    fn touch_points(&self, list: &TouchList) -> Vec<Point> {
        let rect = self.canvas.get_bounding_client_rect();
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| Point::new(f64::from(t.client_x()) - rect.left(), f64::from(t.client_y()) - rect.top()))
            .collect()
    }
}

fn mouse_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

fn to_js(e: SeatMapError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn surface_err(e: JsValue) -> SeatMapError {
    SeatMapError::Surface(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

// =============================================================
// Surface
// =============================================================

impl Surface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn scale(&mut self, s: f64) -> Result<()> {
        CanvasRenderingContext2d::scale(self, s, s).map_err(surface_err)
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<()> {
        CanvasRenderingContext2d::translate(self, x, y).map_err(surface_err)
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        CanvasRenderingContext2d::quadratic_curve_to(self, cpx, cpy, x, y);
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn fill(&mut self, paint: &Paint) -> Result<()> {
        apply_fill(self, paint)?;
        CanvasRenderingContext2d::fill(self);
        Ok(())
    }

    fn stroke(&mut self, color: &str) {
        self.set_stroke_style_str(color);
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) -> Result<()> {
        apply_fill(self, paint)?;
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()> {
        self.set_font(style.font);
        self.set_fill_style_str(style.color);
        self.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.set_text_baseline(match style.baseline {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "middle",
        });
        CanvasRenderingContext2d::fill_text(self, text, x, y).map_err(surface_err)
    }
}

fn apply_fill(ctx: &CanvasRenderingContext2d, paint: &Paint) -> Result<()> {
    match *paint {
        Paint::Solid(color) => ctx.set_fill_style_str(color),
        Paint::VerticalGradient { top, bottom, top_color, bottom_color } => {
            let gradient = ctx.create_linear_gradient(0.0, top, 0.0, bottom);
            gradient.add_color_stop(0.0, top_color).map_err(surface_err)?;
            gradient.add_color_stop(1.0, bottom_color).map_err(surface_err)?;
            ctx.set_fill_style_canvas_gradient(&gradient);
        }
    }
    Ok(())
}
