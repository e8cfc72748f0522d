use crate::camera::{Camera, Point};
use crate::config::SeatMapConfig;
use crate::error::Result;
use crate::hit::{self, CanvasGeometry};
use crate::input::{Gesture, WheelDelta, is_tap};
use crate::layout::{Layout, Occupancy, Seat, SeatStatus, build_layout};
use crate::render::{self, Surface};
use crate::selection::{RejectReason, Selection, SelectionChange};
use crate::tooltip::{self, Tooltip};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The canvas must be redrawn.
    RenderNeeded,
    /// A seat was added to or removed from the selection.
    SelectionChanged { seat_id: String, change: SelectionChange },
    /// A tap on an available seat was refused.
    SelectionRejected { seat_id: String, reason: RejectReason },
    TooltipShown(Tooltip),
    TooltipHidden,
}

/// Widget state and the gesture state machine.
///
/// Holds no browser types so every transition is testable natively. The
/// `web` binding owns one of these and forwards DOM events to it.
pub struct EngineCore {
    pub config: SeatMapConfig,
    pub layout: Layout,
    pub occupancy: Occupancy,
    pub camera: Camera,
    pub selection: Selection,
    pub tooltip: Option<Tooltip>,
    pub gesture: Gesture,
    pub geometry: CanvasGeometry,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(SeatMapConfig::default(), Occupancy::demo())
    }
}

impl EngineCore {
    /// Build the layout and rest the camera at its home transform.
    #[must_use]
    pub fn new(config: SeatMapConfig, occupancy: Occupancy) -> Self {
        let layout = build_layout(&config.layout, &occupancy);
        let camera = config.camera();
        let selection = Selection::new(config.capacity);
        Self {
            config,
            layout,
            occupancy,
            camera,
            selection,
            tooltip: None,
            gesture: Gesture::Idle,
            geometry: CanvasGeometry::default(),
        }
    }

    /// Record the canvas backing size, CSS box, and page position.
    pub fn set_geometry(&mut self, geometry: CanvasGeometry) -> Vec<Action> {
        self.geometry = geometry;
        vec![Action::RenderNeeded]
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, local: Point) -> Vec<Action> {
        let actions = self.hide_tooltip();
        let anchor = hit::to_model(&self.camera, &self.geometry, local);
        self.gesture = Gesture::press(local, anchor);
        tracing::debug!(x = local.x, y = local.y, "drag started");
        actions
    }

    pub fn on_pointer_move(&mut self, local: Point) -> Vec<Action> {
        let Gesture::Dragging { start, last, anchor } = self.gesture else {
            return Vec::new();
        };
        self.camera.pan(local.x - last.x, local.y - last.y);
        self.gesture = Gesture::Dragging { start, last: local, anchor };
        vec![Action::RenderNeeded]
    }

    /// End a drag. Short drags count as taps on the seat that was pressed.
    pub fn on_pointer_up(&mut self, local: Point) -> Vec<Action> {
        let Gesture::Dragging { start, anchor, .. } = self.gesture else {
            return Vec::new();
        };
        self.gesture = Gesture::Idle;
        if is_tap(start, local, self.config.drag_threshold_px) {
            self.tap(anchor)
        } else {
            tracing::debug!(x = local.x, y = local.y, "drag ended");
            Vec::new()
        }
    }

    /// Abandon a drag that left the canvas and return to the home view.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        if !matches!(self.gesture, Gesture::Dragging { .. }) {
            return Vec::new();
        }
        tracing::debug!("drag left the canvas, resetting view");
        self.abandon_gesture()
    }

    // --- Touch ---

    /// `touches` holds every finger currently on the surface.
    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        match touches {
            [a, b, ..] => {
                let actions = self.hide_tooltip();
                self.gesture = Gesture::pinch(*a, *b, self.camera.scale);
                tracing::debug!(scale = self.camera.scale, "pinch started");
                actions
            }
            [only] if !matches!(self.gesture, Gesture::Pinching { .. }) => self.on_pointer_down(*only),
            _ => Vec::new(),
        }
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        match (self.gesture, touches) {
            (Gesture::Pinching { .. }, [a, b, ..]) => {
                let Some((ratio, base)) = self.gesture.pinch_ratio(*a, *b) else {
                    return Vec::new();
                };
                let before = self.camera.scale;
                self.camera.zoom_to(ratio, base);
                self.render_if_zoomed(before)
            }
            (Gesture::Dragging { .. }, [only]) => self.on_pointer_move(*only),
            _ => Vec::new(),
        }
    }

    /// `remaining` are the fingers still down; `released` is the finger that lifted.
    pub fn on_touch_end(&mut self, remaining: &[Point], released: Option<Point>) -> Vec<Action> {
        if !remaining.is_empty() {
            return Vec::new();
        }
        match self.gesture {
            Gesture::Dragging { last, .. } => self.on_pointer_up(released.unwrap_or(last)),
            Gesture::Pinching { .. } => {
                self.gesture = Gesture::Idle;
                tracing::debug!(scale = self.camera.scale, "pinch ended");
                Vec::new()
            }
            Gesture::Idle => Vec::new(),
        }
    }

    /// The browser took the touches away. Once none remain, recover like a pointer leave.
    pub fn on_touch_cancel(&mut self, remaining: &[Point]) -> Vec<Action> {
        if !remaining.is_empty() || self.gesture.is_idle() {
            return Vec::new();
        }
        tracing::debug!("touch cancelled, resetting view");
        self.abandon_gesture()
    }

    // --- Wheel ---

    /// Zoom one step per event. Scrolling down zooms out.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        let before = self.camera.scale;
        self.camera.zoom_by(delta.dy, self.config.wheel_zoom_step);
        self.render_if_zoomed(before)
    }

    // --- Tooltip ---

    /// Clear the tooltip slot.
    pub fn hide_tooltip(&mut self) -> Vec<Action> {
        match self.tooltip.take() {
            Some(_) => vec![Action::TooltipHidden],
            None => Vec::new(),
        }
    }

    // --- Rendering ---

    /// Draw the current scene onto `surface`.
    ///
    /// # Errors
    ///
    /// Returns the first surface error encountered.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        render::draw(surface, &self.layout, &self.camera, &self.selection, self.geometry.pixel_size)
    }

    // --- Queries ---

    /// Selected seat ids, oldest first.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids().map(str::to_owned).collect()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up a seat by id.
    #[must_use]
    pub fn seat(&self, id: &str) -> Option<&Seat> {
        self.layout.seat(id)
    }

    // --- Internals ---

    fn render_if_zoomed(&self, before: f64) -> Vec<Action> {
        if (self.camera.scale - before).abs() > f64::EPSILON {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    fn abandon_gesture(&mut self) -> Vec<Action> {
        self.gesture = Gesture::Idle;
        self.camera.reset();
        let mut actions = self.hide_tooltip();
        actions.push(Action::RenderNeeded);
        actions
    }

    fn tap(&mut self, model: Point) -> Vec<Action> {
        let mut actions = self.hide_tooltip();
        let Some(seat) = hit::seat_at_point(&self.layout, model) else {
            return actions;
        };
        let seat_id = seat.id.clone();

        match seat.status {
            SeatStatus::Available => match self.selection.toggle(&seat_id, &self.layout) {
                change @ (SelectionChange::Added | SelectionChange::Removed) => {
                    tracing::info!(seat = %seat_id, ?change, selected = self.selection.len(), "selection changed");
                    actions.push(Action::SelectionChanged { seat_id, change });
                    actions.push(Action::RenderNeeded);
                }
                SelectionChange::Rejected(reason) => {
                    tracing::debug!(seat = %seat_id, ?reason, "selection refused");
                    actions.push(Action::SelectionRejected { seat_id, reason });
                }
                SelectionChange::Unavailable => {}
            },
            SeatStatus::Occupied => match tooltip::show(seat, &self.occupancy, &self.camera, self.geometry.screen_origin) {
                Ok(tip) => {
                    tracing::debug!(seat = %seat_id, "tooltip shown");
                    self.tooltip = Some(tip.clone());
                    actions.push(Action::TooltipShown(tip));
                }
                Err(e) => tracing::error!(error = %e, "tooltip unavailable"),
            },
            SeatStatus::Reserved => {}
        }
        actions
    }
}
