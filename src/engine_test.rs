#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::{ScaleLimits, Size};
use crate::config::LayoutConfig;
use crate::layout::Occupant;

// =============================================================
// Helpers
// =============================================================

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Rows a/b, a1 occupied by user1, b1 and b2 reserved.
fn scenario() -> EngineCore {
    let config = SeatMapConfig {
        layout: LayoutConfig { rows: vec!['a', 'b'], ..LayoutConfig::default() },
        ..SeatMapConfig::default()
    };
    let mut occ = Occupancy::default();
    occ.occupied
        .insert("a1".into(), Occupant { username: "user1".into(), name: "User 1".into() });
    occ.reserved_seats.insert("b1".into());
    occ.reserved_seats.insert("b2".into());
    EngineCore::new(config, occ)
}

fn with_scale(mut core: EngineCore, scale: f64) -> EngineCore {
    core.camera = Camera::new(scale, Point::new(0.0, 0.0), ScaleLimits::default());
    core
}

/// Screen position of a seat's centre under the current camera.
fn centre_of(core: &EngineCore, id: &str) -> Point {
    let seat = core.seat(id).unwrap();
    core.camera
        .model_to_screen(Point::new(seat.x + seat.width / 2.0, seat.y + seat.height / 2.0))
}

fn click(core: &mut EngineCore, at: Point) -> Vec<Action> {
    let mut actions = core.on_pointer_down(at);
    actions.extend(core.on_pointer_up(at));
    actions
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_engine_rests_at_home() {
    let core = EngineCore::default();
    assert_eq!(core.camera().scale, 1.2);
    assert_eq!(core.camera().offset, Point::new(60.0, 20.0));
    assert!(core.gesture.is_idle());
    assert!(core.selected_ids().is_empty());
    assert!(core.tooltip().is_none());
}

#[test]
fn default_engine_uses_demo_house() {
    let core = EngineCore::default();
    assert_eq!(core.seat("a1").unwrap().status, SeatStatus::Occupied);
    assert_eq!(core.seat("g7").unwrap().status, SeatStatus::Reserved);
    assert_eq!(core.seat("c7").unwrap().status, SeatStatus::Available);
    assert!(core.seat("f21").is_none());
}

#[test]
fn set_geometry_requests_render() {
    let mut core = scenario();
    let geometry = CanvasGeometry {
        pixel_size: Size::new(800.0, 600.0),
        css_size: Size::new(800.0, 600.0),
        screen_origin: Point::new(5.0, 5.0),
    };
    assert_eq!(core.set_geometry(geometry), vec![Action::RenderNeeded]);
    assert_eq!(core.geometry, geometry);
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_pans_by_screen_delta_at_unit_scale() {
    let mut core = with_scale(scenario(), 1.0);
    core.on_pointer_down(Point::new(100.0, 100.0));
    assert_eq!(core.on_pointer_move(Point::new(130.0, 115.0)), vec![Action::RenderNeeded]);
    assert!(core.on_pointer_up(Point::new(130.0, 115.0)).is_empty());
    assert_eq!(core.camera().offset, Point::new(30.0, 15.0));
    assert!(core.gesture.is_idle());
}

#[test]
fn drag_pan_is_divided_by_scale() {
    let mut core = with_scale(scenario(), 2.0);
    core.on_pointer_down(Point::new(100.0, 100.0));
    core.on_pointer_move(Point::new(130.0, 115.0));
    core.on_pointer_up(Point::new(130.0, 115.0));
    assert_eq!(core.camera().offset, Point::new(15.0, 7.5));
}

#[test]
fn drag_accumulates_incremental_moves() {
    let mut core = with_scale(scenario(), 1.0);
    core.on_pointer_down(Point::new(0.0, 0.0));
    core.on_pointer_move(Point::new(10.0, 0.0));
    core.on_pointer_move(Point::new(25.0, -5.0));
    assert_eq!(core.camera().offset, Point::new(25.0, -5.0));
    assert_eq!(
        core.gesture,
        Gesture::Dragging { start: Point::new(0.0, 0.0), last: Point::new(25.0, -5.0), anchor: Point::new(0.0, 0.0) }
    );
}

#[test]
fn move_without_press_does_nothing() {
    let mut core = scenario();
    let before = core.camera();
    assert!(core.on_pointer_move(Point::new(50.0, 50.0)).is_empty());
    assert_eq!(core.camera(), before);
}

#[test]
fn long_drag_does_not_select() {
    let mut core = scenario();
    let a5 = centre_of(&core, "a5");
    core.on_pointer_down(a5);
    core.on_pointer_move(Point::new(a5.x + 40.0, a5.y));
    core.on_pointer_up(Point::new(a5.x + 40.0, a5.y));
    assert!(core.selected_ids().is_empty());
}

#[test]
fn pointer_leave_while_dragging_resets_view() {
    let mut core = scenario();
    core.on_pointer_down(Point::new(10.0, 10.0));
    core.on_pointer_move(Point::new(200.0, 90.0));
    assert_eq!(core.on_pointer_leave(), vec![Action::RenderNeeded]);
    assert_eq!(core.camera().offset, Point::new(60.0, 20.0));
    assert!(core.gesture.is_idle());
}

#[test]
fn pointer_leave_while_idle_is_ignored() {
    let mut core = scenario();
    core.camera.pan(50.0, 50.0);
    assert!(core.on_pointer_leave().is_empty());
    assert_ne!(core.camera().offset, Point::new(60.0, 20.0));
}

// =============================================================
// Tapping
// =============================================================

#[test]
fn tap_selects_and_deselects_available_seat() {
    let mut core = scenario();
    let a5 = centre_of(&core, "a5");

    let actions = click(&mut core, a5);
    assert!(actions.contains(&Action::SelectionChanged { seat_id: "a5".into(), change: SelectionChange::Added }));
    assert!(actions.contains(&Action::RenderNeeded));
    assert_eq!(core.selected_ids(), vec!["a5"]);

    let actions = click(&mut core, a5);
    assert!(actions.contains(&Action::SelectionChanged { seat_id: "a5".into(), change: SelectionChange::Removed }));
    assert!(core.selected_ids().is_empty());
}

#[test]
fn tap_after_tiny_drag_still_selects() {
    let mut core = scenario();
    let a5 = centre_of(&core, "a5");
    let nudged = Point::new(a5.x + 3.0, a5.y + 3.0);
    core.on_pointer_down(a5);
    core.on_pointer_move(nudged);
    core.on_pointer_up(nudged);
    assert_eq!(core.selected_ids(), vec!["a5"]);
}

#[test]
fn tap_after_tiny_drag_selects_pressed_seat_on_hidpi_canvas() {
    let mut core = scenario();
    core.set_geometry(CanvasGeometry {
        pixel_size: Size::new(1600.0, 1200.0),
        css_size: Size::new(800.0, 600.0),
        screen_origin: Point::default(),
    });
    // CSS (108.6, 20) is backing (217.2, 40): model x = 217.2 / 1.2 - 60 = 121, inside a5.
    let press = Point::new(108.6, 20.0);
    let release = Point::new(104.6, 20.0);
    assert_eq!(hit::hit_test(&core.layout, &core.camera, &core.geometry, press).map(|s| s.id.as_str()), Some("a5"));

    core.on_pointer_down(press);
    core.on_pointer_move(release);
    core.on_pointer_up(release);
    assert_eq!(core.selected_ids(), vec!["a5"]);
}

#[test]
fn tap_uses_press_position_not_release() {
    let mut core = scenario();
    // Model x = 148 sits just inside a5's right edge (a5 spans 120..150).
    let press = core.camera.model_to_screen(Point::new(148.0, 15.0));
    let release = Point::new(press.x + 4.5, press.y);
    assert_eq!(hit::hit_test(&core.layout, &core.camera, &core.geometry, release).map(|s| s.id.as_str()), Some("a6"));

    core.on_pointer_down(press);
    core.on_pointer_up(release);
    assert_eq!(core.selected_ids(), vec!["a5"]);
}

#[test]
fn tap_on_occupied_seat_shows_tooltip() {
    let mut core = scenario();
    let a1 = centre_of(&core, "a1");
    let actions = click(&mut core, a1);

    let tip = core.tooltip().unwrap();
    assert_eq!(tip.username, "user1");
    assert_eq!(tip.name, "User 1");
    assert_eq!(actions, vec![Action::TooltipShown(tip.clone())]);
    assert!(core.selected_ids().is_empty());
}

#[test]
fn tooltip_is_placed_below_seat_relative_to_canvas() {
    let mut core = scenario();
    core.geometry.screen_origin = Point::new(10.0, 50.0);
    let a1 = centre_of(&core, "a1");
    click(&mut core, a1);
    let tip = core.tooltip().unwrap();
    assert!(approx_eq(tip.x, 60.0 * 1.2 + 10.0 + 20.0));
    assert!(approx_eq(tip.y, 50.0 * 1.2 + 50.0 + 20.0));
}

#[test]
fn next_press_hides_tooltip() {
    let mut core = scenario();
    let a1 = centre_of(&core, "a1");
    click(&mut core, a1);
    assert_eq!(core.on_pointer_down(Point::new(0.0, 0.0)), vec![Action::TooltipHidden]);
    assert!(core.tooltip().is_none());
}

#[test]
fn tap_on_reserved_seat_does_nothing() {
    let mut core = scenario();
    let b1 = centre_of(&core, "b1");
    assert!(click(&mut core, b1).is_empty());
    assert!(core.selected_ids().is_empty());
    assert!(core.tooltip().is_none());
}

#[test]
fn tap_on_empty_space_does_nothing() {
    let mut core = scenario();
    assert!(click(&mut core, Point::new(1.0, 1.0)).is_empty());
}

#[test]
fn disjoint_tap_is_reported_as_rejected() {
    let mut core = scenario();
    let a5 = centre_of(&core, "a5");
    let a15 = centre_of(&core, "a15");
    click(&mut core, a5);
    let actions = click(&mut core, a15);
    assert_eq!(actions, vec![Action::SelectionRejected { seat_id: "a15".into(), reason: RejectReason::NotAdjacent }]);
    assert_eq!(core.selected_ids(), vec!["a5"]);
}

#[test]
fn tap_corrects_for_css_scaling() {
    let mut core = scenario();
    core.set_geometry(CanvasGeometry {
        pixel_size: Size::new(1600.0, 1200.0),
        css_size: Size::new(800.0, 600.0),
        screen_origin: Point::default(),
    });
    let backing = centre_of(&core, "a5");
    click(&mut core, Point::new(backing.x / 2.0, backing.y / 2.0));
    assert_eq!(core.selected_ids(), vec!["a5"]);
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_down_zooms_out_one_step() {
    let mut core = scenario();
    assert_eq!(core.on_wheel(WheelDelta { dx: 0.0, dy: 100.0 }), vec![Action::RenderNeeded]);
    assert!(approx_eq(core.camera().scale, 1.18));
}

#[test]
fn wheel_at_max_scale_is_a_no_op() {
    let mut core = scenario();
    core.camera.scale = 2.0;
    assert!(core.on_wheel(WheelDelta { dx: 0.0, dy: -100.0 }).is_empty());
    assert_eq!(core.camera().scale, 2.0);
}

#[test]
fn wheel_works_mid_drag() {
    let mut core = scenario();
    core.on_pointer_down(Point::new(5.0, 5.0));
    core.on_wheel(WheelDelta { dx: 0.0, dy: -1.0 });
    assert!(approx_eq(core.camera().scale, 1.22));
    assert!(matches!(core.gesture, Gesture::Dragging { .. }));
}

// =============================================================
// Touch
// =============================================================

#[test]
fn single_touch_tap_selects() {
    let mut core = scenario();
    let a5 = centre_of(&core, "a5");
    core.on_touch_start(&[a5]);
    core.on_touch_end(&[], Some(a5));
    assert_eq!(core.selected_ids(), vec!["a5"]);
}

#[test]
fn single_touch_drag_pans() {
    let mut core = with_scale(scenario(), 1.0);
    core.on_touch_start(&[Point::new(100.0, 100.0)]);
    core.on_touch_move(&[Point::new(130.0, 115.0)]);
    core.on_touch_end(&[], Some(Point::new(130.0, 115.0)));
    assert_eq!(core.camera().offset, Point::new(30.0, 15.0));
    assert!(core.gesture.is_idle());
}

#[test]
fn pinch_scales_relative_to_start() {
    let mut core = scenario();
    core.on_touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    assert_eq!(core.gesture, Gesture::Pinching { initial_distance: 100.0, initial_scale: 1.2 });

    let actions = core.on_touch_move(&[Point::new(0.0, 0.0), Point::new(150.0, 0.0)]);
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert!(approx_eq(core.camera().scale, 1.8));

    core.on_touch_move(&[Point::new(0.0, 0.0), Point::new(400.0, 0.0)]);
    assert_eq!(core.camera().scale, 2.0);
}

#[test]
fn pinch_replaces_drag() {
    let mut core = scenario();
    core.on_touch_start(&[Point::new(10.0, 10.0)]);
    core.on_touch_start(&[Point::new(10.0, 10.0), Point::new(10.0, 60.0)]);
    assert!(matches!(core.gesture, Gesture::Pinching { .. }));
}

#[test]
fn zero_distance_pinch_ignores_moves() {
    let mut core = scenario();
    let p = Point::new(40.0, 40.0);
    core.on_touch_start(&[p, p]);
    assert!(core.on_touch_move(&[p, Point::new(90.0, 40.0)]).is_empty());
    assert_eq!(core.camera().scale, 1.2);
    assert!(matches!(core.gesture, Gesture::Pinching { .. }));
}

#[test]
fn lifting_one_finger_keeps_pinch_without_panning() {
    let mut core = scenario();
    core.on_touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    let remaining = [Point::new(0.0, 0.0)];
    assert!(core.on_touch_end(&remaining, Some(Point::new(100.0, 0.0))).is_empty());
    assert!(matches!(core.gesture, Gesture::Pinching { .. }));

    let before = core.camera();
    assert!(core.on_touch_move(&[Point::new(50.0, 50.0)]).is_empty());
    assert_eq!(core.camera(), before);

    core.on_touch_end(&[], Some(Point::new(50.0, 50.0)));
    assert!(core.gesture.is_idle());
    assert!(core.selected_ids().is_empty());
}

#[test]
fn touch_cancel_resets_view_and_hides_tooltip() {
    let mut core = scenario();
    core.on_touch_start(&[Point::new(0.0, 0.0)]);
    core.on_touch_move(&[Point::new(80.0, 40.0)]);
    core.tooltip = Some(Tooltip { seat_id: "a1".into(), username: "user1".into(), name: "User 1".into(), x: 0.0, y: 0.0 });

    let actions = core.on_touch_cancel(&[]);
    assert_eq!(actions, vec![Action::TooltipHidden, Action::RenderNeeded]);
    assert_eq!(core.camera().offset, Point::new(60.0, 20.0));
    assert!(core.gesture.is_idle());
    assert!(core.tooltip().is_none());
}

#[test]
fn touch_cancel_with_fingers_left_or_idle_is_ignored() {
    let mut core = scenario();
    assert!(core.on_touch_cancel(&[]).is_empty());
    core.on_touch_start(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    assert!(core.on_touch_cancel(&[Point::new(0.0, 0.0)]).is_empty());
    assert!(matches!(core.gesture, Gesture::Pinching { .. }));
}

// =============================================================
// Tooltip / rendering
// =============================================================

#[test]
fn hide_tooltip_only_reports_when_visible() {
    let mut core = scenario();
    assert!(core.hide_tooltip().is_empty());
    let a1 = centre_of(&core, "a1");
    click(&mut core, a1);
    assert_eq!(core.hide_tooltip(), vec![Action::TooltipHidden]);
}

struct CountingSurface {
    texts: usize,
}

impl Surface for CountingSurface {
    fn clear_rect(&mut self, _: f64, _: f64, _: f64, _: f64) {}
    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn scale(&mut self, _: f64) -> Result<()> {
        Ok(())
    }
    fn translate(&mut self, _: f64, _: f64) -> Result<()> {
        Ok(())
    }
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _: f64, _: f64) {}
    fn line_to(&mut self, _: f64, _: f64) {}
    fn quadratic_curve_to(&mut self, _: f64, _: f64, _: f64, _: f64) {}
    fn close_path(&mut self) {}
    fn fill(&mut self, _: &render::Paint) -> Result<()> {
        Ok(())
    }
    fn stroke(&mut self, _: &str) {}
    fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: &render::Paint) -> Result<()> {
        Ok(())
    }
    fn fill_text(&mut self, _: &str, _: f64, _: f64, _: &render::TextStyle) -> Result<()> {
        self.texts += 1;
        Ok(())
    }
}

#[test]
fn render_draws_every_seat() {
    let core = scenario();
    let mut surface = CountingSurface { texts: 0 };
    core.render(&mut surface).unwrap();
    assert_eq!(surface.texts, 40);
}
