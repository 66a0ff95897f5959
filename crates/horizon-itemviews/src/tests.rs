//! Tests for the cell state machine and change notification.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::cell::{CellRenderer, CellState, ItemListCell};
use crate::easing::Easing;
use crate::geometry::{Point, Rect, Size};
use crate::hover::HoverPolicy;
use crate::informant::{CellSizeInformant, ItemSizeHints};
use crate::paint::{CachedRender, CellPainter};
use crate::role::{Role, RoleMap, RoleSet, RoleValue};
use crate::siblings::SiblingsInfo;
use crate::style::{CellStyleOption, Color};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn role_map(entries: &[(&str, RoleValue)]) -> RoleMap {
    entries
        .iter()
        .map(|(name, value)| (Role::new(name), value.clone()))
        .collect()
}

fn role_set(names: &[&str]) -> RoleSet {
    names.iter().map(Role::new).collect()
}

/// Renderer that records every hook invocation as a readable string.
struct TestRenderer {
    log: Rc<RefCell<Vec<String>>>,
}

impl TestRenderer {
    fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self { log }
    }

    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl CellRenderer for TestRenderer {
    fn text_rect(&self, _cell: &CellState) -> Rect {
        Rect::new(20.0, 2.0, 70.0, 16.0)
    }

    fn selection_rect_full(&self, _cell: &CellState) -> Rect {
        Rect::new(0.0, 0.0, 100.0, 20.0)
    }

    fn selection_rect_core(&self, _cell: &CellState) -> Rect {
        Rect::new(0.0, 0.0, 90.0, 20.0)
    }

    // Detached from the selection rect on purpose: hit-testing must
    // treat the interactive area as a (non-contiguous) union.
    fn expansion_toggle_rect(&self, _cell: &CellState) -> Rect {
        Rect::new(110.0, 2.0, 16.0, 16.0)
    }

    fn paint(&mut self, _cell: &CellState, _painter: &mut dyn CellPainter) {
        self.record("paint".into());
    }

    fn data_changed(&mut self, _cell: &CellState, _current: &RoleMap, changed: &RoleSet) {
        let mut roles: Vec<&str> = changed.iter().map(Role::as_str).collect();
        roles.sort_unstable();
        self.record(format!("data_changed:{}", roles.join(",")));
    }

    fn visible_roles_changed(
        &mut self,
        _cell: &CellState,
        current: &[Role],
        previous: &[Role],
    ) {
        self.record(format!(
            "visible_roles:{:?}<-{:?}",
            current.iter().map(Role::as_str).collect::<Vec<_>>(),
            previous.iter().map(Role::as_str).collect::<Vec<_>>(),
        ));
    }

    fn column_width_changed(
        &mut self,
        _cell: &CellState,
        role: &Role,
        current: f32,
        previous: f32,
    ) {
        self.record(format!("column_width:{role}:{current}<-{previous}"));
    }

    fn side_padding_changed(
        &mut self,
        _cell: &CellState,
        current: (f32, f32),
        previous: (f32, f32),
    ) {
        self.record(format!("side_padding:{current:?}<-{previous:?}"));
    }

    fn style_option_changed(
        &mut self,
        _cell: &CellState,
        _current: &CellStyleOption,
        _previous: &CellStyleOption,
    ) {
        self.record("style_option".into());
    }

    fn selected_changed(&mut self, _cell: &CellState, current: bool, previous: bool) {
        self.record(format!("selected:{current}<-{previous}"));
    }

    fn current_changed(&mut self, _cell: &CellState, current: bool, previous: bool) {
        self.record(format!("current:{current}<-{previous}"));
    }

    fn hovered_changed(&mut self, _cell: &CellState, current: bool, previous: bool) {
        self.record(format!("hovered:{current}<-{previous}"));
    }

    fn hover_position_changed(&mut self, _cell: &CellState, current: Point, previous: Point) {
        self.record(format!(
            "hover_position:({},{})<-({},{})",
            current.x, current.y, previous.x, previous.y
        ));
    }

    fn highlighted_changed(&mut self, _cell: &CellState, current: bool, previous: bool) {
        self.record(format!("highlighted:{current}<-{previous}"));
    }

    fn pressed_changed(&mut self, _cell: &CellState, current: bool, previous: bool) {
        self.record(format!("pressed:{current}<-{previous}"));
    }

    fn alternate_background_changed(
        &mut self,
        _cell: &CellState,
        current: bool,
        previous: bool,
    ) {
        self.record(format!("alternate_background:{current}<-{previous}"));
    }

    fn expansion_area_hovered_changed(
        &mut self,
        _cell: &CellState,
        current: bool,
        previous: bool,
    ) {
        self.record(format!("expansion_area_hovered:{current}<-{previous}"));
    }

    fn enabled_selection_toggle_changed(
        &mut self,
        _cell: &CellState,
        current: bool,
        previous: bool,
    ) {
        self.record(format!("enabled_selection_toggle:{current}<-{previous}"));
    }

    fn siblings_information_changed(
        &mut self,
        _cell: &CellState,
        current: &SiblingsInfo,
        previous: &SiblingsInfo,
    ) {
        self.record(format!("siblings:{current:?}<-{previous:?}"));
    }

    fn edited_role_changed(
        &mut self,
        _cell: &CellState,
        current: Option<&Role>,
        previous: Option<&Role>,
    ) {
        self.record(format!(
            "edited_role:{:?}<-{:?}",
            current.map(Role::as_str),
            previous.map(Role::as_str),
        ));
    }

    fn icon_size_changed(&mut self, _cell: &CellState, current: u32, previous: u32) {
        self.record(format!("icon_size:{current}<-{previous}"));
    }

    fn hover_sequence_started(&mut self, _cell: &CellState) {
        self.record("hover_started".into());
    }

    fn hover_sequence_index_changed(&mut self, _cell: &CellState, sequence_index: u32) {
        self.record(format!("hover_index:{sequence_index}"));
    }

    fn hover_sequence_ended(&mut self, _cell: &CellState) {
        self.record("hover_ended".into());
    }
}

/// Informant with fixed answers that records forwarded queries.
struct TestInformant {
    queries: RefCell<Vec<(String, usize)>>,
}

impl TestInformant {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            queries: RefCell::new(Vec::new()),
        })
    }
}

impl CellSizeInformant for TestInformant {
    fn calculate_item_size_hints(&self) -> ItemSizeHints {
        ItemSizeHints {
            logical_heights: vec![(18.0, true), (14.0, false)],
            logical_width: 120.0,
        }
    }

    fn preferred_role_column_width(&self, role: &Role, index: usize) -> f32 {
        self.queries
            .borrow_mut()
            .push((role.as_str().to_owned(), index));
        64.0
    }
}

/// Painter that counts captures and records fills.
#[derive(Default)]
struct TestPainter {
    captures: u32,
    capturing: bool,
    fills: Vec<Rect>,
    cached_draws: u32,
}

impl CellPainter for TestPainter {
    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        self.fills.push(rect);
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _line_width: f32) {}

    fn capture_begin(&mut self, _size: Size) {
        assert!(!self.capturing, "captures must not nest");
        self.capturing = true;
    }

    fn capture_end(&mut self) -> CachedRender {
        assert!(self.capturing, "capture_end without capture_begin");
        self.capturing = false;
        self.captures += 1;
        CachedRender::new(self.captures)
    }

    fn draw_cached(&mut self, _cached: &CachedRender, _origin: Point, _opacity: f32) {
        self.cached_draws += 1;
    }
}

fn new_cell() -> (ItemListCell, Rc<RefCell<Vec<String>>>) {
    init_logging();
    let log = Rc::new(RefCell::new(Vec::new()));
    let cell = ItemListCell::new(
        Box::new(TestRenderer::new(log.clone())),
        TestInformant::new(),
    );
    (cell, log)
}

fn new_cell_with_fade(fade_in: u32, fade_out: u32) -> (ItemListCell, Rc<RefCell<Vec<String>>>) {
    init_logging();
    let log = Rc::new(RefCell::new(Vec::new()));
    let cell = ItemListCell::with_hover_policy(
        Box::new(TestRenderer::new(log.clone())),
        TestInformant::new(),
        HoverPolicy {
            fade_in_ticks: fade_in,
            fade_out_ticks: fade_out,
            easing: Easing::Linear,
            ..HoverPolicy::default()
        },
    );
    (cell, log)
}

// =========================================================================
// No-op suppression and change hooks
// =========================================================================

#[test]
fn test_noop_setters_fire_no_hooks() {
    let (mut cell, log) = new_cell();
    let updates = Rc::new(Cell::new(0u32));
    let updates_clone = updates.clone();
    cell.update_requested.connect(move |_| {
        updates_clone.set(updates_clone.get() + 1);
    });

    cell.set_selected(false);
    cell.set_current(false);
    cell.set_hovered(false);
    cell.set_hover_position(Point::ZERO);
    cell.set_highlighted(false);
    cell.set_pressed(false);
    cell.set_alternate_background(false);
    cell.set_expansion_area_hovered(false);
    cell.set_enabled_selection_toggle(false);
    cell.set_side_padding(0.0, 0.0);
    cell.set_visible_roles(Vec::new());
    cell.set_style_option(CellStyleOption::default());
    cell.set_siblings_information(SiblingsInfo::new());
    cell.set_edited_role(None);
    cell.set_icon_size(0);
    cell.set_data(RoleMap::new(), &RoleSet::new());

    assert!(log.borrow().is_empty(), "hooks fired: {:?}", log.borrow());
    assert_eq!(updates.get(), 0, "no-op setters must not schedule repaints");
}

#[test]
fn test_change_hooks_carry_current_and_previous() {
    let (mut cell, log) = new_cell();

    cell.set_selected(true);
    cell.set_icon_size(32);
    cell.set_icon_size(48);

    assert_eq!(
        *log.borrow(),
        vec!["selected:true<-false", "icon_size:32<-0", "icon_size:48<-32"]
    );
}

#[test]
fn test_side_padding_fires_once_with_final_values() {
    let (mut cell, log) = new_cell();

    cell.set_side_padding(5.0, 7.0);
    assert_eq!(*log.borrow(), vec!["side_padding:(5.0, 7.0)<-(0.0, 0.0)"]);

    log.borrow_mut().clear();
    // One side changing still fires exactly once, with both new values
    cell.set_side_padding(5.0, 9.0);
    assert_eq!(*log.borrow(), vec!["side_padding:(5.0, 9.0)<-(5.0, 7.0)"]);
    assert_eq!(cell.left_padding(), 5.0);
    assert_eq!(cell.right_padding(), 9.0);
}

// =========================================================================
// Role data store
// =========================================================================

#[test]
fn test_data_diff_excludes_equal_roles() {
    let (mut cell, log) = new_cell();

    cell.set_data(
        role_map(&[("a", RoleValue::Int(1)), ("b", RoleValue::Int(2))]),
        &RoleSet::new(),
    );
    log.borrow_mut().clear();

    cell.set_data(
        role_map(&[("a", RoleValue::Int(1)), ("b", RoleValue::Int(3))]),
        &RoleSet::new(),
    );

    assert_eq!(*log.borrow(), vec!["data_changed:b"]);
    assert_eq!(cell.value("b").as_int(), Some(3));
}

#[test]
fn test_data_hint_intersected_with_actual_changes() {
    let (mut cell, log) = new_cell();
    cell.set_data(
        role_map(&[("a", RoleValue::Int(1)), ("b", RoleValue::Int(2))]),
        &RoleSet::new(),
    );
    log.borrow_mut().clear();

    // Hint claims both changed; only b actually did
    cell.set_data(
        role_map(&[("a", RoleValue::Int(1)), ("b", RoleValue::Int(3))]),
        &role_set(&["a", "b"]),
    );
    assert_eq!(*log.borrow(), vec!["data_changed:b"]);

    log.borrow_mut().clear();
    // Hint names only an unchanged role: no hook at all
    cell.set_data(
        role_map(&[("a", RoleValue::Int(1)), ("b", RoleValue::Int(3))]),
        &role_set(&["a"]),
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn test_set_data_is_replace_not_merge() {
    let (mut cell, log) = new_cell();
    cell.set_data(
        role_map(&[("a", RoleValue::Int(1)), ("b", RoleValue::Int(2))]),
        &RoleSet::new(),
    );
    log.borrow_mut().clear();

    cell.set_data(role_map(&[("a", RoleValue::Int(1))]), &RoleSet::new());

    assert_eq!(*log.borrow(), vec!["data_changed:b"]);
    assert!(cell.value("b").is_none());
    assert_eq!(cell.data().len(), 1);
}

#[test]
fn test_value_returns_sentinel_for_absent_role() {
    let (cell, _log) = new_cell();
    assert!(cell.value("no-such-role").is_none());
}

// =========================================================================
// Layout parameters
// =========================================================================

#[test]
fn test_visible_roles_prune_column_widths() {
    let (mut cell, log) = new_cell();
    cell.set_visible_roles(vec![Role::new("a"), Role::new("b")]);
    cell.set_column_width(Role::new("a"), 10.0);
    cell.set_column_width(Role::new("b"), 20.0);
    log.borrow_mut().clear();

    cell.set_visible_roles(vec![Role::new("a")]);

    assert_eq!(*log.borrow(), vec![r#"visible_roles:["a"]<-["a", "b"]"#]);
    assert_eq!(cell.column_width("a"), 10.0);
    assert_eq!(cell.column_width("b"), 0.0); // entry dropped
}

#[test]
fn test_column_width_hook_keyed_by_role() {
    let (mut cell, log) = new_cell();
    cell.set_visible_roles(vec![Role::new("size")]);
    log.borrow_mut().clear();

    cell.set_column_width(Role::new("size"), 42.0);
    cell.set_column_width(Role::new("size"), 42.0); // no-op

    assert_eq!(*log.borrow(), vec!["column_width:size:42<-0"]);
}

// =========================================================================
// Hover lifecycle
// =========================================================================

#[test]
fn test_hover_lifecycle() {
    let (mut cell, log) = new_cell_with_fade(3, 2);

    let started = Rc::new(Cell::new(0u32));
    let ended = Rc::new(Cell::new(0u32));
    let released = Rc::new(Cell::new(0u32));
    let requested = Rc::new(RefCell::new(Vec::new()));
    {
        let started = started.clone();
        cell.hover_sequence_started
            .connect(move |_| started.set(started.get() + 1));
        let ended = ended.clone();
        cell.hover_sequence_ended
            .connect(move |_| ended.set(ended.get() + 1));
        let released = released.clone();
        cell.hover_timer_released
            .connect(move |_| released.set(released.get() + 1));
        let requested = requested.clone();
        cell.hover_timer_requested
            .connect(move |&interval| requested.borrow_mut().push(interval));
    }

    cell.set_hovered(true);
    assert_eq!(started.get(), 1);
    assert_eq!(*requested.borrow(), vec![Duration::from_millis(100)]);
    assert_eq!(cell.hover_opacity(), 0.0);
    assert!(cell.hover_animation_running());

    // Fade in: opacity strictly increases, sequence advances every tick
    let mut prev = 0.0;
    for i in 1..=3u32 {
        cell.hover_tick();
        assert_eq!(cell.hover_sequence_index(), i);
        assert!(cell.hover_opacity() > prev);
        prev = cell.hover_opacity();
    }
    assert_eq!(cell.hover_opacity(), 1.0);

    // Saturated: the index keeps advancing
    cell.hover_tick();
    assert_eq!(cell.hover_sequence_index(), 4);
    assert_eq!(cell.hover_opacity(), 1.0);

    cell.set_hovered(false);
    assert_eq!(ended.get(), 0); // still fading
    cell.hover_tick();
    assert!(cell.hover_opacity() > 0.0 && cell.hover_opacity() < 1.0);
    cell.hover_tick();
    assert_eq!(cell.hover_opacity(), 0.0);
    assert_eq!(ended.get(), 1);
    assert_eq!(released.get(), 1);
    assert!(!cell.hover_animation_running());

    // Stray tick after the end observes nothing
    let len = log.borrow().len();
    cell.hover_tick();
    assert_eq!(log.borrow().len(), len);
    assert_eq!(ended.get(), 1);
    assert_eq!(started.get(), 1);

    // Hook ordering: started before any index, ended last
    let entries = log.borrow();
    let started_pos = entries.iter().position(|e| e == "hover_started");
    let first_index_pos = entries.iter().position(|e| e == "hover_index:1");
    let ended_pos = entries.iter().position(|e| e == "hover_ended");
    assert!(started_pos < first_index_pos && first_index_pos < ended_pos);
}

#[test]
fn test_unhover_before_tick_ends_synchronously() {
    let (mut cell, log) = new_cell_with_fade(4, 4);
    let released = Rc::new(Cell::new(0u32));
    let released_clone = released.clone();
    cell.hover_timer_released
        .connect(move |_| released_clone.set(released_clone.get() + 1));

    cell.set_hovered(true);
    cell.set_hovered(false);

    assert_eq!(cell.hover_opacity(), 0.0);
    assert!(!cell.hover_animation_running());
    assert_eq!(released.get(), 1);
    let entries = log.borrow();
    assert_eq!(
        entries
            .iter()
            .filter(|e| *e == "hover_started" || *e == "hover_ended")
            .count(),
        2
    );
}

#[test]
fn test_rehover_during_fade_resumes_sequence() {
    let (mut cell, _log) = new_cell_with_fade(2, 4);
    let started = Rc::new(Cell::new(0u32));
    let started_clone = started.clone();
    cell.hover_sequence_started
        .connect(move |_| started_clone.set(started_clone.get() + 1));

    cell.set_hovered(true);
    cell.hover_tick();
    cell.hover_tick();
    assert_eq!(cell.hover_sequence_index(), 2);

    cell.set_hovered(false);
    cell.hover_tick(); // partial fade
    cell.set_hovered(true);

    // Hover refresh, not a new hover
    assert_eq!(started.get(), 1);
    assert_eq!(cell.hover_sequence_index(), 2);
    assert!(cell.hover_opacity() > 0.0);
}

// =========================================================================
// Hover cache
// =========================================================================

fn hovered_cell_with_cache() -> (ItemListCell, TestPainter) {
    let (mut cell, _log) = new_cell_with_fade(2, 2);
    cell.set_size(Size::new(100.0, 20.0));
    cell.set_hovered(true);
    cell.hover_tick();
    assert!(cell.hover_opacity() > 0.0);

    let mut painter = TestPainter::default();
    cell.paint(&mut painter);
    assert_eq!(painter.captures, 1);
    assert!(cell.has_hover_cache());
    (cell, painter)
}

#[test]
fn test_hover_cache_reused_across_paints() {
    let (mut cell, mut painter) = hovered_cell_with_cache();

    cell.paint(&mut painter);
    assert_eq!(painter.captures, 1, "second paint must reuse the cache");
    assert_eq!(painter.cached_draws, 2);
}

#[test]
fn test_selected_change_invalidates_cache_but_not_animation() {
    let (mut cell, mut painter) = hovered_cell_with_cache();
    let opacity = cell.hover_opacity();
    let sequence = cell.hover_sequence_index();

    cell.set_selected(true);

    assert!(!cell.has_hover_cache());
    assert_eq!(cell.hover_opacity(), opacity);
    assert_eq!(cell.hover_sequence_index(), sequence);

    cell.paint(&mut painter);
    assert_eq!(painter.captures, 2, "next paint must rebuild the cache");
}

#[test]
fn test_hover_position_fires_hook_and_keeps_cache() {
    let (mut cell, log) = new_cell_with_fade(2, 2);
    cell.set_size(Size::new(100.0, 20.0));
    cell.set_hovered(true);
    cell.hover_tick();
    let mut painter = TestPainter::default();
    cell.paint(&mut painter);
    assert!(cell.has_hover_cache());
    log.borrow_mut().clear();

    cell.set_hover_position(Point::new(12.0, 8.0));
    cell.set_hover_position(Point::new(12.0, 8.0)); // no-op

    assert_eq!(*log.borrow(), vec!["hover_position:(12,8)<-(0,0)"]);
    assert_eq!(cell.hover_position(), Point::new(12.0, 8.0));
    assert!(cell.needs_repaint());

    // Pointer movement must not rebuild the cached base
    assert!(cell.has_hover_cache());
    cell.paint(&mut painter);
    assert_eq!(painter.captures, 1);
}

#[test]
fn test_hover_ticks_do_not_invalidate_cache() {
    let (mut cell, mut painter) = hovered_cell_with_cache();

    cell.hover_tick();
    assert!(cell.has_hover_cache());
    cell.paint(&mut painter);
    assert_eq!(painter.captures, 1);
}

#[test]
fn test_paint_without_hover_is_direct() {
    let (mut cell, log) = new_cell();
    cell.set_size(Size::new(100.0, 20.0));
    let mut painter = TestPainter::default();

    cell.paint(&mut painter);

    assert_eq!(painter.captures, 0);
    assert_eq!(painter.cached_draws, 0);
    assert!(log.borrow().contains(&"paint".to_string()));
    assert!(!cell.needs_repaint());
}

// =========================================================================
// Hit-testing
// =========================================================================

#[test]
fn test_hit_testing_union() {
    let (cell, _log) = new_cell();

    // Inside selection_rect_full
    assert!(cell.contains(Point::new(50.0, 10.0)));
    // Inside expansion_toggle_rect but outside selection_rect_full
    assert!(cell.contains(Point::new(115.0, 10.0)));
    // In the gap between the two
    assert!(!cell.contains(Point::new(105.0, 10.0)));
    // Outside everything
    assert!(!cell.contains(Point::new(200.0, 10.0)));
}

#[test]
fn test_default_toggle_rects_are_absent() {
    struct MinimalRenderer;
    impl CellRenderer for MinimalRenderer {
        fn text_rect(&self, _cell: &CellState) -> Rect {
            Rect::new(0.0, 0.0, 50.0, 10.0)
        }
        fn selection_rect_full(&self, _cell: &CellState) -> Rect {
            Rect::new(0.0, 0.0, 50.0, 10.0)
        }
        fn selection_rect_core(&self, _cell: &CellState) -> Rect {
            Rect::new(0.0, 0.0, 50.0, 10.0)
        }
        fn paint(&mut self, _cell: &CellState, _painter: &mut dyn CellPainter) {}
    }

    let cell = ItemListCell::new(Box::new(MinimalRenderer), TestInformant::new());
    assert!(cell.selection_toggle_rect().is_empty());
    assert!(cell.expansion_toggle_rect().is_empty());
    assert_eq!(cell.text_focus_rect(), cell.text_rect());
    // text_focus_rect must stay inside text_rect
    assert!(cell.text_rect().contains_rect(&cell.text_focus_rect()));
}

// =========================================================================
// Role editing
// =========================================================================

#[test]
fn test_edit_cancellation_fires_once() {
    let (mut cell, log) = new_cell();
    cell.set_index(5);
    cell.set_data(
        role_map(&[("name", RoleValue::from("document.txt"))]),
        &RoleSet::new(),
    );
    log.borrow_mut().clear();

    let canceled = Rc::new(RefCell::new(Vec::new()));
    let canceled_clone = canceled.clone();
    cell.role_editing_canceled.connect(move |event| {
        canceled_clone
            .borrow_mut()
            .push((event.index, event.role.clone(), event.value.clone()));
    });

    cell.set_edited_role(Some(Role::new("name")));
    assert_eq!(cell.edited_role().map(Role::as_str), Some("name"));
    assert!(canceled.borrow().is_empty());

    cell.set_edited_role(None);
    {
        let events = canceled.borrow();
        assert_eq!(events.len(), 1);
        let (index, role, value) = &events[0];
        assert_eq!(*index, 5);
        assert_eq!(role.as_str(), "name");
        assert_eq!(value.as_text(), Some("document.txt"));
    }

    // Cancelling with no edit in progress fires nothing
    let len = log.borrow().len();
    cell.set_edited_role(None);
    assert_eq!(canceled.borrow().len(), 1);
    assert_eq!(log.borrow().len(), len);
}

#[test]
fn test_edit_switch_fires_no_cancel() {
    let (mut cell, log) = new_cell();
    let canceled = Rc::new(Cell::new(0u32));
    let canceled_clone = canceled.clone();
    cell.role_editing_canceled
        .connect(move |_| canceled_clone.set(canceled_clone.get() + 1));

    cell.set_edited_role(Some(Role::new("name")));
    cell.set_edited_role(Some(Role::new("tags")));

    assert_eq!(canceled.get(), 0);
    assert_eq!(cell.edited_role().map(Role::as_str), Some("tags"));
    assert_eq!(
        *log.borrow(),
        vec![
            r#"edited_role:Some("name")<-None"#,
            r#"edited_role:Some("tags")<-Some("name")"#,
        ]
    );
}

#[test]
fn test_editing_absent_role_is_legal() {
    let (mut cell, _log) = new_cell();
    let canceled = Rc::new(Cell::new(0u32));
    let canceled_clone = canceled.clone();
    cell.role_editing_canceled
        .connect(move |_| canceled_clone.set(canceled_clone.get() + 1));

    cell.set_edited_role(Some(Role::new("not-in-data")));
    cell.set_edited_role(None);

    assert_eq!(canceled.get(), 1);
}

#[test]
fn test_finish_role_editing() {
    let (mut cell, _log) = new_cell();
    cell.set_index(2);
    let finished = Rc::new(RefCell::new(Vec::new()));
    let finished_clone = finished.clone();
    cell.role_editing_finished.connect(move |event| {
        finished_clone
            .borrow_mut()
            .push((event.index, event.role.clone(), event.value.clone()));
    });

    cell.set_edited_role(Some(Role::new("name")));
    cell.finish_role_editing(RoleValue::from("renamed.txt"));

    {
        let events = finished.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 2);
        assert_eq!(events[0].1.as_str(), "name");
        assert_eq!(events[0].2.as_text(), Some("renamed.txt"));
    }
    assert!(cell.edited_role().is_none());

    // Without an ongoing edit, finishing is a no-op
    cell.finish_role_editing(RoleValue::from("again"));
    assert_eq!(finished.borrow().len(), 1);
}

// =========================================================================
// Index reassignment and recycling
// =========================================================================

#[test]
fn test_set_index_fires_nothing_and_preserves_state() {
    let (mut cell, log) = new_cell();
    cell.set_data(role_map(&[("text", RoleValue::from("x"))]), &RoleSet::new());
    cell.set_selected(true);
    log.borrow_mut().clear();

    cell.set_index(7);

    assert!(log.borrow().is_empty());
    assert_eq!(cell.index(), 7);
    assert!(cell.is_selected());
    assert_eq!(cell.value("text").as_text(), Some("x"));
}

#[test]
fn test_set_index_keeps_hover_cache() {
    let (mut cell, _painter) = hovered_cell_with_cache();
    cell.set_index(9);
    assert!(cell.has_hover_cache());
}

// =========================================================================
// Teardown
// =========================================================================

#[test]
fn test_drop_releases_running_timer() {
    let released = Rc::new(Cell::new(0u32));
    {
        let (mut cell, _log) = new_cell_with_fade(4, 4);
        let released_clone = released.clone();
        cell.hover_timer_released
            .connect(move |_| released_clone.set(released_clone.get() + 1));
        cell.set_hovered(true);
        cell.hover_tick();
    }
    assert_eq!(released.get(), 1);
}

#[test]
fn test_drop_without_running_timer_is_silent() {
    let released = Rc::new(Cell::new(0u32));
    {
        let (mut cell, _log) = new_cell();
        let released_clone = released.clone();
        cell.hover_timer_released
            .connect(move |_| released_clone.set(released_clone.get() + 1));
        cell.set_selected(true);
    }
    assert_eq!(released.get(), 0);
}

// =========================================================================
// Informant forwarding and repaint scheduling
// =========================================================================

#[test]
fn test_informant_forwarding() {
    init_logging();
    let log = Rc::new(RefCell::new(Vec::new()));
    let informant = TestInformant::new();
    let mut cell = ItemListCell::new(
        Box::new(TestRenderer::new(log.clone())),
        informant.clone(),
    );
    cell.set_index(3);

    let hints = cell.item_size_hints();
    assert_eq!(hints.logical_heights, vec![(18.0, true), (14.0, false)]);
    assert_eq!(hints.logical_width, 120.0);

    assert_eq!(cell.preferred_role_column_width(&Role::new("size")), 64.0);
    assert_eq!(*informant.queries.borrow(), vec![("size".to_owned(), 3)]);
}

#[test]
fn test_changes_schedule_repaints() {
    let (mut cell, _log) = new_cell();
    let mut painter = TestPainter::default();
    cell.paint(&mut painter);
    assert!(!cell.needs_repaint());

    let updates = Rc::new(Cell::new(0u32));
    let updates_clone = updates.clone();
    cell.update_requested
        .connect(move |_| updates_clone.set(updates_clone.get() + 1));

    cell.set_selected(true);
    assert_eq!(updates.get(), 1);
    assert!(cell.needs_repaint());

    cell.paint(&mut painter);
    assert!(!cell.needs_repaint());
}
