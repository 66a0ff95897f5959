//! The recyclable item-view cell.
//!
//! An [`ItemListCell`] shows one visible item from the owning view's model.
//! The view creates cells only for the visible area and repurposes them as
//! the user scrolls: it reassigns the index, pushes new role data, and flips
//! presentation flags through the setters here. Every setter follows the
//! compare-then-notify discipline - nothing fires unless the value actually
//! changed, and a real change invokes the matching [`CellRenderer`] hook
//! with the previous value so renderers can update incrementally instead of
//! recomputing everything.
//!
//! Rendering an item of a concrete model requires at least a
//! [`CellRenderer::paint`] implementation; the base `paint` here draws the
//! background, selection, and the animated hover effect on top of whatever
//! the renderer produces.
//!
//! # Reentrancy
//!
//! All mutation happens on the owning view's event-processing thread.
//! Renderer hooks receive a shared [`CellState`] and structurally cannot
//! re-enter setters. Slots connected to the public signals run synchronously
//! inside the setter that emitted them and must not mutate the same cell;
//! doing so through an outer `Rc<RefCell<ItemListCell>>` is a protocol
//! violation, not a supported pattern.

use std::rc::Rc;
use std::time::Duration;

use horizon_itemviews_core::Signal;

use crate::geometry::{Point, Rect, Size};
use crate::hover::{HoverAnimation, HoverPolicy, HoverTransition};
use crate::informant::{CellSizeInformant, ItemSizeHints};
use crate::paint::{CachedRender, CellPainter};
use crate::role::{Role, RoleMap, RoleSet, RoleValue, changed_roles};
use crate::siblings::SiblingsInfo;
use crate::style::CellStyleOption;

/// Payload of the role-editing signals: which item, which role, which value.
#[derive(Debug, Clone)]
pub struct RoleEditEvent {
    pub index: usize,
    pub role: Role,
    pub value: RoleValue,
}

/// The plain-data portion of a cell, shared with the renderer.
///
/// Renderers read everything they need for geometry and painting from here;
/// mutation goes exclusively through [`ItemListCell`] setters.
#[derive(Debug, Clone)]
pub struct CellState {
    index: usize,
    size: Size,
    data: RoleMap,
    visible_roles: Vec<Role>,
    column_widths: std::collections::HashMap<Role, f32>,
    left_padding: f32,
    right_padding: f32,
    style_option: CellStyleOption,
    selected: bool,
    current: bool,
    hovered: bool,
    hover_position: Point,
    highlighted: bool,
    pressed: bool,
    alternate_background: bool,
    expansion_area_hovered: bool,
    enabled_selection_toggle: bool,
    click_highlighted: bool,
    siblings_info: SiblingsInfo,
    edited_role: Option<Role>,
    icon_size: u32,
    hover_opacity: f32,
    hover_sequence_index: u32,
}

impl CellState {
    fn new() -> Self {
        Self {
            index: 0,
            size: Size::ZERO,
            data: RoleMap::new(),
            visible_roles: Vec::new(),
            column_widths: std::collections::HashMap::new(),
            left_padding: 0.0,
            right_padding: 0.0,
            style_option: CellStyleOption::default(),
            selected: false,
            current: false,
            hovered: false,
            hover_position: Point::ZERO,
            highlighted: false,
            pressed: false,
            alternate_background: false,
            expansion_area_hovered: false,
            enabled_selection_toggle: false,
            click_highlighted: false,
            siblings_info: SiblingsInfo::new(),
            edited_role: None,
            icon_size: 0,
            hover_opacity: 0.0,
            hover_sequence_index: 0,
        }
    }

    /// Current logical position in the view's item sequence.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell geometry assigned by the view's layouter.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The bounding rectangle at the cell's local origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self.size,
        }
    }

    /// The item's current role data.
    #[inline]
    pub fn data(&self) -> &RoleMap {
        &self.data
    }

    /// Value for a role; [`RoleValue::None`] for absent roles.
    pub fn value(&self, role: &str) -> RoleValue {
        self.data.get(role).cloned().unwrap_or_default()
    }

    /// Roles rendered by this cell, in layout order.
    #[inline]
    pub fn visible_roles(&self) -> &[Role] {
        &self.visible_roles
    }

    /// Column width for a role in column-aligned mode; 0.0 when unset.
    pub fn column_width(&self, role: &str) -> f32 {
        self.column_widths.get(role).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn left_padding(&self) -> f32 {
        self.left_padding
    }

    #[inline]
    pub fn right_padding(&self) -> f32 {
        self.right_padding
    }

    /// Style record supplied wholesale by the view.
    #[inline]
    pub fn style_option(&self) -> &CellStyleOption {
        &self.style_option
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[inline]
    pub fn is_current(&self) -> bool {
        self.current
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Pointer position of the current hover, in cell-local coordinates.
    /// Meaningful only while hovered.
    #[inline]
    pub fn hover_position(&self) -> Point {
        self.hover_position
    }

    #[inline]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[inline]
    pub fn alternate_background(&self) -> bool {
        self.alternate_background
    }

    #[inline]
    pub fn expansion_area_hovered(&self) -> bool {
        self.expansion_area_hovered
    }

    #[inline]
    pub fn enabled_selection_toggle(&self) -> bool {
        self.enabled_selection_toggle
    }

    /// Transient visual pulse around a click interaction.
    #[inline]
    pub fn is_click_highlighted(&self) -> bool {
        self.click_highlighted
    }

    /// Sibling information for tree branch lines.
    #[inline]
    pub fn siblings_information(&self) -> &SiblingsInfo {
        &self.siblings_info
    }

    /// The role currently being edited, if any.
    #[inline]
    pub fn edited_role(&self) -> Option<&Role> {
        self.edited_role.as_ref()
    }

    /// Actual icon edge length used for drawing (also during icon resize
    /// animation).
    #[inline]
    pub fn icon_size(&self) -> u32 {
        self.icon_size
    }

    /// Current hover fade opacity in [0, 1]. Animation-owned.
    #[inline]
    pub fn hover_opacity(&self) -> f32 {
        self.hover_opacity
    }

    /// Current hover sequence index. Animation-owned.
    #[inline]
    pub fn hover_sequence_index(&self) -> u32 {
        self.hover_sequence_index
    }
}

/// Per-item-kind rendering and geometry, plus incremental change hooks.
///
/// Required methods define the geometry contract and the painting of the
/// item's content. Every other method has a default: empty rectangles mean
/// "feature absent", change hooks default to doing nothing (the base already
/// invalidates caches and schedules repaints).
///
/// Hooks receive the [`CellState`] after the change together with explicit
/// current and previous values; they run synchronously inside the setter.
#[allow(unused_variables)]
pub trait CellRenderer {
    /// Rectangle containing the text properties.
    fn text_rect(&self, cell: &CellState) -> Rect;

    /// Rectangle around the selection visuals; selection behavior matches it.
    fn selection_rect_full(&self, cell: &CellState) -> Rect;

    /// Core area of the item; all of it reacts identically to clicks.
    fn selection_rect_core(&self, cell: &CellState) -> Rect;

    /// Paint the item's content. The base paints background, selection, and
    /// the hover effect around this call.
    fn paint(&mut self, cell: &CellState, painter: &mut dyn CellPainter);

    /// Focus rectangle for the current item. Must not extend outside
    /// [`text_rect`](Self::text_rect); override when `text_rect` is larger
    /// than the actual text.
    fn text_focus_rect(&self, cell: &CellState) -> Rect {
        self.text_rect(cell)
    }

    /// Rectangle of the selection toggle; empty means no toggle.
    fn selection_toggle_rect(&self, cell: &CellState) -> Rect {
        Rect::ZERO
    }

    /// Rectangle of the sub-tree expansion toggle; empty means sub-trees are
    /// not supported.
    fn expansion_toggle_rect(&self, cell: &CellState) -> Rect {
        Rect::ZERO
    }

    /// Begin an ancillary "item will activate soon" effect. Default: none.
    fn start_activate_soon_animation(&mut self, cell: &CellState, time_until_activation: Duration) {}

    // Change hooks - fired only on actual changes.

    fn data_changed(&mut self, cell: &CellState, current: &RoleMap, changed: &RoleSet) {}

    fn visible_roles_changed(&mut self, cell: &CellState, current: &[Role], previous: &[Role]) {}

    fn column_width_changed(&mut self, cell: &CellState, role: &Role, current: f32, previous: f32) {}

    /// Fired once per `set_side_padding` call, even when both sides change.
    fn side_padding_changed(
        &mut self,
        cell: &CellState,
        current: (f32, f32),
        previous: (f32, f32),
    ) {
    }

    fn style_option_changed(
        &mut self,
        cell: &CellState,
        current: &CellStyleOption,
        previous: &CellStyleOption,
    ) {
    }

    fn selected_changed(&mut self, cell: &CellState, current: bool, previous: bool) {}

    fn current_changed(&mut self, cell: &CellState, current: bool, previous: bool) {}

    fn hovered_changed(&mut self, cell: &CellState, current: bool, previous: bool) {}

    /// The pointer moved while hovering this item.
    fn hover_position_changed(&mut self, cell: &CellState, current: Point, previous: Point) {}

    fn highlighted_changed(&mut self, cell: &CellState, current: bool, previous: bool) {}

    fn pressed_changed(&mut self, cell: &CellState, current: bool, previous: bool) {}

    fn alternate_background_changed(&mut self, cell: &CellState, current: bool, previous: bool) {}

    fn expansion_area_hovered_changed(&mut self, cell: &CellState, current: bool, previous: bool) {}

    fn enabled_selection_toggle_changed(&mut self, cell: &CellState, current: bool, previous: bool) {
    }

    fn siblings_information_changed(
        &mut self,
        cell: &CellState,
        current: &SiblingsInfo,
        previous: &SiblingsInfo,
    ) {
    }

    fn edited_role_changed(
        &mut self,
        cell: &CellState,
        current: Option<&Role>,
        previous: Option<&Role>,
    ) {
    }

    fn icon_size_changed(&mut self, cell: &CellState, current: u32, previous: u32) {}

    /// The user started hovering this item.
    fn hover_sequence_started(&mut self, cell: &CellState) {}

    /// Fired on each timer tick while the user keeps hovering.
    fn hover_sequence_index_changed(&mut self, cell: &CellState, sequence_index: u32) {}

    /// The user stopped hovering this item (fade-out finished).
    fn hover_sequence_ended(&mut self, cell: &CellState) {}
}

/// A recyclable cell showing one visible item from the model.
///
/// Owned exclusively by the view for its lifetime; repurposed across rows
/// via [`set_index`](Self::set_index) / [`set_data`](Self::set_data).
/// Reassigning the index resets nothing else - the view replaces whatever
/// state the new row needs through the individual setters.
pub struct ItemListCell {
    state: CellState,
    renderer: Box<dyn CellRenderer>,
    informant: Rc<dyn CellSizeInformant>,
    hover: HoverAnimation,
    hover_cache: Option<CachedRender>,
    needs_repaint: bool,

    /// A repaint of this cell should be scheduled.
    pub update_requested: Signal<()>,
    /// The periodic hover timer should start with the given interval.
    pub hover_timer_requested: Signal<Duration>,
    /// The periodic hover timer is no longer needed.
    pub hover_timer_released: Signal<()>,
    /// An ongoing edit was canceled.
    pub role_editing_canceled: Signal<RoleEditEvent>,
    /// An ongoing edit committed a value.
    pub role_editing_finished: Signal<RoleEditEvent>,
    /// A hover sequence began.
    pub hover_sequence_started: Signal<()>,
    /// The hover sequence index advanced.
    pub hover_sequence_index_changed: Signal<u32>,
    /// The hover sequence finished fading out.
    pub hover_sequence_ended: Signal<()>,
}

impl ItemListCell {
    /// Create a cell with a renderer and the view's size informant.
    pub fn new(renderer: Box<dyn CellRenderer>, informant: Rc<dyn CellSizeInformant>) -> Self {
        Self::with_hover_policy(renderer, informant, HoverPolicy::default())
    }

    /// Create a cell with an explicit hover timing policy.
    pub fn with_hover_policy(
        renderer: Box<dyn CellRenderer>,
        informant: Rc<dyn CellSizeInformant>,
        policy: HoverPolicy,
    ) -> Self {
        Self {
            state: CellState::new(),
            renderer,
            informant,
            hover: HoverAnimation::new(policy),
            hover_cache: None,
            needs_repaint: true,
            update_requested: Signal::new(),
            hover_timer_requested: Signal::new(),
            hover_timer_released: Signal::new(),
            role_editing_canceled: Signal::new(),
            role_editing_finished: Signal::new(),
            hover_sequence_started: Signal::new(),
            hover_sequence_index_changed: Signal::new(),
            hover_sequence_ended: Signal::new(),
        }
    }

    /// The shared plain-data state.
    #[inline]
    pub fn state(&self) -> &CellState {
        &self.state
    }

    /// The renderer driving this cell.
    pub fn renderer(&self) -> &dyn CellRenderer {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> &mut dyn CellRenderer {
        self.renderer.as_mut()
    }

    /// The size informant the view supplied at construction.
    pub fn informant(&self) -> &Rc<dyn CellSizeInformant> {
        &self.informant
    }

    // =========================================================================
    // Repaint scheduling and hover cache
    // =========================================================================

    /// Schedule a repaint of this cell.
    pub fn update(&mut self) {
        self.needs_repaint = true;
        self.update_requested.emit(());
    }

    /// Whether a repaint is pending. Cleared by [`paint`](Self::paint).
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Drop the cached un-hovered rendering; the next paint rebuilds it.
    pub fn clear_hover_cache(&mut self) {
        self.hover_cache = None;
    }

    /// Whether a cached un-hovered rendering currently exists.
    #[inline]
    pub fn has_hover_cache(&self) -> bool {
        self.hover_cache.is_some()
    }

    // A visually-relevant property changed: stale cache, repaint.
    fn visual_change(&mut self) {
        self.clear_hover_cache();
        self.update();
    }

    // =========================================================================
    // Index and size (not change-notified)
    // =========================================================================

    /// Reassign the cell to another row. Fires no hook and resets nothing
    /// else; the view pushes the new row's data and flags explicitly.
    pub fn set_index(&mut self, index: usize) {
        self.state.index = index;
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.state.index
    }

    /// Assign the cell's geometry. Invalidates the hover cache, since the
    /// cached rendering has the old size.
    pub fn set_size(&mut self, size: Size) {
        if self.state.size != size {
            self.state.size = size;
            self.visual_change();
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.state.size
    }

    // =========================================================================
    // Role data store
    // =========================================================================

    /// Replace the item's role data in full.
    ///
    /// `changed_role_hint` lists the roles the caller believes changed; an
    /// empty hint makes the cell compute the delta by value-comparing the
    /// union of old and new role sets. The data hook receives the roles that
    /// *actually* differ - hinted-but-equal roles are filtered out. No hook
    /// fires when nothing effectively changed.
    pub fn set_data(&mut self, data: RoleMap, changed_role_hint: &RoleSet) {
        let diff = changed_roles(&self.state.data, &data);
        let effective: RoleSet = if changed_role_hint.is_empty() {
            diff
        } else {
            changed_role_hint.intersection(&diff).cloned().collect()
        };

        self.state.data = data;

        if effective.is_empty() {
            return;
        }

        tracing::trace!(
            target: "horizon_itemviews::cell",
            index = self.state.index,
            changed = effective.len(),
            "data changed"
        );
        self.renderer
            .data_changed(&self.state, &self.state.data, &effective);
        self.visual_change();
    }

    /// The item's current role data.
    #[inline]
    pub fn data(&self) -> &RoleMap {
        self.state.data()
    }

    /// Value for a role; [`RoleValue::None`] for absent roles. Never fails.
    pub fn value(&self, role: &str) -> RoleValue {
        self.state.value(role)
    }

    // =========================================================================
    // Layout parameters
    // =========================================================================

    /// Set which roles are rendered, in layout order.
    ///
    /// Column widths of roles that remain visible are preserved; entries for
    /// roles no longer visible are dropped.
    pub fn set_visible_roles(&mut self, roles: Vec<Role>) {
        if self.state.visible_roles == roles {
            return;
        }
        let previous = std::mem::replace(&mut self.state.visible_roles, roles);
        self.state
            .column_widths
            .retain(|role, _| self.state.visible_roles.contains(role));
        self.renderer
            .visible_roles_changed(&self.state, &self.state.visible_roles, &previous);
        self.visual_change();
    }

    #[inline]
    pub fn visible_roles(&self) -> &[Role] {
        self.state.visible_roles()
    }

    /// Set the width used for `role` when content is aligned in columns.
    /// Widths must be non-negative.
    pub fn set_column_width(&mut self, role: Role, width: f32) {
        if width < 0.0 {
            tracing::warn!(
                target: "horizon_itemviews::cell",
                %role,
                width,
                "negative column width"
            );
        }
        let previous = self.state.column_width(role.as_str());
        if previous == width {
            return;
        }
        self.state.column_widths.insert(role.clone(), width);
        self.renderer
            .column_width_changed(&self.state, &role, width, previous);
        self.visual_change();
    }

    /// Column width for a role; 0.0 when unset.
    pub fn column_width(&self, role: &str) -> f32 {
        self.state.column_width(role)
    }

    /// Set both side paddings atomically; the hook fires at most once.
    pub fn set_side_padding(&mut self, left: f32, right: f32) {
        let previous = (self.state.left_padding, self.state.right_padding);
        if previous == (left, right) {
            return;
        }
        self.state.left_padding = left;
        self.state.right_padding = right;
        self.renderer
            .side_padding_changed(&self.state, (left, right), previous);
        self.visual_change();
    }

    #[inline]
    pub fn left_padding(&self) -> f32 {
        self.state.left_padding
    }

    #[inline]
    pub fn right_padding(&self) -> f32 {
        self.state.right_padding
    }

    /// Replace the style record. Compared by value; identical records are a
    /// no-op.
    pub fn set_style_option(&mut self, option: CellStyleOption) {
        if self.state.style_option == option {
            return;
        }
        let previous = std::mem::replace(&mut self.state.style_option, option);
        self.renderer
            .style_option_changed(&self.state, &self.state.style_option, &previous);
        self.visual_change();
    }

    #[inline]
    pub fn style_option(&self) -> &CellStyleOption {
        self.state.style_option()
    }

    // =========================================================================
    // Presentation flags
    // =========================================================================

    pub fn set_selected(&mut self, selected: bool) {
        if self.state.selected == selected {
            return;
        }
        let previous = self.state.selected;
        self.state.selected = selected;
        // The interaction moved on; the click pulse is over.
        self.state.click_highlighted = false;
        self.renderer
            .selected_changed(&self.state, selected, previous);
        self.visual_change();
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.state.selected
    }

    pub fn set_current(&mut self, current: bool) {
        if self.state.current == current {
            return;
        }
        let previous = self.state.current;
        self.state.current = current;
        self.state.click_highlighted = false;
        self.renderer.current_changed(&self.state, current, previous);
        self.visual_change();
    }

    #[inline]
    pub fn is_current(&self) -> bool {
        self.state.current
    }

    /// Set the hovered flag and drive the hover animation.
    ///
    /// `Idle -> Active` fires [`CellRenderer::hover_sequence_started`] and
    /// requests the periodic timer. Hovering again during the fade-out
    /// resumes the sequence without resetting its index. Un-hovering before
    /// anything faded in ends the sequence synchronously.
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.state.hovered == hovered {
            return;
        }
        let previous = self.state.hovered;
        self.state.hovered = hovered;
        self.state.click_highlighted = false;
        self.renderer.hovered_changed(&self.state, hovered, previous);

        let transition = self.hover.set_hovered(hovered);
        self.sync_hover_state();
        match transition {
            HoverTransition::SequenceStarted => {
                self.renderer.hover_sequence_started(&self.state);
                self.hover_sequence_started.emit(());
                self.hover_timer_requested
                    .emit(self.hover.policy().tick_interval);
            }
            HoverTransition::SequenceEnded => {
                self.renderer.hover_sequence_ended(&self.state);
                self.hover_sequence_ended.emit(());
                self.hover_timer_released.emit(());
            }
            HoverTransition::Resumed
            | HoverTransition::FadeOutStarted
            | HoverTransition::None => {}
        }
        self.visual_change();
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.state.hovered
    }

    /// Track where inside the cell the pointer currently is. Updated by the
    /// view on every pointer move while hovered; renderers react to proximity
    /// with it (e.g. revealing the selection toggle near the pointer).
    ///
    /// The position never affects the cached un-hovered appearance, so the
    /// hover cache survives pointer movement.
    pub fn set_hover_position(&mut self, position: Point) {
        if self.state.hover_position == position {
            return;
        }
        let previous = self.state.hover_position;
        self.state.hover_position = position;
        self.renderer
            .hover_position_changed(&self.state, position, previous);
        self.update();
    }

    #[inline]
    pub fn hover_position(&self) -> Point {
        self.state.hover_position
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.state.highlighted == highlighted {
            return;
        }
        let previous = self.state.highlighted;
        self.state.highlighted = highlighted;
        self.renderer
            .highlighted_changed(&self.state, highlighted, previous);
        self.visual_change();
    }

    #[inline]
    pub fn is_highlighted(&self) -> bool {
        self.state.highlighted
    }

    /// Set the purely visual pressed highlight. Pressing also raises the
    /// transient click-highlight pulse.
    pub fn set_pressed(&mut self, pressed: bool) {
        if self.state.pressed == pressed {
            return;
        }
        let previous = self.state.pressed;
        self.state.pressed = pressed;
        if pressed {
            self.state.click_highlighted = true;
        }
        self.renderer.pressed_changed(&self.state, pressed, previous);
        self.visual_change();
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.state.pressed
    }

    /// Directly drive the transient click pulse; its timing is owned by the
    /// caller. No hook fires, but the change is visual.
    pub fn set_click_highlighted(&mut self, highlighted: bool) {
        if self.state.click_highlighted != highlighted {
            self.state.click_highlighted = highlighted;
            self.visual_change();
        }
    }

    #[inline]
    pub fn is_click_highlighted(&self) -> bool {
        self.state.click_highlighted
    }

    pub fn set_alternate_background(&mut self, enable: bool) {
        if self.state.alternate_background == enable {
            return;
        }
        let previous = self.state.alternate_background;
        self.state.alternate_background = enable;
        self.renderer
            .alternate_background_changed(&self.state, enable, previous);
        self.visual_change();
    }

    #[inline]
    pub fn alternate_background(&self) -> bool {
        self.state.alternate_background
    }

    pub fn set_expansion_area_hovered(&mut self, hovered: bool) {
        if self.state.expansion_area_hovered == hovered {
            return;
        }
        let previous = self.state.expansion_area_hovered;
        self.state.expansion_area_hovered = hovered;
        self.renderer
            .expansion_area_hovered_changed(&self.state, hovered, previous);
        self.visual_change();
    }

    #[inline]
    pub fn expansion_area_hovered(&self) -> bool {
        self.state.expansion_area_hovered
    }

    pub fn set_enabled_selection_toggle(&mut self, enabled: bool) {
        if self.state.enabled_selection_toggle == enabled {
            return;
        }
        let previous = self.state.enabled_selection_toggle;
        self.state.enabled_selection_toggle = enabled;
        self.renderer
            .enabled_selection_toggle_changed(&self.state, enabled, previous);
        self.visual_change();
    }

    #[inline]
    pub fn enabled_selection_toggle(&self) -> bool {
        self.state.enabled_selection_toggle
    }

    /// Set the sibling information for the item and all of its parents.
    /// The first bit belongs to the topmost ancestor, the last bit to the
    /// item itself; used for drawing tree branches.
    pub fn set_siblings_information(&mut self, siblings: SiblingsInfo) {
        if self.state.siblings_info == siblings {
            return;
        }
        let previous = std::mem::replace(&mut self.state.siblings_info, siblings);
        self.renderer
            .siblings_information_changed(&self.state, &self.state.siblings_info, &previous);
        self.visual_change();
    }

    #[inline]
    pub fn siblings_information(&self) -> &SiblingsInfo {
        self.state.siblings_information()
    }

    /// Set the actual icon size used for drawing.
    pub fn set_icon_size(&mut self, icon_size: u32) {
        if self.state.icon_size == icon_size {
            return;
        }
        let previous = self.state.icon_size;
        self.state.icon_size = icon_size;
        self.renderer
            .icon_size_changed(&self.state, icon_size, previous);
        self.visual_change();
    }

    #[inline]
    pub fn icon_size(&self) -> u32 {
        self.state.icon_size
    }

    // =========================================================================
    // Role-editing session
    // =========================================================================

    /// Begin editing `role`, or cancel the ongoing edit with `None`.
    ///
    /// Cancelling emits [`role_editing_canceled`](Self::role_editing_canceled)
    /// with the previously edited role and its current value - once, and only
    /// if a role was actually being edited. Switching directly from one role
    /// to another fires only the `edited_role_changed` hook; the editing UI
    /// is expected to emit finish/cancel itself before switching. The role
    /// is not validated against the data or the visible roles - editing an
    /// absent role is legal.
    pub fn set_edited_role(&mut self, role: Option<Role>) {
        if self.state.edited_role == role {
            return;
        }
        let previous = std::mem::replace(&mut self.state.edited_role, role);

        if self.state.edited_role.is_none() {
            if let Some(canceled) = &previous {
                self.role_editing_canceled.emit(RoleEditEvent {
                    index: self.state.index,
                    role: canceled.clone(),
                    value: self.state.value(canceled.as_str()),
                });
            }
        }

        self.renderer.edited_role_changed(
            &self.state,
            self.state.edited_role.as_ref(),
            previous.as_ref(),
        );
        self.visual_change();
    }

    #[inline]
    pub fn edited_role(&self) -> Option<&Role> {
        self.state.edited_role()
    }

    /// Commit the ongoing edit with the edited value.
    ///
    /// Emits [`role_editing_finished`](Self::role_editing_finished) and
    /// leaves the editing session. The value is reported to the view; the
    /// cell's own data is only updated when the model pushes it back through
    /// [`set_data`](Self::set_data). Without an ongoing edit this is a no-op.
    pub fn finish_role_editing(&mut self, value: RoleValue) {
        let Some(role) = self.state.edited_role.take() else {
            return;
        };
        self.role_editing_finished.emit(RoleEditEvent {
            index: self.state.index,
            role: role.clone(),
            value,
        });
        self.renderer
            .edited_role_changed(&self.state, None, Some(&role));
        self.visual_change();
    }

    // =========================================================================
    // Hover animation
    // =========================================================================

    /// Advance the hover animation by one timer tick.
    ///
    /// Driven by the owning view's periodic timer between
    /// [`hover_timer_requested`](Self::hover_timer_requested) and
    /// [`hover_timer_released`](Self::hover_timer_released). Stray ticks
    /// while idle are ignored.
    pub fn hover_tick(&mut self) {
        let outcome = self.hover.tick();
        self.sync_hover_state();

        if let Some(index) = outcome.sequence_index {
            self.renderer
                .hover_sequence_index_changed(&self.state, index);
            self.hover_sequence_index_changed.emit(index);
        }
        if outcome.ended {
            self.renderer.hover_sequence_ended(&self.state);
            self.hover_sequence_ended.emit(());
            self.hover_timer_released.emit(());
        }
        if outcome.opacity_changed || outcome.sequence_index.is_some() || outcome.ended {
            // Animation state is not cached; only a repaint is needed.
            self.update();
        }
    }

    /// Current hover fade opacity; respect this in custom hover painting.
    #[inline]
    pub fn hover_opacity(&self) -> f32 {
        self.state.hover_opacity
    }

    #[inline]
    pub fn hover_sequence_index(&self) -> u32 {
        self.state.hover_sequence_index
    }

    /// Whether the hover timer is currently needed.
    #[inline]
    pub fn hover_animation_running(&self) -> bool {
        self.hover.is_running()
    }

    fn sync_hover_state(&mut self) {
        self.state.hover_opacity = self.hover.opacity();
        self.state.hover_sequence_index = self.hover.sequence_index();
    }

    // =========================================================================
    // Geometry contract and hit-testing
    // =========================================================================

    pub fn text_rect(&self) -> Rect {
        self.renderer.text_rect(&self.state)
    }

    pub fn text_focus_rect(&self) -> Rect {
        self.renderer.text_focus_rect(&self.state)
    }

    pub fn selection_rect_full(&self) -> Rect {
        self.renderer.selection_rect_full(&self.state)
    }

    pub fn selection_rect_core(&self) -> Rect {
        self.renderer.selection_rect_core(&self.state)
    }

    pub fn selection_toggle_rect(&self) -> Rect {
        self.renderer.selection_toggle_rect(&self.state)
    }

    pub fn expansion_toggle_rect(&self) -> Rect {
        self.renderer.expansion_toggle_rect(&self.state)
    }

    /// Whether `point` is inside the cell's interactive area: the union of
    /// [`selection_rect_full`](Self::selection_rect_full),
    /// [`selection_toggle_rect`](Self::selection_toggle_rect), and
    /// [`expansion_toggle_rect`](Self::expansion_toggle_rect). The union
    /// need not be contiguous.
    pub fn contains(&self, point: Point) -> bool {
        self.selection_rect_full().contains(point)
            || self.selection_toggle_rect().contains(point)
            || self.expansion_toggle_rect().contains(point)
    }

    // =========================================================================
    // Informant forwarding
    // =========================================================================

    /// Expected per-role heights and overall width for a representative
    /// item. Forwarded to the view's informant.
    pub fn item_size_hints(&self) -> ItemSizeHints {
        self.informant.calculate_item_size_hints()
    }

    /// Preferred column width for `role` at this cell's index. Forwarded to
    /// the view's informant.
    pub fn preferred_role_column_width(&self, role: &Role) -> f32 {
        self.informant
            .preferred_role_column_width(role, self.state.index)
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the cell.
    ///
    /// With no hover fade in flight this paints directly. While the fade is
    /// active the un-hovered appearance is captured into the hover cache
    /// (rebuilt here if stale, never eagerly) and composited, then the hover
    /// fill is blended on top at the current opacity.
    pub fn paint(&mut self, painter: &mut dyn CellPainter) {
        self.needs_repaint = false;

        let opacity = self.state.hover_opacity;
        if opacity <= 0.0 {
            self.paint_base(painter);
            return;
        }

        if self.hover_cache.is_none() {
            painter.capture_begin(self.state.size);
            self.paint_base(painter);
            self.hover_cache = Some(painter.capture_end());
        }
        if let Some(cache) = &self.hover_cache {
            painter.draw_cached(cache, Point::ZERO, 1.0);
        }
        let hover_rect = self.renderer.selection_rect_full(&self.state);
        let hover_color = self.state.style_option.hover_color.with_opacity(opacity);
        painter.fill_rect(hover_rect, hover_color);
    }

    /// Render the cell's current state into an offscreen capture, e.g. for
    /// drag feedback.
    pub fn create_drag_snapshot(&mut self, painter: &mut dyn CellPainter) -> CachedRender {
        painter.capture_begin(self.state.size);
        self.paint_base(painter);
        painter.capture_end()
    }

    /// Forward an activate-soon countdown to the renderer.
    pub fn start_activate_soon_animation(&mut self, time_until_activation: Duration) {
        self.renderer
            .start_activate_soon_animation(&self.state, time_until_activation);
    }

    // The un-hovered appearance: background, selection, focus, content.
    fn paint_base(&mut self, painter: &mut dyn CellPainter) {
        let style = &self.state.style_option;

        if self.state.alternate_background {
            painter.fill_rect(self.state.bounds(), style.alternate_background_color);
        }
        if self.state.selected || self.state.click_highlighted {
            painter.fill_rect(
                self.renderer.selection_rect_full(&self.state),
                style.selection_color,
            );
        }
        if self.state.current {
            painter.stroke_rect(
                self.renderer.text_focus_rect(&self.state),
                style.text_color,
                1.0,
            );
        }
        self.renderer.paint(&self.state, painter);
    }
}

impl Drop for ItemListCell {
    fn drop(&mut self) {
        // The timer must be gone before any other teardown; no tick may run
        // against a partially destroyed cell.
        if self.hover.is_running() {
            self.hover_timer_released.emit(());
        }
    }
}

impl std::fmt::Debug for ItemListCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemListCell")
            .field("index", &self.state.index)
            .field("hover", &self.hover.state())
            .field("needs_repaint", &self.needs_repaint)
            .finish_non_exhaustive()
    }
}

// Cells live and die on the view's event-processing thread.
static_assertions::assert_not_impl_any!(ItemListCell: Send, Sync);
