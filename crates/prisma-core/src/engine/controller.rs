use crate::core::record::{Record, RecordKind};
use crate::engine::error::ViewerError;
use crate::engine::filter::FilterEngine;
use crate::engine::store::{Cursor, RecordStore};
use crate::engine::utils::cyclic::step_cyclic;
use crate::engine::visibility::{KindToggle, KindToggles, Visibility};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

/// The closed set of user intents the controller understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ScrollUp(usize),
    ScrollDown(usize),
    ScrollTop,
    ScrollBottom,
    MoveField(Direction),
    ToggleKind(KindToggle),
    ToggleAll,
    CycleFilter(String, Direction),
    ResetFilters,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Per-cell styling hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightTag {
    None,
    Base,
    Alt,
    Selected,
}

/// Highlight of a cell given its record kind, the field under it and the
/// selected field.
///
/// Unmapped columns and the sentinel get [`HighlightTag::None`]; the selected
/// field wins over banding; metadata rows are not banded; atom rows band even
/// field indices as [`HighlightTag::Alt`].
pub fn highlight_tag(
    kind: RecordKind,
    field: Option<usize>,
    current_field: Option<usize>,
) -> HighlightTag {
    let Some(field) = field else {
        return HighlightTag::None;
    };
    match kind {
        RecordKind::Sentinel => HighlightTag::None,
        _ if current_field == Some(field) => HighlightTag::Selected,
        RecordKind::Meta => HighlightTag::Base,
        RecordKind::Atom | RecordKind::Hetero if field % 2 == 0 => HighlightTag::Alt,
        RecordKind::Atom | RecordKind::Hetero => HighlightTag::Base,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLine<'a> {
    pub record: &'a Record,
    pub highlights: Vec<HighlightTag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow<'a> {
    pub index: usize,
    pub name: &'a str,
    pub zero_indexed: String,
    pub one_indexed: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow<'a> {
    pub name: &'a str,
    pub field_name: &'a str,
    pub values: &'a [String],
    pub selected: Option<usize>,
}

/// Everything a renderer needs for one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub title: &'a str,
    pub lines: Vec<FrameLine<'a>>,
    pub fields: Vec<FieldRow<'a>>,
    pub filters: Vec<FilterRow<'a>>,
    pub toggles: KindToggles,
    pub cursor: Cursor,
    /// Visible records, the sentinel excluded.
    pub visible_records: usize,
    /// All records, the sentinel excluded.
    pub total_records: usize,
}

/// Navigation and filtering state machine over a [`RecordStore`].
#[derive(Debug)]
pub struct ViewController {
    store: RecordStore,
    filters: FilterEngine,
    toggles: KindToggles,
    default_toggles: KindToggles,
    fast_scroll: Option<usize>,
}

impl ViewController {
    /// Takes ownership of `store` and `filters`, deriving the filters'
    /// reference values from the store.
    pub fn new(store: RecordStore, mut filters: FilterEngine, default_toggles: KindToggles) -> Self {
        filters.refresh(&store);
        Self {
            store,
            filters,
            toggles: default_toggles,
            default_toggles,
            fast_scroll: None,
        }
    }

    /// Fixes the page-scroll step instead of deriving it from the viewport.
    pub fn with_fast_scroll(mut self, lines: Option<usize>) -> Self {
        self.fast_scroll = lines.filter(|&n| n > 0);
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterEngine {
        &self.filters
    }

    pub fn toggles(&self) -> KindToggles {
        self.toggles
    }

    pub fn cursor(&self) -> Cursor {
        self.store.cursor()
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::new(self.toggles, self.filters.pins())
    }

    pub fn visible_count(&self) -> usize {
        self.store.visible_count(&self.visibility())
    }

    /// Lines moved by a page scroll for a viewport of `viewport_height` rows.
    pub fn fast_scroll_step(&self, viewport_height: usize) -> usize {
        self.fast_scroll.unwrap_or(viewport_height / 2).max(1)
    }

    /// Moves the cursor by `delta` visible lines, clamped so that it never
    /// rests on the sentinel unless nothing else is visible.
    pub fn scroll(&mut self, delta: isize) {
        let last = self.last_line();
        let line = self
            .store
            .cursor()
            .current_line
            .saturating_add_signed(delta)
            .min(last);
        self.store.set_current_line(line);
    }

    fn last_line(&self) -> usize {
        self.visible_count().saturating_sub(2)
    }

    fn clamp_cursor(&mut self) {
        let last = self.last_line();
        if self.store.cursor().current_line > last {
            self.store.set_current_line(last);
        }
    }

    pub fn move_field(&mut self, forward: bool) {
        let current = self.store.cursor().current_field;
        let next = step_cyclic(current, self.store.schema().len(), forward);
        self.store.set_current_field(next);
        debug!(field = ?next, "Moved field selection.");
    }

    pub fn toggle_kind(&mut self, which: KindToggle) {
        let previous = self.visibility();
        self.toggles.toggle(which);
        debug!(kind = ?which, shown = self.toggles.is_shown(which), "Toggled record kind.");
        self.reposition(&previous);
    }

    pub fn toggle_all(&mut self) {
        let previous = self.visibility();
        self.toggles.toggle_all();
        debug!(shown = self.toggles.all_shown(), "Toggled all record kinds.");
        self.reposition(&previous);
    }

    /// # Errors
    ///
    /// [`ViewerError::InvalidFilterKey`] if no filter is called `name`.
    pub fn cycle_filter(&mut self, name: &str, forward: bool) -> Result<(), ViewerError> {
        let previous = self.visibility();
        self.filters.cycle(name, forward)?;
        self.reposition(&previous);
        Ok(())
    }

    pub fn reset_filters(&mut self) {
        self.toggles = self.default_toggles;
        self.filters.reset_all();
        self.store.set_current_line(0);
        debug!("Reset toggles and filters to defaults.");
    }

    /// Moves the cursor to the first record that was visible before the change
    /// and still is. The scan is anchored at the record under the cursor, not
    /// at the top, so the view stays near where the user was reading. Falls
    /// back to the top.
    fn reposition(&mut self, previous: &Visibility) {
        let current = self.visibility();
        let start = self
            .store
            .record_index_at(previous, self.store.cursor().current_line)
            .unwrap_or(0);
        let line = self.store.records()[start..]
            .iter()
            .position(|r| !r.is_sentinel() && previous.accepts(r) && current.accepts(r))
            .and_then(|offset| self.store.position_of(&current, start + offset))
            .unwrap_or(0);
        self.store.set_current_line(line);
        self.clamp_cursor();
    }

    /// Applies one action.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidFilterKey`] when a filter action names an
    /// unregistered filter.
    pub fn apply(&mut self, action: Action) -> Result<Flow, ViewerError> {
        match action {
            Action::ScrollUp(n) => self.scroll(isize::try_from(n).unwrap_or(isize::MAX).saturating_neg()),
            Action::ScrollDown(n) => self.scroll(isize::try_from(n).unwrap_or(isize::MAX)),
            Action::ScrollTop => self.scroll(isize::MIN),
            Action::ScrollBottom => self.scroll(isize::MAX),
            Action::MoveField(direction) => self.move_field(direction.is_forward()),
            Action::ToggleKind(which) => self.toggle_kind(which),
            Action::ToggleAll => self.toggle_all(),
            Action::CycleFilter(name, direction) => {
                let result = self.cycle_filter(&name, direction.is_forward());
                debug_assert!(result.is_ok(), "unregistered filter '{name}'");
                result?;
            }
            Action::ResetFilters => self.reset_filters(),
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn highlight(&self, record: &Record, column: usize) -> HighlightTag {
        highlight_tag(
            record.kind(),
            self.store.field_at(column),
            self.store.cursor().current_field,
        )
    }

    /// One tag per character column of `record`.
    pub fn highlights(&self, record: &Record) -> Vec<HighlightTag> {
        (0..record.width())
            .map(|column| self.highlight(record, column))
            .collect()
    }

    /// Up to `height` visible records starting at the cursor.
    pub fn window(&self, height: usize) -> Vec<&Record> {
        self.store
            .window(&self.visibility(), self.store.cursor().current_line, height)
    }

    pub fn frame(&self, height: usize) -> Frame<'_> {
        let visibility = self.visibility();
        let cursor = self.store.cursor();
        let lines = self
            .store
            .window(&visibility, cursor.current_line, height)
            .into_iter()
            .map(|record| FrameLine {
                record,
                highlights: self.highlights(record),
            })
            .collect();
        let fields = self
            .store
            .schema()
            .fields()
            .iter()
            .enumerate()
            .map(|(index, field)| FieldRow {
                index,
                name: &field.name,
                zero_indexed: field.display_range(true),
                one_indexed: field.display_range(false),
                selected: cursor.current_field == Some(index),
            })
            .collect();
        let filters = self
            .filters
            .filters()
            .iter()
            .map(|filter| FilterRow {
                name: filter.name(),
                field_name: filter.field_name(),
                values: filter.reference_values(),
                selected: filter.selected_index(),
            })
            .collect();

        Frame {
            title: self.store.name(),
            lines,
            fields,
            filters,
            toggles: self.toggles,
            cursor,
            visible_records: self.store.visible_count(&visibility).saturating_sub(1),
            total_records: self.store.len().saturating_sub(1),
        }
    }

    pub fn current_field_name(&self) -> Option<&str> {
        self.store
            .cursor()
            .current_field
            .and_then(|i| self.store.schema().field(i))
            .map(|f| f.name.as_str())
    }
}
