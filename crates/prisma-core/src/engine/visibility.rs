use crate::core::record::{Record, RecordKind};
use crate::engine::filter::FieldPin;

/// One of the user-toggleable record kinds. The sentinel is not toggleable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindToggle {
    Meta,
    Atom,
    Hetero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindToggles {
    pub show_meta: bool,
    pub show_atom: bool,
    pub show_hetero: bool,
}

impl KindToggles {
    pub const fn all(shown: bool) -> Self {
        Self {
            show_meta: shown,
            show_atom: shown,
            show_hetero: shown,
        }
    }

    pub fn all_shown(&self) -> bool {
        self.show_meta && self.show_atom && self.show_hetero
    }

    pub fn is_shown(&self, which: KindToggle) -> bool {
        match which {
            KindToggle::Meta => self.show_meta,
            KindToggle::Atom => self.show_atom,
            KindToggle::Hetero => self.show_hetero,
        }
    }

    pub fn toggle(&mut self, which: KindToggle) {
        let flag = match which {
            KindToggle::Meta => &mut self.show_meta,
            KindToggle::Atom => &mut self.show_atom,
            KindToggle::Hetero => &mut self.show_hetero,
        };
        *flag = !*flag;
    }

    /// Shows everything unless everything is already shown, in which case
    /// hides everything.
    pub fn toggle_all(&mut self) {
        *self = Self::all(!self.all_shown());
    }

    pub fn shows(&self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::Meta => self.show_meta,
            RecordKind::Atom => self.show_atom,
            RecordKind::Hetero => self.show_hetero,
            RecordKind::Sentinel => true,
        }
    }
}

impl Default for KindToggles {
    /// Coordinates shown, header/remark metadata hidden.
    fn default() -> Self {
        Self {
            show_meta: false,
            show_atom: true,
            show_hetero: true,
        }
    }
}

/// The visibility predicate as a plain value.
///
/// Built from the kind toggles and the pins of every active filter. Two equal
/// values select the same records, which is what the store keys its filtered
/// view cache on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    toggles: KindToggles,
    pins: Vec<FieldPin>,
}

impl Visibility {
    pub fn new(toggles: KindToggles, pins: Vec<FieldPin>) -> Self {
        Self { toggles, pins }
    }

    /// Accepts every record.
    pub fn everything() -> Self {
        Self::new(KindToggles::all(true), Vec::new())
    }

    pub fn toggles(&self) -> KindToggles {
        self.toggles
    }

    pub fn pins(&self) -> &[FieldPin] {
        &self.pins
    }

    pub fn accepts(&self, record: &Record) -> bool {
        match record.kind() {
            RecordKind::Sentinel => true,
            kind => self.toggles.shows(kind) && self.pins.iter().all(|pin| pin.matches(record)),
        }
    }
}
