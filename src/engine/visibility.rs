/// Edge reported when the paused state flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VisibilityChange {
    Paused,
    Resumed,
}

/// Pauses ticking while the output is scrolled out of view or the document is backgrounded.
///
/// Pausing only suspends ticks; it never touches animation, burst or scene state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityController {
    element_visible: bool,
    document_visible: bool,
}

impl VisibilityController {
    pub fn new(element_visible: bool, document_visible: bool) -> Self {
        Self {
            element_visible,
            document_visible,
        }
    }

    pub fn is_paused(&self) -> bool {
        !(self.element_visible && self.document_visible)
    }

    pub fn set_element_visible(&mut self, visible: bool) -> Option<VisibilityChange> {
        self.update(|s| s.element_visible = visible)
    }

    pub fn set_document_visible(&mut self, visible: bool) -> Option<VisibilityChange> {
        self.update(|s| s.document_visible = visible)
    }

    fn update(&mut self, f: impl FnOnce(&mut Self)) -> Option<VisibilityChange> {
        let was = self.is_paused();
        f(self);
        match (was, self.is_paused()) {
            (false, true) => Some(VisibilityChange::Paused),
            (true, false) => Some(VisibilityChange::Resumed),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/visibility.rs"]
mod tests;
