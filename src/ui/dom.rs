use crate::{MapError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// The handful of DOM mutations the UI chrome performs
pub trait DomSurface {
    /// Shows (`display: block`) or hides (`display: none`) an element
    fn set_visible(&mut self, element_id: &str, visible: bool) -> Result<()>;

    /// Adds or removes a class on an element
    fn set_class(&mut self, element_id: &str, class: &str, enabled: bool) -> Result<()>;

    fn set_text(&mut self, element_id: &str, text: &str) -> Result<()>;
}

/// Recorded state of one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    pub visible: Option<bool>,
    pub classes: BTreeSet<String>,
    pub text: String,
}

/// In-memory DOM holding a fixed set of elements.
///
/// Touching an id that was never declared fails like a missing element on a
/// real page would.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDom {
    elements: BTreeMap<String, ElementState>,
}

impl HeadlessDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut dom = Self::new();
        for id in ids {
            dom.declare(id);
        }
        dom
    }

    pub fn declare(&mut self, id: &str) -> &mut ElementState {
        self.elements.entry(id.to_string()).or_default()
    }

    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.element(id).and_then(|e| e.visible)
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.classes.contains(class))
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(|e| e.text.as_str())
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut ElementState> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| MapError::Dom(format!("no element with id '{}'", id)))
    }
}

impl DomSurface for HeadlessDom {
    fn set_visible(&mut self, element_id: &str, visible: bool) -> Result<()> {
        self.element_mut(element_id)?.visible = Some(visible);
        Ok(())
    }

    fn set_class(&mut self, element_id: &str, class: &str, enabled: bool) -> Result<()> {
        let element = self.element_mut(element_id)?;
        if enabled {
            element.classes.insert(class.to_string());
        } else {
            element.classes.remove(class);
        }
        Ok(())
    }

    fn set_text(&mut self, element_id: &str, text: &str) -> Result<()> {
        self.element_mut(element_id)?.text = text.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undeclared_element_is_an_error() {
        let mut dom = HeadlessDom::with_elements(["landing"]);
        assert!(dom.set_visible("landing", false).is_ok());
        assert!(matches!(dom.set_visible("mapScreen", true), Err(MapError::Dom(_))));
    }

    #[test]
    fn test_classes_toggle() {
        let mut dom = HeadlessDom::with_elements(["sidebar"]);
        dom.set_class("sidebar", "open", true).unwrap();
        assert!(dom.has_class("sidebar", "open"));
        dom.set_class("sidebar", "open", false).unwrap();
        assert!(!dom.has_class("sidebar", "open"));
    }
}
