use crate::{ui::dom::DomSurface, MapError, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// [`DomSurface`] over the live page
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| MapError::Dom("no document available".into()))?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| MapError::Dom(format!("no element with id '{}'", id)))
    }

    /// Every element matching `selector`, in document order
    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| MapError::Dom(format!("bad selector '{}': {:?}", selector, e)))?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }
}

impl DomSurface for WebDom {
    fn set_visible(&mut self, element_id: &str, visible: bool) -> Result<()> {
        let element = self
            .element(element_id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| MapError::Dom(format!("'{}' is not an HTML element", element_id)))?;
        let display = if visible { "block" } else { "none" };
        element
            .style()
            .set_property("display", display)
            .map_err(|e| MapError::Dom(format!("{:?}", e)))
    }

    fn set_class(&mut self, element_id: &str, class: &str, enabled: bool) -> Result<()> {
        self.element(element_id)?
            .class_list()
            .toggle_with_force(class, enabled)
            .map(|_| ())
            .map_err(|e| MapError::Dom(format!("{:?}", e)))
    }

    fn set_text(&mut self, element_id: &str, text: &str) -> Result<()> {
        self.element(element_id)?.set_text_content(Some(text));
        Ok(())
    }
}
