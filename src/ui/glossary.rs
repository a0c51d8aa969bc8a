use crate::{
    ui::{dom::DomSurface, ids},
    Result,
};

/// Toggle glyph while the sidebar is collapsed
pub const CLOSED_GLYPH: &str = "▶";
/// Toggle glyph while the sidebar is expanded
pub const OPEN_GLYPH: &str = "◀";

#[derive(Debug, Default)]
pub struct GlossarySidebar {
    open: bool,
}

impl GlossarySidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn glyph(&self) -> &'static str {
        if self.open {
            OPEN_GLYPH
        } else {
            CLOSED_GLYPH
        }
    }

    /// Writes the current state to the page
    pub fn render<D: DomSurface + ?Sized>(&self, dom: &mut D) -> Result<()> {
        dom.set_class(ids::SIDEBAR, "open", self.open)?;
        dom.set_visible(ids::GLOSSARY_MENU, self.open)?;
        dom.set_text(ids::GLOSSARY_TOGGLE, self.glyph())
    }

    /// Flips the sidebar and returns the new open state
    pub fn toggle<D: DomSurface + ?Sized>(&mut self, dom: &mut D) -> Result<bool> {
        self.open = !self.open;
        if let Err(err) = self.render(dom) {
            self.open = !self.open;
            return Err(err);
        }
        Ok(self.open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dom::HeadlessDom;

    fn dom() -> HeadlessDom {
        HeadlessDom::with_elements([ids::SIDEBAR, ids::GLOSSARY_TOGGLE, ids::GLOSSARY_MENU])
    }

    #[test]
    fn test_toggle_flips_state_and_glyph() {
        let mut dom = dom();
        let mut sidebar = GlossarySidebar::new();
        sidebar.render(&mut dom).unwrap();
        assert_eq!(dom.text(ids::GLOSSARY_TOGGLE), Some("▶"));

        assert!(sidebar.toggle(&mut dom).unwrap());
        assert!(dom.has_class(ids::SIDEBAR, "open"));
        assert_eq!(dom.is_visible(ids::GLOSSARY_MENU), Some(true));
        assert_eq!(dom.text(ids::GLOSSARY_TOGGLE), Some("◀"));

        assert!(!sidebar.toggle(&mut dom).unwrap());
        assert!(!dom.has_class(ids::SIDEBAR, "open"));
        assert_eq!(dom.text(ids::GLOSSARY_TOGGLE), Some("▶"));
    }

    #[test]
    fn test_failed_render_rolls_back() {
        let mut dom = HeadlessDom::with_elements([ids::SIDEBAR]);
        let mut sidebar = GlossarySidebar::new();
        assert!(sidebar.toggle(&mut dom).is_err());
        assert!(!sidebar.is_open());
    }
}
