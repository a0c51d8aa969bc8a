use crate::{
    ui::{dom::DomSurface, ids},
    MapError, Result,
};

/// Panel menu: a menu panel plus section panels, one shown at a time
#[derive(Debug, Clone)]
pub struct PanelMenu {
    menu: String,
    sections: Vec<String>,
    active: String,
}

impl PanelMenu {
    pub fn new(menu: impl Into<String>, sections: impl IntoIterator<Item = String>) -> Self {
        let menu = menu.into();
        Self {
            active: menu.clone(),
            menu,
            sections: sections.into_iter().collect(),
        }
    }

    /// Menu panel `menuPanel` with the given section panel ids
    pub fn with_sections<'a>(sections: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(ids::MENU_PANEL, sections.into_iter().map(str::to_string))
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn is_at_menu(&self) -> bool {
        self.active == self.menu
    }

    fn panels(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.menu).chain(self.sections.iter())
    }

    /// Shows `panel` (a section or the menu) and hides the rest
    pub fn show<D: DomSurface + ?Sized>(&mut self, dom: &mut D, panel: &str) -> Result<()> {
        if !self.panels().any(|p| p == panel) {
            log::warn!("no panel named '{}'", panel);
            return Err(MapError::UnknownPanel(panel.to_string()));
        }
        for candidate in self.panels() {
            dom.set_visible(candidate, candidate == panel)?;
        }
        self.active = panel.to_string();
        Ok(())
    }

    /// Back button: returns to the menu panel
    pub fn back<D: DomSurface + ?Sized>(&mut self, dom: &mut D) -> Result<()> {
        let menu = self.menu.clone();
        self.show(dom, &menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dom::HeadlessDom;

    fn setup() -> (HeadlessDom, PanelMenu) {
        let dom = HeadlessDom::with_elements([ids::MENU_PANEL, "buildingsPanel", "aboutPanel"]);
        let menu = PanelMenu::with_sections(["buildingsPanel", "aboutPanel"]);
        (dom, menu)
    }

    #[test]
    fn test_section_shows_one_panel() {
        let (mut dom, mut menu) = setup();
        menu.show(&mut dom, "buildingsPanel").unwrap();

        assert_eq!(menu.active(), "buildingsPanel");
        assert_eq!(dom.is_visible("buildingsPanel"), Some(true));
        assert_eq!(dom.is_visible("aboutPanel"), Some(false));
        assert_eq!(dom.is_visible(ids::MENU_PANEL), Some(false));
    }

    #[test]
    fn test_back_returns_to_menu() {
        let (mut dom, mut menu) = setup();
        menu.show(&mut dom, "aboutPanel").unwrap();
        menu.back(&mut dom).unwrap();

        assert!(menu.is_at_menu());
        assert_eq!(dom.is_visible(ids::MENU_PANEL), Some(true));
        assert_eq!(dom.is_visible("aboutPanel"), Some(false));
    }

    #[test]
    fn test_unknown_panel_leaves_state() {
        let (mut dom, mut menu) = setup();
        menu.show(&mut dom, "aboutPanel").unwrap();
        assert!(matches!(
            menu.show(&mut dom, "eventsPanel"),
            Err(MapError::UnknownPanel(_))
        ));
        assert_eq!(menu.active(), "aboutPanel");
        assert_eq!(dom.is_visible("aboutPanel"), Some(true));
    }
}
