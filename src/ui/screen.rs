use crate::{
    ui::{dom::DomSurface, ids},
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Map,
}

/// Landing and map screens; exactly one is shown
#[derive(Debug, Default)]
pub struct ScreenController {
    current: Screen,
}

impl ScreenController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn show<D: DomSurface + ?Sized>(&mut self, dom: &mut D, screen: Screen) -> Result<()> {
        let on_map = screen == Screen::Map;
        dom.set_visible(ids::LANDING, !on_map)?;
        dom.set_visible(ids::MAP_SCREEN, on_map)?;
        self.current = screen;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dom::HeadlessDom;

    #[test]
    fn test_switching_to_map_hides_landing() {
        let mut dom = HeadlessDom::with_elements([ids::LANDING, ids::MAP_SCREEN]);
        let mut screens = ScreenController::new();
        assert_eq!(screens.current(), Screen::Landing);

        screens.show(&mut dom, Screen::Map).unwrap();
        assert_eq!(screens.current(), Screen::Map);
        assert_eq!(dom.is_visible(ids::LANDING), Some(false));
        assert_eq!(dom.is_visible(ids::MAP_SCREEN), Some(true));
    }

    #[test]
    fn test_missing_element_keeps_screen() {
        let mut dom = HeadlessDom::with_elements([ids::LANDING]);
        let mut screens = ScreenController::new();
        assert!(screens.show(&mut dom, Screen::Map).is_err());
        assert_eq!(screens.current(), Screen::Landing);
    }
}
