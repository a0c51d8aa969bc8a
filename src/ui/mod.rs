pub mod dom;
pub mod glossary;
pub mod navigation;
pub mod screen;
pub mod widget;

pub use dom::{DomSurface, HeadlessDom};
pub use glossary::GlossarySidebar;
pub use navigation::PanelMenu;
pub use screen::{Screen, ScreenController};
pub use widget::BuildingWidgets;

/// Element ids and classes the page provides
pub mod ids {
    pub const LANDING: &str = "landing";
    pub const MAP_SCREEN: &str = "mapScreen";
    pub const ENTER_BUTTON: &str = "dev";
    pub const SIDEBAR: &str = "sidebar";
    pub const GLOSSARY_TOGGLE: &str = "glossaryToggle";
    pub const GLOSSARY_MENU: &str = "glossaryMenu";
    pub const MAP_STATUS: &str = "mapStatus";
    pub const MENU_PANEL: &str = "menuPanel";

    pub const PANEL_CLASS: &str = "panel";
    pub const SECTION_BUTTON_CLASS: &str = "section-btn";
    pub const BACK_BUTTON_CLASS: &str = "back-btn";
    pub const BUILDING_BUTTON_CLASS: &str = "building-btn";

    /// Every id the chrome writes to
    pub const ALL: [&str; 7] = [
        LANDING,
        MAP_SCREEN,
        SIDEBAR,
        GLOSSARY_TOGGLE,
        GLOSSARY_MENU,
        MAP_STATUS,
        MENU_PANEL,
    ];
}
