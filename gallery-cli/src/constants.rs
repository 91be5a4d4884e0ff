// ABOUTME: Centralized constants for the gallery CLI application
// ABOUTME: Contains output limits, progress timings, markup class names and icon mappings

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Timeout configurations for various operations
pub mod timeouts {
    /// Progress spinner tick interval for smooth animation
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}

/// UI and formatting constants
pub mod ui {
    /// Longest link shown in table output before truncation
    pub const MAX_LINK_WIDTH: usize = 72;

    /// Label used for images stored at the root folder
    pub const UNCATEGORIZED: &str = "uncategorized";
}

/// Class names and fixed text used by the HTML components
pub mod markup {
    pub const FOOTER_CLASS: &str = "footer-container";
    pub const FOOTER_TEXT: &str = "Copyright © 2023";
    pub const NAVBAR_ITEM_CLASS: &str = "navbar-item";
    pub const NAVBAR_ITEM_MODAL_CLASS: &str = "navbar-item-modal";
    pub const DEFAULT_ICON: &str = "image";
}

/// Font Awesome icon names for well-known categories
pub static CATEGORY_ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("landscape", "mountain-sun");
    m.insert("landscapes", "mountain-sun");
    m.insert("portraits", "user");
    m.insert("portrait", "user");
    m.insert("animals", "paw");
    m.insert("nature", "leaf");
    m.insert("travel", "plane");
    m.insert("food", "utensils");
    m.insert("city", "city");
    m.insert("architecture", "building");
    m
});

/// Icon for a category, falling back to a generic image icon
pub fn icon_for_category(category: &str) -> &'static str {
    CATEGORY_ICONS
        .get(category.to_lowercase().as_str())
        .copied()
        .unwrap_or(markup::DEFAULT_ICON)
}
