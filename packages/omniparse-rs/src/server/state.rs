use omniparse_detect::ElementLocator;

/// Shared by every request; the locator is the only thing handlers need.
#[derive(Clone)]
pub struct AppState {
    pub locator: ElementLocator,
}

impl AppState {
    pub fn new(locator: ElementLocator) -> Self {
        Self { locator }
    }
}
