/// Process-wide UI flag controlling sidebar visibility.
///
/// The persistent side panel and the mobile overlay both read this one flag,
/// so they can never disagree about whether navigation is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiToggle {
    sidebar_visible: bool,
}

impl Default for UiToggle {
    fn default() -> Self {
        Self {
            sidebar_visible: true,
        }
    }
}

impl UiToggle {
    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub fn toggle(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
    }
}
