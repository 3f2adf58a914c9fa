//! Header navigation: the mobile menu and smooth anchor targets.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(self) -> Self {
        Self { open: !self.open }
    }

    /// Close button and nav links both land here.
    pub fn close(self) -> Self {
        Self { open: false }
    }

    pub fn menu_class(self) -> &'static str {
        if self.open {
            "nav__menu show-menu"
        } else {
            "nav__menu"
        }
    }
}

/// Strips the leading `#` of an in-page href. Bare `#` and external links
/// have no target.
pub fn anchor_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// Scroll offset that puts a section's top just under the fixed header.
pub fn scroll_target(section_top: f64, header_height: f64) -> f64 {
    (section_top - header_height).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_and_any_close_closes() {
        let menu = MenuState::default();
        assert!(!menu.is_open());
        let menu = menu.toggle();
        assert!(menu.is_open());
        assert_eq!(menu.menu_class(), "nav__menu show-menu");
        assert!(!menu.close().is_open());
        assert!(!menu.toggle().is_open());
        assert!(menu.close().toggle().is_open());
    }

    #[test]
    fn anchors_need_a_fragment_id() {
        assert_eq!(anchor_id("#projects"), Some("projects"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("https://example.com/#about"), None);
    }

    #[test]
    fn target_sits_under_the_header() {
        assert_eq!(scroll_target(1_200.0, 80.0), 1_120.0);
        assert_eq!(scroll_target(30.0, 80.0), 0.0);
    }
}
