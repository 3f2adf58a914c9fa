//! Scroll-position bookkeeping for the long-form page: which nav link is
//! lit, whether the header is in its scrolled style, and the hero parallax.

pub const PARALLAX_SPEED: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollSnapshot {
    /// Id of the section whose nav link is highlighted.
    pub active: Option<String>,
    pub header_scrolled: bool,
}

impl ScrollSnapshot {
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTracker {
    pub nav_offset: f64,
    pub header_threshold: f64,
}

impl ScrollTracker {
    pub fn new(nav_offset: f64, header_threshold: f64) -> Self {
        Self {
            nav_offset,
            header_threshold,
        }
    }

    /// A section is live over `[top - offset, top - offset + height)`. When
    /// ranges overlap, the last match in document order wins. At the very
    /// top of the page nothing is highlighted.
    pub fn evaluate(&self, scroll_y: f64, sections: &[SectionBounds]) -> ScrollSnapshot {
        let active = if scroll_y <= 0.0 {
            None
        } else {
            sections
                .iter()
                .filter(|section| {
                    let start = section.top - self.nav_offset;
                    scroll_y >= start && scroll_y < start + section.height
                })
                .last()
                .map(|section| section.id.clone())
        };

        ScrollSnapshot {
            active,
            header_scrolled: scroll_y >= self.header_threshold,
        }
    }
}

/// Hero background offset. Past the first screen the hero is out of view and
/// keeps whatever offset it last had.
pub fn hero_parallax(scroll_y: f64, viewport_height: f64, previous: f64) -> f64 {
    if scroll_y < viewport_height {
        scroll_y.max(0.0) * PARALLAX_SPEED
    } else {
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("about", 0.0, 500.0),
            SectionBounds::new("projects", 500.0, 700.0),
        ]
    }

    #[test]
    fn mid_second_section_highlights_only_the_second() {
        let tracker = ScrollTracker::new(100.0, 50.0);
        let snapshot = tracker.evaluate(550.0, &two_sections());

        assert!(snapshot.is_active("projects"));
        assert!(!snapshot.is_active("about"));
        assert!(snapshot.header_scrolled);
    }

    #[test]
    fn top_of_page_highlights_nothing() {
        let tracker = ScrollTracker::new(100.0, 50.0);
        let snapshot = tracker.evaluate(0.0, &two_sections());

        assert_eq!(snapshot.active, None);
        assert!(!snapshot.header_scrolled);
    }

    #[test]
    fn section_lights_up_offset_pixels_before_its_top() {
        let tracker = ScrollTracker::new(100.0, 50.0);
        assert!(tracker.evaluate(399.0, &two_sections()).is_active("about"));
        assert!(tracker.evaluate(400.0, &two_sections()).is_active("projects"));
    }

    #[test]
    fn overlapping_ranges_pick_the_last_in_document_order() {
        let tracker = ScrollTracker::new(0.0, 50.0);
        let sections = vec![
            SectionBounds::new("a", 0.0, 1_000.0),
            SectionBounds::new("b", 200.0, 300.0),
            SectionBounds::new("c", 900.0, 300.0),
        ];

        assert!(tracker.evaluate(250.0, &sections).is_active("b"));
        assert!(tracker.evaluate(950.0, &sections).is_active("c"));
        assert!(tracker.evaluate(600.0, &sections).is_active("a"));
    }

    #[test]
    fn past_the_last_section_nothing_is_highlighted() {
        let tracker = ScrollTracker::new(100.0, 50.0);
        assert_eq!(tracker.evaluate(5_000.0, &two_sections()).active, None);
    }

    #[test]
    fn header_threshold_is_inclusive() {
        let tracker = ScrollTracker::new(100.0, 50.0);
        assert!(!tracker.evaluate(49.0, &[]).header_scrolled);
        assert!(tracker.evaluate(50.0, &[]).header_scrolled);
    }

    #[test]
    fn parallax_tracks_half_speed_within_the_first_screen() {
        assert_eq!(hero_parallax(200.0, 800.0, 0.0), 100.0);
        assert_eq!(hero_parallax(900.0, 800.0, 390.0), 390.0);
    }
}
