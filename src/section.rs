use std::fmt;

/// A selectable region of the room scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Works,
    Skills,
    Vision,
}

impl Section {
    pub const ALL: [Section; 4] = [Self::About, Self::Works, Self::Skills, Self::Vision];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Works => "works",
            Self::Skills => "skills",
            Self::Vision => "vision",
        }
    }

    /// Text floating above the object in the room.
    pub fn label(self) -> &'static str {
        match self {
            Self::About => "ABOUT ME",
            Self::Works => "PROJECTS",
            Self::Skills => "SKILLS",
            Self::Vision => "PHILOSOPHY",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
