//! Static copy for the overlay panel and the pure mapping from interaction
//! state to what the panel shows.

use crate::interaction::InteractionState;
use crate::section::Section;

pub const IDLE_HEADLINE: &str = "De la Mécanique à l'Informatique";
pub const IDLE_PROMPT: &str = "Cliquez sur les éléments 3D";
pub const PREVIEW_PROMPT: &str = "Cliquez pour ouvrir";
pub const DISMISS_LABEL: &str = "Fermer l'exploration";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectRow {
    pub tag: &'static str,
    pub title: &'static str,
    pub tech: &'static str,
    /// Featured rows are drawn larger, with the tech as a badge.
    pub featured: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentItem {
    Paragraph(&'static str),
    Quote(&'static str),
    Heading(&'static str),
    Tags(&'static [&'static str]),
    Bullets(&'static [&'static str]),
    Projects(&'static [ProjectRow]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentBlock {
    pub section: Section,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub body: &'static [ContentItem],
}

static CONTENT: [ContentBlock; 4] = [
    ContentBlock {
        section: Section::About,
        title: "PARCOURS & VISION",
        subtitle: "DE LA MÉCANIQUE À L'INFORMATIQUE",
        body: &[
            ContentItem::Paragraph(
                "Après l'obtention de mon baccalauréat scientifique SM avec mention Bien en Guinée (2023), \
                 j'ai été orienté en génie mécanique à l'université Gamal Abdel Nasser de Conakry.",
            ),
            ContentItem::Paragraph(
                "Déterminé à poursuivre ma véritable passion, j'ai complété ma L1 et L2 en mécanique avant \
                 d'intégrer le BUT Informatique à Aix-Marseille Université (site d'Arles) en 2025.",
            ),
            ContentItem::Heading("Objectif"),
            ContentItem::Paragraph(
                "Devenir ingénieur en IA. Expérience en entreprise, puis création d'une start-up dédiée \
                 aux solutions d'intelligence artificielle.",
            ),
        ],
    },
    ContentBlock {
        section: Section::Works,
        title: "PROJETS RÉCENTS",
        subtitle: "DÉVELOPPEMENT & CRÉATION",
        body: &[ContentItem::Projects(&[
            ProjectRow {
                tag: "2026",
                title: "HYPOXIA (Hackathon DevArt)",
                tech: "C++ / 1er Prix",
                featured: true,
            },
            ProjectRow {
                tag: "SAE 3",
                title: "Base de Données",
                tech: "SQL",
                featured: false,
            },
            ProjectRow {
                tag: "SAE 2",
                title: "Algorithmique",
                tech: "C++",
                featured: false,
            },
            ProjectRow {
                tag: "SAE 1",
                title: "Site Web",
                tech: "HTML / CSS",
                featured: false,
            },
        ])],
    },
    ContentBlock {
        section: Section::Skills,
        title: "COMPÉTENCES",
        subtitle: "TECH & SOFT SKILLS",
        body: &[
            ContentItem::Heading("Tech Stack"),
            ContentItem::Tags(&["C++", "HTML", "CSS", "SQL", "Bases de données", "Algorithmique"]),
            ContentItem::Heading("Humaines"),
            ContentItem::Bullets(&[
                "Adaptation et Persévérance",
                "Travail en Équipe",
                "Communication & Gestion de projet",
            ]),
        ],
    },
    ContentBlock {
        section: Section::Vision,
        title: "PHILOSOPHIE",
        subtitle: "(HUMAN) THINKER",
        body: &[
            ContentItem::Quote(
                "\"Architecturer des systèmes complexes, du Génie Mécanique à l'Intelligence Artificielle.\"",
            ),
            ContentItem::Paragraph(
                "L'élégance naît de la simplicité. Mon but est de mêler la rigueur scientifique héritée \
                 de la mécanique à l'infinité créative du code pour forger l'avenir.",
            ),
        ],
    },
];

pub fn content_for(section: Section) -> Option<&'static ContentBlock> {
    CONTENT.iter().find(|block| block.section == section)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelView {
    Idle { headline: String, prompt: &'static str },
    Detail(&'static ContentBlock),
    /// An active section with no copy; the panel renders nothing.
    Empty,
}

pub fn panel_view(state: &InteractionState) -> PanelView {
    panel_view_with(state, content_for)
}

fn panel_view_with(
    state: &InteractionState,
    lookup: impl Fn(Section) -> Option<&'static ContentBlock>,
) -> PanelView {
    match state.active {
        Some(active) => lookup(active).map_or(PanelView::Empty, PanelView::Detail),
        None => match state.hovered {
            Some(hovered) => PanelView::Idle {
                headline: format!("Explorer : {hovered}"),
                prompt: PREVIEW_PROMPT,
            },
            None => PanelView::Idle {
                headline: IDLE_HEADLINE.to_string(),
                prompt: IDLE_PROMPT,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionStore;

    #[test]
    fn every_section_has_copy() {
        for section in Section::ALL {
            let block = content_for(section).expect("content block");
            assert_eq!(block.section, section);
            assert!(!block.body.is_empty());
        }
    }

    #[test]
    fn idle_without_hover_shows_call_to_action() {
        assert_eq!(
            panel_view(&InteractionState::default()),
            PanelView::Idle {
                headline: IDLE_HEADLINE.to_string(),
                prompt: IDLE_PROMPT,
            }
        );
    }

    #[test]
    fn idle_with_hover_previews_the_hovered_section() {
        let view = panel_view(&InteractionState {
            hovered: Some(Section::Skills),
            active: None,
        });
        assert_eq!(
            view,
            PanelView::Idle {
                headline: "Explorer : skills".to_string(),
                prompt: PREVIEW_PROMPT,
            }
        );
    }

    #[test]
    fn detail_view_depends_only_on_current_state() {
        let store = InteractionStore::new();
        store.pointer_enter(Section::About);
        store.click(Section::About);
        store.click(Section::Vision);
        store.pointer_leave(Section::About);
        store.click(Section::Works);

        let from_history = panel_view(&store.state());
        let fresh = panel_view(&InteractionState {
            hovered: None,
            active: Some(Section::Works),
        });

        assert_eq!(from_history, fresh);
        match fresh {
            PanelView::Detail(block) => assert_eq!(block.title, "PROJETS RÉCENTS"),
            other => panic!("expected detail view, got {other:?}"),
        }
    }

    #[test]
    fn missing_copy_renders_nothing() {
        let view = panel_view_with(
            &InteractionState {
                hovered: None,
                active: Some(Section::Vision),
            },
            |_| None,
        );
        assert_eq!(view, PanelView::Empty);
    }
}
