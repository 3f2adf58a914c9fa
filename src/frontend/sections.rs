use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use super::reveals::use_reveal;
use super::{on_anchor, PageProps};
use crate::magnetic::MagneticOffset;
use crate::reveal::{CARD_GRID, FADE_UP, GRID_CASCADE, PROFILE_PHOTO, SCROLL_LINKED, SKILL_BAR};

const REPOSITORY_URL: &str = "https://github.com/mounabarry620-star/Project-Portfolio";

const SKILL_LEVELS: [(&str, u8); 4] = [
    ("C++", 75),
    ("HTML / CSS", 80),
    ("SQL", 65),
    ("Algorithmique", 70),
];

const TECH_STACK: [(&str, &str); 6] = [
    ("C++", "Programmation orientée objet"),
    ("HTML", "Structure sémantique"),
    ("CSS", "Mise en page responsive"),
    ("SQL", "Requêtes relationnelles"),
    ("Bases de données", "Modélisation MCD"),
    ("Algorithmique", "Structures de données"),
];

const SOFT_SKILLS: [&str; 3] = [
    "Adaptation et Persévérance",
    "Travail en Équipe",
    "Communication & Gestion de projet",
];

struct AcademicProject {
    code: &'static str,
    title: &'static str,
    description: &'static str,
    techs: &'static [&'static str],
}

const ACADEMIC_PROJECTS: [AcademicProject; 4] = [
    AcademicProject {
        code: "S1.01",
        title: "Implémentation du Besoin Client",
        description: "Analyse des besoins et modélisation de solutions pour un client. \
                      Création de cahiers des charges et maquettes interactives.",
        techs: &["UML", "Figma", "Agile"],
    },
    AcademicProject {
        code: "S1.02",
        title: "Algorithmique et Programmation",
        description: "Bases de l'algorithmique et développement d'applications simples en C++. \
                      Structures de contrôle et de données.",
        techs: &["C++", "Algorithmie"],
    },
    AcademicProject {
        code: "S1.03",
        title: "Installation d'un Poste de Travail",
        description: "Configuration et déploiement de machines de développement. \
                      Gestion des OS et scripts d'automatisation.",
        techs: &["Linux", "Bash", "Réseau"],
    },
    AcademicProject {
        code: "S1.04",
        title: "Création d'une Base de Données",
        description: "Modélisation relationnelle et création de schémas de base de données. \
                      Écriture de requêtes SQL complexes.",
        techs: &["SQL", "PostgreSQL", "MCD"],
    },
];

const FOOTER_LINKS: [(&str, &str); 4] = [
    ("#about", "Parcours"),
    ("#skills", "Compétences"),
    ("#projects", "Projets"),
    ("#contact", "Contact"),
];

#[function_component(About)]
pub(crate) fn about(_props: &PageProps) -> Html {
    let section_ref = use_node_ref();
    use_reveal(section_ref.clone(), ".parcours__photo-frame", PROFILE_PHOTO);
    use_reveal(section_ref.clone(), ".fade-in-up", FADE_UP);

    html! {
        <section id="about" class="parcours section" ref={section_ref}>
            <h2 class="section__title fade-in-up">{"Parcours & Vision"}</h2>
            <span class="section__subtitle fade-in-up">{"De la mécanique à l'informatique"}</span>
            <div class="parcours__container container">
                <div class="parcours__photo-frame">
                    <img class="parcours__photo" src="assets/profile.jpg" alt="Portrait de Barry Bailo" />
                </div>
                <div class="parcours__data">
                    <p class="parcours__text fade-in-up">
                        {"Après l'obtention de mon baccalauréat scientifique SM avec mention Bien en Guinée (2023), \
                          j'ai été orienté en génie mécanique à l'université Gamal Abdel Nasser de Conakry."}
                    </p>
                    <p class="parcours__text fade-in-up">
                        {"Déterminé à poursuivre ma véritable passion, j'ai complété ma L1 et L2 en mécanique avant \
                          d'intégrer le BUT Informatique à Aix-Marseille Université (site d'Arles) en 2025."}
                    </p>
                    <div class="parcours__goal fade-in-up">
                        <h3 class="parcours__goal-title">{"Objectif"}</h3>
                        <p>
                            {"Devenir ingénieur en IA. Expérience en entreprise, puis création d'une start-up \
                              dédiée aux solutions d'intelligence artificielle."}
                        </p>
                    </div>
                </div>
            </div>
        </section>
    }
}

#[function_component(Skills)]
pub(crate) fn skills(_props: &PageProps) -> Html {
    let section_ref = use_node_ref();
    use_reveal(section_ref.clone(), ".skill__progress", SKILL_BAR);
    use_reveal(section_ref.clone(), ".tech-skill-card", CARD_GRID);

    html! {
        <section id="skills" class="skills section" ref={section_ref}>
            <h2 class="section__title">{"Compétences"}</h2>
            <span class="section__subtitle">{"Tech & soft skills"}</span>
            <div class="skills__container container">
                <div class="skills__bars">
                    { for SKILL_LEVELS.iter().map(|(name, level)| html! {
                        <div class="skill">
                            <div class="skill__header">
                                <span class="skill__name">{*name}</span>
                                <span class="skill__level">{format!("{level}%")}</span>
                            </div>
                            <div class="skill__bar">
                                <span class="skill__progress" style={format!("width: {level}%")}></span>
                            </div>
                        </div>
                    }) }
                </div>
                <div class="skills__grid">
                    { for TECH_STACK.iter().map(|(name, detail)| html! {
                        <div class="tech-skill-card">
                            <h3 class="tech-skill-card__name">{*name}</h3>
                            <p class="tech-skill-card__detail">{*detail}</p>
                        </div>
                    }) }
                </div>
                <ul class="skills__soft">
                    { for SOFT_SKILLS.iter().map(|skill| html! { <li>{*skill}</li> }) }
                </ul>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct MagneticButtonProps {
    href: AttrValue,
    children: Html,
}

/// Link that leans toward the pointer while hovered.
#[function_component(MagneticButton)]
fn magnetic_button(props: &MagneticButtonProps) -> Html {
    let node = use_node_ref();
    let offset = use_state_eq(|| MagneticOffset::REST);

    let onmousemove = {
        let node = node.clone();
        let offset = offset.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(button) = node.cast::<HtmlElement>() else {
                return;
            };
            let rect = button.get_bounding_client_rect();
            offset.set(MagneticOffset::follow(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
            ));
        })
    };

    let onmouseleave = {
        let offset = offset.clone();
        Callback::from(move |_: MouseEvent| offset.set(MagneticOffset::REST))
    };

    html! {
        <a
            ref={node}
            class="button magnetic-btn"
            href={props.href.clone()}
            target="_blank"
            rel="noopener noreferrer"
            style={offset.to_css()}
            {onmousemove}
            {onmouseleave}
        >
            { props.children.clone() }
        </a>
    }
}

#[function_component(Projects)]
pub(crate) fn projects(_props: &PageProps) -> Html {
    let section_ref = use_node_ref();
    use_reveal(section_ref.clone(), ".featured-project", SCROLL_LINKED);
    use_reveal(section_ref.clone(), ".grid-card", GRID_CASCADE);

    html! {
        <section id="projects" class="projects section" ref={section_ref}>
            <h2 class="section__title">{"Projets"}</h2>
            <span class="section__subtitle">{"Développement & création"}</span>
            <div class="projects__container container">
                <article class="featured-project">
                    <div class="featured-project__meta">
                        <span class="featured-project__year">{"2026"}</span>
                        <span class="featured-project__award">{"1er Prix Hackathon DevArt 2026"}</span>
                    </div>
                    <h3 class="featured-project__title">{"HYPOXIA"}</h3>
                    <p class="featured-project__description">
                        {"Jeu de survie sous-marine développé en équipe pendant le hackathon DevArt. \
                          Gestion de l'oxygène, génération de niveaux et rendu temps réel."}
                    </p>
                    <ul class="featured-project__badges">
                        { for ["C++", "Raylib", "Game Design", "Data Structs"].iter().map(|badge| html! {
                            <li class="badge">{*badge}</li>
                        }) }
                    </ul>
                    <MagneticButton href={REPOSITORY_URL}>{"Voir le code"}</MagneticButton>
                </article>

                <h3 class="projects__heading">{"Projets académiques"}</h3>
                <div class="projects__grid">
                    { for ACADEMIC_PROJECTS.iter().map(|project| html! {
                        <article class="grid-card" key={project.code}>
                            <span class="grid-card__code">{project.code}</span>
                            <h4 class="grid-card__title">{project.title}</h4>
                            <p class="grid-card__description">{project.description}</p>
                            <ul class="grid-card__techs">
                                { for project.techs.iter().map(|tech| html! { <li>{*tech}</li> }) }
                            </ul>
                        </article>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(Footer)]
pub(crate) fn footer(props: &PageProps) -> Html {
    let handles = &props.handles;

    html! {
        <footer class="footer">
            <div class="footer__container container">
                <span class="footer__name">{"Barry Bailo"}</span>
                <ul class="footer__links">
                    { for FOOTER_LINKS.iter().map(|(href, label)| html! {
                        <li>
                            <a href={*href} class="footer__link" onclick={on_anchor(handles, href)}>{*label}</a>
                        </li>
                    }) }
                </ul>
                <span class="footer__copy">{"© 2026 Barry Bailo. BUT Informatique, Aix-Marseille Université."}</span>
            </div>
        </footer>
    }
}
