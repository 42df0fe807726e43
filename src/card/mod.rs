//! Card layout
//!
//! Maps an activity plus the active language's strings onto the fixed card
//! template. [`svg::render_svg`] turns the layout into the document that the
//! export pipeline rasterizes.

pub mod svg;

pub use svg::render_svg;

use crate::i18n::UiStrings;
use crate::models::Activity;

/// Header stripe: icon, title, theme, id watermark and badges
#[derive(Debug, Clone, PartialEq)]
pub struct CardHeader {
    pub icon: String,
    pub title: String,
    pub theme: String,
    pub watermark: String,
    pub level_badge: String,
    pub age_badge: String,
}

/// Left body column
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryColumn {
    pub concept_label: String,
    pub concept: String,
    pub description_label: String,
    pub description: String,
    pub rhetoric_label: String,
    pub rhetoric: String,
}

/// Right body column
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryColumn {
    pub focus_label: String,
    pub focus_points: Vec<String>,
    pub examples_label: String,
    pub examples: Vec<String>,
    pub materials_label: String,
    pub materials: String,
    pub duration_label: String,
    pub duration: String,
}

/// Credit strip
#[derive(Debug, Clone, PartialEq)]
pub struct CardFooter {
    pub credit: String,
    pub author: String,
}

/// Everything drawn on one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub id: u32,
    pub header: CardHeader,
    pub primary: PrimaryColumn,
    pub secondary: SecondaryColumn,
    pub footer: CardFooter,
}

impl CardLayout {
    pub fn build(act: &Activity, ui: &UiStrings) -> Self {
        Self {
            id: act.id,
            header: CardHeader {
                icon: act.icon.clone(),
                title: act.title.clone(),
                theme: act.theme.clone(),
                watermark: format!("#{}", act.id),
                level_badge: act.level.clone(),
                age_badge: ui.age_badge(&act.age),
            },
            primary: PrimaryColumn {
                concept_label: ui.card_concept.clone(),
                concept: act.concept.clone(),
                description_label: ui.card_desc_title.clone(),
                description: act.description.clone(),
                rhetoric_label: ui.card_rhetoric_title.clone(),
                rhetoric: format!("\"{}\"", act.rhetoric),
            },
            secondary: SecondaryColumn {
                focus_label: ui.card_focus_title.clone(),
                focus_points: act.focus_points.clone(),
                examples_label: ui.card_examples_title.clone(),
                examples: act.examples.clone(),
                materials_label: ui.card_materials.clone(),
                materials: act.materials.clone(),
                duration_label: ui.card_duration.clone(),
                duration: act.duration.clone(),
            },
            footer: CardFooter {
                credit: ui.card_footer_credit.clone(),
                author: ui.card_footer_author.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Translations;
    use crate::models::Language;
    use crate::models::activity::sample;

    #[test]
    fn test_build_maps_activity_and_strings() {
        let tr = Translations::builtin().unwrap();
        let act = sample(12, "Brave Voice", "Confidence", "8-10", "Beginner");
        let card = CardLayout::build(&act, tr.get(Language::En));

        assert_eq!(card.id, 12);
        assert_eq!(card.header.watermark, "#12");
        assert_eq!(card.header.age_badge, "8-10 yrs");
        assert_eq!(card.header.level_badge, "Beginner");
        assert_eq!(card.primary.concept_label, "Key concept");
        assert_eq!(card.primary.rhetoric, "\"Quote\"");
        assert_eq!(card.secondary.focus_points, act.focus_points);
        assert_eq!(card.footer.credit, "Rhetoric in the Classroom");
    }

    #[test]
    fn test_build_uses_language_strings() {
        let tr = Translations::builtin().unwrap();
        let act = sample(1, "Voz", "Tema", "8-10", "Principiante");
        let card = CardLayout::build(&act, tr.get(Language::Es));
        assert_eq!(card.header.age_badge, "8-10 años");
        assert_eq!(card.secondary.examples_label, "Ejemplos");
    }
}
