//! Hero carousel cards as stored in `home.json`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ModelError, Result};
use crate::ids::{CardId, SectionId};

/// Background image reference for a hero card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundImage {
    /// Asset file name, resolved against the image directory by the renderer.
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// What a call-to-action button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum CtaAction {
    /// Smooth-scroll to an in-page section.
    Scroll { target: SectionId },
    /// Open an external link in a new browsing context.
    Link { target: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cta {
    pub label: String,
    #[serde(flatten)]
    pub action: CtaAction,
}

/// A single hero carousel slide. Read-only for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroCard {
    pub id: CardId,
    #[serde(default)]
    pub audience: String,
    pub title: String,
    #[serde(default)]
    pub text: Vec<String>,
    pub cta: Cta,
    #[serde(default)]
    pub background: Vec<BackgroundImage>,
}

impl HeroCard {
    /// The image shown behind the card. The data files carry exactly one, but
    /// a missing entry is tolerated and rendered as an empty source.
    pub fn primary_background(&self) -> Option<&BackgroundImage> {
        self.background.first()
    }

    /// Number of independently animated text elements: audience line, title,
    /// body text block and the CTA button.
    pub const TEXT_ELEMENTS: usize = 4;
}

/// Contents of the hero section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeContent {
    #[serde(default)]
    pub cards: Vec<HeroCard>,
}

impl HomeContent {
    pub fn from_json(raw: &str) -> Result<Self> {
        let content: Self = serde_json::from_str(raw)?;
        content.validate()?;
        Ok(content)
    }

    /// Check the invariants the carousel relies on: every card has an id and
    /// every external link parses as an absolute url.
    pub fn validate(&self) -> Result<()> {
        for (position, card) in self.cards.iter().enumerate() {
            if card.id.as_str().trim().is_empty() {
                return Err(ModelError::EmptyCardId { position });
            }
            if let CtaAction::Link { target } = &card.cta.action {
                Url::parse(target).map_err(|source| {
                    ModelError::InvalidLink {
                        card: card.id.to_string(),
                        target: target.clone(),
                        source,
                    }
                })?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r#"{
        "cards": [
            {
                "id": "founders",
                "audience": "For founders",
                "title": "Strategy that ships",
                "text": ["Line one", "Line two"],
                "cta": { "label": "Services", "action": "scroll", "target": "services" },
                "background": [{ "src": "hero-1.webp", "alt": "Skyline" }]
            },
            {
                "id": "investors",
                "title": "Due diligence",
                "cta": { "label": "LinkedIn", "action": "link", "target": "https://www.linkedin.com/in/example" }
            }
        ]
    }"#;

    #[test]
    fn decodes_cards_with_tagged_cta() {
        let home = HomeContent::from_json(HOME).expect("valid content");
        assert_eq!(home.len(), 2);

        let first = &home.cards[0];
        assert_eq!(first.id.as_str(), "founders");
        assert_eq!(
            first.cta.action,
            CtaAction::Scroll {
                target: SectionId::from("services")
            }
        );
        assert_eq!(
            first.primary_background().map(|b| b.src.as_str()),
            Some("hero-1.webp")
        );

        let second = &home.cards[1];
        assert!(second.audience.is_empty());
        assert!(second.text.is_empty());
        assert!(second.primary_background().is_none());
        assert!(matches!(second.cta.action, CtaAction::Link { .. }));
    }

    #[test]
    fn rejects_relative_external_links() {
        let raw = r#"{ "cards": [ {
            "id": "bad",
            "title": "Broken",
            "cta": { "label": "Go", "action": "link", "target": "/not-absolute" }
        } ] }"#;

        let err = HomeContent::from_json(raw).expect_err("relative link");
        assert!(matches!(err, ModelError::InvalidLink { ref card, .. } if card == "bad"));
    }

    #[test]
    fn rejects_blank_card_ids() {
        let raw = r#"{ "cards": [ {
            "id": "  ",
            "title": "Nameless",
            "cta": { "label": "Go", "action": "scroll", "target": "home" }
        } ] }"#;

        let err = HomeContent::from_json(raw).expect_err("blank id");
        assert!(matches!(err, ModelError::EmptyCardId { position: 0 }));
    }

    #[test]
    fn unknown_cta_action_is_a_decode_error() {
        let raw = r#"{ "cards": [ {
            "id": "x",
            "title": "X",
            "cta": { "label": "Go", "action": "teleport", "target": "home" }
        } ] }"#;

        assert!(matches!(
            HomeContent::from_json(raw),
            Err(ModelError::Decode(_))
        ));
    }

    #[test]
    fn missing_cards_key_means_empty_carousel() {
        let home = HomeContent::from_json("{}").expect("empty content");
        assert!(home.is_empty());
    }
}
