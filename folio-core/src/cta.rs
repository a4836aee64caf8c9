//! Call-to-action dispatch for hero cards.

use folio_model::{Cta, CtaAction, SectionId};

/// What the host should do when a CTA button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtaCommand {
    /// Smooth-scroll so the section's top aligns with the viewport top. A
    /// section that is not rendered is silently skipped by the host.
    ScrollTo(SectionId),
    /// Open the url in a new browsing context with no opener and no referrer.
    OpenExternal(String),
}

impl CtaCommand {
    /// Window features for [`CtaCommand::OpenExternal`].
    pub const EXTERNAL_FEATURES: &'static str = "noopener,noreferrer";
    /// Browsing context for [`CtaCommand::OpenExternal`].
    pub const EXTERNAL_TARGET: &'static str = "_blank";
}

pub fn dispatch(cta: &Cta) -> CtaCommand {
    match &cta.action {
        CtaAction::Scroll { target } => CtaCommand::ScrollTo(target.clone()),
        CtaAction::Link { target } => CtaCommand::OpenExternal(target.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_and_link_map_to_their_commands() {
        let scroll = Cta {
            label: "Services".into(),
            action: CtaAction::Scroll {
                target: "services".into(),
            },
        };
        let link = Cta {
            label: "Profile".into(),
            action: CtaAction::Link {
                target: "https://example.com".into(),
            },
        };

        assert_eq!(dispatch(&scroll), CtaCommand::ScrollTo("services".into()));
        assert_eq!(
            dispatch(&link),
            CtaCommand::OpenExternal("https://example.com".into())
        );
    }
}
