// SPDX-License-Identifier: MPL-2.0
//! What the view layer should draw for a given overlay snapshot.

use super::{MenuDescriptor, VisibilitySnapshot};
use crate::domain::ui::Opacity;
use crate::error::PlayerError;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    /// The player failed; only the error is shown.
    Error(PlayerError),
    /// Nothing is drawn (native picture-in-picture window).
    Nothing,
    Overlay(OverlayPlan),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPlan {
    pub opacity: Opacity,
    /// Whether controls accept presses.
    pub interactive: bool,
    pub content: OverlayContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayContent {
    Menu(MenuDescriptor),
    Controls(ControlSlots),
}

/// Which control bars are present. The center slot is always drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSlots {
    pub top: bool,
    pub bottom: bool,
    pub cast_message: Option<String>,
}

pub(super) fn plan(snapshot: &VisibilitySnapshot) -> RenderPlan {
    if let Some(error) = &snapshot.error {
        return RenderPlan::Error(error.clone());
    }

    if !snapshot.platform.is_web() && snapshot.pip {
        return RenderPlan::Nothing;
    }

    let content = match snapshot.menus.last() {
        Some(menu) => OverlayContent::Menu(*menu),
        None => OverlayContent::Controls(ControlSlots {
            top: snapshot.first_play,
            bottom: snapshot.first_play,
            cast_message: snapshot.cast_message.clone(),
        }),
    };

    RenderPlan::Overlay(OverlayPlan {
        opacity: snapshot.opacity,
        interactive: snapshot.buttons_enabled,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ui::Platform;

    fn snapshot() -> VisibilitySnapshot {
        VisibilitySnapshot::default()
    }

    #[test]
    fn error_wins_over_everything() {
        let snap = VisibilitySnapshot {
            error: Some(PlayerError::new("network failure")),
            pip: true,
            menus: vec![MenuDescriptor::Settings],
            ..snapshot()
        };
        assert!(matches!(snap.render_plan(), RenderPlan::Error(_)));
    }

    #[test]
    fn native_pip_renders_nothing() {
        let snap = VisibilitySnapshot {
            pip: true,
            platform: Platform::Ios,
            ..snapshot()
        };
        assert_eq!(snap.render_plan(), RenderPlan::Nothing);
    }

    #[test]
    fn web_pip_still_renders_overlay() {
        let snap = VisibilitySnapshot {
            pip: true,
            platform: Platform::Web,
            ..snapshot()
        };
        assert!(matches!(snap.render_plan(), RenderPlan::Overlay(_)));
    }

    #[test]
    fn top_and_bottom_bars_wait_for_first_play() {
        let RenderPlan::Overlay(plan) = snapshot().render_plan() else {
            panic!("expected overlay");
        };
        assert_eq!(
            plan.content,
            OverlayContent::Controls(ControlSlots {
                top: false,
                bottom: false,
                cast_message: None,
            })
        );

        let snap = VisibilitySnapshot {
            first_play: true,
            ..snapshot()
        };
        let RenderPlan::Overlay(plan) = snap.render_plan() else {
            panic!("expected overlay");
        };
        assert!(matches!(
            plan.content,
            OverlayContent::Controls(ControlSlots {
                top: true,
                bottom: true,
                ..
            })
        ));
    }

    #[test]
    fn active_menu_replaces_controls() {
        let snap = VisibilitySnapshot {
            menus: vec![MenuDescriptor::Settings, MenuDescriptor::Language],
            buttons_enabled: false,
            ..snapshot()
        };
        let RenderPlan::Overlay(plan) = snap.render_plan() else {
            panic!("expected overlay");
        };
        assert_eq!(plan.content, OverlayContent::Menu(MenuDescriptor::Language));
        assert!(!plan.interactive);
    }
}
