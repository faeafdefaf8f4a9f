// SPDX-License-Identifier: MPL-2.0
//! Iced rendering of the control overlay.
//!
//! Draws a [`RenderPlan`] as a stack: a translucent background that reacts
//! to taps, and on top of it either the active menu or the control bars.
//! `iced` has no per-widget opacity, so the fade level is applied to every
//! color's alpha instead.

use crate::domain::presentation::PresentationMode;
use crate::error::{PlayerError, PlayerErrorCode};
use crate::overlay::{
    ControlSlots, MenuDescriptor, OverlayContent, OverlayPlan, RenderPlan, TouchTarget, UserInput,
};
use crate::ui::design_tokens::{faded, opacity, palette, radius, spacing, typography};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, mouse_area, Column, Container, Row, Stack, Text};
use iced::{Background, Border, Color, Element, Length, Theme};

/// Messages emitted by the overlay view.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Input(UserInput),
    OpenMenu(MenuDescriptor),
    CloseMenu,
    Control(Control),
}

/// Player actions offered by the control bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TogglePlayback,
    ToggleFullscreen,
    EnterPictureInPicture,
    /// An option of the active menu was picked.
    SelectOption(MenuDescriptor, usize),
}

pub struct ViewModel<'a> {
    pub plan: &'a RenderPlan,
    pub paused: bool,
    pub mode: PresentationMode,
    pub title: &'a str,
    /// Playback position, already formatted.
    pub position: String,
}

pub fn view(model: ViewModel<'_>) -> Element<'_, Message> {
    let content: Element<'_, Message> = match model.plan {
        RenderPlan::Error(error) => error_view(error),
        RenderPlan::Nothing => Column::new().into(),
        RenderPlan::Overlay(plan) => overlay_view(plan, &model),
    };

    mouse_area(content)
        .on_move(|_| Message::Input(UserInput::PointerMove))
        .into()
}

/// Options listed by a leaf menu.
#[must_use]
pub fn menu_options(menu: MenuDescriptor) -> &'static [&'static str] {
    match menu {
        MenuDescriptor::Settings => &[],
        MenuDescriptor::Language => &["Default", "English", "Nederlands"],
        MenuDescriptor::Quality => &["Automatic", "1080p", "720p", "480p"],
        MenuDescriptor::PlaybackRate => &["0.5x", "1x", "1.25x", "1.5x", "2x"],
        MenuDescriptor::RenderingTarget => &["Surface view", "Texture view"],
    }
}

/// Heading of the error view.
#[must_use]
pub fn error_heading(code: PlayerErrorCode) -> &'static str {
    match code {
        PlayerErrorCode::Network => "Network error",
        PlayerErrorCode::ContentProtection => "Protected content cannot be played",
        PlayerErrorCode::Media => "This video cannot be decoded",
        PlayerErrorCode::Source => "This source is not available",
        PlayerErrorCode::Other => "Playback failed",
    }
}

fn error_view(error: &PlayerError) -> Element<'_, Message> {
    let content = Column::new()
        .spacing(spacing::XS)
        .align_x(Horizontal::Center)
        .push(
            Text::new(error_heading(error.code))
                .size(typography::TITLE_MD)
                .color(palette::ERROR_500),
        )
        .push(Text::new(error.message.as_str()).size(typography::BODY));

    let panel = Container::new(content)
        .padding(spacing::LG)
        .max_width(400.0)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            })),
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            text_color: Some(palette::WHITE),
            ..Default::default()
        });

    Container::new(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn overlay_view<'a>(plan: &'a OverlayPlan, model: &ViewModel<'a>) -> Element<'a, Message> {
    let alpha = plan.opacity.value();

    let scrim = Container::new(Column::new())
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(faded(
                Color {
                    a: opacity::SCRIM,
                    ..palette::BLACK
                },
                alpha,
            ))),
            ..Default::default()
        });
    let background = mouse_area(scrim)
        .on_press(Message::Input(UserInput::TouchStart(TouchTarget::Background)));

    let content = match &plan.content {
        OverlayContent::Menu(menu) => menu_view(*menu, alpha, plan.interactive),
        OverlayContent::Controls(slots) => controls_view(slots, model, alpha, plan.interactive),
    };

    Stack::new().push(background).push(content).into()
}

fn controls_view<'a>(
    slots: &ControlSlots,
    model: &ViewModel<'a>,
    alpha: f32,
    interactive: bool,
) -> Element<'a, Message> {
    let mut column = Column::new().width(Length::Fill).height(Length::Fill);

    if slots.top {
        let top = Row::new()
            .spacing(spacing::XS)
            .padding(spacing::SM)
            .align_y(Vertical::Center)
            .push(label(model.title, typography::TITLE_MD, alpha))
            .push(Container::new(Column::new()).width(Length::Fill))
            .push(overlay_button(
                "Language",
                Message::OpenMenu(MenuDescriptor::Language),
                alpha,
                interactive,
            ))
            .push(overlay_button(
                "Settings",
                Message::OpenMenu(MenuDescriptor::Settings),
                alpha,
                interactive,
            ));
        column = column.push(control_bar(top));
    }

    let play_label = if model.paused { "▶" } else { "❚❚" };
    let center = Container::new(overlay_button(
        play_label,
        Message::Control(Control::TogglePlayback),
        alpha,
        interactive,
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(Horizontal::Center)
    .align_y(Vertical::Center);
    column = column.push(center);

    if slots.bottom {
        let mut bottom = Row::new()
            .spacing(spacing::XS)
            .padding(spacing::SM)
            .align_y(Vertical::Center)
            .push(label(model.position.clone(), typography::BODY, alpha));

        if let Some(message) = &slots.cast_message {
            bottom = bottom.push(label(message.clone(), typography::CAPTION, alpha));
        }

        let fullscreen_label = if model.mode.is_fullscreen() {
            "Exit fullscreen"
        } else {
            "Fullscreen"
        };
        bottom = bottom
            .push(Container::new(Column::new()).width(Length::Fill))
            .push(overlay_button(
                "PiP",
                Message::Control(Control::EnterPictureInPicture),
                alpha,
                interactive,
            ))
            .push(overlay_button(
                fullscreen_label,
                Message::Control(Control::ToggleFullscreen),
                alpha,
                interactive,
            ));
        column = column.push(control_bar(bottom));
    }

    column.into()
}

fn menu_view<'a>(menu: MenuDescriptor, alpha: f32, interactive: bool) -> Element<'a, Message> {
    let header = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(overlay_button("◀", Message::CloseMenu, alpha, interactive))
        .push(label(menu.title(), typography::TITLE_MD, alpha));

    let mut entries = Column::new().spacing(spacing::XXS).push(header);

    for child in menu.children() {
        entries = entries.push(overlay_button(
            child.title(),
            Message::OpenMenu(*child),
            alpha,
            interactive,
        ));
    }
    for (index, option) in menu_options(menu).iter().enumerate() {
        entries = entries.push(overlay_button(
            option,
            Message::Control(Control::SelectOption(menu, index)),
            alpha,
            interactive,
        ));
    }

    let panel = Container::new(entries)
        .padding(spacing::MD)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(faded(palette::GRAY_900, alpha))),
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            ..Default::default()
        });

    Container::new(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn control_bar<'a>(row: Row<'a, Message>) -> Element<'a, Message> {
    Container::new(row).width(Length::Fill).into()
}

fn label<'a>(content: impl Into<String>, size: f32, alpha: f32) -> Element<'a, Message> {
    Text::new(content.into())
        .size(size)
        .color(faded(palette::WHITE, alpha))
        .into()
}

fn overlay_button<'a>(
    content: &'a str,
    message: Message,
    alpha: f32,
    interactive: bool,
) -> Element<'a, Message> {
    let text_alpha = if interactive {
        alpha
    } else {
        alpha * opacity::DISABLED
    };
    let btn = button(Text::new(content).size(typography::BODY))
        .padding(spacing::XS)
        .style(move |_theme: &Theme, status: button::Status| {
            let hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            let fill = if hovered {
                palette::PRIMARY_500
            } else {
                Color {
                    a: 0.0,
                    ..palette::BLACK
                }
            };
            button::Style {
                background: Some(Background::Color(faded(fill, alpha))),
                text_color: faded(palette::WHITE, text_alpha),
                border: Border {
                    radius: radius::SM.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        });

    if interactive {
        btn.on_press(message).into()
    } else {
        btn.into()
    }
}
