//! Everything on screen that is text: the card copy, hints, floating emoji,
//! the curtain caption, the surprise modal and the day drawer.
//!
//! [`show`] reads a [`Storybook`] and draws it with egui; it never mutates
//! the storybook. Buttons report what was pressed as [`OverlayAction`]s,
//! which the host hands back through [`Storybook::apply`].
//!
//! Layout rectangles are in physical pixels, egui works in points, so every
//! position goes through [`Points`].

use std::time::Instant;

use egui::{Align2, Color32, FontId, Id, LayerId, Order, Pos2, RichText};
use glam::Vec2;

use crate::color::Rgba;
use crate::day::Day;
use crate::gpu::SHAKE_OFFSET;
use crate::layout::{Region, SectionLayout};
use crate::navigation::CURTAIN_TEXT;
use crate::section::{SectionView, MODAL_BODY, MODAL_CONFIRM, MODAL_TITLE};
use crate::sound::CueSink;
use crate::window::Storybook;

const ROSE: Color32 = Color32::from_rgb(244, 63, 94);
const GOLD: Color32 = Color32::from_rgb(255, 214, 0);
const MUTED_TEXT: Color32 = Color32::from_rgb(203, 213, 225);

/// A button pressed in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    ToggleMute,
    ToggleDrawer,
    SelectDay(Day),
    /// Drawer entry under the pointer, sent every frame the drawer is open.
    HoverEntry(Option<Day>),
    ConfirmModal,
    CloseModal,
}

/// Physical pixels to egui points.
#[derive(Debug, Clone, Copy)]
struct Points(f32);

impl Points {
    fn pos(self, v: Vec2) -> Pos2 {
        egui::pos2(v.x / self.0, v.y / self.0)
    }

    fn len(self, v: f32) -> f32 {
        v / self.0
    }
}

fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (c.a * 255.0).round() as u8)
}

fn faded(c: Color32, alpha: f32) -> Color32 {
    c.gamma_multiply(alpha.clamp(0.0, 1.0))
}

/// Draw the overlay for this frame and collect the buttons pressed.
pub fn show<S: CueSink>(ctx: &egui::Context, story: &Storybook<S>, now: Instant) -> Vec<OverlayAction> {
    let mut actions = Vec::new();
    let points = Points(ctx.pixels_per_point());
    let section = story.active_section();
    let curtain = story.curtain(now);
    let scene_alpha = 1.0 - curtain;

    if scene_alpha > 0.0 {
        let elapsed = story.elapsed(now);
        card(ctx, points, section, story.hovered_region(), elapsed, now, scene_alpha);
        emoji(ctx, points, section, now, scene_alpha);
    }
    if curtain > 0.0 {
        let painter = ctx.layer_painter(LayerId::new(Order::Middle, Id::new("curtain")));
        painter.text(
            ctx.screen_rect().center(),
            Align2::CENTER_CENTER,
            CURTAIN_TEXT,
            FontId::proportional(28.0),
            faded(ROSE, curtain),
        );
    }

    controls(ctx, story.sound().is_muted(), story.navigator().is_drawer_open(), &mut actions);
    if story.navigator().is_drawer_open() {
        drawer(ctx, story, &mut actions);
    }
    if section.is_modal_open() {
        modal(ctx, &mut actions);
    }
    actions
}

/// Card copy, icon and hints, following the section layout.
fn card(
    ctx: &egui::Context,
    points: Points,
    section: &SectionView,
    hovered: Option<Region>,
    elapsed: f32,
    now: Instant,
    alpha: f32,
) {
    let painter = ctx.layer_painter(LayerId::new(Order::Background, Id::new("card")));
    let layout: &SectionLayout = section.layout();
    let shake = if section.is_shaking(now) {
        Vec2::X * SHAKE_OFFSET
    } else {
        Vec2::ZERO
    };
    let card = layout.card;
    let card_height = card.size().y;
    let accent = color32(section.config().accent);

    // Icon disc straddling the top edge.
    let icon = points.pos(layout.icon + shake);
    let icon_radius = points.len(SectionLayout::ICON_RADIUS);
    painter.circle_filled(icon, icon_radius, faded(Color32::WHITE, alpha));
    painter.text(
        icon,
        Align2::CENTER_CENTER,
        section.day().icon_glyph(),
        FontId::proportional(icon_radius),
        faded(accent, alpha),
    );
    if let Some(taps) = section.taps_remaining() {
        let badge = icon + egui::vec2(icon_radius * 0.75, -icon_radius * 0.75);
        painter.circle_filled(badge, 11.0, faded(ROSE, alpha));
        painter.text(
            badge,
            Align2::CENTER_CENTER,
            taps.to_string(),
            FontId::proportional(12.0),
            faded(Color32::WHITE, alpha),
        );
    }

    if let Some(message) = section.unlock_message(now) {
        let at = points.pos(layout.icon - Vec2::Y * (SectionLayout::ICON_RADIUS + 28.0));
        pill(&painter, at, message, GOLD, Color32::BLACK, alpha);
    }

    let date = points.pos(Vec2::new(card.center().x, card.min.y + card_height * 0.18) + shake);
    pill(&painter, date, &section.config().date, accent, Color32::WHITE, alpha);

    // Title with the typewriter cursor blinking while the section is active.
    let mut title = section.title_text(now).to_string();
    if section.is_active() && !section.is_secret_title() && (elapsed * 2.0) as u32 % 2 == 0 {
        title.push('|');
    }
    let title_rect = layout.title;
    let title_size = points.len(title_rect.size().y * 0.45).clamp(18.0, 44.0);
    let title_color = if section.is_secret_title() { ROSE } else { Color32::WHITE };
    let galley = painter.layout(
        title,
        FontId::proportional(title_size),
        faded(title_color, alpha),
        points.len(title_rect.size().x),
    );
    let top_left = points.pos(title_rect.center() + shake) - galley.size() / 2.0;
    painter.galley(top_left, galley, faded(title_color, alpha));

    let mut description = section.description_text().to_string();
    let description_color = if section.is_promise_locked() {
        description.push_str(" 🔒");
        GOLD
    } else if section.is_glowing() {
        GOLD
    } else {
        MUTED_TEXT
    };
    let desc_rect = layout.description;
    let galley = painter.layout(
        description,
        FontId::proportional(16.0),
        faded(description_color, alpha),
        points.len(desc_rect.size().x),
    );
    let top_left = points.pos(desc_rect.center() + shake) - galley.size() / 2.0;
    painter.galley(top_left, galley, faded(description_color, alpha));

    let footer = points.pos(Vec2::new(card.center().x, card.max.y - card_height * 0.08) + shake);
    painter.text(
        footer,
        Align2::CENTER_CENTER,
        section.footer_text().to_uppercase(),
        FontId::proportional(11.0),
        faded(MUTED_TEXT, alpha * 0.7),
    );

    let day = section.day();
    let hint = match hovered {
        Some(Region::Icon) => day.icon_hint().map(|h| (h, layout.icon + Vec2::Y * (SectionLayout::ICON_RADIUS + 16.0))),
        Some(Region::Title) => day
            .title_hint()
            .map(|h| (h, Vec2::new(title_rect.center().x, title_rect.min.y - 12.0))),
        Some(Region::Description) => day
            .description_hint()
            .map(|h| (h, Vec2::new(desc_rect.center().x, desc_rect.max.y + 12.0))),
        _ => None,
    };
    if let Some((text, at)) = hint {
        pill(&painter, points.pos(at + shake), text, Color32::from_black_alpha(200), Color32::WHITE, alpha);
    }
}

fn pill(painter: &egui::Painter, center: Pos2, text: &str, fill: Color32, ink: Color32, alpha: f32) {
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(13.0), faded(ink, alpha));
    let rect = egui::Rect::from_center_size(center, galley.size() + egui::vec2(20.0, 8.0));
    painter.rect_filled(rect, egui::CornerRadius::same(12), faded(fill, alpha));
    painter.galley(rect.center() - galley.size() / 2.0, galley, faded(ink, alpha));
}

/// Floating emoji, rising and fading over their lifetime.
fn emoji(ctx: &egui::Context, points: Points, section: &SectionView, now: Instant, alpha: f32) {
    let painter = ctx.layer_painter(LayerId::new(Order::Middle, Id::new("emoji")));
    for e in section.emojis().visible(now) {
        let fade = 1.0 - e.progress(now);
        painter.text(
            points.pos(e.current_position(now)),
            Align2::CENTER_CENTER,
            e.glyph,
            FontId::proportional(32.0),
            faded(Color32::WHITE, fade * alpha),
        );
    }
}

/// Mute switch top left, menu toggle top right.
fn controls(ctx: &egui::Context, muted: bool, drawer_open: bool, actions: &mut Vec<OverlayAction>) {
    egui::Area::new(Id::new("mute"))
        .order(Order::Foreground)
        .anchor(Align2::LEFT_TOP, egui::vec2(16.0, 16.0))
        .show(ctx, |ui| {
            let label = if muted { "🔇" } else { "🔊" };
            if ui.button(RichText::new(label).size(20.0)).clicked() {
                actions.push(OverlayAction::ToggleMute);
            }
        });
    egui::Area::new(Id::new("menu"))
        .order(Order::Foreground)
        .anchor(Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .show(ctx, |ui| {
            let label = if drawer_open { "✕" } else { "☰" };
            if ui.button(RichText::new(label).size(20.0)).clicked() {
                actions.push(OverlayAction::ToggleDrawer);
            }
        });
}

/// Day list sliding in from the right.
fn drawer<S: CueSink>(ctx: &egui::Context, story: &Storybook<S>, actions: &mut Vec<OverlayAction>) {
    let dim = ctx.layer_painter(LayerId::new(Order::Middle, Id::new("drawer-dim")));
    dim.rect_filled(ctx.screen_rect(), egui::CornerRadius::ZERO, Color32::from_black_alpha(60));

    let active = story.active_day();
    let mut hovered = None;
    egui::Area::new(Id::new("drawer"))
        .order(Order::Foreground)
        .anchor(Align2::RIGHT_TOP, egui::vec2(-16.0, 72.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("💖").size(28.0).color(ROSE));
                        ui.label(RichText::new("Our Journey").strong().color(ROSE));
                    });
                    ui.add_space(8.0);
                    for day in Day::ALL {
                        let title = &story.section(day).config().title;
                        let text = if day == active {
                            RichText::new(title).strong().color(ROSE)
                        } else {
                            RichText::new(title)
                        };
                        let button = egui::Button::new(text)
                            .selected(day == active)
                            .min_size(egui::vec2(180.0, 32.0));
                        let response = ui.add(button);
                        if response.hovered() {
                            hovered = Some(day);
                        }
                        if response.clicked() {
                            actions.push(OverlayAction::SelectDay(day));
                        }
                    }
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        ui.weak(format!("{}/{}", active.index() + 1, Day::ALL.len()));
                    });
                });
        });
    actions.push(OverlayAction::HoverEntry(hovered));
}

/// The Valentine surprise. Only its buttons close it.
fn modal(ctx: &egui::Context, actions: &mut Vec<OverlayAction>) {
    egui::Modal::new(Id::new("surprise")).show(ctx, |ui| {
        ui.set_max_width(360.0);
        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                if ui.small_button("✕").clicked() {
                    actions.push(OverlayAction::CloseModal);
                }
            });
        });
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("💖").size(48.0).color(ROSE));
            ui.heading(RichText::new(MODAL_TITLE).size(30.0).strong().color(ROSE));
            ui.add_space(8.0);
            ui.label(RichText::new(MODAL_BODY).size(16.0));
            ui.add_space(16.0);
            let confirm = egui::Button::new(RichText::new(MODAL_CONFIRM).size(18.0).color(Color32::WHITE))
                .fill(ROSE)
                .corner_radius(egui::CornerRadius::same(20));
            if ui.add(confirm).clicked() {
                actions.push(OverlayAction::ConfirmModal);
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::sound::RecordingSink;

    fn story(now: Instant) -> Storybook<RecordingSink> {
        let config = AppConfig {
            seed: Some(11),
            ..AppConfig::default()
        };
        let mut story = Storybook::new(&config, RecordingSink::default(), now);
        story.resize(800, 600);
        story
    }

    fn input() -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))),
            ..Default::default()
        }
    }

    /// Run one overlay frame and return the pressed buttons and the paint output.
    fn frame<S: CueSink>(
        ctx: &egui::Context,
        story: &Storybook<S>,
        raw: egui::RawInput,
        now: Instant,
    ) -> (Vec<OverlayAction>, egui::FullOutput) {
        let mut actions = Vec::new();
        let output = ctx.run(raw, |ctx| actions = show(ctx, story, now));
        (actions, output)
    }

    #[test]
    fn test_idle_frame_presses_nothing() {
        let t0 = Instant::now();
        let story = story(t0);
        let ctx = egui::Context::default();
        let (actions, output) = frame(&ctx, &story, input(), t0);
        assert!(actions.is_empty());
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn test_open_drawer_reports_no_hover() {
        let t0 = Instant::now();
        let mut story = story(t0);
        story.apply(OverlayAction::ToggleDrawer, t0);
        let ctx = egui::Context::default();
        let (actions, _) = frame(&ctx, &story, input(), t0);
        assert_eq!(actions, vec![OverlayAction::HoverEntry(None)]);
    }

    #[test]
    fn test_pointer_over_card_still_reaches_storybook() {
        let t0 = Instant::now();
        let story = story(t0);
        let ctx = egui::Context::default();
        let card = story.active_section().layout().card.center();
        let mut raw = input();
        raw.events.push(egui::Event::PointerMoved(egui::pos2(card.x, card.y)));
        frame(&ctx, &story, raw, t0);
        // Card copy is painted, not interactive.
        assert!(!ctx.wants_pointer_input());
        assert!(!ctx.is_pointer_over_area());
    }

    #[test]
    fn test_points_scale() {
        let points = Points(2.0);
        assert_eq!(points.pos(Vec2::new(100.0, 40.0)), egui::pos2(50.0, 20.0));
        assert_eq!(points.len(80.0), 40.0);
        assert_eq!(color32(Rgba::opaque(1, 2, 3)), Color32::from_rgb(1, 2, 3));
    }
}
