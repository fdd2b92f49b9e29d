//! Geometry of a section: where the card, icon and text blocks sit.
//!
//! The host has no DOM, so hit testing is done against rectangles derived
//! from the window size. The card is centred and capped in width; the icon
//! straddles the card's top edge; title and description stack inside it.

use glam::Vec2;

/// Axis-aligned rectangle, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmplt(self.max).all()
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Same centre, scaled extent.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::from_center_size(self.center(), self.size() * factor)
    }
}

/// What lies under a point, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Icon,
    Title,
    Description,
    Card,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
    pub viewport: Vec2,
    pub card: Rect,
    /// Icon centre; the icon is a disc of [`SectionLayout::ICON_RADIUS`].
    pub icon: Vec2,
    pub title: Rect,
    pub description: Rect,
}

impl SectionLayout {
    pub const MAX_CARD_WIDTH: f32 = 768.0;
    pub const MAX_CARD_HEIGHT: f32 = 520.0;
    pub const MARGIN: f32 = 24.0;
    pub const ICON_RADIUS: f32 = 40.0;

    pub fn new(viewport: Vec2) -> Self {
        let viewport = viewport.max(Vec2::ZERO);
        let center = viewport * 0.5;
        let card_size = Vec2::new(
            (viewport.x - 2.0 * Self::MARGIN).clamp(0.0, Self::MAX_CARD_WIDTH),
            (viewport.y * 0.7).clamp(0.0, Self::MAX_CARD_HEIGHT),
        );
        let card = Rect::from_center_size(center, card_size);
        let icon = Vec2::new(center.x, card.min.y);

        let inner_width = card_size.x * 0.8;
        let title = Rect::from_center_size(
            Vec2::new(center.x, card.min.y + card_size.y * 0.35),
            Vec2::new(inner_width, card_size.y * 0.2),
        );
        let description = Rect::from_center_size(
            Vec2::new(center.x, card.min.y + card_size.y * 0.65),
            Vec2::new(inner_width, card_size.y * 0.3),
        );

        Self {
            viewport,
            card,
            icon,
            title,
            description,
        }
    }

    /// Innermost region under `point`.
    pub fn hit(&self, point: Vec2) -> Region {
        if point.distance(self.icon) < Self::ICON_RADIUS {
            Region::Icon
        } else if self.title.contains(point) {
            Region::Title
        } else if self.description.contains(point) {
            Region::Description
        } else if self.card.contains(point) {
            Region::Card
        } else {
            Region::Background
        }
    }

    /// Whether `region` lies inside the card (hovering it counts as hovering the card).
    pub fn is_within_card(region: Region) -> bool {
        !matches!(region, Region::Background)
    }
}
