use crate::config::Settings;
use crate::drag::{DragState, PointerEvent};
use eframe::egui;
use serde::{Deserialize, Serialize};

// ── Style ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn to_egui(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
            (self.a.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}

impl Default for Color4 {
    fn default() -> Self {
        Self::WHITE
    }
}

// ── Overlays ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    pub fn egui_id(self) -> egui::Id {
        egui::Id::new(("text_overlay", self.0))
    }
}

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A text label positioned relative to the center of its container.
#[derive(Clone, Debug)]
pub struct TextOverlay {
    pub id: OverlayId,
    pub text: String,
    pub font_size: f32,
    pub color: Color4,
    /// Left/top margin from the centered anchor.
    pub offset: egui::Vec2,
    drag: DragState,
}

impl TextOverlay {
    /// Where the label's center sits inside `container`.
    pub fn center_in(&self, container: egui::Rect) -> egui::Pos2 {
        container.center() + self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if let Some(delta) = self.drag.handle(event, &mut self.offset) {
            log::trace!(
                "Overlay {} moved by ({:.1}, {:.1}) to ({:.1}, {:.1})",
                self.id,
                delta.x,
                delta.y,
                self.offset.x,
                self.offset.y
            );
        }
    }
}

#[derive(Debug, Default)]
pub struct Overlays {
    items: Vec<TextOverlay>,
    next_id: u64,
}

impl Overlays {
    /// Adds a centered overlay styled from `settings`.
    pub fn add(&mut self, settings: &Settings) -> OverlayId {
        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.items.push(TextOverlay {
            id,
            text: settings.overlay_text.clone(),
            font_size: settings.overlay_font_size,
            color: settings.overlay_color,
            offset: egui::Vec2::ZERO,
            drag: DragState::Idle,
        });
        id
    }

    pub fn get(&self, id: OverlayId) -> Option<&TextOverlay> {
        self.items.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut TextOverlay> {
        self.items.iter_mut().find(|o| o.id == id)
    }

    pub fn ids(&self) -> Vec<OverlayId> {
        self.items.iter().map(|o| o.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn new_overlay_is_centered_with_defaults() {
        let settings = Settings::default();
        let mut overlays = Overlays::default();
        let id = overlays.add(&settings);

        let overlay = overlays.get(id).unwrap();
        assert_eq!(overlay.text, "Introduce your text here");
        assert_eq!(overlay.font_size, 20.0);
        assert_eq!(overlay.color, Color4::WHITE);
        assert_eq!(overlay.offset, egui::Vec2::ZERO);
        assert!(!overlay.is_dragging());

        let container = egui::Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 300.0));
        assert_eq!(overlay.center_in(container), pos2(200.0, 150.0));
    }

    #[test]
    fn ids_are_unique() {
        let settings = Settings::default();
        let mut overlays = Overlays::default();
        let a = overlays.add(&settings);
        let b = overlays.add(&settings);
        assert_ne!(a, b);
        assert_ne!(a.egui_id(), b.egui_id());
        assert_eq!(overlays.ids(), vec![a, b]);
    }

    #[test]
    fn color_conversion_clamps() {
        let c = Color4 {
            r: 2.0,
            g: -1.0,
            b: 0.5,
            a: 1.0,
        };
        assert_eq!(c.to_egui(), egui::Color32::from_rgba_unmultiplied(255, 0, 127, 255));
    }
}
