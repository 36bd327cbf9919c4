use crate::loader::DecodedImage;
use eframe::egui;

/// Shows at most one image; each successful open replaces it.
#[derive(Default)]
pub struct DisplaySurface {
    texture: Option<egui::TextureHandle>,
    updates: usize,
}

impl DisplaySurface {
    pub fn set_image(&mut self, ctx: &egui::Context, decoded: DecodedImage) {
        let texture = ctx.load_texture("image", decoded.image, egui::TextureOptions::LINEAR);
        self.texture = Some(texture);
        self.updates += 1;
    }

    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }

    #[cfg(test)]
    pub fn has_image(&self) -> bool {
        self.texture.is_some()
    }

    /// How many times an image has been applied.
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Largest rect with the image's aspect ratio that fits centered in `area`.
    pub fn fit_rect(&self, area: egui::Rect) -> Option<egui::Rect> {
        let texture = self.texture.as_ref()?;
        Some(fit_center(texture.size_vec2(), area))
    }
}

fn fit_center(image_size: egui::Vec2, area: egui::Rect) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return egui::Rect::from_center_size(area.center(), egui::Vec2::ZERO);
    }
    let scale = (area.width() / image_size.x).min(area.height() / image_size.y);
    egui::Rect::from_center_size(area.center(), image_size * scale)
}
