use crate::config::Settings;
use crate::drag::PointerEvent;
use crate::overlay::OverlayId;
use crate::picker::NativePicker;
use crate::screen::EditorScreen;
use eframe::egui;
use std::path::PathBuf;

pub struct EditorApp {
    screen: EditorScreen,
}

impl EditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, startup: Option<PathBuf>) -> Self {
        let mut screen = EditorScreen::new(settings, Box::new(NativePicker));
        if let Some(path) = startup {
            screen.open_path(path, &cc.egui_ctx);
        }
        Self { screen }
    }

    fn draw_image(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let surface = self.screen.surface();
        let (Some(tex), Some(img_rect)) = (surface.texture(), surface.fit_rect(canvas_rect)) else {
            return;
        };
        painter.image(
            tex.id(),
            img_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    /// Lays out, drives and paints one overlay.
    fn show_overlay(&mut self, ui: &mut egui::Ui, canvas_rect: egui::Rect, id: OverlayId) {
        let Some(overlay) = self.screen.overlays().get(id) else {
            return;
        };
        let galley = ui.painter().layout_no_wrap(
            overlay.text.clone(),
            egui::FontId::proportional(overlay.font_size),
            overlay.color.to_egui(),
        );
        let rect = egui::Rect::from_center_size(overlay.center_in(canvas_rect), galley.size());

        let response = ui.interact(rect, id.egui_id(), egui::Sense::drag());
        for event in pointer_events(ui.ctx(), &response) {
            self.screen.handle_overlay_pointer(id, event);
        }

        // Repaint at the position the events just produced.
        let Some(overlay) = self.screen.overlays().get(id) else {
            return;
        };
        let rect = egui::Rect::from_center_size(overlay.center_in(canvas_rect), galley.size());
        let painter = ui.painter();
        if overlay.is_dragging() {
            painter.rect_stroke(
                rect.expand(4.0),
                2.0,
                egui::Stroke::new(1.5, egui::Color32::from_rgb(0, 120, 255)),
                egui::StrokeKind::Middle,
            );
        }
        let color = overlay.color.to_egui();
        painter.galley(rect.min, galley, color);
        if response.hovered() || overlay.is_dragging() {
            let icon = if overlay.is_dragging() {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            };
            ui.ctx().set_cursor_icon(icon);
        }
    }
}

/// Translates an overlay's drag response into down/move/up events.
fn pointer_events(ctx: &egui::Context, response: &egui::Response) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let pos = response
        .interact_pointer_pos()
        .or_else(|| ctx.input(|i| i.pointer.latest_pos()));
    if let Some(pos) = pos {
        if response.drag_started() {
            let origin = ctx.input(|i| i.pointer.press_origin()).unwrap_or(pos);
            events.push(PointerEvent::Down(origin));
            events.push(PointerEvent::Move(pos));
        } else if response.dragged() {
            events.push(PointerEvent::Move(pos));
        }
    }
    // A touch release may leave no pointer position behind.
    if response.drag_stopped() {
        events.push(PointerEvent::Up(pos.unwrap_or_default()));
    }
    events
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.screen.poll_load(ctx);

        // Keyboard shortcuts
        let (open_pressed, add_pressed) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::O),
                i.modifiers.ctrl && i.key_pressed(egui::Key::T),
            )
        });
        let mut open_clicked = open_pressed && self.screen.open_button_visible();
        let mut add_clicked = add_pressed && self.screen.add_text_button_visible();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let canvas_rect = response.rect;

                painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));
                self.draw_image(&painter, canvas_rect);

                for id in self.screen.overlays().ids() {
                    self.show_overlay(ui, canvas_rect, id);
                }

                if self.screen.open_button_visible() {
                    let button_rect =
                        egui::Rect::from_center_size(canvas_rect.center(), egui::vec2(160.0, 40.0));
                    ui.add_enabled_ui(self.screen.open_enabled(), |ui| {
                        if ui.put(button_rect, egui::Button::new("Open image")).clicked() {
                            open_clicked = true;
                        }
                    });
                    if self.screen.is_loading() {
                        let spinner_rect = egui::Rect::from_center_size(
                            canvas_rect.center() + egui::vec2(0.0, 44.0),
                            egui::vec2(24.0, 24.0),
                        );
                        ui.put(spinner_rect, egui::Spinner::new());
                    }
                }
            });

        if self.screen.add_text_button_visible() {
            egui::Area::new(egui::Id::new("add_text_button"))
                .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -24.0))
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    if ui.button("Add text").clicked() {
                        add_clicked = true;
                    }
                });
        }

        if open_clicked {
            self.screen.request_open(ctx);
        }
        if add_clicked {
            self.screen.add_overlay();
        }
    }
}
