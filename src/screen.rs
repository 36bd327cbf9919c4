//! State of the editing screen, independent of how it is drawn.

use crate::config::Settings;
use crate::drag::PointerEvent;
use crate::error::LoadError;
use crate::loader::{self, DecodedImage, PendingLoad};
use crate::overlay::{OverlayId, Overlays};
use crate::picker::{PickOutcome, PickRequest, ResourcePicker, ResultCode, MAIN_REQUEST_OPEN};
use crate::surface::DisplaySurface;
use eframe::egui;
use std::path::PathBuf;

/// Lifecycle of the open button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenTrigger {
    /// Clicking opens the picker.
    Armed,
    /// A pick or decode is in progress; further clicks are ignored.
    Requested,
    /// An image is shown and the button is gone.
    Done,
}

pub struct EditorScreen {
    settings: Settings,
    picker: Box<dyn ResourcePicker>,
    trigger: OpenTrigger,
    surface: DisplaySurface,
    overlays: Overlays,
    pending: Option<PendingLoad>,
}

impl EditorScreen {
    pub fn new(settings: Settings, picker: Box<dyn ResourcePicker>) -> Self {
        Self {
            settings,
            picker,
            trigger: OpenTrigger::Armed,
            surface: DisplaySurface::default(),
            overlays: Overlays::default(),
            pending: None,
        }
    }

    #[cfg(test)]
    pub fn trigger(&self) -> OpenTrigger {
        self.trigger
    }

    pub fn surface(&self) -> &DisplaySurface {
        &self.surface
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn open_button_visible(&self) -> bool {
        self.trigger != OpenTrigger::Done
    }

    pub fn open_enabled(&self) -> bool {
        self.trigger == OpenTrigger::Armed
    }

    pub fn add_text_button_visible(&self) -> bool {
        self.trigger == OpenTrigger::Done
    }

    /// Asks the picker for an image. Returns `false` when the trigger is not
    /// armed and nothing happened.
    pub fn request_open(&mut self, ctx: &egui::Context) -> bool {
        if self.trigger != OpenTrigger::Armed {
            log::debug!("Open ignored, trigger is {:?}", self.trigger);
            return false;
        }
        self.trigger = OpenTrigger::Requested;
        let request = PickRequest::open_image();
        let outcome = self.picker.pick(&request);
        self.on_pick_outcome(outcome, ctx);
        true
    }

    pub fn on_pick_outcome(&mut self, outcome: PickOutcome, ctx: &egui::Context) {
        if let Some(path) = outcome.accepted_resource(MAIN_REQUEST_OPEN) {
            self.start_load(path.to_path_buf(), ctx);
            return;
        }
        if outcome.request_code != MAIN_REQUEST_OPEN {
            log::warn!("Ignoring pick outcome for request {}", outcome.request_code);
            return;
        }
        match outcome.result_code {
            ResultCode::Ok => log::error!("Error loading image: {}", LoadError::MissingResource),
            ResultCode::Canceled => log::info!("Open canceled"),
        }
        self.open_failed();
    }

    /// Opens `path` without going through the picker.
    pub fn open_path(&mut self, path: PathBuf, ctx: &egui::Context) -> bool {
        if self.trigger != OpenTrigger::Armed {
            return false;
        }
        self.trigger = OpenTrigger::Requested;
        self.start_load(path, ctx);
        true
    }

    fn start_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        log::info!("Loading image: {}", path.display());
        self.pending = Some(loader::spawn_decode(path, Some(ctx.clone())));
    }

    /// Applies the in-flight load if the worker has finished.
    pub fn poll_load(&mut self, ctx: &egui::Context) {
        let Some(result) = self.pending.as_ref().and_then(PendingLoad::poll) else {
            return;
        };
        self.pending = None;
        self.complete_load(result, ctx);
    }

    fn complete_load(&mut self, result: Result<DecodedImage, LoadError>, ctx: &egui::Context) {
        match result {
            Ok(decoded) => {
                let [w, h] = decoded.size();
                let source = decoded.source.display().to_string();
                self.surface.set_image(ctx, decoded);
                log::info!(
                    "Loaded {source} ({w}x{h}), surface update {}",
                    self.surface.updates()
                );
                self.trigger = OpenTrigger::Done;
            }
            Err(e) => {
                log::error!("Error loading image: {e}");
                self.open_failed();
            }
        }
    }

    fn open_failed(&mut self) {
        if self.settings.rearm_open_on_failure {
            self.trigger = OpenTrigger::Armed;
        }
    }

    pub fn add_overlay(&mut self) -> OverlayId {
        let id = self.overlays.add(&self.settings);
        log::info!("Added text overlay {id}");
        id
    }

    /// Feeds a pointer event to one overlay. Returns whether it was consumed.
    pub fn handle_overlay_pointer(&mut self, id: OverlayId, event: PointerEvent) -> bool {
        match self.overlays.get_mut(id) {
            Some(overlay) => {
                overlay.handle_pointer(event);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn finish_load(&mut self, ctx: &egui::Context) {
        if let Some(pending) = self.pending.take() {
            let result = pending.wait();
            self.complete_load(result, ctx);
        }
    }
}
