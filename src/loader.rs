//! Off-thread image decoding.
//!
//! Each open spawns one worker thread. The worker only decodes; the result
//! travels back through a one-shot channel and is applied by whoever polls the
//! [`PendingLoad`] on the UI thread.

use crate::error::LoadError;
use eframe::egui;
use image::ImageReader;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

pub struct DecodedImage {
    pub source: PathBuf,
    pub image: egui::ColorImage,
}

impl DecodedImage {
    pub fn size(&self) -> [usize; 2] {
        self.image.size
    }
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("source", &self.source)
            .field("size", &self.image.size)
            .finish()
    }
}

/// Reads and fully decodes the image at `path` into RGBA pixels.
pub fn decode_file(path: &Path) -> Result<DecodedImage, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let img = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.as_flat_samples();
    Ok(DecodedImage {
        source: path.to_path_buf(),
        image: egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
    })
}

/// The one completion point of an in-flight open.
pub struct PendingLoad {
    rx: Receiver<Result<DecodedImage, LoadError>>,
}

impl PendingLoad {
    /// `None` while the worker is still decoding.
    pub fn poll(&self) -> Option<Result<DecodedImage, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::WorkerGone)),
        }
    }

    #[cfg(test)]
    pub fn wait(&self) -> Result<DecodedImage, LoadError> {
        self.rx.recv().unwrap_or(Err(LoadError::WorkerGone))
    }
}

/// Starts decoding `path` on a fresh worker thread.
///
/// The worker asks `ctx` for a repaint once the result is ready so the UI
/// thread wakes up to poll it.
pub fn spawn_decode(path: PathBuf, ctx: Option<egui::Context>) -> PendingLoad {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("image-decode".to_string())
        .spawn(move || {
            log::debug!("Decoding {}", path.display());
            let _ = tx.send(decode_file(&path));
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
    if let Err(e) = spawned {
        log::error!("Failed to start decode worker: {e}");
    }
    PendingLoad { rx }
}
