use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Correlates an open request with its outcome.
pub const MAIN_REQUEST_OPEN: u32 = 1;
pub const IMAGE_MIME_TYPE: &str = "image/*";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickAction {
    OpenDocument,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickCategory {
    Openable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickRequest {
    pub action: PickAction,
    pub category: PickCategory,
    pub mime_type: &'static str,
    pub request_code: u32,
}

impl PickRequest {
    pub fn open_image() -> Self {
        Self {
            action: PickAction::OpenDocument,
            category: PickCategory::Openable,
            mime_type: IMAGE_MIME_TYPE,
            request_code: MAIN_REQUEST_OPEN,
        }
    }

    /// File extensions matching the request's MIME filter.
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = if self.mime_type == IMAGE_MIME_TYPE {
            ImageFormat::all()
                .filter(|format| format.reading_enabled())
                .flat_map(|format| format.extensions_str().iter().copied())
                .collect()
        } else {
            ImageFormat::from_mime_type(self.mime_type)
                .map(|format| format.extensions_str().to_vec())
                .unwrap_or_default()
        };
        extensions.sort_unstable();
        extensions.dedup();
        extensions
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Canceled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickOutcome {
    pub request_code: u32,
    pub result_code: ResultCode,
    pub resource: Option<PathBuf>,
}

impl PickOutcome {
    /// The resource to load, if this outcome answers `request_code`
    /// successfully and carries one.
    pub fn accepted_resource(&self, request_code: u32) -> Option<&Path> {
        if self.request_code != request_code || self.result_code != ResultCode::Ok {
            return None;
        }
        self.resource.as_deref()
    }
}

/// Host facility that lets the user choose a resource.
pub trait ResourcePicker {
    fn pick(&mut self, request: &PickRequest) -> PickOutcome;
}

/// Native file dialog.
#[derive(Debug, Default)]
pub struct NativePicker;

impl ResourcePicker for NativePicker {
    fn pick(&mut self, request: &PickRequest) -> PickOutcome {
        let extensions = request.extensions();
        log::debug!(
            "Picking {:?} resource of type {} ({} extensions)",
            request.category,
            request.mime_type,
            extensions.len()
        );
        let dialog = rfd::FileDialog::new()
            .set_title("Open image")
            .add_filter("Images", extensions.as_slice());
        let picked = match request.action {
            PickAction::OpenDocument => dialog.pick_file(),
        };

        let result_code = if picked.is_some() {
            ResultCode::Ok
        } else {
            ResultCode::Canceled
        };
        PickOutcome {
            request_code: request.request_code,
            result_code,
            resource: picked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(code: u32, result: ResultCode, resource: Option<&str>) -> PickOutcome {
        PickOutcome {
            request_code: code,
            result_code: result,
            resource: resource.map(PathBuf::from),
        }
    }

    #[test]
    fn open_image_request_shape() {
        let request = PickRequest::open_image();
        assert_eq!(request.action, PickAction::OpenDocument);
        assert_eq!(request.category, PickCategory::Openable);
        assert_eq!(request.mime_type, "image/*");
        assert_eq!(request.request_code, MAIN_REQUEST_OPEN);
    }

    #[test]
    fn wildcard_covers_common_formats() {
        let extensions = PickRequest::open_image().extensions();
        for ext in ["png", "jpg", "jpeg", "gif", "bmp"] {
            assert!(extensions.contains(&ext), "missing {ext}");
        }
        let mut sorted = extensions.clone();
        sorted.dedup();
        assert_eq!(sorted, extensions);
    }

    #[test]
    fn specific_mime_type_narrows_filter() {
        let request = PickRequest {
            mime_type: "image/png",
            ..PickRequest::open_image()
        };
        assert_eq!(request.extensions(), vec!["png"]);
    }

    #[test]
    fn only_matching_successful_non_null_outcome_is_accepted() {
        let ok = outcome(MAIN_REQUEST_OPEN, ResultCode::Ok, Some("/tmp/a.png"));
        assert_eq!(
            ok.accepted_resource(MAIN_REQUEST_OPEN),
            Some(Path::new("/tmp/a.png"))
        );

        let wrong_code = outcome(MAIN_REQUEST_OPEN + 1, ResultCode::Ok, Some("/tmp/a.png"));
        assert_eq!(wrong_code.accepted_resource(MAIN_REQUEST_OPEN), None);

        let canceled = outcome(MAIN_REQUEST_OPEN, ResultCode::Canceled, Some("/tmp/a.png"));
        assert_eq!(canceled.accepted_resource(MAIN_REQUEST_OPEN), None);

        let null = outcome(MAIN_REQUEST_OPEN, ResultCode::Ok, None);
        assert_eq!(null.accepted_resource(MAIN_REQUEST_OPEN), None);
    }
}
