use crate::error::ViewerError;
use crate::viewer::document::DocumentStatus;
use tracing::{info, warn};

/// Zoom is kept in quarter steps so repeated zooming cannot drift.
const SCALE_STEP_DIVISOR: u8 = 4;
const MIN_SCALE_STEPS: u8 = 2; // 0.5x
const MAX_SCALE_STEPS: u8 = 12; // 3.0x
const DEFAULT_SCALE_STEPS: u8 = 4; // 1.0x

/// Pages shown as individual buttons before the pager collapses.
const PAGER_WINDOW: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Single,
    Continuous,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Single => "Single Page",
            ViewMode::Continuous => "Scrollable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportState {
    pub page_number: u32,
    pub num_pages: u32,
    scale_steps: u8,
    pub rotation: u16,
    pub fullscreen: bool,
    pub view_mode: ViewMode,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            page_number: 1,
            num_pages: 0,
            scale_steps: DEFAULT_SCALE_STEPS,
            rotation: 0,
            fullscreen: false,
            view_mode: ViewMode::Single,
        }
    }
}

impl ViewportState {
    pub fn scale(&self) -> f64 {
        self.scale_steps as f64 / SCALE_STEP_DIVISOR as f64
    }

    pub fn zoom_percent(&self) -> u32 {
        self.scale_steps as u32 * 100 / SCALE_STEP_DIVISOR as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerItem {
    Page(u32),
    Ellipsis,
}

/// Page, zoom, rotation, fullscreen and view-mode state for the answer paper,
/// together with the load status of the document behind it.
#[derive(Debug, Clone, Default)]
pub struct DocumentViewportController {
    state: ViewportState,
    status: DocumentStatus,
}

impl DocumentViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn status(&self) -> &DocumentStatus {
        &self.status
    }

    pub fn current_url(&self) -> Option<&str> {
        self.status.url()
    }

    /// Begin loading `url`. A different URL than the current one starts from a
    /// fresh viewport; the same URL keeps the viewport as it is.
    pub fn load(&mut self, url: &str) {
        if self.current_url() != Some(url) {
            self.state = ViewportState::default();
        }
        info!(url, "loading document");
        self.status = DocumentStatus::Loading {
            url: url.to_string(),
        };
    }

    /// Re-issue the load of a failed document. Returns the URL to fetch.
    pub fn retry(&mut self) -> Option<String> {
        let DocumentStatus::Failed { url, .. } = &self.status else {
            return None;
        };
        let url = url.clone();
        info!(url = %url, "retrying document load");
        self.status = DocumentStatus::Loading { url: url.clone() };
        Some(url)
    }

    pub fn unload(&mut self) {
        self.state = ViewportState::default();
        self.status = DocumentStatus::Idle;
    }

    pub fn on_document_load(&mut self, num_pages: u32) {
        self.state.num_pages = num_pages;
        if self.state.page_number > num_pages || self.state.page_number == 0 {
            self.state.page_number = 1;
        }

        if let Some(url) = self.current_url().map(str::to_string) {
            info!(url = %url, num_pages, "document loaded");
            self.status = DocumentStatus::Ready { url, num_pages };
        }
    }

    /// Record a failed load. The viewport keeps its last valid values.
    pub fn on_document_load_error(&mut self, reason: impl ToString) -> ViewerError {
        let url = self.current_url().unwrap_or_default().to_string();
        let reason = reason.to_string();
        warn!(url = %url, reason = %reason, "document failed to load");
        self.status = DocumentStatus::Failed {
            url: url.clone(),
            reason: reason.clone(),
        };
        ViewerError::resource_load(url, reason)
    }

    pub fn next_page(&mut self) {
        if self.can_next() {
            self.state.page_number += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.can_prev() {
            self.state.page_number -= 1;
        }
    }

    /// Jump straight to a page. Only available in single-page mode.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if !self.can_jump() || page == 0 || page > self.state.num_pages {
            return false;
        }
        self.state.page_number = page;
        true
    }

    pub fn zoom_in(&mut self) {
        if self.can_zoom_in() {
            self.state.scale_steps += 1;
        }
    }

    pub fn zoom_out(&mut self) {
        if self.can_zoom_out() {
            self.state.scale_steps -= 1;
        }
    }

    pub fn rotate(&mut self) {
        self.state.rotation = (self.state.rotation + 90) % 360;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.state.fullscreen = !self.state.fullscreen;
    }

    pub fn toggle_view_mode(&mut self) {
        self.state.view_mode = match self.state.view_mode {
            ViewMode::Single => ViewMode::Continuous,
            ViewMode::Continuous => ViewMode::Single,
        };
    }

    pub fn can_prev(&self) -> bool {
        self.state.page_number > 1
    }

    pub fn can_next(&self) -> bool {
        self.state.page_number < self.state.num_pages
    }

    pub fn can_jump(&self) -> bool {
        self.state.view_mode == ViewMode::Single
    }

    pub fn can_zoom_in(&self) -> bool {
        self.state.scale_steps < MAX_SCALE_STEPS
    }

    pub fn can_zoom_out(&self) -> bool {
        self.state.scale_steps > MIN_SCALE_STEPS
    }

    /// Page buttons for the bottom pager: the first ten pages, then an
    /// ellipsis and the last page when the document is longer.
    pub fn pager_pages(&self) -> Vec<PagerItem> {
        let n = self.state.num_pages;
        let mut items: Vec<PagerItem> = (1..=n.min(PAGER_WINDOW)).map(PagerItem::Page).collect();
        if n > PAGER_WINDOW {
            items.push(PagerItem::Ellipsis);
            items.push(PagerItem::Page(n));
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(num_pages: u32) -> DocumentViewportController {
        let mut viewer = DocumentViewportController::new();
        viewer.load("https://papers.example/CS601/CS2021045.pdf");
        viewer.on_document_load(num_pages);
        viewer
    }

    #[test]
    fn test_page_bounds() {
        let mut viewer = loaded(7);
        viewer.prev_page();
        assert_eq!(viewer.state().page_number, 1);

        for _ in 0..7 {
            viewer.next_page();
        }
        assert_eq!(viewer.state().page_number, 7);
        assert!(!viewer.can_next());

        viewer.prev_page();
        assert_eq!(viewer.state().page_number, 6);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut viewer = loaded(3);
        assert_eq!(viewer.state().scale(), 1.0);

        for _ in 0..9 {
            viewer.zoom_in();
            assert!(viewer.state().scale() <= 3.0);
        }
        assert_eq!(viewer.state().scale(), 3.0);
        assert_eq!(viewer.state().zoom_percent(), 300);

        for _ in 0..20 {
            viewer.zoom_out();
        }
        assert_eq!(viewer.state().scale(), 0.5);
        assert!(!viewer.can_zoom_out());
    }

    #[test]
    fn test_rotation_cycles() {
        let mut viewer = loaded(1);
        let mut seen = Vec::new();
        for _ in 0..4 {
            viewer.rotate();
            seen.push(viewer.state().rotation);
        }
        assert_eq!(seen, vec![90, 180, 270, 0]);
    }

    #[test]
    fn test_toggles_touch_only_their_field() {
        let mut viewer = loaded(5);
        viewer.next_page();
        viewer.zoom_in();
        let before = viewer.state().clone();

        viewer.toggle_fullscreen();
        assert!(viewer.state().fullscreen);
        assert_eq!(viewer.state().page_number, before.page_number);
        assert_eq!(viewer.state().scale(), before.scale());

        viewer.toggle_view_mode();
        assert_eq!(viewer.state().view_mode, ViewMode::Continuous);
        viewer.toggle_view_mode();
        assert_eq!(viewer.state().view_mode, ViewMode::Single);
    }

    #[test]
    fn test_jump_disabled_in_continuous_mode() {
        let mut viewer = loaded(5);
        assert!(viewer.go_to_page(4));
        assert_eq!(viewer.state().page_number, 4);
        assert!(!viewer.go_to_page(6));
        assert!(!viewer.go_to_page(0));

        viewer.toggle_view_mode();
        assert!(!viewer.go_to_page(2));
        assert_eq!(viewer.state().page_number, 4);
    }

    #[test]
    fn test_reload_with_fewer_pages_resets_page() {
        let mut viewer = loaded(7);
        viewer.go_to_page(6);
        viewer.on_document_load(3);
        assert_eq!(viewer.state().page_number, 1);

        viewer.go_to_page(2);
        viewer.on_document_load(5);
        assert_eq!(viewer.state().page_number, 2);
    }

    #[test]
    fn test_new_url_resets_viewport() {
        let mut viewer = loaded(7);
        viewer.go_to_page(5);
        viewer.rotate();

        viewer.load("https://papers.example/CS601/CS2021045.pdf");
        assert_eq!(viewer.state().page_number, 5);

        viewer.load("https://papers.example/CS602/CS2021045.pdf");
        assert_eq!(viewer.state(), &ViewportState::default());
    }

    #[test]
    fn test_load_error_keeps_state_and_allows_retry() {
        let mut viewer = loaded(7);
        viewer.go_to_page(3);
        viewer.zoom_in();
        let before = viewer.state().clone();

        let err = viewer.on_document_load_error("connection reset");
        assert!(matches!(err, ViewerError::ResourceLoad { .. }));
        assert!(err.is_retryable());
        assert_eq!(viewer.state(), &before);
        assert!(viewer.status().is_failed());

        let url = viewer.retry().unwrap();
        assert_eq!(url, "https://papers.example/CS601/CS2021045.pdf");
        assert!(matches!(viewer.status(), DocumentStatus::Loading { .. }));
        assert!(viewer.retry().is_none());
    }

    #[test]
    fn test_pager_collapses_long_documents() {
        assert_eq!(
            loaded(3).pager_pages(),
            vec![PagerItem::Page(1), PagerItem::Page(2), PagerItem::Page(3)]
        );

        let pages = loaded(14).pager_pages();
        assert_eq!(pages.len(), 12);
        assert_eq!(pages[10], PagerItem::Ellipsis);
        assert_eq!(pages[11], PagerItem::Page(14));
    }
}
