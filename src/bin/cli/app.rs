use crate::constants::{PREVIEW_UPDATING_MS, SAVED_INDICATOR_MS, STATUS_MESSAGE_MS};
use crate::editor::PaneBuffer;
use crate::theme::{THEMES, Theme};
use minipen::autorun::AutorunDebounce;
use minipen::export::{ExportOutcome, ZipArchiver, export_bundle};
use minipen::preview::{FileSurface, PreviewSurface};
use minipen::snapshot::{EditorSnapshot, Layout};
use minipen::store::{FileStore, SnapshotStore};
use std::env;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Clone, PartialEq, Debug)]
pub enum AppState {
    Edit,
    Help,
    ConfirmReset,
    Alert,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pane {
    Html,
    Css,
    Js,
}

impl Pane {
    pub fn index(self) -> usize {
        match self {
            Pane::Html => 0,
            Pane::Css => 1,
            Pane::Js => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Html => "HTML",
            Pane::Css => "CSS",
            Pane::Js => "JS",
        }
    }

    pub fn lang(self) -> &'static str {
        match self {
            Pane::Html => "html",
            Pane::Css => "css",
            Pane::Js => "js",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Pane::Html => Pane::Css,
            Pane::Css => Pane::Js,
            Pane::Js => Pane::Html,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Pane::Html => Pane::Js,
            Pane::Css => Pane::Html,
            Pane::Js => Pane::Css,
        }
    }
}

pub const PANES: [Pane; 3] = [Pane::Html, Pane::Css, Pane::Js];

pub enum AppEvent {
    ExportFinished(Result<ExportOutcome, String>),
}

pub struct App {
    pub(crate) state: AppState,
    pub(crate) panes: [PaneBuffer; 3],
    pub(crate) focus: Pane,
    pub(crate) layout: Layout,
    pub(crate) autorun: bool,
    pub(crate) debounce: AutorunDebounce,
    pub(crate) store: FileStore,
    pub(crate) surface: FileSurface,
    pub(crate) theme_index: usize,
    pub(crate) saved_until: Option<Instant>,
    pub(crate) updating_until: Option<Instant>,
    pub(crate) status: Option<String>,
    pub(crate) status_until: Option<Instant>,
    pub(crate) alert: Option<String>,
    pub(crate) export_in_flight: bool,
    pub(crate) rx: mpsc::UnboundedReceiver<AppEvent>,
    pub(crate) tx: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    pub(crate) fn new() -> Self {
        Self::with_handles(FileStore::new(), FileSurface::new())
    }

    pub(crate) fn with_handles(store: FileStore, surface: FileSurface) -> Self {
        let snapshot = store.load();
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = Self {
            state: AppState::Edit,
            panes: [
                PaneBuffer::from_text(&snapshot.html),
                PaneBuffer::from_text(&snapshot.css),
                PaneBuffer::from_text(&snapshot.js),
            ],
            focus: Pane::Html,
            layout: snapshot.layout,
            autorun: snapshot.autorun,
            debounce: AutorunDebounce::default(),
            store,
            surface,
            theme_index: 0,
            saved_until: None,
            updating_until: None,
            status: None,
            status_until: None,
            alert: None,
            export_in_flight: false,
            rx,
            tx,
        };
        // Mirrors the original startup sequence: load, then render once.
        app.run_preview();
        app
    }

    pub(crate) fn current_theme(&self) -> Theme {
        THEMES
            .get(self.theme_index % THEMES.len())
            .cloned()
            .unwrap_or_else(|| THEMES[0].clone())
    }

    pub(crate) fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % THEMES.len();
    }

    pub(crate) fn focused_pane(&mut self) -> &mut PaneBuffer {
        &mut self.panes[self.focus.index()]
    }

    /// Rebuilds the working snapshot from the live pane contents.
    pub(crate) fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            html: self.panes[Pane::Html.index()].text(),
            css: self.panes[Pane::Css.index()].text(),
            js: self.panes[Pane::Js.index()].text(),
            autorun: self.autorun,
            layout: self.layout,
        }
    }

    /// Saves the full snapshot and shows the transient acknowledgment.
    pub(crate) fn save(&mut self) {
        match self.store.save(&self.snapshot()) {
            Ok(()) => {
                self.saved_until = Some(Instant::now() + Duration::from_millis(SAVED_INDICATOR_MS));
            }
            Err(e) => self.set_status(format!("Save failed: {}", e)),
        }
    }

    /// Every text change persists immediately and, when autorun is on, arms
    /// the debounce window.
    pub(crate) fn on_edit(&mut self) {
        self.save();
        if self.autorun {
            self.debounce.note_edit(Instant::now());
        }
    }

    /// Builds the document and assigns it to the rendering surface, with the
    /// "updating" state cleared by a fallback timer.
    pub(crate) fn run_preview(&mut self) {
        self.updating_until = Some(Instant::now() + Duration::from_millis(PREVIEW_UPDATING_MS));
        let doc = minipen::assemble::build_document(&self.snapshot());
        if let Err(e) = self.surface.assign(&doc) {
            self.set_status(format!("Preview failed: {}", e));
        }
        self.save();
    }

    pub(crate) fn open_in_browser(&mut self) {
        match self.surface.open_in_browser() {
            Ok(()) => self.set_status(format!("Opened {}", self.surface.path().display())),
            Err(e) => {
                self.state = AppState::Alert;
                self.alert = Some(format!("Could not open the preview: {}", e));
            }
        }
    }

    pub(crate) fn toggle_layout(&mut self) {
        self.layout = self.layout.toggled();
        self.save();
    }

    pub(crate) fn toggle_autorun(&mut self) {
        self.autorun = !self.autorun;
        if !self.autorun {
            self.debounce.cancel();
        }
        self.save();
    }

    pub(crate) fn reset_to_starter(&mut self) {
        let defaults = EditorSnapshot::default();
        self.panes[Pane::Html.index()].set_text(&defaults.html);
        self.panes[Pane::Css.index()].set_text(&defaults.css);
        self.panes[Pane::Js.index()].set_text(&defaults.js);
        self.run_preview();
    }

    /// Kicks off an export on a background task. A second request while one
    /// is in flight is suppressed rather than double-initiated.
    pub(crate) fn start_export(&mut self, rt: &tokio::runtime::Runtime) {
        if self.export_in_flight {
            self.set_status("Export already running".to_string());
            return;
        }
        self.export_in_flight = true;
        let snapshot = self.snapshot();
        let dest = env::current_dir().unwrap_or_else(|_| env::temp_dir());
        let tx = self.tx.clone();
        rt.spawn_blocking(move || {
            let result = export_bundle(&snapshot, &dest, Some(&ZipArchiver))
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ExportFinished(result));
        });
    }

    pub(crate) fn process_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                AppEvent::ExportFinished(result) => {
                    self.export_in_flight = false;
                    match result {
                        Ok(ExportOutcome::Archive(path)) => {
                            self.set_status(format!("Exported {}", path.display()));
                        }
                        Ok(ExportOutcome::SingleFile(path)) => {
                            self.set_status(format!(
                                "Archiver unavailable, exported {}",
                                path.display()
                            ));
                        }
                        Err(e) => {
                            self.state = AppState::Alert;
                            self.alert = Some(format!("Export failed: {}", e));
                        }
                    }
                }
            }
        }
    }

    /// Timer upkeep, called once per event-loop tick.
    pub(crate) fn tick(&mut self) {
        let now = Instant::now();
        if self.saved_until.is_some_and(|t| now >= t) {
            self.saved_until = None;
        }
        if self.updating_until.is_some_and(|t| now >= t) {
            self.updating_until = None;
        }
        if self.status_until.is_some_and(|t| now >= t) {
            self.status = None;
            self.status_until = None;
        }
        if self.autorun && self.debounce.poll(now) {
            self.run_preview();
        }
    }

    pub(crate) fn set_status(&mut self, message: String) {
        self.status = Some(message);
        self.status_until = Some(Instant::now() + Duration::from_millis(STATUS_MESSAGE_MS));
    }

    pub(crate) fn dismiss_alert(&mut self) {
        self.alert = None;
        self.state = AppState::Edit;
    }
}
