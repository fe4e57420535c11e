//! Application model: the browser over the navigator, the transport, and the
//! transient UI state (cursor, view mode, folder picker, notifications).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::library::{Entry, ListError, Track};
use crate::nav::{NavOutcome, NavRequest, Navigator};
use crate::transport::{AudioDevice, DeviceEvent, PlaybackError, RepeatMode, Transport};

const MAX_NOTICES: usize = 5;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
        }
    }
}

/// One line of the browser. Indices point into the navigator's listing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Row {
    Parent,
    Directory(usize),
    Track(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub detail: String,
    pub created: Instant,
}

pub struct App<D> {
    pub nav: Navigator,
    pub transport: Transport<D>,
    pub selected: usize,
    pub view: ViewMode,
    /// Text typed into the folder picker while it is open.
    pub picker: Option<String>,
    notices: VecDeque<Notice>,
    /// Token of the in-flight ascend, so its failure is reported as such.
    ascending: Option<u64>,
}

impl<D: AudioDevice> App<D> {
    pub fn new(nav: Navigator, transport: Transport<D>) -> Self {
        Self {
            nav,
            transport,
            selected: 0,
            view: ViewMode::default(),
            picker: None,
            notices: VecDeque::new(),
            ascending: None,
        }
    }

    /// First navigation request, to the home directory.
    pub fn start(&mut self) -> NavRequest {
        self.nav.start()
    }

    /// Rows in display order: `..` (when offered), directories, then tracks.
    pub fn rows(&self) -> Vec<Row> {
        let parent = self.nav.can_ascend().then_some(Row::Parent);
        let dirs = (0..self.nav.directories().len()).map(Row::Directory);
        let tracks = (0..self.nav.playlist().len()).map(Row::Track);
        parent.into_iter().chain(dirs).chain(tracks).collect()
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows().get(self.selected).copied()
    }

    /// Move the cursor by `delta` rows, stopping at either end.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, len as isize - 1) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows().len().saturating_sub(1);
    }

    /// Act on the row under the cursor.
    ///
    /// Opening a directory returns the listing the caller must run; playing a
    /// track happens right away.
    pub fn activate_selected(&mut self) -> Option<NavRequest> {
        match self.selected_row()? {
            Row::Parent => self.go_up(),
            Row::Directory(i) => {
                let path = self.nav.directories().get(i)?.path.clone();
                Some(self.nav.descend(path))
            }
            Row::Track(i) => {
                self.play_track(i);
                None
            }
        }
    }

    pub fn go_up(&mut self) -> Option<NavRequest> {
        if !self.nav.can_ascend() {
            return None;
        }
        let request = self.nav.ascend()?;
        self.ascending = Some(request.token);
        Some(request)
    }

    pub fn open(&mut self, path: impl Into<String>) -> NavRequest {
        self.nav.descend(path)
    }

    /// Load and play track `index` of the current playlist.
    pub fn play_track(&mut self, index: usize) {
        let Some(track) = self.nav.playlist().get(index).cloned() else {
            return;
        };
        let name = track.name.clone();
        if let Err(err) = self.transport.load(track) {
            self.notify_error("Play track error", format!("{name}: {err}"));
        }
    }

    /// Apply a finished listing. Superseded results are ignored.
    pub fn apply_listing(&mut self, token: u64, result: Result<Vec<Entry>, ListError>) {
        let was_ascend = self.ascending == Some(token);
        match self.nav.complete(token, result) {
            NavOutcome::Applied => {
                self.selected = 0;
            }
            NavOutcome::Failed(err) => {
                let title = if was_ascend {
                    "Parent directory error"
                } else {
                    "Open directory error"
                };
                self.notify_error(title, err.to_string());
            }
            NavOutcome::Stale => return,
        }
        self.ascending = None;
    }

    /// Apply an event from the audio device. Events from an earlier load are
    /// dropped by the transport.
    pub fn handle_device_event(&mut self, generation: u64, event: DeviceEvent) {
        let result = self
            .transport
            .handle_event(generation, event, self.nav.playlist());
        self.report_playback(result);
    }

    pub fn toggle_play_pause(&mut self) {
        let result = self.transport.toggle_play_pause();
        self.report_playback(result);
    }

    pub fn stop(&mut self) {
        self.transport.stop();
    }

    pub fn next_track(&mut self) {
        let result = self.transport.next_track(self.nav.playlist());
        self.report_playback(result);
    }

    pub fn previous_track(&mut self) {
        let result = self.transport.previous_track(self.nav.playlist());
        self.report_playback(result);
    }

    pub fn seek_by(&mut self, delta_secs: f64) {
        self.transport.seek_by(delta_secs);
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        self.transport.nudge_volume(delta);
    }

    pub fn toggle_repeat(&mut self) -> RepeatMode {
        let mode = self.transport.toggle_repeat();
        self.notify_info("Repeat", mode.label());
        mode
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggle();
    }

    /// Whether `track` is the one loaded in the transport.
    pub fn is_current(&self, track: &Track) -> bool {
        self.transport.is_current(track)
    }

    pub fn open_picker(&mut self) {
        self.picker = Some(self.nav.current().to_string());
    }

    pub fn picker_push(&mut self, c: char) {
        if let Some(buf) = self.picker.as_mut() {
            buf.push(c);
        }
    }

    pub fn picker_pop(&mut self) {
        if let Some(buf) = self.picker.as_mut() {
            buf.pop();
        }
    }

    pub fn cancel_picker(&mut self) {
        self.picker = None;
    }

    /// Close the picker and navigate to the typed path, if any.
    pub fn confirm_picker(&mut self) -> Option<NavRequest> {
        let typed = self.picker.take()?;
        let path = typed.trim();
        if path.is_empty() {
            return None;
        }
        Some(self.open(path))
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn notify_error(&mut self, title: &str, detail: impl Into<String>) {
        let detail = detail.into();
        error!(title, %detail, "reported to user");
        self.push_notice(NoticeLevel::Error, title, detail);
    }

    pub fn notify_info(&mut self, title: &str, detail: impl Into<String>) {
        let detail = detail.into();
        info!(title, %detail, "notice");
        self.push_notice(NoticeLevel::Info, title, detail);
    }

    /// Drop notices older than `ttl`.
    pub fn expire_notices(&mut self, now: Instant, ttl: Duration) {
        self.notices
            .retain(|n| now.saturating_duration_since(n.created) < ttl);
    }

    fn push_notice(&mut self, level: NoticeLevel, title: &str, detail: String) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            level,
            title: title.to_string(),
            detail,
            created: Instant::now(),
        });
    }

    fn report_playback(&mut self, result: Result<(), PlaybackError>) {
        if let Err(err) = result {
            self.notify_error("Play track error", err.to_string());
        }
    }
}
