use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::app::{App, ViewMode};
use crate::config::{self, LibrarySettings, RepeatModeSetting, ViewSetting};
use crate::library::AudioExtensions;
use crate::nav::Navigator;
use crate::transport::{AudioDevice, RepeatMode, Transport};

impl From<RepeatModeSetting> for RepeatMode {
    fn from(setting: RepeatModeSetting) -> Self {
        match setting {
            RepeatModeSetting::NoRepeat => RepeatMode::NoRepeat,
            RepeatModeSetting::RepeatAll => RepeatMode::RepeatAll,
            RepeatModeSetting::RepeatOne => RepeatMode::RepeatOne,
        }
    }
}

impl From<ViewSetting> for ViewMode {
    fn from(setting: ViewSetting) -> Self {
        match setting {
            ViewSetting::List => ViewMode::List,
            ViewSetting::Grid => ViewMode::Grid,
        }
    }
}

/// Home directory: `library.home`, else the platform audio directory, else
/// the working directory.
pub fn resolve_home(library: &LibrarySettings) -> String {
    let home = library
        .home
        .clone()
        .or_else(dirs::audio_dir)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("/"));
    home.to_string_lossy().into_owned()
}

/// Build the app from settings. Nothing is listed yet; call [`App::start`].
pub fn build_app<D: AudioDevice>(device: D, settings: &config::Settings) -> App<D> {
    let home = resolve_home(&settings.library);
    debug!(%home, "home directory resolved");

    let nav = Navigator::new(home, AudioExtensions::new(&settings.library.extensions));
    let transport = Transport::new(
        device,
        settings.audio.default_volume,
        settings.playback.repeat_mode.into(),
    );

    let mut app = App::new(nav, transport);
    app.view = settings.ui.view.into();
    app
}
