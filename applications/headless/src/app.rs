//! Line-oriented driver around a session
//!
//! Every input line is either a key name, routed to the active panel and
//! then the page listener, or a `:command`.
//!
//! `Esc` moves focus out of the panels onto the page body, where Space
//! toggles playback. Any movement or panel-switch key brings focus back.

use crate::library::Library;
use cadence_core::{MembershipOutcome, PlaylistId, Track};
use cadence_library::{MemoryGateway, MutationReport};
use cadence_navigation::{
    GlobalAction, Key, KeyEvent, KeyOutcome, KeyTarget, Panel, PanelAction, PanelContainer,
};
use cadence_playback::PlaybackEvent;
use cadence_session::Session;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Panel backed by a plain list; only its length matters here
#[derive(Debug)]
struct ListPanel {
    panel: Panel,
    len: AtomicUsize,
}

impl ListPanel {
    fn new(panel: Panel, len: usize) -> Self {
        Self {
            panel,
            len: AtomicUsize::new(len),
        }
    }

    fn set_len(&self, len: usize) {
        self.len.store(len, Ordering::Relaxed);
    }
}

impl PanelContainer for ListPanel {
    fn navigable_len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    fn focus_item(&self, index: usize) {
        debug!(panel = %self.panel, index, "focus");
    }
}

pub const HELP: &str = "\
keys:     j/k or ArrowDown/ArrowUp, h/l to switch panels, Enter or Space to activate, / to search
          Esc leaves the panels; Space then toggles playback until a movement key is pressed
commands: :toggle :next :prev :seek <secs> :volume <0-100> :mute :panel
          :new :rename <name> :delete :add <playlist-id> :edit <field> <value>
          :refresh :state :help :quit";

pub struct App {
    session: Session,
    gateway: Arc<MemoryGateway>,
    view: Vec<Track>,
    sidebar: Arc<ListPanel>,
    tracklist: Arc<ListPanel>,
    body_focused: bool,
}

impl App {
    pub fn new(mut session: Session, gateway: Arc<MemoryGateway>) -> Self {
        let view = session.tracks().to_vec();
        let sidebar = Arc::new(ListPanel::new(Panel::Sidebar, session.playlists().len()));
        let tracklist = Arc::new(ListPanel::new(Panel::Tracklist, view.len()));

        let container: Arc<dyn PanelContainer> = sidebar.clone();
        session.register_panel(Panel::Sidebar, &container);
        let container: Arc<dyn PanelContainer> = tracklist.clone();
        session.register_panel(Panel::Tracklist, &container);

        Self {
            session,
            gateway,
            view,
            sidebar,
            tracklist,
            body_focused: false,
        }
    }

    /// Apply one input line
    pub fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        let line = line.trim();
        if line.is_empty() {
            return ControlFlow::Continue(());
        }

        match line.strip_prefix(':') {
            Some(command) => return self.handle_command(command),
            None => self.handle_key(line),
        }

        self.pump();
        ControlFlow::Continue(())
    }

    fn handle_key(&mut self, name: &str) {
        let key = match Key::parse(name) {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "Unrecognized input");
                return;
            }
        };

        let target = self.key_target(key);
        let dispatch = self.session.handle_key(KeyEvent::new(key, target));

        match dispatch.panel {
            KeyOutcome::Activate {
                panel: Panel::Tracklist,
                index,
            } => {
                if let Err(e) = self.session.play_from_list(self.view.clone(), index) {
                    warn!(error = %e, "Cannot play track");
                }
            }
            KeyOutcome::Activate {
                panel: Panel::Sidebar,
                index,
            } => self.open_playlist(index),
            _ => {}
        }

        if dispatch.global == GlobalAction::FocusSearch {
            println!("(search focused)");
        }
    }

    /// Where a key lands, updating body focus on the way
    fn key_target(&mut self, key: Key) -> KeyTarget {
        if key == Key::Escape {
            if !self.body_focused {
                debug!("Focus moved to the page body");
            }
            self.body_focused = true;
        } else if self.body_focused && self.moves_focus(key) {
            debug!("Focus returned to the panels");
            self.body_focused = false;
        }

        if self.body_focused {
            KeyTarget::Body
        } else {
            KeyTarget::Panel(self.session.navigation().active_panel())
        }
    }

    fn moves_focus(&self, key: Key) -> bool {
        matches!(
            self.session.navigation().bindings().panel_action(key),
            Some(
                PanelAction::Down
                    | PanelAction::Up
                    | PanelAction::FocusSidebar
                    | PanelAction::FocusTracklist
            )
        )
    }

    fn handle_command(&mut self, command: &str) -> ControlFlow<()> {
        let (name, arg) = command
            .split_once(' ')
            .map_or((command, ""), |(name, arg)| (name, arg.trim()));

        let outcome = match name {
            "q" | "quit" => return ControlFlow::Break(()),
            "help" => {
                println!("{HELP}");
                Ok(())
            }
            "state" => Ok(()),
            "panel" => {
                self.body_focused = false;
                Ok(())
            }
            "toggle" => {
                self.session.toggle_play_pause();
                Ok(())
            }
            "next" => self.session.next().map_err(|e| e.to_string()),
            "prev" => self.session.previous().map_err(|e| e.to_string()),
            "seek" => arg
                .parse::<f64>()
                .map_err(|e| format!("bad seek target: {e}"))
                .map(|secs| {
                    let secs = if secs.is_finite() && secs > 0.0 { secs } else { 0.0 };
                    self.session.seek(Duration::from_secs_f64(secs));
                }),
            "volume" => arg
                .parse::<u8>()
                .map_err(|e| format!("bad volume: {e}"))
                .map(|level| self.session.set_volume(level)),
            "mute" => {
                self.session.toggle_mute();
                Ok(())
            }
            "new" => {
                let (id, _) = self.session.create_playlist();
                println!("created playlist {id}");
                Ok(())
            }
            "rename" => self.rename_selected(arg),
            "delete" => self.delete_selected(),
            "add" => self.add_selected_track(arg),
            "edit" => self.edit_selected_track(arg),
            "refresh" => {
                self.session.refresh_playlists(self.gateway.playlists());
                self.session.refresh_tracks(self.gateway.tracks());
                Ok(())
            }
            other => Err(format!("unknown command :{other}")),
        };

        if let Err(message) = outcome {
            warn!(command = name, %message, "Command failed");
        }

        self.pump();
        ControlFlow::Continue(())
    }

    fn selected_playlist(&self) -> Option<PlaylistId> {
        let index = self.session.navigation().cursor(Panel::Sidebar)?;
        self.session.playlists().get(index).map(|p| p.id.clone())
    }

    fn selected_track(&self) -> Option<&Track> {
        let index = self.session.navigation().cursor(Panel::Tracklist)?;
        self.view.get(index)
    }

    fn open_playlist(&mut self, index: usize) {
        let Some(playlist) = self.session.playlists().get(index) else {
            return;
        };
        info!(playlist = %playlist.name, "Opening playlist");
        self.view = Library::playlist_tracks(self.session.tracks(), playlist);
        self.tracklist.set_len(self.view.len());
        self.session.navigation_mut().set_active_panel(Panel::Tracklist);
    }

    fn rename_selected(&mut self, name: &str) -> Result<(), String> {
        let id = self.selected_playlist().ok_or("no playlist selected")?;
        if self.session.rename_playlist(&id, name).is_none() {
            return Err("name empty or unchanged".to_string());
        }
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<(), String> {
        let id = self.selected_playlist().ok_or("no playlist selected")?;
        self.session.delete_playlist(&id);
        Ok(())
    }

    fn add_selected_track(&mut self, playlist_id: &str) -> Result<(), String> {
        let track_id = self
            .selected_track()
            .map(|t| t.id.clone())
            .ok_or("no track selected")?;

        match self
            .session
            .add_track_to_playlist(&PlaylistId::new(playlist_id), &track_id)
        {
            MembershipOutcome::Added { order } => {
                println!("added at position {order}");
                Ok(())
            }
            MembershipOutcome::AlreadyPresent => {
                println!("already in playlist");
                Ok(())
            }
            MembershipOutcome::UnknownPlaylist => Err(format!("no playlist {playlist_id}")),
        }
    }

    fn edit_selected_track(&mut self, arg: &str) -> Result<(), String> {
        let (field, value) = arg.split_once(' ').ok_or("usage: :edit <field> <value>")?;
        let track_id = self
            .selected_track()
            .map(|t| t.id.clone())
            .ok_or("no track selected")?;

        self.session
            .update_track_field_raw(&track_id, field, value.trim())
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Fold in everything that happened since the last call
    pub fn pump(&mut self) {
        let report = self.session.pump();

        for event in &report.playback {
            if let PlaybackEvent::Error { message } = event {
                warn!(%message, "Playback error");
            }
        }
        for report in report.playlists.iter().chain(&report.tracks) {
            if let MutationReport::Failed { ticket, message } = report {
                println!("write {ticket} failed: {message}");
            }
        }

        self.sidebar.set_len(self.session.playlists().len());
    }

    /// One-line summary of the session
    pub fn render(&self) -> String {
        let engine = self.session.engine();
        let now_playing = engine.current_track().map_or_else(
            || "nothing playing".to_string(),
            |track| {
                format!(
                    "{} {} - {} ({})",
                    if engine.is_playing() { ">" } else { "||" },
                    track.name,
                    track.artist,
                    track.display_duration()
                )
            },
        );

        let navigation = self.session.navigation();
        let active = navigation.active_panel();
        let focus = if self.body_focused {
            "page".to_string()
        } else {
            format!("{active} cursor {:?}", navigation.cursor(active))
        };
        format!(
            "{now_playing} | vol {}{} | {focus} | {} playlists, {} in view",
            engine.volume(),
            if engine.is_muted() { " (muted)" } else { "" },
            self.session.playlists().len(),
            self.view.len()
        )
    }

    pub fn shutdown(&mut self) {
        self.session.end();
        self.pump();
    }
}
