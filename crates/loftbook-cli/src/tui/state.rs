//! Client-side table state and background sync
//!
//! The app owns the single mutable row sequence. Every mutation mirrors
//! to the on-device cache immediately; admin sessions also arm a
//! debounced remote save so rapid keystrokes collapse into one write.
//! Read-only sessions never arm the timer.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot};

use loftbook_core::cache::SkillsCache;
use loftbook_core::columns::{ColumnConfig, ColumnKind, DEFAULT_COLUMNS};
use loftbook_core::constants::timing::{SAVED_LINGER, SAVE_DEBOUNCE};
use loftbook_core::rows::{seed_rows, SkillRow};
use loftbook_core::table::{SaveStatus, TableState};

use crate::client::ApiClient;
use crate::tui::popups::{FilterPopup, LoginPopup};

/// Apparatus navigation tabs; index 0 shows every apparatus.
pub const APPARATUS_TABS: &[&str] = &["All", "Trapeze", "Hoop", "Silks", "Pole"];

const READ_ONLY_HINT: &str = "Read-only - press u to unlock editing";

/// What the main key handler is currently driving.
pub enum Mode {
    Browse,
    /// In-place cell editor. `buffer` holds raw text for text and number
    /// columns; select columns cycle `option` instead (0 = empty).
    Edit { buffer: String, option: usize },
}

/// Background task results delivered to the event loop.
#[derive(Default)]
struct AsyncChannels {
    remote_rows: Option<oneshot::Receiver<Option<Vec<SkillRow>>>>,
    admin_status: Option<oneshot::Receiver<bool>>,
    login_result: Option<oneshot::Receiver<Result<bool, String>>>,
}

pub struct App {
    pub client: Arc<ApiClient>,
    pub cache: SkillsCache,
    pub table: TableState,
    pub is_admin: bool,
    pub mode: Mode,
    /// Position within the visible (filtered) rows.
    pub cursor_row: usize,
    /// Column index; `columns().len()` is the trailing Actions column.
    pub cursor_col: usize,
    pub apparatus_tab: usize,
    pub filter_popup: Option<FilterPopup>,
    pub login_popup: Option<LoginPopup>,
    pub status_line: Option<String>,
    pub should_quit: bool,
    save_deadline: Option<Instant>,
    saved_revert_at: Option<Instant>,
    channels: AsyncChannels,
    save_tx: mpsc::UnboundedSender<Result<(), String>>,
    save_rx: mpsc::UnboundedReceiver<Result<(), String>>,
}

impl App {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self::with_cache(client, SkillsCache::new())
    }

    /// Seed from the on-device cache when it has rows, else from the
    /// built-in starter dataset.
    pub fn with_cache(client: Arc<ApiClient>, cache: SkillsCache) -> Self {
        let rows = cache.load().unwrap_or_else(seed_rows);
        let (save_tx, save_rx) = mpsc::unbounded_channel();

        Self {
            client,
            cache,
            table: TableState::new(DEFAULT_COLUMNS, rows),
            is_admin: false,
            mode: Mode::Browse,
            cursor_row: 0,
            cursor_col: 0,
            apparatus_tab: 0,
            filter_popup: None,
            login_popup: None,
            status_line: None,
            should_quit: false,
            save_deadline: None,
            saved_revert_at: None,
            channels: AsyncChannels::default(),
            save_tx,
            save_rx,
        }
    }

    pub fn columns(&self) -> &'static [ColumnConfig] {
        self.table.columns()
    }

    /// Kick off the remote fetch and the admin-status check. Both are
    /// fire-and-forget: no retry, and a failure leaves local state alone.
    pub fn start_background_sync(&mut self) {
        let (rows_tx, rows_rx) = oneshot::channel();
        let client = self.client.clone();
        tokio::spawn(async move {
            let _ = rows_tx.send(client.fetch_skills().await.ok());
        });
        self.channels.remote_rows = Some(rows_rx);

        let (admin_tx, admin_rx) = oneshot::channel();
        let client = self.client.clone();
        tokio::spawn(async move {
            let _ = admin_tx.send(client.admin_status().await);
        });
        self.channels.admin_status = Some(admin_rx);
    }

    /// Timer tick: drain background results, fire the debounced save,
    /// revert a lingering "Saved" back to idle.
    pub fn on_tick(&mut self) {
        self.poll_channels();

        if let Some(deadline) = self.save_deadline {
            if Instant::now() >= deadline {
                self.save_deadline = None;
                self.spawn_save();
            }
        }

        if let Some(revert) = self.saved_revert_at {
            if Instant::now() >= revert {
                self.saved_revert_at = None;
                if self.table.save_status() == SaveStatus::Saved {
                    self.table.set_save_status(SaveStatus::Idle);
                }
            }
        }
    }

    fn poll_channels(&mut self) {
        use tokio::sync::oneshot::error::TryRecvError;

        if let Some(rx) = &mut self.channels.remote_rows {
            match rx.try_recv() {
                Ok(result) => {
                    self.channels.remote_rows = None;
                    // Remote wins only when it actually has rows; a failed
                    // or empty fetch leaves the local seed standing.
                    if let Some(rows) = result {
                        if !rows.is_empty() {
                            self.table.replace_rows(rows);
                            self.cache.save(self.table.rows());
                            self.clamp_cursor();
                        }
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => self.channels.remote_rows = None,
            }
        }

        if let Some(rx) = &mut self.channels.admin_status {
            match rx.try_recv() {
                Ok(is_admin) => {
                    self.channels.admin_status = None;
                    self.is_admin = is_admin;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => self.channels.admin_status = None,
            }
        }

        if let Some(rx) = &mut self.channels.login_result {
            match rx.try_recv() {
                Ok(result) => {
                    self.channels.login_result = None;
                    match result {
                        Ok(true) => {
                            self.is_admin = true;
                            self.login_popup = None;
                            self.set_status("Editing unlocked");
                        }
                        Ok(false) => {
                            if let Some(popup) = &mut self.login_popup {
                                popup.busy = false;
                                popup.error = Some("Session check failed".to_string());
                            }
                        }
                        Err(message) => {
                            if let Some(popup) = &mut self.login_popup {
                                popup.busy = false;
                                popup.error = Some(message);
                            }
                        }
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => self.channels.login_result = None,
            }
        }

        while let Ok(result) = self.save_rx.try_recv() {
            // A newer edit re-armed the timer while this save was in
            // flight; keep showing "Saving" for the pending write.
            let pending = self.save_deadline.is_some();
            match result {
                Ok(()) => {
                    if !pending {
                        self.table.set_save_status(SaveStatus::Saved);
                        self.saved_revert_at = Some(Instant::now() + SAVED_LINGER);
                    }
                }
                Err(message) => {
                    tracing::warn!("Save failed: {message}");
                    if !pending {
                        self.table.set_save_status(SaveStatus::Error);
                    }
                }
            }
        }
    }

    // --- cursor and navigation ---

    pub fn visible(&self) -> Vec<usize> {
        self.table.visible_rows()
    }

    /// Underlying index of the row under the cursor.
    pub fn current_row(&self) -> Option<usize> {
        self.visible().get(self.cursor_row).copied()
    }

    pub fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        let visible = self.visible().len();
        if visible > 0 {
            let row = self.cursor_row as isize + row_delta;
            self.cursor_row = row.clamp(0, visible as isize - 1) as usize;
        }
        let max_col = self.columns().len() as isize;
        let col = self.cursor_col as isize + col_delta;
        self.cursor_col = col.clamp(0, max_col) as usize;
    }

    pub(crate) fn clamp_cursor(&mut self) {
        let visible = self.visible().len();
        if visible == 0 {
            self.cursor_row = 0;
        } else if self.cursor_row >= visible {
            self.cursor_row = visible - 1;
        }
        let max_col = self.columns().len();
        if self.cursor_col > max_col {
            self.cursor_col = max_col;
        }
    }

    // --- apparatus tabs and filters ---

    pub fn select_tab(&mut self, tab: usize) {
        self.apparatus_tab = tab % APPARATUS_TABS.len();
        let value = if self.apparatus_tab == 0 {
            ""
        } else {
            APPARATUS_TABS[self.apparatus_tab]
        };
        self.table.set_apparatus_filter(value);
        self.clamp_cursor();
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.apparatus_tab + 1);
    }

    pub fn prev_tab(&mut self) {
        self.select_tab((self.apparatus_tab + APPARATUS_TABS.len() - 1) % APPARATUS_TABS.len());
    }

    pub fn clear_all_filters(&mut self) {
        self.table.clear_filters();
        self.apparatus_tab = 0;
        self.clamp_cursor();
    }

    // --- editing ---

    pub fn begin_edit(&mut self) {
        if !self.is_admin {
            self.set_status(READ_ONLY_HINT);
            return;
        }
        let Some(row) = self.current_row() else {
            return;
        };
        let columns = self.columns();
        if self.cursor_col >= columns.len() {
            // Enter on the Actions column is the delete control.
            self.delete_current_row();
            return;
        }

        let col = &columns[self.cursor_col];
        let current = self.table.rows()[row].text(col.key);
        self.mode = match col.kind {
            ColumnKind::Select(options) => {
                let option = options
                    .iter()
                    .position(|&candidate| candidate == current)
                    .map(|index| index + 1)
                    .unwrap_or(0);
                Mode::Edit {
                    buffer: current,
                    option,
                }
            }
            _ => Mode::Edit {
                buffer: current,
                option: 0,
            },
        };
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Browse;
    }

    pub fn commit_edit(&mut self) {
        let Mode::Edit { buffer, option } = std::mem::replace(&mut self.mode, Mode::Browse) else {
            return;
        };
        let Some(row) = self.current_row() else {
            return;
        };
        let columns = self.columns();
        if self.cursor_col >= columns.len() {
            return;
        }

        let col = &columns[self.cursor_col];
        let raw = match col.kind {
            ColumnKind::Select(options) => {
                if option == 0 {
                    String::new()
                } else {
                    options[option - 1].to_string()
                }
            }
            _ => buffer,
        };
        self.table.edit_cell(row, col, &raw);
        self.after_mutation();
    }

    /// Cycle the option of an in-progress select edit; 0 is the empty
    /// choice.
    pub fn cycle_option(&mut self, delta: isize) {
        let columns = self.columns();
        if self.cursor_col >= columns.len() {
            return;
        }
        let ColumnKind::Select(options) = columns[self.cursor_col].kind else {
            return;
        };
        if let Mode::Edit { option, .. } = &mut self.mode {
            let count = options.len() as isize + 1;
            *option = (*option as isize + delta).rem_euclid(count) as usize;
        }
    }

    // --- row operations ---

    pub fn add_row(&mut self) {
        if !self.is_admin {
            self.set_status(READ_ONLY_HINT);
            return;
        }
        let index = self.table.add_row();
        self.after_mutation();
        // Jump to the new row when the current filters let it show.
        if let Some(position) = self.visible().iter().position(|&i| i == index) {
            self.cursor_row = position;
        }
    }

    pub fn delete_current_row(&mut self) {
        if !self.is_admin {
            self.set_status(READ_ONLY_HINT);
            return;
        }
        let Some(row) = self.current_row() else {
            return;
        };
        self.table.delete_row(row);
        self.after_mutation();
        self.clamp_cursor();
    }

    /// Replace the table with the starter dataset and drop the cache.
    pub fn reset_to_seed(&mut self) {
        if !self.is_admin {
            self.set_status(READ_ONLY_HINT);
            return;
        }
        self.table.replace_rows(seed_rows());
        self.cache.clear();
        self.after_mutation();
        self.clamp_cursor();
    }

    // --- persistence ---

    /// Runs after every change to the row sequence: mirror to the cache
    /// synchronously, and (admin only) re-arm the save debounce.
    fn after_mutation(&mut self) {
        self.cache.save(self.table.rows());
        if self.is_admin {
            self.save_deadline = Some(Instant::now() + SAVE_DEBOUNCE);
            self.table.set_save_status(SaveStatus::Saving);
        }
    }

    /// Push the current rows in the background. A previous in-flight
    /// save is not awaited or cancelled; the last response to land wins.
    fn spawn_save(&mut self) {
        self.table.set_save_status(SaveStatus::Saving);
        let rows = self.table.rows().to_vec();
        let client = self.client.clone();
        let tx = self.save_tx.clone();
        tokio::spawn(async move {
            let result = client.save_skills(&rows).await.map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
    }

    // --- session ---

    pub fn open_login(&mut self) {
        self.login_popup = Some(LoginPopup::default());
    }

    pub fn submit_login(&mut self, password: String) {
        if let Some(popup) = &mut self.login_popup {
            popup.busy = true;
            popup.error = None;
        }
        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client.login(&password).await.map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
        self.channels.login_result = Some(rx);
    }

    pub fn logout(&mut self) {
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(err) = client.logout().await {
                tracing::warn!("Logout request failed: {err}");
            }
        });
        // Drop edit mode right away; the cookie expiry is best-effort.
        self.is_admin = false;
        self.save_deadline = None;
        self.table.set_save_status(SaveStatus::Idle);
        self.mode = Mode::Browse;
        self.set_status("Editing locked");
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_line = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loftbook_core::columns::column;
    use serde_json::json;

    fn app(dir: &tempfile::TempDir) -> App {
        let client = Arc::new(ApiClient::new("http://localhost:0").unwrap());
        App::with_cache(client, SkillsCache::at(dir.path().join("cache.json")))
    }

    #[test]
    fn read_only_sessions_never_arm_the_save_timer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let rows_before = app.table.rows().len();

        app.add_row();
        app.begin_edit();
        app.delete_current_row();

        assert_eq!(app.table.rows().len(), rows_before);
        assert!(matches!(app.mode, Mode::Browse));
        assert!(app.save_deadline.is_none());
        assert_eq!(app.table.save_status(), SaveStatus::Idle);
        assert!(app.status_line.is_some());
    }

    #[test]
    fn admin_mutations_mirror_to_cache_and_arm_the_debounce() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.is_admin = true;

        app.add_row();

        assert!(app.save_deadline.is_some());
        assert_eq!(app.table.save_status(), SaveStatus::Saving);
        assert_eq!(app.cache.load(), Some(app.table.rows().to_vec()));
    }

    #[test]
    fn apparatus_tabs_drive_the_apparatus_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let total = app.table.rows().len();

        let hoop = APPARATUS_TABS.iter().position(|&t| t == "Hoop").unwrap();
        app.select_tab(hoop);
        let visible = app.visible();
        assert!(!visible.is_empty());
        assert!(visible
            .iter()
            .all(|&i| app.table.rows()[i].text("apparatus") == "Hoop"));

        app.select_tab(0);
        assert_eq!(app.visible().len(), total);
    }

    #[test]
    fn select_edits_cycle_through_the_option_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.is_admin = true;

        // Cursor starts on the apparatus cell of the first row ("Hoop").
        app.begin_edit();
        app.cycle_option(1);
        app.commit_edit();

        assert_eq!(app.table.rows()[0].get("apparatus"), Some(&json!("Trapeze")));
        assert_eq!(app.table.save_status(), SaveStatus::Saving);
    }

    #[test]
    fn number_edits_commit_through_the_clamp() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.is_admin = true;

        let confidence = app
            .columns()
            .iter()
            .position(|c| c.key == column("confidence").unwrap().key)
            .unwrap();
        app.cursor_col = confidence;
        app.begin_edit();
        if let Mode::Edit { buffer, .. } = &mut app.mode {
            *buffer = "12".to_string();
        }
        app.commit_edit();

        assert_eq!(app.table.rows()[0].get("confidence"), Some(&json!(5)));
    }

    #[test]
    fn deleting_under_a_filter_targets_the_visible_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.is_admin = true;
        let total = app.table.rows().len();

        let silks = APPARATUS_TABS.iter().position(|&t| t == "Silks").unwrap();
        app.select_tab(silks);
        app.cursor_row = 0;
        let target = app.current_row().unwrap();
        let target_skill = app.table.rows()[target].text("skill");

        app.delete_current_row();

        assert_eq!(app.table.rows().len(), total - 1);
        assert!(app
            .table
            .rows()
            .iter()
            .all(|r| r.text("skill") != target_skill));
    }

    #[test]
    fn reset_restores_the_seed_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.is_admin = true;

        app.add_row();
        app.reset_to_seed();

        assert_eq!(app.table.rows(), seed_rows().as_slice());
    }
}
