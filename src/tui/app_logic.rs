use super::app_state::{Pane, ParentItem, parent_items};
use crate::api::Carpeta;
use crate::controller::{CascadeController, CascadeState, FetchTicket};
use crossterm::event::{KeyCode, KeyEvent};

pub struct TuiApp {
    pub(super) parent_items: Vec<ParentItem>,
    pub(super) parent_idx: usize,
    pub(super) controller: CascadeController,
    pub(super) carpeta_idx: usize,
    pub(super) pane: Pane,
    pub(super) quit: bool,
    pub(super) confirmed: bool,
    pub(super) numeral_scroll: usize,
    pub(super) carpeta_scroll: usize,
    pub(super) numeral_viewport_height: usize,
    pub(super) carpeta_viewport_height: usize,
    // Tickets issued but not yet handed to a fetch worker. Drained by the
    // run loop each iteration.
    pending_tickets: Vec<FetchTicket>,
}

impl TuiApp {
    /// `initial_numeral` reproduces edit mode: the carpeta list is fetched
    /// before the first keystroke. `remembered_carpeta` is re-selected after
    /// any fetch that still contains it.
    pub fn new(initial_numeral: Option<u32>, remembered_carpeta: Option<u64>) -> Self {
        let parent_items = parent_items();
        let parent_idx = initial_numeral
            .and_then(|n| parent_items.iter().position(|item| item.value == Some(n)))
            .unwrap_or(0);

        let mut controller = CascadeController::new(remembered_carpeta);
        let mut pending_tickets = Vec::new();
        if let Some(numeral) = parent_items[parent_idx].value {
            if let Some(ticket) = controller.on_parent_change(Some(numeral)) {
                pending_tickets.push(ticket);
            }
        }

        TuiApp {
            parent_items,
            parent_idx,
            controller,
            carpeta_idx: 0,
            pane: Pane::Numerales,
            quit: false,
            confirmed: false,
            numeral_scroll: 0,
            carpeta_scroll: 0,
            numeral_viewport_height: 0,
            carpeta_viewport_height: 0,
            pending_tickets,
        }
    }

    pub(super) fn take_pending_tickets(&mut self) -> Vec<FetchTicket> {
        std::mem::take(&mut self.pending_tickets)
    }

    pub(super) fn handle_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('y') => {
                self.confirmed = true;
                self.quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char(' ') | KeyCode::Enter => self.activate_current_row(),
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => self.switch_pane(),
            KeyCode::Char('r') => self.refresh_carpetas(),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: i32) {
        match self.pane {
            Pane::Numerales => {
                let len = self.parent_items.len() as i32;
                self.parent_idx = (self.parent_idx as i32 + delta).rem_euclid(len) as usize;
            }
            Pane::Carpetas => {
                let len = self.controller.option_rows().len() as i32;
                self.carpeta_idx = (self.carpeta_idx as i32 + delta).rem_euclid(len) as usize;
            }
        }
    }

    fn activate_current_row(&mut self) {
        match self.pane {
            Pane::Numerales => self.commit_parent(),
            Pane::Carpetas => {
                let rows = self.controller.option_rows();
                if let Some((id, _)) = rows.get(self.carpeta_idx) {
                    self.controller.select(*id);
                }
            }
        }
    }

    /// Apply the highlighted numeral as the new parent value. Empty choice
    /// disables the carpeta pane; anything else issues a fetch.
    fn commit_parent(&mut self) {
        let value = self.parent_items[self.parent_idx].value;
        if let Some(ticket) = self.controller.on_parent_change(value) {
            self.pending_tickets.push(ticket);
        }
        self.carpeta_idx = 0;
        self.carpeta_scroll = 0;
    }

    fn switch_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Numerales if self.controller.state() == CascadeState::Enabled => Pane::Carpetas,
            Pane::Numerales => Pane::Numerales,
            Pane::Carpetas => Pane::Numerales,
        };
    }

    fn refresh_carpetas(&mut self) {
        if let Some(ticket) = self.controller.refresh() {
            self.pending_tickets.push(ticket);
        }
    }

    /// Resolve a worker result. Stale tickets are dropped by the controller;
    /// the highlight is clamped because the row count may have changed.
    pub(super) fn apply_fetch_outcome(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Carpeta>, String>,
    ) {
        if !self.controller.apply_fetch(ticket, result) {
            return;
        }
        let rows = self.controller.option_rows();
        // Follow the restored selection if there is one.
        if let Some(selected) = self.controller.selected() {
            if let Some(pos) = rows.iter().position(|(id, _)| *id == Some(selected)) {
                self.carpeta_idx = pos;
            }
        }
        if self.carpeta_idx >= rows.len() {
            self.carpeta_idx = 0;
        }
    }

    pub(super) fn ensure_numeral_visible(&mut self) {
        self.numeral_scroll = scroll_for(
            self.parent_idx,
            self.numeral_scroll,
            self.numeral_viewport_height,
            self.parent_items.len(),
        );
    }

    pub(super) fn ensure_carpeta_visible(&mut self) {
        self.carpeta_scroll = scroll_for(
            self.carpeta_idx,
            self.carpeta_scroll,
            self.carpeta_viewport_height,
            self.controller.option_rows().len(),
        );
    }

    pub(super) fn confirmed_selection(&self) -> Option<Carpeta> {
        self.controller.selected_carpeta().cloned()
    }
}

/// Keep `idx` inside the viewport window starting at `scroll`.
fn scroll_for(idx: usize, scroll: usize, viewport: usize, total: usize) -> usize {
    if viewport == 0 || total <= viewport {
        return 0;
    }
    let mut scroll = scroll;
    if idx < scroll {
        scroll = idx;
    } else if idx >= scroll + viewport {
        scroll = idx + 1 - viewport;
    }
    scroll.min(total - viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn carpeta(id: u64, ruta: &str) -> Carpeta {
        Carpeta {
            id,
            nombre: ruta.to_string(),
            ruta_completa: ruta.to_string(),
            nivel: 0,
        }
    }

    #[test]
    fn test_starts_disabled_without_initial_numeral() {
        let mut app = TuiApp::new(None, None);
        assert_eq!(app.controller.state(), CascadeState::Disabled);
        assert!(app.take_pending_tickets().is_empty());
    }

    #[test]
    fn test_initial_numeral_fetches_immediately() {
        let mut app = TuiApp::new(Some(7), None);
        assert_eq!(app.controller.state(), CascadeState::Enabled);
        let tickets = app.take_pending_tickets();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].numeral_id, 7);
        // Highlight sits on the preselected numeral (row 0 is the empty choice).
        assert_eq!(app.parent_items[app.parent_idx].value, Some(7));
    }

    #[test]
    fn test_committing_numeral_issues_ticket() {
        let mut app = TuiApp::new(None, None);
        app.handle_key(key(KeyCode::Down)); // onto numeral 1
        app.handle_key(key(KeyCode::Enter));
        let tickets = app.take_pending_tickets();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].numeral_id, 1);
        assert_eq!(app.controller.state(), CascadeState::Enabled);
    }

    #[test]
    fn test_committing_empty_choice_disables_without_fetch() {
        let mut app = TuiApp::new(Some(3), None);
        let ticket = app.take_pending_tickets().remove(0);
        app.apply_fetch_outcome(ticket, Ok(vec![carpeta(1, "2024")]));
        assert_eq!(app.controller.option_rows().len(), 2);

        app.parent_idx = 0;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.controller.state(), CascadeState::Disabled);
        assert_eq!(app.controller.option_rows().len(), 1);
        assert!(app.take_pending_tickets().is_empty());
    }

    #[test]
    fn test_tab_into_carpetas_only_when_enabled() {
        let mut app = TuiApp::new(None, None);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.pane, Pane::Numerales);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.pane, Pane::Carpetas);
    }

    #[test]
    fn test_selecting_carpeta_row() {
        let mut app = TuiApp::new(Some(3), Some(999));
        let ticket = app.take_pending_tickets().remove(0);
        app.apply_fetch_outcome(ticket, Ok(vec![carpeta(10, "2025"), carpeta(11, "2024")]));
        // Remembered id 999 is gone, so nothing is selected yet.
        assert_eq!(app.controller.selected(), None);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Down)); // row 1 = first carpeta
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.controller.selected(), Some(10));
        assert_eq!(app.confirmed_selection().unwrap().id, 10);
    }

    #[test]
    fn test_restored_selection_moves_highlight() {
        let mut app = TuiApp::new(Some(3), Some(11));
        let ticket = app.take_pending_tickets().remove(0);
        app.apply_fetch_outcome(ticket, Ok(vec![carpeta(10, "2025"), carpeta(11, "2024")]));
        assert_eq!(app.controller.selected(), Some(11));
        assert_eq!(app.carpeta_idx, 2); // placeholder, 2025, -> 2024
    }

    #[test]
    fn test_stale_outcome_keeps_highlight_sane() {
        let mut app = TuiApp::new(Some(5), None);
        let stale = app.take_pending_tickets().remove(0);
        // User clears the numeral before the fetch for 5 lands.
        app.parent_idx = 0;
        app.handle_key(key(KeyCode::Enter));

        app.apply_fetch_outcome(stale, Ok(vec![carpeta(1, "2024"), carpeta(2, "2023")]));
        assert_eq!(app.controller.state(), CascadeState::Disabled);
        assert_eq!(app.controller.option_rows().len(), 1);
        assert_eq!(app.carpeta_idx, 0);
    }

    #[test]
    fn test_refresh_reissues_fetch() {
        let mut app = TuiApp::new(Some(3), None);
        let first = app.take_pending_tickets().remove(0);
        app.apply_fetch_outcome(first, Ok(vec![carpeta(1, "2024")]));

        app.handle_key(key(KeyCode::Char('r')));
        let tickets = app.take_pending_tickets();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].numeral_id, 3);
        assert!(tickets[0].generation > first.generation);
    }

    #[test]
    fn test_scroll_for_windowing() {
        assert_eq!(scroll_for(0, 0, 5, 3), 0);
        assert_eq!(scroll_for(7, 0, 5, 30), 3);
        assert_eq!(scroll_for(2, 3, 5, 30), 2);
        assert_eq!(scroll_for(29, 0, 5, 30), 25);
    }
}
