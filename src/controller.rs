//! The cascading selector itself, kept free of any I/O.
//!
//! The dependent (carpeta) selector has exactly two states: `Disabled` while
//! no numeral is chosen, `Enabled` otherwise. Changing the numeral hands back
//! a [`FetchTicket`]; whoever performs the fetch returns it together with the
//! outcome, and the controller discards the result if a newer parent change
//! superseded it in the meantime. That replaces the "last response wins by
//! arrival time" race of the old admin script with "last request wins".

use crate::api::Carpeta;

/// Sentinel "no selection" entry, always the first dependent option.
pub const PLACEHOLDER_LABEL: &str = "---------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeState {
    Disabled,
    Enabled,
}

/// Identifies one issued fetch. Stamped with the parent value it was issued
/// for so a late result can be checked against the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub numeral_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    /// Last fetch for the current parent failed; message stays visible
    /// until the next fetch replaces it.
    Failed(String),
}

pub struct CascadeController {
    state: CascadeState,
    generation: u64,
    parent: Option<u32>,
    options: Vec<Carpeta>,
    selected: Option<u64>,
    /// Last carpeta id the user (or the record being edited) chose.
    /// Re-selected after a fetch when still present among the options.
    remembered: Option<u64>,
    status: FetchStatus,
}

impl CascadeController {
    pub fn new(remembered: Option<u64>) -> Self {
        CascadeController {
            state: CascadeState::Disabled,
            generation: 0,
            parent: None,
            options: Vec::new(),
            selected: None,
            remembered,
            status: FetchStatus::Idle,
        }
    }

    pub fn state(&self) -> CascadeState {
        self.state
    }

    pub fn parent(&self) -> Option<u32> {
        self.parent
    }

    pub fn options(&self) -> &[Carpeta] {
        &self.options
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn selected_carpeta(&self) -> Option<&Carpeta> {
        self.selected
            .and_then(|id| self.options.iter().find(|c| c.id == id))
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// The dependent option list as rendered: placeholder first, then the
    /// fetched records in server order.
    pub fn option_rows(&self) -> Vec<(Option<u64>, String)> {
        let mut rows = Vec::with_capacity(self.options.len() + 1);
        rows.push((None, PLACEHOLDER_LABEL.to_string()));
        for carpeta in &self.options {
            rows.push((Some(carpeta.id), carpeta.ruta_completa.clone()));
        }
        rows
    }

    /// Parent value changed. Empty clears and disables without a fetch;
    /// non-empty enables and issues a ticket for the caller to resolve.
    /// An initial non-empty value (edit mode) goes through here too.
    pub fn on_parent_change(&mut self, parent: Option<u32>) -> Option<FetchTicket> {
        self.generation += 1;
        self.parent = parent;
        self.options.clear();
        self.selected = None;

        match parent {
            None => {
                self.state = CascadeState::Disabled;
                self.status = FetchStatus::Idle;
                None
            }
            Some(numeral_id) => {
                self.state = CascadeState::Enabled;
                self.status = FetchStatus::Loading;
                Some(FetchTicket {
                    generation: self.generation,
                    numeral_id,
                })
            }
        }
    }

    /// Re-issue the fetch for the current parent, if any.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.on_parent_change(self.parent)
    }

    /// Resolve a ticket. Returns false (and changes nothing) when the ticket
    /// is stale: a newer parent change bumped the generation, or the parent
    /// no longer matches the numeral the fetch was issued for.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Carpeta>, String>,
    ) -> bool {
        if ticket.generation != self.generation || self.parent != Some(ticket.numeral_id) {
            return false;
        }

        match result {
            Ok(carpetas) => {
                self.options = carpetas;
                self.status = FetchStatus::Idle;
                let remembered = self.remembered;
                self.selected = remembered.filter(|id| self.options.iter().any(|c| c.id == *id));
            }
            Err(message) => {
                // Enabled but empty-of-data: safe, never stale.
                self.options.clear();
                self.selected = None;
                self.status = FetchStatus::Failed(message);
            }
        }
        true
    }

    /// Select a carpeta by id (None selects the placeholder). Returns false
    /// when the id is not among the current options.
    pub fn select(&mut self, id: Option<u64>) -> bool {
        match id {
            None => {
                self.selected = None;
                self.remembered = None;
                true
            }
            Some(id) => {
                if self.options.iter().any(|c| c.id == id) {
                    self.selected = Some(id);
                    self.remembered = Some(id);
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carpeta(id: u64, ruta: &str, nivel: u32) -> Carpeta {
        Carpeta {
            id,
            nombre: ruta.rsplit(" / ").next().unwrap_or(ruta).to_string(),
            ruta_completa: ruta.to_string(),
            nivel,
        }
    }

    fn sample() -> Vec<Carpeta> {
        vec![
            carpeta(31, "2025", 0),
            carpeta(14, "2024 / Febrero", 1),
            carpeta(12, "2024 / Enero / Actas", 2),
        ]
    }

    #[test]
    fn test_starts_disabled_with_placeholder_only() {
        let ctl = CascadeController::new(None);
        assert_eq!(ctl.state(), CascadeState::Disabled);
        let rows = ctl.option_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], (None, PLACEHOLDER_LABEL.to_string()));
    }

    #[test]
    fn test_empty_parent_clears_and_disables_without_fetch() {
        let mut ctl = CascadeController::new(None);
        let ticket = ctl.on_parent_change(Some(3)).unwrap();
        assert!(ctl.apply_fetch(ticket, Ok(sample())));

        assert!(ctl.on_parent_change(None).is_none());
        assert_eq!(ctl.state(), CascadeState::Disabled);
        assert_eq!(ctl.option_rows().len(), 1);
        assert_eq!(*ctl.status(), FetchStatus::Idle);
    }

    #[test]
    fn test_successful_fetch_gives_n_plus_one_rows_in_server_order() {
        let mut ctl = CascadeController::new(None);
        let ticket = ctl.on_parent_change(Some(3)).unwrap();
        assert_eq!(ctl.state(), CascadeState::Enabled);
        assert_eq!(*ctl.status(), FetchStatus::Loading);

        assert!(ctl.apply_fetch(ticket, Ok(sample())));
        let rows = ctl.option_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].0, None);
        assert_eq!(rows[1], (Some(31), "2025".to_string()));
        assert_eq!(rows[2], (Some(14), "2024 / Febrero".to_string()));
        assert_eq!(rows[3], (Some(12), "2024 / Enero / Actas".to_string()));
        assert_eq!(*ctl.status(), FetchStatus::Idle);
    }

    #[test]
    fn test_reselecting_same_parent_is_idempotent() {
        let mut ctl = CascadeController::new(None);
        let t1 = ctl.on_parent_change(Some(3)).unwrap();
        assert!(ctl.apply_fetch(t1, Ok(sample())));
        let first = ctl.option_rows();

        let t2 = ctl.on_parent_change(Some(3)).unwrap();
        assert!(t2.generation > t1.generation);
        assert!(ctl.apply_fetch(t2, Ok(sample())));
        assert_eq!(ctl.option_rows(), first);
    }

    #[test]
    fn test_remembered_selection_is_restored() {
        let mut ctl = CascadeController::new(Some(14));
        let ticket = ctl.on_parent_change(Some(3)).unwrap();
        assert!(ctl.apply_fetch(ticket, Ok(sample())));
        assert_eq!(ctl.selected(), Some(14));
        assert_eq!(ctl.selected_carpeta().unwrap().ruta_completa, "2024 / Febrero");
    }

    #[test]
    fn test_remembered_selection_absent_falls_back_to_placeholder() {
        let mut ctl = CascadeController::new(Some(999));
        let ticket = ctl.on_parent_change(Some(3)).unwrap();
        assert!(ctl.apply_fetch(ticket, Ok(sample())));
        assert_eq!(ctl.selected(), None);
    }

    #[test]
    fn test_user_selection_survives_refresh() {
        let mut ctl = CascadeController::new(None);
        let t1 = ctl.on_parent_change(Some(3)).unwrap();
        assert!(ctl.apply_fetch(t1, Ok(sample())));
        assert!(ctl.select(Some(12)));

        let t2 = ctl.refresh().unwrap();
        assert!(ctl.apply_fetch(t2, Ok(sample())));
        assert_eq!(ctl.selected(), Some(12));
    }

    #[test]
    fn test_select_unknown_id_is_rejected() {
        let mut ctl = CascadeController::new(None);
        let ticket = ctl.on_parent_change(Some(3)).unwrap();
        assert!(ctl.apply_fetch(ticket, Ok(sample())));
        assert!(!ctl.select(Some(999)));
        assert_eq!(ctl.selected(), None);
    }

    #[test]
    fn test_fetch_failure_leaves_enabled_placeholder_only() {
        let mut ctl = CascadeController::new(None);
        let ticket = ctl.on_parent_change(Some(5)).unwrap();
        assert!(ctl.apply_fetch(ticket, Err("fetch failed (500)".to_string())));

        assert_eq!(ctl.state(), CascadeState::Enabled);
        assert_eq!(ctl.option_rows().len(), 1);
        assert_eq!(
            *ctl.status(),
            FetchStatus::Failed("fetch failed (500)".to_string())
        );
    }

    #[test]
    fn test_late_result_after_parent_cleared_is_discarded() {
        let mut ctl = CascadeController::new(None);
        let ticket = ctl.on_parent_change(Some(5)).unwrap();
        // Parent goes back to empty before the fetch for 5 resolves.
        assert!(ctl.on_parent_change(None).is_none());

        assert!(!ctl.apply_fetch(ticket, Ok(sample())));
        assert_eq!(ctl.state(), CascadeState::Disabled);
        assert_eq!(ctl.option_rows().len(), 1);
    }

    #[test]
    fn test_superseded_fetch_is_discarded_newer_applies() {
        let mut ctl = CascadeController::new(None);
        let old = ctl.on_parent_change(Some(5)).unwrap();
        let new = ctl.on_parent_change(Some(6)).unwrap();

        assert!(!ctl.apply_fetch(old, Ok(vec![carpeta(1, "viejo", 0)])));
        assert_eq!(*ctl.status(), FetchStatus::Loading);

        assert!(ctl.apply_fetch(new, Ok(sample())));
        assert_eq!(ctl.parent(), Some(6));
        assert_eq!(ctl.option_rows().len(), 4);
    }

    #[test]
    fn test_stale_failure_does_not_overwrite_status() {
        let mut ctl = CascadeController::new(None);
        let old = ctl.on_parent_change(Some(5)).unwrap();
        let new = ctl.on_parent_change(Some(6)).unwrap();

        assert!(!ctl.apply_fetch(old, Err("timeout".to_string())));
        assert_eq!(*ctl.status(), FetchStatus::Loading);
        assert!(ctl.apply_fetch(new, Ok(sample())));
        assert_eq!(*ctl.status(), FetchStatus::Idle);
    }
}
