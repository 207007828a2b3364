use std::time::Instant;

use arboard::Clipboard;
use tracing::{info, trace, warn};
use url::Url;

use crate::claims::{
    COLUMNS, Claim, ClaimSet, ClaimStatus, SortDirection, SortKey, detail_url,
};
use crate::domain::{ClaimsError, Config, HELP_TEXT, Message};
use crate::inputter::{InputResult, Inputter};
use crate::ui::{HEADER_HEIGHT, SEARCH_HEIGHT, STATUSLINE_HEIGHT, TABLE_CHROME_HEIGHT};

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    TABLE,
    SEARCH,
    STATUSSELECT,
    POPUP,
}

/// One rendered table row. `status` rides along so the UI can style the
/// status cell as a badge.
#[derive(Clone)]
pub struct RowView {
    pub cells: Vec<String>,
    pub status: ClaimStatus,
}

/// Everything the status selector widget needs. The widget holds no state of
/// its own, it is redrawn from this on every frame.
#[derive(Clone, Copy)]
pub struct SelectorData {
    pub choices: [ClaimStatus; 3],
    pub highlighted: usize,
    pub current: ClaimStatus,
}

// Selector interaction state. The claim is captured by number when the
// selector opens so the commit addresses the record, not a view position.
struct SelectorView {
    claim_number: String,
    current: ClaimStatus,
    highlighted: usize,
}

pub struct UIData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RowView>,
    pub nrows: usize,
    pub total: usize,
    pub selected_row: usize,
    pub selected_column: usize,
    pub abs_selected_row: usize,
    pub link: String,
    pub query: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub show_popup: bool,
    pub popup_message: String,
    pub selector: Option<SelectorData>,
    pub search: InputResult,
    pub active_search: bool,
    pub status_message: String,
    pub last_status_message_update: Instant,
    pub layout: UILayout,
    pub last_update: Instant,
}

impl UIData {
    pub fn empty() -> Self {
        UIData {
            name: String::new(),
            headers: Vec::new(),
            rows: Vec::new(),
            nrows: 0,
            total: 0,
            selected_row: 0,
            selected_column: 0,
            abs_selected_row: 0,
            link: String::new(),
            query: String::new(),
            sort_key: SortKey::ClaimNumber,
            sort_direction: SortDirection::ASCENDING,
            show_popup: false,
            popup_message: String::new(),
            selector: None,
            search: InputResult::default(),
            active_search: false,
            status_message: String::new(),
            last_status_message_update: Instant::now(),
            layout: UILayout::default(),
            last_update: Instant::now(),
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct UILayout {
    pub width: usize,
    pub height: usize,
    pub table_height: usize,
}

impl UILayout {
    pub fn from_values(ui_width: usize, ui_height: usize) -> Self {
        let chrome = HEADER_HEIGHT + SEARCH_HEIGHT + STATUSLINE_HEIGHT + TABLE_CHROME_HEIGHT;
        let table_height = ui_height.saturating_sub(chrome).max(1);
        let layout = UILayout {
            width: ui_width,
            height: ui_height,
            table_height,
        };
        trace!("Build UILayout: {:?}", layout);
        layout
    }
}

pub struct Model {
    detail_base: Url,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    claims: ClaimSet,
    query: String,
    saved_query: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    rows: Vec<usize>, // Mapping of view row index to claim index
    cursor_row: usize,
    offset_row: usize,
    cursor_column: usize,
    selector: Option<SelectorView>,
    input: Inputter,
    last_input: InputResult,
    clipboard: Option<Clipboard>,
    uilayout: UILayout,
    uidata: UIData,
    status_message: String,
    last_status_message_update: Instant,
}

impl Model {
    pub fn init(
        config: &Config,
        claims: ClaimSet,
        ui_width: usize,
        ui_height: usize,
    ) -> Result<Self, ClaimsError> {
        let detail_base = Url::parse(&config.detail_base)?;
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!("Clipboard unavailable: {e:?}");
                None
            }
        };

        let total = claims.len();
        let mut model = Self {
            detail_base,
            status: Status::READY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            claims,
            query: String::new(),
            saved_query: String::new(),
            sort_key: SortKey::ClaimNumber,
            sort_direction: SortDirection::ASCENDING,
            rows: Vec::new(),
            cursor_row: 0,
            offset_row: 0,
            cursor_column: 0,
            selector: None,
            input: Inputter::default(),
            last_input: InputResult::default(),
            clipboard,
            uilayout: UILayout::from_values(ui_width, ui_height),
            uidata: UIData::empty(),
            status_message: String::new(),
            last_status_message_update: Instant::now(),
        };
        model.refresh_view();
        model.set_status_message(format!("Loaded {} claims", total));
        info!("Model ready with {} claims", total);
        Ok(model)
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    // The controller hands keys over unmapped while the search box is open
    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::SEARCH
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    pub fn update(&mut self, message: Message) -> Result<(), ClaimsError> {
        match self.modus {
            Modus::TABLE => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_selection_up(1),
                Message::MoveDown => self.move_selection_down(1),
                Message::MovePageUp => self.move_selection_up(self.uilayout.table_height),
                Message::MovePageDown => self.move_selection_down(self.uilayout.table_height),
                Message::MoveBeginning => self.move_selection_beginning(),
                Message::MoveEnd => self.move_selection_end(),
                Message::MoveLeft => self.move_column_left(),
                Message::MoveRight => self.move_column_right(),
                Message::ToggleSort(key) => self.toggle_sort(key),
                Message::ToggleSortCurrent => self.toggle_sort(COLUMNS[self.cursor_column]),
                Message::Search => self.enter_search(),
                Message::Enter => self.open_status_selector(),
                Message::Exit => self.clear_search(),
                Message::CopyLink => self.copy_claim_link(),
                Message::CopyRow => self.copy_claim_row(),
                Message::NewClaim => {
                    self.set_status_message("New claim is not implemented yet")
                }
                Message::Help => self.show_help(),
                Message::Resize(width, height) => self.ui_resize(width, height),
                _ => (),
            },
            Modus::SEARCH => match message {
                Message::RawKey(key) => self.raw_input(key),
                Message::Resize(width, height) => self.ui_resize(width, height),
                _ => (),
            },
            Modus::STATUSSELECT => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_selector_highlight(-1),
                Message::MoveDown => self.move_selector_highlight(1),
                Message::Enter => self.commit_status_selector(),
                Message::Exit => self.close_status_selector(),
                Message::Resize(width, height) => self.ui_resize(width, height),
                _ => (),
            },
            Modus::POPUP => match message {
                Message::Quit => self.quit(),
                Message::Enter | Message::Exit => self.close_popup(),
                Message::Resize(width, height) => self.ui_resize(width, height),
                _ => (),
            },
        }
        Ok(())
    }

    // -------------------- Control handling functions ---------------------- //

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
        self.uidata.status_message = self.status_message.clone();
        self.uidata.last_status_message_update = self.last_status_message_update;
        self.uidata.last_update = Instant::now();
    }

    fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::ASCENDING;
        }
        self.refresh_view();
        self.set_status_message(format!(
            "Sorted by {} {}",
            key.label(),
            self.sort_direction.indicator()
        ));
    }

    fn enter_search(&mut self) {
        trace!("Entering search mode ...");
        self.previous_modus = self.modus;
        self.modus = Modus::SEARCH;
        self.saved_query = self.query.clone();
        self.input.clear();
        self.input.set(&self.query);
        self.last_input = self.input.get();
        self.update_uidata();
    }

    fn raw_input(&mut self, key: ratatui::crossterm::event::KeyEvent) {
        self.last_input = self.input.read(key);
        // The query tracks the box verbatim, the view narrows while typing
        self.query = self.last_input.input.clone();
        if self.last_input.finished {
            if self.last_input.canceled {
                self.query = self.saved_query.clone();
            }
            self.modus = self.previous_modus;
            self.previous_modus = Modus::SEARCH;
        }
        self.cursor_row = 0;
        self.offset_row = 0;
        self.refresh_view();
    }

    fn clear_search(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refresh_view();
            self.set_status_message("Search cleared");
        }
    }

    fn open_status_selector(&mut self) {
        let Some(claim) = self.selected_claim() else {
            self.set_status_message("No claim selected");
            return;
        };
        let current = claim.status;
        let highlighted = ClaimStatus::ALL
            .iter()
            .position(|&s| s == current)
            .unwrap_or(0);
        self.selector = Some(SelectorView {
            claim_number: claim.claim_number.clone(),
            current,
            highlighted,
        });
        self.previous_modus = self.modus;
        self.modus = Modus::STATUSSELECT;
        self.update_uidata();
    }

    fn move_selector_highlight(&mut self, step: i32) {
        if let Some(selector) = self.selector.as_mut() {
            let n = ClaimStatus::ALL.len() as i32;
            selector.highlighted = ((selector.highlighted as i32 + step).rem_euclid(n)) as usize;
            self.update_uidata();
        }
    }

    fn commit_status_selector(&mut self) {
        if let Some(selector) = self.selector.take() {
            let chosen = ClaimStatus::ALL[selector.highlighted];
            self.claims.update_status(&selector.claim_number, chosen);
            self.modus = self.previous_modus;
            self.previous_modus = Modus::STATUSSELECT;
            self.refresh_view();
            self.set_status_message(format!(
                "Claim {} set to {}",
                selector.claim_number, chosen
            ));
        }
    }

    fn close_status_selector(&mut self) {
        self.selector = None;
        self.modus = self.previous_modus;
        self.previous_modus = Modus::STATUSSELECT;
        self.update_uidata();
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.uidata.popup_message = HELP_TEXT.to_string();
        self.uidata.show_popup = true;
        self.uidata.last_update = Instant::now();
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.modus = self.previous_modus;
        self.previous_modus = Modus::POPUP;
        self.uidata.show_popup = false;
        self.uidata.last_update = Instant::now();
    }

    fn ui_resize(&mut self, width: usize, height: usize) {
        trace!(
            "UI was resized! w:{}->{}, h:{}->{}",
            self.uilayout.width, width, self.uilayout.height, height
        );
        self.uilayout = UILayout::from_values(width, height);
        self.refresh_view();
    }

    fn copy_claim_link(&mut self) {
        let Some(claim) = self.selected_claim() else {
            self.set_status_message("No claim selected");
            return;
        };
        match detail_url(&self.detail_base, &claim.claim_number) {
            Ok(link) => {
                let number = claim.claim_number.clone();
                self.copy_to_clipboard(link);
                self.set_status_message(format!("Copied link for {}", number));
            }
            Err(e) => warn!("Could not build claim link: {e:?}"),
        }
    }

    fn copy_claim_row(&mut self) {
        let Some(claim) = self.selected_claim() else {
            self.set_status_message("No claim selected");
            return;
        };
        let content = COLUMNS
            .iter()
            .map(|&key| Model::wrap_cell_content(claim.field(key)))
            .collect::<Vec<String>>();
        let number = claim.claim_number.clone();
        self.copy_to_clipboard(content.join(","));
        self.set_status_message(format!("Copied row for {}", number));
    }

    fn wrap_cell_content(c: &str) -> String {
        let needs_escaping = c.chars().any(|c| c == '"');
        let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',');
        let mut out = String::from(c);

        if needs_escaping {
            out = out.replace("\"", "\"\"");
        }
        if needs_wrapping {
            out = format!("\"{out}\"");
        }
        out
    }

    fn copy_to_clipboard(&mut self, content: String) {
        trace!("Clipboard content: {}", content);
        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(content) {
                Ok(_) => trace!("Copied content to clipboard."),
                Err(e) => {
                    trace!("Error copying to clipboard: {:?}", e);
                    self.set_status_message("Clipboard copy failed");
                }
            },
            None => self.set_status_message("Clipboard unavailable"),
        }
    }

    // -------------------- Selection handling ---------------------- //

    fn selected_claim(&self) -> Option<&Claim> {
        self.rows
            .get(self.offset_row + self.cursor_row)
            .and_then(|&idx| self.claims.get(idx))
    }

    fn scroll_to(&mut self, abs: usize) {
        let height = self.uilayout.table_height.max(1);
        if abs < self.offset_row {
            self.offset_row = abs;
        } else if abs >= self.offset_row + height {
            self.offset_row = abs + 1 - height;
        }
        self.cursor_row = abs - self.offset_row;
    }

    fn move_selection_up(&mut self, step: usize) {
        if self.rows.is_empty() {
            return;
        }
        let abs = (self.offset_row + self.cursor_row).saturating_sub(step);
        self.scroll_to(abs);
        self.update_uidata();
    }

    fn move_selection_down(&mut self, step: usize) {
        if self.rows.is_empty() {
            return;
        }
        let abs = std::cmp::min(
            self.offset_row + self.cursor_row + step,
            self.rows.len() - 1,
        );
        self.scroll_to(abs);
        self.update_uidata();
    }

    fn move_selection_beginning(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.scroll_to(0);
        self.update_uidata();
    }

    fn move_selection_end(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.scroll_to(self.rows.len() - 1);
        self.update_uidata();
    }

    fn move_column_left(&mut self) {
        self.cursor_column = self.cursor_column.saturating_sub(1);
        self.update_uidata();
    }

    fn move_column_right(&mut self) {
        self.cursor_column = std::cmp::min(self.cursor_column + 1, COLUMNS.len() - 1);
        self.update_uidata();
    }

    // -------------------- Derived view ---------------------- //

    /// Recompute the row mapping from the working set, query and sort state,
    /// then clamp the selection into the new view.
    fn refresh_view(&mut self) {
        self.rows = self
            .claims
            .derive_view(&self.query, self.sort_key, self.sort_direction);

        if self.rows.is_empty() {
            self.cursor_row = 0;
            self.offset_row = 0;
        } else {
            let abs = std::cmp::min(self.offset_row + self.cursor_row, self.rows.len() - 1);
            if self.offset_row > abs {
                self.offset_row = abs;
            }
            self.scroll_to(abs);
        }
        self.update_uidata();
    }

    fn update_uidata(&mut self) {
        let headers = COLUMNS
            .iter()
            .map(|&key| {
                if key == self.sort_key {
                    format!("{} {}", key.label(), self.sort_direction.indicator())
                } else {
                    key.label().to_string()
                }
            })
            .collect();

        let rbegin = self.offset_row;
        let rend = std::cmp::min(rbegin + self.uilayout.table_height, self.rows.len());
        let rows = self.rows[rbegin..rend]
            .iter()
            .filter_map(|&idx| self.claims.get(idx))
            .map(|claim| RowView {
                cells: COLUMNS.iter().map(|&key| claim.field(key).to_string()).collect(),
                status: claim.status,
            })
            .collect();

        let link = self
            .selected_claim()
            .and_then(|claim| detail_url(&self.detail_base, &claim.claim_number).ok())
            .unwrap_or_default();

        let name = if self.query.trim().is_empty() {
            "Claims".to_string()
        } else {
            "F[Claims]".to_string()
        };

        self.uidata = UIData {
            name,
            headers,
            rows,
            nrows: self.rows.len(),
            total: self.claims.len(),
            selected_row: self.cursor_row,
            selected_column: self.cursor_column,
            abs_selected_row: self.offset_row + self.cursor_row,
            link,
            query: self.query.clone(),
            sort_key: self.sort_key,
            sort_direction: self.sort_direction,
            show_popup: self.modus == Modus::POPUP,
            popup_message: self.uidata.popup_message.clone(),
            selector: self.selector.as_ref().map(|s| SelectorData {
                choices: ClaimStatus::ALL,
                highlighted: s.highlighted,
                current: s.current,
            }),
            search: self.last_input.clone(),
            active_search: self.modus == Modus::SEARCH,
            status_message: self.status_message.clone(),
            last_status_message_update: self.last_status_message_update,
            layout: self.uilayout.clone(),
            last_update: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::sample_claims;
    use ratatui::crossterm::event::{KeyCode, KeyEvent};

    fn testmodel() -> Model {
        let claims = ClaimSet::ingest(sample_claims()).unwrap();
        Model::init(&Config::default(), claims, 80, 24).unwrap()
    }

    fn type_str(model: &mut Model, s: &str) {
        for c in s.chars() {
            model
                .update(Message::RawKey(KeyEvent::from(KeyCode::Char(c))))
                .unwrap();
        }
    }

    fn visible_column(model: &Model, column: usize) -> Vec<String> {
        model
            .get_uidata()
            .rows
            .iter()
            .map(|r| r.cells[column].clone())
            .collect()
    }

    #[test]
    fn starts_sorted_by_claim_number_ascending() {
        let model = testmodel();
        let uidata = model.get_uidata();
        assert_eq!(uidata.sort_key, SortKey::ClaimNumber);
        assert_eq!(uidata.sort_direction, SortDirection::ASCENDING);
        assert_eq!(uidata.nrows, 4);
        assert_eq!(uidata.total, 4);
        assert_eq!(
            visible_column(&model, 0),
            vec![
                "CL-2024-0000004-LONGER-EXAMPLE",
                "CL-2024-001",
                "CL-2024-002",
                "CL-2024-003"
            ]
        );
    }

    #[test]
    fn toggling_sort_on_a_new_column_starts_ascending() {
        let mut model = testmodel();
        model.update(Message::ToggleSort(SortKey::Owner)).unwrap();
        assert_eq!(model.get_uidata().sort_key, SortKey::Owner);
        assert_eq!(model.get_uidata().sort_direction, SortDirection::ASCENDING);
        assert_eq!(
            visible_column(&model, 1),
            vec!["Caroline Bowman", "Jane Doe", "John Smith", "Larry Fairley"]
        );
    }

    #[test]
    fn toggling_sort_twice_flips_the_direction() {
        let mut model = testmodel();
        model.update(Message::ToggleSort(SortKey::Owner)).unwrap();
        model.update(Message::ToggleSort(SortKey::Owner)).unwrap();
        assert_eq!(model.get_uidata().sort_direction, SortDirection::DESCENDING);
        assert_eq!(
            visible_column(&model, 1),
            vec!["Larry Fairley", "John Smith", "Jane Doe", "Caroline Bowman"]
        );
        // A third toggle is ascending again
        model.update(Message::ToggleSort(SortKey::Owner)).unwrap();
        assert_eq!(model.get_uidata().sort_direction, SortDirection::ASCENDING);
    }

    #[test]
    fn sorting_by_the_cursor_column() {
        let mut model = testmodel();
        model.update(Message::MoveRight).unwrap();
        model.update(Message::ToggleSortCurrent).unwrap();
        assert_eq!(model.get_uidata().sort_key, SortKey::Owner);
    }

    #[test]
    fn searching_narrows_the_view_while_typing() {
        let mut model = testmodel();
        model.update(Message::Search).unwrap();
        assert!(model.raw_keyevents());
        type_str(&mut model, "camry");
        let uidata = model.get_uidata();
        assert_eq!(uidata.nrows, 1);
        assert_eq!(uidata.rows[0].cells[0], "CL-2024-001");
        // Enter keeps the query and leaves search mode
        model
            .update(Message::RawKey(KeyEvent::from(KeyCode::Enter)))
            .unwrap();
        assert!(!model.raw_keyevents());
        assert_eq!(model.get_uidata().query, "camry");
        assert_eq!(model.get_uidata().nrows, 1);
    }

    #[test]
    fn canceled_search_restores_the_previous_query() {
        let mut model = testmodel();
        model.update(Message::Search).unwrap();
        type_str(&mut model, "camry");
        model
            .update(Message::RawKey(KeyEvent::from(KeyCode::Enter)))
            .unwrap();

        model.update(Message::Search).unwrap();
        type_str(&mut model, "zzz");
        assert_eq!(model.get_uidata().nrows, 0);
        model
            .update(Message::RawKey(KeyEvent::from(KeyCode::Esc)))
            .unwrap();
        assert_eq!(model.get_uidata().query, "camry");
        assert_eq!(model.get_uidata().nrows, 1);
    }

    #[test]
    fn no_match_renders_an_empty_view() {
        let mut model = testmodel();
        model.update(Message::Search).unwrap();
        type_str(&mut model, "zzz-no-match");
        let uidata = model.get_uidata();
        assert_eq!(uidata.nrows, 0);
        assert!(uidata.rows.is_empty());
    }

    #[test]
    fn escape_clears_an_applied_search() {
        let mut model = testmodel();
        model.update(Message::Search).unwrap();
        type_str(&mut model, "honda");
        model
            .update(Message::RawKey(KeyEvent::from(KeyCode::Enter)))
            .unwrap();
        assert_eq!(model.get_uidata().nrows, 1);
        model.update(Message::Exit).unwrap();
        assert_eq!(model.get_uidata().query, "");
        assert_eq!(model.get_uidata().nrows, 4);
    }

    #[test]
    fn status_selector_opens_on_the_selected_claims_status() {
        let mut model = testmodel();
        // Second row is CL-2024-001, completed
        model.update(Message::MoveDown).unwrap();
        model.update(Message::Enter).unwrap();
        let selector = model.get_uidata().selector.expect("selector open");
        assert_eq!(selector.current, ClaimStatus::COMPLETED);
        assert_eq!(
            selector.choices[selector.highlighted],
            ClaimStatus::COMPLETED
        );
    }

    #[test]
    fn committing_the_selector_updates_exactly_one_claim() {
        let mut model = testmodel();
        model.update(Message::Enter).unwrap(); // CL-2024-0000004..., open
        model.update(Message::MoveDown).unwrap(); // highlight pending
        model.update(Message::Enter).unwrap();

        let uidata = model.get_uidata();
        assert!(uidata.selector.is_none());
        assert_eq!(
            visible_column(&model, 4),
            vec!["pending", "completed", "pending", "pending"]
        );
    }

    #[test]
    fn selector_escape_changes_nothing() {
        let mut model = testmodel();
        let before = visible_column(&model, 4);
        model.update(Message::Enter).unwrap();
        model.update(Message::MoveDown).unwrap();
        model.update(Message::Exit).unwrap();
        assert!(model.get_uidata().selector.is_none());
        assert_eq!(visible_column(&model, 4), before);
    }

    #[test]
    fn selector_highlight_wraps_around() {
        let mut model = testmodel();
        model.update(Message::Enter).unwrap(); // open claim, highlight 0
        model.update(Message::MoveUp).unwrap();
        let selector = model.get_uidata().selector.expect("selector open");
        assert_eq!(selector.highlighted, ClaimStatus::ALL.len() - 1);
    }

    #[test]
    fn enter_on_an_empty_view_does_not_open_the_selector() {
        let mut model = testmodel();
        model.update(Message::Search).unwrap();
        type_str(&mut model, "zzz");
        model
            .update(Message::RawKey(KeyEvent::from(KeyCode::Enter)))
            .unwrap();
        model.update(Message::Enter).unwrap();
        assert!(model.get_uidata().selector.is_none());
        assert_eq!(model.get_uidata().status_message, "No claim selected");
    }

    #[test]
    fn selection_clamps_to_the_view() {
        let mut model = testmodel();
        model.update(Message::MoveEnd).unwrap();
        assert_eq!(model.get_uidata().abs_selected_row, 3);
        model.update(Message::MoveDown).unwrap();
        assert_eq!(model.get_uidata().abs_selected_row, 3);
        model.update(Message::MoveBeginning).unwrap();
        assert_eq!(model.get_uidata().abs_selected_row, 0);
        model.update(Message::MoveUp).unwrap();
        assert_eq!(model.get_uidata().abs_selected_row, 0);
    }

    #[test]
    fn column_cursor_stays_in_range() {
        let mut model = testmodel();
        for _ in 0..10 {
            model.update(Message::MoveRight).unwrap();
        }
        assert_eq!(model.get_uidata().selected_column, COLUMNS.len() - 1);
        for _ in 0..10 {
            model.update(Message::MoveLeft).unwrap();
        }
        assert_eq!(model.get_uidata().selected_column, 0);
    }

    #[test]
    fn selected_claim_link_is_encoded() {
        let model = testmodel();
        assert_eq!(
            model.get_uidata().link,
            "https://claims.example.com/claims/CL-2024-0000004-LONGER-EXAMPLE"
        );
    }

    #[test]
    fn new_claim_is_a_stub() {
        let mut model = testmodel();
        let before = visible_column(&model, 0);
        model.update(Message::NewClaim).unwrap();
        assert_eq!(visible_column(&model, 0), before);
        assert!(model.get_uidata().status_message.contains("not implemented"));
    }

    #[test]
    fn help_popup_opens_and_closes() {
        let mut model = testmodel();
        model.update(Message::Help).unwrap();
        assert!(model.get_uidata().show_popup);
        model.update(Message::Exit).unwrap();
        assert!(!model.get_uidata().show_popup);
    }

    #[test]
    fn quit_message_quits() {
        let mut model = testmodel();
        model.update(Message::Quit).unwrap();
        assert_eq!(model.status, Status::QUITTING);
    }

    #[test]
    fn resize_recomputes_the_layout() {
        let mut model = testmodel();
        model.update(Message::Resize(120, 40)).unwrap();
        let layout = &model.get_uidata().layout;
        assert_eq!(layout.width, 120);
        assert_eq!(layout.height, 40);
        assert!(layout.table_height > 0);
    }

    #[test]
    fn scrolling_keeps_the_selection_visible() {
        // 30 claims on a 4 row tall table forces the window to move
        let claims: Vec<Claim> = (0..30)
            .map(|i| Claim {
                claim_number: format!("CL-2025-{:03}", i),
                owner: format!("Owner {}", i),
                vehicle: "Car".to_string(),
                vin: format!("VIN{}", i),
                status: ClaimStatus::OPEN,
            })
            .collect();
        let set = ClaimSet::ingest(claims).unwrap();
        let mut model = Model::init(&Config::default(), set, 80, 14).unwrap();
        let height = model.get_uidata().layout.table_height;
        assert!(height < 30);

        model.update(Message::MoveEnd).unwrap();
        let uidata = model.get_uidata();
        assert_eq!(uidata.abs_selected_row, 29);
        assert_eq!(uidata.rows.len(), height);
        assert_eq!(uidata.selected_row, height - 1);
        assert_eq!(uidata.rows[uidata.selected_row].cells[0], "CL-2025-029");

        model.update(Message::MovePageUp).unwrap();
        let uidata = model.get_uidata();
        assert_eq!(uidata.abs_selected_row, 29 - height);
        assert_eq!(uidata.rows[uidata.selected_row].cells[0].as_str(),
            format!("CL-2025-{:03}", 29 - height));
    }
}
