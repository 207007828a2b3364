use std::io::Error;

use derive_setters::Setters;
use ratatui::crossterm::event::KeyEvent;

use crate::claims::SortKey;

pub const HELP_TEXT: &str = "\
 Claims dashboard

 Up/Down  k/j    select claim
 Left/Right h/l  select column
 g / G           first / last claim
 PgUp / PgDn     page up / down
 1-5             sort by column, again to flip direction
 s               sort by selected column
 /               search claims
 Enter           change status of selected claim
 y               copy claim link
 Y               copy claim row
 n               new claim (not implemented yet)
 ?               this help
 Esc             close / clear search
 q               quit";

#[derive(Debug)]
pub enum ClaimsError {
    IoError(Error),
    DuplicateClaim(String),
    UnknownStatus(String),
    InvalidDetailBase(String),
    LoggingSetup(String),
}

impl From<Error> for ClaimsError {
    fn from(err: Error) -> Self {
        ClaimsError::IoError(err)
    }
}

impl From<url::ParseError> for ClaimsError {
    fn from(err: url::ParseError) -> Self {
        ClaimsError::InvalidDetailBase(err.to_string())
    }
}

#[derive(Debug, Clone, Setters)]
pub struct Config {
    /// How long the controller waits for a terminal event, in milliseconds.
    pub event_poll_time: u64,
    /// Base URL the per claim detail links are built from.
    pub detail_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            event_poll_time: 100,
            detail_base: "https://claims.example.com/claims".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MovePageUp,
    MovePageDown,
    MoveBeginning,
    MoveEnd,
    Search,
    ToggleSort(SortKey),
    ToggleSortCurrent,
    CopyLink,
    CopyRow,
    NewClaim,
    Help,
    Enter,
    Exit,
    Resize(usize, usize),
    RawKey(KeyEvent),
}
