use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Re-run `service.resolve_location`()
    ResolveLocation,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Esc, Left, Up};

    // Global shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }
    if key.code == Char('r') && key.modifiers.is_empty() {
        return Action::ResolveLocation;
    }

    match app.screen {
        Screen::RegionSelect => match key.code {
            Up | Char('k') => {
                if app.region_list_index > 0 {
                    app.region_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.region_list_index + 1 < app.region_rows() {
                    app.region_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                app.select_current_region();
            }
            _ => {}
        },

        Screen::CenterList => match key.code {
            Up | Char('k') => {
                if app.center_list_index > 0 {
                    app.center_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.center_list_index + 1 < app.centers.len() {
                    app.center_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                app.open_current_center();
            }
            Left | Esc => {
                app.screen = Screen::RegionSelect;
            }
            _ => {}
        },

        Screen::CenterDetail => match key.code {
            Left | Esc | Char('b') => {
                app.screen = Screen::CenterList;
            }
            _ => {}
        },
    }

    Action::None
}
