// UI module - view models driven by the configuration store
//
// This module contains:
// - CounterButton / ButtonPane: the rebuildable grid of click counters
// - ConfigPane: the edit form that commits to the store
// - LabController: wires the store to a ViewHost and rebuilds on change
// - CommandParser: console input for the headless front end

pub mod button_pane;
pub mod config_pane;
pub mod console;
pub mod controller;
pub mod counter_button;
pub mod view;

pub use button_pane::ButtonPane;
pub use config_pane::ConfigPane;
pub use console::{Command, CommandParser};
pub use controller::{BUTTONS_TAB, CONFIG_TAB, LabController};
pub use counter_button::CounterButton;
pub use view::{Render, TextTabs, ViewHost};
