//! Integration tests for LabController over the in-memory tab container
//!
//! These tests verify the running example end to end:
//! - Both tabs are shown on startup
//! - Reconfigure rebuilds the Buttons tab from committed values
//! - Rejected input leaves the current pane and its counts alone
//! - Unrelated parameters do not rebuild the pane

use rebuildlab::models::{BUTTONS_PARAM, COLUMNS_PARAM, INITIAL_PARAM, default_parameters};
use rebuildlab::ui::{BUTTONS_TAB, CONFIG_TAB, LabController, TextTabs};
use rebuildlab::{ConfigError, ParameterSpec, ReactiveConfigStore};
use std::rc::Rc;

fn default_controller() -> LabController<TextTabs> {
    let store = ReactiveConfigStore::from_specs(default_parameters()).unwrap();
    LabController::new(Rc::new(store), TextTabs::new()).unwrap()
}

#[test]
fn test_startup_tabs() {
    let controller = default_controller();
    let host = controller.host();

    assert_eq!(host.titles(), vec![CONFIG_TAB, BUTTONS_TAB]);
    assert_eq!(host.content(BUTTONS_TAB).unwrap().lines().count(), 5);
    assert!(host.content(CONFIG_TAB).unwrap().contains("[Reconfigure]"));
}

#[test]
fn test_reconfigure_rebuilds_buttons_tab() {
    let controller = default_controller();
    controller.set_text(COLUMNS_PARAM, "3").unwrap();
    controller.set_text(BUTTONS_PARAM, "7").unwrap();

    let changes = controller.reconfigure().unwrap();
    assert_eq!(changes.len(), 2);
    assert_eq!(controller.rebuild_count(), 1);

    let buttons = controller.buttons();
    assert_eq!(buttons.len(), 7);
    assert_eq!(buttons.cols(), 3);
    assert_eq!(buttons.position(6), (2, 0));
    drop(buttons);

    let host = controller.host();
    let grid = host.content(BUTTONS_TAB).unwrap();
    assert_eq!(grid.lines().count(), 3);
    assert_eq!(grid.lines().next().unwrap().matches("[Clicks: 0]").count(), 3);
    // The rebuilt tab is re-added at the end, like removeTab + addTab.
    assert_eq!(host.titles(), vec![CONFIG_TAB, BUTTONS_TAB]);
}

#[test]
fn test_rebuild_discards_old_counts() {
    let controller = default_controller();
    controller.click(0);
    controller.click(0);
    assert_eq!(controller.buttons().button(0).unwrap().count(), 2);

    controller.set_text(BUTTONS_PARAM, "4").unwrap();
    controller.reconfigure().unwrap();
    assert_eq!(controller.buttons().counts(), vec![0; 4]);
}

#[test]
fn test_rejected_input_keeps_pane() {
    let controller = default_controller();
    controller.click(1);

    controller.set_text(COLUMNS_PARAM, "4").unwrap();
    controller.set_text(BUTTONS_PARAM, "many").unwrap();
    let err = controller.reconfigure().unwrap_err();

    assert_eq!(err.parameter(), BUTTONS_PARAM);
    assert_eq!(controller.rebuild_count(), 0);
    assert_eq!(controller.buttons().cols(), 2);
    assert_eq!(controller.buttons().button(1).unwrap().count(), 1);
    assert_eq!(controller.store().get_param(COLUMNS_PARAM), Ok(2));

    // The form still shows what the user typed.
    let host = controller.host();
    assert!(host.content(CONFIG_TAB).unwrap().contains("[many]"));
}

#[test]
fn test_out_of_range_columns_rejected() {
    let controller = default_controller();
    controller.set_text(COLUMNS_PARAM, "0").unwrap();

    let err = controller.reconfigure().unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { value: 0, .. }));
    assert_eq!(controller.rebuild_count(), 0);
}

#[test]
fn test_unrelated_parameter_does_not_rebuild() {
    let mut specs = default_parameters();
    specs.push(ParameterSpec::new("Speed", 1));
    let store = ReactiveConfigStore::from_specs(specs).unwrap();
    let controller = LabController::new(Rc::new(store), TextTabs::new()).unwrap();
    controller.click(0);

    controller.set_text("Speed", "5").unwrap();
    assert_eq!(controller.reconfigure().unwrap().len(), 1);

    assert_eq!(controller.rebuild_count(), 0);
    assert_eq!(controller.buttons().button(0).unwrap().count(), 1);
}

#[test]
fn test_initial_parameter_seeds_buttons() {
    let mut specs = default_parameters();
    specs.push(ParameterSpec::new(INITIAL_PARAM, 0));
    let store = ReactiveConfigStore::from_specs(specs).unwrap();
    let controller = LabController::new(Rc::new(store), TextTabs::new()).unwrap();

    controller.set_text(INITIAL_PARAM, "3").unwrap();
    controller.reconfigure().unwrap();

    assert_eq!(controller.rebuild_count(), 1);
    assert!(controller.buttons().counts().iter().all(|&c| c == 3));
}

#[test]
fn test_tick_and_reset() {
    let controller = default_controller();
    controller.tick();
    assert!(controller.buttons().counts().iter().all(|&c| c == -1));
    assert!(
        controller
            .host()
            .content(BUTTONS_TAB)
            .unwrap()
            .starts_with("[Clicks: -1]")
    );

    controller.set_text(BUTTONS_PARAM, "2").unwrap();
    controller.reconfigure().unwrap();
    let changes = controller.reset();
    assert_eq!(changes.len(), 1);
    assert_eq!(controller.buttons().len(), 10);
    assert_eq!(controller.config_pane().text(BUTTONS_PARAM).as_deref(), Some("10"));
}

#[test]
fn test_drop_detaches_from_store() {
    let store = Rc::new(ReactiveConfigStore::from_specs(default_parameters()).unwrap());
    let controller = LabController::new(Rc::clone(&store), TextTabs::new()).unwrap();
    assert_eq!(store.subscriber_count(), 2);

    drop(controller);
    assert_eq!(store.subscriber_count(), 0);
    assert!(store.set_param(BUTTONS_PARAM, 3).is_ok());
}
