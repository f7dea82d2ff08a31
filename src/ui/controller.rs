// LabController - wires the configuration store to the tabbed view
//
// This module owns:
// - The configuration pane (edit form over the store)
// - The current button pane (rebuilt on every grid-shaping commit)
// - The store subscription that performs the rebuild
//
// The tab container itself is an external ViewHost; the controller only tells
// it which tabs to add, remove and refresh.

use super::button_pane::ButtonPane;
use super::config_pane::ConfigPane;
use super::view::{Render, ViewHost};
use crate::error::{ConfigError, PaneError};
use crate::models::{BUTTONS_PARAM, COLUMNS_PARAM, INITIAL_PARAM, ParamChange, ParamMap};
use crate::observable::SubscriptionHandle;
use crate::store::ReactiveConfigStore;
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

/// Title of the tab holding the configuration form.
pub const CONFIG_TAB: &str = "Configuration";

/// Title of the tab holding the button grid.
pub const BUTTONS_TAB: &str = "Buttons";

/// Parameters that determine the shape of the button pane.
const PANE_PARAMS: [&str; 3] = [COLUMNS_PARAM, BUTTONS_PARAM, INITIAL_PARAM];

/// Main controller connecting a [`ReactiveConfigStore`] with a [`ViewHost`].
///
/// On construction it shows the `Configuration` and `Buttons` tabs and
/// subscribes to the store. Each commit that changes `Columns`, `Buttons` or
/// `Initial` discards the current [`ButtonPane`], builds a new one from the
/// committed values and swaps it into the `Buttons` tab.
///
/// # Threading
///
/// Everything runs on the thread that owns the UI event loop; the store
/// notifies synchronously, so the rebuild has finished by the time
/// [`reconfigure()`](Self::reconfigure) returns.
pub struct LabController<H: ViewHost + 'static> {
    store: Rc<ReactiveConfigStore>,
    config_pane: ConfigPane,
    buttons: Rc<RefCell<ButtonPane>>,
    host: Rc<RefCell<H>>,
    subscription: SubscriptionHandle,
    rebuilds: Rc<Cell<usize>>,
}

impl<H: ViewHost + 'static> LabController<H> {
    /// Create the controller and populate `host` with both tabs.
    ///
    /// # Errors
    /// Fails if the store's current values cannot shape a button pane
    /// (missing `Columns`/`Buttons` parameter, zero columns, ...).
    pub fn new(store: Rc<ReactiveConfigStore>, host: H) -> Result<Self, PaneError> {
        let pane = ButtonPane::from_params(&store.snapshot())?;
        let config_pane = ConfigPane::new(Rc::clone(&store));

        let host = Rc::new(RefCell::new(host));
        {
            let mut host = host.borrow_mut();
            host.add_tab(CONFIG_TAB, config_pane.render());
            host.add_tab(BUTTONS_TAB, pane.render());
        }

        let buttons = Rc::new(RefCell::new(pane));
        let rebuilds = Rc::new(Cell::new(0));

        let subscription = {
            let host = Rc::clone(&host);
            let buttons = Rc::clone(&buttons);
            let rebuilds = Rc::clone(&rebuilds);
            store.subscribe_to_changes(move |old, new| {
                Self::on_configvals(old, new, &host, &buttons, &rebuilds);
            })
        };

        tracing::info!("Controller initialized with tabs '{}' and '{}'", CONFIG_TAB, BUTTONS_TAB);

        Ok(Self {
            store,
            config_pane,
            buttons,
            host,
            subscription,
            rebuilds,
        })
    }

    /// Store listener: rebuild the button pane when its shape changed.
    fn on_configvals(
        old: &ParamMap,
        new: &ParamMap,
        host: &RefCell<H>,
        buttons: &RefCell<ButtonPane>,
        rebuilds: &Cell<usize>,
    ) {
        if PANE_PARAMS.iter().all(|p| old.get(*p) == new.get(*p)) {
            tracing::debug!("Committed change does not affect the button pane");
            return;
        }

        let pane = match ButtonPane::from_params(new) {
            Ok(pane) => pane,
            Err(e) => {
                tracing::warn!("Keeping previous button pane: {}", e);
                return;
            }
        };

        {
            let mut host = host.borrow_mut();
            host.remove_tab(BUTTONS_TAB);
            host.add_tab(BUTTONS_TAB, pane.render());
        }

        tracing::info!(
            "Rebuilt button pane: {} buttons in {} columns",
            pane.len(),
            pane.cols()
        );

        // The old pane (and its buttons' subscriptions) is dropped here.
        *buttons.borrow_mut() = pane;
        rebuilds.set(rebuilds.get() + 1);
    }

    /// Edit the pending text of a configuration input.
    pub fn set_text(&self, name: &str, text: impl Into<String>) -> Result<(), ConfigError> {
        self.config_pane.set_text(name, text)?;
        self.refresh_config_tab();
        Ok(())
    }

    /// The "Reconfigure" button: commit every input in one batch.
    pub fn reconfigure(&self) -> Result<Vec<ParamChange>, ConfigError> {
        let result = self.config_pane.on_configure();
        self.refresh_config_tab();
        result
    }

    /// Commit every declared default, as if typed into the form.
    pub fn reset(&self) -> Vec<ParamChange> {
        let changes = self.store.reset_to_defaults();
        self.refresh_config_tab();
        changes
    }

    /// Click a button in the grid. Returns its new count.
    pub fn click(&self, index: usize) -> Option<i64> {
        let count = self.buttons.borrow().click(index);
        if count.is_some() {
            self.refresh_buttons_tab();
        }
        count
    }

    /// Timer tick: decrement every button in the grid.
    pub fn tick(&self) {
        self.buttons.borrow().tick();
        self.refresh_buttons_tab();
    }

    /// The current button pane.
    pub fn buttons(&self) -> Ref<'_, ButtonPane> {
        self.buttons.borrow()
    }

    pub fn config_pane(&self) -> &ConfigPane {
        &self.config_pane
    }

    pub fn store(&self) -> &Rc<ReactiveConfigStore> {
        &self.store
    }

    pub fn host(&self) -> Ref<'_, H> {
        self.host.borrow()
    }

    /// Number of times the button pane was rebuilt since construction.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds.get()
    }

    fn refresh_config_tab(&self) {
        let content = self.config_pane.render();
        self.host.borrow_mut().refresh_tab(CONFIG_TAB, content);
    }

    fn refresh_buttons_tab(&self) {
        let content = self.buttons.borrow().render();
        self.host.borrow_mut().refresh_tab(BUTTONS_TAB, content);
    }
}

impl<H: ViewHost + 'static> Drop for LabController<H> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
