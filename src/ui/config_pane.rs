use super::view::Render;
use crate::error::ConfigError;
use crate::models::ParamChange;
use crate::observable::SubscriptionHandle;
use crate::store::ReactiveConfigStore;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Edit form for the parameters of a [`ReactiveConfigStore`].
///
/// Each declared parameter has a text input holding pending, uncommitted
/// text. Pressing "Reconfigure" ([`on_configure()`](Self::on_configure))
/// hands every input to [`ReactiveConfigStore::commit`] as one batch.
///
/// The pane also subscribes to the store, so values committed from anywhere
/// else are written back into the inputs. Only inputs whose value changed
/// are rewritten; pending text in the others is left alone.
#[derive(Debug)]
pub struct ConfigPane {
    store: Rc<ReactiveConfigStore>,
    inputs: Rc<RefCell<IndexMap<String, String>>>,
    subscription: SubscriptionHandle,
}

impl ConfigPane {
    pub fn new(store: Rc<ReactiveConfigStore>) -> Self {
        let inputs: IndexMap<String, String> = store
            .snapshot()
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect();
        let inputs = Rc::new(RefCell::new(inputs));

        let sink = Rc::clone(&inputs);
        let subscription = store.subscribe_to_changes(move |old, new| {
            let mut inputs = sink.borrow_mut();
            for (name, value) in new.iter().filter(|(name, value)| old.get(*name) != Some(*value)) {
                inputs.insert(name.clone(), value.to_string());
            }
        });

        Self {
            store,
            inputs,
            subscription,
        }
    }

    /// Replace the pending text of input `name`.
    pub fn set_text(&self, name: &str, text: impl Into<String>) -> Result<(), ConfigError> {
        match self.inputs.borrow_mut().get_mut(name) {
            Some(input) => {
                *input = text.into();
                Ok(())
            }
            None => Err(ConfigError::UnknownParameter {
                name: name.to_string(),
            }),
        }
    }

    /// Pending text of input `name`.
    pub fn text(&self, name: &str) -> Option<String> {
        self.inputs.borrow().get(name).cloned()
    }

    /// Pending text of every input, in declaration order.
    pub fn pending_edits(&self) -> IndexMap<String, String> {
        self.inputs.borrow().clone()
    }

    /// Inputs whose text no longer matches the committed value.
    pub fn dirty_inputs(&self) -> Vec<String> {
        let committed = self.store.snapshot();
        self.inputs
            .borrow()
            .iter()
            .filter(|(name, text)| {
                committed
                    .get(*name)
                    .is_none_or(|value| value.to_string() != **text)
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Committed value of `name`.
    pub fn get_param(&self, name: &str) -> Result<i64, ConfigError> {
        self.store.get_param(name)
    }

    /// Commit all pending text to the store.
    ///
    /// On failure nothing is applied and the inputs keep the user's text so
    /// it can be corrected and committed again.
    pub fn on_configure(&self) -> Result<Vec<ParamChange>, ConfigError> {
        // Clone first: the store notifies us synchronously and we rewrite the inputs.
        let edits = self.pending_edits();
        tracing::debug!("Reconfigure requested with {} inputs", edits.len());
        self.store.commit(&edits)
    }

    pub fn store(&self) -> &Rc<ReactiveConfigStore> {
        &self.store
    }
}

impl Render for ConfigPane {
    fn render(&self) -> String {
        let inputs = self.inputs.borrow();
        let width = inputs.keys().map(String::len).max().unwrap_or(0);

        let mut lines: Vec<String> = inputs
            .iter()
            .map(|(name, text)| format!("{name:<width$}  [{text}]"))
            .collect();
        lines.push("[Reconfigure]".to_string());
        lines.join("\n")
    }
}

impl Drop for ConfigPane {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
