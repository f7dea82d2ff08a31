// Reactive configuration store
//
// Named integer parameters held in a single Observable over the whole map,
// so that one commit produces at most one change notification.

use crate::error::ConfigError;
use crate::models::{ConfigParameter, ParamChange, ParamMap, ParameterSpec};
use crate::observable::{Observable, SubscriptionHandle};
use indexmap::IndexMap;

/// Batch-committed store of named integer parameters.
///
/// The set of names is fixed at construction. Values change only through
/// [`commit()`](Self::commit) and its typed variants, which validate every
/// edit before applying any of them. Subscribers therefore never observe a
/// half-applied batch.
///
/// # Usage
///
/// ```
/// use rebuildlab::ReactiveConfigStore;
///
/// let store = ReactiveConfigStore::new([("Columns", 2), ("Buttons", 10)]).unwrap();
/// store.subscribe_to_changes(|old, new| {
///     println!("{:?} -> {:?}", old, new);
/// });
///
/// let changes = store.commit([("Columns", "3"), ("Buttons", "12")]).unwrap();
/// assert_eq!(changes.len(), 2);
/// assert_eq!(store.get_param("Columns").unwrap(), 3);
/// ```
///
/// # Related Types
///
/// - [`Observable`]: the notifying container wrapping the value map
/// - [`crate::ui::ConfigPane`]: edit form that feeds raw text into `commit()`
/// - [`crate::ui::LabController`]: rebuilds the button pane on change
pub struct ReactiveConfigStore {
    /// Declarations keyed by name, in declaration order
    specs: IndexMap<String, ParameterSpec>,

    /// Current values; replaced as a whole on every commit
    values: Observable<ParamMap>,
}

impl ReactiveConfigStore {
    /// Create a store from `(name, default)` pairs with no bounds.
    ///
    /// # Errors
    /// [`ConfigError::DuplicateParameter`] if a name appears twice.
    pub fn new<I, S>(params: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self::from_specs(
            params
                .into_iter()
                .map(|(name, default)| ParameterSpec::new(name, default)),
        )
    }

    /// Create a store from full parameter declarations.
    ///
    /// # Errors
    /// - [`ConfigError::DuplicateParameter`] if a name appears twice
    /// - [`ConfigError::OutOfRange`] if a default violates its own bounds
    pub fn from_specs<I>(specs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ParameterSpec>,
    {
        let mut declared = IndexMap::new();
        let mut values = ParamMap::new();

        for spec in specs {
            if declared.contains_key(&spec.name) {
                return Err(ConfigError::DuplicateParameter { name: spec.name });
            }
            if !spec.accepts(spec.default) {
                return Err(ConfigError::OutOfRange {
                    name: spec.name,
                    value: spec.default,
                    min: spec.min,
                    max: spec.max,
                });
            }

            values.insert(spec.name.clone(), spec.default);
            declared.insert(spec.name.clone(), spec);
        }

        tracing::debug!("Config store created with {} parameters", declared.len());

        Ok(Self {
            specs: declared,
            values: Observable::new(values),
        })
    }

    /// Current value of `name`.
    pub fn get_param(&self, name: &str) -> Result<i64, ConfigError> {
        self.values
            .read(|values| values.get(name).copied())
            .ok_or_else(|| ConfigError::UnknownParameter {
                name: name.to_string(),
            })
    }

    /// Copy of the whole value map.
    pub fn snapshot(&self) -> ParamMap {
        self.values.get()
    }

    /// Declared parameters with their current values, in declaration order.
    pub fn parameters(&self) -> Vec<ConfigParameter> {
        self.values.read(|values| {
            self.specs
                .values()
                .map(|spec| ConfigParameter {
                    name: spec.name.clone(),
                    value: values.get(&spec.name).copied().unwrap_or(spec.default),
                    default: spec.default,
                    min: spec.min,
                    max: spec.max,
                })
                .collect()
        })
    }

    /// Whether `name` was declared at construction.
    pub fn is_declared(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Validate a batch of raw text edits without applying it.
    ///
    /// Returns the map the store would hold after committing `edits`.
    /// Edits are checked in iteration order and the first failure is returned.
    pub fn validate<I, K, V>(&self, edits: I) -> Result<ParamMap, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut staged = self.snapshot();

        for (name, raw) in edits {
            let (name, raw) = (name.as_ref(), raw.as_ref());
            let spec = self.spec(name)?;

            let value = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: name.to_string(),
                    raw: raw.to_string(),
                })?;

            Self::check_bounds(spec, value)?;
            staged.insert(spec.name.clone(), value);
        }

        Ok(staged)
    }

    /// Validate and apply a batch of raw text edits.
    ///
    /// Either every edit is applied and subscribers are notified once (if any
    /// value actually changed), or nothing is applied and the first
    /// validation error is returned.
    ///
    /// # Returns
    /// The parameters whose value changed, in declaration order. An empty
    /// vector means no notification was sent.
    pub fn commit<I, K, V>(&self, edits: I) -> Result<Vec<ParamChange>, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let staged = self.validate(edits).inspect_err(|e| {
            tracing::warn!("Commit rejected, store unchanged: {}", e);
        })?;

        Ok(self.apply(staged))
    }

    /// Commit a single already-typed value.
    pub fn set_param(&self, name: &str, value: i64) -> Result<Vec<ParamChange>, ConfigError> {
        let spec = self.spec(name)?;
        Self::check_bounds(spec, value)?;

        let mut staged = self.snapshot();
        staged.insert(spec.name.clone(), value);
        Ok(self.apply(staged))
    }

    /// Commit every declared default in one batch.
    pub fn reset_to_defaults(&self) -> Vec<ParamChange> {
        let defaults = self
            .specs
            .values()
            .map(|spec| (spec.name.clone(), spec.default))
            .collect();
        self.apply(defaults)
    }

    /// Listen for committed changes. The listener receives `(old, new)` maps.
    pub fn subscribe_to_changes<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&ParamMap, &ParamMap) + 'static,
    {
        self.values.subscribe(listener)
    }

    /// Detach a listener. Unknown handles are ignored.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.values.unsubscribe(handle)
    }

    /// Number of attached change listeners.
    pub fn subscriber_count(&self) -> usize {
        self.values.listener_count()
    }

    fn spec(&self, name: &str) -> Result<&ParameterSpec, ConfigError> {
        self.specs
            .get(name)
            .ok_or_else(|| ConfigError::UnknownParameter {
                name: name.to_string(),
            })
    }

    fn check_bounds(spec: &ParameterSpec, value: i64) -> Result<(), ConfigError> {
        if spec.accepts(value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                name: spec.name.clone(),
                value,
                min: spec.min,
                max: spec.max,
            })
        }
    }

    /// Replace the value map, returning what changed.
    fn apply(&self, staged: ParamMap) -> Vec<ParamChange> {
        let changes = self.values.read(|old| Self::detect_changes(old, &staged));

        if changes.is_empty() {
            tracing::debug!("Commit left all parameters unchanged");
            return changes;
        }

        for change in &changes {
            tracing::info!("Parameter {} changed: {} -> {}", change.name, change.old, change.new);
        }

        self.values.set(staged);
        changes
    }

    fn detect_changes(old: &ParamMap, new: &ParamMap) -> Vec<ParamChange> {
        new.iter()
            .filter_map(|(name, &value)| match old.get(name) {
                Some(&previous) if previous != value => Some(ParamChange {
                    name: name.clone(),
                    old: previous,
                    new: value,
                }),
                _ => None,
            })
            .collect()
    }
}

impl std::fmt::Debug for ReactiveConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveConfigStore")
            .field("values", &self.values)
            .finish()
    }
}
