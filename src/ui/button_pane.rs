use super::counter_button::CounterButton;
use super::view::Render;
use crate::error::PaneError;
use crate::models::{BUTTONS_PARAM, COLUMNS_PARAM, INITIAL_PARAM, MAX_BUTTONS, ParamMap};

/// Grid of [`CounterButton`]s laid out in a fixed number of columns.
///
/// This is the child view that gets discarded and rebuilt whenever the
/// grid-shaping parameters are committed.
#[derive(Debug)]
pub struct ButtonPane {
    buttons: Vec<CounterButton>,
    cols: usize,
}

impl ButtonPane {
    /// Build `num_buttons` buttons, all starting at `initval`, in `cols` columns.
    pub fn new(num_buttons: usize, cols: usize, initval: i64) -> Result<Self, PaneError> {
        if cols == 0 {
            return Err(PaneError::InvalidColumns(0));
        }
        if num_buttons > MAX_BUTTONS {
            return Err(PaneError::InvalidButtonCount {
                count: num_buttons as i64,
                max: MAX_BUTTONS,
            });
        }

        let buttons = (0..num_buttons).map(|_| CounterButton::new(initval)).collect();
        Ok(Self { buttons, cols })
    }

    /// Build a pane from committed parameter values.
    ///
    /// Reads `Columns` and `Buttons`; `Initial` is optional and defaults to 0.
    pub fn from_params(params: &ParamMap) -> Result<Self, PaneError> {
        let lookup = |name: &str| {
            params
                .get(name)
                .copied()
                .ok_or_else(|| PaneError::MissingParameter(name.to_string()))
        };

        let cols = lookup(COLUMNS_PARAM)?;
        let count = lookup(BUTTONS_PARAM)?;
        let initval = params.get(INITIAL_PARAM).copied().unwrap_or(0);

        let cols = usize::try_from(cols)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(PaneError::InvalidColumns(cols))?;
        let count = usize::try_from(count).map_err(|_| PaneError::InvalidButtonCount {
            count,
            max: MAX_BUTTONS,
        })?;

        Self::new(count, cols, initval)
    }

    /// Grid cell `(row, column)` of button `index`.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.buttons.len().div_ceil(self.cols)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn button(&self, index: usize) -> Option<&CounterButton> {
        self.buttons.get(index)
    }

    /// Click button `index`. Returns its new count, or `None` if out of range.
    pub fn click(&self, index: usize) -> Option<i64> {
        self.buttons.get(index).map(CounterButton::click)
    }

    /// Timer tick: decrement every button.
    pub fn tick(&self) {
        for button in &self.buttons {
            button.decrement();
        }
    }

    /// Counts of all buttons in index order.
    pub fn counts(&self) -> Vec<i64> {
        self.buttons.iter().map(CounterButton::count).collect()
    }
}

impl Render for ButtonPane {
    fn render(&self) -> String {
        if self.buttons.is_empty() {
            return "(no buttons)".to_string();
        }

        self.buttons
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(CounterButton::render)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
