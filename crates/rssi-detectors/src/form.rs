//! Output shapes shared by the literature detectors

use rssi_core::FilterResult;

/// Whether a detector reports its continuous margin or a yes/no decision
///
/// The margin is positive exactly when the decision is "obstacle", so both
/// forms agree on where events are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputForm {
    #[default]
    Margin,
    Flags,
}

impl OutputForm {
    /// Package per-sample margins; `None` stays `None` in both forms
    pub(crate) fn package(self, name: &'static str, margins: Vec<Option<f64>>) -> FilterResult {
        match self {
            OutputForm::Margin => FilterResult::margins(name, margins),
            OutputForm::Flags => FilterResult::flags(
                name,
                margins.into_iter().map(|m| m.map(|x| x > 0.0)).collect(),
            ),
        }
    }
}
