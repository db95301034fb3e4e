use std::fmt;

/// Admission action resulting from one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Resume,
    Suspend,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Resume => write!(f, "resume"),
            Self::Suspend => write!(f, "suspend"),
        }
    }
}

/// Outcome of the admission toggle for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Decision {
    pub new_excluded: bool,
    pub action: Action,
}

/// Two-state admission toggle over the observed state.
///
/// Equality with the threshold counts as "not enough space": a unit must
/// strictly exceed the threshold to be re-admitted, while an included unit at
/// exactly the threshold is suspended. The asymmetry keeps a unit sitting on
/// the boundary from oscillating between passes.
///
/// Pure function of the current observed state, not of history: re-running it
/// against an already-applied state always yields `Action::None`.
pub(crate) fn decide(currently_excluded: bool, total_free_pct: i64, threshold: i64) -> Decision {
    let enough_space = total_free_pct > threshold;

    match (currently_excluded, enough_space) {
        (true, true) => Decision { new_excluded: false, action: Action::Resume },
        (false, false) => Decision { new_excluded: true, action: Action::Suspend },
        (true, false) => Decision { new_excluded: true, action: Action::None },
        (false, true) => Decision { new_excluded: false, action: Action::None },
    }
}
