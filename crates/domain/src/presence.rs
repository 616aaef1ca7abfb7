//! Presence — per-geofence outside/inside state used for edge-triggered alerts.

use serde::{Deserialize, Serialize};

/// Whether the device was inside a geofence at the last evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    #[default]
    Outside,
    Inside,
}

/// Edge produced when presence changes (or holds) between two evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Outside → Inside.
    Entered,
    /// Inside → Inside.
    StillInside,
    /// Inside → Outside.
    Exited,
}

impl Presence {
    #[must_use]
    pub fn from_contained(contained: bool) -> Self {
        if contained {
            Self::Inside
        } else {
            Self::Outside
        }
    }

    /// Move to the presence implied by `contained`, returning the edge taken.
    ///
    /// Outside → Outside yields `None`.
    pub fn advance(&mut self, contained: bool) -> Option<Transition> {
        let next = Self::from_contained(contained);
        let transition = match (*self, next) {
            (Self::Outside, Self::Inside) => Some(Transition::Entered),
            (Self::Inside, Self::Inside) => Some(Transition::StillInside),
            (Self::Inside, Self::Outside) => Some(Transition::Exited),
            (Self::Outside, Self::Outside) => None,
        };
        *self = next;
        transition
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outside => f.write_str("outside"),
            Self::Inside => f.write_str("inside"),
        }
    }
}
