//! Geofence evaluator — decides which zones contain a position and which
//! alerts that warrants.
//!
//! Every call to [`GeofenceEvaluator::evaluate`] is independent of the
//! previous *containment* result, but each geofence keeps a [`Presence`] so
//! events can tell entering apart from staying. Whether alerts follow the
//! level (every update while inside) or the edge (entry only) is chosen by
//! [`AlertPolicy`].

use std::collections::HashMap;

use geowatch_domain::alert::Alert;
use geowatch_domain::coordinate::Coordinate;
use geowatch_domain::event::GeofenceEvent;
use geowatch_domain::geofence::GeofenceSet;
use geowatch_domain::id::GeofenceId;
use geowatch_domain::presence::{Presence, Transition};

/// When an evaluation should raise an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertPolicy {
    /// Alert after every update that finds the device inside any zone,
    /// even if it was already inside.
    #[default]
    EveryUpdate,
    /// Alert only when the device crosses into a zone. Optionally also alert
    /// when it leaves one.
    OnEntry { alert_on_exit: bool },
}

/// Result of evaluating one position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Geofences containing the position, in set order.
    pub inside: Vec<GeofenceId>,
    /// One event per geofence the device is in or just left.
    pub events: Vec<GeofenceEvent>,
    /// Alerts to present, at most one per kind.
    pub alerts: Vec<Alert>,
}

impl Evaluation {
    #[must_use]
    pub fn is_inside(&self) -> bool {
        !self.inside.is_empty()
    }
}

/// Evaluates positions against a fixed set of geofences.
pub struct GeofenceEvaluator {
    geofences: GeofenceSet,
    policy: AlertPolicy,
    presence: HashMap<GeofenceId, Presence>,
}

impl GeofenceEvaluator {
    #[must_use]
    pub fn new(geofences: GeofenceSet, policy: AlertPolicy) -> Self {
        let presence = geofences
            .iter()
            .map(|g| (g.id, Presence::default()))
            .collect();
        Self {
            geofences,
            policy,
            presence,
        }
    }

    #[must_use]
    pub fn geofences(&self) -> &GeofenceSet {
        &self.geofences
    }

    #[must_use]
    pub fn policy(&self) -> AlertPolicy {
        self.policy
    }

    /// Presence recorded for `id` at the last evaluation.
    #[must_use]
    pub fn presence(&self, id: GeofenceId) -> Option<Presence> {
        self.presence.get(&id).copied()
    }

    /// Evaluate `position` against every geofence.
    pub fn evaluate(&mut self, position: &Coordinate) -> Evaluation {
        let mut evaluation = Evaluation {
            inside: self.geofences.containing(position),
            ..Evaluation::default()
        };
        let mut entered = false;
        let mut exited = false;

        for geofence in &self.geofences {
            let contained = evaluation.inside.contains(&geofence.id);
            let distance = geofence.distance_from_center(position);

            let presence = self.presence.entry(geofence.id).or_default();
            let Some(transition) = presence.advance(contained) else {
                continue;
            };
            tracing::debug!(
                geofence = %geofence.id,
                distance_meters = distance,
                ?transition,
                "geofence evaluated"
            );
            match transition {
                Transition::Entered => entered = true,
                Transition::Exited => exited = true,
                Transition::StillInside => {}
            }
            evaluation.events.push(GeofenceEvent::new(
                transition.into(),
                geofence.id,
                *position,
                distance,
            ));
        }

        match self.policy {
            AlertPolicy::EveryUpdate => {
                if self.geofences.contains_any(position) {
                    evaluation.alerts.push(Alert::geofence_entered());
                }
            }
            AlertPolicy::OnEntry { alert_on_exit } => {
                if entered {
                    evaluation.alerts.push(Alert::geofence_entered());
                }
                if exited && alert_on_exit {
                    evaluation.alerts.push(Alert::geofence_exited());
                }
            }
        }

        evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geowatch_domain::coordinate::EARTH_RADIUS_METERS;
    use geowatch_domain::event::EventType;
    use geowatch_domain::geofence::Geofence;

    const CENTER: Coordinate = Coordinate::new(37.78825, -122.4324);

    fn north_of(from: Coordinate, meters: f64) -> Coordinate {
        let degrees = (meters / EARTH_RADIUS_METERS).to_degrees();
        Coordinate::new(from.latitude + degrees, from.longitude)
    }

    fn single_zone() -> GeofenceSet {
        let zone = Geofence::builder()
            .id(GeofenceId::new(1))
            .center(CENTER)
            .radius_meters(100.0)
            .build()
            .unwrap();
        GeofenceSet::new(vec![zone]).unwrap()
    }

    #[test]
    fn should_alert_when_sample_is_at_center() {
        let mut evaluator = GeofenceEvaluator::new(single_zone(), AlertPolicy::EveryUpdate);
        let evaluation = evaluator.evaluate(&CENTER);

        assert!(evaluation.is_inside());
        assert_eq!(evaluation.inside, vec![GeofenceId::new(1)]);
        assert_eq!(evaluation.alerts, vec![Alert::geofence_entered()]);
    }

    #[test]
    fn should_not_alert_when_sample_is_two_hundred_meters_away() {
        let mut evaluator = GeofenceEvaluator::new(single_zone(), AlertPolicy::EveryUpdate);
        let evaluation = evaluator.evaluate(&north_of(CENTER, 200.0));

        assert!(!evaluation.is_inside());
        assert!(evaluation.alerts.is_empty());
        assert!(evaluation.events.is_empty());
    }

    #[test]
    fn should_never_alert_with_empty_geofence_set() {
        let mut evaluator = GeofenceEvaluator::new(GeofenceSet::default(), AlertPolicy::EveryUpdate);
        let evaluation = evaluator.evaluate(&CENTER);
        assert!(!evaluation.is_inside());
        assert!(evaluation.alerts.is_empty());
    }

    #[test]
    fn should_repeat_alert_on_every_update_while_inside() {
        let mut evaluator = GeofenceEvaluator::new(single_zone(), AlertPolicy::EveryUpdate);

        let first = evaluator.evaluate(&CENTER);
        let second = evaluator.evaluate(&CENTER);

        assert_eq!(first.alerts.len(), 1);
        assert_eq!(second.alerts.len(), 1);
        assert_eq!(second.events[0].event_type, EventType::GeofenceInside);
    }

    #[test]
    fn should_raise_single_alert_when_inside_several_zones() {
        let big = Geofence::builder()
            .id(GeofenceId::new(2))
            .center(CENTER)
            .radius_meters(1_000.0)
            .build()
            .unwrap();
        let mut zones: Vec<_> = single_zone().iter().cloned().collect();
        zones.push(big);
        let mut evaluator = GeofenceEvaluator::new(
            GeofenceSet::new(zones).unwrap(),
            AlertPolicy::EveryUpdate,
        );

        let evaluation = evaluator.evaluate(&CENTER);
        assert_eq!(evaluation.inside.len(), 2);
        assert_eq!(evaluation.events.len(), 2);
        assert_eq!(evaluation.alerts.len(), 1);
    }

    #[test]
    fn should_alert_only_on_entry_when_edge_triggered() {
        let mut evaluator = GeofenceEvaluator::new(
            single_zone(),
            AlertPolicy::OnEntry {
                alert_on_exit: false,
            },
        );
        let outside = north_of(CENTER, 200.0);

        let entered = evaluator.evaluate(&CENTER);
        let stayed = evaluator.evaluate(&CENTER);
        let left = evaluator.evaluate(&outside);
        let back = evaluator.evaluate(&CENTER);

        assert_eq!(entered.alerts, vec![Alert::geofence_entered()]);
        assert_eq!(entered.events[0].event_type, EventType::GeofenceEntered);
        assert!(stayed.alerts.is_empty());
        assert_eq!(stayed.events[0].event_type, EventType::GeofenceInside);
        assert!(left.alerts.is_empty());
        assert_eq!(left.events[0].event_type, EventType::GeofenceExited);
        assert_eq!(back.alerts, vec![Alert::geofence_entered()]);
    }

    #[test]
    fn should_alert_on_exit_when_enabled() {
        let mut evaluator = GeofenceEvaluator::new(
            single_zone(),
            AlertPolicy::OnEntry {
                alert_on_exit: true,
            },
        );

        evaluator.evaluate(&CENTER);
        let left = evaluator.evaluate(&north_of(CENTER, 200.0));

        assert_eq!(left.alerts, vec![Alert::geofence_exited()]);
        assert_eq!(
            evaluator.presence(GeofenceId::new(1)),
            Some(Presence::Outside)
        );
    }

    #[test]
    fn should_not_alert_when_sample_is_exactly_on_boundary() {
        let edge = north_of(CENTER, 100.0);
        let zone = Geofence::builder()
            .id(GeofenceId::new(1))
            .center(CENTER)
            .radius_meters(CENTER.distance_to(&edge))
            .build()
            .unwrap();
        let mut evaluator = GeofenceEvaluator::new(
            GeofenceSet::new(vec![zone]).unwrap(),
            AlertPolicy::EveryUpdate,
        );

        let evaluation = evaluator.evaluate(&edge);

        assert!(!evaluation.is_inside());
        assert!(evaluation.alerts.is_empty());
        assert!(evaluation.events.is_empty());
        assert_eq!(
            evaluator.presence(GeofenceId::new(1)),
            Some(Presence::Outside)
        );
    }

    #[test]
    fn should_alert_when_sample_is_just_inside_boundary() {
        let edge = north_of(CENTER, 100.0);
        let zone = Geofence::builder()
            .id(GeofenceId::new(1))
            .center(CENTER)
            .radius_meters(CENTER.distance_to(&edge) + 1e-6)
            .build()
            .unwrap();
        let mut evaluator = GeofenceEvaluator::new(
            GeofenceSet::new(vec![zone]).unwrap(),
            AlertPolicy::EveryUpdate,
        );

        let evaluation = evaluator.evaluate(&edge);

        assert_eq!(evaluation.inside, vec![GeofenceId::new(1)]);
        assert_eq!(evaluation.alerts, vec![Alert::geofence_entered()]);
    }

    #[test]
    fn should_record_distance_in_events() {
        let mut evaluator = GeofenceEvaluator::new(single_zone(), AlertPolicy::EveryUpdate);
        let near = north_of(CENTER, 50.0);

        let evaluation = evaluator.evaluate(&near);

        let event = &evaluation.events[0];
        assert!((event.distance_meters - 50.0).abs() < 0.01);
        assert_eq!(event.position, near);
    }
}
