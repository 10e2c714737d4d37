//! Accident alerts and the proceed/deny review.
//!
//! The records here are illustrative: detections, frames and nearby services
//! are fixed sample values, and reviewing an alert only yields the action the
//! front-end should take.

use crate::core::geo::LatLng;
use crate::navigation::directions_url;
use crate::page::MapQuery;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DENIED_MESSAGE: &str = "Accident alert has been denied.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// A still from the detection footage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionFrame {
    pub id: u32,
    pub src: String,
    pub alt: String,
    /// Offset into the clip, `mm:ss`
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentAlert {
    pub id: String,
    pub location: LatLng,
    /// RFC 3339 detection time
    pub timestamp: String,
    pub severity: Severity,
    pub frames: Vec<CollisionFrame>,
}

impl AccidentAlert {
    /// The sample detection shown on the verification page
    pub fn sample() -> Self {
        let frames = [(1, "00:05"), (2, "00:08"), (3, "00:12")]
            .into_iter()
            .map(|(id, time)| CollisionFrame {
                id,
                src: "/placeholder.svg?height=200&width=320".to_string(),
                alt: format!("Collision frame {id}"),
                time: time.to_string(),
            })
            .collect();

        Self {
            id: "ACC-2025-04-05-001".to_string(),
            location: LatLng::new(30.275224, 77.989081),
            timestamp: "2025-04-05T14:30:00Z".to_string(),
            severity: Severity::Medium,
            frames,
        }
    }

    pub fn directions_url(&self) -> String {
        directions_url(&self.location)
    }

    /// Query for the map page of this alert
    pub fn map_query(&self) -> MapQuery {
        MapQuery::new(self.id.clone(), self.location)
    }

    pub fn review(&self, decision: Decision) -> AlertAction {
        match decision {
            Decision::Proceed => {
                log::info!("alert {} confirmed, opening directions", self.id);
                AlertAction::OpenDirections(self.directions_url())
            }
            Decision::Deny => {
                log::info!("alert {} denied", self.id);
                AlertAction::Notify(DENIED_MESSAGE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Proceed,
    Deny,
}

impl std::str::FromStr for Decision {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proceed" => Ok(Decision::Proceed),
            "deny" => Ok(Decision::Deny),
            other => Err(MapError::ParseError(format!("unknown decision: {other}"))),
        }
    }
}

/// What the front-end should do after a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertAction {
    /// Open this URL in a new browser tab
    OpenDirections(String),
    /// Show this message to the reviewer
    Notify(String),
}

/// Reviewer state while looking at an alert
#[derive(Debug, Clone, PartialEq)]
pub struct AlertReview {
    alert: AccidentAlert,
    selected_frame: usize,
}

impl AlertReview {
    pub fn new(alert: AccidentAlert) -> Self {
        Self {
            alert,
            selected_frame: 0,
        }
    }

    pub fn alert(&self) -> &AccidentAlert {
        &self.alert
    }

    pub fn selected_frame(&self) -> Option<&CollisionFrame> {
        self.alert.frames.get(self.selected_frame)
    }

    pub fn select_frame(&mut self, index: usize) -> Result<&CollisionFrame> {
        if index >= self.alert.frames.len() {
            return Err(MapError::InvalidInput(format!(
                "frame {} out of range ({} frames)",
                index,
                self.alert.frames.len()
            )));
        }
        self.selected_frame = index;
        Ok(&self.alert.frames[index])
    }

    pub fn decide(&self, decision: Decision) -> AlertAction {
        self.alert.review(decision)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentDetails {
    pub collision_type: String,
    pub vehicles: u32,
    pub severity: Severity,
}

impl AccidentDetails {
    pub fn sample() -> Self {
        Self {
            collision_type: "Vehicle Collision".to_string(),
            vehicles: 2,
            severity: Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    Police,
    Ambulance,
    FireDepartment,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Police => write!(f, "Police"),
            ServiceKind::Ambulance => write!(f, "Ambulance"),
            ServiceKind::FireDepartment => write!(f, "Fire Dept"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyService {
    pub kind: ServiceKind,
    pub distance_miles: f64,
    pub eta_minutes: u32,
}

impl EmergencyService {
    /// Responders listed next to the accident map
    pub fn nearby_sample() -> Vec<EmergencyService> {
        vec![
            EmergencyService {
                kind: ServiceKind::Police,
                distance_miles: 2.3,
                eta_minutes: 7,
            },
            EmergencyService {
                kind: ServiceKind::Ambulance,
                distance_miles: 1.5,
                eta_minutes: 5,
            },
            EmergencyService {
                kind: ServiceKind::FireDepartment,
                distance_miles: 3.1,
                eta_minutes: 9,
            },
        ]
    }
}

impl fmt::Display for EmergencyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1} miles away (est. {} min)",
            self.kind, self.distance_miles, self.eta_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_alert() {
        let alert = AccidentAlert::sample();

        assert_eq!(alert.id, "ACC-2025-04-05-001");
        assert_eq!(alert.location, LatLng::new(30.275224, 77.989081));
        assert_eq!(alert.severity, Severity::Medium);
        assert_eq!(
            alert.frames.iter().map(|f| f.time.as_str()).collect::<Vec<_>>(),
            vec!["00:05", "00:08", "00:12"]
        );
        assert_eq!(alert.frames[2].alt, "Collision frame 3");
    }

    #[test]
    fn test_proceed_opens_directions() {
        let action = AccidentAlert::sample().review(Decision::Proceed);
        assert_eq!(
            action,
            AlertAction::OpenDirections(
                "https://www.google.com/maps/dir/?api=1&destination=30.275224,77.989081&travelmode=driving"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_deny_notifies() {
        let action = AccidentAlert::sample().review(Decision::Deny);
        assert_eq!(action, AlertAction::Notify("Accident alert has been denied.".to_string()));
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!("Proceed".parse::<Decision>().unwrap(), Decision::Proceed);
        assert_eq!(" deny ".parse::<Decision>().unwrap(), Decision::Deny);
        assert!("maybe".parse::<Decision>().is_err());
    }

    #[test]
    fn test_frame_selection() {
        let mut review = AlertReview::new(AccidentAlert::sample());
        assert_eq!(review.selected_frame().map(|f| f.id), Some(1));

        assert_eq!(review.select_frame(2).unwrap().time, "00:12");
        assert_eq!(review.selected_frame().map(|f| f.id), Some(3));

        assert!(review.select_frame(3).is_err());
        assert_eq!(review.selected_frame().map(|f| f.id), Some(3));
    }

    #[test]
    fn test_map_query_for_alert() {
        let query = AccidentAlert::sample().map_query();
        assert_eq!(query.to_query_string(), "id=ACC-2025-04-05-001&lat=30.275224&lng=77.989081");
    }

    #[test]
    fn test_nearby_services_listing() {
        let lines: Vec<String> = EmergencyService::nearby_sample()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            lines,
            vec![
                "Police: 2.3 miles away (est. 7 min)",
                "Ambulance: 1.5 miles away (est. 5 min)",
                "Fire Dept: 3.1 miles away (est. 9 min)",
            ]
        );
        assert_eq!(AccidentDetails::sample().vehicles, 2);
    }
}
