//! Directions links to an external mapping service.

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Driving => write!(f, "driving"),
            TravelMode::Walking => write!(f, "walking"),
            TravelMode::Bicycling => write!(f, "bicycling"),
            TravelMode::Transit => write!(f, "transit"),
        }
    }
}

/// Directions to a destination, optionally from a known origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub destination: LatLng,
    pub origin: Option<LatLng>,
    pub travel_mode: TravelMode,
}

impl DirectionsRequest {
    pub fn driving(destination: LatLng) -> Self {
        Self {
            destination,
            origin: None,
            travel_mode: TravelMode::Driving,
        }
    }

    pub fn with_origin(mut self, origin: LatLng) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_travel_mode(mut self, travel_mode: TravelMode) -> Self {
        self.travel_mode = travel_mode;
        self
    }

    /// Without an origin the service starts from the device's own position
    pub fn url(&self) -> String {
        let mut url = String::from(DIRECTIONS_BASE_URL);
        if let Some(origin) = self.origin {
            url.push_str(&format!("&origin={},{}", origin.lat, origin.lng));
        }
        url.push_str(&format!(
            "&destination={},{}&travelmode={}",
            self.destination.lat, self.destination.lng, self.travel_mode
        ));
        url
    }
}

/// Driving directions to `destination`
pub fn directions_url(destination: &LatLng) -> String {
    DirectionsRequest::driving(*destination).url()
}
