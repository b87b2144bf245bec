//! Fixed, non-generated points of interest

use super::types::{LandmarkId, PlanePosition, Zone};

/// A non-bookable point of interest, one per zone
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub id: LandmarkId,
    pub name: &'static str,
    pub position: PlanePosition,
    pub zone: Zone,
    pub description: &'static str,
    pub sub_description: &'static str,
    pub icon_token: &'static str,
}

/// The central plaza at the middle of the plane
#[derive(Debug, Clone, PartialEq)]
pub struct Hub {
    pub title: &'static str,
    pub badge: &'static str,
    pub tagline: &'static str,
    pub position: PlanePosition,
}

impl Default for Hub {
    fn default() -> Self {
        Self {
            title: "KUHNPOHL",
            badge: "Central Plaza",
            tagline: "The World Center",
            position: PlanePosition::center(),
        }
    }
}

/// The four landmarks, placed near the centre of each quadrant
pub fn landmarks() -> Vec<Landmark> {
    vec![
        Landmark {
            id: LandmarkId(1),
            name: "L'Etoile Sauvage",
            position: PlanePosition::new(25.0, 25.0),
            zone: Zone::Forest,
            description: "Michelin Dining",
            sub_description: "Disney-grade service & Global Buffet",
            icon_token: "utensils",
        },
        Landmark {
            id: LandmarkId(2),
            name: "Lumina Carnival",
            position: PlanePosition::new(75.0, 25.0),
            zone: Zone::Mountain,
            description: "Laser Shows & Parades",
            sub_description: "Nightlife District",
            icon_token: "zap",
        },
        Landmark {
            id: LandmarkId(3),
            name: "Guest Haven",
            position: PlanePosition::new(25.0, 75.0),
            zone: Zone::Lake,
            description: "Wellness Center",
            sub_description: "Free Laundry & 24h Pharmacy",
            icon_token: "heart-pulse",
        },
        Landmark {
            id: LandmarkId(4),
            name: "Nebula Amphitheater",
            position: PlanePosition::new(75.0, 75.0),
            zone: Zone::Desert,
            description: "Global Arts Stage",
            sub_description: "World Class Performances",
            icon_token: "music",
        },
    ]
}
