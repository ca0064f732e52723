//! Read-only reference data loaded from a TOML file at startup.
//!
//! Crop-disease profiles and supply-chain delivery snapshots are advisory
//! datasets maintained outside the request path. They are loaded once,
//! shared immutably through the application state, and never written to by
//! handlers.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Treatment options for one disease, grouped by approach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentPlan {
    /// Organic treatment steps
    pub organic: Vec<String>,
    /// Chemical treatment steps
    pub chemical: Vec<String>,
    /// Preventive measures
    pub preventive: Vec<String>,
}

/// Advisory profile for one crop disease.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseProfile {
    /// Short lookup key (e.g., "blight")
    pub key: String,
    /// Full disease name
    pub disease: String,
    /// Severity grade: low, medium, or high
    pub severity: String,
    /// One-paragraph description
    pub description: String,
    /// Observable symptoms
    pub symptoms: Vec<String>,
    /// Conditions that favor the disease
    pub causes: Vec<String>,
    /// Treatment options
    pub treatments: TreatmentPlan,
    /// Expected recovery window under treatment
    pub expected_recovery: String,
    /// Yield impact if left untreated
    pub yield_impact: String,
}

/// One stop on a delivery route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryStop {
    /// Stop location name
    pub location: String,
    /// Stop status: completed, in-progress, or pending
    pub status: String,
    /// Scheduled time at this stop (HH:MM)
    pub time: String,
}

/// Snapshot of one meal delivery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Delivery identifier (e.g., "DEL-001")
    pub id: String,
    /// Run status: loading, in-transit, or delivered
    pub status: String,
    /// Driver name
    pub driver: String,
    /// Vehicle label
    pub vehicle: String,
    /// Route name
    pub route: String,
    /// Stops along the route
    pub stops: Vec<DeliveryStop>,
    /// Meals carried on this run
    pub total_meals: u32,
    /// Estimated arrival time (HH:MM)
    pub estimated_arrival: String,
}

/// The full injected reference dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Crop-disease advisory profiles
    #[serde(default)]
    pub diseases: Vec<DiseaseProfile>,
    /// Supply-chain delivery snapshots
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
}

/// Loads reference data from a TOML file.
pub fn load_reference_data<P: AsRef<Path>>(path: P) -> Result<ReferenceData> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read reference data file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse reference data: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_reference_data() {
        let toml_str = r#"
            [[diseases]]
            key = "blight"
            disease = "Late Blight"
            severity = "high"
            description = "A destructive disease of tomatoes and potatoes."
            symptoms = ["Dark, water-soaked lesions on leaves"]
            causes = ["High humidity (>90%)"]
            expectedRecovery = "2-3 weeks with proper treatment"
            yieldImpact = "Can reduce yield by 30-70% if untreated"

            [diseases.treatments]
            organic = ["Apply copper-based fungicides"]
            chemical = ["Apply chlorothalonil fungicide"]
            preventive = ["Plant resistant varieties"]

            [[deliveries]]
            id = "DEL-001"
            status = "in-transit"
            driver = "John Onyango"
            vehicle = "Truck #001"
            route = "kasarani-mwiki route"
            totalMeals = 500
            estimatedArrival = "10:30"

            [[deliveries.stops]]
            location = "Seasons"
            status = "completed"
            time = "09:30"
        "#;

        let data: ReferenceData = toml::from_str(toml_str).unwrap();
        assert_eq!(data.diseases.len(), 1);
        assert_eq!(data.diseases[0].disease, "Late Blight");
        assert_eq!(data.diseases[0].treatments.organic.len(), 1);
        assert_eq!(data.deliveries.len(), 1);
        assert_eq!(data.deliveries[0].total_meals, 500);
        assert_eq!(data.deliveries[0].stops[0].location, "Seasons");
    }

    #[test]
    fn test_empty_sections_default() {
        let data: ReferenceData = toml::from_str("").unwrap();
        assert!(data.diseases.is_empty());
        assert!(data.deliveries.is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_reference_data("/nonexistent/reference.toml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
