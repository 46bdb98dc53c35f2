//! Device position sources.

use async_trait::async_trait;

use here2home_types::{AppError, Coordinates, Geolocator, LocationError, LocationReport};

/// A device that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    position: Coordinates,
}

impl FixedGeolocator {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.position)
    }
}

#[derive(Debug, Clone)]
enum Outcome {
    Position(Coordinates),
    Denied,
    TimedOut,
    Unavailable,
    Failed(String),
}

/// The outcome of a prompt the shell already ran on the user's device.
#[derive(Debug, Clone)]
pub struct ReportedPosition {
    outcome: Outcome,
}

impl ReportedPosition {
    /// Interprets a shell report.
    ///
    /// Returns `Ok(None)` for an empty report, which means the device has no
    /// geolocation at all. Coordinates win over `denied`, which wins over
    /// `error`. A lone latitude or longitude, or one out of range, is a bad
    /// request.
    pub fn from_report(report: LocationReport) -> Result<Option<Self>, AppError> {
        let outcome = match (report.latitude, report.longitude) {
            (Some(latitude), Some(longitude)) => {
                Outcome::Position(checked_position(latitude, longitude)?)
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(AppError::BadRequest(
                    "latitude and longitude must be sent together".into(),
                ));
            }
            (None, None) if report.denied => Outcome::Denied,
            (None, None) => {
                let Some(error) = report.error else {
                    return Ok(None);
                };
                match error.trim().to_ascii_lowercase().as_str() {
                    "timeout" => Outcome::TimedOut,
                    "unavailable" | "position_unavailable" => Outcome::Unavailable,
                    other => Outcome::Failed(other.to_string()),
                }
            }
        };
        Ok(Some(Self { outcome }))
    }
}

fn checked_position(latitude: f64, longitude: f64) -> Result<Coordinates, AppError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::BadRequest(format!(
            "position out of range: {latitude}, {longitude}"
        )));
    }
    Ok(Coordinates::new(latitude, longitude))
}

#[async_trait]
impl Geolocator for ReportedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match &self.outcome {
            Outcome::Position(position) => Ok(*position),
            Outcome::Denied => Err(LocationError::PermissionDenied),
            Outcome::TimedOut => Err(LocationError::Timeout),
            Outcome::Unavailable => Err(LocationError::ServiceUnavailable),
            Outcome::Failed(msg) => Err(LocationError::Other(msg.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_means_no_capability() {
        assert!(
            ReportedPosition::from_report(LocationReport::default())
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_report_outcomes() {
        let at = Coordinates::new(48.85, 2.35);
        let reported = ReportedPosition::from_report(LocationReport::at(at))
            .unwrap()
            .unwrap();
        assert_eq!(reported.current_position().await.unwrap(), at);

        let denied = ReportedPosition::from_report(LocationReport {
            denied: true,
            ..Default::default()
        })
        .unwrap()
        .unwrap();
        assert!(matches!(
            denied.current_position().await,
            Err(LocationError::PermissionDenied)
        ));

        let timeout = ReportedPosition::from_report(LocationReport {
            error: Some("Timeout".into()),
            ..Default::default()
        })
        .unwrap()
        .unwrap();
        assert!(matches!(
            timeout.current_position().await,
            Err(LocationError::Timeout)
        ));

        let other = ReportedPosition::from_report(LocationReport {
            error: Some("gps off".into()),
            ..Default::default()
        })
        .unwrap()
        .unwrap();
        assert!(matches!(
            other.current_position().await,
            Err(LocationError::Other(msg)) if msg == "gps off"
        ));
    }

    #[test]
    fn test_flat_coordinates_are_read_from_json() {
        let report: LocationReport =
            serde_json::from_value(serde_json::json!({"latitude": 52.52, "longitude": 13.40}))
                .unwrap();
        assert!(matches!(
            ReportedPosition::from_report(report),
            Ok(Some(ReportedPosition {
                outcome: Outcome::Position(_)
            }))
        ));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_value::<LocationReport>(
            serde_json::json!({"position": {"latitude": 1.0, "longitude": 2.0}}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_or_out_of_range_position_is_rejected() {
        let lone = LocationReport {
            latitude: Some(10.0),
            ..Default::default()
        };
        assert!(matches!(
            ReportedPosition::from_report(lone),
            Err(AppError::BadRequest(_))
        ));

        let off_the_map = LocationReport::at(Coordinates::new(91.0, 0.0));
        assert!(matches!(
            ReportedPosition::from_report(off_the_map),
            Err(AppError::BadRequest(msg)) if msg.contains("out of range")
        ));
    }
}
