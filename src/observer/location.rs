use serde::Serialize;
use utoipa::ToSchema;

use crate::frames::{geodetic_to_earth_fixed, EarthFixedVector, Geodetic};
use crate::observer::ObserverError;

/// Where the observer stands. Every write goes through `set`, which wraps the
/// longitude into (-180, 180] and clamps latitude and altitude, so a stored
/// location is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ObserverLocation {
    latitude_deg: f64,
    longitude_deg: f64,
    altitude_m: f64,
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_m: 0.0,
        }
    }
}

impl ObserverLocation {
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<Self, ObserverError> {
        let mut location = Self::default();
        location.set(latitude_deg, longitude_deg, altitude_m)?;
        Ok(location)
    }

    /// Parses a `"lat, lon"` pair as written in station configs.
    pub fn from_coordinates(
        coordinates: &str,
        altitude_m: Option<f64>,
    ) -> Result<Self, ObserverError> {
        let invalid = || ObserverError::InvalidCoordinates(coordinates.to_string());
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(invalid());
        }
        let lat: f64 = parts[0].parse().map_err(|_| invalid())?;
        let lon: f64 = parts[1].parse().map_err(|_| invalid())?;
        Self::new(lat, lon, altitude_m.unwrap_or(0.0))
    }

    /// Replaces the location. Non-finite input is rejected and leaves the
    /// previous value in place.
    pub fn set(
        &mut self,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<(), ObserverError> {
        check_finite("latitude", latitude_deg)?;
        check_finite("longitude", longitude_deg)?;
        check_finite("altitude", altitude_m)?;

        self.latitude_deg = latitude_deg.clamp(-90.0, 90.0);
        self.longitude_deg = wrap_longitude(longitude_deg);
        self.altitude_m = altitude_m.max(0.0);
        Ok(())
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn altitude_m(&self) -> f64 {
        self.altitude_m
    }

    pub fn geodetic(&self) -> Geodetic {
        Geodetic {
            latitude_deg: self.latitude_deg,
            longitude_deg: self.longitude_deg,
            altitude_m: self.altitude_m,
        }
    }

    pub fn position_earth_fixed(&self) -> EarthFixedVector {
        geodetic_to_earth_fixed(self.latitude_deg, self.longitude_deg, self.altitude_m)
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ObserverError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ObserverError::NonFinite { field, value })
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitude_wraps_into_range() {
        let loc = ObserverLocation::new(0.0, 190.0, 0.0).unwrap();
        assert!((loc.longitude_deg() + 170.0).abs() < 1e-9);

        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-180.0), 180.0);
        assert!((wrap_longitude(-190.0) - 170.0).abs() < 1e-9);
        assert!((wrap_longitude(725.0) - 5.0).abs() < 1e-9);
        assert!((wrap_longitude(13.405) - 13.405).abs() < 1e-9);
    }

    #[test]
    fn latitude_and_altitude_clamp() {
        let loc = ObserverLocation::new(95.0, 0.0, -10.0).unwrap();
        assert_eq!(loc.latitude_deg(), 90.0);
        assert_eq!(loc.altitude_m(), 0.0);

        let loc = ObserverLocation::new(-91.0, 0.0, 120.0).unwrap();
        assert_eq!(loc.latitude_deg(), -90.0);
        assert_eq!(loc.altitude_m(), 120.0);
    }

    #[test]
    fn non_finite_input_is_rejected_and_keeps_previous_value() {
        let mut loc = ObserverLocation::new(52.52, 13.405, 34.0).unwrap();
        let err = loc.set(f64::NAN, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ObserverError::NonFinite { field: "latitude", .. }));
        assert!(loc.set(0.0, f64::INFINITY, 0.0).is_err());
        assert!(loc.set(0.0, 0.0, f64::NEG_INFINITY).is_err());
        assert_eq!(loc, ObserverLocation::new(52.52, 13.405, 34.0).unwrap());
    }

    #[test]
    fn parses_coordinate_strings() {
        let loc = ObserverLocation::from_coordinates(" 48.137, 11.575 ", Some(519.0)).unwrap();
        assert_eq!(loc.latitude_deg(), 48.137);
        assert!((loc.longitude_deg() - 11.575).abs() < 1e-9);
        assert_eq!(loc.altitude_m(), 519.0);

        assert!(ObserverLocation::from_coordinates("48.137", None).is_err());
        assert!(ObserverLocation::from_coordinates("north, east", None).is_err());
        assert!(ObserverLocation::from_coordinates("1, 2, 3", None).is_err());
    }
}
