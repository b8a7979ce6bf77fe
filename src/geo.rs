use crate::error::ValidationError;
use core::fmt;
#[cfg(feature = "serde")]
use serde::Serialize;

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A named location. Always finite and within coordinate range.
///
/// Two points are equal when they carry the same name and the same
/// coordinates, regardless of where they were constructed.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone)]
pub struct GeoPoint {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// # Examples
    /// ```
    /// use treffpunkt::geo::GeoPoint;
    ///
    /// let nyc = GeoPoint::new("New York", 40.7128, -74.0060).unwrap();
    /// assert_eq!(nyc.name(), "New York");
    ///
    /// assert!(GeoPoint::new("Nowhere", 91.0, 0.0).is_err());
    /// assert!(GeoPoint::new("Nowhere", 0.0, f64::NAN).is_err());
    /// ```
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Result<GeoPoint, ValidationError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            // Adding zero turns -0.0 into 0.0 so equality below stays by value
            Ok(GeoPoint {
                name: name.to_string(),
                latitude: latitude + 0.0,
                longitude: longitude + 0.0,
            })
        } else {
            Err(ValidationError::InvalidCoordinate {
                name: name.to_string(),
                latitude,
                longitude,
            })
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance_km(self, other)
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

// Coordinates are never NaN, so bitwise equality is reflexive
impl Eq for GeoPoint {}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.latitude, self.longitude)
    }
}

/// Great circle distance in kilometers, using the haversine formula.
///
/// The haversine term is clamped to [0, 1] so rounding near antipodal
/// points can never push the square root out of its domain.
///
/// # Examples
/// ```
/// use treffpunkt::geo::{distance_km, GeoPoint};
///
/// let a = GeoPoint::new("Lower Manhattan", 40.7128, -74.0060).unwrap();
/// let b = GeoPoint::new("Williamsburg", 40.7306, -73.9352).unwrap();
///
/// let d = distance_km(&a, &b);
/// assert!(d > 5.0 && d < 7.0);
/// assert_eq!(distance_km(&a, &a), 0.0);
/// ```
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (delta_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Arithmetic mean of the given coordinates, labelled "Midpoint".
/// Good enough as a search centre for points a few kilometers apart.
pub fn midpoint<'a, I>(points: I) -> Option<GeoPoint>
where
    I: IntoIterator<Item = &'a GeoPoint>,
{
    let (count, latitude, longitude) = points
        .into_iter()
        .fold((0_usize, 0.0, 0.0), |(count, lat, lon), point| {
            (count + 1, lat + point.latitude, lon + point.longitude)
        });

    if count == 0 {
        return None;
    }

    // The mean of in-range values stays in range
    Some(GeoPoint {
        name: "Midpoint".to_string(),
        latitude: latitude / count as f64,
        longitude: longitude / count as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str, latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(name, latitude, longitude).unwrap()
    }

    #[test]
    fn london_to_paris() {
        let london = point("London", 51.5074, -0.1278);
        let paris = point("Paris", 48.8566, 2.3522);

        let distance = distance_km(&london, &paris);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let a = point("a", 0.0, 0.0);
        let b = point("b", 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;

        assert!((distance_km(&a, &b) - half).abs() < 1e-6);

        let north = point("north", 90.0, 0.0);
        let south = point("south", -90.0, 0.0);
        assert!(distance_km(&north, &south).is_finite());
        assert!((distance_km(&north, &south) - half).abs() < 1e-6);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(GeoPoint::new("x", -90.1, 0.0).is_err());
        assert!(GeoPoint::new("x", 0.0, 180.5).is_err());
        assert!(GeoPoint::new("x", f64::INFINITY, 0.0).is_err());
        assert!(GeoPoint::new("x", 90.0, -180.0).is_ok());
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(point("Cafe", 1.0, 2.0), point("Cafe", 1.0, 2.0));
        assert_ne!(point("Cafe", 1.0, 2.0), point("Library", 1.0, 2.0));
        assert_ne!(point("Cafe", 1.0, 2.0), point("Cafe", 1.0, 2.5));
    }

    #[test]
    fn signed_zero_is_the_same_coordinate() {
        let a = point("Null Island", 0.0, -0.0);
        let b = point("Null Island", -0.0, 0.0);

        assert_eq!(a, b);
        assert_eq!(distance_km(&a, &b), 0.0);
        assert!(a.longitude().is_sign_positive());
    }

    #[test]
    fn midpoint_averages() {
        let points = vec![point("a", 40.0, -74.0), point("b", 41.0, -73.0)];
        let mid = midpoint(&points).unwrap();

        assert_eq!(mid.name(), "Midpoint");
        assert!((mid.latitude() - 40.5).abs() < 1e-12);
        assert!((mid.longitude() + 73.5).abs() < 1e-12);
        assert!(midpoint(&Vec::<GeoPoint>::new()).is_none());
    }
}
