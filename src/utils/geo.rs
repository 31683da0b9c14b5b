const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers, rounded to 2 decimals
///
/// A missing coordinate short-circuits to 0. A coordinate equal to 0.0 is
/// treated the same way: legacy records store 0.0 for "no position", so the
/// two are indistinguishable here.
pub fn distance_km(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
) -> f64 {
    let (Some(lat1), Some(lon1), Some(lat2), Some(lon2)) = (lat1, lon1, lat2, lon2) else {
        return 0.0;
    };
    if lat1 == 0.0 || lon1 == 0.0 || lat2 == 0.0 || lon2 == 0.0 {
        return 0.0;
    }

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round2(EARTH_RADIUS_KM * c)
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_casablanca_rabat() {
        // Casablanca center
        let casablanca = (33.5731, -7.5898);
        // Rabat center
        let rabat = (34.0209, -6.8416);

        let distance = distance_km(
            Some(casablanca.0),
            Some(casablanca.1),
            Some(rabat.0),
            Some(rabat.1),
        );
        // Straight-line distance is about 85 km
        assert!((distance - 85.2).abs() < 0.86, "got {distance}");
    }

    #[test]
    fn test_distance_symmetry() {
        let a = (31.6295, -7.9811); // Marrakech
        let b = (35.7595, -5.8340); // Tangier

        let ab = distance_km(Some(a.0), Some(a.1), Some(b.0), Some(b.1));
        let ba = distance_km(Some(b.0), Some(b.1), Some(a.0), Some(a.1));

        assert_eq!(ab, ba);
        assert!(ab > 0.0);
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let d = distance_km(Some(34.0181), Some(-5.0078), Some(34.0181), Some(-5.0078));
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_missing_coordinate_gives_zero() {
        assert_eq!(distance_km(None, Some(-7.5898), Some(34.0209), Some(-6.8416)), 0.0);
        assert_eq!(distance_km(Some(33.5731), None, Some(34.0209), Some(-6.8416)), 0.0);
        assert_eq!(distance_km(Some(33.5731), Some(-7.5898), None, Some(-6.8416)), 0.0);
        assert_eq!(distance_km(Some(33.5731), Some(-7.5898), Some(34.0209), None), 0.0);
        assert_eq!(distance_km(None, None, None, None), 0.0);
    }

    #[test]
    fn test_zero_coordinate_gives_zero() {
        // Zero doubles as the "unset" marker, even for points genuinely on
        // the equator or prime meridian.
        assert_eq!(distance_km(Some(0.0), Some(-7.5898), Some(34.0209), Some(-6.8416)), 0.0);
        assert_eq!(distance_km(Some(33.5731), Some(0.0), Some(34.0209), Some(-6.8416)), 0.0);
        assert_eq!(distance_km(Some(33.5731), Some(-7.5898), Some(0.0), Some(-6.8416)), 0.0);
        assert_eq!(distance_km(Some(33.5731), Some(-7.5898), Some(34.0209), Some(0.0)), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(85.19543), 85.2);
        assert_eq!(round2(260.004), 260.0);
        assert_eq!(round2(12.345678), 12.35);
    }
}
