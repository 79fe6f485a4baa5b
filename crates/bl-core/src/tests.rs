//! Unit tests for bl-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, WayId};

    #[test]
    fn ordering_and_display() {
        assert!(NodeId(100) > NodeId(99));
        assert_eq!(NodeId(7).to_string(), "n7");
        assert_eq!(WayId(12).to_string(), "w12");
    }

    #[test]
    fn parse_from_str() {
        assert_eq!(" 4711 ".parse::<NodeId>().unwrap(), NodeId(4711));
        assert!("abc".parse::<WayId>().is_err());
    }
}

#[cfg(test)]
mod geo {
    use approx::assert_abs_diff_eq;

    use crate::{BoundingBox, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(52.2719, 8.0476);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(52.0, 8.0);
        let b = GeoPoint::new(53.0, 8.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(52.27, 8.04);
        let b = GeoPoint::new(52.31, 8.12);
        assert_abs_diff_eq!(a.distance_m(b), b.distance_m(a), epsilon = 1e-9);
    }

    #[test]
    fn lon_lat_order() {
        let p = GeoPoint::from_lon_lat([8.0, 52.0]);
        assert_eq!(p.lat, 52.0);
        assert_eq!(p.lon, 8.0);
    }

    #[test]
    fn bbox_center() {
        let b = BoundingBox::new(0.0, 0.0, 0.2, 0.4);
        let c = b.center();
        assert_abs_diff_eq!(c.lat, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(c.lon, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn bbox_enclosing() {
        let pts = [GeoPoint::new(1.0, 5.0), GeoPoint::new(-1.0, 7.0), GeoPoint::new(0.5, 6.0)];
        let b = BoundingBox::enclosing(pts).unwrap();
        assert_eq!(b, BoundingBox::new(-1.0, 5.0, 1.0, 7.0));
        assert!(BoundingBox::enclosing(std::iter::empty()).is_none());
    }
}

#[cfg(test)]
mod config {
    use crate::AnalysisConfig;

    #[test]
    fn defaults() {
        let c = AnalysisConfig::default();
        assert_eq!(c.max_speed_kmh, 130.0);
        assert_eq!(c.routing_speed_ceiling_kmh, 110.0);
        assert_eq!(c.reconfig_interval_secs, 15.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_speed() {
        let c = AnalysisConfig { max_speed_kmh: 0.0, ..AnalysisConfig::default() };
        assert!(c.validate().is_err());
        let c = AnalysisConfig { reconfig_interval_secs: -1.0, ..AnalysisConfig::default() };
        assert!(c.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let json = br#"{ "max_speed_kmh": 160.0, "seed": 7 }"#;
        let c = AnalysisConfig::from_json_reader(&json[..]).unwrap();
        assert_eq!(c.max_speed_kmh, 160.0);
        assert_eq!(c.seed, 7);
        assert_eq!(c.routing_profile, "car");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut r = SimRng::new(1);
        let empty: [u64; 0] = [];
        assert!(r.choose(&empty).is_none());
        assert_eq!(r.choose(&[5u64]), Some(&5));
    }
}
