//! Unit tests for cab-core primitives.

#[cfg(test)]
mod ids {
    use crate::{TripId, VehicleId};

    #[test]
    fn next_increments() {
        assert_eq!(TripId(4).next(), TripId(5));
        assert_eq!(TripId(u32::MAX).next(), TripId(0));
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
        assert_eq!(TripId::default(), TripId(0));
    }
}

#[cfg(test)]
mod geo {
    use crate::{Heading, Point, distance_between, heading_between};

    #[test]
    fn zero_distance() {
        let p = Point::new(59.941814, 30.232328);
        assert!(distance_between(p, p) < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 6378137 m * π / 180
        let d = Point::new(30.0, -88.0).distance_m(Point::new(31.0, -88.0));
        assert!((d - 111_319.49).abs() < 0.5, "got {d}");
    }

    #[test]
    fn thousandth_of_longitude_at_equator() {
        let d = Point::new(0.0, 0.0).distance_m(Point::new(0.0, 0.001));
        assert!((d - 111.3195).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(59.944047, 30.230815);
        let b = Point::new(59.941814, 30.232328);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-9);
    }

    #[test]
    fn cardinal_headings() {
        let o = Point::new(0.0, 0.0);
        assert!(heading_between(o, Point::new(1.0, 0.0)).difference(Heading::NORTH) < 1e-9);
        assert!(heading_between(o, Point::new(0.0, 1.0)).difference(Heading::EAST) < 1e-9);
        assert!(heading_between(o, Point::new(-1.0, 0.0)).difference(Heading::SOUTH) < 1e-9);
        assert!(heading_between(o, Point::new(0.0, -1.0)).difference(Heading::WEST) < 1e-9);
    }

    #[test]
    fn heading_is_in_range() {
        let h = Point::new(10.0, 10.0).heading_to(Point::new(9.0, 9.0));
        assert!((0.0..360.0).contains(&h.degrees()));
        assert!(h.degrees() > 180.0 && h.degrees() < 270.0, "got {h}");
    }

    #[test]
    fn identical_points_head_north() {
        let p = Point::new(12.0, 34.0);
        assert_eq!(heading_between(p, p), Heading::NORTH);
    }

    #[test]
    fn heading_normalisation() {
        assert_eq!(Heading::from_degrees(-90.0), Heading::WEST);
        assert_eq!(Heading::from_degrees(450.0), Heading::EAST);
        assert!((Heading::from_degrees(350.0).difference(Heading::from_degrees(10.0)) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn try_new_rejects_garbage() {
        assert!(Point::try_new(91.0, 0.0).is_err());
        assert!(Point::try_new(0.0, f64::NAN).is_err());
        assert_eq!(Point::try_new(1.0, 2.0).unwrap(), Point::new(1.0, 2.0));
    }
}

#[cfg(test)]
mod config {
    use crate::{CabError, Point, TripConfig};

    #[test]
    fn defaults_are_valid() {
        let cfg = TripConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tick_interval().as_millis(), 100);
    }

    #[test]
    fn zero_step_rejected() {
        let cfg = TripConfig { step_m: 0.0, ..TripConfig::default() };
        assert!(matches!(cfg.validate(), Err(CabError::Config(_))));
    }

    #[test]
    fn zero_interval_rejected() {
        let cfg = TripConfig { tick_interval_ms: 0, ..TripConfig::default() };
        assert!(matches!(cfg.validate(), Err(CabError::Config(_))));
    }

    #[test]
    fn bad_start_rejected() {
        let cfg = TripConfig { vehicle_start: Point::new(120.0, 0.0), ..TripConfig::default() };
        assert!(matches!(cfg.validate(), Err(CabError::InvalidCoordinate { .. })));
    }
}
