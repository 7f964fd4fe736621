use crate::core::{CoordinateMapper, PixelPoint};
use crate::error::{PlotError, PlotResult};

pub const DEFAULT_HIT_RADIUS_PX: f64 = 5.0;

/// Stateless marker lookup against mapped sample centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTester {
    radius: f64,
}

impl Default for HitTester {
    fn default() -> Self {
        Self {
            radius: DEFAULT_HIT_RADIUS_PX,
        }
    }
}

impl HitTester {
    pub fn new(radius: f64) -> PlotResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(PlotError::InvalidConfig(
                "hit radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self { radius })
    }

    #[must_use]
    pub fn radius(self) -> f64 {
        self.radius
    }

    /// Returns the lowest index whose marker contains `pointer`.
    ///
    /// Markers are scanned in ascending index order and the first one within
    /// `radius` wins, even when a later marker is closer.
    #[must_use]
    pub fn locate(
        self,
        mapper: CoordinateMapper,
        values: &[f64],
        pointer: PixelPoint,
    ) -> Option<usize> {
        if !pointer.is_finite() {
            return None;
        }
        let radius_sq = self.radius * self.radius;
        mapper
            .marker_centers(values)
            .position(|center| center.distance_squared(pointer) <= radius_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::HitTester;
    use crate::core::{
        AxisConvention, CoordinateMapper, FixedScale, MappingConfig, PixelPoint, Viewport,
    };

    fn mapper(values: &[f64]) -> CoordinateMapper {
        CoordinateMapper::resolve(
            MappingConfig {
                padding: 50.0,
                axis_convention: AxisConvention::TopDown,
                fixed_scale: Some(FixedScale::new(10.0, 200.0)),
            },
            Viewport::new(600, 600),
            values,
        )
        .expect("mapper")
    }

    #[test]
    fn center_hits_and_radius_plus_one_misses() {
        let values = [0.2, 0.8, 0.5];
        let mapper = mapper(&values);
        let tester = HitTester::new(5.0).expect("tester");
        let center = mapper.map(2, 0.5);

        assert_eq!(tester.locate(mapper, &values, center), Some(2));
        assert_eq!(
            tester.locate(mapper, &values, PixelPoint::new(center.x, center.y - 5.0)),
            Some(2)
        );
        assert_eq!(
            tester.locate(mapper, &values, PixelPoint::new(center.x, center.y - 6.0)),
            None
        );
    }

    #[test]
    fn first_match_wins_over_nearest() {
        // Markers 10px apart with a 6px radius overlap between x=54 and x=56.
        let values = [0.5, 0.5];
        let mapper = mapper(&values);
        let tester = HitTester::new(6.0).expect("tester");
        let y = mapper.value_to_y(0.5);

        assert_eq!(
            tester.locate(mapper, &values, PixelPoint::new(55.5, y)),
            Some(0)
        );
        assert_eq!(
            tester.locate(mapper, &values, PixelPoint::new(57.0, y)),
            Some(1)
        );
    }

    #[test]
    fn non_finite_pointer_never_hits() {
        let values = [0.0];
        let mapper = mapper(&values);
        let tester = HitTester::default();
        assert_eq!(
            tester.locate(mapper, &values, PixelPoint::new(f64::NAN, 50.0)),
            None
        );
    }

    #[test]
    fn negative_radius_is_rejected() {
        assert!(HitTester::new(-1.0).is_err());
        assert!(HitTester::new(f64::INFINITY).is_err());
    }
}
