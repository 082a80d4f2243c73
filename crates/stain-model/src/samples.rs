use crate::error::{ModelError, Result};
use crate::point::Point;

/// Generated sample points together with the ones classified as inside.
///
/// `inside` is always an ordered subsequence of `generated`, compared by
/// pixel position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    generated: Vec<Point>,
    inside: Vec<Point>,
}

impl SampleSet {
    /// Build a sample set, checking that `inside` is drawn from `generated`.
    pub fn new(generated: Vec<Point>, inside: Vec<Point>) -> Result<Self> {
        if inside.len() > generated.len() {
            return Err(ModelError::InsideExceedsGenerated {
                inside: inside.len(),
                generated: generated.len(),
            });
        }
        let mut candidates = generated.iter();
        for (index, point) in inside.iter().enumerate() {
            if !candidates.any(|g| g.same_pixel(point)) {
                return Err(ModelError::InsideNotGenerated { index });
            }
        }
        Ok(Self { generated, inside })
    }

    /// Partition `generated` with a predicate, keeping the original order.
    pub fn partition(generated: Vec<Point>, mut is_inside: impl FnMut(&Point) -> bool) -> Self {
        let inside = generated.iter().copied().filter(|p| is_inside(p)).collect();
        Self { generated, inside }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn generated(&self) -> &[Point] {
        &self.generated
    }

    pub fn inside(&self) -> &[Point] {
        &self.inside
    }

    /// Points that were generated but not classified as inside.
    pub fn outside(&self) -> impl Iterator<Item = &Point> + '_ {
        self.generated
            .iter()
            .filter(|p| !self.inside.iter().any(|i| i.same_pixel(p)))
    }

    pub fn len(&self) -> usize {
        self.generated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }

    pub fn inside_count(&self) -> usize {
        self.inside.len()
    }

    /// Whether `point` lands on the same pixel as one of the inside points.
    pub fn is_inside(&self, point: &Point) -> bool {
        self.inside.iter().any(|i| i.same_pixel(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn new_accepts_ordered_subsequence() {
        let generated = points(&[(0.5, 0.5), (1.2, 3.4), (2.0, 2.0)]);
        let inside = points(&[(0.9, 0.1), (2.5, 2.5)]);
        let set = SampleSet::new(generated, inside).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.inside_count(), 2);
        assert_eq!(set.outside().count(), 1);
    }

    #[test]
    fn new_rejects_more_inside_than_generated() {
        let err = SampleSet::new(points(&[(0.0, 0.0)]), points(&[(0.0, 0.0), (0.0, 0.0)]));
        assert_eq!(
            err,
            Err(ModelError::InsideExceedsGenerated {
                inside: 2,
                generated: 1
            })
        );
    }

    #[test]
    fn new_rejects_foreign_points() {
        let err = SampleSet::new(points(&[(0.0, 0.0), (1.0, 1.0)]), points(&[(5.0, 5.0)]));
        assert_eq!(err, Err(ModelError::InsideNotGenerated { index: 0 }));
    }

    #[test]
    fn new_rejects_out_of_order_points() {
        let generated = points(&[(0.0, 0.0), (1.0, 1.0)]);
        let inside = points(&[(1.0, 1.0), (0.0, 0.0)]);
        assert!(SampleSet::new(generated, inside).is_err());
    }

    #[test]
    fn partition_keeps_order() {
        let generated = points(&[(0.0, 0.0), (5.0, 0.0), (1.0, 0.0), (6.0, 0.0)]);
        let set = SampleSet::partition(generated, |p| p.x < 3.0);
        assert_eq!(set.inside(), points(&[(0.0, 0.0), (1.0, 0.0)]).as_slice());
        assert!(set.is_inside(&Point::new(1.7, 0.3)));
        assert!(!set.is_inside(&Point::new(5.0, 0.0)));
    }

    #[test]
    fn empty_set() {
        let set = SampleSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.inside_count(), 0);
    }
}
