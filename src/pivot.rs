use crate::{
    geometry::{normal_vector, Point},
    transform::Transform,
};

/// Build the transform that rotates the part of `chain` after index `i` by
/// `a` quarter turns about the segment entering `chain[i]`.
///
/// The rotation axis runs through `chain[i]` parallel to
/// `chain[i] - chain[i - 1]`, so `chain[i]` itself is a fixed point of the
/// returned transform.
///
/// Panics if `i` is out of range, if the step into `chain[i]` is not a unit
/// step along one axis, or if `a > 3`.
pub fn pivot_transform(chain: &[Point], i: usize, a: u8) -> Transform {
    let normal = normal_vector(chain, i);
    let axis = match normal.axis() {
        Some(axis) => axis,
        None => panic!("malformed chain: step {normal} into index {i} is not a unit axis step"),
    };

    let pivot = chain[i];

    Transform::translate(pivot) * Transform::rotate(axis, a) * Transform::translate(-pivot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bent() -> Vec<Point> {
        [(2, 1, 0), (3, 1, 0), (3, 2, 0), (3, 3, 0), (4, 3, 0)]
            .into_iter()
            .map(Point::from)
            .collect()
    }

    #[test]
    fn pivot_is_fixed() {
        let chain = bent();

        for i in 1..chain.len() {
            for a in 0..4 {
                let t = pivot_transform(&chain, i, a);
                assert_eq!(t.apply(chain[i]), chain[i], "i = {i}, a = {a}");
            }
        }
    }

    #[test]
    fn zero_turns_leave_chain_unchanged() {
        let chain = bent();

        for i in 1..chain.len() {
            let t = pivot_transform(&chain, i, 0);
            assert_eq!(t, Transform::IDENTITY);
            assert!(chain.iter().all(|p| t.apply(*p) == *p));
        }
    }

    #[test]
    fn rotates_about_incoming_segment() {
        let chain = bent();

        // The step into index 1 runs along x, so the next point (3, 2, 0)
        // swings around the line y = 1, z = 0.
        let t = pivot_transform(&chain, 1, 1);
        assert_eq!(t.apply(chain[2]), Point::new(3, 1, 1));

        let t = pivot_transform(&chain, 1, 2);
        assert_eq!(t.apply(chain[2]), Point::new(3, 0, 0));

        // Points on the axis itself stay put.
        assert_eq!(t.apply(chain[0]), chain[0]);
    }

    #[test]
    #[should_panic]
    fn diagonal_step_is_rejected() {
        let chain = [Point::new(0, 0, 0), Point::new(1, 1, 0)];
        pivot_transform(&chain, 1, 1);
    }

    #[test]
    #[should_panic]
    fn too_many_turns_are_rejected() {
        pivot_transform(&bent(), 1, 4);
    }
}
