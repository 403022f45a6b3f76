use crate::cone::{
    DoubleDescriptionState, ExtremalRays, PolyhedralCone, Ray, RayEnumeration,
};
use crate::error::SynthesisError;
use crate::test_utils::init_logger;
use cancel_this::Cancellable;
use computation_process::{Computable, Stateful};
use num::bigint::BigInt;
use std::collections::BTreeSet;

fn rays(list: &[&[i64]]) -> BTreeSet<Ray> {
    list.iter()
        .map(|ray| ray.iter().map(|it| BigInt::from(*it)).collect())
        .collect()
}

/// The cone over a square: `z >= |x|` and `z >= |y|`.
fn square_pyramid(order: &[usize]) -> PolyhedralCone {
    let rows = [[-1, 0, 1], [1, 0, 1], [0, -1, 1], [0, 1, 1]];
    let mut cone = PolyhedralCone::new(3);
    for index in order {
        cone.add_inequality(rows[*index])
            .expect("Rows have the right dimension");
    }
    cone
}

// ========== Constraint storage ==========

#[test]
fn test_dimension_mismatch() {
    init_logger();
    let mut cone = PolyhedralCone::new(3);
    let error = cone.add_inequality([1, 0]).unwrap_err();
    assert!(matches!(
        error,
        SynthesisError::DimensionMismatch {
            expected: 3,
            actual: 2
        }
    ));
    assert!(cone.add_equation([1, 0, 0, 0]).is_err());
    assert_eq!(cone.inequalities().count(), 0);
    assert_eq!(cone.equations().count(), 0);
}

#[test]
fn test_duplicate_rows_collapse() -> Result<(), SynthesisError> {
    init_logger();
    let mut cone = PolyhedralCone::new(2);
    cone.add_inequality([1, 0])?;
    cone.add_inequality([1, 0])?;
    cone.add_equation([1, -1])?;
    cone.add_equation([1, -1])?;
    assert_eq!(cone.inequalities().count(), 1);
    assert_eq!(cone.equations().count(), 1);
    Ok(())
}

#[test]
fn test_to_string() -> Result<(), SynthesisError> {
    init_logger();
    let mut cone = PolyhedralCone::new(3);
    cone.add_equation([0, 2, -2])?;
    cone.add_inequality([1, 0, -1])?;
    cone.add_inequality([0, 0, 0])?;
    assert_eq!(
        cone.to_string(),
        "[\n2*x[1] + -2*x[2] = 0\n1*x[0] + -1*x[2] >= 0\n0 >= 0\n]"
    );
    Ok(())
}

// ========== Extremal rays ==========

#[test]
fn test_trivial_equation_has_no_rays() -> Cancellable<()> {
    init_logger();
    let mut cone = PolyhedralCone::new(2);
    cone.add_equation([0, 0]).expect("Row has the right dimension");
    assert!(
        cone.find_extremal_rays()?.is_empty(),
        "The whole space has no extremal rays"
    );
    Ok(())
}

#[test]
fn test_equation_and_inequalities() -> Cancellable<()> {
    init_logger();
    let mut cone = PolyhedralCone::new(3);
    cone.add_equation([0, 2, -2]).expect("Row has the right dimension");
    for row in [[1, 0, 0], [0, 1, 0], [0, 0, 1], [1, 0, -1], [1, 1, -2]] {
        cone.add_inequality(row).expect("Row has the right dimension");
    }
    assert_eq!(
        cone.find_extremal_rays()?,
        rays(&[&[1, 0, 0], &[1, 1, 1]])
    );
    Ok(())
}

#[test]
fn test_big_coefficients() -> Cancellable<()> {
    init_logger();
    let huge = BigInt::from(u64::MAX) * BigInt::from(u64::MAX);
    let mut cone = PolyhedralCone::new(2);
    cone.add_inequality([BigInt::from(1), BigInt::from(0)])
        .expect("Row has the right dimension");
    cone.add_inequality([-huge.clone(), BigInt::from(1)])
        .expect("Row has the right dimension");

    let expected = BTreeSet::from([
        vec![BigInt::from(0), BigInt::from(1)],
        vec![BigInt::from(1), huge],
    ]);
    assert_eq!(cone.find_extremal_rays()?, expected);
    Ok(())
}

#[test]
fn test_orthant() -> Cancellable<()> {
    init_logger();
    let mut cone = PolyhedralCone::new(3);
    for row in [[1, 0, 0], [0, 1, 0], [0, 0, 1]] {
        cone.add_inequality(row).expect("Row has the right dimension");
    }
    assert_eq!(
        cone.find_extremal_rays()?,
        rays(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]])
    );
    Ok(())
}

#[test]
fn test_zero_cone_has_no_rays() -> Cancellable<()> {
    init_logger();
    let mut cone = PolyhedralCone::new(3);
    for row in [[1, 0, 0], [0, 1, 0], [0, 0, 1], [-1, -1, -1]] {
        cone.add_inequality(row).expect("Row has the right dimension");
    }
    assert!(cone.find_extremal_rays()?.is_empty());
    Ok(())
}

#[test]
fn test_square_pyramid() -> Cancellable<()> {
    init_logger();
    let expected = rays(&[&[1, 1, 1], &[1, -1, 1], &[-1, 1, 1], &[-1, -1, 1]]);
    for order in [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2]] {
        let cone = square_pyramid(&order);
        let result = cone.find_extremal_rays()?;
        assert_eq!(result, expected, "Rays differ for row order {order:?}");
        for ray in &result {
            assert!(cone.contains(ray), "Ray {ray:?} violates the constraints");
        }
    }
    Ok(())
}

#[test]
fn test_non_pointed_cone_uses_pointed_part() -> Cancellable<()> {
    init_logger();
    // `x >= 0` with `y` unrestricted: the pointed part is the ray along `x`.
    let mut cone = PolyhedralCone::new(2);
    cone.add_inequality([1, 0]).expect("Row has the right dimension");
    assert_eq!(cone.find_extremal_rays()?, rays(&[&[1, 0]]));
    Ok(())
}

#[test]
fn test_half_space_in_three_dimensions() -> Cancellable<()> {
    init_logger();
    // `x + y >= 0`, `z = 0`: the lineality space is spanned by (1, -1, 0).
    let mut cone = PolyhedralCone::new(3);
    cone.add_inequality([1, 1, 0]).expect("Row has the right dimension");
    cone.add_equation([0, 0, 1]).expect("Row has the right dimension");
    assert_eq!(cone.find_extremal_rays()?, rays(&[&[1, 1, 0]]));
    Ok(())
}

// ========== Computation API ==========

#[test]
fn test_max_rays_cancels() {
    init_logger();
    let cone = square_pyramid(&[0, 1, 2, 3]);
    let mut enumeration = RayEnumeration::from(&cone);
    enumeration.max_rays = 2;
    assert!(
        enumeration.enumerate().is_err(),
        "The initial simplicial cone already has three rays"
    );

    let mut enumeration = RayEnumeration::from(&cone);
    enumeration.max_rays = 4;
    assert!(enumeration.enumerate().is_ok());
}

#[test]
fn test_one_step_per_remaining_row() -> Cancellable<()> {
    init_logger();
    let cone = square_pyramid(&[0, 1, 2, 3]);
    let enumeration = RayEnumeration::from(&cone);
    assert_eq!(enumeration.reduced_dimension(), 3);
    assert_eq!(enumeration.inequalities.len(), 4);

    let initial = DoubleDescriptionState::from(&enumeration);
    assert_eq!(initial.rays.len(), 3);
    assert_eq!(initial.pending.len(), 1);

    let mut computation =
        <ExtremalRays as Stateful<RayEnumeration, DoubleDescriptionState>>::configure(
            enumeration,
            initial,
        );
    assert!(computation.try_compute().is_err());
    assert_eq!(computation.compute()?.len(), 4);
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_serialization_mid_run() -> Cancellable<()> {
    init_logger();
    let cone = square_pyramid(&[0, 1, 2, 3]);
    let enumeration = RayEnumeration::from(&cone);
    let initial = DoubleDescriptionState::from(&enumeration);
    let mut computation =
        <ExtremalRays as Stateful<RayEnumeration, DoubleDescriptionState>>::configure(
            enumeration,
            initial,
        );
    let _ = computation.try_compute();

    let json = serde_json::to_string(&computation).expect("Failed to serialize Computation");
    let deserialized: ExtremalRays =
        serde_json::from_str(&json).expect("Failed to deserialize Computation");

    assert_eq!(
        deserialized.compute()?,
        cone.find_extremal_rays()?,
        "Deserialized computation should produce the same result as a fresh computation"
    );
    Ok(())
}
