//! Overflow checked arithmetic for size computations. Each helper throws
//! [`ArithmeticOverflow`](StatusCode::ArithmeticOverflow) rather than wrapping, so that a size
//! feeding an allocation can never be corrupted.

use std::fmt::Display;

use super::{Outcome, Thrown};
use crate::status::{ErrorValue, Origin, StatusCode};

/// Builds the value thrown for an overflow at `origin`.
fn overflow(message: String, origin: Origin) -> Thrown {
    Thrown::new(ErrorValue::new(StatusCode::ArithmeticOverflow, message, origin))
}

/// Adds `lhs` and `rhs`, throwing on overflow.
#[track_caller]
pub fn checked_add(lhs: usize, rhs: usize) -> Outcome<usize> {
    // Captured here, closures don't inherit the caller's location.
    let origin = Origin::caller();
    lhs.checked_add(rhs)
        .ok_or_else(|| overflow(format!("Overflow computing {lhs} + {rhs}!"), origin))
}

/// Multiplies `lhs` and `rhs`, throwing on overflow.
#[track_caller]
pub fn checked_mul(lhs: usize, rhs: usize) -> Outcome<usize> {
    let origin = Origin::caller();
    lhs.checked_mul(rhs)
        .ok_or_else(|| overflow(format!("Overflow computing {lhs} * {rhs}!"), origin))
}

/// Converts `value` into a narrower (or differently signed) integer type, throwing if it can't be
/// represented.
///
/// # Examples
/// ```
/// # use foundation::exception::narrow;
/// assert_eq!(narrow::<i64, u8>(200), Ok(200_u8));
/// assert!(narrow::<i64, u8>(-1).is_err());
/// ```
#[track_caller]
pub fn narrow<F, T>(value: F) -> Outcome<T>
where
    F: Copy + Display,
    T: TryFrom<F>,
{
    let origin = Origin::caller();
    T::try_from(value).map_err(|_| {
        overflow(
            format!("Value {value} doesn't fit in {}!", std::any::type_name::<T>()),
            origin,
        )
    })
}

/// Returns the signed distance from `start` to `end`, measured in elements of `T`. Zero-sized
/// types are always a distance of 0 apart.
#[track_caller]
pub fn ptr_distance<T>(start: *const T, end: *const T) -> Outcome<isize> {
    let size = size_of::<T>();
    if size == 0 {
        return Ok(0);
    }

    let origin = Origin::caller();
    let (start, end) = (start as usize, end as usize);
    if end >= start {
        narrow((end - start) / size)
    } else {
        // Subtracting the magnitude from zero still reaches isize::MIN.
        let magnitude = (start - end) / size;
        0_isize.checked_sub_unsigned(magnitude).ok_or_else(|| {
            overflow(format!("Distance -{magnitude} doesn't fit in isize!"), origin)
        })
    }
}
