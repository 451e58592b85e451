use crate::{Optional, Outcome};

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Self::coerce(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        match value {
            Optional::Present(value) => Some(value),
            Optional::Absent => None,
        }
    }
}

impl<V, E> From<Result<V, E>> for Outcome<V, E> {
    fn from(value: Result<V, E>) -> Self {
        match value {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Error(err),
        }
    }
}

impl<V, E> From<Outcome<V, E>> for Result<V, E> {
    fn from(value: Outcome<V, E>) -> Self {
        match value {
            Outcome::Ok(value) => Ok(value),
            Outcome::Error(err) => Err(err),
        }
    }
}

impl<V, E> Outcome<V, E> {
    /// Drops the error, keeping only whether a value was produced.
    pub fn into_optional(self) -> Optional<V> {
        match self {
            Self::Ok(value) => Optional::Present(value),
            Self::Error(_) => Optional::Absent,
        }
    }
}

impl<T> Optional<T> {
    pub fn ok_or<E>(self, err: E) -> Outcome<T, E> {
        match self {
            Self::Present(value) => Outcome::Ok(value),
            Self::Absent => Outcome::Error(err),
        }
    }
}

#[test]
fn test_into_optional() {
    assert_eq!(Outcome::<_, &str>::ok(2).into_optional(), Optional::present(2));
    assert_eq!(Outcome::<i32, _>::error("x").into_optional(), Optional::absent());
}

#[test]
fn test_ok_or() {
    assert_eq!(Optional::present(2).ok_or("missing"), Outcome::ok(2));
    assert_eq!(Optional::<i32>::absent().ok_or("missing"), Outcome::error("missing"));
}

#[test]
fn test_std_round_trip() {
    let opt: Option<i32> = Optional::present(3).into();
    assert_eq!(opt, Some(3));
    assert_eq!(Optional::from(None::<i32>), Optional::absent());

    let res: Result<i32, &str> = Outcome::error("bad").into();
    assert_eq!(res, Err("bad"));
    assert_eq!(Outcome::from(Ok::<_, &str>(1)), Outcome::ok(1));
}

#[test]
fn test_force_unwrap_through_anyhow() -> anyhow::Result<()> {
    let parse = Outcome::wrap(|s: &str| s.parse::<i32>());
    let value = parse("41").map(|v| v + 1).force_unwrap()?;
    assert_eq!(value, 42);
    let err = parse("x").force_unwrap().map_err(anyhow::Error::from).unwrap_err();
    assert!(err.downcast_ref::<std::num::ParseIntError>().is_some());
    Ok(())
}
