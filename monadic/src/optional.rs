use monadic_hkt::{Applicative, Functor, Monad, UnaryTy};

use crate::EmptyValueError;

/// A value that may be absent.
///
/// Absence carries no payload, so every failure that flows through an
/// `Optional` loses the reason it happened. Use [`Outcome`](crate::Outcome)
/// when the reason matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Optional<T> {
    Absent,
    Present(T),
}

pub struct OptionalTy;

impl UnaryTy for OptionalTy {
    type Out<T> = Optional<T>;
}

impl Functor for OptionalTy {
    fn map<A, B, F>(fa: Optional<A>, f: F) -> Optional<B>
    where
        F: FnOnce(A) -> B,
    {
        match fa {
            Optional::Present(value) => Optional::Present(f(value)),
            Optional::Absent => Optional::Absent,
        }
    }
}

impl Applicative for OptionalTy {
    fn pure<A>(value: A) -> Optional<A> {
        Optional::Present(value)
    }

    fn apply<A, B, F>(fa: Optional<A>, ff: Optional<F>) -> Optional<B>
    where
        F: FnOnce(A) -> B,
    {
        match (fa, ff) {
            (Optional::Present(value), Optional::Present(f)) => Optional::Present(f(value)),
            _ => Optional::Absent,
        }
    }
}

impl Monad for OptionalTy {
    fn then<A, B, F>(fa: Optional<A>, f: F) -> Optional<B>
    where
        F: FnOnce(A) -> Optional<B>,
    {
        match fa {
            Optional::Present(value) => f(value),
            Optional::Absent => Optional::Absent,
        }
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Optional<T> {
    pub fn present(value: T) -> Self {
        Self::Present(value)
    }

    pub fn absent() -> Self {
        Self::Absent
    }

    /// `None` is the sentinel for "no value".
    pub fn coerce(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Absent,
        }
    }

    /// Adapts a function returning `Option` into one returning `Optional`.
    ///
    /// Functions of several arguments are wrapped by taking a tuple:
    ///
    /// ```
    /// use monadic::Optional;
    ///
    /// let div = Optional::wrap(|(a, b): (i32, i32)| a.checked_div(b));
    /// assert_eq!(div((6, 3)), Optional::present(2));
    /// assert_eq!(div((6, 0)), Optional::absent());
    /// ```
    pub fn wrap<A, F>(f: F) -> impl Fn(A) -> Self
    where
        F: Fn(A) -> Option<T>,
    {
        move |arg| Self::coerce(f(arg))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }

    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Present(value) => Optional::Present(value),
            Self::Absent => Optional::Absent,
        }
    }

    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        OptionalTy::map(self, f)
    }

    pub fn replace_value<U>(self, value: U) -> Optional<U> {
        OptionalTy::replace(self, value)
    }

    pub fn combine<U, F>(self, ff: Optional<F>) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        OptionalTy::apply(self, ff)
    }

    pub fn then<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        OptionalTy::then(self, f)
    }

    pub fn and<U>(self, other: Optional<U>) -> Optional<(T, U)> {
        OptionalTy::and(self, other)
    }

    pub fn and_ignore_left<U>(self, other: Optional<U>) -> Optional<U> {
        OptionalTy::and_ignore_left(self, other)
    }

    pub fn and_ignore_right<U>(self, other: Optional<U>) -> Optional<T> {
        OptionalTy::and_ignore_right(self, other)
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => default,
        }
    }

    pub fn recover<F>(self, f: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Present(value) => Self::Present(value),
            Self::Absent => Self::Present(f()),
        }
    }

    pub fn recover_chain<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Present(value) => Self::Present(value),
            Self::Absent => f(),
        }
    }

    /// Only for call sites that already know a value is present.
    pub fn force_unwrap(self) -> Result<T, EmptyValueError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Absent => Err(EmptyValueError),
        }
    }
}

#[cfg(test)]
use std::cell::Cell;

#[cfg(test)]
fn inc(v: i32) -> i32 {
    v + 1
}

#[test]
fn test_map() {
    assert_eq!(Optional::present(4).map(inc), Optional::present(5));
    assert_eq!(Optional::<i32>::absent().map(inc), Optional::absent());
}

#[test]
fn test_combine() {
    let f = Optional::present(inc as fn(i32) -> i32);
    assert_eq!(Optional::present(4).combine(f), Optional::present(5));
    assert_eq!(Optional::<i32>::absent().combine(f), Optional::absent());
    assert_eq!(
        Optional::present(4).combine(Optional::<fn(i32) -> i32>::absent()),
        Optional::absent()
    );
    assert_eq!(
        Optional::<i32>::absent().combine(Optional::<fn(i32) -> i32>::absent()),
        Optional::absent()
    );
}

#[test]
fn test_pure_replaces_absence() {
    let a = Optional::<i32>::absent();
    assert!(a.is_absent());
    assert_eq!(OptionalTy::pure(4), Optional::present(4));
    assert_eq!(a.replace_value(4), Optional::absent());
    assert_eq!(Optional::present(3).replace_value('x'), Optional::present('x'));
}

#[test]
fn test_then() {
    assert_eq!(
        Optional::present(4).then(|v| Optional::present(v + 1)),
        Optional::present(5)
    );
    assert_eq!(
        Optional::present(4).then(|_| Optional::<i32>::absent()),
        Optional::absent()
    );

    let calls = Cell::new(0);
    let out = Optional::<i32>::absent().then(|v| {
        calls.set(calls.get() + 1);
        Optional::present(v + 1)
    });
    assert_eq!(out, Optional::absent());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_and_family() {
    let some2 = Optional::present(2);
    let some3 = Optional::present(3);
    let none = Optional::<i32>::absent();

    assert_eq!(some2.and(some3), Optional::present((2, 3)));
    assert_eq!(none.and(some3), Optional::absent());
    assert_eq!(some2.and(none), Optional::absent());
    assert_eq!(none.and(none), Optional::absent());

    assert_eq!(some2.and_ignore_right(some3), Optional::present(2));
    assert_eq!(some2.and_ignore_right(none), Optional::absent());
    assert_eq!(none.and_ignore_right(some3), Optional::absent());

    assert_eq!(some2.and_ignore_left(some3), Optional::present(3));
    assert_eq!(some2.and_ignore_left(none), Optional::absent());
    assert_eq!(none.and_ignore_left(some3), Optional::absent());
}

#[test]
fn test_recover() {
    let calls = Cell::new(0);
    let counted = || {
        calls.set(calls.get() + 1);
        3
    };
    assert_eq!(Optional::present(2).recover(counted), Optional::present(2));
    assert_eq!(calls.get(), 0);
    assert_eq!(Optional::absent().recover(counted), Optional::present(3));
    assert_eq!(calls.get(), 1);

    let kept = Optional::present(2).recover_chain(|| {
        calls.set(calls.get() + 1);
        Optional::present(3)
    });
    assert_eq!(kept, Optional::present(2));
    assert_eq!(calls.get(), 1);
    assert_eq!(
        Optional::absent().recover_chain(|| Optional::present(1)),
        Optional::present(1)
    );
    assert_eq!(
        Optional::<i32>::absent().recover_chain(Optional::absent),
        Optional::absent()
    );
}

#[test]
fn test_unwrap_or_and_force_unwrap() {
    assert_eq!(Optional::present(2).unwrap_or(9), 2);
    assert_eq!(Optional::absent().unwrap_or(9), 9);
    assert_eq!(Optional::present(2).force_unwrap(), Ok(2));
    let err = Optional::<i32>::absent().force_unwrap().unwrap_err();
    assert_eq!(err, EmptyValueError);
    assert_eq!(err.to_string(), "unwrap called on empty optional");
}

#[test]
fn test_wrap_and_coerce() {
    let first_even = Optional::wrap(|xs: Vec<i32>| xs.into_iter().find(|x| x % 2 == 0));
    assert_eq!(first_even(vec![1, 3, 5]), Optional::absent());
    assert_eq!(first_even(vec![1, 5, 6]), Optional::present(6));

    let maybe_null = Optional::wrap(|v: Option<i32>| v);
    assert_eq!(maybe_null(None), Optional::absent());
    assert_eq!(maybe_null(Some(5)), Optional::present(5));

    assert_eq!(Optional::coerce(Some(0)), Optional::present(0));
    assert_eq!(Optional::<i32>::coerce(None), Optional::absent());
}

#[test]
fn test_as_ref_leaves_original() {
    let name = Optional::present(String::from("present"));
    assert_eq!(name.as_ref().map(String::len), Optional::present(7));
    assert!(name.is_present());
    assert_eq!(Optional::<String>::default(), Optional::absent());
}
