use std::marker::PhantomData;

use monadic_hkt::{Applicative, Functor, Monad, UnaryTy};

/// Either a value or the error that prevented it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Outcome<V, E> {
    Ok(V),
    Error(E),
}

pub struct OutcomeTy<E>(PhantomData<E>);

impl<E> UnaryTy for OutcomeTy<E> {
    type Out<T> = Outcome<T, E>;
}

impl<E> Functor for OutcomeTy<E> {
    fn map<A, B, F>(fa: Outcome<A, E>, f: F) -> Outcome<B, E>
    where
        F: FnOnce(A) -> B,
    {
        match fa {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Error(err) => Outcome::Error(err),
        }
    }
}

impl<E> Applicative for OutcomeTy<E> {
    fn pure<A>(value: A) -> Outcome<A, E> {
        Outcome::Ok(value)
    }

    fn apply<A, B, F>(fa: Outcome<A, E>, ff: Outcome<F, E>) -> Outcome<B, E>
    where
        F: FnOnce(A) -> B,
    {
        match (fa, ff) {
            (Outcome::Ok(value), Outcome::Ok(f)) => Outcome::Ok(f(value)),
            (_, Outcome::Error(err)) => Outcome::Error(err),
            (Outcome::Error(err), Outcome::Ok(_)) => Outcome::Error(err),
        }
    }
}

impl<E> Monad for OutcomeTy<E> {
    fn then<A, B, F>(fa: Outcome<A, E>, f: F) -> Outcome<B, E>
    where
        F: FnOnce(A) -> Outcome<B, E>,
    {
        match fa {
            Outcome::Ok(value) => f(value),
            Outcome::Error(err) => Outcome::Error(err),
        }
    }
}

impl<V, E> Outcome<V, E> {
    pub fn ok(value: V) -> Self {
        Self::Ok(value)
    }

    pub fn error(err: E) -> Self {
        Self::Error(err)
    }

    /// Adapts a function that fails through `Result` into one returning
    /// `Outcome`.
    pub fn wrap<A, F>(f: F) -> impl Fn(A) -> Self
    where
        F: Fn(A) -> Result<V, E>,
    {
        move |arg| f(arg).into()
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    pub fn as_ref(&self) -> Outcome<&V, &E> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Error(err) => Outcome::Error(err),
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(V) -> U,
    {
        OutcomeTy::<E>::map(self, f)
    }

    pub fn map_error<E2, F>(self, f: F) -> Outcome<V, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Error(err) => Outcome::Error(f(err)),
        }
    }

    pub fn replace_value<U>(self, value: U) -> Outcome<U, E> {
        OutcomeTy::<E>::replace(self, value)
    }

    /// When both sides are errors, the error of `ff` is returned.
    pub fn combine<U, F>(self, ff: Outcome<F, E>) -> Outcome<U, E>
    where
        F: FnOnce(V) -> U,
    {
        OutcomeTy::<E>::apply(self, ff)
    }

    pub fn then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(V) -> Outcome<U, E>,
    {
        OutcomeTy::<E>::then(self, f)
    }

    /// Pairs both values. The left error wins when both sides fail.
    pub fn and<U>(self, other: Outcome<U, E>) -> Outcome<(V, U), E> {
        OutcomeTy::<E>::and(self, other)
    }

    pub fn and_ignore_left<U>(self, other: Outcome<U, E>) -> Outcome<U, E> {
        OutcomeTy::<E>::and_ignore_left(self, other)
    }

    pub fn and_ignore_right<U>(self, other: Outcome<U, E>) -> Outcome<V, E> {
        OutcomeTy::<E>::and_ignore_right(self, other)
    }

    pub fn unwrap_or(self, default: V) -> V {
        match self {
            Self::Ok(value) => value,
            Self::Error(_) => default,
        }
    }

    pub fn recover<E2, F>(self, f: F) -> Outcome<V, E2>
    where
        F: FnOnce(E) -> V,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Error(err) => Outcome::Ok(f(err)),
        }
    }

    pub fn recover_chain<E2, F>(self, f: F) -> Outcome<V, E2>
    where
        F: FnOnce(E) -> Outcome<V, E2>,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Error(err) => f(err),
        }
    }

    /// Returns the stored error itself on failure.
    pub fn force_unwrap(self) -> Result<V, E> {
        self.into()
    }
}

#[cfg(test)]
use std::cell::Cell;

#[cfg(test)]
type Fallible<T> = Outcome<T, &'static str>;
#[cfg(test)]
type IncFn = fn(i32) -> i32;

#[cfg(test)]
fn inc(v: i32) -> i32 {
    v + 1
}

#[test]
fn test_map() {
    assert_eq!(Fallible::ok(4).map(inc), Outcome::ok(5));
    assert_eq!(Fallible::error("e").map(inc), Outcome::error("e"));
}

#[test]
fn test_combine() {
    assert_eq!(
        Fallible::ok(4).combine(Fallible::<IncFn>::ok(inc)),
        Outcome::ok(5)
    );
    assert_eq!(
        Fallible::<i32>::error("a").combine(Fallible::<IncFn>::ok(inc)),
        Outcome::error("a")
    );
    assert_eq!(
        Fallible::ok(4).combine(Fallible::<IncFn>::error("b")),
        Outcome::error("b")
    );
}

#[test]
fn test_combine_both_errors_keeps_function_error() {
    assert_eq!(
        Fallible::<i32>::error("a").combine(Fallible::<IncFn>::error("b")),
        Outcome::error("b")
    );
}

#[test]
fn test_pure_replaces_error() {
    assert_eq!(OutcomeTy::<&str>::pure(4), Fallible::ok(4));
    assert_eq!(Fallible::<i32>::error("a").replace_value(4), Outcome::error("a"));
}

#[test]
fn test_then() {
    assert_eq!(Fallible::ok(4).then(|v| Outcome::ok(v + 1)), Outcome::ok(5));
    assert_eq!(
        Fallible::ok(4).then(|_| Fallible::<i32>::error("b")),
        Outcome::error("b")
    );

    let calls = Cell::new(0);
    let out = Fallible::<i32>::error("a").then(|_| {
        calls.set(calls.get() + 1);
        Fallible::<i32>::error("b")
    });
    assert_eq!(out, Outcome::error("a"));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_and_family() {
    let ok2 = Fallible::ok(2);
    let ok3 = Fallible::ok(3);
    let err_a = Fallible::<i32>::error("a");
    let err_b = Fallible::<i32>::error("b");

    assert_eq!(ok2.and(ok3), Outcome::ok((2, 3)));
    assert_eq!(err_a.and(ok3), Outcome::error("a"));
    assert_eq!(ok2.and(err_b), Outcome::error("b"));
    assert_eq!(err_a.and(err_b), Outcome::error("a"));

    assert_eq!(ok2.and_ignore_right(ok3), Outcome::ok(2));
    assert_eq!(err_a.and_ignore_right(ok3), Outcome::error("a"));
    assert_eq!(ok2.and_ignore_right(err_b), Outcome::error("b"));
    assert_eq!(err_a.and_ignore_right(err_b), Outcome::error("a"));

    assert_eq!(ok2.and_ignore_left(ok3), Outcome::ok(3));
    assert_eq!(err_a.and_ignore_left(ok3), Outcome::error("a"));
    assert_eq!(ok2.and_ignore_left(err_b), Outcome::error("b"));
    assert_eq!(err_a.and_ignore_left(err_b), Outcome::error("a"));
}

#[test]
fn test_recover() {
    let calls = Cell::new(0);
    let recovered: Outcome<i32, ()> = Fallible::ok(2).recover(|_| {
        calls.set(calls.get() + 1);
        3
    });
    assert_eq!(recovered, Outcome::ok(2));
    assert_eq!(calls.get(), 0);
    let recovered: Outcome<i32, ()> =
        Fallible::error("a").recover(|err| if err == "a" { 1 } else { 2 });
    assert_eq!(recovered, Outcome::ok(1));
}

#[test]
fn test_recover_chain() {
    let calls = Cell::new(0);
    let kept: Outcome<i32, String> = Fallible::ok(2).recover_chain(|_| {
        calls.set(calls.get() + 1);
        Outcome::ok(3)
    });
    assert_eq!(kept, Outcome::ok(2));
    assert_eq!(calls.get(), 0);

    let rescued = Fallible::<i32>::error("a").recover_chain(|e| {
        calls.set(calls.get() + 1);
        Outcome::<_, String>::ok(e.len() as i32)
    });
    assert_eq!(rescued, Outcome::ok(1));
    assert_eq!(calls.get(), 1);
    assert_eq!(
        Fallible::<i32>::error("a").recover_chain(|e| Outcome::<_, String>::ok(e.len() as i32)),
        Outcome::ok(1)
    );
    assert_eq!(
        Fallible::<i32>::error("a")
            .recover_chain(|e| Outcome::<i32, _>::error(format!("{}!", e))),
        Outcome::error(String::from("a!"))
    );
}

#[test]
fn test_unwrap_or_and_force_unwrap() {
    assert_eq!(Fallible::ok(2).unwrap_or(9), 2);
    assert_eq!(Fallible::error("x").unwrap_or(9), 9);
    assert_eq!(Fallible::ok(2).force_unwrap(), Ok(2));
    assert_eq!(Fallible::<i32>::error("x").force_unwrap(), Err("x"));
}

#[test]
fn test_map_error() {
    assert_eq!(
        Fallible::<i32>::error("abc").map_error(str::len),
        Outcome::<i32, usize>::error(3)
    );
    assert_eq!(Fallible::ok(1).map_error(str::len), Outcome::ok(1));
}

#[test]
fn test_wrap() {
    let parse = Outcome::wrap(|s: &str| s.parse::<i32>());
    assert_eq!(parse("5"), Outcome::ok(5));
    assert!(parse("five").is_error());
}
