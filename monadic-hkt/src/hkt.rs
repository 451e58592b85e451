/// A type constructor, named through a marker type.
///
/// `Out<T>` is "the same container, holding a `T`". Generic code that needs to
/// return the container with a different payload goes through the marker
/// instead of the container itself.
pub trait UnaryTy {
    type Out<T>;
}

pub trait Functor: UnaryTy {
    fn map<A, B, F>(fa: Self::Out<A>, f: F) -> Self::Out<B>
    where
        F: FnOnce(A) -> B;

    fn replace<A, B>(fa: Self::Out<A>, value: B) -> Self::Out<B> {
        Self::map(fa, move |_| value)
    }
}

pub trait Applicative: Functor {
    fn pure<A>(value: A) -> Self::Out<A>;

    /// Applies the function held by `ff` to the value held by `fa`.
    ///
    /// Succeeds only when both sides do. When both sides fail, the failure of
    /// `ff` (the function-holding side) is the one kept.
    fn apply<A, B, F>(fa: Self::Out<A>, ff: Self::Out<F>) -> Self::Out<B>
    where
        F: FnOnce(A) -> B;

    /// `fa` lands on the function-holding side of [`Applicative::apply`], so its
    /// failure wins over the failure of `fb`.
    fn lift2<A, B, C, F>(fa: Self::Out<A>, fb: Self::Out<B>, f: F) -> Self::Out<C>
    where
        F: FnOnce(A, B) -> C,
    {
        Self::apply::<B, C, _>(fb, Self::map(fa, move |a| move |b| f(a, b)))
    }

    fn and<A, B>(fa: Self::Out<A>, fb: Self::Out<B>) -> Self::Out<(A, B)> {
        Self::lift2(fa, fb, |a, b| (a, b))
    }

    fn and_ignore_left<A, B>(fa: Self::Out<A>, fb: Self::Out<B>) -> Self::Out<B> {
        Self::lift2(fa, fb, |_, b| b)
    }

    fn and_ignore_right<A, B>(fa: Self::Out<A>, fb: Self::Out<B>) -> Self::Out<A> {
        Self::lift2(fa, fb, |a, _| a)
    }
}

pub trait Monad: Applicative {
    /// `f` runs only when `fa` holds a value; otherwise the failure of `fa` is
    /// carried over untouched.
    fn then<A, B, F>(fa: Self::Out<A>, f: F) -> Self::Out<B>
    where
        F: FnOnce(A) -> Self::Out<B>;
}

#[cfg(test)]
struct IdTy;

#[cfg(test)]
impl UnaryTy for IdTy {
    type Out<T> = T;
}

#[cfg(test)]
impl Functor for IdTy {
    fn map<A, B, F>(fa: A, f: F) -> B
    where
        F: FnOnce(A) -> B,
    {
        f(fa)
    }
}

#[cfg(test)]
impl Applicative for IdTy {
    fn pure<A>(value: A) -> A {
        value
    }
    fn apply<A, B, F>(fa: A, ff: F) -> B
    where
        F: FnOnce(A) -> B,
    {
        ff(fa)
    }
}

#[cfg(test)]
impl Monad for IdTy {
    fn then<A, B, F>(fa: A, f: F) -> B
    where
        F: FnOnce(A) -> B,
    {
        f(fa)
    }
}

#[test]
fn test_derived_combinators() {
    assert_eq!(IdTy::and(2, "x"), (2, "x"));
    assert_eq!(IdTy::and_ignore_left(2, "x"), "x");
    assert_eq!(IdTy::and_ignore_right(2, "x"), 2);
    assert_eq!(IdTy::replace(2, 'c'), 'c');
}

#[test]
fn test_lift2_argument_order() {
    assert_eq!(IdTy::lift2(10, 3, |a, b| a - b), 7);
}

#[test]
fn test_then_runs_once() {
    let mut calls = 0;
    let out = IdTy::then(4, |v| {
        calls += 1;
        IdTy::pure(v * 2)
    });
    assert_eq!(out, 8);
    assert_eq!(calls, 1);
}
