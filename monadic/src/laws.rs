//! Functor, applicative and monad laws, checked over both instantiations.

use std::fmt::Debug;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use crate::{Applicative, Functor, Monad, Optional, OptionalTy, Outcome, OutcomeTy};

type Checked = Result<(), TestCaseError>;

fn inc(v: i32) -> i32 {
    v.wrapping_add(1)
}

fn triple(v: i32) -> i32 {
    v.wrapping_mul(3)
}

fn functor_identity<M: Functor>(x: M::Out<i32>) -> Checked
where
    M::Out<i32>: Clone + PartialEq + Debug,
{
    let mapped: M::Out<i32> = M::map(x.clone(), |v| v);
    prop_assert_eq!(mapped, x);
    Ok(())
}

fn functor_composition<M: Functor>(x: M::Out<i32>) -> Checked
where
    M::Out<i32>: Clone + PartialEq + Debug,
{
    let stepwise: M::Out<i32> = M::map(M::map(x.clone(), inc), triple);
    let fused: M::Out<i32> = M::map(x, |v| triple(inc(v)));
    prop_assert_eq!(stepwise, fused);
    Ok(())
}

fn applicative_identity<M: Applicative>(x: M::Out<i32>) -> Checked
where
    M::Out<i32>: Clone + PartialEq + Debug,
{
    let applied: M::Out<i32> = M::apply(x.clone(), M::pure(|v: i32| v));
    prop_assert_eq!(applied, x);
    Ok(())
}

fn monad_left_identity<M: Monad, F>(v: i32, f: F) -> Checked
where
    F: Fn(i32) -> M::Out<i32>,
    M::Out<i32>: PartialEq + Debug,
{
    let bound: M::Out<i32> = M::then(M::pure(v), &f);
    prop_assert_eq!(bound, f(v));
    Ok(())
}

fn monad_right_identity<M: Monad>(x: M::Out<i32>) -> Checked
where
    M::Out<i32>: Clone + PartialEq + Debug,
{
    let bound: M::Out<i32> = M::then(x.clone(), M::pure::<i32>);
    prop_assert_eq!(bound, x);
    Ok(())
}

fn monad_associativity<M: Monad, F, G>(x: M::Out<i32>, f: F, g: G) -> Checked
where
    F: Fn(i32) -> M::Out<i32>,
    G: Fn(i32) -> M::Out<i32>,
    M::Out<i32>: Clone + PartialEq + Debug,
{
    let nested_left: M::Out<i32> = M::then(M::then(x.clone(), &f), &g);
    let nested_right: M::Out<i32> = M::then(x, |v| M::then(f(v), &g));
    prop_assert_eq!(nested_left, nested_right);
    Ok(())
}

fn and_matches_lift2<M: Applicative>(a: M::Out<i32>, b: M::Out<i32>) -> Checked
where
    M::Out<i32>: Clone,
    M::Out<(i32, i32)>: PartialEq + Debug,
{
    let paired: M::Out<(i32, i32)> = M::and(a.clone(), b.clone());
    let lifted: M::Out<(i32, i32)> = M::lift2(a, b, |x, y| (x, y));
    prop_assert_eq!(paired, lifted);
    Ok(())
}

fn optional() -> impl Strategy<Value = Optional<i32>> {
    proptest::option::of(any::<i32>()).prop_map(Optional::coerce)
}

fn outcome() -> impl Strategy<Value = Outcome<i32, String>> {
    prop_oneof![
        any::<i32>().prop_map(Outcome::<i32, String>::Ok),
        "[a-z]{1,4}".prop_map(Outcome::<i32, String>::Error),
    ]
}

fn halve_even(v: i32) -> Optional<i32> {
    if v % 2 == 0 {
        Optional::present(v / 2)
    } else {
        Optional::absent()
    }
}

fn reject_negative(v: i32) -> Outcome<i32, String> {
    if v < 0 {
        Outcome::error(format!("negative: {}", v))
    } else {
        Outcome::ok(v / 2)
    }
}

proptest! {
    #[test]
    fn optional_functor_laws(x in optional()) {
        functor_identity::<OptionalTy>(x)?;
        functor_composition::<OptionalTy>(x)?;
    }

    #[test]
    fn optional_applicative_identity(x in optional()) {
        applicative_identity::<OptionalTy>(x)?;
    }

    #[test]
    fn optional_monad_laws(v in any::<i32>(), x in optional()) {
        monad_left_identity::<OptionalTy, _>(v, halve_even)?;
        monad_right_identity::<OptionalTy>(x)?;
        monad_associativity::<OptionalTy, _, _>(x, halve_even, |v| Optional::present(inc(v)))?;
    }

    #[test]
    fn optional_and_is_lift2(a in optional(), b in optional()) {
        and_matches_lift2::<OptionalTy>(a, b)?;
    }

    #[test]
    fn outcome_functor_laws(x in outcome()) {
        functor_identity::<OutcomeTy<String>>(x.clone())?;
        functor_composition::<OutcomeTy<String>>(x)?;
    }

    #[test]
    fn outcome_applicative_identity(x in outcome()) {
        applicative_identity::<OutcomeTy<String>>(x)?;
    }

    #[test]
    fn outcome_monad_laws(v in any::<i32>(), x in outcome()) {
        monad_left_identity::<OutcomeTy<String>, _>(v, reject_negative)?;
        monad_right_identity::<OutcomeTy<String>>(x.clone())?;
        monad_associativity::<OutcomeTy<String>, _, _>(x, reject_negative, |v| {
            Outcome::ok(triple(v))
        })?;
    }

    #[test]
    fn outcome_and_is_lift2(a in outcome(), b in outcome()) {
        and_matches_lift2::<OutcomeTy<String>>(a, b)?;
    }

    #[test]
    fn outcome_into_optional_keeps_presence(x in outcome()) {
        prop_assert_eq!(x.is_ok(), x.clone().into_optional().is_present());
    }
}
