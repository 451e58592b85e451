use std::collections::BTreeMap;

use anyhow::{Context, Result};
use monadic::{Optional, Outcome};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, Op, Operand, Step};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("unknown operand {0:?}")]
    UnknownOperand(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
}

type Value = Outcome<i64, CalcError>;

impl Op {
    /// `rhs` is ignored by `neg`.
    fn apply(self, lhs: i64, rhs: i64) -> Value {
        let checked = match self {
            Op::Neg => lhs.checked_neg(),
            Op::Div if rhs == 0 => return Outcome::error(CalcError::DivisionByZero),
            Op::Add => lhs.checked_add(rhs),
            Op::Sub => lhs.checked_sub(rhs),
            Op::Mul => lhs.checked_mul(rhs),
            Op::Div => lhs.checked_div(rhs),
        };
        Optional::coerce(checked).ok_or(CalcError::Overflow)
    }
}

struct Evaluator<'a> {
    inputs: &'a BTreeMap<String, i64>,
    results: BTreeMap<&'a str, Value>,
}

impl Evaluator<'_> {
    fn resolve(&self, operand: &Operand) -> Value {
        match operand {
            Operand::Literal(value) => Outcome::ok(*value),
            Operand::Ref(name) => match self.results.get(name.as_str()) {
                Some(earlier) => earlier.clone(),
                None => Optional::coerce(self.inputs.get(name).copied())
                    .ok_or(CalcError::UnknownOperand(name.clone())),
            },
        }
    }

    fn eval_step(&self, step: &Step) -> Value {
        // Config::parse guarantees only `neg` comes without an rhs.
        let rhs = match step.rhs.as_ref() {
            Optional::Present(operand) => self.resolve(operand),
            Optional::Absent => Outcome::ok(0),
        };
        self.resolve(&step.lhs)
            .and(rhs)
            .then(|(lhs, rhs)| step.op.apply(lhs, rhs))
            .recover_chain(|err| step.fallback.ok_or(err))
    }
}

pub struct StepReport {
    pub name: String,
    pub outcome: Value,
}

pub struct Report {
    pub steps: Vec<StepReport>,
}

#[derive(Serialize)]
struct StepJson<'a> {
    name: &'a str,
    result: Outcome<i64, String>,
}

impl Report {
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Optional<&Value> {
        Optional::coerce(self.steps.iter().find(|s| s.name == name)).map(|s| &s.outcome)
    }

    pub fn ensure_all_ok(&self) -> Result<()> {
        for step in &self.steps {
            step.outcome
                .clone()
                .force_unwrap()
                .with_context(|| format!("step {:?}", step.name))?;
        }
        Ok(())
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let steps = self
            .steps
            .iter()
            .map(|s| StepJson {
                name: &s.name,
                result: s.outcome.clone().map_error(|e| e.to_string()),
            })
            .collect::<Vec<_>>();
        let json = if pretty {
            serde_json::to_string_pretty(&steps)?
        } else {
            serde_json::to_string(&steps)?
        };
        Ok(json)
    }
}

/// Evaluates the steps in order. A failed step does not stop later ones.
pub fn evaluate(config: &Config) -> Report {
    let mut evaluator = Evaluator {
        inputs: &config.inputs,
        results: BTreeMap::new(),
    };
    let mut steps = Vec::with_capacity(config.steps.len());
    for step in &config.steps {
        let outcome = evaluator.eval_step(step);
        match &outcome {
            Outcome::Ok(value) => debug!(step = %step.name, value = *value, "evaluated"),
            Outcome::Error(err) => warn!(step = %step.name, error = %err, "step failed"),
        }
        evaluator.results.insert(&step.name, outcome.clone());
        steps.push(StepReport {
            name: step.name.clone(),
            outcome,
        });
    }
    Report { steps }
}

#[cfg(test)]
fn run(content: &str) -> Report {
    evaluate(&Config::parse(content).unwrap())
}

#[test]
fn test_op_apply() {
    assert_eq!(Op::Add.apply(2, 3), Outcome::ok(5));
    assert_eq!(Op::Sub.apply(2, 3), Outcome::ok(-1));
    assert_eq!(Op::Neg.apply(2, 0), Outcome::ok(-2));
    assert_eq!(Op::Div.apply(2, 0), Outcome::error(CalcError::DivisionByZero));
    assert_eq!(Op::Mul.apply(i64::MAX, 2), Outcome::error(CalcError::Overflow));
    assert_eq!(Op::Div.apply(i64::MIN, -1), Outcome::error(CalcError::Overflow));
    assert_eq!(Op::Neg.apply(i64::MIN, 0), Outcome::error(CalcError::Overflow));
}

#[test]
fn test_steps_see_earlier_steps() {
    let report = run(r#"
        [inputs]
        a = 4

        [[steps]]
        name = "a"
        op = "mul"
        lhs = "a"
        rhs = 10

        [[steps]]
        name = "b"
        op = "sub"
        lhs = "a"
        rhs = 1
        "#);
    assert_eq!(report.get("a"), Optional::present(&Outcome::ok(40)));
    assert_eq!(report.get("b"), Optional::present(&Outcome::ok(39)));
    assert!(report.get("c").is_absent());
}

#[test]
fn test_left_error_wins() {
    let report = run(r#"
        [[steps]]
        name = "both"
        op = "add"
        lhs = "x"
        rhs = "y"
        "#);
    assert_eq!(
        report.get("both"),
        Optional::present(&Outcome::error(CalcError::UnknownOperand("x".into())))
    );
}

#[test]
fn test_errors_propagate_and_fallback_recovers() {
    let report = run(r#"
        [[steps]]
        name = "bad"
        op = "div"
        lhs = 1
        rhs = 0

        [[steps]]
        name = "after"
        op = "neg"
        lhs = "bad"

        [[steps]]
        name = "rescued"
        op = "neg"
        lhs = "bad"
        fallback = 7
        "#);
    let div_by_zero = Outcome::error(CalcError::DivisionByZero);
    assert_eq!(report.get("after"), Optional::present(&div_by_zero));
    assert_eq!(report.get("rescued"), Optional::present(&Outcome::ok(7)));
    let err = report.ensure_all_ok().unwrap_err();
    assert_eq!(err.to_string(), "step \"bad\"");
    assert_eq!(
        err.downcast_ref::<CalcError>(),
        Some(&CalcError::DivisionByZero)
    );
}

#[test]
fn test_json_report() -> Result<()> {
    let report = run(r#"
        [[steps]]
        name = "one"
        op = "add"
        lhs = 0
        rhs = 1

        [[steps]]
        name = "two"
        op = "add"
        lhs = "nope"
        rhs = 1
        "#);
    assert_eq!(
        report.to_json(false)?,
        r#"[{"name":"one","result":{"ok":1}},{"name":"two","result":{"error":"unknown operand \"nope\""}}]"#
    );

    let pretty = report.to_json(true)?;
    assert!(pretty.starts_with("[\n  {\n    \"name\": \"one\","), "{}", pretty);
    let compact: serde_json::Value = serde_json::from_str(&report.to_json(false)?)?;
    assert_eq!(serde_json::from_str::<serde_json::Value>(&pretty)?, compact);
    Ok(())
}
