use std::{collections::BTreeMap, fmt, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use monadic::{Optional, Outcome};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub inputs: BTreeMap<String, i64>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub name: String,
    pub op: Op,
    pub lhs: Operand,
    #[serde(default)]
    pub rhs: Optional<Operand>,
    /// Used in place of the step's error, if set.
    #[serde(default)]
    pub fallback: Optional<i64>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
}

impl Op {
    pub fn is_unary(self) -> bool {
        self == Op::Neg
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Div => "div",
            Op::Neg => "neg",
        };
        f.write_str(name)
    }
}

/// A literal, or the name of an earlier step or an input. Steps shadow inputs.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Operand {
    Literal(i64),
    Ref(String),
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config = Self::deserialize(toml::Deserializer::new(content))?;
        let mut seen = BTreeMap::new();
        for (i, step) in config.steps.iter().enumerate() {
            if let Some(first) = seen.insert(step.name.as_str(), i) {
                bail!("{:?}: duplicate step (first defined as step {})", step.name, first);
            }
            match (step.op.is_unary(), step.rhs.is_present()) {
                (true, true) => bail!("{:?}: {} takes no rhs", step.name, step.op),
                (false, false) => bail!("{:?}: {} requires an rhs", step.name, step.op),
                _ => {}
            }
        }
        Ok(config)
    }

    pub fn set_input(&mut self, assignment: &str) -> Result<()> {
        let Some((name, value)) = assignment.split_once('=') else {
            bail!("{:?}: expected NAME=VALUE", assignment);
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("{:?}: empty input name", assignment);
        }
        let parse = Outcome::wrap(|v: &str| v.trim().parse::<i64>());
        let value = parse(value)
            .map_error(|e| anyhow!("{:?}: {}", assignment, e))
            .force_unwrap()?;
        self.inputs.insert(name.to_owned(), value);
        Ok(())
    }
}

#[test]
fn test_parse_steps() -> Result<()> {
    let config = Config::parse(
        r#"
        [inputs]
        a = 3

        [[steps]]
        name = "double"
        op = "mul"
        lhs = "a"
        rhs = 2

        [[steps]]
        name = "neg"
        op = "neg"
        lhs = "double"
        fallback = 0
        "#,
    )?;
    assert_eq!(config.inputs.get("a"), Some(&3));
    let double = &config.steps[0];
    assert_eq!(double.op, Op::Mul);
    assert_eq!(double.lhs, Operand::Ref("a".into()));
    assert_eq!(double.rhs, Optional::present(Operand::Literal(2)));
    assert_eq!(double.fallback, Optional::absent());
    let neg = &config.steps[1];
    assert!(neg.rhs.is_absent());
    assert_eq!(neg.fallback, Optional::present(0));
    Ok(())
}

#[test]
fn test_rejects_unknown_fields() {
    let err = Config::parse("bogus = 1").unwrap_err();
    assert!(err.to_string().contains("bogus"), "{}", err);
}

#[test]
fn test_rejects_duplicate_steps() {
    let err = Config::parse(
        r#"
        [[steps]]
        name = "x"
        op = "neg"
        lhs = 1

        [[steps]]
        name = "x"
        op = "neg"
        lhs = 2
        "#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"x\": duplicate step (first defined as step 0)"
    );
}

#[test]
fn test_rejects_mismatched_rhs() {
    let err = Config::parse(
        r#"
        [[steps]]
        name = "half"
        op = "add"
        lhs = 1
        fallback = 0
        "#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "\"half\": add requires an rhs");

    let err = Config::parse(
        r#"
        [[steps]]
        name = "extra"
        op = "neg"
        lhs = 1
        rhs = 2
        fallback = 5
        "#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "\"extra\": neg takes no rhs");
}

#[test]
fn test_op_display_matches_config_spelling() {
    assert_eq!(Op::Add.to_string(), "add");
    assert_eq!(Op::Neg.to_string(), "neg");
}

#[test]
fn test_set_input() -> Result<()> {
    let mut config = Config::default();
    config.set_input("width = 12")?;
    assert_eq!(config.inputs.get("width"), Some(&12));
    assert!(config.set_input("width").is_err());
    assert!(config.set_input("=3").is_err());
    let err = config.set_input("width=wide").unwrap_err();
    assert!(err.to_string().starts_with("\"width=wide\": invalid digit"), "{}", err);
    Ok(())
}
