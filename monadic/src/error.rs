use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unwrap called on empty optional")]
pub struct EmptyValueError;

#[test]
fn test_empty_value_into_anyhow() {
    let err: anyhow::Error = EmptyValueError.into();
    assert_eq!(err.to_string(), "unwrap called on empty optional");
    assert!(err.downcast_ref::<EmptyValueError>().is_some());
}
