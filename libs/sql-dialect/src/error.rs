use crate::AccessMethod;

/// Failures surfaced by dialect operations.
///
/// Missing capabilities are otherwise reported through `Option` returns;
/// only URL construction has a hard failure mode.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{dialect} connections do not support {access} access")]
    UnsupportedAccessMethod {
        dialect: &'static str,
        access: AccessMethod,
    },
}
