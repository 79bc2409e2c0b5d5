use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use super::field::{FieldId, FieldKind};

/// Rejected panel edits
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BindingError {
    #[error("{}", t!("connect.errors.type_mismatch", field = field, expected = expected))]
    TypeMismatch { field: FieldId, expected: FieldKind },

    #[error("{}", t!("connect.errors.invalid_url", url = url, scheme = scheme))]
    InvalidUrl { url: String, scheme: String },

    #[error("{}", t!("connect.errors.duplicate_url", url = url))]
    DuplicateUrl { url: String },

    #[error("{}", t!("connect.errors.index_out_of_range", index = index))]
    IndexOutOfRange { index: usize },

    #[error("{}", t!("connect.errors.not_a_url_list", field = field))]
    NotAUrlList { field: FieldId },
}

pub type BindingResult<T> = Result<T, BindingError>;
