//! Page contexts rendered by the HTML-less front end.
//!
//! Every page answers with the JSON document a template would have received:
//! lists under `objectList`, forms under `form` (name, submitted data, field
//! errors), the record being edited or deleted under `object`.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::domain::{Error, FieldErrors};
use crate::inbound::http::ApiResult;

/// Field key for errors that belong to the whole form.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// List page context.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectList<T> {
    pub object_list: Vec<T>,
}

/// A form as shown to the user.
#[derive(Debug, Serialize)]
pub struct FormState<D> {
    pub name: &'static str,
    pub data: D,
    pub errors: FieldErrors,
}

impl<D> FormState<D> {
    /// Form without errors.
    pub fn new(name: &'static str, data: D) -> Self {
        Self {
            name,
            data,
            errors: FieldErrors::default(),
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }
}

/// Form page context, optionally carrying the record being changed.
#[derive(Debug, Serialize)]
pub struct FormPage<D, O = ()> {
    pub form: FormState<D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<O>,
}

/// Detail or delete confirmation context.
#[derive(Debug, Serialize)]
pub struct ObjectPage<O> {
    pub object: O,
}

/// Answer `200` with `context` as JSON.
pub fn render(context: &impl Serialize) -> HttpResponse {
    HttpResponse::Ok().json(context)
}

/// Re-render a rejected submission, or pass any other failure through.
///
/// Validation failures carry field errors and answer `200` with the form
/// filled in, so the user can fix and resubmit.
pub fn rerender_or_fail<D, O>(error: Error, form: FormState<D>, object: Option<O>) -> ApiResult<HttpResponse>
where
    D: Serialize,
    O: Serialize,
{
    match error.field_errors() {
        Some(errors) => Ok(render(&FormPage {
            form: form.with_errors(errors),
            object,
        })),
        None => Err(error),
    }
}
