//! Multipart body assembly from a host's form template.

use super::Payload;
use crate::host::{FormValue, HostDescriptor};
use curl::easy::Form;

/// Builds the form in declared field order. The data field carries the
/// payload under `file_name`; literal fields are copied verbatim.
///
/// A file payload is only referenced here: libcurl streams it from disk
/// while the request is sent, so nothing is read for a dry run.
pub(crate) fn build_form(
    host: &HostDescriptor,
    file_name: &str,
    payload: Payload<'_>,
) -> Result<Form, curl::FormError> {
    let mut form = Form::new();
    let mut payload = Some(payload);
    for (key, value) in host.form() {
        match value {
            FormValue::Literal(text) => form.part(key).contents(text.as_bytes()).add()?,
            FormValue::Data => match payload.take() {
                Some(Payload::File(path)) => form.part(key).file(path).filename(file_name).add()?,
                Some(Payload::Bytes(data)) => form.part(key).buffer(file_name, data).add()?,
                // Descriptors carry exactly one data field.
                None => {}
            },
        }
    }
    Ok(form)
}
