//! Host descriptors: the static protocol description of one upload target.
//!
//! A descriptor says where to POST, how the multipart form is laid out, how
//! large a file the host accepts, and how to turn the local file name into the
//! name sent upstream and the response body into the public URL. One generic
//! upload routine drives every host from this data alone.

pub mod file_name;
pub mod response;

use crate::error::ConfigError;
use response::ResponseError;
use std::fmt;

/// Maps the original file name to the name sent to the host. Must be pure.
pub type FileNameTransform = fn(&str) -> String;

/// Maps the raw response body to the public URL. Must be pure.
pub type ResponseTransform = fn(&str) -> Result<String, ResponseError>;

/// Value of one multipart form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormValue {
    /// Sent verbatim.
    Literal(&'static str),
    /// Carries the file bytes under the transformed file name.
    Data,
}

/// Immutable description of one upload target.
#[derive(Clone)]
pub struct HostDescriptor {
    name: String,
    endpoint: String,
    max_file_size: u64,
    default_eligible: bool,
    form: Vec<(&'static str, FormValue)>,
    file_name: FileNameTransform,
    response: ResponseTransform,
}

impl HostDescriptor {
    /// Starts a descriptor with the shared defaults: default-eligible, file
    /// name reduced to its extension, response trimmed.
    pub fn builder(name: &str, endpoint: &str) -> HostBuilder {
        HostBuilder {
            name: name.trim().to_ascii_lowercase(),
            endpoint: endpoint.trim().to_string(),
            max_file_size: 0,
            default_eligible: true,
            form: Vec::new(),
            file_name: file_name::extension_only,
            response: response::trimmed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Largest accepted payload in bytes (always > 0).
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Whether the host is a candidate when no hosts are requested explicitly.
    pub fn is_default_eligible(&self) -> bool {
        self.default_eligible
    }

    /// Form fields in the order they are sent.
    pub fn form(&self) -> &[(&'static str, FormValue)] {
        &self.form
    }

    pub fn accepts(&self, size: u64) -> bool {
        size <= self.max_file_size
    }

    /// Name the host sees for a local file called `original`.
    pub fn upload_name(&self, original: &str) -> String {
        (self.file_name)(original)
    }

    /// Public URL extracted from a successful response body.
    pub fn public_url(&self, body: &str) -> Result<String, ResponseError> {
        (self.response)(body)
    }
}

impl fmt::Debug for HostDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostDescriptor")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("max_file_size", &self.max_file_size)
            .field("default_eligible", &self.default_eligible)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

/// Builder carrying the shared defaults; `build` checks the descriptor invariants.
#[derive(Clone)]
pub struct HostBuilder {
    name: String,
    endpoint: String,
    max_file_size: u64,
    default_eligible: bool,
    form: Vec<(&'static str, FormValue)>,
    file_name: FileNameTransform,
    response: ResponseTransform,
}

impl HostBuilder {
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn default_eligible(mut self, eligible: bool) -> Self {
        self.default_eligible = eligible;
        self
    }

    /// Appends a literal form field.
    pub fn field(mut self, key: &'static str, value: &'static str) -> Self {
        self.form.push((key, FormValue::Literal(value)));
        self
    }

    /// Appends the field that carries the file.
    pub fn data_field(mut self, key: &'static str) -> Self {
        self.form.push((key, FormValue::Data));
        self
    }

    pub fn file_name(mut self, transform: FileNameTransform) -> Self {
        self.file_name = transform;
        self
    }

    pub fn response(mut self, transform: ResponseTransform) -> Self {
        self.response = transform;
        self
    }

    pub fn build(self) -> Result<HostDescriptor, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint(self.name));
        }
        if self.max_file_size == 0 {
            return Err(ConfigError::ZeroSizeLimit(self.name));
        }
        let data_fields = self
            .form
            .iter()
            .filter(|(_, value)| *value == FormValue::Data)
            .count();
        match data_fields {
            0 => return Err(ConfigError::MissingDataField(self.name)),
            1 => {}
            _ => return Err(ConfigError::MultipleDataFields(self.name)),
        }
        Ok(HostDescriptor {
            name: self.name,
            endpoint: self.endpoint,
            max_file_size: self.max_file_size,
            default_eligible: self.default_eligible,
            form: self.form,
            file_name: self.file_name,
            response: self.response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> HostBuilder {
        HostDescriptor::builder("Example", "https://example.com/upload").max_file_size(1024)
    }

    #[test]
    fn builder_applies_shared_defaults() {
        let host = base().data_field("file").build().unwrap();
        assert_eq!(host.name(), "example");
        assert!(host.is_default_eligible());
        assert_eq!(host.upload_name("photo.PNG"), ".PNG");
        assert_eq!(host.public_url("  https://example.com/x\n").unwrap(), "https://example.com/x");
    }

    #[test]
    fn form_keeps_declared_order() {
        let host = base()
            .field("reqtype", "fileupload")
            .data_field("fileToUpload")
            .field("time", "1h")
            .build()
            .unwrap();
        let keys: Vec<&str> = host.form().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["reqtype", "fileToUpload", "time"]);
        assert_eq!(host.form()[1].1, FormValue::Data);
    }

    #[test]
    fn build_rejects_missing_data_field() {
        let err = base().field("reqtype", "fileupload").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingDataField("example".to_string()));
    }

    #[test]
    fn build_rejects_two_data_fields() {
        let err = base().data_field("a").data_field("b").build().unwrap_err();
        assert_eq!(err, ConfigError::MultipleDataFields("example".to_string()));
    }

    #[test]
    fn build_rejects_zero_limit() {
        let err = HostDescriptor::builder("tiny", "https://tiny.example")
            .data_field("file")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroSizeLimit("tiny".to_string()));
    }

    #[test]
    fn build_rejects_empty_name_and_endpoint() {
        let err = HostDescriptor::builder("  ", "https://x.example")
            .max_file_size(1)
            .data_field("file")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyName);
        let err = HostDescriptor::builder("x", "")
            .max_file_size(1)
            .data_field("file")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyEndpoint("x".to_string()));
    }

    #[test]
    fn accepts_is_inclusive() {
        let host = base().data_field("file").build().unwrap();
        assert!(host.accepts(0));
        assert!(host.accepts(1024));
        assert!(!host.accepts(1025));
    }
}
