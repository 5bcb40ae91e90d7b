//! Built-in hosts and their one-time, ordered registration.

use crate::error::ConfigError;
use crate::host::file_name;
use crate::host::response::{self, ResponseError};
use crate::host::HostDescriptor;
use crate::registry::HostRegistry;

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// Builds a registry holding every built-in host.
pub fn registry() -> Result<HostRegistry, ConfigError> {
    let mut registry = HostRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}

/// Registers every built-in host, in a fixed order.
pub fn register_all(registry: &mut HostRegistry) -> Result<(), ConfigError> {
    let hosts: [fn() -> Result<HostDescriptor, ConfigError>; 10] = [
        zero_x0st,
        catbox,
        litterbox,
        uguu,
        tmpfiles,
        envs,
        x0at,
        fileio,
        tempsh,
        bashupload,
    ];
    for host in hosts {
        registry.register(host()?)?;
    }
    Ok(())
}

// An identifier cannot start with a digit, hence the explicit name.
fn zero_x0st() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("0x0st", "https://0x0.st")
        .max_file_size(512 * MIB)
        .data_field("file")
        .build()
}

fn catbox() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("catbox", "https://catbox.moe/user/api.php")
        .max_file_size(200 * MIB)
        .field("reqtype", "fileupload")
        .data_field("fileToUpload")
        .build()
}

fn litterbox() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder(
        "litterbox",
        "https://litterbox.catbox.moe/resources/internals/api.php",
    )
    .max_file_size(GIB)
    .field("reqtype", "fileupload")
    .field("time", "72h")
    .data_field("fileToUpload")
    .build()
}

fn uguu() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("uguu", "https://uguu.se/upload")
        .max_file_size(128 * MIB)
        .data_field("files[]")
        .file_name(file_name::base_name)
        .response(uguu_url)
        .build()
}

fn uguu_url(body: &str) -> Result<String, ResponseError> {
    response::json_field(body, &["files", "0", "url"])
}

fn tmpfiles() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("tmpfiles", "https://tmpfiles.org/api/v1/upload")
        .max_file_size(100 * MIB)
        .data_field("file")
        .response(tmpfiles_url)
        .build()
}

fn tmpfiles_url(body: &str) -> Result<String, ResponseError> {
    response::json_field(body, &["data", "url"]).map(|url| response::force_https(&url))
}

fn envs() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("envs", "https://envs.sh")
        .max_file_size(512 * MIB)
        .data_field("file")
        .build()
}

fn x0at() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("x0at", "https://x0.at/")
        .max_file_size(222 * MIB)
        .default_eligible(false)
        .data_field("file")
        .file_name(x0at_name)
        .build()
}

fn x0at_name(_: &str) -> String {
    "upload".to_string()
}

fn fileio() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("fileio", "https://file.io")
        .max_file_size(2 * GIB)
        .default_eligible(false)
        .data_field("file")
        .file_name(file_name::base_name)
        .response(fileio_url)
        .build()
}

fn fileio_url(body: &str) -> Result<String, ResponseError> {
    response::json_field(body, &["link"]).map(|url| response::strip_query(&url))
}

fn tempsh() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("tempsh", "https://temp.sh/upload")
        .max_file_size(4 * GIB)
        .default_eligible(false)
        .data_field("file")
        .file_name(file_name::duration_coded)
        .build()
}

/// Page served by bashupload after a form upload; the URL sits between these.
const BASHUPLOAD_PAGE_HEAD: &str = "<!DOCTYPE html>\n<html><body><p>Uploaded: <a href=\"";
const BASHUPLOAD_PAGE_TAIL: &str = "\">download</a></p></body></html>\n";

fn bashupload() -> Result<HostDescriptor, ConfigError> {
    HostDescriptor::builder("bashupload", "https://bashupload.com/")
        .max_file_size(50 * GIB)
        .default_eligible(false)
        .data_field("file")
        .file_name(file_name::base_name)
        .response(bashupload_url)
        .build()
}

// Fixed offsets into the page template; breaks if the host changes its markup.
fn bashupload_url(body: &str) -> Result<String, ResponseError> {
    response::fixed_slice(body, BASHUPLOAD_PAGE_HEAD.len(), BASHUPLOAD_PAGE_TAIL.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FormValue;

    #[test]
    fn all_builtin_hosts_register() {
        let registry = registry().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            [
                "0x0st",
                "catbox",
                "litterbox",
                "uguu",
                "tmpfiles",
                "envs",
                "x0at",
                "fileio",
                "tempsh",
                "bashupload"
            ]
        );
    }

    #[test]
    fn registering_twice_fails() {
        let mut registry = registry().unwrap();
        assert_eq!(
            register_all(&mut registry).unwrap_err(),
            ConfigError::DuplicateHost("0x0st".to_string())
        );
    }

    #[test]
    fn every_host_has_one_data_field() {
        for (name, host) in registry().unwrap().iter() {
            let data = host.form().iter().filter(|(_, v)| *v == FormValue::Data).count();
            assert_eq!(data, 1, "{name}");
            assert!(host.max_file_size() > 0, "{name}");
        }
    }

    #[test]
    fn catbox_sends_reqtype_before_data() {
        let host = catbox().unwrap();
        assert_eq!(
            host.form(),
            &[
                ("reqtype", FormValue::Literal("fileupload")),
                ("fileToUpload", FormValue::Data)
            ]
        );
    }

    #[test]
    fn uguu_parses_json() {
        let host = uguu().unwrap();
        let body = r#"{"success":true,"files":[{"hash":"x","filename":"a.png","url":"https://h.uguu.se/a.png","size":4}]}"#;
        assert_eq!(host.public_url(body).unwrap(), "https://h.uguu.se/a.png");
        assert_eq!(host.upload_name("/tmp/a.png"), "a.png");
    }

    #[test]
    fn tmpfiles_forces_https() {
        let host = tmpfiles().unwrap();
        let body = r#"{"status":"success","data":{"url":"http://tmpfiles.org/123/a.png"}}"#;
        assert_eq!(host.public_url(body).unwrap(), "https://tmpfiles.org/123/a.png");
        let body = r#"{"status":"success","data":{"url":"https://tmpfiles.org/123/a.png"}}"#;
        assert_eq!(host.public_url(body).unwrap(), "https://tmpfiles.org/123/a.png");
    }

    #[test]
    fn fileio_strips_query() {
        let host = fileio().unwrap();
        let body = r#"{"success":true,"key":"abc","link":"https://file.io/abc?download=1"}"#;
        assert_eq!(host.public_url(body).unwrap(), "https://file.io/abc");
    }

    #[test]
    fn x0at_sends_fixed_name() {
        let host = x0at().unwrap();
        assert_eq!(host.upload_name("secret-plans.pdf"), "upload");
        assert!(!host.is_default_eligible());
    }

    #[test]
    fn tempsh_sends_duration_code() {
        assert_eq!(tempsh().unwrap().upload_name("clip.mp4"), "72h.mp4");
    }

    #[test]
    fn bashupload_slices_page() {
        let host = bashupload().unwrap();
        let page = format!(
            "{}https://bashupload.com/Xy12/report.pdf{}",
            BASHUPLOAD_PAGE_HEAD, BASHUPLOAD_PAGE_TAIL
        );
        assert_eq!(host.public_url(&page).unwrap(), "https://bashupload.com/Xy12/report.pdf");
        assert!(host.public_url("oops").is_err());
    }

    #[test]
    fn zero_x0st_defaults() {
        let host = zero_x0st().unwrap();
        assert_eq!(host.name(), "0x0st");
        assert!(host.is_default_eligible());
        assert_eq!(host.upload_name("photo.PNG"), ".PNG");
    }
}
