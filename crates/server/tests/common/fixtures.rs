//! Request-building fixtures.

/// Fixed multipart boundary for test requests.
pub const BOUNDARY: &str = "imprint-test-boundary";

/// Content-Type header value for test submissions.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Build a multipart submission body.
///
/// `file` is the (name, bytes) pair; pass None to omit the file part and
/// exercise the missing-file validation path.
#[allow(dead_code)]
pub fn multipart_body(
    file: Option<(&str, &[u8])>,
    copies: Option<&str>,
    priority: Option<&str>,
) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    for (name, value) in [("copies", copies), ("priority", priority)] {
        if let Some(value) = value {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                     {value}\r\n"
                )
                .as_bytes(),
            );
        }
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Sample PDF-ish bytes.
#[allow(dead_code)]
pub fn sample_pdf() -> &'static [u8] {
    b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n%%EOF\n"
}
