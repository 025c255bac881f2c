#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Mail endpoint served next to `trunk serve` in development
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production
}

pub const CONTACT_PATH: &str = "/api/send-email";

/// Inbox the mail collaborator forwards contact submissions to.
pub const CONTACT_RECIPIENT: &str = "info@blisstechnologies.com";

pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

pub const ALLOWED_ATTACHMENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "text/plain",
];

/// How long the success banner stays up before it dismisses itself.
pub const SUCCESS_BANNER_MS: u32 = 5_000;

pub fn contact_endpoint() -> String {
    format!("{}{}", get_backend_url(), CONTACT_PATH)
}
