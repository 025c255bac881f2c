use crate::config;

use super::models::Attachment;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachmentPolicy {
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: config::MAX_ATTACHMENT_BYTES,
            allowed_types: config::ALLOWED_ATTACHMENT_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl AttachmentPolicy {
    /// Value for the file input's `accept` attribute.
    pub fn accept_attr(&self) -> String {
        self.allowed_types.join(",")
    }

    fn allows_type(&self, mime_type: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type.trim()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentRejection {
    #[error("{name} is too large ({} max)", limit_label(.limit))]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("{name} has an unsupported file type")]
    UnsupportedType { name: String, mime_type: String },
}

fn limit_label(limit: &u64) -> String {
    human_size(*limit)
}

pub fn check_attachment(
    policy: &AttachmentPolicy,
    attachment: &Attachment,
) -> Result<(), AttachmentRejection> {
    if attachment.size > policy.max_bytes {
        return Err(AttachmentRejection::TooLarge {
            name: attachment.name.clone(),
            size: attachment.size,
            limit: policy.max_bytes,
        });
    }
    if !policy.allows_type(&attachment.mime_type) {
        return Err(AttachmentRejection::UnsupportedType {
            name: attachment.name.clone(),
            mime_type: attachment.mime_type.clone(),
        });
    }
    Ok(())
}

/// Splits freshly picked files into the ones that may join the submission and
/// the reasons the others were turned away.
pub fn select_attachments(
    policy: &AttachmentPolicy,
    candidates: impl IntoIterator<Item = Attachment>,
) -> (Vec<Attachment>, Vec<AttachmentRejection>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for candidate in candidates {
        match check_attachment(policy, &candidate) {
            Ok(()) => accepted.push(candidate),
            Err(rejection) => rejected.push(rejection),
        }
    }
    (accepted, rejected)
}

pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str, size: usize) -> Attachment {
        Attachment::from_bytes(name, mime, vec![0u8; size])
    }

    #[test]
    fn accepts_allowed_types_within_limit() {
        let policy = AttachmentPolicy::default();
        for mime in config::ALLOWED_ATTACHMENT_TYPES {
            assert_eq!(check_attachment(&policy, &file("a", mime, 10)), Ok(()));
        }
        assert_eq!(check_attachment(&policy, &file("A.PNG", "IMAGE/PNG", 10)), Ok(()));
    }

    #[test]
    fn limit_is_inclusive() {
        let policy = AttachmentPolicy {
            max_bytes: 8,
            ..AttachmentPolicy::default()
        };
        assert!(check_attachment(&policy, &file("ok.txt", "text/plain", 8)).is_ok());
        assert_eq!(
            check_attachment(&policy, &file("big.txt", "text/plain", 9)),
            Err(AttachmentRejection::TooLarge {
                name: "big.txt".to_string(),
                size: 9,
                limit: 8,
            })
        );
    }

    #[test]
    fn small_limits_are_not_rounded_down_to_zero() {
        let policy = AttachmentPolicy {
            max_bytes: 512 * 1024,
            ..AttachmentPolicy::default()
        };
        let mut photo = file("photo.jpg", "image/jpeg", 0);
        photo.size = 600 * 1024;
        let err = check_attachment(&policy, &photo).unwrap_err();
        assert_eq!(err.to_string(), "photo.jpg is too large (512.0 KB max)");

        let tiny = AttachmentPolicy { max_bytes: 8, ..AttachmentPolicy::default() };
        let err = check_attachment(&tiny, &file("big.txt", "text/plain", 9)).unwrap_err();
        assert_eq!(err.to_string(), "big.txt is too large (8 B max)");
    }

    #[test]
    fn oversize_default_policy_mentions_five_mb() {
        let mut big = file("scan.pdf", "application/pdf", 0);
        big.size = config::MAX_ATTACHMENT_BYTES + 1;
        let err = check_attachment(&AttachmentPolicy::default(), &big).unwrap_err();
        assert_eq!(err.to_string(), "scan.pdf is too large (5.0 MB max)");
    }

    #[test]
    fn rejects_disallowed_type() {
        let err = check_attachment(
            &AttachmentPolicy::default(),
            &file("setup.exe", "application/x-msdownload", 1),
        )
        .unwrap_err();
        assert!(matches!(err, AttachmentRejection::UnsupportedType { .. }));
        assert_eq!(err.to_string(), "setup.exe has an unsupported file type");
    }

    #[test]
    fn selection_keeps_order_of_accepted_files() {
        let (accepted, rejected) = select_attachments(
            &AttachmentPolicy::default(),
            vec![
                file("one.png", "image/png", 1),
                file("two.zip", "application/zip", 1),
                file("three.txt", "text/plain", 1),
            ],
        );
        let names: Vec<_> = accepted.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["one.png", "three.txt"]);
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn accept_attr_lists_every_type() {
        assert_eq!(
            AttachmentPolicy::default().accept_attr(),
            "image/jpeg,image/png,image/gif,application/pdf,text/plain"
        );
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }
}
