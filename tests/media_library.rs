//! Media library integration tests
//!
//! Duplicate detection over a realistic library (uploads and linked videos),
//! plus the role boundary applied to identity metadata.

use serde_json::json;
use showcase::app_state::{InitOnce, Role, RoleError, RoleSet, RuntimeError, RuntimeInfo};
use showcase::media_processing::{
    ContentHash, DuplicateDetector, DuplicateReason, MatchTarget, MediaCandidate, MediaRecord,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn library() -> Vec<MediaRecord> {
    vec![
        MediaRecord {
            id: "reel".to_string(),
            url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
            filename: None,
            content_hash: None,
        },
        MediaRecord {
            id: "poster".to_string(),
            url: Some("https://cdn.example.com/uploads/poster.png".to_string()),
            filename: Some("Poster.png".to_string()),
            content_hash: Some(ContentHash::from_bytes(b"poster bytes")),
        },
        MediaRecord {
            id: "bts".to_string(),
            url: Some("https://vimeo.com/76979871".to_string()),
            filename: None,
            content_hash: None,
        },
    ]
}

#[tokio::test]
async fn test_uploaded_file_matches_library_hash() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"poster bytes").unwrap();

    let candidate = MediaCandidate {
        filename: Some("poster-final-v2.png".to_string()),
        content_hash: Some(ContentHash::from_file(file.path()).await.unwrap()),
        ..Default::default()
    };

    let detector = DuplicateDetector::with_records(&library());
    let duplicate = detector.find_duplicate(&candidate).unwrap();
    assert_eq!(duplicate.target, MatchTarget::Existing("poster".to_string()));
    assert_eq!(duplicate.reason, DuplicateReason::ContentHash);
}

#[test]
fn test_video_link_spellings_are_duplicates() {
    let detector = DuplicateDetector::with_records(&library());

    for url in [
        "https://youtu.be/dQw4w9WgXcQ",
        "youtube.com/embed/dQw4w9WgXcQ",
        "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
    ] {
        let duplicate = detector.find_duplicate(&MediaCandidate::link(url)).unwrap();
        assert_eq!(duplicate.target, MatchTarget::Existing("reel".to_string()), "{url}");
        assert_eq!(duplicate.reason, DuplicateReason::SameVideo, "{url}");
    }

    let duplicate = detector
        .find_duplicate(&MediaCandidate::link("https://player.vimeo.com/video/76979871"))
        .unwrap();
    assert_eq!(duplicate.target, MatchTarget::Existing("bts".to_string()));
}

#[test]
fn test_batch_against_library_and_itself() {
    let mut detector = DuplicateDetector::with_records(&library());
    let batch = vec![
        MediaCandidate::upload("still-01.jpg", b"still one"),
        MediaCandidate::link("https://CDN.example.com/uploads/poster.png/"),
        MediaCandidate::upload("STILL-01-copy.jpg", b"still one"),
        MediaCandidate::link("https://vimeo.com/11111111"),
        MediaCandidate::link("https://vimeo.com/11111111#t=10"),
    ];

    let report = detector.check_batch(&batch);
    assert_eq!(report.unique, vec![0, 3]);
    assert!(!report.is_clean());

    let reasons: Vec<_> = report
        .duplicates
        .iter()
        .map(|(index, duplicate)| (*index, duplicate.target.clone(), duplicate.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (1, MatchTarget::Existing("poster".to_string()), DuplicateReason::Url),
            (2, MatchTarget::Batch(0), DuplicateReason::ContentHash),
            (4, MatchTarget::Batch(3), DuplicateReason::SameVideo),
        ]
    );

    // Unique batch items are now part of the index
    assert_eq!(detector.len(), library().len() + 2);
}

#[test]
fn test_clean_batch() {
    let mut detector = DuplicateDetector::with_records(&library());
    let report = detector.check_batch(&[
        MediaCandidate::upload("new.mov", b"new footage"),
        MediaCandidate::link("https://youtu.be/i_HtDNSxCnE"),
    ]);
    assert!(report.is_clean());
    assert_eq!(report.unique, vec![0, 1]);
}

// =============================================================================
// Roles
// =============================================================================

#[test]
fn test_role_metadata_migrates_to_current_layout() {
    let legacy = RoleSet::from_public_metadata(&json!({"role": "editor", "theme": "dark"})).unwrap();
    assert!(legacy.is_legacy());
    assert!(legacy.can_manage_content());

    let mut upgraded = RoleSet::from_public_metadata(&legacy.to_public_metadata()).unwrap();
    assert!(!upgraded.is_legacy());
    upgraded.insert(Role::Viewer);
    assert_eq!(
        upgraded.to_public_metadata(),
        json!({"rolesVersion": 2, "roles": ["editor", "viewer"]})
    );
}

#[test]
fn test_role_metadata_boundary_rejects_bad_input() {
    assert_eq!(
        RoleSet::from_public_metadata(&json!({"role": "root"})),
        Err(RoleError::UnknownRole("root".to_string()))
    );
    assert!(matches!(
        RoleSet::from_public_metadata(&json!({"roles": [true]})),
        Err(RoleError::InvalidShape(_))
    ));
}

#[test]
fn test_runtime_installed_once() {
    static RUNTIME: InitOnce<RuntimeInfo> = InitOnce::new("runtime info");

    assert_eq!(
        RUNTIME.get().unwrap_err(),
        RuntimeError::NotInitialized("runtime info")
    );
    let info = RUNTIME.install(RuntimeInfo::new("9.9.9")).unwrap();
    assert_eq!(info.version(), "9.9.9");
    assert!(RUNTIME.install(RuntimeInfo::new("0.0.0")).is_err());
    assert_eq!(RUNTIME.get().unwrap().version(), "9.9.9");
}
