// tests/resolver_test.rs
use chrono::{DateTime, TimeZone, Utc};
use release_tools::domain::Tag;
use release_tools::git::MockRepository;
use release_tools::resolver::VersionResolver;
use release_tools::ReleaseError;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 15, 30, 0).unwrap()
}

fn repo_with(tags: &[(&str, i64)]) -> MockRepository {
    let mut repo = MockRepository::new();
    for (name, time) in tags {
        repo.add_tag(*name, *time);
    }
    repo
}

fn days_ago(days: i64) -> i64 {
    now().timestamp() - days * 86_400
}

#[test]
fn test_first_release_is_one() {
    let repo = MockRepository::new();
    let res = VersionResolver::new("proj", now()).resolve(&repo, "").unwrap();

    assert_eq!(res.tag, Tag::new(1, "", 0));
    assert_eq!(res.tag_name, "proj-r1");
    assert_eq!(res.version.to_string(), "2024.3.5.1");
    assert!(!res.re_release);
}

#[test]
fn test_backwards_revision_rejected() {
    let repo = repo_with(&[("proj-r5", days_ago(3)), ("proj-r4", days_ago(9))]);
    let resolver = VersionResolver::new("proj", now());

    let err = resolver.resolve(&repo, "3").unwrap_err();
    assert!(
        matches!(err, ReleaseError::BackwardsRevision { .. }),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_next_revision_explicit_or_auto() {
    let repo = repo_with(&[("proj-r5", days_ago(3))]);
    let resolver = VersionResolver::new("proj", now());

    assert_eq!(resolver.resolve(&repo, "6").unwrap().tag.rev, 6);
    assert_eq!(resolver.resolve(&repo, "").unwrap().tag.rev, 6);
    assert_eq!(resolver.resolve(&repo, "20").unwrap().tag_name, "proj-r20");
}

#[test]
fn test_qualifier_auto_subrev_with_dashed_tags() {
    let repo = repo_with(&[
        ("proj-r7-dev1", days_ago(2)),
        ("proj-r7-dev2", days_ago(1)),
        ("proj-r7", days_ago(5)),
    ]);
    let res = VersionResolver::new("proj", now())
        .resolve(&repo, "7dev")
        .unwrap();

    assert_eq!(res.tag, Tag::new(7, "dev", 3));
    assert_eq!(res.tag_name, "proj-r7dev3");
    assert_eq!(res.version.to_string(), "2024.3.5.7-dev3");
}

#[test]
fn test_feature_branch_gets_dev_qualifier() {
    let mut repo = repo_with(&[("proj-r7", days_ago(5)), ("proj-r8dev1", days_ago(1))]);
    repo.set_branch(Some("topic"));

    let res = VersionResolver::new("proj", now())
        .resolve(&repo, "")
        .unwrap();
    assert_eq!(res.tag, Tag::new(8, "dev", 2));
    assert_eq!(res.branch, "topic");
}

#[test]
fn test_explicit_qualifier_on_main() {
    let repo = repo_with(&[("proj-r7", days_ago(5))]);
    let res = VersionResolver::new("proj", now())
        .resolve(&repo, "rc")
        .unwrap();
    assert_eq!(res.tag, Tag::new(8, "rc", 1));
}

#[test]
fn test_re_release_same_day_allowed() {
    let repo = repo_with(&[("proj-r5", now().timestamp() - 3600)]);
    let res = VersionResolver::new("proj", now())
        .resolve(&repo, "5")
        .unwrap();
    assert!(res.re_release);
    assert_eq!(res.tag_name, "proj-r5");
}

#[test]
fn test_re_release_previous_day_rejected() {
    let repo = repo_with(&[("proj-r5", days_ago(1))]);
    let err = VersionResolver::new("proj", now())
        .resolve(&repo, "5")
        .unwrap_err();
    assert!(matches!(err, ReleaseError::ReReleaseWindowExpired { .. }));
}

#[test]
fn test_re_release_of_prerelease() {
    let repo = repo_with(&[("proj-r7dev2", now().timestamp() - 60)]);
    let resolver = VersionResolver::new("proj", now());

    let res = resolver.resolve(&repo, "7dev2").unwrap();
    assert!(res.re_release);

    let repo = repo_with(&[("proj-r7dev2", days_ago(2))]);
    assert!(matches!(
        resolver.resolve(&repo, "7dev2"),
        Err(ReleaseError::ReReleaseWindowExpired { .. })
    ));
}

#[test]
fn test_noise_tags_are_skipped() {
    let repo = repo_with(&[
        ("proj-r3", days_ago(10)),
        ("proj-r9.0-legacy", days_ago(10)),
        ("proj-rc1", days_ago(10)),
        ("other-r50", days_ago(10)),
    ]);
    let res = VersionResolver::new("proj", now())
        .resolve(&repo, "")
        .unwrap();
    assert_eq!(res.tag.rev, 4);
}

#[test]
fn test_invalid_user_revision() {
    let repo = MockRepository::new();
    let err = VersionResolver::new("proj", now())
        .resolve(&repo, "7dev3x")
        .unwrap_err();
    assert!(matches!(err, ReleaseError::InvalidRevisionFormat(_)));
}

#[test]
fn test_custom_release_branches_and_qualifier() {
    let mut repo = MockRepository::new();
    repo.set_branch(Some("main"));
    let resolver = VersionResolver::new("proj", now())
        .with_release_branches(vec!["release".to_string()])
        .with_default_qualifier("nightly");

    let res = resolver.resolve(&repo, "").unwrap();
    assert_eq!(res.tag, Tag::new(1, "nightly", 1));
}

#[test]
fn test_re_release_finds_dashed_tag_spelling() {
    let repo = repo_with(&[("PROJ-r7-dev2", now().timestamp() - 60)]);
    let res = VersionResolver::new("proj", now())
        .resolve(&repo, "7dev2")
        .unwrap();
    assert!(res.re_release);
    assert_eq!(res.tag_name, "proj-r7dev2");
}
