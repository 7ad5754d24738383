use super::*;
use serde_json::json;

#[test]
fn test_repository_repo_ref() {
    let repo: Repository = serde_json::from_value(json!({
        "name": "widgets",
        "full_name": "octo-org/widgets",
        "owner": { "login": "octo-org", "id": 1, "type": "Organization" },
        "archived": false
    }))
    .unwrap();

    assert_eq!(repo.repo_ref(), RepoRef::new("octo-org", "widgets"));
}

#[test]
fn test_installation_repositories_deserialization() {
    let page: InstallationRepositories = serde_json::from_value(json!({
        "total_count": 1,
        "repositories": [
            { "name": "widgets", "owner": { "login": "octo-org" } }
        ]
    }))
    .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.repositories[0].name, "widgets");
    assert!(!page.repositories[0].archived);
}
