use chrono::{TimeZone, Utc};
use serde_json::json;
use weekly_report::gitlab::{
    DueDateFilter, GitLabApi, GitLabClient, IssueQuery, IssueState, MergeRequestQuery,
    ProjectQuery, UpstreamError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn issue_json(id: u64, project_id: u64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "iid": id,
        "title": title,
        "project_id": project_id,
        "assignee": { "id": 7, "username": "jdoe" },
        "due_date": null,
        "web_url": format!("https://git.example.com/p{project_id}/-/issues/{id}"),
        "state": "opened",
        "moved_to_id": null,
        "labels": ["ignored"]
    })
}

#[tokio::test]
async fn sends_token_and_issue_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/issues"))
        .and(header("PRIVATE-TOKEN", TOKEN))
        .and(query_param("scope", "assigned_to_me"))
        .and(query_param("assignee_username", "jdoe"))
        .and(query_param("state", "opened"))
        .and(query_param("due_date", "week"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([issue_json(1, 3, "Write docs")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GitLabClient::new(&mock_server.uri(), TOKEN).unwrap();
    let query = IssueQuery::assigned_to("jdoe", IssueState::Opened).due(DueDateFilter::Week);

    let issues = client.list_issues(&query).await.unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Write docs");
    assert_eq!(issues[0].project_id, 3);
    assert_eq!(issues[0].assignee_id(), Some(7));
}

#[tokio::test]
async fn follows_next_page_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/merge_requests"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Page", "2")
                .set_body_json(json!([{
                    "id": 10,
                    "iid": 1,
                    "title": "Draft: fix-42",
                    "source_branch": "fix-42",
                    "author": { "id": 7, "username": "jdoe" },
                    "state": "opened",
                    "web_url": "https://git.example.com/p1/-/merge_requests/1"
                }])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/merge_requests"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Page", "")
                .set_body_json(json!([{
                    "id": 11,
                    "iid": 2,
                    "title": "Add export",
                    "source_branch": "add-export",
                    "author": { "id": 7, "username": "jdoe" },
                    "state": "opened",
                    "web_url": "https://git.example.com/p1/-/merge_requests/2"
                }])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GitLabClient::new(&mock_server.uri(), TOKEN).unwrap();
    let merge_requests = client
        .list_merge_requests(&MergeRequestQuery::open_by_author(7))
        .await
        .unwrap();

    let branches: Vec<&str> = merge_requests
        .iter()
        .map(|mr| mr.source_branch.as_str())
        .collect();
    assert_eq!(branches, vec!["fix-42", "add-export"]);
}

#[tokio::test]
async fn project_query_uses_membership_and_activity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("membership", "true"))
        .and(query_param("simple", "true"))
        .and(query_param("last_activity_after", "2024-05-03T12:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Backend", "path": "backend" },
            { "id": 2, "name": "Handbook", "path": "handbook" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GitLabClient::new(&format!("{}/", mock_server.uri()), TOKEN).unwrap();
    let since = Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();

    let projects = client
        .list_projects(&ProjectQuery::active_memberships(since))
        .await
        .unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].name, "Handbook");
}

#[tokio::test]
async fn error_status_is_reported_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/issues"))
        .respond_with(ResponseTemplate::new(401).set_body_string("401 Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = GitLabClient::new(&mock_server.uri(), "wrong-token").unwrap();
    let result = client
        .list_issues(&IssueQuery::assigned_to("jdoe", IssueState::Closed))
        .await;

    match result {
        Err(UpstreamError::Status {
            endpoint,
            status,
            body,
        }) => {
            assert_eq!(endpoint, "issues");
            assert_eq!(status, 401);
            assert_eq!(body, "401 Unauthorized");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = GitLabClient::new(&mock_server.uri(), TOKEN).unwrap();
    let result = client
        .list_projects(&ProjectQuery::active_memberships(Utc::now()))
        .await;

    assert!(matches!(result, Err(UpstreamError::Decode { .. })));
}
