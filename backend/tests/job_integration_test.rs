//! Integration tests for posting, listing and applying for jobs

mod common;

use axum::http::StatusCode;
use common::contains_password_hash;
use job_board_backend::repositories::JobRepository;

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_posts_job_and_listing_hides_credentials() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;

    let title = format!("Engineer {}", uuid::Uuid::new_v4());
    let job_id = app.create_job(&admin, &title).await;

    let (status, body) = app.get("/jobs", None).await;
    assert_eq!(status, StatusCode::OK);

    let jobs = body["jobs"].as_array().unwrap();
    let job = jobs
        .iter()
        .find(|j| j["id"] == job_id)
        .expect("posted job is listed");

    assert_eq!(job["title"], title.as_str());
    assert_eq!(job["total_applications"], 0);

    let poster = job["posted_by"].as_object().unwrap();
    let mut keys: Vec<&str> = poster.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["email", "id", "name"]);
    assert_eq!(poster["id"], admin.id);
    assert_eq!(poster["email"], admin.email.as_str());

    assert!(!contains_password_hash(&body));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_job_requires_all_fields() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;

    let (status, body) = app
        .post_form(
            "/admin/job",
            &[("title", "Engineer"), ("description", "Build things")],
            Some(&admin.token),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "title, description, and companyName are required fields"
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_applicant_cannot_use_admin_routes() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;
    let applicant = app.signup_and_login("applicant").await;
    let job_id = app.create_job(&admin, "Role gate").await;

    let (status, body) = app
        .post_form(
            "/admin/job",
            &[
                ("title", "Sneaky"),
                ("description", "Should not exist"),
                ("companyName", "Nope"),
            ],
            Some(&applicant.token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only admins can access this endpoint");

    let sneaky = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM jobs WHERE posted_by_id = $1",
    )
    .bind(applicant.id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(sneaky, 0);

    for path in [
        format!("/admin/job/{}", job_id),
        "/admin/applicants".to_string(),
        format!("/admin/applicant/{}", applicant.id),
    ] {
        let (status, _) = app.get(&path, Some(&applicant.token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", path);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_cannot_apply() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;
    let job_id = app.create_job(&admin, "Admins stay out").await;

    let (status, body) = app
        .get(&format!("/jobs/apply?job_id={}", job_id), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only applicants can access this endpoint");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_apply_validates_job_id() {
    let app = common::TestApp::new().await;
    let applicant = app.signup_and_login("applicant").await;

    let (status, body) = app.get("/jobs/apply", Some(&applicant.token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "job_id is a required parameter");

    let (status, _) = app
        .get("/jobs/apply?job_id=abc", Some(&applicant.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_zero_and_negative_ids_are_not_found() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;
    let applicant = app.signup_and_login("applicant").await;

    for job_id in ["0", "-3"] {
        let (status, body) = app
            .get(&format!("/jobs/apply?job_id={}", job_id), Some(&applicant.token))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "job_id={}", job_id);
        assert_eq!(body["error"], "Job not found");

        let (status, body) = app
            .get(&format!("/admin/job/{}", job_id), Some(&admin.token))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "/admin/job/{}", job_id);
        assert_eq!(body["error"], "Job not found");
    }

    let (status, body) = app.get("/admin/applicant/0", Some(&admin.token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Applicant not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_apply_once_then_conflict() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;
    let applicant = app.signup_and_login("applicant").await;
    let job_id = app.create_job(&admin, "Apply once").await;
    let path = format!("/jobs/apply?job_id={}", job_id);

    let (status, body) = app.get(&path, Some(&applicant.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Applied for job successfully");

    let (status, _) = app.get(&path, Some(&applicant.token)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let job = JobRepository::find_by_id(&app.pool, job_id)
        .await
        .unwrap()
        .unwrap();
    let rows = JobRepository::count_applications(&app.pool, job_id)
        .await
        .unwrap();
    assert_eq!(job.total_applications, 1);
    assert_eq!(rows, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_applies_keep_counter_consistent() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;
    let job_id = app.create_job(&admin, "Popular job").await;

    let mut applicants = Vec::new();
    for _ in 0..8 {
        applicants.push(app.signup_and_login("applicant").await);
    }

    // Every applicant applies twice, all at once
    let mut handles = Vec::new();
    for applicant in applicants.iter().chain(applicants.iter()) {
        let app = app.clone();
        let token = applicant.token.clone();
        let path = format!("/jobs/apply?job_id={}", job_id);
        handles.push(tokio::spawn(async move {
            app.get(&path, Some(&token)).await.0
        }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(ok, applicants.len());
    assert_eq!(conflicts, applicants.len());

    let job = JobRepository::find_by_id(&app.pool, job_id)
        .await
        .unwrap()
        .unwrap();
    let rows = JobRepository::count_applications(&app.pool, job_id)
        .await
        .unwrap();
    assert_eq!(i64::from(job.total_applications), rows);
    assert_eq!(rows, applicants.len() as i64);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_job_detail_lists_applicants_without_hashes() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;
    let first = app.signup_and_login("applicant").await;
    let second = app.signup_and_login("applicant").await;
    let job_id = app.create_job(&admin, "Detail view").await;

    for applicant in [&first, &second] {
        let (status, _) = app
            .get(&format!("/jobs/apply?job_id={}", job_id), Some(&applicant.token))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app
        .get(&format!("/admin/job/{}", job_id), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["id"], job_id);
    assert_eq!(body["total_applications"], 2);
    assert_eq!(body["posted_by"]["id"], admin.id);
    assert_eq!(body["posted_by"]["user_type"], "admin");

    let ids: Vec<i64> = body["applicants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    assert!(!contains_password_hash(&body));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_job_detail_not_found() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;

    let (status, body) = app.get("/admin/job/999999999", Some(&admin.token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_applicant_roster() {
    let app = common::TestApp::new().await;
    let admin = app.signup_and_login("admin").await;
    let applicant = app.signup_and_login("applicant").await;

    let (status, body) = app.get("/admin/applicants", Some(&admin.token)).await;
    assert_eq!(status, StatusCode::OK);
    let applicants = body["applicants"].as_array().unwrap();
    assert!(applicants.iter().any(|a| a["id"] == applicant.id));
    assert!(applicants.iter().all(|a| a["user_type"] == "applicant"));
    assert!(!contains_password_hash(&body));

    let (status, body) = app
        .get(&format!("/admin/applicant/{}", applicant.id), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applicant"]["email"], applicant.email.as_str());

    // An admin is not an applicant
    let (status, _) = app
        .get(&format!("/admin/applicant/{}", admin.id), Some(&admin.token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
