use actix_web::{App, test, web};
use serde_json::Value;

use csv_insight::http::{self, ServerOptions};

const BOUNDARY: &str = "insight-test-boundary";

/// Builds a single-part `multipart/form-data` body by hand.
fn multipart_body(field_name: &str, filename: Option<&str>, content: &str) -> String {
    let mut body = String::new();
    body.push_str(&format!("--{BOUNDARY}\r\n"));
    body.push_str(&format!(
        "Content-Disposition: form-data; name=\"{field_name}\""
    ));
    if let Some(filename) = filename {
        body.push_str(&format!("; filename=\"{filename}\""));
    }
    body.push_str("\r\nContent-Type: text/csv\r\n\r\n");
    body.push_str(content);
    body.push_str(&format!("\r\n--{BOUNDARY}--\r\n"));
    body
}

fn upload_request(body: String) -> actix_web::test::TestRequest {
    test::TestRequest::post()
        .uri("/api/upload")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(ServerOptions::default()))
                .configure(http::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn valid_upload_returns_the_full_insight_envelope() {
    let app = test_app!();
    let csv = "Category,Price\nA,10\nB,20\nA,10\nA,5\nC,100\n";
    let req = upload_request(multipart_body("file", Some("orders.csv"), csv)).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "CSV analyzed successfully");
    let insights = &body["insights"];
    assert_eq!(insights["summary"]["total_rows"], 5);
    assert_eq!(insights["summary"]["total_price"], 145.0);
    assert_eq!(insights["summary"]["average_price"], 29.0);
    assert_eq!(insights["top_items"][0]["name"], "A");
    assert_eq!(insights["top_items"][0]["count"], 3);
    assert_eq!(insights["charts"]["grouped_analysis"]["labels"][0], "C");
}

#[actix_web::test]
async fn missing_file_part_is_a_client_error() {
    let app = test_app!();
    let req = upload_request(multipart_body("data", Some("orders.csv"), "a,b\n1,2\n")).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No file uploaded");
    assert!(body.get("success").is_none(), "validation errors carry no success field");
}

#[actix_web::test]
async fn form_field_without_a_filename_is_not_a_file_upload() {
    let app = test_app!();
    let req = upload_request(multipart_body("file", None, "a,b\n1,2\n")).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No file uploaded");
}

#[actix_web::test]
async fn empty_filename_is_a_client_error() {
    let app = test_app!();
    let req = upload_request(multipart_body("file", Some(""), "a,b\n1,2\n")).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No file selected");
}

#[actix_web::test]
async fn non_csv_extension_is_a_client_error() {
    let app = test_app!();
    let req = upload_request(multipart_body("file", Some("orders.txt"), "a,b\n1,2\n")).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Please upload a CSV file");
}

#[actix_web::test]
async fn malformed_csv_is_a_server_error_with_the_parser_message() {
    let app = test_app!();
    let req = upload_request(multipart_body("file", Some("bad.csv"), "a,b\n1\n")).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("Reading row 2"), "{message}");
}

#[actix_web::test]
async fn oversized_upload_is_rejected_by_the_configured_ceiling() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ServerOptions {
                max_upload_bytes: 32,
                ..ServerOptions::default()
            }))
            .configure(http::configure),
    )
    .await;
    let csv = "Category,Price\nA,10\nB,20\nA,10\nA,5\nC,100\n";
    let req = upload_request(multipart_body("file", Some("orders.csv"), csv)).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("limit"), "{message}");
}

#[actix_web::test]
async fn root_serves_the_upload_page() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");
    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).expect("utf8 body");
    assert!(text.contains("CSV Insight"), "root document is the upload page");
}
