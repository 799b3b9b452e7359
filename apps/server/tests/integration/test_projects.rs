//! Project submission and certificate download.

use super::test_helpers::*;
use age_portal_lib::models::Category;

#[actix_rt::test]
async fn test_project_upload_links_certificate() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let (status, body) = post_form(
        &app,
        "/project/upload",
        &[
            Part::Text {
                name: "name",
                value: "Ada Lovelace",
            },
            Part::File {
                name: "project",
                filename: "engine.zip",
                content: b"analytical",
            },
        ],
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("Project uploaded successfully!"));
    assert!(body.contains("<a href='/age/19-25'>"));

    let link = certificate_link(&body).expect("response links a certificate");
    assert_eq!(link, "/cert/Ada_Lovelace_certificate.pdf");

    let (status, pdf) = get(&app, link).await;
    assert_eq!(status, 200);
    assert!(!pdf.is_empty());
    assert!(pdf.starts_with(b"%PDF-"));

    assert_eq!(
        std::fs::read(storage.dir(Category::Project).join("engine.zip")).unwrap(),
        b"analytical"
    );
}

#[actix_rt::test]
async fn test_name_may_follow_file_part() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let (status, body) = post_form(
        &app,
        "/project/upload",
        &[
            Part::File {
                name: "project",
                filename: "robot.tar.gz",
                content: b"beep",
            },
            Part::Text {
                name: "name",
                value: "Grace",
            },
        ],
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(certificate_link(&body), Some("/cert/Grace_certificate.pdf"));
}

#[actix_rt::test]
async fn test_resubmission_overwrites_certificate() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    for content in [b"first".as_slice(), b"second".as_slice()] {
        let (status, _) = post_form(
            &app,
            "/project/upload",
            &[
                Part::Text {
                    name: "name",
                    value: "Alan Turing",
                },
                Part::File {
                    name: "project",
                    filename: "machine.zip",
                    content,
                },
            ],
        )
        .await;
        assert_eq!(status, 200);
    }

    assert_eq!(
        storage.list(Category::Certificate).await.unwrap(),
        vec!["Alan_Turing_certificate.pdf".to_string()]
    );
    assert_eq!(
        std::fs::read(storage.dir(Category::Project).join("machine.zip")).unwrap(),
        b"second"
    );
}

#[actix_rt::test]
async fn test_missing_name_or_file_is_plain_text() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let cases: Vec<Vec<Part<'_>>> = vec![
        vec![Part::File {
            name: "project",
            filename: "work.zip",
            content: b"data",
        }],
        vec![
            Part::Text {
                name: "name",
                value: "",
            },
            Part::File {
                name: "project",
                filename: "work.zip",
                content: b"data",
            },
        ],
        vec![Part::Text {
            name: "name",
            value: "Ada",
        }],
        vec![
            Part::Text {
                name: "name",
                value: "Ada",
            },
            Part::File {
                name: "project",
                filename: "",
                content: b"",
            },
        ],
    ];

    for parts in &cases {
        let (status, body) = post_form(&app, "/project/upload", parts).await;
        assert_eq!(status, 200);
        assert_eq!(body, "Name or project missing");
    }

    assert!(storage.list(Category::Project).await.unwrap().is_empty());
    assert!(storage.list(Category::Certificate).await.unwrap().is_empty());
    assert_eq!(std::fs::read_dir(storage.staging_dir()).unwrap().count(), 0);
}

#[actix_rt::test]
async fn test_non_multipart_body_is_plain_text() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let (status, body) = post_raw(
        &app,
        "/project/upload",
        Some("application/x-www-form-urlencoded"),
        "name=Ada",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, "Name or project missing");

    let (status, body) = post_raw(&app, "/project/upload", None, "").await;
    assert_eq!(status, 200);
    assert_eq!(body, "Name or project missing");

    assert!(storage.list(Category::Certificate).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_too_many_text_fields_are_rejected() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let names: Vec<String> = (0..64).map(|i| format!("extra_{}", i)).collect();
    let mut parts = vec![Part::File {
        name: "project",
        filename: "work.zip",
        content: b"data",
    }];
    parts.extend(names.iter().map(|name| Part::Text {
        name: name.as_str(),
        value: "x",
    }));

    let (status, body) = post_form(&app, "/project/upload", &parts).await;
    assert_eq!(status, 400);
    assert!(body.contains("INVALID_INPUT"));

    assert!(storage.list(Category::Project).await.unwrap().is_empty());
    assert_eq!(std::fs::read_dir(storage.staging_dir()).unwrap().count(), 0);
}

#[actix_rt::test]
async fn test_hostile_name_cannot_escape_certificate_dir() {
    let (tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let (status, body) = post_form(
        &app,
        "/project/upload",
        &[
            Part::Text {
                name: "name",
                value: "../../owned",
            },
            Part::File {
                name: "project",
                filename: "x.zip",
                content: b"x",
            },
        ],
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(certificate_link(&body), Some("/cert/owned_certificate.pdf"));
    assert!(!tmp.path().join("owned_certificate.pdf").exists());
    assert!(
        storage
            .dir(Category::Certificate)
            .join("owned_certificate.pdf")
            .is_file()
    );
}

#[actix_rt::test]
async fn test_non_latin_names_get_separate_certificates() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let mut links = Vec::new();
    for name in ["李雷", "韩梅梅", "😀"] {
        let (status, body) = post_form(
            &app,
            "/project/upload",
            &[
                Part::Text {
                    name: "name",
                    value: name,
                },
                Part::File {
                    name: "project",
                    filename: "work.zip",
                    content: b"data",
                },
            ],
        )
        .await;
        assert_eq!(status, 200);
        links.push(certificate_link(&body).expect("response links a certificate").to_string());
    }

    assert_ne!(links[0], links[1]);
    assert_ne!(links[1], links[2]);
    assert_ne!(links[0], links[2]);
    assert_eq!(storage.list(Category::Certificate).await.unwrap().len(), 3);

    for link in &links {
        let (status, pdf) = get(&app, link).await;
        assert_eq!(status, 200);
        assert!(pdf.starts_with(b"%PDF-"));
    }
}

#[actix_rt::test]
async fn test_missing_certificate_is_not_found() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let (status, _) = get(&app, "/cert/Nobody_certificate.pdf").await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_project_upload_rejects_get() {
    let (_tmp, storage) = create_test_storage().await;
    let app = create_test_app(&storage, TEST_MAX_UPLOAD_SIZE).await;

    let (status, _) = get(&app, "/project/upload").await;
    assert!(status == 404 || status == 405);
}
