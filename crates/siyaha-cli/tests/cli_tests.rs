//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `siyaha` command isolated from the user's config and environment.
fn siyaha(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("siyaha").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("SIYAHA_GEMINI_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn validate_bundled_course() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("السياحة في اليمن"))
        .stdout(predicate::str::contains("4 chapters, 3 exams, 10 questions"))
        .stdout(predicate::str::contains("All courses valid"));
}

#[test]
fn validate_reports_content_problems() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("broken.toml"),
        r#"
[course]
id = "broken"
title = "Broken"

[[exams]]
id = 1
title = "Bad exam"

[[exams.questions]]
id = 1
text = "Pick one"
options = ["a", "b", "c"]
correct_index = 5
"#,
    )
    .unwrap();

    siyaha(dir.path())
        .args(["validate", "--course", "broken.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[exam 1 / question 1] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_nonexistent_course() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args(["validate", "--course", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn home_shows_highlights() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains("يوسف الدرعي"))
        .stdout(predicate::str::contains("كنوز التاريخ"));
}

#[test]
fn exams_lists_bundled_exams() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .arg("exams")
        .assert()
        .success()
        .stdout(predicate::str::contains("النموذج الأول"))
        .stdout(predicate::str::contains("اختبار الإرشاد والأمن"));
}

#[test]
fn summary_single_chapter() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args(["summary", "--chapter", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("محطات تاريخية"))
        .stdout(predicate::str::contains("أنواع السياحة").not());

    siyaha(dir.path())
        .args(["summary", "--chapter", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chapter 99 not found"));
}

#[test]
fn scripted_quiz_writes_reports() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args([
            "quiz", "--exam", "1", "--answers", "1,1,0", "--format", "all", "--output", "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("أحسنت! إجابة موفقة"))
        .stdout(predicate::str::contains("للأسف، إجابة غير صحيحة"))
        .stdout(predicate::str::contains("Score: 1/3 (33%) FAIL"));

    let out = dir.path().join("out");
    let json = std::fs::read_to_string(out.join("Report_النموذج_الأول.json")).unwrap();
    let result: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(result["score"], 1);
    assert_eq!(result["total"], 3);
    assert_eq!(result["answers"].as_array().unwrap().len(), 3);
    assert_eq!(result["answers"][0]["is_correct"], true);
    assert_eq!(result["answers"][1]["user_answer"], "خطأ");

    let html = std::fs::read_to_string(out.join("Report_النموذج_الأول.html")).unwrap();
    assert!(html.contains("dir=\"rtl\""));
    assert!(html.contains("33%"));
    assert!(out.join("Report_النموذج_الأول.md").exists());
}

#[test]
fn perfect_score_passes() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args(["quiz", "--exam", "1", "--answers", "1,0,2", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 3/3 (100%) PASS"));

    assert!(dir
        .path()
        .join("siyaha-reports/Report_النموذج_الأول.json")
        .exists());
}

#[test]
fn pass_mark_comes_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("siyaha.toml"), "pass_mark = 30\n").unwrap();

    siyaha(dir.path())
        .args(["quiz", "--exam", "1", "--answers", "1,1,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1/3 (33%) PASS"));

    let html = std::fs::read_to_string(
        dir.path()
            .join("siyaha-reports/Report_النموذج_الأول.html"),
    )
    .unwrap();
    assert!(html.contains("<p class=\"verdict pass\">ناجح</p>"));
}

#[test]
fn exam_title_with_path_separator_stays_in_output_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("units.toml"),
        r#"
[course]
id = "units"
title = "Units"

[[exams]]
id = 1
title = "الوحدة 1/2"

[[exams.questions]]
id = 1
text = "Pick one"
options = ["a", "b"]
correct_index = 0
"#,
    )
    .unwrap();

    siyaha(dir.path())
        .args([
            "quiz", "--course", "units.toml", "--exam", "1", "--answers", "0", "--format", "all",
            "--output", "out",
        ])
        .assert()
        .success();

    let out = dir.path().join("out");
    for ext in ["json", "html", "md"] {
        assert!(out.join(format!("Report_الوحدة_1_2.{ext}")).is_file());
    }
    assert!(!out.join("Report_الوحدة_1").exists());
}

#[test]
fn quiz_rejects_out_of_range_answer() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args(["quiz", "--exam", "1", "--answers", "1,5,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("option 5 is out of range"));

    assert!(!dir.path().join("siyaha-reports").exists());
}

#[test]
fn quiz_rejects_wrong_answer_count() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args(["quiz", "--exam", "1", "--answers", "1,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3 answers, got 2"));
}

#[test]
fn quiz_unknown_exam() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args(["quiz", "--exam", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exam 42 not found"));
}

#[test]
fn interactive_quiz_from_stdin() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args(["quiz", "--exam", "1", "--format", "json"])
        .write_stdin("1\n\n0\n\n2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("السؤال 3 من 3"))
        .stdout(predicate::str::contains("Score: 3/3 (100%) PASS"));
}

#[test]
fn interactive_quiz_can_be_abandoned() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args(["quiz", "--exam", "2"])
        .write_stdin("0\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz abandoned"));

    assert!(!dir.path().join("siyaha-reports").exists());
}

#[test]
fn report_from_saved_result() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .args([
            "quiz", "--exam", "1", "--answers", "1,1,0", "--format", "json", "--output", ".",
        ])
        .assert()
        .success();

    siyaha(dir.path())
        .args(["report", "--result", "Report_النموذج_الأول.json", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| الإجابات الصحيحة | 1 | 33% |"))
        .stdout(predicate::str::contains("| الإجابات الخاطئة | 2 | 67% |"));

    siyaha(dir.path())
        .args([
            "report",
            "--result",
            "Report_النموذج_الأول.json",
            "--out",
            "printable.html",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML report"));

    let html = std::fs::read_to_string(dir.path().join("printable.html")).unwrap();
    assert!(html.contains("المقرر: السياحة في اليمن"));
}

#[test]
fn report_keeps_course_of_saved_result() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("result.json"),
        r#"{
  "id": "00000000-0000-0000-0000-000000000000",
  "exam_id": 1,
  "exam_title": "النموذج الأول",
  "course_id": "hadramout-heritage",
  "course_title": "آثار حضرموت",
  "score": 0,
  "total": 0,
  "answers": [],
  "completed_at": "2024-05-01T10:30:00Z"
}"#,
    )
    .unwrap();

    siyaha(dir.path())
        .args(["report", "--result", "result.json", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**المقرر:** آثار حضرموت"))
        .stdout(predicate::str::contains("السياحة في اليمن").not())
        .stdout(predicate::str::contains("يوسف الدرعي").not());
}

#[test]
fn report_rejects_tampered_result() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("result.json"),
        r#"{
  "id": "00000000-0000-0000-0000-000000000000",
  "exam_id": 1,
  "exam_title": "x",
  "score": 3,
  "total": 1,
  "answers": [],
  "completed_at": "2024-05-01T10:30:00Z"
}"#,
    )
    .unwrap();

    siyaha(dir.path())
        .args(["report", "--result", "result.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created siyaha.toml"))
        .stdout(predicate::str::contains("Created courses/my-course.toml"));

    assert!(dir.path().join("siyaha.toml").exists());
    assert!(dir.path().join("courses/my-course.toml").exists());

    siyaha(dir.path())
        .args(["validate", "--course", "courses/my-course.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All courses valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    siyaha(dir.path()).arg("init").assert().success();

    siyaha(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn edit_image_with_mock_editor() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("siyaha.toml"),
        "[image_editor]\ntype = \"mock\"\n",
    )
    .unwrap();
    let pixels = b"\x89PNG\r\n\x1a\nfake image bytes";
    std::fs::write(dir.path().join("shibam.png"), pixels).unwrap();

    siyaha(dir.path())
        .args([
            "edit-image",
            "--image",
            "shibam.png",
            "--prompt",
            "أضف ألوان غروب الشمس",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("shibam_edited.png"));

    let edited = std::fs::read(dir.path().join("shibam_edited.png")).unwrap();
    assert_eq!(edited, pixels);
}

#[test]
fn edit_image_mock_keeps_jpeg_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("siyaha.toml"),
        "[image_editor]\ntype = \"mock\"\n",
    )
    .unwrap();
    let pixels = b"\xff\xd8\xff\xe0fake jpeg";
    std::fs::write(dir.path().join("aden.jpg"), pixels).unwrap();

    siyaha(dir.path())
        .args(["edit-image", "--image", "aden.jpg", "--prompt", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aden_edited.jpg"));

    assert_eq!(std::fs::read(dir.path().join("aden_edited.jpg")).unwrap(), pixels);
    assert!(!dir.path().join("aden_edited.png").exists());
}

#[test]
fn edit_image_without_editor_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("photo.jpg"), b"jpeg").unwrap();

    siyaha(dir.path())
        .args(["edit-image", "--image", "photo.jpg", "--prompt", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no image editor configured"));
}
