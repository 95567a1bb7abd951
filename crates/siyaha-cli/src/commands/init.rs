//! The `siyaha init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("siyaha.toml").exists() {
        println!("siyaha.toml already exists, skipping.");
    } else {
        std::fs::write("siyaha.toml", SAMPLE_CONFIG)?;
        println!("Created siyaha.toml");
    }

    std::fs::create_dir_all("courses")?;
    let course_path = Path::new("courses/my-course.toml");
    if course_path.exists() {
        println!("courses/my-course.toml already exists, skipping.");
    } else {
        std::fs::write(course_path, STARTER_COURSE)?;
        println!("Created courses/my-course.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit siyaha.toml (set SIYAHA_GEMINI_KEY for the photo editor)");
    println!("  2. Run: siyaha validate --course courses/my-course.toml");
    println!("  3. Run: siyaha quiz --course courses/my-course.toml --exam 1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# siyaha configuration

# Course file or directory; the bundled course is used when unset.
# course_path = "courses/my-course.toml"

output_dir = "./siyaha-reports"
pass_mark = 50

[image_editor]
type = "gemini"
api_key = "${SIYAHA_GEMINI_KEY}"
model = "gemini-2.5-flash-image"
"#;

const STARTER_COURSE: &str = r#"[course]
id = "my-course"
title = "مقرري الأول"
department = "قسم الآثار والسياحة"
author = ""

[[chapters]]
id = 1
title = "مقدمة"

[[chapters.sections]]
type = "text"
title = "عن المقرر"
body = "اكتب هنا ملخص الفصل الأول."

[[exams]]
id = 1
title = "اختبار قصير"

[[exams.questions]]
id = 1
kind = "tf"
text = "صنعاء القديمة من مواقع التراث العالمي."
options = ["صواب", "خطأ"]
correct_index = 0
explanation = "أدرجت صنعاء القديمة في قائمة التراث العالمي عام 1986."

[[exams.questions]]
id = 2
text = "تقع مدينة شبام في محافظة:"
options = ["حضرموت", "تعز", "إب"]
correct_index = 0
explanation = "شبام مدينة ناطحات السحاب الطينية في وادي حضرموت."
"#;
