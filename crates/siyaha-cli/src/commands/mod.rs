pub mod edit_image;
pub mod exams;
pub mod home;
pub mod init;
pub mod quiz;
pub mod report;
pub mod summary;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use siyaha_core::model::Course;
use siyaha_core::parser;
use siyaha_providers::config::load_config_from;
use siyaha_providers::SiyahaConfig;

/// Course compiled into the binary, used when nothing else is configured.
pub const BUNDLED_COURSE: &str = include_str!("../../../../courses/yemen-tourism.toml");

/// Global options shared by every subcommand.
pub struct Context {
    pub course: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Context {
    pub fn config(&self) -> Result<SiyahaConfig> {
        load_config_from(self.config.as_deref())
    }

    /// All courses at the selected location: `--course`, then the config's
    /// `course_path`, then the bundled course.
    pub fn courses(&self, config: &SiyahaConfig) -> Result<Vec<Course>> {
        let path = self.course.as_ref().or(config.course_path.as_ref());
        match path {
            Some(p) if p.is_dir() => {
                let courses = parser::load_course_directory(p)?;
                anyhow::ensure!(!courses.is_empty(), "no courses found in {}", p.display());
                Ok(courses)
            }
            Some(p) => Ok(vec![parser::parse_course(p)?]),
            None => Ok(vec![parser::parse_course_str(
                BUNDLED_COURSE,
                Path::new("<bundled>/yemen-tourism.toml"),
            )?]),
        }
    }

    /// The course to study. A directory yields its first course.
    pub fn course(&self, config: &SiyahaConfig) -> Result<Course> {
        let mut courses = self.courses(config)?;
        if courses.len() > 1 {
            tracing::warn!(
                "{} courses found, using \"{}\"",
                courses.len(),
                courses[0].info.title
            );
        }
        Ok(courses.swap_remove(0))
    }
}
