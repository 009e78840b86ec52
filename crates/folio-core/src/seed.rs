//! The fixed sample profile installed by the seed operation.

use chrono::NaiveDate;

use crate::{
  entry::{EducationInput, ProjectInput, ProjectLinks, WorkInput},
  profile::{Links, ProfileInput},
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid")
}

fn strings(values: &[&str]) -> Vec<String> {
  values.iter().map(|s| (*s).to_owned()).collect()
}

fn project(title: &str, description: &str, skills: &[&str], slug: &str) -> ProjectInput {
  ProjectInput {
    id:          None,
    title:       title.into(),
    description: description.into(),
    skills:      strings(skills),
    links:       ProjectLinks {
      github: Some(format!("https://github.com/johndoe/{slug}")),
      demo:   Some(format!("https://{slug}-demo.com")),
    },
  }
}

/// A complete profile suitable for
/// [`ProfileStore::replace_or_create`](crate::store::ProfileStore::replace_or_create).
pub fn sample_profile() -> ProfileInput {
  ProfileInput {
    name:      Some("John Doe".into()),
    email:     Some("john.doe@example.com".into()),
    links:     Some(Links {
      github:    Some("https://github.com/johndoe".into()),
      linkedin:  Some("https://linkedin.com/in/johndoe".into()),
      portfolio: Some("https://johndoe-portfolio.com".into()),
    }),
    skills:    Some(strings(&[
      "JavaScript",
      "TypeScript",
      "Node.js",
      "React",
      "MongoDB",
      "Python",
    ])),
    education: Some(vec![EducationInput {
      id:          None,
      institution: "Tech University".into(),
      degree:      "Bachelor of Science".into(),
      field:       "Computer Science".into(),
      start_year:  2016,
      end_year:    Some(2020),
    }]),
    projects:  Some(vec![
      project(
        "E-Commerce Platform",
        "A full-stack e-commerce application with React and Node.js",
        &["React", "Node.js", "MongoDB", "Express"],
        "ecommerce",
      ),
      project(
        "Task Management App",
        "A task management application with drag and drop functionality",
        &["React", "TypeScript", "CSS", "Node.js"],
        "taskmanager",
      ),
      project(
        "Data Visualization Dashboard",
        "A dashboard for visualizing complex data sets",
        &["React", "D3.js", "Python", "Data Analysis"],
        "dataviz",
      ),
    ]),
    work:      Some(vec![
      WorkInput {
        id:          None,
        company:     "Tech Solutions Inc.".into(),
        position:    "Senior Developer".into(),
        description: "Developed and maintained web applications using modern technologies"
          .into(),
        start_date:  date(2020, 6, 1),
        end_date:    None,
      },
      WorkInput {
        id:          None,
        company:     "StartUp Co".into(),
        position:    "Full Stack Developer".into(),
        description: "Built MVP products for various clients using React and Node.js"
          .into(),
        start_date:  date(2018, 6, 1),
        end_date:    Some(date(2020, 5, 31)),
      },
    ]),
  }
}
