//! Seed documents.
//!
//! `sample_document` is the fully populated example an editor opens with when
//! no stored resume is selected; `starter_document` is what an empty stored
//! resume opens as.

use crate::editor::document::Document;
use crate::model::content::{
    AchievementItem, EducationItem, ExperienceItem, HeaderContent, ProjectItem, SectionContent,
    SkillCategory, SkillsContent,
};
use crate::model::section::{Section, SectionKind};

/// Document with one blank header section.
pub fn starter_document() -> Document {
    Document::from_sections([Section::new(SectionKind::Header)])
}

/// Populated example resume covering every section kind.
pub fn sample_document() -> Document {
    Document::from_sections([
        Section::with_id(
            "header-1",
            SectionKind::Header.default_title(),
            SectionContent::Header(HeaderContent {
                full_name: "John Doe".to_string(),
                title: "Senior Software Engineer".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                website: "www.johndoe.com".to_string(),
                location: "San Francisco, CA".to_string(),
                summary: "Experienced software engineer with 8+ years of experience in \
                          developing web applications using modern technologies. Strong \
                          problem-solving skills and a passion for clean, efficient code."
                    .to_string(),
            }),
        ),
        Section::with_id(
            "experience-1",
            SectionKind::Experience.default_title(),
            SectionContent::Experience(vec![ExperienceItem {
                id: "exp-1".to_string(),
                company: "Tech Innovations Inc.".to_string(),
                position: "Senior Software Engineer".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "Jan 2020".to_string(),
                end_date: "Present".to_string(),
                description: "• Led a team of 5 developers to build a new e-commerce platform\n\
                              • Improved site performance by 40% through code optimizations\n\
                              • Implemented CI/CD pipelines to streamline deployment process"
                    .to_string(),
            }]),
        ),
        Section::with_id(
            "education-1",
            SectionKind::Education.default_title(),
            SectionContent::Education(vec![EducationItem {
                id: "edu-1".to_string(),
                institution: "Stanford University".to_string(),
                degree: "Master of Science in Computer Science".to_string(),
                location: "Stanford, CA".to_string(),
                start_date: "Sep 2016".to_string(),
                end_date: "Jun 2018".to_string(),
                description: "Specialized in Artificial Intelligence and Machine Learning. \
                              Graduated with honors."
                    .to_string(),
            }]),
        ),
        Section::with_id(
            "skills-1",
            SectionKind::Skills.default_title(),
            SectionContent::Skills(SkillsContent {
                categories: vec![
                    category(
                        "cat-1",
                        "Programming Languages",
                        &["JavaScript", "TypeScript", "Python", "Java", "SQL"],
                    ),
                    category(
                        "cat-2",
                        "Frameworks & Libraries",
                        &["React", "Node.js", "Express", "Django", "TensorFlow"],
                    ),
                ],
            }),
        ),
        Section::with_id(
            "projects-1",
            SectionKind::Projects.default_title(),
            SectionContent::Projects(vec![ProjectItem {
                id: "proj-1".to_string(),
                name: "E-commerce Platform".to_string(),
                role: "Lead Developer".to_string(),
                start_date: "Jan 2021".to_string(),
                end_date: "Jun 2021".to_string(),
                link: "https://example.com/project".to_string(),
                description: "Developed a full-stack e-commerce platform with React and Node.js"
                    .to_string(),
            }]),
        ),
        Section::with_id(
            "achievements-1",
            SectionKind::Achievements.default_title(),
            SectionContent::Achievements(vec![AchievementItem {
                id: "ach-1".to_string(),
                title: "Employee of the Year".to_string(),
                issuer: "Tech Innovations Inc.".to_string(),
                date: "December 2022".to_string(),
                description: "Recognized for outstanding contributions and leadership"
                    .to_string(),
            }]),
        ),
    ])
}

fn category(id: &str, name: &str, skills: &[&str]) -> SkillCategory {
    SkillCategory {
        id: id.to_string(),
        name: name.to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{sample_document, starter_document};
    use crate::model::section::SectionKind;

    #[test]
    fn sample_covers_every_kind_once() {
        let document = sample_document();
        let kinds: Vec<_> = document.iter().map(|section| section.kind()).collect();
        assert_eq!(kinds.len(), SectionKind::ALL.len());
        for kind in SectionKind::ALL {
            assert!(kinds.contains(&kind), "missing {kind}");
        }
    }

    #[test]
    fn starter_is_single_blank_header() {
        let document = starter_document();
        assert_eq!(document.len(), 1);
        assert_eq!(document.sections()[0].kind(), SectionKind::Header);
    }
}
