//! The resume shown below the banner.
//!
//! Content is a JSON document (`assets/resume.json` is bundled into the
//! binary) and is rendered to markup for the `#app` container. Sections
//! without entries are left out; everything from the document is escaped.

use serde::Deserialize;

use crate::error::Error;

const BUNDLED: &str = include_str!("../../assets/resume.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resume {
    pub profile: Profile,
    /// Text for the 3D banner when it differs from the profile.
    #[serde(default)]
    pub banner: Option<BannerText>,
    #[serde(default)]
    pub contact: Vec<ContactRow>,
    pub summary: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub experience: Vec<Job>,
    #[serde(default)]
    pub education: Vec<Degree>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub articles: Vec<Article>,
    pub contact_section: ContactSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BannerText {
    pub headline: String,
    pub subtitle: String,
}

/// One line of the header's contact block, e.g. an e-mail address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactRow {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Degree {
    pub degree: String,
    pub university: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Testimonial {
    pub text: String,
    pub author: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Award {
    pub title: String,
    pub description: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Article {
    pub title: String,
    pub excerpt: String,
    pub meta: String,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactMethod {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactSection {
    pub intro: String,
    #[serde(default)]
    pub methods: Vec<ContactMethod>,
    #[serde(default)]
    pub social: Vec<Link>,
}

impl Resume {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(format!("resume: {e}")))
    }

    /// The resume compiled into the binary.
    pub fn bundled() -> Result<Self, Error> {
        Self::from_json(BUNDLED)
    }
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn link(link: &Link, class: &str) -> String {
    format!(
        r#"<a href="{}" class="{}">{}</a>"#,
        escape(&link.href),
        class,
        escape(&link.label)
    )
}

fn section(title: &str, body: String) -> String {
    format!(
        r#"<section class="resume-section"><h2 class="section-title">{}</h2>{}</section>"#,
        escape(title),
        body
    )
}

/// Like [`section`] but omitted when there is nothing to show.
fn optional_section<T>(title: &str, items: &[T], container: &str, item: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return String::new();
    }
    let body: String = items.iter().map(item).collect();
    section(title, format!(r#"<div class="{container}">{body}</div>"#))
}

fn header(resume: &Resume) -> String {
    let contact: String = resume
        .contact
        .iter()
        .map(|row| {
            format!(
                r#"<p><i class="contact-icon">{}</i> {}</p>"#,
                escape(&row.icon),
                escape(&row.text)
            )
        })
        .collect();
    format!(
        concat!(
            r#"<header class="resume-header">"#,
            r#"<div class="profile-section"><h1 class="name">{}</h1><h2 class="title">{}</h2></div>"#,
            r#"<div class="contact-section">{}</div>"#,
            "</header>"
        ),
        escape(&resume.profile.name),
        escape(&resume.profile.title),
        contact
    )
}

fn project(project: &Project) -> String {
    let more = project
        .link
        .as_ref()
        .map(|l| link(l, "project-link"))
        .unwrap_or_default();
    format!(
        r#"<div class="project-item"><h3 class="project-title">{}</h3><p class="project-description">{}</p>{}</div>"#,
        escape(&project.title),
        escape(&project.description),
        more
    )
}

fn skill_category(category: &SkillCategory) -> String {
    let items: String = category
        .skills
        .iter()
        .map(|s| format!("<li>{}</li>", escape(s)))
        .collect();
    format!(
        r#"<div class="skill-category"><h3 class="skill-category-title">{}</h3><ul class="skills-list">{}</ul></div>"#,
        escape(&category.title),
        items
    )
}

fn job(job: &Job) -> String {
    let highlights: String = job
        .highlights
        .iter()
        .map(|h| format!("<li>{}</li>", escape(h)))
        .collect();
    format!(
        concat!(
            r#"<div class="experience-item"><div class="job-header">"#,
            r#"<h3 class="job-title">{}</h3><p class="company">{}</p><p class="job-period">{}</p>"#,
            r#"</div><ul class="job-description">{}</ul></div>"#
        ),
        escape(&job.title),
        escape(&job.company),
        escape(&job.period),
        highlights
    )
}

fn degree(degree: &Degree) -> String {
    format!(
        r#"<div class="education-item"><h3 class="degree">{}</h3><p class="university">{}</p><p class="education-period">{}</p></div>"#,
        escape(&degree.degree),
        escape(&degree.university),
        escape(&degree.period)
    )
}

fn testimonial(t: &Testimonial) -> String {
    format!(
        concat!(
            r#"<div class="testimonial-item"><p class="testimonial-text">"{}"</p>"#,
            r#"<div class="testimonial-author"><p class="author-name">{}</p><p class="author-title">{}</p></div></div>"#
        ),
        escape(&t.text),
        escape(&t.author),
        escape(&t.role)
    )
}

fn award(award: &Award) -> String {
    format!(
        r#"<div class="award-item"><h3 class="award-title">{}</h3><p class="award-description">{}</p><p class="award-date">{}</p></div>"#,
        escape(&award.title),
        escape(&award.description),
        escape(&award.date)
    )
}

fn article(article: &Article) -> String {
    format!(
        r#"<div class="blog-item"><h3 class="blog-title">{}</h3><p class="blog-excerpt">{}</p><p class="blog-meta">{}</p>{}</div>"#,
        escape(&article.title),
        escape(&article.excerpt),
        escape(&article.meta),
        link(&article.link, "blog-link")
    )
}

fn contact(contact: &ContactSection) -> String {
    let methods: String = contact
        .methods
        .iter()
        .map(|m| {
            let value = match &m.href {
                Some(href) => format!(r#"<a href="{}">{}</a>"#, escape(href), escape(&m.value)),
                None => escape(&m.value),
            };
            format!(
                r#"<div class="contact-method"><h3>{}</h3><p>{}</p></div>"#,
                escape(&m.label),
                value
            )
        })
        .collect();
    let social: String = contact.social.iter().map(|l| link(l, "social-link")).collect();
    section(
        "Contact Me",
        format!(
            concat!(
                r#"<div class="contact-container"><div class="contact-info"><p>{}</p>"#,
                r#"<div class="contact-methods">{}</div><div class="social-links">{}</div>"#,
                "</div></div>"
            ),
            escape(&contact.intro),
            methods,
            social
        ),
    )
}

/// Render the complete resume markup.
pub fn render_html(resume: &Resume) -> String {
    let mut html = String::from(r#"<div class="resume-container">"#);
    html.push_str(&header(resume));
    html.push_str(&section(
        "About Me",
        format!(r#"<p class="summary-text">{}</p>"#, escape(&resume.summary)),
    ));
    if !resume.projects.is_empty() {
        html.push_str(&section(
            "Featured Projects",
            resume.projects.iter().map(project).collect(),
        ));
    }
    html.push_str(&optional_section(
        "Skills",
        &resume.skills,
        "skills-container",
        skill_category,
    ));
    if !resume.experience.is_empty() {
        html.push_str(&section("Experience", resume.experience.iter().map(job).collect()));
    }
    if !resume.education.is_empty() {
        html.push_str(&section("Education", resume.education.iter().map(degree).collect()));
    }
    html.push_str(&optional_section(
        "Testimonials",
        &resume.testimonials,
        "testimonials-container",
        testimonial,
    ));
    html.push_str(&optional_section(
        "Awards & Recognition",
        &resume.awards,
        "awards-container",
        award,
    ));
    html.push_str(&optional_section(
        "Blog & Articles",
        &resume.articles,
        "blog-container",
        article,
    ));
    html.push_str(&contact(&resume.contact_section));
    html.push_str("</div>");
    html
}

/// Replace the content of `#container_id` with `html`.
#[cfg(target_arch = "wasm32")]
pub fn inject(container_id: &str, html: &str) -> Result<(), Error> {
    let document = crate::page::dom::document()?;
    let container = crate::page::dom::element_by_id(&document, container_id)?;
    container.set_inner_html(html);
    Ok(())
}
