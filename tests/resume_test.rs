use folio3d::page::resume::{Resume, escape, render_html};

const MINIMAL: &str = r#"{
    "profile": { "name": "Ada <Dev>", "title": "Engineer & Artist" },
    "summary": "Builds \"things\".",
    "contact_section": { "intro": "Say hi." }
}"#;

#[test]
fn bundled_resume_parses() {
    let resume = Resume::bundled().expect("bundled resume is valid");
    assert_eq!(resume.profile.name, "John Doe");
    assert_eq!(resume.profile.title, "Creative Developer");
    assert_eq!(resume.contact.len(), 5);
    assert_eq!(resume.projects.len(), 3);
    assert_eq!(resume.skills.len(), 3);
    assert_eq!(resume.experience.len(), 2);
    assert_eq!(resume.education.len(), 2);
    assert_eq!(resume.testimonials.len(), 3);
    assert_eq!(resume.awards.len(), 3);
    assert_eq!(resume.articles.len(), 3);
    assert_eq!(resume.contact_section.social.len(), 5);
}

#[test]
fn bundled_resume_renders_every_section() {
    let resume = Resume::bundled().expect("bundled resume is valid");
    let html = render_html(&resume);

    assert!(html.starts_with(r#"<div class="resume-container">"#));
    assert!(html.ends_with("</div>"));
    for title in [
        "About Me",
        "Featured Projects",
        "Skills",
        "Experience",
        "Education",
        "Testimonials",
        "Awards &amp; Recognition",
        "Blog &amp; Articles",
        "Contact Me",
    ] {
        assert!(
            html.contains(&format!(r#"<h2 class="section-title">{title}</h2>"#)),
            "missing section {title}"
        );
    }
    assert!(html.contains(r#"<h1 class="name">John Doe</h1>"#));
    assert!(html.contains(r#"<a href="mailto:john.doe@example.com">john.doe@example.com</a>"#));
    assert!(html.contains(r#"<li>Three.js</li>"#));
    assert_eq!(html.matches(r#"class="social-link""#).count(), 5);
    assert_eq!(html.matches(r#"class="experience-item""#).count(), 2);
}

#[test]
fn optional_sections_are_left_out() {
    let resume = Resume::from_json(MINIMAL).expect("minimal resume parses");
    let html = render_html(&resume);

    assert!(html.contains("About Me"));
    assert!(html.contains("Contact Me"));
    for absent in [
        "Featured Projects",
        "Skills",
        "Experience",
        "Education",
        "Testimonials",
        "Awards",
        "Blog",
    ] {
        assert!(!html.contains(absent), "unexpected section {absent}");
    }
}

#[test]
fn document_text_is_escaped() {
    let resume = Resume::from_json(MINIMAL).expect("minimal resume parses");
    let html = render_html(&resume);

    assert!(html.contains("Ada &lt;Dev&gt;"));
    assert!(html.contains("Engineer &amp; Artist"));
    assert!(html.contains("Builds &quot;things&quot;."));
    assert!(!html.contains("<Dev>"));
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(escape("plain"), "plain");
    assert_eq!(
        escape(r#"<a href="x">'&'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
    );
}

#[test]
fn malformed_resume_is_rejected() {
    assert!(Resume::from_json(r#"{"profile": {"name": "x"}}"#).is_err());
    assert!(Resume::from_json("not json").is_err());
}

#[test]
fn banner_text_can_differ_from_the_resume() {
    let resume = Resume::bundled().expect("bundled resume is valid");
    let config = folio3d::scene_config(&resume);
    assert_eq!(config.headline, "Anirudh Vasudev");
    assert_eq!(config.subtitle, "CREATIVE DEVELOPER");
    // the resume header keeps its own name
    assert!(render_html(&resume).contains(r#"<h1 class="name">John Doe</h1>"#));
}

#[test]
fn banner_text_falls_back_to_the_profile() {
    let resume = Resume::from_json(MINIMAL).expect("minimal resume parses");
    assert_eq!(resume.banner, None);
    let config = folio3d::scene_config(&resume);
    assert_eq!(config.headline, "Ada <Dev>");
    assert_eq!(config.subtitle, "ENGINEER & ARTIST");
}
