//! Site configuration
//!
//! Every variant of the landing page is one [`SiteConfig`]: brand, color
//! theme, the ordered list of sections (each of which can be switched off),
//! their copy, contact details and embed settings. The built-in default is
//! the OritechAI page; a JSON file with the same shape can replace it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::embed::{BackdropConfig, ChatEmbed, SchedulingEmbed};
use super::error::SiteError;

/// Complete description of one landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub brand: Brand,
    pub theme: ThemePalette,
    pub seo: Seo,
    pub contact: Contact,
    /// Navigation entries, in display order
    pub nav: Vec<NavLink>,
    /// Call-to-action button in the navigation bar
    pub nav_cta: NavLink,
    pub sections: Vec<SectionConfig>,
    pub booking: SchedulingEmbed,
    /// Chat widget, disabled when absent
    pub chat: Option<ChatEmbed>,
    pub backdrop: BackdropConfig,
    pub footer: Footer,
}

/// Word mark rendered as `prefix` + highlighted `accent` + `suffix`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub prefix: String,
    pub accent: String,
    pub suffix: String,
}

impl Brand {
    pub fn name(&self) -> String {
        format!("{}{}{}", self.prefix, self.accent, self.suffix)
    }
}

/// Color theme applied through CSS custom properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub name: String,
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub muted: String,
}

impl ThemePalette {
    /// Red and gold on black
    pub fn crimson() -> Self {
        Self {
            name: "crimson".to_string(),
            primary: "#E41E26".to_string(),
            accent: "#D4AF37".to_string(),
            background: "#000000".to_string(),
            surface: "rgba(0, 0, 0, 0.8)".to_string(),
            text: "#FFFFFF".to_string(),
            muted: "rgba(255, 255, 255, 0.8)".to_string(),
        }
    }

    /// Red on white
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            primary: "#CE0005".to_string(),
            accent: "#2A2A2A".to_string(),
            background: "#FFFFFF".to_string(),
            surface: "rgba(255, 255, 255, 0.95)".to_string(),
            text: "#111111".to_string(),
            muted: "#4B5563".to_string(),
        }
    }

    /// Inline style declaring the palette as `--color-*` variables
    pub fn css_variables(&self) -> String {
        format!(
            "--color-primary: {}; --color-accent: {}; --color-background: {}; \
             --color-surface: {}; --color-text: {}; --color-muted: {};",
            self.primary, self.accent, self.background, self.surface, self.text, self.muted
        )
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::crimson()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical_url: String,
    pub og_image: String,
    pub theme_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl Contact {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }

    /// `tel:` link with formatting characters stripped
    pub fn tel(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }
}

/// Link to a section of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// Section id, without `#`
    pub target: String,
}

impl NavLink {
    pub fn new(label: &str, target: &str) -> Self {
        Self {
            label: label.to_string(),
            target: target.to_string(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// DOM id; also the scroll-spy identifier
    pub id: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(flatten)]
    pub content: SectionContent,
}

fn enabled_by_default() -> bool {
    true
}

/// Section layouts the template knows how to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Hero {
        headline: String,
        subheadline: String,
        primary_cta: NavLink,
        secondary_cta: Option<NavLink>,
    },
    Statement {
        heading: String,
        paragraphs: Vec<String>,
        cta: Option<NavLink>,
    },
    Cards {
        heading: String,
        intro: Option<String>,
        cards: Vec<Card>,
    },
    Process {
        heading: String,
        intro: Option<String>,
        steps: Vec<ProcessStep>,
    },
    Proof {
        heading: String,
        summary: String,
        metrics: Vec<Metric>,
        quote: Option<String>,
    },
    Testimonials {
        heading: String,
        items: Vec<Testimonial>,
    },
    Booking {
        heading: String,
        intro: String,
        highlights: Vec<String>,
    },
}

impl SectionContent {
    pub fn kind(&self) -> &'static str {
        match self {
            SectionContent::Hero { .. } => "hero",
            SectionContent::Statement { .. } => "statement",
            SectionContent::Cards { .. } => "cards",
            SectionContent::Process { .. } => "process",
            SectionContent::Proof { .. } => "proof",
            SectionContent::Testimonials { .. } => "testimonials",
            SectionContent::Booking { .. } => "booking",
        }
    }

    fn links(&self) -> Vec<&NavLink> {
        match self {
            SectionContent::Hero {
                primary_cta,
                secondary_cta,
                ..
            } => std::iter::once(primary_cta)
                .chain(secondary_cta.iter())
                .collect(),
            SectionContent::Statement { cta, .. } => cta.iter().collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Icon name under `/icons`
    pub icon: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub tagline: String,
    pub services: Vec<String>,
    pub copyright: String,
}

impl SiteConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.is_empty()
                || !section
                    .id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(SiteError::Invalid(format!(
                    "section id {:?} must be non-empty and contain only letters, digits, '-' or '_'",
                    section.id
                )));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(SiteError::Invalid(format!(
                    "duplicate section id {:?}",
                    section.id
                )));
            }
        }

        if self.enabled_sections().next().is_none() {
            return Err(SiteError::Invalid(
                "at least one section must be enabled".to_string(),
            ));
        }

        let links = self
            .nav
            .iter()
            .chain(std::iter::once(&self.nav_cta))
            .chain(self.enabled_sections().flat_map(|s| s.content.links()));
        for link in links {
            if self.enabled_section(&link.target).is_none() {
                return Err(SiteError::Invalid(format!(
                    "link {:?} points to missing or disabled section {:?}",
                    link.label, link.target
                )));
            }
        }

        let has_booking = self
            .enabled_sections()
            .any(|s| matches!(s.content, SectionContent::Booking { .. }));
        if has_booking && self.booking.slug.trim_matches('/').is_empty() {
            return Err(SiteError::Invalid(
                "booking section is enabled but no booking slug is set".to_string(),
            ));
        }

        Ok(())
    }

    pub fn enabled_sections(&self) -> impl Iterator<Item = &SectionConfig> {
        self.sections.iter().filter(|s| s.enabled)
    }

    pub fn enabled_section(&self, id: &str) -> Option<&SectionConfig> {
        self.enabled_sections().find(|s| s.id == id)
    }

    /// Ids of enabled sections in document order
    pub fn section_ids(&self) -> Vec<String> {
        self.enabled_sections().map(|s| s.id.clone()).collect()
    }

    /// Navigation entries whose target section is enabled
    pub fn nav_links(&self) -> Vec<&NavLink> {
        self.nav
            .iter()
            .filter(|link| self.enabled_section(&link.target).is_some())
            .collect()
    }

    /// First enabled section, the scroll target of the logo
    pub fn home_section(&self) -> Option<&str> {
        self.enabled_sections().next().map(|s| s.id.as_str())
    }

    /// Disable a section by id. Returns `false` if there is no such section.
    pub fn disable_section(&mut self, id: &str) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.enabled = false;
                true
            }
            None => false,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            brand: Brand {
                prefix: "Ori".to_string(),
                accent: "Tech".to_string(),
                suffix: "AI".to_string(),
            },
            theme: ThemePalette::crimson(),
            seo: Seo {
                title: "OritechAI — AI Consulting & Business Audits".to_string(),
                description: "AI consulting and business audits to cut costs, automate workflows, and grow revenue. Book your free AI consultation today.".to_string(),
                keywords: "AI consulting, AI business audit, AI automation audit, AI strategy consulting, AI implementation, business automation".to_string(),
                canonical_url: "https://oritechai.com".to_string(),
                og_image: "/og-image.jpg".to_string(),
                theme_color: "#E41E26".to_string(),
            },
            contact: Contact {
                email: "info@oritechai.com".to_string(),
                phone: "+1 (407) 406-9101".to_string(),
                locations: vec!["Tirana, Albania".to_string(), "San Francisco, CA".to_string()],
            },
            nav: vec![
                NavLink::new("Services", "services"),
                NavLink::new("Why Us", "why-us"),
                NavLink::new("Process", "process"),
                NavLink::new("Results", "proof"),
                NavLink::new("Book Now", "booking"),
            ],
            nav_cta: NavLink::new("Book Free Audit", "booking"),
            sections: default_sections(),
            booking: SchedulingEmbed::default(),
            chat: Some(ChatEmbed::default()),
            backdrop: BackdropConfig::default(),
            footer: Footer {
                tagline: "Transforming businesses through intelligent AI automation and strategic consulting.".to_string(),
                services: vec![
                    "AI Process Audits".to_string(),
                    "AI Strategy Consulting".to_string(),
                    "AI Implementation".to_string(),
                ],
                copyright: "© 2025 OritechAI. All rights reserved.".to_string(),
            },
        }
    }
}

fn section(id: &str, content: SectionContent) -> SectionConfig {
    SectionConfig {
        id: id.to_string(),
        enabled: true,
        content,
    }
}

fn card(icon: &str, title: &str, body: &str) -> Card {
    Card {
        icon: icon.to_string(),
        title: title.to_string(),
        body: body.to_string(),
    }
}

fn default_sections() -> Vec<SectionConfig> {
    vec![
        section(
            "hero",
            SectionContent::Hero {
                headline: "AI Consulting & Audits to Transform Your Business".to_string(),
                subheadline: "We audit your processes, uncover automation opportunities, and implement AI strategies that cut costs, boost efficiency, and grow revenue.".to_string(),
                primary_cta: NavLink::new("Book Your Free AI Audit", "booking"),
                secondary_cta: Some(NavLink::new("Learn More", "services")),
            },
        ),
        section(
            "problem",
            SectionContent::Statement {
                heading: "Hidden Inefficiencies Are Costing You Thousands".to_string(),
                paragraphs: vec![
                    "Most businesses waste 20-30% of their time on repetitive tasks that AI could handle. While you're manually processing data, scheduling meetings, and managing workflows, your competitors are automating their way to higher profits and faster growth.".to_string(),
                    "But here's the good news: We can identify exactly where you're losing money and show you how to fix it.".to_string(),
                ],
                cta: Some(NavLink::new("Book a Free Audit Call", "booking")),
            },
        ),
        section(
            "services",
            SectionContent::Cards {
                heading: "Our AI Consulting Services".to_string(),
                intro: Some("We don't just talk about AI – we implement solutions that deliver measurable ROI.".to_string()),
                cards: vec![
                    card("search", "AI Process Audits", "We analyze your current operations to find the exact tasks and workflows AI can handle for you. Get a detailed report showing time savings and cost reductions."),
                    card("file-text", "AI Strategy Consulting", "We create a custom roadmap to implement AI solutions that fit your business – not cookie-cutter templates. Every strategy is tailored to your specific needs."),
                    card("settings", "AI Implementation & Training", "We build, integrate, and train your team so your automations actually get used and deliver results. Full support until you see ROI."),
                ],
            },
        ),
        section(
            "why-us",
            SectionContent::Cards {
                heading: "Why Choose OritechAI".to_string(),
                intro: Some("We're not just consultants – we're your AI transformation partners.".to_string()),
                cards: vec![
                    card("trending-up", "Proven Results", "Our clients see cost reductions of 25-40% and efficiency gains of up to 60% within 90 days of implementation."),
                    card("users", "Industry Experience", "We've successfully implemented AI solutions for service businesses, agencies, e-commerce, and tech companies across multiple industries."),
                    card("award", "End-to-End Support", "From initial audit to full deployment, we stay with you until your AI solutions are delivering measurable ROI and your team is fully trained."),
                ],
            },
        ),
        section(
            "process",
            SectionContent::Process {
                heading: "Our 4-Step Process".to_string(),
                intro: Some("Simple, transparent, and designed to deliver results fast.".to_string()),
                steps: [
                    ("Audit", "Deep dive into your business processes and identify automation opportunities."),
                    ("Plan", "Create a clear, prioritized AI strategy tailored to your specific needs and budget."),
                    ("Implement", "Build and integrate AI solutions that seamlessly fit into your existing workflow."),
                    ("Optimize", "Monitor performance, refine processes, and ensure maximum ROI from your AI investment."),
                ]
                .into_iter()
                .map(|(title, description)| ProcessStep {
                    title: title.to_string(),
                    description: description.to_string(),
                })
                .collect(),
            },
        ),
        section(
            "proof",
            SectionContent::Proof {
                heading: "Real Results: Service Business Transformation".to_string(),
                summary: "A 15-person marketing agency was spending 25 hours per week on manual reporting, client communication, and project management. After our AI audit and implementation:".to_string(),
                metrics: [
                    ("30%", "Cost Reduction"),
                    ("18%", "Revenue Increase"),
                    ("20h", "Time Saved/Week"),
                    ("90 Days", "Days to ROI"),
                ]
                .into_iter()
                .map(|(value, label)| Metric {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
                quote: Some("The AI audit revealed inefficiencies we didn't even know existed. The automation saved us thousands in labor costs while improving client satisfaction.".to_string()),
            },
        ),
        section(
            "testimonials",
            SectionContent::Testimonials {
                heading: "What Our Clients Say".to_string(),
                items: [
                    ("OritechAI identified $50K in annual savings we were completely missing. Their AI implementations have transformed how we operate.", "Sarah M., COO at Digital Marketing Agency"),
                    ("The audit was incredibly thorough. We went from spending 15 hours a week on manual tasks to just 3 hours. Game-changer for our productivity.", "Michael R., Founder of E-commerce Platform"),
                    ("Finally, someone who understands AI practically. No buzzwords, just real solutions that actually work and deliver ROI.", "Lisa K., Operations Director"),
                ]
                .into_iter()
                .map(|(quote, author)| Testimonial {
                    quote: quote.to_string(),
                    author: author.to_string(),
                })
                .collect(),
            },
        ),
        section(
            "booking",
            SectionContent::Booking {
                heading: "Book Your Free 30-Minute AI Audit Call".to_string(),
                intro: "Schedule your free AI audit call to discover how AI can save time, cut costs, and boost your business.".to_string(),
                highlights: vec![
                    "Identify your top 3 automation opportunities".to_string(),
                    "Receive cost & time savings estimates".to_string(),
                    "Get a custom AI implementation roadmap".to_string(),
                ],
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SiteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.brand.name(), "OriTechAI");
        assert_eq!(config.home_section(), Some("hero"));
        assert_eq!(
            config.section_ids(),
            vec![
                "hero", "problem", "services", "why-us", "process", "proof", "testimonials",
                "booking"
            ]
        );
    }

    #[test]
    fn test_json_round_trip_keeps_section_kinds() {
        let config = SiteConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains(r#""kind":"hero""#));

        let parsed = SiteConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r##"{
            "theme": {
                "name": "mono", "primary": "#000", "accent": "#555",
                "background": "#fff", "surface": "#eee", "text": "#111", "muted": "#666"
            },
            "nav": [],
            "nav_cta": { "label": "Talk to us", "target": "contact-hero" },
            "chat": null,
            "sections": [
                {
                    "id": "contact-hero",
                    "kind": "hero",
                    "headline": "Hello",
                    "subheadline": "World",
                    "primary_cta": { "label": "Go", "target": "contact-hero" },
                    "secondary_cta": null
                }
            ]
        }"##;

        let config = SiteConfig::from_json(json).unwrap();
        assert_eq!(config.theme.name, "mono");
        assert_eq!(config.section_ids(), vec!["contact-hero"]);
        assert!(config.sections[0].enabled);
        assert!(config.chat.is_none());
        assert_eq!(config.contact, SiteConfig::default().contact);
    }

    #[test]
    fn test_duplicate_section_ids_rejected() {
        let mut config = SiteConfig::default();
        let dup = config.sections[1].clone();
        config.sections.push(dup);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate section id"));
    }

    #[test]
    fn test_invalid_section_id_rejected() {
        let mut config = SiteConfig::default();
        config.sections[1].id = "has space".to_string();
        assert!(matches!(config.validate(), Err(SiteError::Invalid(_))));
    }

    #[test]
    fn test_nav_link_to_disabled_section_rejected() {
        let mut config = SiteConfig::default();
        assert!(config.disable_section("proof"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Results"));

        assert_eq!(config.nav_links().len(), config.nav.len() - 1);

        config.nav.retain(|link| link.target != "proof");
        config.validate().unwrap();
        assert!(!config.section_ids().contains(&"proof".to_string()));
    }

    #[test]
    fn test_hero_cta_must_target_enabled_section() {
        let mut config = SiteConfig::default();
        config.disable_section("services");
        config.nav.retain(|link| link.target != "services");
        // Hero secondary CTA still points at services
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_sections_disabled_rejected() {
        let mut config = SiteConfig::default();
        for section in &mut config.sections {
            section.enabled = false;
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least one section"));
    }

    #[test]
    fn test_booking_requires_slug() {
        let mut config = SiteConfig::default();
        config.booking.slug = "/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disable_unknown_section() {
        let mut config = SiteConfig::default();
        assert!(!config.disable_section("pricing"));
    }

    #[test]
    fn test_theme_presets_and_css_variables() {
        assert_eq!(ThemePalette::light().background, "#FFFFFF");

        let css = ThemePalette::crimson().css_variables();
        assert!(css.contains("--color-primary: #E41E26;"));
        assert!(css.contains("--color-accent: #D4AF37;"));
    }

    #[test]
    fn test_contact_links() {
        let contact = SiteConfig::default().contact;
        assert_eq!(contact.mailto(), "mailto:info@oritechai.com");
        assert_eq!(contact.tel(), "tel:+14074069101");
        assert_eq!(NavLink::new("Book", "booking").href(), "#booking");
    }
}
