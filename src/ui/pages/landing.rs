//! Landing page component
//!
//! Renders the configured site top to bottom:
//! - SEO meta tags and Organization structured data
//! - Background video / scene
//! - Navigation bar, revealed on a timer for new visitors
//! - Enabled sections, each behind its own error boundary
//! - Footer and chat widget

use leptos::prelude::*;
use leptos_meta::{Link, Meta, Title};

use crate::core::{NavLink, SectionConfig, SiteConfig};
use crate::ui::boundary::RegionBoundary;
use crate::ui::embeds::{Backdrop, ChatWidget};
use crate::ui::nav::Navigation;
use crate::ui::reveal::start_reveal;
use crate::ui::scroll_spy::use_scroll_spy;
use crate::ui::sections::{SiteFooter, render_section};

#[component]
pub fn LandingPage() -> impl IntoView {
    let site = use_context::<SiteConfig>().expect("SiteConfig should be provided");

    let spy = use_scroll_spy(site.section_ids());
    let reveal = start_reveal();

    let content_class = move || {
        if reveal.content_visible.get() {
            "site-content content-visible"
        } else {
            "site-content content-hidden"
        }
    };

    let links: Vec<NavLink> = site.nav_links().into_iter().cloned().collect();
    let home = site.home_section().unwrap_or_default().to_string();
    let sections: Vec<SectionConfig> = site.enabled_sections().cloned().collect();

    let booking = site.booking.clone();
    let contact = site.contact.clone();

    view! {
        <SeoMeta site=site.clone() />

        <div class="min-h-screen relative overflow-x-hidden">
            <Backdrop config=site.backdrop.clone() />

            <Navigation
                brand=site.brand.clone()
                links=links
                cta=site.nav_cta.clone()
                home=home
                spy=spy
                reveal=reveal
            />

            <div class=content_class>
                <main>
                    {sections
                        .into_iter()
                        .map(|section| {
                            let id = section.id.clone();
                            let region = section.id.clone();
                            let class = format!("section section-{}", section.content.kind());
                            let booking = booking.clone();
                            let contact = contact.clone();
                            view! {
                                <section id=id class=class>
                                    <RegionBoundary region=region>
                                        {render_section(&section, &booking, &contact)}
                                    </RegionBoundary>
                                </section>
                            }
                        })
                        .collect_view()}
                </main>

                <SiteFooter
                    brand=site.brand.clone()
                    footer=site.footer.clone()
                    contact=site.contact.clone()
                />
            </div>

            {site.chat.clone().map(|embed| view! { <ChatWidget embed=embed /> })}
        </div>
    }
}

/// Organization structured data, safe to inline in a `<script>` tag
pub fn organization_json_ld(site: &SiteConfig) -> String {
    let value = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.brand.name(),
        "url": site.seo.canonical_url,
        "logo": site.seo.og_image,
        "description": site.seo.description,
        "email": site.contact.email,
        "telephone": site.contact.phone,
        "areaServed": site.contact.locations,
        "contactPoint": {
            "@type": "ContactPoint",
            "email": site.contact.email,
            "telephone": site.contact.phone,
            "contactType": "customer service",
        },
    });
    value.to_string().replace("</", "<\\/")
}

/// SEO Meta tags component using leptos_meta
#[component]
fn SeoMeta(site: SiteConfig) -> impl IntoView {
    let seo = site.seo.clone();
    let json_ld = organization_json_ld(&site);

    view! {
        // Page title
        <Title text=seo.title.clone() />

        // Basic meta tags
        <Meta name="description" content=seo.description.clone() />
        <Meta name="keywords" content=seo.keywords.clone() />
        <Meta name="theme-color" content=seo.theme_color.clone() />

        // Open Graph / Facebook
        <Meta property="og:type" content="website" />
        <Meta property="og:url" content=seo.canonical_url.clone() />
        <Meta property="og:title" content=seo.title.clone() />
        <Meta property="og:description" content=seo.description.clone() />
        <Meta property="og:image" content=seo.og_image.clone() />

        // Twitter
        <Meta name="twitter:card" content="summary_large_image" />
        <Meta name="twitter:title" content=seo.title.clone() />
        <Meta name="twitter:description" content=seo.description.clone() />
        <Meta name="twitter:image" content=seo.og_image.clone() />

        // Canonical URL
        <Link rel="canonical" href=seo.canonical_url.clone() />

        <script type="application/ld+json" inner_html=json_ld></script>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_ld_describes_organization() {
        let site = SiteConfig::default();
        let value: serde_json::Value =
            serde_json::from_str(&organization_json_ld(&site)).unwrap();

        assert_eq!(value["@type"], "Organization");
        assert_eq!(value["name"], "OriTechAI");
        assert_eq!(value["email"], "info@oritechai.com");
    }

    #[test]
    fn test_json_ld_cannot_close_script_tag() {
        let mut site = SiteConfig::default();
        site.seo.description = "</script><script>alert(1)</script>".to_string();

        let json = organization_json_ld(&site);
        assert!(!json.contains("</script>"));
        // Still valid JSON with the unchanged text
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["description"], "</script><script>alert(1)</script>");
    }
}

#[cfg(all(test, feature = "ssr"))]
mod render_tests {
    use leptos_meta::provide_meta_context;

    use super::*;
    use crate::core::SectionContent;

    fn render(site: SiteConfig) -> String {
        Owner::new().with(|| {
            provide_meta_context();
            provide_context(site);
            view! { <LandingPage /> }.to_html()
        })
    }

    #[test]
    fn test_server_render_starts_hidden() {
        let html = render(SiteConfig::default());

        assert!(html.contains("nav-hidden"));
        assert!(html.contains("content-hidden"));
        assert!(!html.contains("content-visible"));
    }

    #[test]
    fn test_renders_every_enabled_section() {
        let site = SiteConfig::default();
        let html = render(site.clone());

        for id in site.section_ids() {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing section {}", id);
        }
        assert!(html.contains("Our 4-Step Process"));
        assert!(html.contains("VG_OVERLAY_CONTAINER"));
    }

    #[test]
    fn test_disabled_section_leaves_body_and_nav() {
        let mut site = SiteConfig::default();
        assert!(site.disable_section("testimonials"));
        site.chat = None;

        let html = render(site);
        assert!(!html.contains(r#"id="testimonials""#));
        assert!(!html.contains(r##"href="#testimonials""##));
        assert!(!html.contains("VG_OVERLAY_CONTAINER"));
        assert!(html.contains(r#"id="booking""#));
    }

    #[test]
    fn test_broken_section_is_contained() {
        let mut site = SiteConfig::default();
        for section in &mut site.sections {
            if section.id == "services" {
                if let SectionContent::Cards { cards, .. } = &mut section.content {
                    cards.clear();
                }
            }
        }

        let html = render(site);
        assert!(html.contains("Something went wrong"));
        assert!(html.contains("Our 4-Step Process"));
        assert!(html.contains("Why Choose OritechAI"));
    }
}
