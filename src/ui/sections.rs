//! Landing page sections
//!
//! One component per [`SectionContent`] layout. [`render_section`] turns a
//! configured section into a view, or into a [`RegionError`] when its content
//! cannot be shown, so a region boundary can stand in for it.

use leptos::prelude::*;

use crate::core::{
    Brand, Card, Contact, Footer, Metric, NavLink, ProcessStep, RegionError, SchedulingEmbed,
    SectionConfig, SectionContent, Testimonial,
};
use crate::ui::embeds::BookingEmbed;
use crate::ui::icon::{Icon, icons};
use crate::ui::scroll_spy::use_scroll_spy_context;

/// Render the body of one section
pub fn render_section(
    section: &SectionConfig,
    booking: &SchedulingEmbed,
    contact: &Contact,
) -> Result<AnyView, RegionError> {
    let empty = |what: &str| RegionError::new(&section.id, format!("no {} configured", what));

    let view = match section.content.clone() {
        SectionContent::Hero {
            headline,
            subheadline,
            primary_cta,
            secondary_cta,
        } => view! {
            <HeroSection
                headline=headline
                subheadline=subheadline
                primary_cta=primary_cta
                secondary_cta=secondary_cta
            />
        }
        .into_any(),
        SectionContent::Statement {
            heading,
            paragraphs,
            cta,
        } => {
            if paragraphs.is_empty() {
                return Err(empty("paragraphs"));
            }
            view! { <StatementSection heading=heading paragraphs=paragraphs cta=cta /> }.into_any()
        }
        SectionContent::Cards {
            heading,
            intro,
            cards,
        } => {
            if cards.is_empty() {
                return Err(empty("cards"));
            }
            view! { <CardsSection heading=heading intro=intro cards=cards /> }.into_any()
        }
        SectionContent::Process {
            heading,
            intro,
            steps,
        } => {
            if steps.is_empty() {
                return Err(empty("steps"));
            }
            view! { <ProcessSection heading=heading intro=intro steps=steps /> }.into_any()
        }
        SectionContent::Proof {
            heading,
            summary,
            metrics,
            quote,
        } => {
            if metrics.is_empty() {
                return Err(empty("metrics"));
            }
            view! { <ProofSection heading=heading summary=summary metrics=metrics quote=quote /> }
                .into_any()
        }
        SectionContent::Testimonials { heading, items } => {
            if items.is_empty() {
                return Err(empty("testimonials"));
            }
            view! { <TestimonialsSection heading=heading items=items /> }.into_any()
        }
        SectionContent::Booking {
            heading,
            intro,
            highlights,
        } => view! {
            <BookingSection
                heading=heading
                intro=intro
                highlights=highlights
                embed=booking.clone()
                contact=contact.clone()
            />
        }
        .into_any(),
    };

    Ok(view)
}

/// Button that smooth-scrolls to another section
#[component]
fn SectionLink(link: NavLink, #[prop(default = "btn-primary")] class: &'static str) -> impl IntoView {
    let spy = use_scroll_spy_context();
    let target = link.target.clone();

    view! {
        <a
            href=link.href()
            class=class
            on:click=move |ev: leptos::ev::MouseEvent| {
                ev.prevent_default();
                spy.scroll_to(&target);
            }
        >
            {link.label.clone()}
        </a>
    }
}

#[component]
fn SectionHeading(heading: String, intro: Option<String>) -> impl IntoView {
    view! {
        <div class="text-center mb-16">
            <h2 class="section-heading text-4xl md:text-5xl font-bold mb-6">{heading}</h2>
            {intro.map(|intro| view! { <p class="section-intro text-xl max-w-3xl mx-auto">{intro}</p> })}
        </div>
    }
}

#[component]
fn HeroSection(
    headline: String,
    subheadline: String,
    primary_cta: NavLink,
    secondary_cta: Option<NavLink>,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center relative pt-16">
            <div class="text-center px-4 max-w-5xl mx-auto">
                <h1 class="hero-headline text-5xl md:text-7xl font-bold mb-8 leading-tight">{headline}</h1>
                <p class="hero-subheadline text-xl md:text-2xl mb-12 max-w-4xl mx-auto leading-relaxed">
                    {subheadline}
                </p>
                <div class="flex flex-col sm:flex-row gap-6 justify-center">
                    <SectionLink link=primary_cta />
                    {secondary_cta.map(|cta| view! { <SectionLink link=cta class="btn-secondary" /> })}
                </div>
            </div>
        </div>
    }
}

#[component]
fn StatementSection(heading: String, paragraphs: Vec<String>, cta: Option<NavLink>) -> impl IntoView {
    view! {
        <div class="py-20 px-4 max-w-4xl mx-auto text-center">
            <SectionHeading heading=heading intro=None />
            <div class="glass-card p-8 md:p-12">
                {paragraphs
                    .into_iter()
                    .map(|paragraph| view! { <p class="text-lg md:text-xl mb-6 leading-relaxed">{paragraph}</p> })
                    .collect_view()}
                {cta.map(|cta| view! { <SectionLink link=cta /> })}
            </div>
        </div>
    }
}

#[component]
fn CardsSection(heading: String, intro: Option<String>, cards: Vec<Card>) -> impl IntoView {
    view! {
        <div class="py-20 px-4 max-w-7xl mx-auto">
            <SectionHeading heading=heading intro=intro />
            <div class="grid md:grid-cols-3 gap-8">
                {cards.into_iter().map(|card| view! { <FeatureCard card=card /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn FeatureCard(card: Card) -> impl IntoView {
    view! {
        <div class="glass-card p-8 transition-all duration-300 hover:-translate-y-1">
            <div class="card-icon w-16 h-16 rounded-lg flex items-center justify-center mb-6">
                <Icon name=card.icon class="w-8 h-8" />
            </div>
            <h3 class="text-2xl font-bold mb-4">{card.title}</h3>
            <p class="leading-relaxed">{card.body}</p>
        </div>
    }
}

#[component]
fn ProcessSection(heading: String, intro: Option<String>, steps: Vec<ProcessStep>) -> impl IntoView {
    view! {
        <div class="py-20 px-4 max-w-7xl mx-auto">
            <SectionHeading heading=heading intro=intro />
            <ol class="grid md:grid-cols-4 gap-8">
                {steps
                    .into_iter()
                    .enumerate()
                    .map(|(index, step)| {
                        view! {
                            <li class="process-step text-center">
                                <div class="step-number w-16 h-16 rounded-full flex items-center justify-center mx-auto mb-6 text-2xl font-bold">
                                    {index + 1}
                                </div>
                                <h3 class="text-xl font-bold mb-4">{step.title}</h3>
                                <p class="leading-relaxed">{step.description}</p>
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        </div>
    }
}

#[component]
fn ProofSection(
    heading: String,
    summary: String,
    metrics: Vec<Metric>,
    quote: Option<String>,
) -> impl IntoView {
    view! {
        <div class="py-20 px-4 max-w-6xl mx-auto">
            <SectionHeading heading=heading intro=None />
            <div class="glass-card p-8 md:p-12">
                <p class="text-lg md:text-xl mb-10 text-center">{summary}</p>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-6 mb-10">
                    {metrics
                        .into_iter()
                        .map(|metric| {
                            view! {
                                <div class="metric text-center">
                                    <div class="metric-value text-4xl font-bold mb-2">{metric.value}</div>
                                    <div class="metric-label">{metric.label}</div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
                {quote.map(|quote| view! { <blockquote class="text-lg italic text-center">{quote}</blockquote> })}
            </div>
        </div>
    }
}

#[component]
fn TestimonialsSection(heading: String, items: Vec<Testimonial>) -> impl IntoView {
    view! {
        <div class="py-20 px-4 max-w-7xl mx-auto">
            <SectionHeading heading=heading intro=None />
            <div class="grid md:grid-cols-3 gap-8">
                {items
                    .into_iter()
                    .map(|item| {
                        view! {
                            <figure class="glass-card p-8">
                                <Icon name=icons::QUOTE class="w-8 h-8 mb-4" />
                                <blockquote class="mb-6 leading-relaxed">{item.quote}</blockquote>
                                <figcaption class="testimonial-author font-semibold">{item.author}</figcaption>
                            </figure>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn BookingSection(
    heading: String,
    intro: String,
    highlights: Vec<String>,
    embed: SchedulingEmbed,
    contact: Contact,
) -> impl IntoView {
    view! {
        <div class="py-20 px-4 max-w-5xl mx-auto">
            <SectionHeading heading=heading intro=Some(intro) />
            <ul class="flex flex-col md:flex-row justify-center gap-6 mb-12">
                {highlights
                    .into_iter()
                    .map(|highlight| {
                        view! {
                            <li class="flex items-center">
                                <Icon name=icons::CHECK class="w-5 h-5 mr-2" />
                                {highlight}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="glass-card p-4 md:p-8">
                <BookingEmbed embed=embed contact=contact />
            </div>
        </div>
    }
}

#[component]
pub fn SiteFooter(brand: Brand, footer: Footer, contact: Contact) -> impl IntoView {
    let mailto = contact.mailto();
    let tel = contact.tel();

    view! {
        <footer class="site-footer py-12 px-4">
            <div class="max-w-7xl mx-auto">
                <div class="grid md:grid-cols-3 gap-8 mb-8">
                    // Brand
                    <div>
                        <div class="brand-logo text-2xl font-bold mb-4">
                            {brand.prefix}
                            <span class="brand-accent">{brand.accent}</span>
                            {brand.suffix}
                        </div>
                        <p class="footer-text">{footer.tagline}</p>
                    </div>

                    // Services
                    <div>
                        <h4 class="font-semibold mb-4">"Services"</h4>
                        <ul class="space-y-2 footer-text">
                            {footer.services.into_iter().map(|service| view! { <li>{service}</li> }).collect_view()}
                        </ul>
                    </div>

                    // Contact
                    <div>
                        <h4 class="font-semibold mb-4">"Contact"</h4>
                        <ul class="space-y-2 footer-text">
                            <li class="flex items-center">
                                <Icon name=icons::MAIL class="w-4 h-4 mr-2" />
                                <a href=mailto>{contact.email}</a>
                            </li>
                            <li class="flex items-center">
                                <Icon name=icons::PHONE class="w-4 h-4 mr-2" />
                                <a href=tel>{contact.phone}</a>
                            </li>
                            {contact
                                .locations
                                .into_iter()
                                .map(|location| {
                                    view! {
                                        <li class="flex items-center">
                                            <Icon name=icons::MAP_PIN class="w-4 h-4 mr-2" />
                                            {location}
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </div>
                </div>

                // Bottom bar
                <div class="footer-bottom pt-8 text-center text-sm">{footer.copyright}</div>
            </div>
        </footer>
    }
}
