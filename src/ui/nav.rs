//! Fixed navigation bar with active-section highlighting

use leptos::prelude::*;

use crate::core::{Brand, NavLink};
use crate::ui::icon::{Icon, icons};
use crate::ui::reveal::RevealContext;
use crate::ui::scroll_spy::ScrollSpyContext;

#[component]
pub fn Navigation(
    brand: Brand,
    links: Vec<NavLink>,
    cta: NavLink,
    /// Logo scroll target
    home: String,
    spy: ScrollSpyContext,
    reveal: RevealContext,
) -> impl IntoView {
    let (mobile_menu_open, set_mobile_menu_open) = signal(false);

    let go_to = move |target: String| {
        move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            spy.scroll_to(&target);
            set_mobile_menu_open.set(false);
        }
    };

    let nav_class = move || {
        let mut class = String::from("site-nav fixed top-0 left-0 right-0 z-50 transition-all duration-300");
        if spy.scrolled.get() {
            class.push_str(" site-nav-solid");
        }
        if !reveal.nav_visible.get() {
            class.push_str(" nav-hidden");
        }
        class
    };

    let desktop_links = links.clone();
    let mobile_links = links;
    let mobile_cta = cta.clone();

    view! {
        <nav class=nav_class aria-label="Main navigation">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center justify-between h-16">
                    // Logo
                    <a href=format!("#{}", home) class="brand-logo text-2xl font-bold" on:click=go_to(home.clone())>
                        {brand.prefix.clone()}
                        <span class="brand-accent">{brand.accent.clone()}</span>
                        {brand.suffix.clone()}
                    </a>

                    // Desktop Navigation
                    <div class="hidden md:flex items-center gap-2">
                        {desktop_links
                            .into_iter()
                            .map(|link| {
                                let target = link.target.clone();
                                view! {
                                    <a
                                        href=link.href()
                                        class="nav-link px-3 py-2 rounded-md"
                                        class:active=move || spy.is_active(&target)
                                        on:click=go_to(link.target.clone())
                                    >
                                        {link.label.clone()}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </div>

                    <div class="hidden md:block">
                        <a href=cta.href() class="btn-primary" on:click=go_to(cta.target.clone())>
                            {cta.label.clone()}
                        </a>
                    </div>

                    // Mobile menu button
                    <button
                        class="md:hidden p-2"
                        on:click=move |_| set_mobile_menu_open.update(|v| *v = !*v)
                        aria-label="Toggle mobile menu"
                        aria-expanded=move || mobile_menu_open.get().to_string()
                    >
                        {move || {
                            if mobile_menu_open.get() {
                                view! { <Icon name=icons::X class="w-6 h-6" /> }.into_any()
                            } else {
                                view! { <Icon name=icons::MENU class="w-6 h-6" /> }.into_any()
                            }
                        }}
                    </button>
                </div>

                // Mobile menu
                <div class=move || {
                    if mobile_menu_open.get() {
                        "md:hidden overflow-hidden transition-all duration-300 max-h-96"
                    } else {
                        "md:hidden overflow-hidden transition-all duration-300 max-h-0"
                    }
                }>
                    <div class="mobile-menu px-2 pt-2 pb-3 space-y-1 rounded-lg mt-2">
                        {mobile_links
                            .into_iter()
                            .map(|link| {
                                let target = link.target.clone();
                                view! {
                                    <a
                                        href=link.href()
                                        class="nav-link block px-3 py-2 rounded-md text-base font-medium w-full text-left"
                                        class:active=move || spy.is_active(&target)
                                        on:click=go_to(link.target.clone())
                                    >
                                        {link.label.clone()}
                                    </a>
                                }
                            })
                            .collect_view()}
                        <a
                            href=mobile_cta.href()
                            class="btn-primary block w-full mt-4 text-center"
                            on:click=go_to(mobile_cta.target.clone())
                        >
                            {mobile_cta.label.clone()}
                        </a>
                    </div>
                </div>
            </div>
        </nav>
    }
}
