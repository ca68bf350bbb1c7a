//! Theme context
//!
//! The palette comes from the site configuration. Its colours are exposed as
//! CSS custom properties on the page root and the palette name is mirrored to
//! `data-theme` on `<html>` so stylesheet rules can key off it.

use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use leptos::web_sys;

use crate::core::ThemePalette;

/// Theme context for managing the active palette
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub palette: RwSignal<ThemePalette>,
    /// Inline style carrying the palette as CSS variables
    pub style: Memo<String>,
}

impl ThemeContext {
    /// Mirror the palette name onto the document element
    pub fn apply_theme_attribute(&self) {
        #[cfg(not(feature = "ssr"))]
        {
            let name = self.palette.with_untracked(|p| p.name.clone());
            if let Some(html) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element())
            {
                let _ = html.set_attribute("data-theme", &name);
            }
        }
    }
}

/// Provide theme context to the application
pub fn provide_theme_context(palette: ThemePalette) -> ThemeContext {
    let palette = RwSignal::new(palette);
    let style = Memo::new(move |_| palette.with(|p| p.css_variables()));

    let ctx = ThemeContext { palette, style };

    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            palette.track();
            ctx.apply_theme_attribute();
        });
    }

    provide_context(ctx);

    ctx
}

/// Use theme context from anywhere in the component tree
pub fn use_theme_context() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_follows_palette() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = provide_theme_context(ThemePalette::crimson());
            assert!(ctx.style.get_untracked().contains("--color-primary: #E41E26;"));

            ctx.palette.set(ThemePalette::light());
            assert!(ctx.style.get_untracked().contains("--color-background: #FFFFFF;"));
        });
    }

    #[test]
    fn test_context_is_retrievable() {
        let owner = Owner::new();
        owner.with(|| {
            provide_theme_context(ThemePalette::default());
            let ctx = use_theme_context();
            assert_eq!(ctx.palette.get_untracked().name, "crimson");
        });
    }
}
