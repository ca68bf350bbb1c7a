use leptos::prelude::*;

/// Icon from `/icons/{name}.svg`
#[component]
pub fn Icon(
    /// Icon name without the `.svg` extension
    #[prop(into)]
    name: String,
    /// CSS classes
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=""
            aria-hidden="true"
            draggable="false"
        />
    }
}

/// Icons used by the page chrome; section cards name theirs in the site config
pub mod icons {
    pub const MENU: &str = "menu";
    pub const X: &str = "x";
    pub const CHECK: &str = "check";
    pub const MAIL: &str = "mail";
    pub const PHONE: &str = "phone";
    pub const MAP_PIN: &str = "map-pin";
    pub const EXTERNAL_LINK: &str = "external-link";
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const QUOTE: &str = "quote";
}
