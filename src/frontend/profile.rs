use yew::prelude::*;

use super::ExternalLink;
use crate::site::{self, Highlight, ProfileIcon, ProfileLink};

#[function_component(ProfilePanel)]
pub fn profile_panel() -> Html {
    html! {
        <header class="profile-panel" aria-labelledby="identity-heading">
            <h1 id="identity-heading">{site::OWNER_DISPLAY_NAME}</h1>
            <p class="research-focus">{site::RESEARCH_FOCUS}</p>
            { for site::BIO.iter().map(|paragraph| html! { <p class="bio">{*paragraph}</p> }) }
            <ul class="profile-links">
                { for site::PROFILE_LINKS.iter().map(profile_link) }
            </ul>
        </header>
    }
}

fn profile_link(link: &ProfileLink) -> Html {
    html! {
        <li key={link.label}>
            <ExternalLink href={link.href} class="profile-link" new_tab={link.opens_new_tab()}>
                {profile_icon(link.icon)}
                <span>{link.label}</span>
            </ExternalLink>
        </li>
    }
}

fn profile_icon(icon: ProfileIcon) -> Html {
    let path = match icon {
        ProfileIcon::GitHub => "M12 .5a11.5 11.5 0 0 0-3.64 22.41c.58.1.79-.25.79-.56v-2c-3.2.7-3.88-1.36-3.88-1.36-.52-1.33-1.28-1.69-1.28-1.69-1.05-.72.08-.7.08-.7 1.16.08 1.77 1.19 1.77 1.19 1.03 1.77 2.7 1.26 3.36.96.1-.75.4-1.26.73-1.55-2.56-.29-5.25-1.28-5.25-5.69 0-1.26.45-2.29 1.19-3.09-.12-.29-.52-1.46.11-3.05 0 0 .97-.31 3.17 1.18a11 11 0 0 1 5.77 0c2.2-1.49 3.17-1.18 3.17-1.18.63 1.59.23 2.76.11 3.05.74.8 1.19 1.83 1.19 3.09 0 4.42-2.7 5.39-5.27 5.68.41.36.78 1.06.78 2.14v3.17c0 .31.21.67.8.56A11.5 11.5 0 0 0 12 .5Z",
        ProfileIcon::Scholar => "M12 2 1 9l11 7 9-5.73V17h2V9L12 2Zm-6.5 10.24V16c0 2.2 2.91 4 6.5 4s6.5-1.8 6.5-4v-3.76L12 16.4l-6.5-4.16Z",
        ProfileIcon::X => "M18.24 2.25h3.31l-7.23 8.26 8.5 11.24h-6.66l-5.21-6.82-5.97 6.82H1.68l7.73-8.84L1.25 2.25h6.83l4.71 6.23 5.45-6.23Zm-1.16 17.52h1.83L7.08 4.13H5.12l11.96 15.64Z",
        ProfileIcon::Email => "M2 5a2 2 0 0 1 2-2h16a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V5Zm2.4 0L12 10.7 19.6 5H4.4ZM20 6.8l-7.4 5.54a1 1 0 0 1-1.2 0L4 6.8V19h16V6.8Z",
    };

    html! {
        <svg class="profile-icon" width="16" height="16" viewBox="0 0 24 24" aria-hidden="true">
            <path d={path} fill="currentColor" />
        </svg>
    }
}

#[function_component(HighlightStrip)]
pub fn highlight_strip() -> Html {
    html! {
        <ul class="highlight-strip">
            { for site::HIGHLIGHTS.iter().map(highlight_card) }
        </ul>
    }
}

fn highlight_card(highlight: &Highlight) -> Html {
    html! {
        <li key={highlight.title}>
            <ExternalLink href={highlight.href} class="highlight-card">
                <img src={highlight.image} alt={highlight.title} loading="lazy" />
                <span class="highlight-copy">
                    <span class="highlight-title">{highlight.title}</span>
                    <span class="highlight-subtitle">{highlight.subtitle}</span>
                </span>
            </ExternalLink>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct SplineSceneProps {
    pub url: AttrValue,
}

/// Interactive 3D scene, rendered by the `spline-viewer` custom element
/// loaded from `index.html`.
#[function_component(SplineScene)]
pub fn spline_scene(props: &SplineSceneProps) -> Html {
    html! {
        <div class="spline-scene" aria-hidden="true">
            <spline-viewer url={props.url.clone()} loading-anim-type="spinner-small-dark" />
        </div>
    }
}
