use std::rc::Rc;

use web_sys::{Element, HtmlVideoElement};
use yew::prelude::*;

use super::dom::{apply_playback, IntersectionGuard};
use super::ExternalLink;
use crate::grid::PlaybackCommand;
use crate::publications::{self, author_segments, group_by_year, Publication, OWNER_NAME};

/// Share of a preview video that must be on screen before it plays.
const VISIBLE_THRESHOLD: f64 = 0.3;

#[function_component(PublicationList)]
pub fn publication_list() -> Html {
    let entries = use_memo((), |_| publications::embedded().unwrap_or_default());

    html! {
        <div class="publication-list">
            { for group_by_year(&entries).into_iter().map(|group| html! {
                <section key={group.year} class="year-group">
                    <h3 class="year-label">{group.year}</h3>
                    <ul class="row-list">
                        { for group.publications.into_iter().map(|publication| html! {
                            <li key={publication.title.as_str()}>
                                <PubCard publication={Rc::new(publication.clone())} />
                            </li>
                        }) }
                    </ul>
                </section>
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PubCardProps {
    publication: Rc<Publication>,
}

#[function_component(PubCard)]
fn pub_card(props: &PubCardProps) -> Html {
    let publication = &props.publication;

    let media = if let Some(video) = publication.video.as_deref() {
        html! { <MiniVideo src={video.to_string()} /> }
    } else if let Some(image) = publication.image.as_deref() {
        html! { <img src={image.to_string()} alt={publication.title.clone()} loading="lazy" /> }
    } else {
        html! { <div class="pub-media-empty">{"No demo"}</div> }
    };

    html! {
        <article class="pub-card">
            <div class="pub-media">{media}</div>
            <div class="pub-copy">
                <p class="pub-badges">
                    <span class={classes!("badge", "pub-venue", publication.is_oral().then_some("is-oral"))}>
                        {publication.venue.clone()}
                    </span>
                    if publication.highlight {
                        <span class="badge pub-first-author">{"1st Author"}</span>
                    }
                    if let Some(citations) = publication.citations {
                        <span class="badge pub-citations">
                            <svg width="10" height="10" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" aria-hidden="true">
                                <path d="M12 20V10" />
                                <path d="M18 20V4" />
                                <path d="M6 20v-4" />
                            </svg>
                            {format!("{citations} citations")}
                        </span>
                    }
                </p>
                <h4 class="pub-title">{publication.title.clone()}</h4>
                <p class="pub-authors">
                    { for author_segments(&publication.authors, OWNER_NAME).into_iter().map(|segment| {
                        if segment.highlighted {
                            html! { <strong class="pub-owner">{segment.text}</strong> }
                        } else {
                            html! { <span>{segment.text}</span> }
                        }
                    }) }
                </p>
                if !publication.links.is_empty() {
                    <ul class="pub-links">
                        { for publication.links.iter().map(|link| html! {
                            <li key={link.label.as_str()}>
                                <ExternalLink href={link.url.clone()} class="pub-link">
                                    {link.label.clone()}
                                </ExternalLink>
                            </li>
                        }) }
                    </ul>
                }
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct MiniVideoProps {
    src: AttrValue,
}

/// Looping preview that only plays while it is scrolled into view.
#[function_component(MiniVideo)]
fn mini_video(props: &MiniVideoProps) -> Html {
    let video_ref = use_node_ref();

    {
        let video_ref = video_ref.clone();
        use_effect_with(props.src.clone(), move |_| {
            let guard = video_ref.cast::<HtmlVideoElement>().and_then(|video| {
                video.set_muted(true);
                let element: Element = video.clone().into();
                IntersectionGuard::observe(&element, VISIBLE_THRESHOLD, move |visible| {
                    let command = if visible {
                        PlaybackCommand::Play
                    } else {
                        PlaybackCommand::Pause
                    };
                    apply_playback(&video, command);
                })
            });

            move || drop(guard)
        });
    }

    html! {
        <video
            ref={video_ref}
            class="mini-video"
            src={props.src.clone()}
            loop=true
            muted=true
            playsinline=true
            preload="metadata"
        />
    }
}
