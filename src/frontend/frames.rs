use std::rc::Rc;

use web_sys::HtmlVideoElement;
use yew::prelude::*;

use super::dom::apply_playback;
use super::ExternalLink;
use crate::grid::{
    FrameDecor, GridLayout, HoverAction, HoverTracker, MediaTile, PlaybackPolicy, SharedLayout,
    TilePlayback, CAPTION_TRANSITION_SECS,
};
use crate::site;

#[function_component(DemoGallery)]
pub fn demo_gallery() -> Html {
    let layout = use_memo((), |_| {
        GridLayout::new(site::demo_tiles(), site::demo_grid_config())
            .ok()
            .map(Rc::new)
    });

    match (*layout).clone() {
        Some(layout) => html! { <DynamicFrameLayout {layout} /> },
        None => Html::default(),
    }
}

#[derive(Properties)]
struct DynamicFrameLayoutProps {
    layout: SharedLayout,
}

impl PartialEq for DynamicFrameLayoutProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.layout, &other.layout)
    }
}

#[function_component(DynamicFrameLayout)]
fn dynamic_frame_layout(props: &DynamicFrameLayoutProps) -> Html {
    let hover = use_reducer(HoverTracker::default);
    let layout = &props.layout;
    let config = layout.config();

    html! {
        <div class="frame-grid" style={layout.container_style(hover.hovered())}>
            { for layout.tiles().iter().map(|tile| {
                let cell = tile.cell();
                let onmouseenter = {
                    let hover = hover.dispatcher();
                    Callback::from(move |_: MouseEvent| hover.dispatch(HoverAction::Enter(cell)))
                };
                let onmouseleave = {
                    let hover = hover.dispatcher();
                    Callback::from(move |_: MouseEvent| hover.dispatch(HoverAction::Leave(cell)))
                };
                let style = format!("grid-row: {}; grid-column: {};", cell.row + 1, cell.col + 1);

                html! {
                    <div key={tile.id} class="frame-cell" {style} {onmouseenter} {onmouseleave}>
                        <FrameTile
                            tile={tile.clone()}
                            hovered={hover.is_hovered(cell)}
                            policy={config.playback}
                            show_frame={config.show_frames}
                        />
                    </div>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FrameTileProps {
    tile: MediaTile,
    hovered: bool,
    policy: PlaybackPolicy,
    show_frame: bool,
}

#[function_component(FrameTile)]
fn frame_tile(props: &FrameTileProps) -> Html {
    let video_ref = use_node_ref();
    let playback = use_mut_ref(|| TilePlayback::new(props.policy));

    {
        let video_ref = video_ref.clone();
        let playback = playback.clone();
        use_effect_with(props.hovered, move |hovered| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                video.set_muted(true);
                if let Some(command) = playback.borrow_mut().sync(*hovered) {
                    apply_playback(&video, command);
                }
            }
            || ()
        });
    }

    let tile = &props.tile;
    let media_style = format!(
        "transform: scale({}); transform-origin: {}; transition: transform 0.3s ease;",
        tile.media_scale,
        tile.transform_origin(),
    );
    let decor = props.show_frame.then_some(tile.decor.as_ref()).flatten();

    html! {
        <div class="frame-tile">
            <div class="frame-media" style={media_style}>
                <video
                    ref={video_ref}
                    src={tile.media_ref}
                    loop=true
                    muted=true
                    playsinline=true
                    preload="metadata"
                />
            </div>
            if let Some(decor) = decor {
                <FrameBorder decor={decor.clone()} />
            }
            if let Some(caption) = tile.caption {
                <Caption text={caption} link_url={tile.link_url} visible={props.hovered} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FrameBorderProps {
    decor: FrameDecor,
}

/// Nine-slice picture frame drawn around the media.
#[function_component(FrameBorder)]
fn frame_border(props: &FrameBorderProps) -> Html {
    let decor = &props.decor;
    let inset = (100.0 - decor.border_size) / 2.0;
    let thickness = decor.border_thickness;
    let corner = |position: &str| {
        html! {
            <div
                class={classes!("frame-corner", position.to_string())}
                style={format!("width: {thickness}px; height: {thickness}px; background-image: url({});", decor.corner)}
            />
        }
    };
    let edge = |position: &str, image: &str, horizontal: bool| {
        let size = if horizontal {
            format!("height: {thickness}px; left: {thickness}px; right: {thickness}px;")
        } else {
            format!("width: {thickness}px; top: {thickness}px; bottom: {thickness}px;")
        };
        html! {
            <div
                class={classes!("frame-edge", position.to_string())}
                style={format!("{size} background-image: url({image});")}
            />
        }
    };

    html! {
        <div class="frame-border" style={format!("inset: {inset:.2}%;")} aria-hidden="true">
            { corner("top-left") }
            { corner("top-right") }
            { corner("bottom-left") }
            { corner("bottom-right") }
            { edge("top", decor.edge_horizontal, true) }
            { edge("bottom", decor.edge_horizontal, true) }
            { edge("left", decor.edge_vertical, false) }
            { edge("right", decor.edge_vertical, false) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CaptionProps {
    text: &'static str,
    link_url: Option<&'static str>,
    visible: bool,
}

#[function_component(Caption)]
fn caption(props: &CaptionProps) -> Html {
    let style = format!("transition: transform {CAPTION_TRANSITION_SECS}s ease-out, opacity {CAPTION_TRANSITION_SECS}s ease-out;");
    let class = classes!("frame-caption", props.visible.then_some("is-visible"));

    match props.link_url {
        Some(href) => html! {
            <div {class} {style}>
                <ExternalLink href={href} class="frame-caption-link">
                    {props.text}
                    <span class="frame-caption-arrow" aria-hidden="true">{"↗"}</span>
                </ExternalLink>
            </div>
        },
        None => html! {
            <div {class} {style}>
                <span class="frame-caption-text">{props.text}</span>
            </div>
        },
    }
}
