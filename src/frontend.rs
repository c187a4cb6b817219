mod backdrop;
mod dom;
mod frames;
mod nav_rail;
mod papers;
mod profile;

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{window, HtmlElement};
use yew::prelude::*;

use crate::nav::{ScrollNavigator, ScrollState};
use crate::site;

use backdrop::{CyberGrid, MatrixRain, Spotlight};
use dom::{ContainerSurface, EventListenerGuard};
use frames::DemoGallery;
use nav_rail::NavRail;
use papers::PublicationList;
use profile::{HighlightStrip, ProfilePanel, SplineScene};

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    #[prop_or_default]
    class: Classes,
    #[prop_or(true)]
    new_tab: bool,
    #[prop_or_default]
    children: Html,
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    if !props.new_tab {
        return html! {
            <a class={props.class.clone()} href={props.href.clone()}>
                {props.children.clone()}
            </a>
        };
    }

    html! {
        <a
            class={props.class.clone()}
            href={props.href.clone()}
            target="_blank"
            rel="noopener noreferrer"
        >
            {props.children.clone()}
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

fn container_surface(node: &NodeRef) -> Option<ContainerSurface> {
    node.cast::<HtmlElement>().map(ContainerSurface::new)
}

type SharedNavigator = Rc<RefCell<ScrollNavigator>>;

#[derive(Properties)]
struct ScrollShellProps {
    navigator: SharedNavigator,
}

impl PartialEq for ScrollShellProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.navigator, &other.navigator)
    }
}

#[function_component(ScrollShell)]
fn scroll_shell(props: &ScrollShellProps) -> Html {
    let scroll_ref = use_node_ref();
    let scroll_state = use_state_eq(|| props.navigator.borrow().state());
    let targets = use_memo((), {
        let navigator = props.navigator.clone();
        move |_| navigator.borrow().targets().to_vec()
    });

    {
        let navigator = props.navigator.clone();
        let scroll_state = scroll_state.clone();
        use_effect_with(scroll_ref.clone(), move |scroll_ref| {
            let recompute: Rc<dyn Fn()> = {
                let scroll_ref = scroll_ref.clone();
                let navigator = navigator.clone();
                Rc::new(move || {
                    if let Some(surface) = container_surface(&scroll_ref) {
                        let next = navigator.borrow_mut().on_scroll(&surface);
                        scroll_state.set(next);
                    }
                })
            };

            let scroll_guard = scroll_ref.cast::<HtmlElement>().map(|element| {
                let recompute = recompute.clone();
                EventListenerGuard::passive(&element, "scroll", move |_| recompute())
            });

            let resize_guard = window().map(|win| {
                let recompute = recompute.clone();
                EventListenerGuard::new(&win, "resize", move |_| {
                    navigator.borrow_mut().invalidate_geometry();
                    recompute();
                })
            });

            recompute();

            move || {
                drop(scroll_guard);
                drop(resize_guard);
            }
        });
    }

    let on_navigate = {
        let navigator = props.navigator.clone();
        let scroll_ref = scroll_ref.clone();
        Callback::from(move |id: &'static str| {
            if let Some(surface) = container_surface(&scroll_ref) {
                navigator.borrow().navigate_to(id, &surface);
            }
        })
    };

    let ScrollState { active_id, .. } = *scroll_state;
    let marker_offset = props.navigator.borrow().marker_offset();

    html! {
        <>
            <main class="content-panel" ref={scroll_ref}>
                <section class="section-block" aria-labelledby={site::section_anchor_id("demos")}>
                    <h2 id={site::section_anchor_id("demos")} class="section-heading">{"Selected Demos"}</h2>
                    <DemoGallery />
                </section>
                <section class="section-block" aria-labelledby={site::section_anchor_id("highlights")}>
                    <h2 id={site::section_anchor_id("highlights")} class="section-heading">{"Highlights"}</h2>
                    <HighlightStrip />
                </section>
                <section class="section-block" aria-labelledby={site::section_anchor_id("publications")}>
                    <h2 id={site::section_anchor_id("publications")} class="section-heading">{"All Publications"}</h2>
                    <PublicationList />
                </section>
            </main>
            <NavRail {targets} {active_id} {marker_offset} {on_navigate} />
        </>
    }
}

#[function_component(App)]
fn app() -> Html {
    let navigator = use_memo((), |_| {
        ScrollNavigator::new(site::nav_targets())
            .ok()
            .map(|navigator| Rc::new(RefCell::new(navigator)))
    });

    html! {
        <div class="page-shell">
            <MatrixRain settings={site::rain_settings()} />
            <CyberGrid />
            <div class="ambient-glow" aria-hidden="true" />
            <Spotlight />
            <div class="page-columns">
                if let Some(navigator) = (*navigator).clone() {
                    <ScrollShell {navigator} />
                }
                <aside class="profile-column">
                    <ProfilePanel />
                    <SplineScene url={site::SCENE_URL} />
                </aside>
            </div>
        </div>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
