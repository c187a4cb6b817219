use std::f64::consts::PI;
use std::rc::Rc;

use yew::prelude::*;

use crate::nav::{NavTarget, Planet};

/// Half the rocket's height, so its nose sits on the first waypoint at rest.
const ROCKET_LIFT_PX: f64 = 42.0;

#[derive(Properties, PartialEq)]
pub struct NavRailProps {
    pub targets: Rc<Vec<NavTarget>>,
    pub active_id: &'static str,
    pub marker_offset: f64,
    pub on_navigate: Callback<&'static str>,
}

#[function_component(NavRail)]
pub fn nav_rail(props: &NavRailProps) -> Html {
    let rocket_style = format!(
        "top: calc(30% - {ROCKET_LIFT_PX}px + {:.2}px);",
        props.marker_offset
    );

    html! {
        <nav class="nav-rail" aria-label="Sections">
            <div class="nav-rail-track" aria-hidden="true" />
            <div class="nav-rail-rocket" style={rocket_style} aria-hidden="true">
                <StarshipIcon />
                <FlameTrail />
            </div>
            { for props.targets.iter().map(|target| {
                let active = target.id == props.active_id;
                let onclick = {
                    let on_navigate = props.on_navigate.clone();
                    let id = target.id;
                    Callback::from(move |_: MouseEvent| on_navigate.emit(id))
                };
                html! {
                    <button
                        key={target.id}
                        type="button"
                        class={classes!("waypoint", active.then_some("is-active"))}
                        style={format!("top: calc(30% + {}px);", target.track_offset)}
                        title={target.label}
                        aria-current={active.then_some("true")}
                        {onclick}
                    >
                        <span class="waypoint-planet">
                            <PlanetIcon planet={target.planet} {active} />
                        </span>
                        <span class="waypoint-label">{target.label}</span>
                    </button>
                }
            }) }
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct PlanetIconProps {
    planet: Planet,
    active: bool,
}

#[function_component(PlanetIcon)]
fn planet_icon(props: &PlanetIconProps) -> Html {
    match props.planet {
        Planet::Sun => sun_icon(props.active),
        Planet::Earth => earth_icon(props.active),
        Planet::Saturn => saturn_icon(props.active),
    }
}

fn sun_icon(active: bool) -> Html {
    let rays = active.then(|| {
        (0..8)
            .map(|step| {
                let angle = f64::from(step) * 45.0 * PI / 180.0;
                let (sin, cos) = angle.sin_cos();
                html! {
                    <line
                        x1={format!("{:.2}", 9.0 + cos * 6.5)}
                        y1={format!("{:.2}", 9.0 + sin * 6.5)}
                        x2={format!("{:.2}", 9.0 + cos * 8.5)}
                        y2={format!("{:.2}", 9.0 + sin * 8.5)}
                        stroke="#fbbf24"
                        stroke-width="0.8"
                        opacity="0.6"
                        stroke-linecap="round"
                    />
                }
            })
            .collect::<Html>()
    });

    html! {
        <svg class="planet planet-sun" width="18" height="18" viewBox="0 0 18 18">
            <circle cx="9" cy="9" r="6" fill="#d97706" />
            <circle cx="9" cy="9" r="4.6" fill="#f59e0b" />
            <circle cx="8.4" cy="8.4" r="2.6" fill="#fbbf24" />
            <circle cx="8" cy="8" r="1" fill="#fff7ed" opacity="0.8" />
            { rays.unwrap_or_default() }
        </svg>
    }
}

fn earth_icon(active: bool) -> Html {
    html! {
        <svg class="planet planet-earth" width="14" height="14" viewBox="0 0 14 14">
            <circle cx="7" cy="7" r="5.5" fill="#1e3a5f" />
            <circle cx="6.4" cy="6.4" r="4.4" fill="#3b82f6" />
            <circle cx="5.6" cy="5.6" r="1.8" fill="#93c5fd" opacity="0.5" />
            <path d="M5 4.5Q6 3.5 7.5 4Q8 4.5 7.5 5.5Q6.5 6 5.5 5.5Q5 5 5 4.5Z" fill="#4ade80" opacity="0.7" />
            <path d="M8 6.5Q9 6 9.5 7Q9 8 8 8Q7.5 7.5 8 6.5Z" fill="#4ade80" opacity="0.6" />
            <path d="M4.5 7Q5.5 6.5 6 7.5Q5.5 8.5 4.5 8Q4 7.5 4.5 7Z" fill="#4ade80" opacity="0.5" />
            <circle
                cx="7"
                cy="7"
                r="5.5"
                fill="none"
                stroke={if active { "#60a5fa" } else { "#ffffff20" }}
                stroke-width="0.5"
            />
        </svg>
    }
}

fn saturn_icon(active: bool) -> Html {
    let (ring, ring_opacity) = if active { ("#fbbf24", "0.7") } else { ("#d4a056", "0.4") };
    let (inner_ring, inner_opacity) = if active { ("#fde68a", "0.5") } else { ("#c4943c", "0.25") };

    html! {
        <svg class="planet planet-saturn" width="22" height="16" viewBox="0 0 22 16">
            <ellipse cx="11" cy="8" rx="10" ry="3" fill="none" stroke="#d4a056" stroke-width="1.2" opacity="0.3" stroke-dasharray="0 15.7 15.7 0" />
            <circle cx="11" cy="8" r="4.5" fill="#92400e" />
            <circle cx="10.5" cy="7.5" r="3.8" fill="#d4a056" />
            <circle cx="10" cy="7" r="1.6" fill="#fef3c7" opacity="0.45" />
            <path d="M6.8 7h8.4" stroke="#b8860b" stroke-width="0.4" opacity="0.3" />
            <path d="M6.6 8.5h8.8" stroke="#b8860b" stroke-width="0.3" opacity="0.25" />
            <ellipse cx="11" cy="8" rx="10" ry="3" fill="none" stroke={ring} stroke-width="1.2" opacity={ring_opacity} stroke-dasharray="15.7 15.7" />
            <ellipse cx="11" cy="8" rx="7.5" ry="2.2" fill="none" stroke={inner_ring} stroke-width="0.6" opacity={inner_opacity} stroke-dasharray="11.8 11.8" />
        </svg>
    }
}

#[function_component(StarshipIcon)]
fn starship_icon() -> Html {
    let booster_lines = [32, 36, 40, 44].map(|y| {
        html! { <line x1="6" y1={y.to_string()} x2="14" y2={y.to_string()} stroke="#60607040" stroke-width="0.3" /> }
    });
    let panel_lines = [14, 18, 22].map(|y| {
        html! { <line x1="6" y1={y.to_string()} x2="14" y2={y.to_string()} stroke="#b0b0c040" stroke-width="0.3" /> }
    });

    html! {
        <svg width="30" height="84" viewBox="0 0 20 56" fill="none">
            // Booster
            <rect x="6" y="28" width="8" height="22" rx="0.5" fill="#b0b0c0" />
            <rect x="6" y="28" width="2" height="22" fill="#707080" opacity="0.6" />
            { for booster_lines }
            <rect x="3" y="30" width="3" height="4" rx="0.5" fill="#505060" />
            <rect x="14" y="30" width="3" height="4" rx="0.5" fill="#505060" />
            // Interstage
            <rect x="5.5" y="26" width="9" height="3" rx="0.5" fill="#404050" />
            <line x1="5.5" y1="27.5" x2="14.5" y2="27.5" stroke="#606070" stroke-width="0.3" />
            // Upper stage
            <rect x="6" y="10" width="8" height="16" rx="0.5" fill="#d4d4e0" />
            { for panel_lines }
            <path d="M6 12L4 10L4 16L6 16Z" fill="#a0a0b0" stroke="#80808a" stroke-width="0.2" />
            <path d="M14 12L16 10L16 16L14 16Z" fill="#a0a0b0" stroke="#80808a" stroke-width="0.2" />
            <path d="M10 0 Q6.5 6 6 10 L14 10 Q13.5 6 10 0Z" fill="#e8e8f0" />
            <path d="M10 1 Q8 5 7.5 10 L9 10 Q9 5 10 1Z" fill="white" opacity="0.15" />
            <rect x="6" y="10" width="2.5" height="16" fill="#606068" opacity="0.3" rx="0.3" />
            // Engines
            <circle cx="8.5" cy="50" r="1" fill="#303038" stroke="#50505a" stroke-width="0.3" />
            <circle cx="11.5" cy="50" r="1" fill="#303038" stroke="#50505a" stroke-width="0.3" />
            <circle cx="10" cy="49" r="1" fill="#303038" stroke="#50505a" stroke-width="0.3" />
        </svg>
    }
}

/// Spread (px) and start delay (s) of each exhaust spark.
const SPARKS: [(f64, f64); 5] = [(-3.0, 0.0), (2.0, 0.15), (-1.0, 0.3), (3.0, 0.5), (0.0, 0.7)];

const SHOCK_DIAMONDS: [u32; 4] = [4, 10, 17, 25];

#[function_component(FlameTrail)]
fn flame_trail() -> Html {
    html! {
        <div class="flame-trail">
            <div class="flame flame-plume" />
            <div class="flame flame-core" />
            { for SHOCK_DIAMONDS.iter().enumerate().map(|(index, top)| {
                let index = index as f64;
                let style = format!(
                    "top: {top}px; width: {:.1}px; animation-delay: {:.2}s; --diamond-alpha: {:.2};",
                    10.0 - index * 1.5,
                    index * 0.08,
                    0.9 - index * 0.15,
                );
                html! { <div class="flame flame-diamond" {style} /> }
            }) }
            <div class="flame flame-nozzle" />
            { for SPARKS.iter().map(|(spread, delay)| {
                let style = format!(
                    "left: calc(50% + {spread}px); animation-delay: {delay}s; --spark-drift: {:.1}px;",
                    spread * 1.5,
                );
                html! { <div class="flame-spark" {style} /> }
            }) }
        </div>
    }
}
