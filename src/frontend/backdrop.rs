use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Math;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::dom::{prefers_reduced_motion, AnimationFrameLoop, EventListenerGuard};
use crate::rain::{RainField, RainSettings, HEAD_ALPHA, TRAIL_ALPHA};

/// Wash painted over the previous frame so old glyphs fade out.
const FADE_FILL: &str = "rgba(0, 0, 0, 0.05)";

#[derive(Properties, PartialEq)]
pub struct MatrixRainProps {
    pub settings: RainSettings,
}

#[function_component(MatrixRain)]
pub fn matrix_rain(props: &MatrixRainProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.settings.clone(), move |settings| {
            let rain = canvas_ref
                .cast::<HtmlCanvasElement>()
                .and_then(|canvas| RainCanvas::start(canvas, settings));
            move || drop(rain)
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            class="matrix-rain"
            style={format!("opacity: {};", props.settings.opacity)}
            aria-hidden="true"
        />
    }
}

/// Live rain animation; stops and detaches when dropped.
struct RainCanvas {
    _resize: EventListenerGuard,
    _frames: Option<AnimationFrameLoop>,
}

struct Painter {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: RainField,
    color: &'static str,
    font: String,
    font_size: f64,
}

impl Painter {
    fn css_size(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.offset_width()),
            f64::from(self.canvas.offset_height()),
        )
    }

    fn fit(&mut self, device_pixel_ratio: f64) {
        let (width, height) = self.css_size();
        self.canvas.set_width((width * device_pixel_ratio) as u32);
        self.canvas.set_height((height * device_pixel_ratio) as u32);
        let _ = self
            .context
            .set_transform(device_pixel_ratio, 0.0, 0.0, device_pixel_ratio, 0.0, 0.0);
        self.field.resize(width, height, &mut Math::random);
    }

    fn paint(&mut self) {
        let (width, height) = self.css_size();
        self.context.set_fill_style_str(FADE_FILL);
        self.context.fill_rect(0.0, 0.0, width, height);

        self.context.set_font(&self.font);
        self.context.set_fill_style_str(self.color);
        for glyph in self.field.step(&mut Math::random) {
            self.context.set_global_alpha(HEAD_ALPHA);
            let _ = self.context.fill_text(&glyph.head.to_string(), glyph.x, glyph.y);
            self.context.set_global_alpha(TRAIL_ALPHA);
            let _ = self
                .context
                .fill_text(&glyph.trail.to_string(), glyph.x, glyph.y - self.font_size);
        }
        self.context.set_global_alpha(1.0);
    }
}

impl RainCanvas {
    fn start(canvas: HtmlCanvasElement, settings: &RainSettings) -> Option<Self> {
        let win = window()?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let painter = Rc::new(RefCell::new(Painter {
            canvas,
            context,
            field: RainField::new(settings),
            color: settings.color,
            font: format!("{}px monospace", settings.font_size),
            font_size: settings.font_size,
        }));
        painter.borrow_mut().fit(win.device_pixel_ratio());

        let resize = {
            let painter = painter.clone();
            let ratio_source = win.clone();
            EventListenerGuard::new(&win, "resize", move |_| {
                painter.borrow_mut().fit(ratio_source.device_pixel_ratio());
            })
        };

        let frames = if prefers_reduced_motion() {
            painter.borrow_mut().paint();
            None
        } else {
            Some(AnimationFrameLoop::start(move || painter.borrow_mut().paint()))
        };

        Some(Self {
            _resize: resize,
            _frames: frames,
        })
    }
}

#[function_component(CyberGrid)]
pub fn cyber_grid() -> Html {
    html! {
        <div class="cyber-grid" aria-hidden="true">
            <div class="cyber-grid-floor" />
            <div class="cyber-grid-scanlines" />
            <div class="cyber-grid-vignette" />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SpotlightProps {
    #[prop_or(AttrValue::Static("#c084fc"))]
    pub fill: AttrValue,
}

#[function_component(Spotlight)]
pub fn spotlight(props: &SpotlightProps) -> Html {
    html! {
        <svg class="spotlight" viewBox="0 0 3787 2842" fill="none" aria-hidden="true">
            <ellipse
                cx="1924.71"
                cy="273.501"
                rx="1924.71"
                ry="273.501"
                transform="matrix(-0.822377 -0.568943 -0.568943 0.822377 3631.88 2291.09)"
                fill={props.fill.clone()}
                fill-opacity="0.21"
            />
        </svg>
    }
}
